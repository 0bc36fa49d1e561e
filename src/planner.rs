/// Writing planner pages: one HTML file per program.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;
use tracing::info;

use crate::area::assign_colors;
use crate::config::Settings;
use crate::error::{MallaError, Result};
use crate::render::{RenderContext, render_planner};
use crate::sheet;
use crate::types::Program;

static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("valid file name pattern"));

/// `<code>.html`, with runs of unsafe characters collapsed to `_`.
pub fn program_file_name(code: &str) -> String {
    let code = code.trim();
    let code = if code.is_empty() { "PROG" } else { code };
    format!("{}.html", UNSAFE_FILE_CHARS.replace_all(code, "_"))
}

/// Render one program into `outdir` and return the written path.
pub fn write_program(outdir: &Path, program: &Program, settings: &Settings) -> Result<PathBuf> {
    let areas = assign_colors(program.courses.iter().map(|c| &c.area), settings.mode);
    let ctx = RenderContext {
        fallback_color: settings.fallback_color.clone(),
        generated_at: Local::now(),
    };
    let html = render_planner(program, &areas, &ctx)?;
    let path = outdir.join(program_file_name(&program.code));
    fs::write(&path, html)?;
    info!(
        path = %path.display(),
        code = %program.code,
        courses = program.courses.len(),
        areas = areas.len(),
        "wrote planner"
    );
    Ok(path)
}

/// Read a workbook and write a planner for every program it describes.
pub fn process_workbook(path: &Path, settings: &Settings) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(MallaError::NotFound(path.to_path_buf()));
    }
    let programs = sheet::read_programs(path)?;
    fs::create_dir_all(&settings.outdir)?;
    programs
        .iter()
        .map(|program| write_program(&settings.outdir, program, settings))
        .collect()
}
