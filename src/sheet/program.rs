/// Program title/code inference from sheet names, file names and PROGRAM columns.
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::courses::build_courses;
use super::table::Table;
use crate::error::Result;
use crate::types::Program;

pub const PROGRAM_COLUMN: &str = "PROGRAM";
pub const PROGRAM_CODE_COLUMN: &str = "PROGRAM_CODE";

/// `"Title - CODE"`, split on the last dash.
static TITLE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)\s*-\s*([A-Za-z0-9_]+)\s*$").expect("valid title/code pattern")
});

static BARE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_]{3,}$").expect("valid code pattern"));

fn short_code(name: &str) -> String {
    name.trim().to_uppercase().chars().take(4).collect()
}

fn split_title_code(name: &str) -> Option<(String, String)> {
    let caps = TITLE_CODE.captures(name.trim())?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

/// Guess `(title, code)` from a sheet name.
///
/// `"Ciencia de Datos - CDAT"` splits on the dash; otherwise a trailing
/// uppercase word of three or more characters is the code; otherwise the code
/// is the first four characters of the name, uppercased.
pub fn infer_from_sheet(sheet: &str) -> (String, String) {
    if let Some(pair) = split_title_code(sheet) {
        return pair;
    }
    let title = sheet.trim().to_string();
    let code = title
        .split_whitespace()
        .last()
        .filter(|word| BARE_CODE.is_match(word))
        .map(str::to_string)
        .unwrap_or_else(|| short_code(sheet));
    (title, code)
}

/// Guess `(title, code)` from a workbook file name such as `"CIENCIA DE DATOS - CDAT.xlsx"`.
pub fn infer_from_filename(path: &Path) -> (String, String) {
    let base = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Some(pair) = split_title_code(&base) {
        return pair;
    }
    let title = base.trim().to_string();
    let code = short_code(&base);
    (title, code)
}

/// True when the sheet lists several programs in PROGRAM / PROGRAM_CODE columns.
pub fn has_program_columns(table: &Table) -> bool {
    table.has_column(PROGRAM_COLUMN) || table.has_column(PROGRAM_CODE_COLUMN)
}

/// One program per sheet, named after the sheet or, failing that, the file.
pub fn program_from_sheet(table: &Table, workbook: &Path) -> Result<Program> {
    let courses = build_courses(table)?;
    let sheet = table.sheet.trim();
    let (mut title, mut code) = infer_from_sheet(sheet);
    let sheet_code = short_code(sheet);
    if code.is_empty() || code.to_uppercase() == sheet_code {
        let (file_title, file_code) = infer_from_filename(workbook);
        if !file_title.is_empty() && !file_code.is_empty() {
            if title == sheet {
                title = file_title;
            }
            if code.is_empty() || code == sheet_code {
                code = file_code;
            }
        }
    }
    debug!(sheet, %title, %code, courses = courses.len(), "program from sheet");
    Ok(Program {
        title,
        code,
        courses,
    })
}

/// Split a multi-program sheet into one program per PROGRAM_CODE (or PROGRAM) value.
///
/// Groups come out in sorted key order. The title is the group's first
/// PROGRAM value, else the sheet's, else the file name's.
pub fn programs_from_grouped_sheet(table: &Table, workbook: &Path) -> Result<Vec<Program>> {
    let key_column = if table.has_column(PROGRAM_CODE_COLUMN) {
        PROGRAM_CODE_COLUMN
    } else {
        PROGRAM_COLUMN
    };
    let key_col = table.column(key_column).unwrap_or_default();

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for row in 0..table.rows.len() {
        groups
            .entry(table.cell(row, key_col).to_string())
            .or_default()
            .push(row);
    }

    let (file_title, file_code) = infer_from_filename(workbook);
    let sheet_title = table
        .first_value(PROGRAM_COLUMN)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let mut programs = Vec::with_capacity(groups.len());
    for (key, rows) in groups {
        let group = table.subset(&rows);
        let courses = build_courses(&group)?;

        let title = group
            .first_value(PROGRAM_COLUMN)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| sheet_title.clone())
            .unwrap_or_else(|| file_title.clone());
        let code = group
            .first_value(PROGRAM_CODE_COLUMN)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .or_else(|| Some(key.trim().to_string()).filter(|k| !k.is_empty()))
            .unwrap_or_else(|| file_code.clone());

        debug!(sheet = %table.sheet, %title, %code, courses = courses.len(), "program from group");
        programs.push(Program {
            title,
            code,
            courses,
        });
    }
    Ok(programs)
}
