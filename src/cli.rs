/// CLI argument parsing and command handling.
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use crate::area::assign_colors;
use crate::config::{self, Overrides, Settings};
use crate::sheet::{infer_from_filename, parse_level};
use crate::types::ColorMode;
use crate::{planner, preview};

#[derive(Parser)]
#[command(
    name = "mallas",
    version,
    about = "Mallas - interactive course planners from spreadsheet catalogs"
)]
pub struct Cli {
    /// More logging (debug level)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: <config dir>/mallas/config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ColorArgs {
    /// Shuffle area colors (use --seed for reproducible output)
    #[arg(long = "randomize-colors")]
    pub randomize_colors: bool,

    /// Seed for randomized colors; ignored unless colors are randomized
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one HTML planner per program found in a workbook
    Build {
        /// Workbook (.xlsx, .xls or .ods)
        workbook: PathBuf,
        /// Output directory (default: dist)
        #[arg(long)]
        outdir: Option<PathBuf>,
        #[command(flatten)]
        colors: ColorArgs,
    },
    /// Show the colors a set of areas would receive
    Colors {
        #[arg(required = true)]
        areas: Vec<String>,
        #[command(flatten)]
        colors: ColorArgs,
        /// No terminal colors
        #[arg(long)]
        plain: bool,
    },
    /// Run the built-in parsing and color reproducibility checks
    Selftest {
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

/// Execute a CLI command (build, colors or selftest).
pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Build {
            workbook,
            outdir,
            colors,
        } => handle_build(&workbook, outdir, colors, config_path)?,
        Command::Colors {
            areas,
            colors,
            plain,
        } => handle_colors(areas, colors, plain, config_path)?,
        Command::Selftest { seed } => handle_selftest(seed)?,
    }
    Ok(())
}

fn settings(outdir: Option<PathBuf>, colors: ColorArgs, config_path: Option<&Path>) -> Result<Settings> {
    let file = config::load_file(config_path).context("could not load config")?;
    let overrides = Overrides {
        outdir,
        randomize_colors: colors.randomize_colors,
        seed: colors.seed,
    };
    Ok(Settings::resolve(file, overrides)?)
}

fn handle_build(
    workbook: &Path,
    outdir: Option<PathBuf>,
    colors: ColorArgs,
    config_path: Option<&Path>,
) -> Result<()> {
    let settings = settings(outdir, colors, config_path)?;
    let outputs = planner::process_workbook(workbook, &settings)
        .with_context(|| format!("could not generate planners from {}", workbook.display()))?;
    println!("Archivos generados:");
    for path in outputs {
        println!(" - {}", path.display());
    }
    Ok(())
}

fn handle_colors(
    areas: Vec<String>,
    colors: ColorArgs,
    plain: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let settings = settings(None, colors, config_path)?;
    let assigned = assign_colors(&areas, settings.mode);
    let mut stdout = io::stdout().lock();
    preview::write_assignment(&mut stdout, &assigned, plain)
}

const SELFTEST_AREAS: [&str; 17] = [
    "CDAT", "CBAS", "ISCO", "ECON", "CHUL", "CHUM", "IIND", "AEMP", "ECOU", "OTRO", "X1", "X2",
    "X3", "X4", "X5", "X6", "X7",
];

fn handle_selftest(seed: u64) -> Result<()> {
    let level_i = parse_level("I");
    println!("[SELFTEST] parse_level I -> {level_i:?}");
    ensure!(level_i == Some(1), "roman level I should parse as 1");
    let level_3 = parse_level("3");
    println!("[SELFTEST] parse_level 3 -> {level_3:?}");
    ensure!(level_3 == Some(3), "numeric level 3 should parse as 3");

    let (title, code) = infer_from_filename(Path::new("CIENCIA DE DATOS - CDAT.xlsx"));
    println!("[SELFTEST] infer filename -> {title} {code}");
    ensure!(
        title == "CIENCIA DE DATOS" && code == "CDAT",
        "file name inference failed"
    );

    let mode = ColorMode::Randomized { seed: Some(seed) };
    let first = assign_colors(SELFTEST_AREAS, mode);
    let second = assign_colors(SELFTEST_AREAS, mode);
    ensure!(
        first == second,
        "randomized colors with the same seed must match"
    );
    ensure!(
        first.len() == SELFTEST_AREAS.len(),
        "every area needs a color"
    );
    println!("[SELFTEST] OK seed reproducible and color bag expanded");
    Ok(())
}
