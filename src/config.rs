/// Optional TOML config file merged under command-line flags.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::color::is_valid_hex;
use crate::error::{MallaError, Result};
use crate::render::DEFAULT_FALLBACK_COLOR;
use crate::types::ColorMode;

pub const DEFAULT_OUTDIR: &str = "dist";

/// Contents of `config.toml`; every key is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub outdir: Option<PathBuf>,
    pub randomize_colors: Option<bool>,
    pub seed: Option<u64>,
    pub fallback_color: Option<String>,
}

/// Values given on the command line, which take precedence over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub outdir: Option<PathBuf>,
    pub randomize_colors: bool,
    pub seed: Option<u64>,
}

/// Effective settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub outdir: PathBuf,
    pub mode: ColorMode,
    pub fallback_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            mode: ColorMode::Deterministic,
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }
}

/// Returns the per-user config path, e.g. `~/.config/mallas/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mallas").join("config.toml"))
}

/// Parse a config file.
pub fn parse_file(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|source| MallaError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the explicit config file, or the per-user one when it exists.
pub fn load_file(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return parse_file(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!(path = %path.display(), "loading config");
            parse_file(&path)
        }
        _ => Ok(FileConfig::default()),
    }
}

impl Settings {
    /// Merge command-line overrides over the file config over built-in defaults.
    pub fn resolve(file: FileConfig, cli: Overrides) -> Result<Self> {
        let defaults = Settings::default();
        let randomize = cli.randomize_colors || file.randomize_colors.unwrap_or(false);
        let seed = cli.seed.or(file.seed);
        if seed.is_some() && !randomize {
            debug!("seed given without randomized colors; ignoring it");
        }
        let fallback_color = file.fallback_color.unwrap_or(defaults.fallback_color);
        if !is_valid_hex(&fallback_color) {
            return Err(MallaError::Setting(format!(
                "fallback_color must look like #rrggbb, got '{fallback_color}'"
            )));
        }
        Ok(Self {
            outdir: cli.outdir.or(file.outdir).unwrap_or(defaults.outdir),
            mode: ColorMode::from_flags(randomize, seed),
            fallback_color: fallback_color.to_lowercase(),
        })
    }
}
