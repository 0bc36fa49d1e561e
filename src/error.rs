/// Errors raised while reading catalogs and writing planners.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MallaError>;

#[derive(Debug, Error)]
pub enum MallaError {
    #[error("workbook not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("failed to read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    #[error("sheet '{sheet}' is missing required columns {missing:?}; expected {required:?} plus optional PRE1, PRE2, ...")]
    MissingColumns {
        sheet: String,
        missing: Vec<String>,
        required: Vec<String>,
    },

    #[error("no courses built from sheet '{sheet}'; check that rows have valid LEVEL, ID and NAME")]
    NoCourses { sheet: String },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting: {0}")]
    Setting(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
