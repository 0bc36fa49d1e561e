//! Interactive course planners ("mallas") generated from spreadsheet catalogs.
//!
//! Courses are read from workbook sheets, each area (category) gets its own
//! color, and every program is written as a self-contained HTML page.
pub mod area;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod planner;
pub mod preview;
pub mod render;
pub mod sheet;
pub mod types;

pub use area::{area_var_name, assign_colors, normalize_area};
pub use color::{BASE_PALETTE, expand_color_bag};
pub use error::{MallaError, Result};
pub use types::{AreaColor, ColorMode, Course, Program};
