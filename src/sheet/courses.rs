/// Course rows: column checks, level and credit parsing.
use tracing::debug;

use super::table::Table;
use crate::area::FALLBACK_AREA;
use crate::error::{MallaError, Result};
use crate::types::{Course, Level};

pub const REQUIRED_COLUMNS: [&str; 5] = ["LEVEL", "ID", "NAME", "CREDITS", "AREA"];

const ROMANS: [(&str, Level); 10] = [
    ("I", 1),
    ("II", 2),
    ("III", 3),
    ("IV", 4),
    ("V", 5),
    ("VI", 6),
    ("VII", 7),
    ("VIII", 8),
    ("IX", 9),
    ("X", 10),
];

/// Parse a level written as a number (`3`, `3.0`) or a Roman numeral up to `X`.
///
/// Zero and negative levels are rejected.
pub fn parse_level(value: &str) -> Option<Level> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(number) = s.parse::<f64>() {
        if !number.is_finite() || number < 1.0 || number >= (Level::MAX as f64) {
            return None;
        }
        return Some(number.trunc() as Level);
    }
    let upper = s.to_uppercase();
    ROMANS
        .iter()
        .find(|(roman, _)| *roman == upper)
        .map(|(_, level)| *level)
}

/// Parse an integer cell, truncating decimals; `default` when empty or garbage.
pub fn parse_int(value: &str, default: i64) -> i64 {
    let s = value.trim();
    match s.parse::<f64>() {
        Ok(number) if number.is_finite() => number.trunc() as i64,
        _ => default,
    }
}

/// Build the courses of one sheet (or one program group within a sheet).
///
/// Rows without a valid level, id or name are skipped. Every header starting
/// with `PRE` is a prerequisite column, in sheet order.
pub fn build_courses(table: &Table) -> Result<Vec<Course>> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(MallaError::MissingColumns {
            sheet: table.sheet.clone(),
            missing,
            required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        });
    }

    // Checked above.
    let col = |name: &str| table.column(name).unwrap_or_default();
    let (level_col, id_col, name_col, credits_col, area_col) = (
        col("LEVEL"),
        col("ID"),
        col("NAME"),
        col("CREDITS"),
        col("AREA"),
    );
    let pre_cols: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with("PRE"))
        .map(|(i, _)| i)
        .collect();

    let mut courses = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;
    for row in 0..table.rows.len() {
        let level = parse_level(table.cell(row, level_col));
        let id = table.cell(row, id_col).trim();
        let name = table.cell(row, name_col).trim();
        let Some(level) = level.filter(|_| !id.is_empty() && !name.is_empty()) else {
            skipped += 1;
            continue;
        };
        let area = match table.cell(row, area_col).trim() {
            "" => FALLBACK_AREA.to_string(),
            area => area.to_string(),
        };
        let prereq = pre_cols
            .iter()
            .map(|&c| table.cell(row, c).trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        courses.push(Course {
            id: id.to_string(),
            name: name.to_string(),
            area,
            level,
            prereq,
            credits: parse_int(table.cell(row, credits_col), 0),
        });
    }

    if skipped > 0 {
        debug!(sheet = %table.sheet, skipped, "skipped rows without level, id or name");
    }
    if courses.is_empty() {
        return Err(MallaError::NoCourses {
            sheet: table.sheet.clone(),
        });
    }
    Ok(courses)
}
