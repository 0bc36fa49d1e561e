/// Spreadsheet ingestion: workbook loading, course rows and program inference.
mod courses;
mod program;
mod table;

use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use tracing::{debug, info};

use crate::error::{MallaError, Result};
use crate::types::Program;

// Re-export all public functions
pub use courses::{REQUIRED_COLUMNS, build_courses, parse_int, parse_level};
pub use program::{
    has_program_columns, infer_from_filename, infer_from_sheet, program_from_sheet,
    programs_from_grouped_sheet,
};
pub use table::{Table, data_to_string, normalize_header};

/// Reads every sheet of an `.xlsx`/`.xls`/`.ods` workbook into tables.
pub fn read_tables(path: &Path) -> Result<Vec<Table>> {
    if !path.exists() {
        return Err(MallaError::NotFound(path.to_path_buf()));
    }
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();
    info!(path = %path.display(), sheets = sheet_names.len(), "opened workbook");

    let mut tables = Vec::with_capacity(sheet_names.len());
    for sheet in sheet_names {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| MallaError::Sheet {
                sheet: sheet.clone(),
                message: e.to_string(),
            })?;
        let table = Table::from_range(&sheet, &range);
        debug!(sheet = %sheet, columns = ?table.headers, rows = table.rows.len(), "read sheet");
        tables.push(table);
    }
    Ok(tables)
}

/// Programs described by a set of sheets.
///
/// When any sheet carries PROGRAM or PROGRAM_CODE columns, only those sheets
/// are used and each is split by program. Otherwise every sheet is one program.
pub fn programs_from_tables(tables: &[Table], workbook: &Path) -> Result<Vec<Program>> {
    let grouped: Vec<&Table> = tables.iter().filter(|t| has_program_columns(t)).collect();
    if !grouped.is_empty() {
        let mut programs = Vec::new();
        for table in grouped {
            programs.extend(programs_from_grouped_sheet(table, workbook)?);
        }
        return Ok(programs);
    }

    tables
        .iter()
        .map(|table| program_from_sheet(table, workbook))
        .collect()
}

/// Reads a workbook and infers its programs.
pub fn read_programs(path: &Path) -> Result<Vec<Program>> {
    let tables = read_tables(path)?;
    programs_from_tables(&tables, path)
}
