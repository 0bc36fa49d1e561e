use std::fs;
use std::path::{Path, PathBuf};

use mallas::config::Settings;
use mallas::planner::process_workbook;
use mallas::sheet::read_programs;
use mallas::{ColorMode, MallaError};
use rust_xlsxwriter::{Workbook, Worksheet};
use tempfile::TempDir;

const HEADERS: [&str; 7] = ["Level", "ID", "Name", "Credits", "Area", "Pre 1", "Pre 2"];

fn write_rows(sheet: &mut Worksheet, headers: &[&str], rows: &[&[&str]]) {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            let (r, col) = (r as u32 + 1, col as u16);
            if value.is_empty() {
                continue;
            }
            match value.parse::<f64>() {
                Ok(number) => sheet.write_number(r, col, number).unwrap(),
                Err(_) => sheet.write_string(r, col, *value).unwrap(),
            };
        }
    }
}

fn two_program_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("Catalogo - CAT.xlsx");
    let mut workbook = Workbook::new();

    let finance = workbook.add_worksheet();
    finance.set_name("Finanzas - FIN").unwrap();
    write_rows(
        finance,
        &HEADERS,
        &[
            &["I", "FIN101", "Contabilidad", "4", "Finanzas", "", ""],
            &["II", "FIN201", "Costos", "3", "finanzas ", "FIN101", ""],
            &["3", "FIN301", "Mercados", "3", "", "FIN201", "FIN101"],
        ],
    );

    let data = workbook.add_worksheet();
    data.set_name("Ciencia de Datos - CDAT").unwrap();
    write_rows(
        data,
        &HEADERS,
        &[
            &["1", "MAT1", "Cálculo", "4", "Ciencias Básicas", "", ""],
            &["2", "DAT2", "Python", "4", "CDAT", "MAT1", ""],
            &["", "", "fila vacía", "", "", "", ""],
        ],
    );

    workbook.save(&path).unwrap();
    path
}

fn settings(dir: &Path, mode: ColorMode) -> Settings {
    Settings {
        outdir: dir.join("dist"),
        mode,
        ..Settings::default()
    }
}

#[test]
fn reads_one_program_per_sheet() {
    let dir = TempDir::new().unwrap();
    let path = two_program_workbook(dir.path());
    let programs = read_programs(&path).unwrap();

    assert_eq!(programs.len(), 2);
    assert_eq!(programs[0].code, "FIN");
    assert_eq!(programs[0].title, "Finanzas");
    assert_eq!(programs[0].courses[1].credits, 3);
    assert_eq!(programs[0].courses[2].level, 3);
    assert_eq!(programs[0].courses[2].area, "OTRO");
    assert_eq!(programs[0].courses[2].prereq, vec!["FIN201", "FIN101"]);
    assert_eq!(programs[1].code, "CDAT");
    assert_eq!(programs[1].courses.len(), 2);
}

#[test]
fn writes_a_planner_per_program() {
    let dir = TempDir::new().unwrap();
    let path = two_program_workbook(dir.path());
    let settings = settings(dir.path(), ColorMode::Deterministic);

    let outputs = process_workbook(&path, &settings).unwrap();
    assert_eq!(
        outputs,
        vec![settings.outdir.join("FIN.html"), settings.outdir.join("CDAT.html")]
    );

    let finance = fs::read_to_string(&outputs[0]).unwrap();
    assert!(finance.contains("Planificador Interactivo – Finanzas"));
    assert!(finance.contains("--AREA-FINANZAS:"));
    assert!(finance.contains("--AREA-OTRO:"));
    assert!(finance.contains(r#""prereq":["FIN201","FIN101"]"#));

    let data = fs::read_to_string(&outputs[1]).unwrap();
    assert!(data.contains("--AREA-CIENCIAS_B_SICAS:"));
    assert!(data.contains(r#""id":"MAT1""#));
}

#[test]
fn seeded_runs_write_identical_color_tables() {
    let dir = TempDir::new().unwrap();
    let path = two_program_workbook(dir.path());
    let settings = settings(dir.path(), ColorMode::Randomized { seed: Some(123) });

    let root_block = |html: &str| {
        let start = html.find(":root{").unwrap();
        let end = start + html[start..].find('}').unwrap();
        html[start..end].to_string()
    };

    let first = process_workbook(&path, &settings).unwrap();
    let first_vars = root_block(&fs::read_to_string(&first[1]).unwrap());
    let second = process_workbook(&path, &settings).unwrap();
    let second_vars = root_block(&fs::read_to_string(&second[1]).unwrap());
    assert_eq!(first_vars, second_vars);
}

#[test]
fn grouped_workbook_splits_by_program_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todos.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Programas").unwrap();
    write_rows(
        sheet,
        &["Program", "Program_Code", "Level", "ID", "Name", "Credits", "Area"],
        &[
            &["Economía", "ECON", "1", "E1", "Micro", "3", "ECON"],
            &["Ciencia de Datos", "CDAT", "1", "D1", "Python", "4", "CDAT"],
            &["Economía", "ECON", "2", "E2", "Macro", "3", "ECON"],
        ],
    );
    let notes = workbook.add_worksheet();
    notes.set_name("Notas").unwrap();
    notes.write_string(0, 0, "sin columnas de cursos").unwrap();
    workbook.save(&path).unwrap();

    let settings = settings(dir.path(), ColorMode::Deterministic);
    let outputs = process_workbook(&path, &settings).unwrap();
    assert_eq!(
        outputs,
        vec![settings.outdir.join("CDAT.html"), settings.outdir.join("ECON.html")]
    );
    let econ = fs::read_to_string(&outputs[1]).unwrap();
    assert!(econ.contains("Planificador Interactivo – Economía"));
    assert!(econ.contains(r#""id":"E2""#));
}

#[test]
fn sheet_without_required_columns_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("malo.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_rows(sheet, &["Level", "ID", "Name"], &[&["1", "A", "Curso"]]);
    workbook.save(&path).unwrap();

    match read_programs(&path) {
        Err(MallaError::MissingColumns { missing, .. }) => {
            assert_eq!(missing, vec!["CREDITS", "AREA"]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
