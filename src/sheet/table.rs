/// A worksheet flattened to trimmed strings under normalized headers.
use calamine::{Data, Range};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub sheet: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from raw header and row strings; headers are normalized.
    pub fn new(sheet: impl Into<String>, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            sheet: sheet.into(),
            headers,
            rows,
        }
    }

    /// The first row of the range is the header row.
    pub fn from_range(sheet: &str, range: &Range<Data>) -> Self {
        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(first) => first.iter().map(data_to_string).collect(),
            None => return Self::new(sheet, &[], Vec::new()),
        };
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
        let body = rows
            .map(|row| row.iter().map(data_to_string).collect())
            .collect();
        Self::new(sheet, &header_refs, body)
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Cell at `(row, col)`, empty when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// First cell of column `name`, trimmed.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        let col = self.column(name)?;
        Some(self.cell(0, col).trim())
    }

    /// A table with the same headers and only the given rows.
    pub fn subset(&self, row_indices: &[usize]) -> Self {
        Self {
            sheet: self.sheet.clone(),
            headers: self.headers.clone(),
            rows: row_indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }
}

/// Trim, uppercase and drop every whitespace character.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Render a cell the way it reads in the spreadsheet.
pub fn data_to_string(data: &Data) -> String {
    match data {
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", *f as i64)
        }
        Data::Float(f) => f.to_string(),
        Data::String(s) => s.trim().to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{dt:?}"),
        Data::DateTimeIso(dt) => dt.to_string(),
        Data::DurationIso(d) => d.to_string(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}
