//! Table loading from raw delimited text

use crate::errors::{ProfileError, Result};

/// An in-memory table of raw text cells.
///
/// Column names are unique and ordered; every row holds exactly one cell
/// per column, and column order is positional and stable across all
/// pipeline stages. No type coercion happens here; cells stay exactly as
/// they appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from pre-validated parts. Callers must guarantee one
    /// cell per declared column in every row.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate the raw cells of one column, top to bottom.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[idx].as_str())
    }
}

/// Parse raw bytes into a [`Table`].
///
/// The first record is the header. A data row whose field count disagrees
/// with the header fails the whole load; no partial tables reach the
/// downstream stages. Header-only and zero-byte inputs are rejected as
/// empty.
pub fn load_table(bytes: &[u8]) -> Result<Table> {
    let text = decode_utf8(bytes)?;
    if text.trim().is_empty() {
        return Err(ProfileError::EmptyInput);
    }

    // Flexible mode so the loader owns field-count validation and can
    // report the offending row index itself.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = dedupe_columns(reader.headers()?.iter().map(str::to_string).collect());

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != columns.len() {
            return Err(ProfileError::MalformedRow { row: idx });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        return Err(ProfileError::EmptyInput);
    }

    tracing::debug!(
        columns = columns.len(),
        rows = rows.len(),
        "table loaded"
    );

    Ok(Table::new(columns, rows))
}

fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(bytes).map_err(|_| ProfileError::UnsupportedEncoding)?;
    // Tolerate a UTF-8 BOM from spreadsheet exports.
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Column names must be unique. Repeated headers get a positional suffix,
/// the same mangling spreadsheet tools apply on import.
fn dedupe_columns(raw: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashMap::new();
    raw.into_iter()
        .map(|name| match seen.entry(name.clone()) {
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(0usize);
                name
            }
            std::collections::hash_map::Entry::Occupied(mut e) => {
                *e.get_mut() += 1;
                format!("{}.{}", name, e.get())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_simple_csv() {
        let table = load_table(b"a,b\n1,x\n2,y\n").unwrap();
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0], vec!["1", "x"]);
    }

    #[test]
    fn keeps_cells_as_raw_text() {
        let table = load_table(b"n\n007\n").unwrap();
        assert_eq!(table.rows()[0][0], "007");
    }

    #[test]
    fn preserves_column_order() {
        let table = load_table(b"z,a,m\n1,2,3\n").unwrap();
        assert_eq!(table.columns(), ["z", "a", "m"]);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(load_table(b""), Err(ProfileError::EmptyInput)));
    }

    #[test]
    fn rejects_header_only_input() {
        assert!(matches!(load_table(b"a,b,c\n"), Err(ProfileError::EmptyInput)));
    }

    #[test]
    fn rejects_whitespace_only_input() {
        assert!(matches!(load_table(b"  \n \n"), Err(ProfileError::EmptyInput)));
    }

    #[test]
    fn rejects_short_row_with_index() {
        let err = load_table(b"a,b\n1,x\n2\n").unwrap_err();
        assert!(matches!(err, ProfileError::MalformedRow { row: 1 }));
    }

    #[test]
    fn rejects_long_row() {
        let err = load_table(b"a,b\n1,x,extra\n").unwrap_err();
        assert!(matches!(err, ProfileError::MalformedRow { row: 0 }));
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(matches!(
            load_table(&[0xff, 0xfe, 0x41]),
            Err(ProfileError::UnsupportedEncoding)
        ));
    }

    #[test]
    fn strips_utf8_bom() {
        let table = load_table("\u{feff}a,b\n1,2\n".as_bytes()).unwrap();
        assert_eq!(table.columns()[0], "a");
    }

    #[test]
    fn handles_quoted_cells() {
        let table = load_table(b"a,b\n\"1,5\",x\n").unwrap();
        assert_eq!(table.rows()[0][0], "1,5");
    }

    #[test]
    fn suffixes_duplicate_headers() {
        let table = load_table(b"a,a,a\n1,2,3\n").unwrap();
        assert_eq!(table.columns(), ["a", "a.1", "a.2"]);
    }

    #[test]
    fn column_values_iterates_in_row_order() {
        let table = load_table(b"a,b\n1,x\n2,y\n3,z\n").unwrap();
        let vals: Vec<&str> = table.column_values(1).collect();
        assert_eq!(vals, ["x", "y", "z"]);
    }
}
