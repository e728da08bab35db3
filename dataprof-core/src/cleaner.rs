//! Null handling, imputation, and duplicate removal

use crate::loader::Table;
use crate::schema::{self, ColumnKind, ColumnSchema};
use crate::stats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// A typed cell value. Produced only after schema inference has decided
/// each column's kind; the loader's output stays raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Null => Ok(()),
        }
    }
}

/// Strategy for filling nulls in numerical columns.
///
/// Non-numerical columns always impute the mode; the all-null fallbacks
/// (0 for numerical, the configured placeholder otherwise) apply
/// regardless of strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationStrategy {
    Median,
    Mean,
    Constant(f64),
}

/// What the cleaner actually did to a column, recorded per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedStrategy {
    /// Column had no nulls; nothing to impute.
    None,
    Median,
    Mean,
    Constant,
    Mode,
    /// Numerical column was entirely null; imputed 0.
    ZeroFallback,
    /// Non-numerical column was entirely null; imputed the placeholder.
    PlaceholderFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCleaning {
    pub nulls_found: usize,
    pub nulls_imputed: usize,
    pub strategy: AppliedStrategy,
}

/// Change log of one cleaning pass. Consumed by the profile reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub columns: BTreeMap<String, ColumnCleaning>,
    pub duplicates_removed: usize,
    pub rows_before: usize,
    pub rows_after: usize,
}

/// A table of typed cells. Null-free once the cleaner has run.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl CleanedTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().map(move |row| &row[idx])
    }
}

/// Applies the null-handling and duplicate-removal policy.
///
/// Total over well-formed tables: every branch has a defined fallback, so
/// cleaning cannot fail. The order is fixed (impute first, then
/// deduplicate) so rows that differed only in originally-missing values
/// merge once those values are imputed identically.
pub struct Cleaner {
    imputation: ImputationStrategy,
    deduplicate: bool,
    placeholder: String,
}

impl Cleaner {
    pub fn new(imputation: ImputationStrategy, deduplicate: bool, placeholder: String) -> Self {
        Self {
            imputation,
            deduplicate,
            placeholder,
        }
    }

    pub fn clean(&self, table: &Table, schemas: &[ColumnSchema]) -> (CleanedTable, CleaningReport) {
        let rows_before = table.row_count();

        let mut rows: Vec<Vec<CellValue>> = table
            .rows()
            .iter()
            .map(|raw| {
                raw.iter()
                    .zip(schemas)
                    .map(|(cell, schema)| type_cell(cell, schema))
                    .collect()
            })
            .collect();

        let mut columns = BTreeMap::new();
        for (idx, schema) in schemas.iter().enumerate() {
            let nulls_found = rows.iter().filter(|row| row[idx].is_null()).count();
            let strategy = if nulls_found == 0 {
                AppliedStrategy::None
            } else {
                let (replacement, strategy) = self.replacement_for(&rows, idx, schema);
                tracing::debug!(
                    column = %schema.name,
                    nulls = nulls_found,
                    strategy = ?strategy,
                    "imputing nulls"
                );
                for row in &mut rows {
                    if row[idx].is_null() {
                        row[idx] = replacement.clone();
                    }
                }
                strategy
            };
            columns.insert(
                schema.name.clone(),
                ColumnCleaning {
                    nulls_found,
                    nulls_imputed: nulls_found,
                    strategy,
                },
            );
        }

        let mut duplicates_removed = 0;
        if self.deduplicate {
            let mut seen = HashSet::with_capacity(rows.len());
            rows.retain(|row| {
                if seen.insert(row_key(row)) {
                    true
                } else {
                    duplicates_removed += 1;
                    false
                }
            });
        }

        let report = CleaningReport {
            columns,
            duplicates_removed,
            rows_before,
            rows_after: rows.len(),
        };

        let cleaned = CleanedTable {
            columns: table.columns().to_vec(),
            rows,
        };

        (cleaned, report)
    }

    fn replacement_for(
        &self,
        rows: &[Vec<CellValue>],
        idx: usize,
        schema: &ColumnSchema,
    ) -> (CellValue, AppliedStrategy) {
        if schema.kind == ColumnKind::Numerical {
            let values: Vec<f64> = rows.iter().filter_map(|row| row[idx].as_number()).collect();
            if values.is_empty() {
                return (CellValue::Number(0.0), AppliedStrategy::ZeroFallback);
            }
            return match self.imputation {
                ImputationStrategy::Median => {
                    (CellValue::Number(stats::median(&values)), AppliedStrategy::Median)
                }
                ImputationStrategy::Mean => {
                    (CellValue::Number(stats::mean(&values)), AppliedStrategy::Mean)
                }
                ImputationStrategy::Constant(v) => {
                    (CellValue::Number(v), AppliedStrategy::Constant)
                }
            };
        }

        match mode_value(rows.iter().map(|row| &row[idx])) {
            Some(value) => (value, AppliedStrategy::Mode),
            None => (
                CellValue::Text(self.placeholder.clone()),
                AppliedStrategy::PlaceholderFallback,
            ),
        }
    }
}

/// Most frequent non-null value; ties broken by first occurrence.
fn mode_value<'a>(cells: impl Iterator<Item = &'a CellValue>) -> Option<CellValue> {
    let mut counts: HashMap<String, (usize, usize, &'a CellValue)> = HashMap::new();
    for (position, cell) in cells.enumerate() {
        if cell.is_null() {
            continue;
        }
        let entry = counts
            .entry(cell.to_string())
            .or_insert((0, position, cell));
        entry.0 += 1;
    }
    counts
        .into_values()
        .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(_, _, cell)| cell.clone())
}

/// Type one raw cell under its column's kind. A cell is null if empty,
/// whitespace-only, or unparseable under the kind (malformed numeric
/// noise, and the analogous rule for boolean/datetime columns).
fn type_cell(raw: &str, schema: &ColumnSchema) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    match schema.kind {
        ColumnKind::Numerical => schema::parse_numeric(trimmed)
            .map(CellValue::Number)
            .unwrap_or(CellValue::Null),
        ColumnKind::Boolean => parse_bool(trimmed)
            .map(CellValue::Bool)
            .unwrap_or(CellValue::Null),
        ColumnKind::Datetime => schema
            .date_format
            .as_deref()
            .and_then(|format| schema::parse_date(trimmed, format))
            .map(CellValue::Date)
            .unwrap_or(CellValue::Null),
        ColumnKind::Categorical => CellValue::Text(trimmed.to_string()),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Hash key for exact row comparison. Numbers key on their bit pattern so
/// float equality is exact rather than textual.
fn row_key(row: &[CellValue]) -> String {
    use std::fmt::Write;

    let mut key = String::new();
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            key.push('\x1f');
        }
        match cell {
            CellValue::Number(n) => {
                let _ = write!(key, "{}", n.to_bits());
            }
            CellValue::Text(s) => key.push_str(s),
            CellValue::Bool(b) => key.push(if *b { 'T' } else { 'F' }),
            CellValue::Date(d) => {
                let _ = write!(key, "{}", d);
            }
            CellValue::Null => key.push_str("\x00NULL"),
        }
    }
    key
}
