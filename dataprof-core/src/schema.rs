//! Column type inference

use crate::loader::Table;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kinds a column can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numerical,
    Categorical,
    Boolean,
    Datetime,
}

impl ColumnKind {
    /// Whether columns of this kind summarize distributionally. Boolean and
    /// datetime columns carry frequency statistics and group with the
    /// categorical columns in reports.
    pub fn is_numerical(&self) -> bool {
        matches!(self, ColumnKind::Numerical)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numerical => write!(f, "NUMERICAL"),
            ColumnKind::Categorical => write!(f, "CATEGORICAL"),
            ColumnKind::Boolean => write!(f, "BOOLEAN"),
            ColumnKind::Datetime => write!(f, "DATETIME"),
        }
    }
}

/// The inferred type of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub kind: ColumnKind,
    /// Fraction of non-null values matching the kind; 0.0 for a column
    /// with no non-null values at all.
    pub confidence: f64,
    /// The chrono format string a datetime column's values follow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

/// Recognized date shapes: a cheap regex prefilter gating a strict chrono
/// parse, so `2024-13-45` never counts as a date.
static DATE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), "%Y-%m-%d"),
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(), "%m/%d/%Y"),
        (Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").unwrap(), "%d-%m-%Y"),
    ]
});

pub(crate) fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, format).ok()
}

pub(crate) fn is_boolean_token(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "0" | "1"
    )
}

pub(crate) fn parse_numeric(value: &str) -> Option<f64> {
    value.parse::<f64>().ok()
}

/// Classifies each column of a raw table by inspecting its values.
///
/// The check order is fixed: numeric first (a column of small integers
/// would otherwise be miscast as boolean), boolean before datetime and
/// categorical (boolean tokens are the stricter, smaller domain), then
/// datetime, with categorical as the catch-all.
pub struct SchemaInferrer {
    numeric_threshold: f64,
    datetime_threshold: f64,
}

impl SchemaInferrer {
    pub fn new(numeric_threshold: f64, datetime_threshold: f64) -> Self {
        Self {
            numeric_threshold,
            datetime_threshold,
        }
    }

    /// Infer one [`ColumnSchema`] per column, in column order.
    pub fn infer(&self, table: &Table) -> Vec<ColumnSchema> {
        table
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<&str> = table
                    .column_values(idx)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .collect();
                let schema = self.infer_column(name, &values);
                tracing::debug!(
                    column = %schema.name,
                    kind = %schema.kind,
                    confidence = schema.confidence,
                    "column classified"
                );
                schema
            })
            .collect()
    }

    fn infer_column(&self, name: &str, values: &[&str]) -> ColumnSchema {
        if values.is_empty() {
            // Degenerate all-null column: flagged by confidence 0, not fatal.
            return ColumnSchema {
                name: name.to_string(),
                kind: ColumnKind::Categorical,
                confidence: 0.0,
                date_format: None,
            };
        }

        let total = values.len() as f64;

        let numeric_matches = values.iter().filter(|v| parse_numeric(v).is_some()).count();
        let numeric_fraction = numeric_matches as f64 / total;
        if numeric_fraction >= self.numeric_threshold {
            return ColumnSchema {
                name: name.to_string(),
                kind: ColumnKind::Numerical,
                confidence: numeric_fraction,
                date_format: None,
            };
        }

        if values.iter().all(|v| is_boolean_token(v)) {
            return ColumnSchema {
                name: name.to_string(),
                kind: ColumnKind::Boolean,
                confidence: 1.0,
                date_format: None,
            };
        }

        // One pattern must carry the column on its own; mixed date shapes
        // stay categorical.
        if let Some((format, fraction)) = self.best_date_pattern(values) {
            if fraction >= self.datetime_threshold {
                return ColumnSchema {
                    name: name.to_string(),
                    kind: ColumnKind::Datetime,
                    confidence: fraction,
                    date_format: Some(format.to_string()),
                };
            }
        }

        ColumnSchema {
            name: name.to_string(),
            kind: ColumnKind::Categorical,
            confidence: 1.0,
            date_format: None,
        }
    }

    fn best_date_pattern(&self, values: &[&str]) -> Option<(&'static str, f64)> {
        DATE_PATTERNS
            .iter()
            .map(|(regex, format)| {
                let matches = values
                    .iter()
                    .filter(|v| regex.is_match(v) && parse_date(v, format).is_some())
                    .count();
                (*format, matches as f64 / values.len() as f64)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}
