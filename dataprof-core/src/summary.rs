//! Per-column summary statistics

use crate::cleaner::{CellValue, CleanedTable};
use crate::schema::ColumnSchema;
use crate::stats;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use crate::stats::PercentileMethod;

/// Statistics for one column, discriminated by the column's kind.
/// Boolean and datetime columns summarize categorically: their native
/// statistics are frequency-based, not distributional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSummary {
    Numerical(NumericalSummary),
    Categorical(CategoricalSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericalSummary {
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub missing: usize,
    pub distinct: usize,
    pub most_frequent: String,
    pub frequency: usize,
}

/// Computes per-column statistics over a cleaned table.
///
/// Pure function of its inputs. `missing` counts null cells in the table
/// it is given (zero after the cleaner by the null-free invariant); the
/// pre-cleaning null diagnostics live in the cleaning report.
pub struct Summarizer {
    percentiles: PercentileMethod,
}

impl Summarizer {
    pub fn new(percentiles: PercentileMethod) -> Self {
        Self { percentiles }
    }

    /// One [`ColumnSummary`] per column, in column order.
    pub fn summarize(&self, table: &CleanedTable, schemas: &[ColumnSchema]) -> Vec<ColumnSummary> {
        schemas
            .iter()
            .enumerate()
            .map(|(idx, schema)| {
                if schema.kind.is_numerical() {
                    ColumnSummary::Numerical(self.summarize_numerical(table, idx))
                } else {
                    ColumnSummary::Categorical(summarize_categorical(table, idx))
                }
            })
            .collect()
    }

    fn summarize_numerical(&self, table: &CleanedTable, idx: usize) -> NumericalSummary {
        let mut values = Vec::with_capacity(table.row_count());
        let mut missing = 0;
        for cell in table.column_values(idx) {
            match cell.as_number() {
                Some(n) => values.push(n),
                None => missing += 1,
            }
        }

        NumericalSummary {
            count: values.len(),
            missing,
            mean: stats::mean(&values),
            std_dev: stats::sample_std_dev(&values),
            min: stats::min(&values),
            p25: stats::percentile(&values, 0.25, self.percentiles),
            median: stats::percentile(&values, 0.5, self.percentiles),
            p75: stats::percentile(&values, 0.75, self.percentiles),
            max: stats::max(&values),
        }
    }
}

fn summarize_categorical(table: &CleanedTable, idx: usize) -> CategoricalSummary {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut missing = 0;
    let mut count = 0;
    for (position, cell) in table.column_values(idx).enumerate() {
        if matches!(cell, CellValue::Null) {
            missing += 1;
            continue;
        }
        count += 1;
        let entry = counts.entry(cell.to_string()).or_insert((0, position));
        entry.0 += 1;
    }

    let distinct = counts.len();
    // Most frequent value; ties broken by first appearance in the table.
    let (most_frequent, frequency) = counts
        .into_iter()
        .max_by(|a, b| (a.1 .0).cmp(&b.1 .0).then((b.1 .1).cmp(&a.1 .1)))
        .map(|(value, (freq, _))| (value, freq))
        .unwrap_or_default();

    CategoricalSummary {
        count,
        missing,
        distinct,
        most_frequent,
        frequency,
    }
}
