//! DataProf: dataset profiling and cleaning engine
//!
//! Accepts the raw bytes of a delimited text file plus its filename and
//! produces a structured profile: inferred column types, null/duplicate
//! diagnostics, and per-column summary statistics split into categorical
//! and numerical groups. The pipeline is a synchronous call chain
//! (loader, schema inferrer, cleaner, summarizer, reporter) with no
//! shared state across invocations; concurrent calls need no locking.

pub mod cleaner;
pub mod errors;
pub mod loader;
pub mod report;
pub mod schema;
pub mod stats;
pub mod summary;

// Re-exports
pub use cleaner::{
    AppliedStrategy, CellValue, CleanedTable, Cleaner, CleaningReport, ColumnCleaning,
    ImputationStrategy,
};
pub use errors::{ProfileError, Result};
pub use loader::{load_table, Table};
pub use report::{ErrorInfo, ProfileReport, ProfileStatus, ProfileSummary};
pub use schema::{ColumnKind, ColumnSchema, SchemaInferrer};
pub use summary::{
    CategoricalSummary, ColumnSummary, NumericalSummary, PercentileMethod, Summarizer,
};

use tracing::{info, warn};

/// Behavioral knobs for the pipeline.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Fraction of non-null values that must parse numerically for a
    /// column to classify as numerical. Default 0.95.
    pub numeric_threshold: f64,
    /// Fraction of non-null values that must match one date pattern for
    /// a column to classify as datetime. Default 0.90.
    pub datetime_threshold: f64,
    /// Null replacement strategy for numerical columns. Default median.
    pub imputation: ImputationStrategy,
    /// Whether to drop exact duplicate rows after imputation. Default on.
    pub deduplicate: bool,
    /// Percentile computation method. Default linear interpolation.
    pub percentiles: PercentileMethod,
    /// Replacement for entirely-null non-numerical columns.
    /// Default `"Unknown"`.
    pub placeholder: String,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            numeric_threshold: 0.95,
            datetime_threshold: 0.90,
            imputation: ImputationStrategy::Median,
            deduplicate: true,
            percentiles: PercentileMethod::Linear,
            placeholder: "Unknown".to_string(),
        }
    }
}

/// Main profiling interface: owns a configuration and runs the full
/// pipeline per call. Stateless across calls.
pub struct DataProfiler {
    config: ProfilerConfig,
}

impl DataProfiler {
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Profile one dataset. Never panics and never returns `Err`: loader
    /// failures fold into an error-status report, which is the caller's
    /// contract either way.
    pub fn profile(&self, filename: &str, bytes: &[u8]) -> ProfileReport {
        match self.run(bytes) {
            Ok((schemas, summaries, cleaning)) => {
                info!(
                    filename,
                    columns = schemas.len(),
                    rows = cleaning.rows_after,
                    duplicates_removed = cleaning.duplicates_removed,
                    "profile complete"
                );
                ProfileReport::success(filename, &schemas, summaries, cleaning)
            }
            Err(e) => {
                warn!(filename, kind = e.kind(), "profile failed: {e}");
                ProfileReport::failure(filename, &e)
            }
        }
    }

    /// Run the stages, surfacing the loader error if any. Exposed for
    /// callers that want intermediate results instead of a report.
    pub fn run(
        &self,
        bytes: &[u8],
    ) -> Result<(Vec<ColumnSchema>, Vec<ColumnSummary>, CleaningReport)> {
        let table = load_table(bytes)?;
        let schemas = self.infer_schema(&table);
        let (cleaned, cleaning) = self.clean(&table, &schemas);
        let summaries = self.summarize(&cleaned, &schemas);
        Ok((schemas, summaries, cleaning))
    }

    pub fn infer_schema(&self, table: &Table) -> Vec<ColumnSchema> {
        SchemaInferrer::new(self.config.numeric_threshold, self.config.datetime_threshold)
            .infer(table)
    }

    pub fn clean(&self, table: &Table, schemas: &[ColumnSchema]) -> (CleanedTable, CleaningReport) {
        Cleaner::new(
            self.config.imputation,
            self.config.deduplicate,
            self.config.placeholder.clone(),
        )
        .clean(table, schemas)
    }

    pub fn summarize(&self, table: &CleanedTable, schemas: &[ColumnSchema]) -> Vec<ColumnSummary> {
        Summarizer::new(self.config.percentiles).summarize(table, schemas)
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }
}

impl Default for DataProfiler {
    fn default() -> Self {
        Self::new(ProfilerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_documented_values() {
        let config = ProfilerConfig::default();
        assert_eq!(config.numeric_threshold, 0.95);
        assert_eq!(config.datetime_threshold, 0.90);
        assert_eq!(config.imputation, ImputationStrategy::Median);
        assert!(config.deduplicate);
        assert_eq!(config.percentiles, PercentileMethod::Linear);
        assert_eq!(config.placeholder, "Unknown");
    }

    #[test]
    fn profile_success_end_to_end() {
        let profiler = DataProfiler::default();
        let report = profiler.profile("demo.csv", b"age,city\n30,Lagos\n41,Osaka\n30,Lagos\n");
        assert_eq!(report.status, ProfileStatus::Success);
        assert_eq!(report.filename, "demo.csv");

        let summary = report.summary.unwrap();
        assert!(summary.numerical.contains_key("age"));
        assert!(summary.categorical.contains_key("city"));
        assert_eq!(report.cleaning.unwrap().duplicates_removed, 1);
    }

    #[test]
    fn profile_error_end_to_end() {
        let profiler = DataProfiler::default();
        let report = profiler.profile("bad.csv", b"a,b\n1\n");
        assert_eq!(report.status, ProfileStatus::Error);
        assert!(report.summary.is_none());
        assert_eq!(report.error.unwrap().kind, "MALFORMED_ROW");
    }
}
