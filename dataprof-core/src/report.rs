//! Profile report assembly

use crate::cleaner::CleaningReport;
use crate::errors::ProfileError;
use crate::schema::ColumnSchema;
use crate::summary::ColumnSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: String,
    pub detail: String,
}

/// The two summary groups. Boolean and datetime columns report under the
/// categorical group alongside text columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    #[serde(rename = "Categorical Columns")]
    pub categorical: BTreeMap<String, ColumnSummary>,
    #[serde(rename = "Numerical Columns")]
    pub numerical: BTreeMap<String, ColumnSummary>,
}

/// The profile of one uploaded dataset. Immutable once assembled; the
/// engine never stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub filename: String,
    pub status: ProfileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ProfileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<CleaningReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl ProfileReport {
    /// Assemble a success report, grouping summaries by column kind.
    /// Pure assembly; no computation happens here.
    pub fn success(
        filename: &str,
        schemas: &[ColumnSchema],
        summaries: Vec<ColumnSummary>,
        cleaning: CleaningReport,
    ) -> Self {
        let mut categorical = BTreeMap::new();
        let mut numerical = BTreeMap::new();
        for (schema, summary) in schemas.iter().zip(summaries) {
            if schema.kind.is_numerical() {
                numerical.insert(schema.name.clone(), summary);
            } else {
                categorical.insert(schema.name.clone(), summary);
            }
        }

        Self {
            filename: filename.to_string(),
            status: ProfileStatus::Success,
            summary: Some(ProfileSummary {
                categorical,
                numerical,
            }),
            cleaning: Some(cleaning),
            error: None,
        }
    }

    /// Assemble an error report. No partial summary is ever attached.
    pub fn failure(filename: &str, error: &ProfileError) -> Self {
        Self {
            filename: filename.to_string(),
            status: ProfileStatus::Error,
            summary: None,
            cleaning: None,
            error: Some(ErrorInfo {
                kind: error.kind().to_string(),
                detail: error.to_string(),
            }),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnKind, ColumnSchema};
    use crate::summary::{CategoricalSummary, NumericalSummary};

    fn schema(name: &str, kind: ColumnKind) -> ColumnSchema {
        ColumnSchema {
            name: name.to_string(),
            kind,
            confidence: 1.0,
            date_format: None,
        }
    }

    fn numerical_summary() -> ColumnSummary {
        ColumnSummary::Numerical(NumericalSummary {
            count: 3,
            missing: 0,
            mean: 2.0,
            std_dev: 1.0,
            min: 1.0,
            p25: 1.5,
            median: 2.0,
            p75: 2.5,
            max: 3.0,
        })
    }

    fn categorical_summary() -> ColumnSummary {
        ColumnSummary::Categorical(CategoricalSummary {
            count: 3,
            missing: 0,
            distinct: 2,
            most_frequent: "a".to_string(),
            frequency: 2,
        })
    }

    fn empty_cleaning() -> CleaningReport {
        CleaningReport {
            columns: BTreeMap::new(),
            duplicates_removed: 0,
            rows_before: 3,
            rows_after: 3,
        }
    }

    #[test]
    fn groups_columns_by_kind() {
        let schemas = vec![
            schema("age", ColumnKind::Numerical),
            schema("city", ColumnKind::Categorical),
            schema("active", ColumnKind::Boolean),
            schema("joined", ColumnKind::Datetime),
        ];
        let summaries = vec![
            numerical_summary(),
            categorical_summary(),
            categorical_summary(),
            categorical_summary(),
        ];
        let report = ProfileReport::success("test.csv", &schemas, summaries, empty_cleaning());

        let summary = report.summary.unwrap();
        assert!(summary.numerical.contains_key("age"));
        assert!(summary.categorical.contains_key("city"));
        assert!(summary.categorical.contains_key("active"));
        assert!(summary.categorical.contains_key("joined"));
    }

    #[test]
    fn success_report_serializes_group_names() {
        let schemas = vec![schema("n", ColumnKind::Numerical)];
        let report =
            ProfileReport::success("data.csv", &schemas, vec![numerical_summary()], empty_cleaning());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"Numerical Columns\""));
        assert!(json.contains("\"Categorical Columns\""));
        assert!(json.contains("\"status\":\"success\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn failure_report_has_no_summary() {
        let report = ProfileReport::failure("bad.csv", &ProfileError::MalformedRow { row: 0 });
        assert_eq!(report.status, ProfileStatus::Error);
        assert!(report.summary.is_none());
        let error = report.error.as_ref().unwrap();
        assert_eq!(error.kind, "MALFORMED_ROW");

        let json = report.to_json().unwrap();
        assert!(!json.contains("\"summary\""));
        assert!(json.contains("\"status\":\"error\""));
    }

    #[test]
    fn report_round_trips_through_json() {
        let schemas = vec![
            schema("n", ColumnKind::Numerical),
            schema("c", ColumnKind::Categorical),
        ];
        let report = ProfileReport::success(
            "roundtrip.csv",
            &schemas,
            vec![numerical_summary(), categorical_summary()],
            empty_cleaning(),
        );
        let json = report.to_json().unwrap();
        let back: ProfileReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
