//! Error types for the profiling pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfileError>;

/// Errors raised while loading raw bytes into a table.
///
/// The loader is the only stage that can fail; everything downstream is a
/// total function over a well-formed table.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("empty input: no header or data rows")]
    EmptyInput,

    #[error("malformed row {row}: field count differs from header")]
    MalformedRow {
        /// 0-based index of the offending data row (the header is not counted).
        row: usize,
    },

    #[error("unsupported encoding: input is not valid UTF-8")]
    UnsupportedEncoding,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ProfileError {
    /// Stable machine-readable kind name surfaced in error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ProfileError::EmptyInput => "EMPTY_INPUT",
            ProfileError::MalformedRow { .. } => "MALFORMED_ROW",
            ProfileError::UnsupportedEncoding => "UNSUPPORTED_ENCODING",
            ProfileError::Io(_) => "IO",
            ProfileError::Csv(_) => "CSV",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(ProfileError::EmptyInput.kind(), "EMPTY_INPUT");
        assert_eq!(ProfileError::MalformedRow { row: 3 }.kind(), "MALFORMED_ROW");
        assert_eq!(ProfileError::UnsupportedEncoding.kind(), "UNSUPPORTED_ENCODING");
    }

    #[test]
    fn malformed_row_display_carries_index() {
        let err = ProfileError::MalformedRow { row: 7 };
        assert!(err.to_string().contains('7'));
    }
}
