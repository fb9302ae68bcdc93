//! Load error types.
//!
//! Every failure here is fatal: the CLI reports it and exits before any
//! question is shown.

use thiserror::Error;

/// Errors that can occur while loading question records.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or read.
    #[error("failed to read questions: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the input.
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A row did not contain both a question and an answer.
    #[error("malformed row on line {line}: expected 2 fields, found {fields}")]
    MalformedRow { line: u64, fields: usize },
}

impl LoadError {
    /// Returns the 1-based source line the error points at, if any.
    pub fn line(&self) -> Option<u64> {
        match self {
            LoadError::MalformedRow { line, .. } => Some(*line),
            LoadError::Csv(e) => e.position().map(|p| p.line()),
            LoadError::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_message() {
        let err = LoadError::MalformedRow { line: 3, fields: 1 };
        assert_eq!(
            err.to_string(),
            "malformed row on line 3: expected 2 fields, found 1"
        );
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn io_error_has_no_line() {
        let err = LoadError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(err.to_string().contains("missing"));
        assert_eq!(err.line(), None);
    }
}
