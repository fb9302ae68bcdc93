//! CSV question file loader.
//!
//! Each row is `question,answer` with no header. Answers are trimmed on load;
//! questions are kept verbatim. Extra fields are ignored, short rows are fatal.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::LoadError;
use crate::model::QuestionRecord;

/// Parse question records from any reader.
pub fn parse_questions<R: Read>(reader: R) -> Result<Vec<QuestionRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 1);
        match (row.get(0), row.get(1)) {
            (Some(question), Some(answer)) => {
                records.push(QuestionRecord::new(question, answer));
            }
            _ => {
                return Err(LoadError::MalformedRow {
                    line,
                    fields: row.len(),
                })
            }
        }
    }

    tracing::debug!("parsed {} question(s)", records.len());
    Ok(records)
}

/// Parse question records from a string (useful for testing).
pub fn parse_questions_str(content: &str) -> Result<Vec<QuestionRecord>, LoadError> {
    parse_questions(content.as_bytes())
}

/// Read and parse a question file. The file is closed before this returns.
pub fn load_questions(path: &Path) -> Result<Vec<QuestionRecord>> {
    let file = std::fs::File::open(path)
        .map_err(LoadError::from)
        .with_context(|| format!("failed to open question file: {}", path.display()))?;

    parse_questions(file)
        .with_context(|| format!("failed to load questions from {}", path.display()))
}

/// A non-fatal issue found in a loaded question list.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number.
    pub number: usize,
    pub message: String,
}

/// Check loaded questions for entries that are probably mistakes.
pub fn validate_questions(records: &[QuestionRecord]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for (idx, record) in records.iter().enumerate() {
        let number = idx + 1;
        if record.question.trim().is_empty() {
            warnings.push(ValidationWarning {
                number,
                message: "question is empty".into(),
            });
        }
        if record.answer.is_empty() {
            warnings.push(ValidationWarning {
                number,
                message: "answer is empty".into(),
            });
        }
        if !seen.insert(record.question.as_str()) {
            warnings.push(ValidationWarning {
                number,
                message: format!("duplicate question: {}", record.question),
            });
        }
    }

    warnings
}
