//! Exam report types and the JSON run summary.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{AnsweredQuestion, ExamOutcome, ExamSession};

/// Final score of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExamReport {
    /// Questions answered correctly.
    pub correct: usize,
    /// Questions in the exam, answered or not.
    pub total: usize,
    /// `correct / total * 100`, rounded to 2 decimals.
    pub percentage: f64,
}

impl fmt::Display for ExamReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You answered {} of {} correctly. Score: {:.2}%",
            self.correct, self.total, self.percentage
        )
    }
}

/// Machine-readable description of one finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique run identifier.
    pub id: Uuid,
    /// When the session concluded.
    pub finished_at: DateTime<Utc>,
    /// Where the questions came from.
    pub source: String,
    pub outcome: ExamOutcome,
    pub report: ExamReport,
    /// Wall-clock time spent answering, in milliseconds.
    pub elapsed_ms: u64,
    /// Configured limit in seconds; `None` when there was no limit.
    pub time_limit_secs: Option<u64>,
    /// Every question with the response it received.
    pub questions: Vec<AnsweredQuestion>,
}

impl RunSummary {
    /// Build a summary from a finished session and its report.
    ///
    /// Returns `None` if the session has not reached a terminal state.
    pub fn new(source: impl Into<String>, session: &ExamSession, report: ExamReport) -> Option<Self> {
        let outcome = session.state().outcome()?;
        Some(Self {
            id: Uuid::new_v4(),
            finished_at: Utc::now(),
            source: source.into(),
            outcome,
            report,
            elapsed_ms: session.elapsed().as_millis() as u64,
            time_limit_secs: session.time_limit().duration().map(|d| d.as_secs()),
            questions: session.questions().to_vec(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize run summary")
    }

    /// Write the summary as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write run summary to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionRecord, TimeLimit};
    use crate::scoring::score;

    #[test]
    fn report_line() {
        let report = ExamReport {
            correct: 1,
            total: 2,
            percentage: 50.0,
        };
        assert_eq!(
            report.to_string(),
            "You answered 1 of 2 correctly. Score: 50.00%"
        );
    }

    #[test]
    fn summary_requires_terminal_session() {
        let mut session = ExamSession::new(
            vec![QuestionRecord::new("2+2", "4")],
            TimeLimit::from_secs(10),
        );
        session.start();
        session.record_answer(0, "4");
        let report = score(&session);
        assert!(RunSummary::new("problems.csv", &session, report).is_none());

        session.finish(ExamOutcome::Completed);
        let summary = RunSummary::new("problems.csv", &session, report).unwrap();
        assert_eq!(summary.outcome, ExamOutcome::Completed);
        assert_eq!(summary.time_limit_secs, Some(10));
        assert_eq!(summary.questions.len(), 1);
    }

    #[test]
    fn summary_json_shape() {
        let mut session = ExamSession::new(
            vec![QuestionRecord::new("2+2", "4"), QuestionRecord::new("3+3", "6")],
            TimeLimit::Disabled,
        );
        session.start();
        session.record_answer(0, "4");
        session.finish(ExamOutcome::TimedOut);
        let summary = RunSummary::new("quiz.csv", &session, score(&session)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(value["outcome"], "timed_out");
        assert_eq!(value["report"]["correct"], 1);
        assert_eq!(value["report"]["total"], 2);
        assert!(value["time_limit_secs"].is_null());
        assert_eq!(value["questions"][0]["question"], "2+2");
        assert_eq!(value["questions"][0]["answered"], "4");
        assert!(value["questions"][1]["answered"].is_null());
    }

    #[test]
    fn save_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/run.json");
        let mut session = ExamSession::new(vec![], TimeLimit::Disabled);
        session.start();
        session.finish(ExamOutcome::Completed);
        let summary = RunSummary::new("empty.csv", &session, score(&session)).unwrap();
        summary.save_json(&path).unwrap();

        let loaded: RunSummary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.id, summary.id);
        assert_eq!(loaded.report.total, 0);
    }
}
