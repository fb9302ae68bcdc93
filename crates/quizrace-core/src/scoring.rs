//! Exam scoring.
//!
//! Percentages are rounded to two decimal places, half away from zero
//! (`f64::round` semantics). An empty exam scores 0 of 0 at 0.00%.

use crate::model::ExamSession;
use crate::report::ExamReport;

/// Score a session in whatever state it is in.
///
/// Unanswered questions count as incorrect, so a timed-out session is scored
/// on its partial answers against the full question count.
pub fn score(session: &ExamSession) -> ExamReport {
    let total = session.len();
    let correct = session.questions().iter().filter(|q| q.is_correct()).count();
    ExamReport {
        correct,
        total,
        percentage: percentage(correct, total),
    }
}

/// `correct / total * 100`, rounded to 2 decimals; `0.0` when `total == 0`.
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to_hundredths(correct as f64 / total as f64 * 100.0)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
