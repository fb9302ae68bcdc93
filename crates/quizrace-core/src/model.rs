//! Core data model types for quizrace.
//!
//! A session owns the loaded questions in display order and walks a small
//! state machine: `NotStarted -> InProgress -> {Completed | TimedOut}`.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// One question/answer pair loaded from the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// The question text, shown as-is.
    pub question: String,
    /// The expected answer, trimmed of surrounding whitespace.
    pub answer: String,
}

impl QuestionRecord {
    /// Build a record, trimming the answer.
    pub fn new(question: impl Into<String>, answer: &str) -> Self {
        Self {
            question: question.into(),
            answer: answer.trim().to_string(),
        }
    }
}

/// A question together with the response given during the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    #[serde(flatten)]
    pub record: QuestionRecord,
    /// The trimmed response, or `None` if the question was never reached.
    pub answered: Option<String>,
}

impl AnsweredQuestion {
    /// Whether the recorded response matches the expected answer exactly.
    pub fn is_correct(&self) -> bool {
        self.answered.as_deref() == Some(self.record.answer.as_str())
    }
}

/// The overall time allowed for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLimit {
    /// No limit; the timer never fires.
    #[default]
    Disabled,
    /// The session ends once this much wall-clock time has passed.
    Limited(Duration),
}

impl TimeLimit {
    /// Build a limit from whole seconds. Zero means disabled.
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            TimeLimit::Disabled
        } else {
            TimeLimit::Limited(Duration::from_secs(secs))
        }
    }

    /// Build a limit from a duration. A zero duration means disabled.
    pub fn from_duration(duration: Duration) -> Self {
        if duration.is_zero() {
            TimeLimit::Disabled
        } else {
            TimeLimit::Limited(duration)
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            TimeLimit::Disabled => None,
            TimeLimit::Limited(d) => Some(*d),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, TimeLimit::Limited(_))
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLimit::Disabled => write!(f, "no limit"),
            TimeLimit::Limited(d) => write!(f, "{}s", d.as_secs()),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamOutcome {
    /// Every question received a response.
    Completed,
    /// The time limit elapsed first.
    TimedOut,
}

impl fmt::Display for ExamOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamOutcome::Completed => write!(f, "completed"),
            ExamOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Lifecycle state of an [`ExamSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
    TimedOut,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::TimedOut)
    }

    /// The terminal outcome, if the session has ended.
    pub fn outcome(&self) -> Option<ExamOutcome> {
        match self {
            SessionState::Completed => Some(ExamOutcome::Completed),
            SessionState::TimedOut => Some(ExamOutcome::TimedOut),
            _ => None,
        }
    }
}

/// The mutable state of one exam attempt.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<AnsweredQuestion>,
    time_limit: TimeLimit,
    state: SessionState,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl ExamSession {
    pub fn new(records: Vec<QuestionRecord>, time_limit: TimeLimit) -> Self {
        let questions = records
            .into_iter()
            .map(|record| AnsweredQuestion {
                record,
                answered: None,
            })
            .collect();
        Self {
            questions,
            time_limit,
            state: SessionState::NotStarted,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn questions(&self) -> &[AnsweredQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn time_limit(&self) -> TimeLimit {
        self.time_limit
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of questions that have a recorded response.
    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .take_while(|q| q.answered.is_some())
            .count()
    }

    /// Move from `NotStarted` to `InProgress` and start the clock.
    ///
    /// Returns `false` if the session was already started.
    pub fn start(&mut self) -> bool {
        if self.state != SessionState::NotStarted {
            return false;
        }
        self.state = SessionState::InProgress;
        self.started_at = Some(Instant::now());
        true
    }

    /// Record the response for question `index`.
    ///
    /// Responses must arrive in display order, once each, while the session
    /// is in progress. Anything else is rejected and returns `false`.
    pub fn record_answer(&mut self, index: usize, answer: &str) -> bool {
        if self.state != SessionState::InProgress || index != self.answered_count() {
            return false;
        }
        match self.questions.get_mut(index) {
            Some(q) => {
                q.answered = Some(answer.trim().to_string());
                true
            }
            None => false,
        }
    }

    /// Conclude the session with the given outcome.
    ///
    /// Only the first terminal event is honored; later calls return `false`
    /// and leave the session untouched.
    pub fn finish(&mut self, outcome: ExamOutcome) -> bool {
        if self.state != SessionState::InProgress {
            return false;
        }
        self.state = match outcome {
            ExamOutcome::Completed => SessionState::Completed,
            ExamOutcome::TimedOut => SessionState::TimedOut,
        };
        self.finished_at = Some(Instant::now());
        true
    }

    /// Wall-clock time spent in the session so far (frozen once finished).
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Time left before the limit, or `None` when there is no limit.
    pub fn remaining(&self) -> Option<Duration> {
        self.time_limit
            .duration()
            .map(|limit| limit.saturating_sub(self.elapsed()))
    }
}
