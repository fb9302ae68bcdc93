//! Exam session driver.
//!
//! Runs the blocking answer-collection loop on its own thread, races it
//! against the time limit, then applies the published answers to the session
//! and scores it. Only this driver mutates the session, and only after the
//! race has resolved, so no locks are needed.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot};

use crate::model::{ExamOutcome, ExamSession, QuestionRecord, TimeLimit};
use crate::race::race;
use crate::report::ExamReport;
use crate::scoring::score;
use crate::traits::{format_prompt, Prompter};

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_start(&self, total: usize, limit: TimeLimit);
    fn on_answer(&self, index: usize, answer: &str);
    fn on_finish(&self, outcome: ExamOutcome, report: &ExamReport, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_start(&self, _: usize, _: TimeLimit) {}
    fn on_answer(&self, _: usize, _: &str) {}
    fn on_finish(&self, _: ExamOutcome, _: &ExamReport, _: Duration) {}
}

/// A finished session and its score.
#[derive(Debug, Clone)]
pub struct ExamResult {
    pub session: ExamSession,
    pub report: ExamReport,
}

impl ExamResult {
    pub fn outcome(&self) -> ExamOutcome {
        // run() always finishes the session before building a result.
        self.session
            .state()
            .outcome()
            .unwrap_or(ExamOutcome::Completed)
    }
}

/// One answer published by the collection loop.
#[derive(Debug)]
struct Answer {
    index: usize,
    text: String,
}

/// Drives a single exam attempt.
pub struct ExamEngine {
    questions: Vec<QuestionRecord>,
    time_limit: TimeLimit,
}

impl ExamEngine {
    pub fn new(questions: Vec<QuestionRecord>, time_limit: TimeLimit) -> Self {
        Self {
            questions,
            time_limit,
        }
    }

    /// Ask every question through `prompter` until all are answered or the
    /// time limit elapses, then score the session.
    ///
    /// When the limit wins, a read still pending on the collection thread is
    /// abandoned; its answer, if it ever arrives, is discarded.
    pub async fn run<P: Prompter>(
        self,
        prompter: P,
        progress: &dyn ProgressReporter,
    ) -> Result<ExamResult> {
        let mut session = ExamSession::new(self.questions, self.time_limit);
        let prompts: Vec<String> = session
            .questions()
            .iter()
            .enumerate()
            .map(|(i, q)| format_prompt(i, &q.record.question))
            .collect();

        let (answer_tx, mut answer_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = oneshot::channel();

        session.start();
        progress.on_start(session.len(), session.time_limit());
        tracing::info!(
            "exam started: {} question(s), {}",
            session.len(),
            session.time_limit()
        );

        spawn_collector(prompter, prompts, answer_tx, done_tx)?;

        let outcome = race(done_rx, session.time_limit()).await;

        // Closing first freezes the set of answers that count.
        answer_rx.close();
        while let Ok(answer) = answer_rx.try_recv() {
            if session.record_answer(answer.index, &answer.text) {
                progress.on_answer(answer.index, &answer.text);
            } else {
                tracing::warn!("ignoring out-of-order answer for question {}", answer.index + 1);
            }
        }

        session.finish(outcome);
        let report = score(&session);
        tracing::info!(
            "exam {outcome} after {:.1}s: {}/{} correct",
            session.elapsed().as_secs_f64(),
            report.correct,
            report.total
        );
        progress.on_finish(outcome, &report, session.elapsed());

        Ok(ExamResult { session, report })
    }
}

/// Start the collection loop on a detached thread.
///
/// The thread owns the prompter and only publishes: each trimmed answer goes
/// to `answers`, and `done` fires once every prompt has been answered. If the
/// session concludes first, the next publish fails and the thread exits.
fn spawn_collector<P: Prompter>(
    mut prompter: P,
    prompts: Vec<String>,
    answers: mpsc::UnboundedSender<Answer>,
    done: oneshot::Sender<()>,
) -> Result<()> {
    std::thread::Builder::new()
        .name("quiz-prompter".into())
        .spawn(move || {
            for (index, prompt) in prompts.iter().enumerate() {
                let text = prompter.prompt(prompt).trim().to_string();
                tracing::debug!("question {} answered", index + 1);
                if answers.send(Answer { index, text }).is_err() {
                    tracing::debug!("session already concluded, dropping answer {}", index + 1);
                    return;
                }
            }
            if done.send(()).is_err() {
                tracing::debug!("session already concluded before the last answer");
            }
        })
        .context("failed to spawn answer collection thread")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::mock::ScriptedPrompter;
    use crate::model::SessionState;
    use crate::parser::parse_questions_str;

    fn questions(csv: &str) -> Vec<QuestionRecord> {
        parse_questions_str(csv).unwrap()
    }

    #[derive(Default)]
    struct RecordingReporter {
        answers: Mutex<Vec<(usize, String)>>,
        finished: Mutex<Option<ExamOutcome>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn on_start(&self, _: usize, _: TimeLimit) {}
        fn on_answer(&self, index: usize, answer: &str) {
            self.answers.lock().unwrap().push((index, answer.to_string()));
        }
        fn on_finish(&self, outcome: ExamOutcome, _: &ExamReport, _: Duration) {
            *self.finished.lock().unwrap() = Some(outcome);
        }
    }

    #[tokio::test]
    async fn completes_without_limit() {
        let engine = ExamEngine::new(questions("2+2,4\n3+3,6\n"), TimeLimit::Disabled);
        let prompter = ScriptedPrompter::new(["4", "7"]);
        let prompts = prompter.prompts();

        let result = engine.run(prompter, &NoopReporter).await.unwrap();

        assert_eq!(result.outcome(), ExamOutcome::Completed);
        assert_eq!(result.report.correct, 1);
        assert_eq!(result.report.total, 2);
        assert_eq!(result.report.percentage, 50.0);
        assert_eq!(
            *prompts.lock().unwrap(),
            vec!["1.  What is 2+2 ?  ", "2.  What is 3+3 ?  "]
        );
    }

    #[tokio::test]
    async fn trims_loaded_answer_and_response() {
        let engine = ExamEngine::new(questions("1+1, 2\n"), TimeLimit::Disabled);
        let result = engine
            .run(ScriptedPrompter::new(["2\n"]), &NoopReporter)
            .await
            .unwrap();

        assert_eq!(result.session.questions()[0].record.answer, "2");
        assert_eq!(result.session.questions()[0].answered.as_deref(), Some("2"));
        assert_eq!(result.report.correct, 1);
        assert_eq!(result.report.percentage, 100.0);
    }

    #[tokio::test]
    async fn long_limit_completes_with_every_answer() {
        let engine = ExamEngine::new(
            questions("a,1\nb,2\nc,3\n"),
            TimeLimit::from_secs(30),
        );
        let prompter = ScriptedPrompter::with_delays([
            (Duration::from_millis(10), "1"),
            (Duration::from_millis(10), "2"),
            (Duration::from_millis(10), "3"),
        ]);

        let result = engine.run(prompter, &NoopReporter).await.unwrap();

        assert_eq!(result.session.state(), SessionState::Completed);
        assert!(result
            .session
            .questions()
            .iter()
            .all(|q| q.answered.is_some()));
        assert_eq!(result.report.correct, 3);
    }

    #[tokio::test]
    async fn short_limit_times_out_with_partial_answers() {
        let engine = ExamEngine::new(
            questions("a,1\nb,2\nc,3\n"),
            TimeLimit::from_duration(Duration::from_millis(300)),
        );
        // First answer is instant; the second takes far longer than the limit.
        let prompter = ScriptedPrompter::with_delays([
            (Duration::ZERO, "1"),
            (Duration::from_secs(3), "2"),
            (Duration::ZERO, "3"),
        ]);
        let reporter = RecordingReporter::default();

        let result = engine.run(prompter, &reporter).await.unwrap();

        assert_eq!(result.session.state(), SessionState::TimedOut);
        assert_eq!(result.session.answered_count(), 1);
        assert!(result.session.questions()[1].answered.is_none());
        assert_eq!(result.report.correct, 1);
        assert_eq!(result.report.total, 3);
        assert_eq!(result.report.percentage, 33.33);
        assert!(result.session.elapsed() < Duration::from_secs(3));
        assert_eq!(*reporter.answers.lock().unwrap(), vec![(0, "1".to_string())]);
        assert_eq!(*reporter.finished.lock().unwrap(), Some(ExamOutcome::TimedOut));
    }

    #[tokio::test]
    async fn empty_exam_resolves_cleanly() {
        let engine = ExamEngine::new(vec![], TimeLimit::from_secs(30));
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        let prompts = prompter.prompts();

        let result = engine.run(prompter, &NoopReporter).await.unwrap();

        assert_eq!(result.outcome(), ExamOutcome::Completed);
        assert_eq!(result.report.correct, 0);
        assert_eq!(result.report.total, 0);
        assert_eq!(result.report.percentage, 0.0);
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn exhausted_input_counts_as_empty_answers() {
        let engine = ExamEngine::new(questions("a,1\nb,2\n"), TimeLimit::Disabled);
        let result = engine
            .run(ScriptedPrompter::new(["1"]), &NoopReporter)
            .await
            .unwrap();

        assert_eq!(result.outcome(), ExamOutcome::Completed);
        assert_eq!(result.session.questions()[1].answered.as_deref(), Some(""));
        assert_eq!(result.report.correct, 1);
    }
}
