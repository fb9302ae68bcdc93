//! The interactive exam run: banner, questions, score.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use quizrace_core::engine::{ExamEngine, ProgressReporter};
use quizrace_core::model::{ExamOutcome, ExamSession, TimeLimit};
use quizrace_core::parser;
use quizrace_core::report::{ExamReport, RunSummary};

use crate::prompter::stdio_prompter;

/// Settings for one run, resolved from config and flags.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub csv: PathBuf,
    pub time_limit: TimeLimit,
    pub wait_for_start: bool,
    pub review: bool,
    pub json: bool,
    pub output: Option<PathBuf>,
}

/// Logs session progress; the interactive output itself goes to stdout.
struct LogReporter;

impl ProgressReporter for LogReporter {
    fn on_start(&self, total: usize, limit: TimeLimit) {
        tracing::debug!("asking {total} question(s), limit: {limit}");
    }

    fn on_answer(&self, index: usize, answer: &str) {
        tracing::debug!("question {} -> {answer:?}", index + 1);
    }

    fn on_finish(&self, outcome: ExamOutcome, report: &ExamReport, elapsed: Duration) {
        tracing::info!(
            "{outcome}: {}/{} ({:.2}%) in {:.1}s",
            report.correct,
            report.total,
            report.percentage,
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(options: RunOptions) -> Result<()> {
    // The file is read in full and closed before any question is shown.
    let questions = parser::load_questions(&options.csv)?;
    for w in parser::validate_questions(&questions) {
        tracing::warn!("question {}: {}", w.number, w.message);
    }

    println!(
        "The exam will begin now. There are {} questions.",
        questions.len()
    );
    match options.time_limit.duration() {
        Some(limit) => println!("You have {} seconds.", limit.as_secs()),
        None => println!("There is no time limit."),
    }

    let mut prompter = stdio_prompter();
    if options.wait_for_start && !questions.is_empty() {
        prompter = tokio::task::spawn_blocking(move || {
            prompter.acknowledge("Press Enter to begin...");
            prompter
        })
        .await
        .context("failed to wait for acknowledgement")?;
    }

    let engine = ExamEngine::new(questions, options.time_limit);
    let result = engine.run(prompter, &LogReporter).await?;

    if result.outcome() == ExamOutcome::TimedOut {
        println!("\nOut of time");
    }
    if result.report.total == 0 {
        println!("No questions were loaded.");
    }
    println!("{}", result.report);

    if options.review {
        print_review(&result.session);
    }

    if options.json || options.output.is_some() {
        let summary = RunSummary::new(
            options.csv.display().to_string(),
            &result.session,
            result.report,
        )
        .context("session did not reach a terminal state")?;

        if options.json {
            println!("{}", summary.to_json()?);
        }
        if let Some(path) = &options.output {
            summary.save_json(path)?;
            eprintln!("Run summary saved to: {}", path.display());
        }
    }

    Ok(())
}

fn print_review(session: &ExamSession) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Expected", "Answered", "Result"]);

    for (i, q) in session.questions().iter().enumerate() {
        let (answered, result) = match &q.answered {
            Some(a) if q.is_correct() => (a.as_str(), "OK"),
            Some(a) => (a.as_str(), "WRONG"),
            None => ("-", "SKIPPED"),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&q.record.question),
            Cell::new(&q.record.answer),
            Cell::new(answered),
            Cell::new(result),
        ]);
    }

    eprintln!("\n{table}");
}
