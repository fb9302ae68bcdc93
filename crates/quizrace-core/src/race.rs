//! Timeout race between "all questions answered" and "time limit elapsed".
//!
//! Both sides only ever signal. A spawned timer task feeds one one-shot
//! channel, the collection loop feeds the other, and a single `select!`
//! resolves whichever fires first. The loser's later `send` lands on a
//! dropped receiver and is ignored.

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::model::{ExamOutcome, TimeLimit};

/// Wait for `completion` or for `limit` to elapse, whichever happens first.
///
/// With [`TimeLimit::Disabled`] no timer is started and only `completion`
/// can end the race. A completion sender dropped without sending is treated
/// as completion so a dead collector never leaves the caller waiting.
pub async fn race(completion: oneshot::Receiver<()>, limit: TimeLimit) -> ExamOutcome {
    let (timer, expired) = match start_timer(limit) {
        Some((handle, rx)) => (Some(handle), Some(rx)),
        None => (None, None),
    };

    let outcome = tokio::select! {
        biased;
        result = completion => {
            if result.is_err() {
                tracing::warn!("answer collection ended without signalling completion");
            }
            ExamOutcome::Completed
        }
        _ = expiry(expired) => ExamOutcome::TimedOut,
    };

    if let Some(handle) = timer {
        handle.abort();
    }

    tracing::debug!("race resolved: {outcome}");
    outcome
}

/// Spawn the timer task for an enabled limit.
fn start_timer(limit: TimeLimit) -> Option<(JoinHandle<()>, oneshot::Receiver<()>)> {
    let duration = limit.duration()?;
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        if tx.send(()).is_err() {
            tracing::trace!("timer fired after the session concluded");
        }
    });
    Some((handle, rx))
}

/// Resolves when the timer signals. Never resolves without a timer.
async fn expiry(expired: Option<oneshot::Receiver<()>>) {
    match expired {
        Some(rx) => {
            if rx.await.is_err() {
                // Timer task went away without firing.
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}
