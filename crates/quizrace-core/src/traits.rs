//! Collaborator traits implemented outside the core.
//!
//! The CLI provides a stdin-backed prompter; tests use
//! [`ScriptedPrompter`](crate::mock::ScriptedPrompter).

/// Synchronously reads one line of user input for a displayed prompt.
///
/// Implementations may block indefinitely. The engine runs them on a
/// dedicated thread, so a read that is still pending when the time limit
/// expires is simply abandoned.
pub trait Prompter: Send + 'static {
    /// Show `prompt` and return the line the user typed.
    ///
    /// Read failures should be reported as an empty string rather than an
    /// error; the engine treats them as an unanswered question.
    fn prompt(&mut self, prompt: &str) -> String;
}

/// Format the numbered prompt for the question at `index` (0-based).
pub fn format_prompt(index: usize, question: &str) -> String {
    format!("{}.  What is {} ?  ", index + 1, question)
}
