//! Scripted prompter for testing the engine without a terminal.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::Prompter;

/// A prompter that replays a fixed list of answers.
///
/// Each answer can carry a delay that is slept on the calling thread before
/// the answer is returned, which makes it easy to simulate a slow user. Once
/// the script runs out the prompter returns empty strings, like a closed stdin.
#[derive(Debug, Clone)]
pub struct ScriptedPrompter {
    script: VecDeque<(Duration, String)>,
    /// Prompts shown so far, shared so tests can inspect them after the
    /// prompter has moved to another thread.
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    /// Answer immediately with each of `answers` in turn.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_delays(answers.into_iter().map(|a| (Duration::ZERO, a)))
    }

    /// Wait `delay` before returning each answer.
    pub fn with_delays<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = (Duration, S)>,
        S: Into<String>,
    {
        Self {
            script: answers.into_iter().map(|(d, a)| (d, a.into())).collect(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the list of prompts this prompter has displayed.
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, prompt: &str) -> String {
        if let Ok(mut shown) = self.prompts.lock() {
            shown.push(prompt.to_string());
        }
        match self.script.pop_front() {
            Some((delay, answer)) => {
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                answer
            }
            None => String::new(),
        }
    }
}
