//! Line-oriented prompter over a reader/writer pair (stdin/stdout in the binary).

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use quizrace_core::traits::Prompter;

/// Writes prompts to `output` and reads one line per prompt from `input`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` and block until a line (or EOF) arrives.
    pub fn acknowledge(&mut self, message: &str) {
        let _ = self.read_reply(message);
    }

    /// Consume the prompter and hand back its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_reply(&mut self, prompt: &str) -> String {
        if let Err(e) = write!(self.output, "{prompt}").and_then(|_| self.output.flush()) {
            tracing::debug!("failed to write prompt: {e}");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                tracing::debug!("input closed, treating as empty answer");
                String::new()
            }
            Ok(_) => line.trim().to_string(),
            Err(e) => {
                tracing::debug!("failed to read answer: {e}");
                String::new()
            }
        }
    }
}

impl<R, W> Prompter for LinePrompter<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    fn prompt(&mut self, prompt: &str) -> String {
        self.read_reply(prompt)
    }
}

/// The terminal prompter used by the binary.
pub fn stdio_prompter() -> LinePrompter<BufReader<Stdin>, Stdout> {
    LinePrompter::new(BufReader::new(io::stdin()), io::stdout())
}
