//! Prompt/response I/O.
//!
//! Every question the explorer asks goes through a [`Console`]. The binary
//! uses [`TerminalConsole`]; tests drive the same code with a
//! [`ScriptedConsole`] whose answers run out instead of blocking, which
//! turns every re-prompt loop into a terminating one.

use crate::error::{ExplorerError, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Interactive input plus the text output sink.
pub trait Console {
    /// Print `message` (without a trailing newline) and read one answer.
    ///
    /// Returns [`ExplorerError::InputClosed`] once no more answers exist.
    fn ask(&mut self, message: &str) -> Result<String>;

    /// Sink for report text.
    fn out(&mut self) -> &mut dyn Write;

    /// Print one line of text.
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.out(), "{}", line)?;
        Ok(())
    }

    /// Ask a yes/no question. Only "yes" or "y" count as yes.
    fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = self.ask(message)?;
        Ok(is_affirmative(&answer))
    }
}

/// Whether an answer means yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

/// Console over the process's stdin and stdout.
pub struct TerminalConsole {
    input: io::StdinLock<'static>,
    output: io::Stdout,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn ask(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ExplorerError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

/// Console that replays canned answers and records everything printed.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: Vec<u8>,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    /// Create a console that will answer with `answers`, in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// Everything printed so far, prompts included.
    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.transcript).into_owned()
    }

    /// The prompts that were asked, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn ask(&mut self, message: &str) -> Result<String> {
        self.transcript.extend_from_slice(message.as_bytes());
        self.prompts.push(message.to_string());

        let answer = self.answers.pop_front().ok_or(ExplorerError::InputClosed)?;
        self.transcript.extend_from_slice(answer.as_bytes());
        self.transcript.push(b'\n');
        Ok(answer)
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.transcript
    }
}
