//! Interactive prompt plumbing
//!
//! Answers come in through the `Input` trait so the flows stay testable;
//! the binaries use the stdin implementation, tests feed scripted answers.

use anyhow::{Context, Result};
use std::io::Write;

/// Source of operator answers
pub trait Input {
    /// Display a prompt and return the trimmed answer.
    fn read_answer(&mut self, prompt: &str) -> Result<String>;
}

/// Reads answers from stdin, writing prompts to stdout
pub struct StdinInput;

impl Input for StdinInput {
    fn read_answer(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(line.trim().to_string())
    }
}

/// One interactive session over some input source
pub struct Session<I: Input> {
    input: I,
}

impl<I: Input> Session<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }

    /// Ask a free-form question.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        self.input.read_answer(prompt)
    }

    /// Ask a yes/no question. Only an explicit `y` (any case) is a yes,
    /// matching the original scripts' behavior.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.input.read_answer(&format!("{} (y/n): ", prompt))?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<&'static str>);

    impl Input for Scripted {
        fn read_answer(&mut self, _prompt: &str) -> Result<String> {
            Ok(self.0.pop_front().expect("script exhausted").to_string())
        }
    }

    #[test]
    fn test_ask_returns_scripted_answer() {
        let mut session = Session::new(Scripted(VecDeque::from(["example.com"])));
        assert_eq!(session.ask("Domain: ").unwrap(), "example.com");
    }

    #[test]
    fn test_confirm_accepts_only_y() {
        let answers = VecDeque::from(["y", "Y", "yes", "n", ""]);
        let mut session = Session::new(Scripted(answers));
        assert!(session.confirm("Proceed?").unwrap());
        assert!(session.confirm("Proceed?").unwrap());
        assert!(!session.confirm("Proceed?").unwrap()); // "yes" is not "y"
        assert!(!session.confirm("Proceed?").unwrap());
        assert!(!session.confirm("Proceed?").unwrap());
    }
}
