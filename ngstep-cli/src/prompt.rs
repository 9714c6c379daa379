//! Interactive y/N confirmations on stdin.

use anyhow::Context;
use ngstep_core::ports::StepGate;
use ngstep_types::VersionTransition;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

/// Asks on the terminal. Without a terminal on stdin every answer is "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptGate;

impl PromptGate {
    fn ask(&self, question: &str) -> anyhow::Result<bool> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            debug!(question, "stdin is not a terminal, answering no");
            return Ok(false);
        }
        print!("{question} [y/N] ");
        io::stdout().flush().context("flush stdout")?;
        let mut answer = String::new();
        stdin.lock().read_line(&mut answer).context("read answer")?;
        Ok(is_yes(&answer))
    }
}

impl StepGate for PromptGate {
    fn confirm_upgrade(&self, step: VersionTransition) -> anyhow::Result<bool> {
        self.ask(&format!("Run ng update for Angular {step}?"))
    }

    fn confirm_continue(&self, finished: VersionTransition) -> anyhow::Result<bool> {
        self.ask(&format!("Continue migration to {}?", finished.to() + 1))
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
