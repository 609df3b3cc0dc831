//! Yes/no confirmation read from a line-oriented input.

use std::io::{BufRead, Write};

use pt_core::Confirm;

/// Asks on `output` and reads the answer from `input`.
///
/// Only `y` or `yes` (any case) confirms. End of input or an I/O error
/// declines.
pub struct Prompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
    assume_yes: bool,
}

impl<'a, R, W> Prompt<'a, R, W> {
    pub const fn new(input: &'a mut R, output: &'a mut W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<'_, R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            tracing::debug!(prompt, "confirmation skipped (assume_yes)");
            return true;
        }

        if write!(self.output, "{prompt} [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}
