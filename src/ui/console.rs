// Console UI - prompts and the final tally
//
// Writes to any `io::Write` so sessions can run against stdout in the
// binary and against an in-memory buffer in tests.

use crate::models::SessionOutcome;
use std::io::{self, Write};

/// Prints quiz prompts and the final score
pub struct ConsoleUi<W: Write> {
    out: W,
}

impl<W: Write> ConsoleUi<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print one question prompt
    pub fn prompt(&mut self, number: usize, question: &str) -> io::Result<()> {
        writeln!(self.out, "Problem #{}: {} = ", number, question)?;
        self.out.flush()
    }

    /// Print the final tally
    ///
    /// After a timeout the user may be halfway through typing, so the tally
    /// starts on a fresh line.
    pub fn report(&mut self, outcome: &SessionOutcome) -> io::Result<()> {
        if outcome.timed_out() {
            writeln!(self.out)?;
        }
        writeln!(self.out, "{}", outcome)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionEnd;

    fn output(ui: ConsoleUi<Vec<u8>>) -> String {
        String::from_utf8(ui.into_inner()).unwrap()
    }

    #[test]
    fn test_prompt_line() {
        let mut ui = ConsoleUi::new(Vec::new());
        ui.prompt(3, "7+3").unwrap();
        assert_eq!(output(ui), "Problem #3: 7+3 = \n");
    }

    #[test]
    fn test_report_completed() {
        let mut ui = ConsoleUi::new(Vec::new());
        ui.report(&SessionOutcome {
            correct: 2,
            total: 2,
            asked: 2,
            end: SessionEnd::Completed,
        })
        .unwrap();
        assert_eq!(output(ui), "You scored 2 out of 2.\n");
    }

    #[test]
    fn test_report_timed_out_starts_fresh_line() {
        let mut ui = ConsoleUi::new(Vec::new());
        ui.report(&SessionOutcome {
            correct: 0,
            total: 3,
            asked: 1,
            end: SessionEnd::TimedOut,
        })
        .unwrap();
        assert_eq!(output(ui), "\nYou scored 0 out of 3.\n");
    }
}
