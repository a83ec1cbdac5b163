//! Line-oriented human adapter.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use super::{DecisionContext, Policy};
use crate::core::Action;
use crate::error::Result;

/// Prints the numbered action list and blocks on an index.
///
/// Anything that is not an index into the list is rejected and the
/// prompt repeats. End of input is an I/O error.
pub struct HumanPolicy<R, W> {
    input: R,
    output: W,
}

impl HumanPolicy<BufReader<Stdin>, Stdout> {
    /// Read from stdin, print to stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPolicy<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_actions(&mut self, ctx: &DecisionContext<'_>, actions: &[Action]) -> io::Result<()> {
        let me = ctx.state.player(ctx.player);
        writeln!(self.output, "Turn {}: {} to act", ctx.state.turn, me.name)?;
        if let Some(active) = &me.active {
            writeln!(self.output, "  active: {active}")?;
        }
        for (i, action) in actions.iter().enumerate() {
            writeln!(self.output, "  [{i}] {action}")?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Policy for HumanPolicy<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn choose(&mut self, ctx: &DecisionContext<'_>, actions: &[Action]) -> Result<usize> {
        self.print_actions(ctx, actions)?;
        loop {
            write!(self.output, "choose an action: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
            }
            match line.trim().parse::<usize>() {
                Ok(index) if index < actions.len() => return Ok(index),
                _ => writeln!(
                    self.output,
                    "'{}' is not a number between 0 and {}",
                    line.trim(),
                    actions.len().saturating_sub(1)
                )?,
            }
        }
    }
}
