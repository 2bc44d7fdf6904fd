//! `tint lite` command implementation.

use clap::Args;

use super::InputArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lite command.
#[derive(Args)]
pub(crate) struct LiteArgs {
    #[command(flatten)]
    input: InputArgs,
}

impl LiteArgs {
    /// Execute the lite command.
    ///
    /// The regex renderer takes no configuration and does not sanitize.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = self.input.read()?;
        Output::new().result(&tint_lite::render(&markdown))?;
        Ok(())
    }
}
