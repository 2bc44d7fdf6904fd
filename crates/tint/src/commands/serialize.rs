//! `tint serialize` command implementation.

use std::path::PathBuf;

use clap::Args;
use tint_config::Config;

use super::{InputArgs, serializer_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serialize command.
#[derive(Args)]
pub(crate) struct SerializeArgs {
    /// HTML input.
    #[command(flatten)]
    input: InputArgs,

    /// Path to configuration file (default: auto-discover tint.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show serializer logs.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SerializeArgs {
    /// Execute the serialize command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input cannot be read, or the
    /// HTML has no body.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let html = self.input.read()?;

        let markdown = serializer_from_config(&config).serialize(&html)?;
        Output::new().result(&markdown)?;
        Ok(())
    }
}
