//! `tint render` command implementation.

use std::path::PathBuf;

use clap::Args;
use tint_config::{CliSettings, Config};

use super::{InputArgs, disabled_if, pipeline_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Path to configuration file (default: auto-discover tint.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable tables, strikethrough and task lists.
    #[arg(long)]
    no_gfm: bool,

    /// Keep single newlines as newlines instead of `<br>`.
    #[arg(long)]
    no_breaks: bool,

    /// Emit the HTML without sanitizing it.
    #[arg(long)]
    no_sanitize: bool,

    /// Fail instead of printing the fallback HTML when rendering fails.
    #[arg(long)]
    strict: bool,

    /// Show rendering warnings and progress logs.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input cannot be read, or in
    /// strict mode when rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            gfm: disabled_if(self.no_gfm),
            breaks: disabled_if(self.no_breaks),
            sanitize: disabled_if(self.no_sanitize),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = self.input.read()?;
        let pipeline = pipeline_from_config(&config);
        let result = if self.strict {
            pipeline.try_render(&markdown)?
        } else {
            pipeline.render(&markdown)
        };

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        output.result(&result.html)?;
        Ok(())
    }
}
