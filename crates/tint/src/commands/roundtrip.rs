//! `tint roundtrip` command implementation.

use std::path::PathBuf;

use clap::Args;
use tint_config::Config;
use tint_renderer::Pipeline;
use tint_serializer::Serializer;

use super::{InputArgs, pipeline_from_config, serializer_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the roundtrip command.
#[derive(Args)]
pub(crate) struct RoundtripArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Path to configuration file (default: auto-discover tint.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail if the markdown changes on the way through.
    #[arg(long)]
    check: bool,

    /// Show rendering warnings and serializer logs.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RoundtripArgs {
    /// Execute the roundtrip command.
    ///
    /// Renders the input to HTML, serializes it back and prints the result.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input cannot be read, or with
    /// `--check` when the output differs from the input.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let markdown = self.input.read()?;

        let pipeline = pipeline_from_config(&config);
        let serializer = serializer_from_config(&config);
        let trip = round_trip(&pipeline, &serializer, &markdown)?;

        for warning in &trip.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        output.result(&trip.markdown)?;

        if trip.stable {
            output.success("Round trip is stable");
        } else if self.check {
            return Err(CliError::Validation(
                "Round trip changed the markdown".to_owned(),
            ));
        } else {
            output.info("Round trip changed the markdown");
        }
        Ok(())
    }
}

/// Outcome of one render and serialize cycle.
struct RoundTrip {
    markdown: String,
    warnings: Vec<String>,
    stable: bool,
}

fn round_trip(
    pipeline: &Pipeline,
    serializer: &Serializer,
    markdown: &str,
) -> Result<RoundTrip, CliError> {
    let rendered = pipeline.render(markdown);
    let serialized = serializer.serialize(&rendered.html)?;
    tracing::debug!(html = %rendered.html, "Rendered for round trip");

    let stable = serialized == markdown.trim();
    Ok(RoundTrip {
        markdown: serialized,
        warnings: rendered.warnings,
        stable,
    })
}
