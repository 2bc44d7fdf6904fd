//! tint CLI - markdown with color and button directives.
//!
//! Provides commands for:
//! - `render`: Markdown to sanitized HTML
//! - `serialize`: HTML back to directive markdown
//! - `lite`: Markdown to HTML with the regex renderer
//! - `roundtrip`: Render and serialize, reporting whether the source survived
//! - `attrs`: Parse directive attribute text into JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use commands::{AttrsArgs, LiteArgs, RenderArgs, RoundtripArgs, SerializeArgs};
use output::Output;

/// tint - markdown color and button directives.
#[derive(Parser)]
#[command(name = "tint", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown to HTML.
    Render(RenderArgs),
    /// Convert HTML back to markdown.
    Serialize(SerializeArgs),
    /// Render markdown with the standalone regex renderer.
    Lite(LiteArgs),
    /// Render markdown and serialize it back.
    Roundtrip(RoundtripArgs),
    /// Parse directive attribute text and print it as JSON.
    Attrs(AttrsArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.verbose,
            Self::Serialize(args) => args.verbose,
            Self::Roundtrip(args) => args.verbose,
            Self::Lite(_) | Self::Attrs(_) => false,
        }
    }
}

/// --verbose enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Serialize(args) => args.execute(),
        Commands::Lite(args) => args.execute(),
        Commands::Roundtrip(args) => args.execute(),
        Commands::Attrs(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
