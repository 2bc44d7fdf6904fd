//! CLI command implementations.

pub(crate) mod attrs;
pub(crate) mod lite;
pub(crate) mod render;
pub(crate) mod roundtrip;
pub(crate) mod serialize;

pub(crate) use attrs::AttrsArgs;
pub(crate) use lite::LiteArgs;
pub(crate) use render::RenderArgs;
pub(crate) use roundtrip::RoundtripArgs;
pub(crate) use serialize::SerializeArgs;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use tint_config::{Config, SerializerConfig};
use tint_renderer::{Pipeline, RenderOptions, Sanitizer};
use tint_serializer::{Serializer, SerializerOptions};

use crate::error::CliError;

/// Input source shared by every command.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Input file (default: read stdin; `-` also reads stdin).
    input: Option<PathBuf>,
}

impl InputArgs {
    /// Read the whole input.
    pub(crate) fn read(&self) -> Result<String, CliError> {
        read_input(self.input.as_deref())
    }
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Build the forward transform described by `config`.
pub(crate) fn pipeline_from_config(config: &Config) -> Pipeline {
    let render = &config.render;
    let sanitizer = Sanitizer::new()
        .with_extra_tags(config.sanitizer.extra_tags.iter().cloned())
        .with_extra_attributes(config.sanitizer.extra_attributes.iter().cloned());

    Pipeline::new()
        .with_options(RenderOptions {
            gfm: render.gfm,
            breaks: render.breaks,
            sanitize: render.sanitize,
            fallback_html: render.fallback_html.clone(),
            max_nesting_depth: render.max_nesting_depth,
        })
        .with_sanitizer(sanitizer)
}

/// Build the reverse transform described by `config`.
pub(crate) fn serializer_from_config(config: &Config) -> Serializer {
    Serializer::new().with_options(serializer_options(&config.serializer))
}

fn serializer_options(config: &SerializerConfig) -> SerializerOptions {
    let defaults = SerializerOptions::default();
    let first_char = |value: &str, fallback: char| value.chars().next().unwrap_or(fallback);

    SerializerOptions::default()
        .with_bullet_marker(first_char(&config.bullet_marker, defaults.bullet_marker))
        .with_em_delimiter(first_char(&config.em_delimiter, defaults.em_delimiter))
        .with_strong_delimiter(config.strong_delimiter.as_str())
        .with_fence(config.fence.as_str())
        .with_horizontal_rule(config.rule.as_str())
}

/// Turn a `--no-*` switch into an override that only applies when given.
pub(crate) fn disabled_if(flag: bool) -> Option<bool> {
    flag.then_some(false)
}
