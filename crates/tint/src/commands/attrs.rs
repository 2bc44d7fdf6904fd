//! `tint attrs` command implementation.

use std::collections::BTreeMap;

use clap::Args;
use tint_renderer::parse_attributes;

use super::InputArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the attrs command.
#[derive(Args)]
pub(crate) struct AttrsArgs {
    /// Attribute text as written between the braces, e.g. `url=/x shape=pill`.
    #[arg(short, long, conflicts_with = "input")]
    text: Option<String>,

    #[command(flatten)]
    input: InputArgs,
}

impl AttrsArgs {
    /// Execute the attrs command.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let text = match self.text {
            Some(text) => text,
            None => self.input.read()?,
        };
        Output::new().result(&attributes_json(&text)?)?;
        Ok(())
    }
}

/// Parse attribute text and format the mapping as pretty JSON.
fn attributes_json(text: &str) -> Result<String, CliError> {
    let attrs: BTreeMap<String, String> = parse_attributes(text.trim());
    Ok(serde_json::to_string_pretty(&attrs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attributes_json() {
        assert_eq!(
            attributes_json("url=https://example.com shape=pill").unwrap(),
            "{\n  \"shape\": \"pill\",\n  \"url\": \"https://example.com\"\n}"
        );
    }

    #[test]
    fn test_attributes_json_quoted_value() {
        assert_eq!(
            attributes_json(r#"title="two words""#).unwrap(),
            "{\n  \"title\": \"two words\"\n}"
        );
    }

    #[test]
    fn test_attributes_json_empty() {
        assert_eq!(attributes_json("  \n").unwrap(), "{}");
    }
}
