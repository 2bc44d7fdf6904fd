//! Directive argument parsing.
//!
//! Parses the `[label]{key=value key="quoted value"}` part of a directive.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// `key=value` or `key="quoted value"`. Quoted values are tried first so that
/// they may contain whitespace.
static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z0-9_]+)=("[^"]*"|\S+)"#).unwrap());

/// Parse `key=value` pairs from a directive parameter string.
///
/// Values are either a run of non-whitespace characters or a double-quoted
/// run that may contain whitespace; surrounding quotes are stripped. The last
/// occurrence of a duplicate key wins. Fragments without `=` or with an empty
/// key are skipped. Escaped quotes inside quoted values are not supported.
///
/// # Example
///
/// ```
/// use tint_renderer::directive::parse_attributes;
///
/// let attrs = parse_attributes(r#"url=https://x.com title="two words" shape=rect"#);
/// assert_eq!(attrs["url"], "https://x.com");
/// assert_eq!(attrs["title"], "two words");
/// assert_eq!(attrs["shape"], "rect");
/// ```
pub fn parse_attributes(params: &str) -> BTreeMap<String, String> {
    ATTRIBUTE_RE
        .captures_iter(params)
        .map(|caps| {
            let value = &caps[2];
            let value = if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
                &value[1..value.len() - 1]
            } else {
                value
            };
            (caps[1].to_owned(), value.to_owned())
        })
        .collect()
}

/// Parsed arguments from directive syntax.
///
/// Represents the label and parameters extracted from a directive:
/// `:name[label]{params}`
///
/// # Example
///
/// ```
/// use tint_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("Click", r#"url="https://example.com" shape=pill"#);
/// assert_eq!(args.label, "Click");
/// assert_eq!(args.get("url"), Some("https://example.com"));
/// assert_eq!(args.get_or("color", "blue"), "blue");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Label from brackets: `[label]`.
    pub label: String,
    /// Raw parameter string from braces, without the braces.
    pub params: String,
    /// Key-value attributes parsed from `params`.
    pub attrs: BTreeMap<String, String>,
}

impl DirectiveArgs {
    /// Parse label and parameter string into structured arguments.
    #[must_use]
    pub fn parse(label: &str, params: &str) -> Self {
        Self {
            label: label.to_owned(),
            params: params.to_owned(),
            attrs: parse_attributes(params),
        }
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Get an attribute value, treating missing and empty values as `default`.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).filter(|v| !v.is_empty()).unwrap_or(default)
    }

    /// Reconstruct the original `[label]{params}` syntax.
    ///
    /// Used for pass-through when a directive is not handled.
    #[must_use]
    pub fn to_syntax(&self) -> String {
        format!("[{}]{{{}}}", self.label, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_params() {
        assert!(parse_attributes("").is_empty());
        assert!(parse_attributes("   ").is_empty());
    }

    #[test]
    fn test_unquoted_values() {
        let attrs = parse_attributes("url=https://example.com shape=pill color=blue");
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs["url"], "https://example.com");
        assert_eq!(attrs["shape"], "pill");
        assert_eq!(attrs["color"], "blue");
    }

    #[test]
    fn test_quoted_values() {
        let attrs = parse_attributes(r#"url="https://example.com" shape="pill" color="blue""#);
        assert_eq!(attrs["url"], "https://example.com");
        assert_eq!(attrs["shape"], "pill");
        assert_eq!(attrs["color"], "blue");
    }

    #[test]
    fn test_quoted_value_with_spaces() {
        let attrs = parse_attributes(r#"title="Hello World" k=v"#);
        assert_eq!(attrs["title"], "Hello World");
        assert_eq!(attrs["k"], "v");
    }

    #[test]
    fn test_empty_quoted_value() {
        let attrs = parse_attributes(r#"url="""#);
        assert_eq!(attrs["url"], "");
    }

    #[test]
    fn test_value_keeps_inner_equals() {
        let attrs = parse_attributes("url=https://x.com/?a=b&c=d");
        assert_eq!(attrs["url"], "https://x.com/?a=b&c=d");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let attrs = parse_attributes("color=red color=green");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["color"], "green");
    }

    #[test]
    fn test_malformed_fragments_skipped() {
        let attrs = parse_attributes("lonely =nokey shape=rect");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["shape"], "rect");
    }

    #[test]
    fn test_unterminated_quote_kept_verbatim() {
        let attrs = parse_attributes(r#"title="open"#);
        assert_eq!(attrs["title"], r#""open"#);
    }

    #[test]
    fn test_args_get_or() {
        let args = DirectiveArgs::parse("X", r#"url="" shape=rect"#);
        assert_eq!(args.get("url"), Some(""));
        assert_eq!(args.get_or("url", "#"), "#");
        assert_eq!(args.get_or("shape", "pill"), "rect");
        assert_eq!(args.get_or("color", "blue"), "blue");
    }

    #[test]
    fn test_to_syntax() {
        let args = DirectiveArgs::parse("hello", "#ff0000");
        assert_eq!(args.to_syntax(), "[hello]{#ff0000}");

        let args = DirectiveArgs::parse("", "");
        assert_eq!(args.to_syntax(), "[]{}");
    }
}
