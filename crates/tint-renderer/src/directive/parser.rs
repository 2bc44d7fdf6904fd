//! Directive syntax parsing.
//!
//! Finds inline `:name[label]{params}` directives within a line. Both the
//! bracketed label and the braced parameter string are required; text that
//! does not close them is left alone.

use super::DirectiveArgs;

/// Inline directive parsed from a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedDirective {
    pub(crate) name: String,
    pub(crate) args: DirectiveArgs,
}

/// Find the first directive in `line`.
///
/// Returns the directive with its byte range `start..end`. Code spans are
/// skipped, so directive syntax inside backticks stays literal.
pub(crate) fn find_directive(line: &str) -> Option<(ParsedDirective, usize, usize)> {
    let bytes = line.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'`' => pos = skip_code_span(line, pos),
            b'\\' => pos += 2,
            b':' => {
                if let Some((directive, end)) = parse_at(line, pos) {
                    return Some((directive, pos, end));
                }
                pos += 1;
            }
            _ => pos += 1,
        }
    }

    None
}

/// Try to parse a directive starting at the colon at byte `start`.
fn parse_at(line: &str, start: usize) -> Option<(ParsedDirective, usize)> {
    let after_colon = &line[start + 1..];
    let name_end = after_colon
        .find(|c: char| !is_name_char(c))
        .unwrap_or(after_colon.len());

    let name = &after_colon[..name_end];
    if name.is_empty() {
        return None;
    }

    let mut pos = start + 1 + name_end;

    let (label, label_consumed) = parse_brackets(&line[pos..])?;
    pos += label_consumed;

    let (params, params_consumed) = parse_braces(&line[pos..])?;
    pos += params_consumed;

    let directive = ParsedDirective {
        name: name.to_owned(),
        args: DirectiveArgs::parse(label, params),
    };
    Some((directive, pos))
}

/// Valid name characters: ASCII alphanumerics, hyphens and underscores.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Skip a code span opened by the backtick run at `start`.
///
/// Returns the position after the closing run, or after the opening run when
/// the span is never closed.
fn skip_code_span(line: &str, start: usize) -> usize {
    let run = backtick_run(&line[start..]);
    let mut pos = start + run;

    while let Some(offset) = line[pos..].find('`') {
        let candidate = pos + offset;
        let len = backtick_run(&line[candidate..]);
        if len == run {
            return candidate + len;
        }
        pos = candidate + len;
    }

    start + run
}

fn backtick_run(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b'`').count()
}

/// Parse a label from brackets: `[label]`
///
/// Nested brackets must balance; backslash-escaped brackets are not counted.
/// Returns (label, `bytes_consumed`).
fn parse_brackets(s: &str) -> Option<(&str, usize)> {
    if !s.starts_with('[') {
        return None;
    }

    let mut depth = 0usize;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..i], i + 1));
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse parameters from braces: `{params}`
///
/// Braces inside double-quoted values do not count towards nesting.
/// Returns (params without braces, `bytes_consumed`).
fn parse_braces(s: &str) -> Option<(&str, usize)> {
    if !s.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_quotes = false;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '{' if !in_quotes => depth += 1,
            '}' if !in_quotes => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..i], i + 1));
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn find(line: &str) -> (String, String, String, usize, usize) {
        let (directive, start, end) = find_directive(line).unwrap();
        (
            directive.name,
            directive.args.label,
            directive.args.params,
            start,
            end,
        )
    }

    #[test]
    fn test_color_directive() {
        let (name, label, params, start, end) = find("This has :color[colored text]{#ff0000}.");
        assert_eq!(name, "color");
        assert_eq!(label, "colored text");
        assert_eq!(params, "#ff0000");
        assert_eq!(start, 9);
        assert_eq!(end, 38);
    }

    #[test]
    fn test_button_directive_with_quoted_params() {
        let line = r#":button[Go]{url="https://example.com" shape="pill"}"#;
        let (directive, start, end) = find_directive(line).unwrap();
        assert_eq!(directive.name, "button");
        assert_eq!(directive.args.get("url"), Some("https://example.com"));
        assert_eq!(start, 0);
        assert_eq!(end, line.len());
    }

    #[test]
    fn test_empty_params() {
        let (name, label, params, _, _) = find(":button[Simple Button]{}");
        assert_eq!(name, "button");
        assert_eq!(label, "Simple Button");
        assert_eq!(params, "");
    }

    #[test]
    fn test_missing_braces_is_not_directive() {
        assert!(find_directive(":color[text]").is_none());
        assert!(find_directive(":color[text] {red}").is_none());
        assert!(find_directive(":color[text]{red").is_none());
    }

    #[test]
    fn test_unclosed_label_is_not_directive() {
        assert!(find_directive(":color[text{red}").is_none());
    }

    #[test]
    fn test_empty_name_is_not_directive() {
        assert!(find_directive(":[text]{red}").is_none());
        assert!(find_directive("Note: nothing here").is_none());
    }

    #[test]
    fn test_earlier_colon_does_not_hide_directive() {
        let (name, label, _, start, _) = find("Time: 10:30 :color[late]{red}");
        assert_eq!(name, "color");
        assert_eq!(label, "late");
        assert_eq!(start, 12);
    }

    #[test]
    fn test_nested_brackets_in_label() {
        let (_, label, params, _, _) = find(":button[see [docs](https://d.io)]{url=/x}");
        assert_eq!(label, "see [docs](https://d.io)");
        assert_eq!(params, "url=/x");
    }

    #[test]
    fn test_nested_directive_in_label() {
        let (name, label, params, _, _) = find(":button[:color[hot]{red} deal]{url=/x}");
        assert_eq!(name, "button");
        assert_eq!(label, ":color[hot]{red} deal");
        assert_eq!(params, "url=/x");
    }

    #[test]
    fn test_quoted_brace_in_params() {
        let (_, _, params, _, _) = find(r#":button[X]{url="/a}b"}"#);
        assert_eq!(params, r#"url="/a}b""#);
    }

    #[test]
    fn test_code_span_skipped() {
        assert!(find_directive("use `:color[x]{red}` literally").is_none());
        let (_, label, _, _, _) = find("`code` then :color[x]{red}");
        assert_eq!(label, "x");
    }

    #[test]
    fn test_double_backtick_span_skipped() {
        assert!(find_directive("``a ` :color[x]{red}``").is_none());
    }

    #[test]
    fn test_unclosed_backtick_is_literal() {
        let (_, label, _, _, _) = find("a ` b :color[x]{red}");
        assert_eq!(label, "x");
    }

    #[test]
    fn test_escaped_colon_skipped() {
        assert!(find_directive(r"\:color[x]{red}").is_none());
    }

    #[test]
    fn test_multiple_directives_finds_first() {
        let (_, label, _, start, end) = find(":color[a]{red} and :color[b]{blue}");
        assert_eq!(label, "a");
        assert_eq!(start, 0);
        assert_eq!(end, 14);
    }

    #[test]
    fn test_parse_brackets() {
        assert_eq!(parse_brackets("[hello]"), Some(("hello", 7)));
        assert_eq!(parse_brackets("[hello] rest"), Some(("hello", 7)));
        assert_eq!(
            parse_brackets("[nested [brackets]]"),
            Some(("nested [brackets]", 19))
        );
        assert_eq!(parse_brackets(r"[a \] b]"), Some((r"a \] b", 8)));
        assert_eq!(parse_brackets("no brackets"), None);
        assert_eq!(parse_brackets("[unclosed"), None);
    }

    #[test]
    fn test_parse_braces() {
        assert_eq!(parse_braces("{#fff}"), Some(("#fff", 6)));
        assert_eq!(parse_braces("{a=b} rest"), Some(("a=b", 5)));
        assert_eq!(parse_braces("no braces"), None);
        assert_eq!(parse_braces("{unclosed"), None);
    }

    #[test]
    fn test_is_name_char() {
        assert!("color".chars().all(is_name_char));
        assert!("my-directive_2".chars().all(is_name_char));
        assert!(!is_name_char('@'));
        assert!(!is_name_char(' '));
    }
}
