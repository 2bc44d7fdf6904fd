//! Shared helpers for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Prepare a directive label for inline rendering.
///
/// A label is rendered as its own one-line document, so markers that would
/// open a block there (headings, quotes, list items, thematic breaks, fences,
/// link reference definitions) are backslash-escaped. Surrounding whitespace
/// is trimmed so indentation never turns into a code block.
pub(crate) fn inline_label_source(label: &str) -> String {
    let label = label.trim();
    let bytes = label.as_bytes();
    let Some(&first) = bytes.first() else {
        return String::new();
    };

    let followed_by_space = |idx: usize| bytes.get(idx).is_none_or(|b| *b == b' ' || *b == b'\t');

    let escape_first = match first {
        b'#' => {
            let run = bytes.iter().take_while(|&&b| b == b'#').count();
            run <= 6 && followed_by_space(run)
        }
        b'>' => true,
        b'-' | b'+' | b'*' => followed_by_space(1) || is_thematic_break(label),
        b'_' => is_thematic_break(label),
        b'`' | b'~' => label.starts_with("```") || label.starts_with("~~~"),
        b'[' => label.contains("]:"),
        _ => false,
    };

    if escape_first {
        return format!("\\{label}");
    }

    // Ordered list marker: up to nine digits, then `.` or `)`.
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if (1..=9).contains(&digits)
        && matches!(bytes.get(digits), Some(b'.' | b')'))
        && followed_by_space(digits + 1)
    {
        return format!("{}\\{}", &label[..digits], &label[digits..]);
    }

    label.to_owned()
}

fn is_thematic_break(line: &str) -> bool {
    let mut chars = line.chars().filter(|c| !c.is_whitespace());
    let Some(marker) = chars.next() else {
        return false;
    };
    let mut count = 1;
    for c in chars {
        if c != marker {
            return false;
        }
        count += 1;
    }
    matches!(marker, '-' | '*' | '_') && count >= 3
}

/// Strip the single paragraph wrapper from rendered label HTML.
pub(crate) fn strip_paragraph(html: &str) -> &str {
    let trimmed = html.trim();
    trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
        .filter(|inner| !inner.contains("<p>"))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_level_to_num() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }

    #[test]
    fn test_plain_label_unchanged() {
        assert_eq!(inline_label_source("**bold** text"), "**bold** text");
        assert_eq!(inline_label_source("#hashtag"), "#hashtag");
        assert_eq!(inline_label_source("-5 degrees"), "-5 degrees");
        assert_eq!(inline_label_source("2024 was good"), "2024 was good");
        assert_eq!(inline_label_source(""), "");
    }

    #[test]
    fn test_label_trimmed() {
        assert_eq!(inline_label_source("    indented"), "indented");
    }

    #[test]
    fn test_block_markers_escaped() {
        assert_eq!(inline_label_source("# Title"), r"\# Title");
        assert_eq!(inline_label_source("> quote"), r"\> quote");
        assert_eq!(inline_label_source("- item"), r"\- item");
        assert_eq!(inline_label_source("* item"), r"\* item");
        assert_eq!(inline_label_source("---"), r"\---");
        assert_eq!(inline_label_source("_ _ _"), r"\_ _ _");
        assert_eq!(inline_label_source("```js"), r"\```js");
        assert_eq!(inline_label_source("[a]: /b"), r"\[a]: /b");
    }

    #[test]
    fn test_ordered_marker_escaped() {
        assert_eq!(inline_label_source("1. First"), r"1\. First");
        assert_eq!(inline_label_source("12) Twelfth"), r"12\) Twelfth");
        assert_eq!(inline_label_source("3.14"), "3.14");
    }

    #[test]
    fn test_strip_paragraph() {
        assert_eq!(strip_paragraph("<p><strong>x</strong></p>"), "<strong>x</strong>");
        assert_eq!(strip_paragraph("<p>a</p>\n"), "a");
        assert_eq!(strip_paragraph(""), "");
        assert_eq!(strip_paragraph("<div>x</div>"), "<div>x</div>");
        assert_eq!(strip_paragraph("<p>a</p><p>b</p>"), "<p>a</p><p>b</p>");
    }
}
