//! The regex passes, in the order [`render`](crate::render) runs them.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::button::ButtonParams;

/// Inserted after each heading so the line-break pass can tell headings
/// apart from ordinary text.
pub(crate) const HEADING_MARKER: char = '\u{1e}';

static BUTTON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":button\[(.*?)\]\{(.*?)\}").unwrap());
static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":color\[(.*?)\]\{(.*?)\}").unwrap());

/// Heading patterns from `h6` down to `h1`, so longer markers win.
static HEADING_RES: LazyLock<Vec<(usize, Regex)>> = LazyLock::new(|| {
    (1..=6)
        .rev()
        .map(|level| {
            let re = Regex::new(&format!(r"(?m)^#{{{level}}}\s+(.+)$")).unwrap();
            (level, re)
        })
        .collect()
});

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*]\s+(.+)$").unwrap());

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static STRIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.*?)~~").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

static HEADING_BREAKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"{HEADING_MARKER}\n+")).unwrap());
static PARAGRAPH_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n+").unwrap());

pub(crate) fn buttons(text: &str) -> Cow<'_, str> {
    BUTTON_RE.replace_all(text, |caps: &Captures| {
        let params = ButtonParams::parse(&caps[2]);
        format!(
            r#"<a href="{}" style="{}">{}</a>"#,
            params.url.replace('"', "&quot;"),
            params.style(),
            &caps[1]
        )
    })
}

pub(crate) fn colors(text: &str) -> Cow<'_, str> {
    COLOR_RE.replace_all(text, r#"<span style="color:${2}">${1}</span>"#)
}

pub(crate) fn headings(text: &str) -> String {
    HEADING_RES
        .iter()
        .fold(text.to_owned(), |acc, (level, re)| {
            re.replace_all(&acc, format!("<h{level}>${{1}}</h{level}>{HEADING_MARKER}"))
                .into_owned()
        })
}

/// Turn list lines into `<li>` and wrap each contiguous run in one `<ul>`.
pub(crate) fn lists(text: &str) -> String {
    let text = LIST_ITEM_RE.replace_all(text, "<li>${1}</li>");

    let mut lines = Vec::new();
    let mut in_list = false;
    for line in text.split('\n') {
        let item = line.starts_with("<li>");
        if item && !in_list {
            lines.push("<ul>");
        } else if !item && in_list {
            lines.push("</ul>");
        }
        in_list = item;
        lines.push(line);
    }
    if in_list {
        lines.push("</ul>");
    }

    lines
        .join("\n")
        .replace("\n</ul>", "</ul>")
        .replace("<ul>\n", "<ul>")
        .replace("</li>\n<li>", "</li><li>")
}

pub(crate) fn inline(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "<strong>${1}</strong>");
    let text = ITALIC_RE.replace_all(&text, "<em>${1}</em>");
    let text = STRIKE_RE.replace_all(&text, "<del>${1}</del>");
    LINK_RE
        .replace_all(&text, r#"<a href="${2}">${1}</a>"#)
        .into_owned()
}

/// Resolve newlines into `<br>` tags.
///
/// After a heading the first two newlines are swallowed and every extra
/// one becomes a `<br>`. Elsewhere a single newline is one `<br>` and any
/// longer run is exactly two.
pub(crate) fn line_breaks(text: &str) -> String {
    let text = HEADING_BREAKS_RE.replace_all(text, |caps: &Captures| {
        let newlines = caps[0].matches('\n').count();
        "<br>".repeat(newlines.saturating_sub(2))
    });
    let text = text.replace(HEADING_MARKER, "");
    PARAGRAPH_BREAK_RE
        .replace_all(&text, "<br><br>")
        .replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_headings_marked() {
        assert_eq!(
            headings("## Two\n# One\n####### seven"),
            "<h2>Two</h2>\u{1e}\n<h1>One</h1>\u{1e}\n####### seven"
        );
    }

    #[test]
    fn test_lists_grouped() {
        assert_eq!(
            lists("- a\n- b\ntext\n* c"),
            "<ul><li>a</li><li>b</li></ul>\ntext\n<ul><li>c</li></ul>"
        );
    }

    #[test]
    fn test_list_swallows_preceding_blank_line() {
        assert_eq!(lists("x\n\n- a"), "x\n<ul><li>a</li></ul>");
    }

    #[test]
    fn test_inline() {
        assert_eq!(
            inline("**b** *i* ~~s~~ [l](/u)"),
            r#"<strong>b</strong> <em>i</em> <del>s</del> <a href="/u">l</a>"#
        );
    }

    #[test]
    fn test_line_breaks_after_heading() {
        let h = "<h1>H</h1>\u{1e}";
        assert_eq!(line_breaks(&format!("{h}\nx")), "<h1>H</h1>x");
        assert_eq!(line_breaks(&format!("{h}\n\nx")), "<h1>H</h1>x");
        assert_eq!(line_breaks(&format!("{h}\n\n\nx")), "<h1>H</h1><br>x");
        assert_eq!(line_breaks(&format!("{h}\n\n\n\n\nx")), "<h1>H</h1><br><br><br>x");
    }

    #[test]
    fn test_line_breaks_elsewhere() {
        assert_eq!(line_breaks("a\nb"), "a<br>b");
        assert_eq!(line_breaks("a\n\nb"), "a<br><br>b");
        assert_eq!(line_breaks("a\n\n\n\nb"), "a<br><br>b");
    }
}
