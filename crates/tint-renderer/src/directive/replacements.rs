//! Placeholder substitution for post-processing.
//!
//! Directive HTML is not fed through pulldown-cmark. The processor swaps each
//! directive for a numbered placeholder element that the markdown engine
//! passes through as inline HTML, and [`Replacements::apply`] splices the real
//! HTML back in a single pass over the rendered document.
//!
//! Inside code (indented blocks, code spans that the line scanner cannot see)
//! the engine escapes the placeholder instead. Those escaped placeholders are
//! turned back into the directive's escaped source text.

use crate::state::escape_html;

const PLACEHOLDER_PREFIX: &str = r#"<tint-directive data-index=""#;
const PLACEHOLDER_SUFFIX: &str = r#""></tint-directive>"#;

/// Placeholder as it appears in escaped code text, with and without the
/// quotes escaped.
const ESCAPED_PLACEHOLDERS: [(&str, &str); 2] = [
    (
        "&lt;tint-directive data-index=&quot;",
        "&quot;&gt;&lt;/tint-directive&gt;",
    ),
    (
        r#"&lt;tint-directive data-index=""#,
        r#""&gt;&lt;/tint-directive&gt;"#,
    ),
];

#[derive(Debug)]
struct Replacement {
    html: String,
    source: String,
}

/// Collects directive HTML keyed by placeholder index.
///
/// # Example
///
/// ```
/// use tint_renderer::directive::Replacements;
///
/// let mut replacements = Replacements::new();
/// let placeholder = replacements.push("<b>bold</b>", ":b[bold]{}");
/// let mut html = format!("<p>{placeholder}</p>");
/// replacements.apply(&mut html);
///
/// assert_eq!(html, "<p><b>bold</b></p>");
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    items: Vec<Replacement>,
}

impl Replacements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register directive HTML and the source it replaces, returning the
    /// placeholder standing in for it.
    ///
    /// The placeholder is an empty open/close tag pair so that it is always
    /// parsed as inline HTML, never as an HTML block.
    pub fn push(&mut self, html: impl Into<String>, source: impl Into<String>) -> String {
        let index = self.items.len();
        self.items.push(Replacement {
            html: html.into(),
            source: source.into(),
        });
        format!("{PLACEHOLDER_PREFIX}{index}{PLACEHOLDER_SUFFIX}")
    }

    /// Substitute every known placeholder in `html`.
    ///
    /// Raw placeholders become directive HTML; escaped ones become the
    /// escaped directive source. Placeholder-shaped text with an unknown
    /// index is left untouched.
    pub fn apply(self, html: &mut String) {
        if self.items.is_empty() {
            return;
        }

        substitute(html, PLACEHOLDER_PREFIX, PLACEHOLDER_SUFFIX, |index| {
            self.items.get(index).map(|item| item.html.clone())
        });
        for (prefix, suffix) in ESCAPED_PLACEHOLDERS {
            substitute(html, prefix, suffix, |index| {
                self.items.get(index).map(|item| escape_html(&item.source))
            });
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Replace `prefix N suffix` runs in one pass; inserted text is not rescanned.
fn substitute(
    html: &mut String,
    prefix: &str,
    suffix: &str,
    resolve: impl Fn(usize) -> Option<String>,
) {
    if !html.contains(prefix) {
        return;
    }

    let mut result = String::with_capacity(html.len());
    let mut rest = html.as_str();

    while let Some(start) = rest.find(prefix) {
        result.push_str(&rest[..start]);
        let after_prefix = &rest[start + prefix.len()..];

        let resolved = after_prefix.find(suffix).and_then(|end| {
            let index: usize = after_prefix[..end].parse().ok()?;
            Some((resolve(index)?, prefix.len() + end + suffix.len()))
        });

        match resolved {
            Some((text, consumed)) => {
                result.push_str(&text);
                rest = &rest[start + consumed..];
            }
            None => {
                result.push_str(prefix);
                rest = after_prefix;
            }
        }
    }

    result.push_str(rest);
    *html = result;
}
