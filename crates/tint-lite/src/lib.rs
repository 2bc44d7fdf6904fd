//! Standalone regex renderer for the tint directive dialect.
//!
//! A small alternative to `tint-renderer` for hosts that cannot carry a
//! full markdown parser. It understands bold, italic, strikethrough,
//! links, `#` headings, `-`/`*` lists, line breaks and both directives.
//! Buttons are styled inline since no stylesheet is assumed:
//!
//! ```
//! assert_eq!(
//!     tint_lite::render(":color[Colored text]{#ff0000}"),
//!     r#"<span style="color:#ff0000">Colored text</span>"#
//! );
//! assert_eq!(
//!     tint_lite::render("# Heading 1\n\n\nNext line"),
//!     "<h1>Heading 1</h1><br>Next line"
//! );
//! ```
//!
//! Output is not sanitized. Passes run in a fixed order: buttons, colors,
//! headings, lists, inline markup, line breaks.

mod button;
mod passes;

pub use button::{BASE_STYLE, ButtonParams, color_style, shape_style};

/// Render markdown to HTML.
pub fn render(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }
    let html = markdown.replace(passes::HEADING_MARKER, "");
    let html = passes::buttons(&html);
    let html = passes::colors(&html);
    let html = passes::headings(&html);
    let html = passes::lists(&html);
    let html = passes::inline(&html);
    passes::line_breaks(&html)
}
