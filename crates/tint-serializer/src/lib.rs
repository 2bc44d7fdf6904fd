//! HTML to markdown serializer for the tint directive dialect.
//!
//! The reverse of `tint-renderer`: editor HTML goes in, directive markdown
//! comes out. Directive elements are recognized by the classes and data
//! attributes the renderer writes:
//!
//! - `<a class="button-directive ..." data-shape data-color>` becomes
//!   `:button[label]{url=.. shape=.. color=..}`
//! - `<span style="color: ..">` becomes `:color[label]{value}`
//!
//! Everything else follows CommonMark with GFM tables, strikethrough and
//! task lists. Text is escaped without touching `[ ] { }`, so directive
//! syntax typed as text stays directive syntax.
//!
//! ```
//! let markdown = tint_serializer::serialize("<h2>Hi</h2><p>*not* emphasis</p>").unwrap();
//! assert_eq!(markdown, "## Hi\n\n\\*not\\* emphasis");
//! ```

mod error;
mod escape;
mod options;
mod parser;
mod rules;
mod serializer;
mod tree;
mod whitespace;

pub use error::SerializeError;
pub use escape::escape_markdown;
pub use options::SerializerOptions;
pub use parser::parse_html;
pub use rules::normalize_color;
pub use serializer::{Serializer, serialize};
pub use tree::{Element, Node};
