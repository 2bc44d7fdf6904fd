//! Markdown to HTML renderer for the tint directive dialect.
//!
//! The dialect is CommonMark/GFM extended with two inline directives:
//!
//! ```text
//! :color[label]{#hex|name}
//! :button[label]{url=<url> shape=<pill|rounded|rect> color=<preset>}
//! ```
//!
//! # Architecture
//!
//! - [`directive`]: directive syntax, attribute parsing and the
//!   placeholder-based processor that runs around pulldown-cmark
//! - [`ColorDirective`] and [`ButtonDirective`]: the two built-in handlers
//! - [`MarkdownRenderer`]: HTML output for pulldown-cmark events
//! - [`Sanitizer`]: ammonia allow-list that keeps directive attributes
//! - [`Pipeline`]: ties it together behind a never-failing `render`
//!
//! # Example
//!
//! ```
//! use tint_renderer::Pipeline;
//!
//! let pipeline = Pipeline::new();
//! let result = pipeline.render("Press :button[**Go**]{url=/start shape=rect}");
//! assert!(result.html.contains(r#"class="button-directive shape-rect color-blue""#));
//! assert!(result.html.contains("<strong>Go</strong>"));
//! ```

mod button;
mod color;
pub mod directive;
mod error;
pub mod grammar;
mod html;
mod pipeline;
mod renderer;
mod sanitize;
mod state;
mod util;

pub use button::ButtonDirective;
pub use color::ColorDirective;
pub use directive::parse_attributes;
pub use error::RenderError;
pub use pipeline::{
    DEFAULT_FALLBACK_HTML, DEFAULT_MAX_NESTING_DEPTH, Pipeline, RenderOptions, RenderResult,
    render,
};
pub use renderer::MarkdownRenderer;
pub use sanitize::{DIRECTIVE_ATTRIBUTES, DIRECTIVE_TAGS, Sanitizer};
pub use state::escape_html;
