//! Pluggable inline directives: `:name[label]{params}`.
//!
//! # Architecture
//!
//! Directives are handled in two phases around pulldown-cmark:
//!
//! 1. **Preprocessing** ([`DirectiveProcessor::process`]): each recognised
//!    directive is handed to its [`InlineDirective`] handler and replaced by a
//!    placeholder element that the markdown engine passes through as inline
//!    HTML.
//!
//! 2. **Post-processing** ([`DirectiveProcessor::post_process`]): placeholders
//!    are swapped for the handler HTML using the [`Replacements`] collector in
//!    a single pass.
//!
//! Handlers live in a [`DirectiveSet`] that is built once and shared; all
//! per-document state lives in the processor.
//!
//! # Example
//!
//! ```
//! use tint_renderer::directive::{
//!     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveProcessor, DirectiveSet,
//!     InlineDirective,
//! };
//!
//! struct KbdDirective;
//!
//! impl InlineDirective for KbdDirective {
//!     fn name(&self) -> &str { "kbd" }
//!
//!     fn process(&self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
//!         DirectiveOutput::html(format!("<kbd>{}</kbd>", ctx.render_label(&args.label)))
//!     }
//! }
//!
//! let set = DirectiveSet::new().with_inline(KbdDirective);
//! let mut processor = DirectiveProcessor::new(&set);
//!
//! let mut output = processor.process("Press :kbd[Ctrl+C]{} to copy.");
//! processor.post_process(&mut output);
//! assert!(output.contains("<kbd>Ctrl+C</kbd>"));
//! ```

mod args;
mod context;
mod fence;
mod inline;
mod output;
mod parser;
mod processor;
mod replacements;

pub use args::{DirectiveArgs, parse_attributes};
pub use context::{DirectiveContext, RenderLabelFn};
pub use inline::InlineDirective;
pub use output::DirectiveOutput;
pub use processor::{DirectiveProcessor, DirectiveSet};
pub use replacements::Replacements;
