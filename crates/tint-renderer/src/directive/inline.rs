//! Inline directive trait.

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput};

/// Handler for inline directives: `:name[label]{params}`
///
/// Handlers are registered once in a [`DirectiveSet`](super::DirectiveSet)
/// and shared by every render call, so they take `&self` and must be
/// `Send + Sync`. Per-document state belongs in the
/// [`DirectiveProcessor`](super::DirectiveProcessor), not in the handler.
///
/// # Example
///
/// ```
/// use tint_renderer::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
///
/// struct KbdDirective;
///
/// impl InlineDirective for KbdDirective {
///     fn name(&self) -> &str { "kbd" }
///
///     fn process(&self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
///         DirectiveOutput::html(format!("<kbd>{}</kbd>", ctx.render_label(&args.label)))
///     }
/// }
/// ```
pub trait InlineDirective: Send + Sync {
    /// Directive name matched against `:name[...]`.
    fn name(&self) -> &str;

    /// Process the directive.
    fn process(&self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput;
}
