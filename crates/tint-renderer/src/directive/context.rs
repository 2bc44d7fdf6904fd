//! Directive processing context.

use crate::state::escape_html;

/// Callback rendering a directive label to inline HTML.
pub type RenderLabelFn<'a> = dyn Fn(&str) -> String + 'a;

/// Context provided to directive handlers.
///
/// Created by [`DirectiveProcessor`](super::DirectiveProcessor) for each
/// directive. Gives handlers the source line and a way to render their label
/// through the same markdown pipeline that is rendering the document.
///
/// # Example
///
/// ```
/// use tint_renderer::directive::DirectiveContext;
///
/// let bold = |label: &str| format!("<b>{label}</b>");
/// let ctx = DirectiveContext::new(3, &bold);
/// assert_eq!(ctx.line, 3);
/// assert_eq!(ctx.render_label("hi"), "<b>hi</b>");
/// ```
pub struct DirectiveContext<'a> {
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    render_label: &'a RenderLabelFn<'a>,
}

impl<'a> DirectiveContext<'a> {
    #[must_use]
    pub fn new(line: usize, render_label: &'a RenderLabelFn<'a>) -> Self {
        Self { line, render_label }
    }

    /// Context whose labels render as escaped plain text.
    #[must_use]
    pub fn plain(line: usize) -> DirectiveContext<'static> {
        DirectiveContext {
            line,
            render_label: &escape_label,
        }
    }

    /// Render a label's inline markdown to HTML.
    #[must_use]
    pub fn render_label(&self, label: &str) -> String {
        (self.render_label)(label)
    }
}

/// Label renderer used when no markdown pipeline is attached.
pub(crate) fn escape_label(label: &str) -> String {
    escape_html(label)
}
