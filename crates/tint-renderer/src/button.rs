//! Button directive: `:button[label]{url=.. shape=.. color=..}`.

use crate::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
use crate::grammar::{BUTTON_CLASS, BUTTON_DATA_TYPE, BUTTON_DIRECTIVE, ButtonSpec};
use crate::state::escape_html;

/// Renders `:button[label]{...}` as a styled link.
///
/// Shape and color are written both as `shape-*`/`color-*` classes and as
/// `data-shape`/`data-color` attributes. Missing values take the defaults
/// `url=#`, `shape=pill`, `color=blue`.
///
/// # Example
///
/// ```
/// use tint_renderer::ButtonDirective;
/// use tint_renderer::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
///
/// let output = ButtonDirective.process(DirectiveArgs::parse("Go", ""), &DirectiveContext::plain(1));
/// assert_eq!(
///     output,
///     DirectiveOutput::html(concat!(
///         r##"<a class="button-directive shape-pill color-blue" href="#" "##,
///         r#"data-shape="pill" data-color="blue" data-type="button-directive">Go</a>"#,
///     ))
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonDirective;

impl InlineDirective for ButtonDirective {
    fn name(&self) -> &str {
        BUTTON_DIRECTIVE
    }

    fn process(&self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
        let button = ButtonSpec::from_attributes(args.label, &args.attrs);
        let label = ctx.render_label(&button.label);
        let (shape, color) = (button.shape, button.color);

        DirectiveOutput::html(format!(
            concat!(
                r#"<a class="{BUTTON_CLASS} shape-{shape} color-{color}" href="{href}" "#,
                r#"data-shape="{shape}" data-color="{color}" data-type="{BUTTON_DATA_TYPE}">{label}</a>"#,
            ),
            BUTTON_CLASS = BUTTON_CLASS,
            BUTTON_DATA_TYPE = BUTTON_DATA_TYPE,
            shape = shape,
            color = color,
            href = escape_html(&button.url),
            label = label,
        ))
    }
}
