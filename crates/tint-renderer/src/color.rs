//! Text color directive: `:color[label]{#hex|name}`.

use crate::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
use crate::grammar::{COLOR_CLASS, COLOR_DATA_TYPE, COLOR_DIRECTIVE, is_valid_color};

/// Renders `:color[label]{value}` as a colored span.
///
/// The whole brace content is the color value. Values that are neither a
/// `#`-prefixed hex literal (3-8 digits) nor a bare color name are rejected and
/// the source stays literal.
///
/// # Example
///
/// ```
/// use tint_renderer::ColorDirective;
/// use tint_renderer::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
///
/// let output = ColorDirective.process(
///     DirectiveArgs::parse("hot", "#ff0000"),
///     &DirectiveContext::plain(1),
/// );
/// assert_eq!(
///     output,
///     DirectiveOutput::html(
///         r#"<span class="text-color-directive" style="color: #ff0000" data-type="color-directive">hot</span>"#
///     )
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorDirective;

impl InlineDirective for ColorDirective {
    fn name(&self) -> &str {
        COLOR_DIRECTIVE
    }

    fn process(&self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
        let color = args.params.trim();
        if !is_valid_color(color) {
            return DirectiveOutput::invalid(format!("invalid color value `{color}`"));
        }

        let label = ctx.render_label(&args.label);
        DirectiveOutput::html(format!(
            r#"<span class="{COLOR_CLASS}" style="color: {color}" data-type="{COLOR_DATA_TYPE}">{label}</span>"#
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn process(label: &str, params: &str) -> DirectiveOutput {
        ColorDirective.process(
            DirectiveArgs::parse(label, params),
            &DirectiveContext::plain(1),
        )
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(
            process("colored text", "#ff0000"),
            DirectiveOutput::html(
                r#"<span class="text-color-directive" style="color: #ff0000" data-type="color-directive">colored text</span>"#
            )
        );
    }

    #[test]
    fn test_named_color() {
        let DirectiveOutput::Html(html) = process("x", "teal") else {
            panic!("expected html");
        };
        assert!(html.contains(r#"style="color: teal""#));
    }

    #[test]
    fn test_params_trimmed() {
        let DirectiveOutput::Html(html) = process("x", " #abc ") else {
            panic!("expected html");
        };
        assert!(html.contains(r#"style="color: #abc""#));
    }

    #[test]
    fn test_invalid_color_rejected() {
        assert_eq!(
            process("x", "red;background:url(x)"),
            DirectiveOutput::invalid("invalid color value `red;background:url(x)`")
        );
        assert!(matches!(process("x", "#12"), DirectiveOutput::Invalid(_)));
        assert!(matches!(process("x", ""), DirectiveOutput::Invalid(_)));
        assert!(matches!(process("x", "rgb(1,2,3)"), DirectiveOutput::Invalid(_)));
    }

    #[test]
    fn test_label_rendered_through_context() {
        let render = |label: &str| format!("<strong>{label}</strong>");
        let ctx = DirectiveContext::new(1, &render);
        let output = ColorDirective.process(DirectiveArgs::parse("b", "red"), &ctx);
        let DirectiveOutput::Html(html) = output else {
            panic!("expected html");
        };
        assert!(html.contains("><strong>b</strong></span>"));
    }
}
