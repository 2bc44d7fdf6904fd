//! Tree walk that applies [`RULES`](crate::rules::RULES).

use crate::error::SerializeError;
use crate::escape::escape_markdown;
use crate::options::SerializerOptions;
use crate::parser::parse_html;
use crate::rules::{NodeContext, find_rule};
use crate::tree::{Element, Node};
use crate::whitespace::{collapse_whitespace, is_blank, is_block};

/// HTML to markdown converter.
///
/// # Example
///
/// ```
/// use tint_serializer::Serializer;
///
/// let html = r#"<p>Say <span class="text-color-directive" style="color: #ff0000">hi</span></p>"#;
/// let markdown = Serializer::new().serialize(html).unwrap();
/// assert_eq!(markdown, "Say :color[hi]{#ff0000}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    options: SerializerOptions,
}

impl Serializer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(mut self, options: SerializerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Parse an HTML string and convert its body.
    pub fn serialize(&self, html: &str) -> Result<String, SerializeError> {
        let mut body = parse_html(html)?;
        collapse_whitespace(&mut body);
        Ok(self.convert(&body))
    }

    /// Convert the children of an existing tree root.
    pub fn serialize_element(&self, root: &Element) -> String {
        let mut root = root.clone();
        collapse_whitespace(&mut root);
        self.convert(&root)
    }

    fn convert(&self, root: &Element) -> String {
        let output = self.process(root, None, false);
        output
            .trim_start_matches(['\t', '\r', '\n'])
            .trim_end()
            .to_owned()
    }

    fn process(&self, parent: &Element, grandparent: Option<&Element>, in_code: bool) -> String {
        let element_count = parent.element_children().count();
        let mut output = String::new();
        let mut index = 0;

        for (position, child) in parent.children.iter().enumerate() {
            let replacement = match child {
                Node::Text(text) if in_code => text.clone(),
                Node::Text(text) => escape_markdown(text),
                Node::Element(element) => {
                    let ctx = NodeContext {
                        parent,
                        grandparent,
                        index,
                        element_count,
                        position,
                    };
                    index += 1;
                    self.replacement_for(element, &ctx, in_code)
                }
            };
            join(&mut output, &replacement);
        }
        output
    }

    fn replacement_for(&self, element: &Element, ctx: &NodeContext<'_>, in_code: bool) -> String {
        let block = is_block(&element.tag);
        if is_blank(element) {
            if block {
                return "\n\n".to_owned();
            }
            let text = element.text_content();
            return if text.is_empty() { text } else { " ".to_owned() };
        }

        let content = self.process(element, Some(ctx.parent), in_code || element.is("code"));
        let Some(rule) = find_rule(element, ctx) else {
            tracing::debug!(tag = %element.tag, "No rule for element, keeping its content");
            return if block {
                format!("\n\n{content}\n\n")
            } else {
                content
            };
        };
        tracing::trace!(tag = %element.tag, rule = rule.name, "Applying rule");

        if block {
            return rule.apply(&content, element, ctx, &self.options);
        }

        // Whitespace at the edges of inline content moves outside the markers.
        let trimmed = content.trim_start_matches(is_html_space);
        let leading = &content[..content.len() - trimmed.len()];
        let inner = trimmed.trim_end_matches(is_html_space);
        let trailing = &trimmed[inner.len()..];
        format!(
            "{leading}{}{trailing}",
            rule.apply(inner, element, ctx, &self.options)
        )
    }
}

fn is_html_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Append a replacement, merging the newlines on both sides of the seam
/// into at most one blank line.
fn join(output: &mut String, replacement: &str) {
    let kept = output.trim_end_matches('\n').len();
    let trailing = output.len() - kept;
    let body = replacement.trim_start_matches('\n');
    let leading = replacement.len() - body.len();

    output.truncate(kept);
    let separator = trailing.max(leading).min(2);
    output.push_str(&"\n\n"[..separator]);
    output.push_str(body);
}

/// Convert HTML to markdown with default options.
///
/// ```
/// let markdown = tint_serializer::serialize(concat!(
///     r##"<p><a class="button-directive shape-rect color-red" href="https://x.com" "##,
///     r#"data-shape="rect" data-color="red" data-type="button-directive">Go</a></p>"#,
/// ))
/// .unwrap();
/// assert_eq!(markdown, ":button[Go]{url=https://x.com shape=rect color=red}");
/// ```
pub fn serialize(html: &str) -> Result<String, SerializeError> {
    Serializer::new().serialize(html)
}
