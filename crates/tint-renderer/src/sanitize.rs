//! HTML sanitizing with the directive allow-list.
//!
//! Directive output depends on tags and attributes that a default ammonia
//! policy strips (`class`, `style`, `data-*`). They are added on top of the
//! default policy here; configuration can only extend the list.

use ammonia::Builder;

/// Tags introduced by directives and GFM task lists.
pub const DIRECTIVE_TAGS: [&str; 2] = ["span", "input"];

/// Attributes directives carry, allowed on every tag.
pub const DIRECTIVE_ATTRIBUTES: [&str; 5] =
    ["class", "style", "data-type", "data-shape", "data-color"];

const INPUT_ATTRIBUTES: [&str; 3] = ["type", "checked", "disabled"];

/// Allow-list sanitizer for rendered HTML.
///
/// # Example
///
/// ```
/// use tint_renderer::Sanitizer;
///
/// let html = r#"<span class="text-color-directive" style="color: red" data-type="color-directive" onclick="x()">hi</span><script>alert(1)</script>"#;
/// assert_eq!(
///     Sanitizer::new().clean(html),
///     r#"<span class="text-color-directive" style="color: red" data-type="color-directive">hi</span>"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    extra_tags: Vec<String>,
    extra_attributes: Vec<String>,
}

impl Sanitizer {
    /// Create a sanitizer with the built-in allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow additional tags.
    #[must_use]
    pub fn with_extra_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Allow additional attributes on every tag.
    #[must_use]
    pub fn with_extra_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_attributes
            .extend(attributes.into_iter().map(Into::into));
        self
    }

    /// Sanitize an HTML fragment.
    #[must_use]
    pub fn clean(&self, html: &str) -> String {
        let mut builder = Builder::default();
        builder
            .link_rel(None)
            .add_tags(DIRECTIVE_TAGS)
            .add_tags(self.extra_tags.iter().map(String::as_str))
            .add_generic_attributes(DIRECTIVE_ATTRIBUTES)
            .add_generic_attributes(self.extra_attributes.iter().map(String::as_str))
            .add_tag_attributes("input", INPUT_ATTRIBUTES);
        builder.clean(html).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BUTTON: &str = concat!(
        r#"<a class="button-directive shape-rect color-red" href="https://x.com" "#,
        r#"data-shape="rect" data-color="red" data-type="button-directive">Go</a>"#
    );

    #[test]
    fn test_button_survives() {
        assert_eq!(Sanitizer::new().clean(BUTTON), BUTTON);
    }

    #[test]
    fn test_color_span_survives() {
        let html = r#"<span class="text-color-directive" style="color: #ff0000" data-type="color-directive"><strong>x</strong></span>"#;
        assert_eq!(Sanitizer::new().clean(html), html);
    }

    #[test]
    fn test_script_and_handlers_removed() {
        let html = r#"<p onclick="steal()">a<script>alert(1)</script></p>"#;
        assert_eq!(Sanitizer::new().clean(html), "<p>a</p>");
    }

    #[test]
    fn test_javascript_href_removed() {
        let html = r#"<a href="javascript:alert(1)">x</a>"#;
        assert_eq!(Sanitizer::new().clean(html), "<a>x</a>");
    }

    #[test]
    fn test_fragment_href_kept() {
        let html = r##"<a href="#">x</a>"##;
        assert_eq!(Sanitizer::new().clean(html), html);
    }

    #[test]
    fn test_task_list_checkbox_kept() {
        let html = r#"<li><input type="checkbox" checked disabled> Done</li>"#;
        assert_eq!(
            Sanitizer::new().clean(html),
            r#"<li><input type="checkbox" checked="" disabled=""> Done</li>"#
        );
    }

    #[test]
    fn test_code_language_class_kept() {
        let html = r#"<pre><code class="language-rust">fn x() {}</code></pre>"#;
        assert_eq!(Sanitizer::new().clean(html), html);
    }

    #[test]
    fn test_unknown_data_attribute_removed() {
        let html = r#"<span data-secret="1">x</span>"#;
        assert_eq!(Sanitizer::new().clean(html), "<span>x</span>");
    }

    #[test]
    fn test_extra_allow_list() {
        let html = r#"<tint-note data-note="n">x</tint-note>"#;
        assert_eq!(Sanitizer::new().clean(html), "x");

        let sanitizer = Sanitizer::new()
            .with_extra_tags(["tint-note"])
            .with_extra_attributes(vec!["data-note".to_owned()]);
        assert_eq!(sanitizer.clean(html), html);
    }
}
