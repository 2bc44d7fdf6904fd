//! Forward transform: markdown with directives to sanitized HTML.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use crate::button::ButtonDirective;
use crate::color::ColorDirective;
use crate::directive::{DirectiveProcessor, DirectiveSet, InlineDirective};
use crate::error::RenderError;
use crate::renderer::MarkdownRenderer;
use crate::sanitize::Sanitizer;
use crate::state::escape_html;
use crate::util::{inline_label_source, strip_paragraph};

/// HTML returned when rendering fails.
pub const DEFAULT_FALLBACK_HTML: &str = "<p>Error rendering markdown</p>";

/// Default limit for directives nested inside directive labels.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 8;

static DEFAULT_PIPELINE: LazyLock<Pipeline> = LazyLock::new(Pipeline::new);

/// Render markdown with the default pipeline.
///
/// Never fails: engine errors degrade to [`DEFAULT_FALLBACK_HTML`].
///
/// # Example
///
/// ```
/// let html = tint_renderer::render(":color[**bold**]{#ff0000}");
/// assert_eq!(
///     html,
///     r#"<p><span class="text-color-directive" style="color: #ff0000" data-type="color-directive"><strong>bold</strong></span></p>"#
/// );
/// ```
#[must_use]
pub fn render(markdown: &str) -> String {
    DEFAULT_PIPELINE.render(markdown).html
}

/// Options for the forward transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Enable tables, strikethrough and task lists.
    pub gfm: bool,
    /// Render single newlines inside paragraphs as `<br>`.
    pub breaks: bool,
    /// Sanitize the final HTML.
    pub sanitize: bool,
    /// HTML returned when rendering fails.
    pub fallback_html: String,
    /// Maximum depth of directives nested inside directive labels.
    pub max_nesting_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
            sanitize: true,
            fallback_html: DEFAULT_FALLBACK_HTML.to_owned(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Result of rendering markdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Non-fatal problems found while rendering (rejected directives, nesting limit).
    pub warnings: Vec<String>,
}

/// Configured forward transform.
///
/// Built once and shared: rendering takes `&self` and keeps all per-call
/// state on the stack, so one pipeline can serve concurrent callers.
///
/// # Example
///
/// ```
/// use tint_renderer::{Pipeline, RenderOptions};
///
/// let pipeline = Pipeline::new().with_options(RenderOptions {
///     sanitize: false,
///     ..RenderOptions::default()
/// });
/// let result = pipeline.render(":button[Simple Button]{}");
/// assert!(result.html.contains(r#"class="button-directive shape-pill color-blue""#));
/// assert!(result.warnings.is_empty());
/// ```
pub struct Pipeline {
    options: RenderOptions,
    directives: DirectiveSet,
    sanitizer: Sanitizer,
}

impl Pipeline {
    /// Create a pipeline with the color and button directives and default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            directives: DirectiveSet::new()
                .with_inline(ColorDirective)
                .with_inline(ButtonDirective),
            sanitizer: Sanitizer::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Register an additional directive, replacing one with the same name.
    #[must_use]
    pub fn with_directive<D: InlineDirective + 'static>(mut self, directive: D) -> Self {
        self.directives = self.directives.with_inline(directive);
        self
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[must_use]
    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    /// Render markdown, degrading to the fallback HTML on failure.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        match self.try_render(markdown) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Failed to render markdown");
                tracing::warn!(
                    input_len = markdown.len(),
                    "Returning fallback HTML"
                );
                RenderResult {
                    html: self.options.fallback_html.clone(),
                    warnings: vec![e.to_string()],
                }
            }
        }
    }

    /// Render markdown, reporting engine failures as errors.
    pub fn try_render(&self, markdown: &str) -> Result<RenderResult, RenderError> {
        let warnings = RefCell::new(Vec::new());

        let html = panic::catch_unwind(AssertUnwindSafe(|| {
            let html = self.render_document(markdown, 0, &warnings);
            if self.options.sanitize {
                self.sanitizer.clean(&html)
            } else {
                html
            }
        }))
        .map_err(|payload| RenderError::Engine(panic_message(payload.as_ref())))?;

        Ok(RenderResult {
            html,
            warnings: warnings.into_inner(),
        })
    }

    fn render_document(
        &self,
        markdown: &str,
        depth: usize,
        warnings: &RefCell<Vec<String>>,
    ) -> String {
        let render_label = |label: &str| self.render_label(label, depth + 1, warnings);
        let mut processor = DirectiveProcessor::with_label_renderer(&self.directives, &render_label);

        let source = processor.process(markdown);
        let mut html = MarkdownRenderer::new()
            .with_gfm(self.options.gfm)
            .with_breaks(self.options.breaks)
            .render_markdown(&source);
        processor.post_process(&mut html);

        warnings.borrow_mut().extend(processor.into_warnings());
        html
    }

    /// Render a directive label as inline HTML.
    fn render_label(&self, label: &str, depth: usize, warnings: &RefCell<Vec<String>>) -> String {
        if depth > self.options.max_nesting_depth {
            tracing::warn!(
                max_depth = self.options.max_nesting_depth,
                "Directive nesting too deep, rendering label as text"
            );
            warnings.borrow_mut().push(format!(
                "maximum directive nesting depth ({}) exceeded",
                self.options.max_nesting_depth
            ));
            return escape_html(label);
        }

        let source = inline_label_source(label);
        let html = self.render_document(&source, depth, warnings);
        strip_paragraph(&html).to_owned()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("directives", &self.directives)
            .field("sanitizer", &self.sanitizer)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput};
    use pretty_assertions::assert_eq;

    fn unsanitized() -> Pipeline {
        Pipeline::new().with_options(RenderOptions {
            sanitize: false,
            ..RenderOptions::default()
        })
    }

    #[test]
    fn test_color_directive_in_paragraph() {
        assert_eq!(
            render("This has :color[colored text]{#ff0000}."),
            r#"<p>This has <span class="text-color-directive" style="color: #ff0000" data-type="color-directive">colored text</span>.</p>"#
        );
    }

    #[test]
    fn test_button_directive_quoted_params() {
        let html =
            render(r#"Click this :button[Button]{url="https://example.com" shape="pill" color="blue"}."#);
        assert_eq!(
            html,
            concat!(
                r#"<p>Click this <a class="button-directive shape-pill color-blue" "#,
                r#"href="https://example.com" data-shape="pill" data-color="blue" "#,
                r#"data-type="button-directive">Button</a>.</p>"#
            )
        );
    }

    #[test]
    fn test_button_defaults() {
        let html = render(":button[Simple Button]{}");
        assert!(html.contains(r##"href="#""##));
        assert!(html.contains("shape-pill"));
        assert!(html.contains("color-blue"));
        assert!(html.contains(">Simple Button</a>"));
    }

    #[test]
    fn test_label_markdown_nested() {
        let html = render(":button[**Buy** *now* ~~old~~]{url=/shop}");
        assert!(html.contains("><strong>Buy</strong> <em>now</em> <del>old</del></a>"));
    }

    #[test]
    fn test_directive_in_indented_code_stays_literal() {
        let html = render("Para\n\n    :color[x]{red}\n");
        assert!(html.contains("<pre><code>:color[x]{red}\n</code></pre>"), "{html}");
        assert!(!html.contains("tint-directive"), "{html}");
    }

    #[test]
    fn test_directive_in_list_indented_code_stays_literal() {
        let html = render("- a\n\n      :button[b]{}");
        assert!(html.contains("<code>:button[b]{}"), "{html}");
        assert!(!html.contains("tint-directive"), "{html}");
        assert!(!html.contains("button-directive"), "{html}");
    }

    #[test]
    fn test_directive_in_multiline_code_span_stays_literal() {
        let html = render("`a\n:color[x]{red}` b");
        assert!(html.contains("<code>a :color[x]{red}</code> b"), "{html}");
        assert!(!html.contains("tint-directive"), "{html}");
    }

    #[test]
    fn test_directive_in_indented_code_keeps_quotes_unsanitized() {
        let html = unsanitized().render("    :button[b]{url=\"/x\"}").html;
        assert_eq!(
            html,
            "<pre><code>:button[b]{url=&quot;/x&quot;}\n</code></pre>"
        );
    }

    #[test]
    fn test_color_inside_button() {
        let html = render(":button[:color[hot]{red} deal]{url=/x shape=rect color=red}");
        assert!(html.contains(concat!(
            r#"data-type="button-directive">"#,
            r#"<span class="text-color-directive" style="color: red" data-type="color-directive">hot</span>"#,
            " deal</a>"
        )));
    }

    #[test]
    fn test_label_block_syntax_stays_inline() {
        let html = render(":color[# not a heading]{blue}");
        assert!(html.contains(r#"data-type="color-directive"># not a heading</span>"#));

        let html = render(":color[1. one]{blue}");
        assert!(html.contains(">1. one</span>"));
    }

    #[test]
    fn test_directive_in_list_and_table() {
        let html = render("- :color[item]{green}\n\n| A |\n|---|\n| :color[cell]{red} |");
        assert!(html.contains(r#"<li><span class="text-color-directive" style="color: green""#));
        assert!(html.contains(r#"<td><span class="text-color-directive" style="color: red""#));
    }

    #[test]
    fn test_directive_in_heading() {
        let html = render("## Title :color[x]{#abc}");
        assert!(html.starts_with("<h2>Title <span"));
        assert!(html.ends_with("</span></h2>"));
    }

    #[test]
    fn test_code_is_left_alone() {
        let html = render("`:color[x]{red}`\n\n```\n:color[y]{red}\n```");
        assert_eq!(
            html,
            "<p><code>:color[x]{red}</code></p><pre><code>:color[y]{red}\n</code></pre>"
        );
    }

    #[test]
    fn test_unclosed_directive_is_literal() {
        assert_eq!(render(":color[x]{red"), "<p>:color[x]{red</p>");
        assert_eq!(render(":button[x"), "<p>:button[x</p>");
    }

    #[test]
    fn test_invalid_color_warns() {
        let result = Pipeline::new().render(":color[x]{rgb(1,2,3)}");
        assert_eq!(result.html, "<p>:color[x]{rgb(1,2,3)}</p>");
        assert_eq!(
            result.warnings,
            vec!["line 1: invalid color value `rgb(1,2,3)`".to_owned()]
        );
    }

    #[test]
    fn test_unknown_directive_is_literal() {
        assert_eq!(render(":badge[new]{}"), "<p>:badge[new]{}</p>");
    }

    #[test]
    fn test_sanitizer_keeps_directive_attributes() {
        let markdown = ":color[a]{#ff0000} :button[b]{url=https://x.com shape=rect color=red}";
        assert_eq!(
            Pipeline::new().render(markdown).html,
            unsanitized().render(markdown).html
        );
    }

    #[test]
    fn test_sanitizer_strips_raw_script() {
        let html = render("hi <script>alert(1)</script>");
        assert!(!html.contains("script"));

        let html = unsanitized().render("hi <script>alert(1)</script>").html;
        assert!(html.contains("<script>"));
    }

    #[test]
    fn test_javascript_button_url_stripped() {
        let html = render(":button[x]{url=javascript:alert(1)}");
        assert!(!html.contains("javascript"));
        assert!(html.contains(r#"data-type="button-directive""#));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let pipeline = Pipeline::new().with_options(RenderOptions {
            max_nesting_depth: 1,
            ..RenderOptions::default()
        });
        let result = pipeline.render(":button[:color[**x**]{red}]{}");
        assert!(result.html.contains(r#"style="color: red""#));
        assert!(result.html.contains("**x**"));
        assert_eq!(
            result.warnings,
            vec!["maximum directive nesting depth (1) exceeded".to_owned()]
        );
    }

    #[test]
    fn test_breaks_option() {
        assert_eq!(render("a\nb"), "<p>a<br>b</p>");

        let pipeline = Pipeline::new().with_options(RenderOptions {
            breaks: false,
            ..RenderOptions::default()
        });
        assert_eq!(pipeline.render("a\nb").html, "<p>a\nb</p>");
    }

    struct Exploding;

    impl InlineDirective for Exploding {
        fn name(&self) -> &'static str {
            "explode"
        }

        fn process(&self, _args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
            panic!("handler exploded");
        }
    }

    #[test]
    fn test_engine_failure_is_contained() {
        let pipeline = Pipeline::new().with_directive(Exploding);

        let err = pipeline.try_render(":explode[x]{}").unwrap_err();
        assert_eq!(err.to_string(), "markdown engine failed: handler exploded");

        let result = pipeline.render(":explode[x]{}");
        assert_eq!(result.html, DEFAULT_FALLBACK_HTML);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_custom_fallback_html() {
        let pipeline = Pipeline::new()
            .with_directive(Exploding)
            .with_options(RenderOptions {
                fallback_html: "<p>oops</p>".to_owned(),
                ..RenderOptions::default()
            });
        assert_eq!(pipeline.render(":explode[x]{}").html, "<p>oops</p>");
    }

    #[test]
    fn test_pipeline_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();

        let pipeline = Pipeline::new();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let pipeline = &pipeline;
                    scope.spawn(move || pipeline.render(&format!(":color[{i}]{{red}}")).html)
                })
                .collect();
            for (i, handle) in handles.into_iter().enumerate() {
                let html = handle.join().unwrap();
                assert!(html.contains(&format!(">{i}</span>")));
            }
        });
    }

    #[test]
    fn test_default_directives_registered_once() {
        let pipeline = Pipeline::new()
            .with_directive(ColorDirective)
            .with_directive(ButtonDirective);
        assert_eq!(pipeline.directives().len(), 2);
    }
}
