//! Directive processor for inline directives.
//!
//! Handles preprocessing (before pulldown-cmark) and post-processing (after rendering).

use super::fence::FenceTracker;
use super::parser::find_directive;
use super::{
    DirectiveContext, DirectiveOutput, InlineDirective, RenderLabelFn, Replacements,
    context::escape_label,
};

/// Registry of inline directive handlers.
///
/// Built once and shared by every render call. Registering a handler under a
/// name that is already taken replaces the earlier handler, so repeated
/// registration never produces duplicate rules.
///
/// # Example
///
/// ```
/// use tint_renderer::directive::{
///     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveSet, InlineDirective,
/// };
///
/// struct Kbd;
///
/// impl InlineDirective for Kbd {
///     fn name(&self) -> &str { "kbd" }
///     fn process(&self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
///         DirectiveOutput::html(format!("<kbd>{}</kbd>", args.label))
///     }
/// }
///
/// let set = DirectiveSet::new().with_inline(Kbd).with_inline(Kbd);
/// assert_eq!(set.len(), 1);
/// assert!(set.get("kbd").is_some());
/// ```
#[derive(Default)]
pub struct DirectiveSet {
    handlers: Vec<Box<dyn InlineDirective>>,
}

impl DirectiveSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an inline directive handler, replacing any handler with the same name.
    #[must_use]
    pub fn with_inline<D: InlineDirective + 'static>(mut self, handler: D) -> Self {
        let handler: Box<dyn InlineDirective> = Box::new(handler);
        match self.handlers.iter().position(|h| h.name() == handler.name()) {
            Some(idx) => self.handlers[idx] = handler,
            None => self.handlers.push(handler),
        }
        self
    }

    /// Look up a handler by directive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn InlineDirective> {
        self.handlers
            .iter()
            .find(|h| h.name() == name)
            .map(AsRef::as_ref)
    }

    /// Names of the registered directives, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|h| h.name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for DirectiveSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Per-document directive processor.
///
/// Borrows a shared [`DirectiveSet`] and owns everything that belongs to a
/// single render: fence state, pending replacements and warnings. Create a
/// fresh processor for every document.
///
/// # Example
///
/// ```
/// use tint_renderer::directive::{
///     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveProcessor, DirectiveSet,
///     InlineDirective,
/// };
///
/// struct Kbd;
///
/// impl InlineDirective for Kbd {
///     fn name(&self) -> &str { "kbd" }
///     fn process(&self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
///         DirectiveOutput::html(format!("<kbd>{}</kbd>", ctx.render_label(&args.label)))
///     }
/// }
///
/// let set = DirectiveSet::new().with_inline(Kbd);
/// let mut processor = DirectiveProcessor::new(&set);
///
/// let mut html = processor.process("Press :kbd[Ctrl+C]{} to copy.");
/// processor.post_process(&mut html);
/// assert_eq!(html, "Press <kbd>Ctrl+C</kbd> to copy.");
/// ```
pub struct DirectiveProcessor<'a> {
    directives: &'a DirectiveSet,
    render_label: &'a RenderLabelFn<'a>,
    fence: FenceTracker,
    replacements: Replacements,
    warnings: Vec<String>,
}

impl<'a> DirectiveProcessor<'a> {
    /// Create a processor whose handlers render labels as escaped plain text.
    #[must_use]
    pub fn new(directives: &'a DirectiveSet) -> Self {
        Self::with_label_renderer(directives, &escape_label)
    }

    /// Create a processor whose handlers render labels through `render_label`.
    #[must_use]
    pub fn with_label_renderer(
        directives: &'a DirectiveSet,
        render_label: &'a RenderLabelFn<'a>,
    ) -> Self {
        Self {
            directives,
            render_label,
            fence: FenceTracker::new(),
            replacements: Replacements::new(),
            warnings: Vec::new(),
        }
    }

    /// Replace directives in `input` with placeholders.
    ///
    /// Line endings are preserved. Lines inside fenced code blocks and
    /// directives inside code spans are left untouched.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());

        for (idx, line) in input.split_inclusive('\n').enumerate() {
            let content = line.trim_end_matches(['\n', '\r']);
            let ending = &line[content.len()..];

            self.fence.update(content);
            if self.fence.in_fence() {
                output.push_str(line);
                continue;
            }

            self.process_line(content, idx + 1, &mut output);
            output.push_str(ending);
        }

        output
    }

    fn process_line(&mut self, line: &str, line_num: usize, output: &mut String) {
        let mut remaining = line;

        while let Some((directive, start, end)) = find_directive(remaining) {
            output.push_str(&remaining[..start]);
            let source = &remaining[start..end];

            let result = match self.directives.get(&directive.name) {
                Some(handler) => {
                    let ctx = DirectiveContext::new(line_num, self.render_label);
                    handler.process(directive.args, &ctx)
                }
                None => DirectiveOutput::Skip,
            };

            match result {
                DirectiveOutput::Html(html) => {
                    output.push_str(&self.replacements.push(html, source));
                }
                DirectiveOutput::Skip => output.push_str(source),
                DirectiveOutput::Invalid(reason) => {
                    tracing::debug!(
                        directive = %directive.name,
                        line = line_num,
                        %reason,
                        "Directive rejected"
                    );
                    self.warnings.push(format!("line {line_num}: {reason}"));
                    output.push_str(source);
                }
            }

            remaining = &remaining[end..];
        }

        output.push_str(remaining);
    }

    /// Splice directive HTML into the rendered document.
    pub fn post_process(&mut self, html: &mut String) {
        std::mem::take(&mut self.replacements).apply(html);
    }

    /// Warnings generated during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the processor, returning its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DirectiveArgs;
    use pretty_assertions::assert_eq;

    struct TestKbd;

    impl InlineDirective for TestKbd {
        fn name(&self) -> &'static str {
            "kbd"
        }

        fn process(&self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
            DirectiveOutput::html(format!("<kbd>{}</kbd>", ctx.render_label(&args.label)))
        }
    }

    struct TestStrictKbd;

    impl InlineDirective for TestStrictKbd {
        fn name(&self) -> &'static str {
            "kbd"
        }

        fn process(&self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
            if args.label.is_empty() {
                DirectiveOutput::invalid("empty key")
            } else {
                DirectiveOutput::html(format!("<kbd class=\"strict\">{}</kbd>", args.label))
            }
        }
    }

    fn render(set: &DirectiveSet, input: &str) -> (String, Vec<String>) {
        let mut processor = DirectiveProcessor::new(set);
        let mut html = processor.process(input);
        processor.post_process(&mut html);
        (html, processor.into_warnings())
    }

    #[test]
    fn test_inline_directive() {
        let set = DirectiveSet::new().with_inline(TestKbd);
        let (output, warnings) = render(&set, "Press :kbd[Ctrl+C]{} to copy.");
        assert_eq!(output, "Press <kbd>Ctrl+C</kbd> to copy.");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_placeholder_before_post_process() {
        let set = DirectiveSet::new().with_inline(TestKbd);
        let mut processor = DirectiveProcessor::new(&set);
        let output = processor.process(":kbd[A]{}");
        assert_eq!(
            output,
            r#"<tint-directive data-index="0"></tint-directive>"#
        );
    }

    #[test]
    fn test_multiple_inline_directives() {
        let set = DirectiveSet::new().with_inline(TestKbd);
        let (output, _) = render(&set, "Press :kbd[Ctrl+C]{} then :kbd[Ctrl+V]{}.");
        assert_eq!(output, "Press <kbd>Ctrl+C</kbd> then <kbd>Ctrl+V</kbd>.");
    }

    #[test]
    fn test_unknown_directive_passthrough() {
        let set = DirectiveSet::new().with_inline(TestKbd);
        let (output, _) = render(&set, ":unknown[content]{x=1}");
        assert_eq!(output, ":unknown[content]{x=1}");
    }

    #[test]
    fn test_invalid_directive_is_literal_with_warning() {
        let set = DirectiveSet::new().with_inline(TestStrictKbd);
        let (output, warnings) = render(&set, "a\nb :kbd[]{} c");
        assert_eq!(output, "a\nb :kbd[]{} c");
        assert_eq!(warnings, vec!["line 2: empty key".to_owned()]);
    }

    #[test]
    fn test_code_fence_skipping() {
        let set = DirectiveSet::new().with_inline(TestKbd);
        let input = "```\n:kbd[inside fence]{}\n```\n:kbd[outside]{}";
        let (output, _) = render(&set, input);
        assert_eq!(output, "```\n:kbd[inside fence]{}\n```\n<kbd>outside</kbd>");
    }

    #[test]
    fn test_line_endings_preserved() {
        let set = DirectiveSet::new().with_inline(TestKbd);
        let (output, _) = render(&set, ":kbd[a]{}\r\n\n:kbd[b]{}\n");
        assert_eq!(output, "<kbd>a</kbd>\r\n\n<kbd>b</kbd>\n");
    }

    #[test]
    fn test_label_renderer_is_used() {
        let set = DirectiveSet::new().with_inline(TestKbd);
        let upper = |label: &str| label.to_uppercase();
        let mut processor = DirectiveProcessor::with_label_renderer(&set, &upper);
        let mut html = processor.process(":kbd[esc]{}");
        processor.post_process(&mut html);
        assert_eq!(html, "<kbd>ESC</kbd>");
    }

    #[test]
    fn test_registration_replaces_same_name() {
        let set = DirectiveSet::new()
            .with_inline(TestKbd)
            .with_inline(TestStrictKbd);
        assert_eq!(set.len(), 1);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["kbd"]);

        let (output, _) = render(&set, ":kbd[x]{}");
        assert_eq!(output, r#"<kbd class="strict">x</kbd>"#);
    }

    #[test]
    fn test_empty_set() {
        let set = DirectiveSet::new();
        assert!(set.is_empty());
        assert!(set.get("kbd").is_none());
        let (output, _) = render(&set, ":kbd[x]{}");
        assert_eq!(output, ":kbd[x]{}");
    }
}
