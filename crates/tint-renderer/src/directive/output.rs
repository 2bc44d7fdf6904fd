//! Directive output types.

/// Output from directive processing.
///
/// - [`Html`](Self::Html): final HTML, spliced in after markdown rendering
/// - [`Skip`](Self::Skip): not handled, the source text stays literal
/// - [`Invalid`](Self::Invalid): syntax matched but the parameters are
///   unusable; the source text stays literal and the message is reported
///   as a warning
///
/// # Example
///
/// ```
/// use tint_renderer::directive::DirectiveOutput;
///
/// let output = DirectiveOutput::html("<kbd>Ctrl+C</kbd>");
/// assert!(matches!(output, DirectiveOutput::Html(_)));
///
/// let output = DirectiveOutput::invalid("color value `rgb(1,2,3)` is not allowed");
/// assert!(matches!(output, DirectiveOutput::Invalid(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// HTML that replaces the directive in the rendered document.
    Html(String),
    /// Don't handle this directive (pass through unchanged).
    Skip,
    /// Reject the directive (pass through unchanged) with a reason.
    Invalid(String),
}

impl DirectiveOutput {
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }

    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }
}
