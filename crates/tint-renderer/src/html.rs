//! HTML fragment writers used by the renderer.

use std::fmt::Write;

use crate::state::escape_html;

pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    if let Some(lang) = lang {
        write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
    }
}

pub(crate) fn link_start(href: &str, title: &str, out: &mut String) {
    write!(out, r#"<a href="{}""#, escape_html(href)).unwrap();
    if !title.is_empty() {
        write!(out, r#" title="{}""#, escape_html(title)).unwrap();
    }
    out.push('>');
}

pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    write!(
        out,
        r#"<img src="{}"{title_attr} alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) {
    if checked {
        out.push_str(r#"<input type="checkbox" checked disabled> "#);
    } else {
        out.push_str(r#"<input type="checkbox" disabled> "#);
    }
}

/// First word of a fence info string, if any.
pub(crate) fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace().next().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        code_block(Some("rust"), "fn main() {}", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_escapes_content() {
        let mut out = String::new();
        code_block(None, "<b>", &mut out);
        assert_eq!(out, "<pre><code>&lt;b&gt;</code></pre>");
    }

    #[test]
    fn test_link_start() {
        let mut out = String::new();
        link_start("https://x.com/?a=1&b=2", "", &mut out);
        assert_eq!(out, r#"<a href="https://x.com/?a=1&amp;b=2">"#);

        let mut out = String::new();
        link_start("/docs", "The \"docs\"", &mut out);
        assert_eq!(out, r#"<a href="/docs" title="The &quot;docs&quot;">"#);
    }

    #[test]
    fn test_image() {
        let mut out = String::new();
        image("cat.png", "A cat", "", &mut out);
        assert_eq!(out, r#"<img src="cat.png" alt="A cat">"#);

        let mut out = String::new();
        image("cat.png", "A cat", "Cute", &mut out);
        assert_eq!(out, r#"<img src="cat.png" title="Cute" alt="A cat">"#);
    }

    #[test]
    fn test_task_list_marker() {
        let mut out = String::new();
        task_list_marker(true, &mut out);
        task_list_marker(false, &mut out);
        assert_eq!(
            out,
            r#"<input type="checkbox" checked disabled> <input type="checkbox" disabled> "#
        );
    }

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("rust"), Some("rust".to_owned()));
        assert_eq!(fence_language("rust title=x"), Some("rust".to_owned()));
        assert_eq!(fence_language("   "), None);
    }
}
