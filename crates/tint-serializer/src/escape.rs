//! Markdown escaping for text nodes.
//!
//! Only characters that would start markdown syntax are escaped. Square
//! brackets, braces and backslashes pass through untouched so that
//! directive syntax typed as plain text in the editor survives a
//! serialize/render cycle as a live directive.

/// Escape one text node.
///
/// Line-start rules look at the start of the text node, not at the start
/// of each line.
///
/// ```
/// use tint_serializer::escape_markdown;
///
/// assert_eq!(escape_markdown("2 * 3_000"), r"2 \* 3\_000");
/// assert_eq!(escape_markdown("# not a heading"), r"\# not a heading");
/// assert_eq!(escape_markdown(":color[x]{red}"), ":color[x]{red}");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut out = text.replace('*', r"\*");

    if out.starts_with('-') {
        out.insert(0, '\\');
    }
    if out.starts_with("+ ") {
        out.insert(0, '\\');
    }
    if out.starts_with('=') {
        out.insert(0, '\\');
    }
    let hashes = out.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && out.as_bytes().get(hashes) == Some(&b' ') {
        out.insert(0, '\\');
    }

    out = out.replace('`', r"\`");

    if out.starts_with("~~~") || out.starts_with('>') {
        out.insert(0, '\\');
    }

    out = out.replace('_', r"\_");

    let digits = out.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && out[digits..].starts_with(". ") {
        out.insert(digits, '\\');
    }

    out
}
