//! Whitespace collapsing and element classification.
//!
//! Runs of HTML whitespace become one space, as a browser would render
//! them. Leading and trailing spaces disappear at block boundaries, and
//! text nodes that end up empty are removed. `pre` contents are left
//! alone.

use crate::tree::{Element, Node};

const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "audio",
    "blockquote",
    "body",
    "canvas",
    "center",
    "dd",
    "dir",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "frameset",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "html",
    "isindex",
    "li",
    "main",
    "menu",
    "nav",
    "noframes",
    "noscript",
    "ol",
    "output",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements that produce output even without text.
const MEANINGFUL_WHEN_BLANK: &[&str] = &[
    "a", "table", "thead", "tbody", "tfoot", "th", "td", "iframe", "script", "audio", "video",
];

pub(crate) fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// An element with nothing to show: no text, no void or meaningful descendants.
pub(crate) fn is_blank(element: &Element) -> bool {
    !is_void(&element.tag)
        && !MEANINGFUL_WHEN_BLANK.contains(&element.tag.as_str())
        && element.text_content().trim().is_empty()
        && !has_descendant(element, &|tag: &str| {
            is_void(tag) || MEANINGFUL_WHEN_BLANK.contains(&tag)
        })
}

fn has_descendant(element: &Element, matches: &dyn Fn(&str) -> bool) -> bool {
    element
        .element_children()
        .any(|child| matches(&child.tag) || has_descendant(child, matches))
}

/// Collapse whitespace in the subtree below `root`.
pub(crate) fn collapse_whitespace(root: &mut Element) {
    let mut state = CollapseState::default();
    for child in &mut root.children {
        state.visit(child);
    }
    if let Some(last) = state.prev_text {
        state.trim_trailing.push(last);
    }

    let mut counter = 0;
    finish(root, &state.trim_trailing, &mut counter);
}

/// Text nodes are identified by their position in document order.
#[derive(Default)]
struct CollapseState {
    counter: usize,
    prev_text: Option<usize>,
    prev_ends_with_space: bool,
    keep_leading_space: bool,
    trim_trailing: Vec<usize>,
}

impl CollapseState {
    fn visit(&mut self, node: &mut Node) {
        match node {
            Node::Text(text) => {
                let index = self.counter;
                self.counter += 1;

                let mut collapsed = collapse_runs(text);
                if (self.prev_text.is_none() || self.prev_ends_with_space)
                    && !self.keep_leading_space
                    && collapsed.starts_with(' ')
                {
                    collapsed.remove(0);
                }
                *text = collapsed;
                if !text.is_empty() {
                    self.prev_text = Some(index);
                    self.prev_ends_with_space = text.ends_with(' ');
                }
            }
            Node::Element(element) => {
                self.boundary(&element.tag);
                if element.is("pre") {
                    return;
                }
                for child in &mut element.children {
                    self.visit(child);
                }
                self.boundary(&element.tag);
            }
        }
    }

    /// Called on entering and on leaving an element.
    fn boundary(&mut self, tag: &str) {
        if is_block(tag) || tag == "br" {
            if let Some(prev) = self.prev_text.take() {
                self.trim_trailing.push(prev);
            }
            self.keep_leading_space = false;
        } else if is_void(tag) {
            self.prev_text = None;
            self.keep_leading_space = true;
        } else if self.prev_text.is_some() {
            self.keep_leading_space = false;
        }
    }
}

fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\r' | '\n') {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

fn finish(element: &mut Element, trim_trailing: &[usize], counter: &mut usize) {
    for child in &mut element.children {
        match child {
            Node::Text(text) => {
                if trim_trailing.contains(counter) && text.ends_with(' ') {
                    text.pop();
                }
                *counter += 1;
            }
            Node::Element(child) if !child.is("pre") => finish(child, trim_trailing, counter),
            Node::Element(_) => {}
        }
    }
    element
        .children
        .retain(|child| !matches!(child, Node::Text(text) if text.is_empty()));
}
