//! HTML parsing into the owned [`Element`] tree.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::SerializeError;
use crate::tree::{Element, Node};

/// Parse an HTML string and return its `body` element.
///
/// Fragments are accepted; the HTML5 tree builder supplies the missing
/// `html` and `body` elements.
pub fn parse_html(html: &str) -> Result<Element, SerializeError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    let body = find_element(&dom.document, "body").ok_or(SerializeError::MissingBody)?;
    match convert(&body) {
        Some(Node::Element(element)) => Ok(element),
        _ => Err(SerializeError::MissingBody),
    }
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data
        && &*name.local == tag
    {
        return Some(handle.clone());
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn convert(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Text { contents } => Some(Node::Text(String::from(&**contents.borrow()))),
        NodeData::Element { name, attrs, .. } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (String::from(&*attr.name.local), String::from(&*attr.value)))
                .collect();
            let children = handle.children.borrow().iter().filter_map(convert).collect();
            Some(Node::Element(Element {
                tag: String::from(&*name.local),
                attrs,
                children,
            }))
        }
        _ => None,
    }
}
