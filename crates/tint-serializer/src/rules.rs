//! Conversion rules, one per element kind.
//!
//! [`RULES`] is searched in order and the first matching filter wins, so
//! directive rules sit ahead of the generic link and span handling. A
//! replacement receives the already converted markdown of the element's
//! children.

use std::fmt::Display;
use std::str::FromStr;

use tint_renderer::grammar::{
    BUTTON_CLASS, BUTTON_DATA_TYPE, ButtonColor, ButtonShape, ButtonSpec, ColorSpec,
    DEFAULT_BUTTON_URL,
};

use crate::options::SerializerOptions;
use crate::tree::{Element, Node};

/// Where an element sits in the tree.
pub(crate) struct NodeContext<'a> {
    pub(crate) parent: &'a Element,
    pub(crate) grandparent: Option<&'a Element>,
    /// Index among the parent's element children.
    pub(crate) index: usize,
    pub(crate) element_count: usize,
    /// Index among all of the parent's child nodes.
    pub(crate) position: usize,
}

impl NodeContext<'_> {
    fn is_last_element(&self) -> bool {
        self.index + 1 >= self.element_count
    }

    fn next_sibling(&self) -> Option<&Node> {
        self.parent.children.get(self.position + 1)
    }
}

type Filter = fn(&Element, &NodeContext<'_>) -> bool;
type Replacement = fn(&str, &Element, &NodeContext<'_>, &SerializerOptions) -> String;

pub(crate) struct Rule {
    pub(crate) name: &'static str,
    filter: Filter,
    replacement: Replacement,
}

impl Rule {
    pub(crate) fn apply(
        &self,
        content: &str,
        element: &Element,
        ctx: &NodeContext<'_>,
        options: &SerializerOptions,
    ) -> String {
        (self.replacement)(content, element, ctx, options)
    }
}

pub(crate) static RULES: &[Rule] = &[
    Rule {
        name: "button",
        filter: |el, _| el.is("a") && is_button(el),
        replacement: button,
    },
    Rule {
        name: "link",
        filter: |el, _| el.is("a") && el.attr("href").is_some(),
        replacement: link,
    },
    Rule {
        name: "text_color",
        filter: |el, _| el.is("span") && el.style_property("color").is_some(),
        replacement: text_color,
    },
    Rule {
        name: "strikethrough",
        filter: |el, _| {
            matches!(el.tag.as_str(), "s" | "strike" | "del")
                || (el.is("span") && has_line_through(el))
        },
        replacement: strikethrough,
    },
    Rule {
        name: "paragraph",
        filter: |el, _| el.is("p"),
        replacement: |content, _, _, _| format!("\n\n{content}\n\n"),
    },
    Rule {
        name: "line_break",
        filter: |el, _| el.is("br"),
        replacement: |_, _, _, _| "  \n".to_owned(),
    },
    Rule {
        name: "heading",
        filter: |el, _| heading_level(el).is_some(),
        replacement: heading,
    },
    Rule {
        name: "blockquote",
        filter: |el, _| el.is("blockquote"),
        replacement: blockquote,
    },
    Rule {
        name: "list",
        filter: |el, _| el.is("ul") || el.is("ol"),
        replacement: list,
    },
    Rule {
        name: "list_item",
        filter: |el, _| el.is("li"),
        replacement: list_item,
    },
    Rule {
        name: "fenced_code_block",
        filter: |el, _| el.is("pre"),
        replacement: fenced_code_block,
    },
    Rule {
        name: "inline_code",
        filter: |el, _| el.is("code"),
        replacement: inline_code,
    },
    Rule {
        name: "horizontal_rule",
        filter: |el, _| el.is("hr"),
        replacement: |_, _, _, options| format!("\n\n{}\n\n", options.horizontal_rule),
    },
    Rule {
        name: "strong",
        filter: |el, _| el.is("strong") || el.is("b"),
        replacement: |content, _, _, options| {
            wrap_inline(content, &options.strong_delimiter)
        },
    },
    Rule {
        name: "emphasis",
        filter: |el, _| el.is("em") || el.is("i"),
        replacement: |content, _, _, options| {
            wrap_inline(content, options.em_delimiter.encode_utf8(&mut [0; 4]))
        },
    },
    Rule {
        name: "image",
        filter: |el, _| el.is("img"),
        replacement: image,
    },
    Rule {
        name: "task_list_marker",
        filter: |el, _| {
            el.is("input")
                && el
                    .attr("type")
                    .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
        },
        replacement: task_list_marker,
    },
    Rule {
        name: "table",
        filter: |el, _| el.is("table"),
        replacement: |content, _, _, _| {
            format!("\n\n{}\n\n", content.trim_matches('\n').replace("\n\n", "\n"))
        },
    },
    Rule {
        name: "table_section",
        filter: |el, _| matches!(el.tag.as_str(), "thead" | "tbody" | "tfoot"),
        replacement: |content, _, _, _| content.to_owned(),
    },
    Rule {
        name: "table_row",
        filter: |el, _| el.is("tr"),
        replacement: table_row,
    },
    Rule {
        name: "table_cell",
        filter: |el, _| el.is("th") || el.is("td"),
        replacement: |content, _, ctx, _| table_cell(content, ctx.index),
    },
    Rule {
        name: "removed",
        filter: |el, _| {
            matches!(
                el.tag.as_str(),
                "script" | "style" | "head" | "title" | "template" | "noscript"
            )
        },
        replacement: |_, _, _, _| String::new(),
    },
];

/// First rule whose filter accepts the element.
pub(crate) fn find_rule(element: &Element, ctx: &NodeContext<'_>) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.filter)(element, ctx))
}

fn is_button(element: &Element) -> bool {
    element.has_class(BUTTON_CLASS) || element.attr("data-type") == Some(BUTTON_DATA_TYPE)
}

fn button(content: &str, element: &Element, _: &NodeContext<'_>, _: &SerializerOptions) -> String {
    let url = element
        .attr("href")
        .filter(|href| !href.is_empty())
        .unwrap_or(DEFAULT_BUTTON_URL);
    let shape: ButtonShape = button_value(element, "data-shape", "shape-");
    let color: ButtonColor = button_value(element, "data-color", "color-");

    ButtonSpec::new(content)
        .with_url(url)
        .with_shape(shape)
        .with_color(color)
        .to_markdown()
}

/// Resolve a button property from its data attribute, then its class.
///
/// The data attribute is canonical. A class naming a different value is
/// reported and ignored.
fn button_value<T>(element: &Element, attribute: &str, class_prefix: &str) -> T
where
    T: FromStr + Default + PartialEq + Display,
{
    let from_data = element.attr(attribute).and_then(|v| v.parse::<T>().ok());
    let from_class = element
        .classes()
        .find_map(|class| class.strip_prefix(class_prefix)?.parse::<T>().ok());

    if let (Some(data), Some(class)) = (&from_data, &from_class)
        && data != class
    {
        tracing::warn!(
            attribute,
            data = %data,
            class = %class,
            "Button data attribute and class disagree, using data attribute"
        );
    }
    from_data.or(from_class).unwrap_or_default()
}

fn link(content: &str, element: &Element, _: &NodeContext<'_>, _: &SerializerOptions) -> String {
    let href = element.attr("href").unwrap_or_default();
    if href.is_empty() {
        return content.to_owned();
    }
    match element.attr("title").filter(|t| !t.is_empty()) {
        Some(title) => format!("[{content}]({href} \"{}\")", title.replace('"', "\\\"")),
        None => format!("[{content}]({href})"),
    }
}

fn text_color(
    content: &str,
    element: &Element,
    _: &NodeContext<'_>,
    _: &SerializerOptions,
) -> String {
    let color = element
        .style_property("color")
        .map(|value| normalize_color(&value))
        .unwrap_or_default();
    ColorSpec::new(content, color).to_markdown()
}

/// Normalize a CSS color value for a color directive.
///
/// Hex literals pass through. `red`, `green` and `blue` become their hex
/// values and `rgb()`/`rgba()` are converted to six-digit hex. Anything
/// else, including the other preset names, is kept verbatim.
///
/// ```
/// use tint_serializer::normalize_color;
///
/// assert_eq!(normalize_color("rgb(255, 0, 128)"), "#ff0080");
/// assert_eq!(normalize_color("Red"), "#ff0000");
/// assert_eq!(normalize_color("hotpink"), "hotpink");
/// ```
pub fn normalize_color(value: &str) -> String {
    let value = value.trim();
    if value.starts_with('#') {
        return value.to_owned();
    }

    let lower = value.to_ascii_lowercase();
    match lower.as_str() {
        "red" => return "#ff0000".to_owned(),
        "green" => return "#008000".to_owned(),
        "blue" => return "#0000ff".to_owned(),
        _ => {}
    }

    if lower.starts_with("rgb") {
        let channels: Vec<u32> = lower
            .split(|c: char| !c.is_ascii_digit())
            .filter(|part| !part.is_empty())
            .take(3)
            .filter_map(|part| part.parse().ok())
            .collect();
        if let [r, g, b] = channels[..] {
            return format!("#{:02x}{:02x}{:02x}", r.min(255), g.min(255), b.min(255));
        }
    }
    value.to_owned()
}

fn has_line_through(element: &Element) -> bool {
    ["text-decoration", "text-decoration-line"].iter().any(|property| {
        element
            .style_property(property)
            .is_some_and(|value| value.to_ascii_lowercase().contains("line-through"))
    })
}

fn strikethrough(content: &str, _: &Element, _: &NodeContext<'_>, _: &SerializerOptions) -> String {
    wrap_inline(content, "~~")
}

fn wrap_inline(content: &str, delimiter: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    format!("{delimiter}{content}{delimiter}")
}

fn heading_level(element: &Element) -> Option<usize> {
    let level = element.tag.strip_prefix('h')?.parse::<usize>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn heading(content: &str, element: &Element, _: &NodeContext<'_>, _: &SerializerOptions) -> String {
    let level = heading_level(element).unwrap_or(1);
    format!("\n\n{} {content}\n\n", "#".repeat(level))
}

fn blockquote(content: &str, _: &Element, _: &NodeContext<'_>, _: &SerializerOptions) -> String {
    let quoted: Vec<String> = content
        .trim_matches('\n')
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                ">".to_owned()
            } else {
                format!("> {line}")
            }
        })
        .collect();
    format!("\n\n{}\n\n", quoted.join("\n"))
}

fn list(content: &str, _: &Element, ctx: &NodeContext<'_>, _: &SerializerOptions) -> String {
    if ctx.parent.is("li") && ctx.is_last_element() {
        format!("\n{content}")
    } else {
        format!("\n\n{content}\n\n")
    }
}

fn list_item(content: &str, _: &Element, ctx: &NodeContext<'_>, options: &SerializerOptions) -> String {
    let prefix = if ctx.parent.is("ol") {
        let start = ctx
            .parent
            .attr("start")
            .and_then(|start| start.trim().parse::<usize>().ok())
            .unwrap_or(1);
        format!("{}. ", start + ctx.index)
    } else {
        format!("{} ", options.bullet_marker)
    };

    let body = indent_continuation(content.trim_matches('\n'), prefix.len());
    let mut out = prefix;
    out.push_str(&body);
    if !ctx.is_last_element() {
        out.push('\n');
    }
    out
}

/// Indent every line after the first; blank lines stay empty.
fn indent_continuation(text: &str, width: usize) -> String {
    let indent = " ".repeat(width);
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
            }
        }
        out.push_str(line);
    }
    out
}

fn fenced_code_block(
    _: &str,
    element: &Element,
    _: &NodeContext<'_>,
    options: &SerializerOptions,
) -> String {
    let (code, language) = match element.first_child() {
        Some(Node::Element(code)) if code.is("code") => {
            let language = code
                .classes()
                .find_map(|class| class.strip_prefix("language-"))
                .unwrap_or_default()
                .to_owned();
            (code.text_content(), language)
        }
        _ => (element.text_content(), String::new()),
    };

    let fence_char = options.fence_char();
    let mut fence_len = options.fence.chars().count().max(3);
    for line in code.lines() {
        let run = line.chars().take_while(|&c| c == fence_char).count();
        if run >= 3 {
            fence_len = fence_len.max(run + 1);
        }
    }
    let fence: String = std::iter::repeat_n(fence_char, fence_len).collect();
    let code = code.strip_suffix('\n').unwrap_or(&code);

    format!("\n\n{fence}{language}\n{code}\n{fence}\n\n")
}

fn inline_code(content: &str, _: &Element, _: &NodeContext<'_>, _: &SerializerOptions) -> String {
    if content.is_empty() {
        return String::new();
    }
    let content = content.replace("\r\n", " ").replace(['\n', '\r'], " ");

    let padded = content.starts_with('`')
        || content.ends_with('`')
        || (content.len() > 2
            && content.starts_with(' ')
            && content.ends_with(' ')
            && !content.trim().is_empty());
    let space = if padded { " " } else { "" };

    let mut runs = Vec::new();
    let mut run = 0;
    for c in content.chars().chain(std::iter::once('\0')) {
        if c == '`' {
            run += 1;
        } else if run > 0 {
            runs.push(run);
            run = 0;
        }
    }
    let mut ticks = 1;
    while runs.contains(&ticks) {
        ticks += 1;
    }
    let delimiter = "`".repeat(ticks);

    format!("{delimiter}{space}{content}{space}{delimiter}")
}

fn image(_: &str, element: &Element, _: &NodeContext<'_>, _: &SerializerOptions) -> String {
    let src = element.attr("src").unwrap_or_default();
    if src.is_empty() {
        return String::new();
    }
    let alt = clean_attribute(element.attr("alt").unwrap_or_default());
    match element.attr("title").map(clean_attribute).filter(|t| !t.is_empty()) {
        Some(title) => format!("![{alt}]({src} \"{title}\")"),
        None => format!("![{alt}]({src})"),
    }
}

/// Collapse blank lines inside an attribute value.
fn clean_attribute(value: &str) -> String {
    value
        .split('\n')
        .map(str::trim_start)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn task_list_marker(
    _: &str,
    element: &Element,
    ctx: &NodeContext<'_>,
    _: &SerializerOptions,
) -> String {
    let marker = if element.attr("checked").is_some() {
        "[x]"
    } else {
        "[ ]"
    };
    match ctx.next_sibling() {
        Some(Node::Text(text)) if text.starts_with(' ') => marker.to_owned(),
        _ => format!("{marker} "),
    }
}

fn table_row(content: &str, element: &Element, ctx: &NodeContext<'_>, _: &SerializerOptions) -> String {
    if !is_heading_row(ctx) {
        return format!("\n{content}");
    }
    let border: String = element
        .element_children()
        .filter(|cell| cell.is("th") || cell.is("td"))
        .enumerate()
        .map(|(i, cell)| {
            let marker = match cell_alignment(cell).as_deref() {
                Some("left") => ":--",
                Some("right") => "--:",
                Some("center") => ":-:",
                _ => "---",
            };
            table_cell(marker, i)
        })
        .collect();
    format!("\n{content}\n{border}")
}

/// The row that becomes the GFM header: a `thead` row, or the first row
/// of a table that has no `thead`.
fn is_heading_row(ctx: &NodeContext<'_>) -> bool {
    let section = ctx.parent;
    if section.is("thead") {
        return true;
    }
    if ctx.index != 0 {
        return false;
    }
    if section.is("table") {
        return true;
    }
    let Some(table) = ctx.grandparent.filter(|table| table.is("table")) else {
        return false;
    };
    !table.element_children().any(|child| child.is("thead"))
        && table
            .element_children()
            .find(|child| child.is("tbody"))
            .is_some_and(|first| std::ptr::eq(first, section))
}

fn cell_alignment(cell: &Element) -> Option<String> {
    cell.attr("align")
        .map(str::to_owned)
        .or_else(|| cell.style_property("text-align"))
        .map(|align| align.trim().to_ascii_lowercase())
}

fn table_cell(content: &str, index: usize) -> String {
    let prefix = if index == 0 { "| " } else { " " };
    let content = content.replace('\n', " ").replace('|', "\\|");
    format!("{prefix}{content} |")
}
