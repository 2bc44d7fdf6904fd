//! Directive grammar shared by the forward and reverse transforms.
//!
//! Two inline directives exist:
//!
//! ```text
//! :color[LABEL]{#hex | colorname}
//! :button[LABEL]{url=URL shape=pill|rounded|rect color=PRESET}
//! ```
//!
//! The class names and `data-type` values below are the contract between the
//! rendered HTML and the serializer. Renaming any of them breaks round trips.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Directive name of the text-color directive.
pub const COLOR_DIRECTIVE: &str = "color";
/// Directive name of the button directive.
pub const BUTTON_DIRECTIVE: &str = "button";

/// Class carried by rendered color spans.
pub const COLOR_CLASS: &str = "text-color-directive";
/// Class carried by rendered button links.
pub const BUTTON_CLASS: &str = "button-directive";
/// `data-type` value of rendered color spans.
pub const COLOR_DATA_TYPE: &str = "color-directive";
/// `data-type` value of rendered button links.
pub const BUTTON_DATA_TYPE: &str = "button-directive";

/// Button URL used when `url` is missing or empty.
pub const DEFAULT_BUTTON_URL: &str = "#";

/// Named colors offered by the editor's color picker.
pub const PRESET_COLORS: [&str; 24] = [
    "black",
    "dimgray",
    "gray",
    "darkgray",
    "silver",
    "lightgray",
    "brown",
    "sienna",
    "darkred",
    "red",
    "orangered",
    "orange",
    "gold",
    "yellow",
    "darkkhaki",
    "green",
    "darkgreen",
    "teal",
    "navy",
    "blue",
    "indigo",
    "purple",
    "magenta",
    "hotpink",
];

static COLOR_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:#[0-9a-fA-F]{3,8}|[a-zA-Z]+)$").unwrap());

/// Check whether `value` is a valid color directive parameter.
///
/// Accepts a `#`-prefixed hex literal of 3 to 8 digits or a bare
/// alphabetic color name. Whitespace is not trimmed.
///
/// ```
/// use tint_renderer::grammar::is_valid_color;
///
/// assert!(is_valid_color("#ff0000"));
/// assert!(is_valid_color("rebeccapurple"));
/// assert!(!is_valid_color("rgb(1,2,3)"));
/// ```
pub fn is_valid_color(value: &str) -> bool {
    COLOR_VALUE_RE.is_match(value)
}

/// Check whether `name` is one of the [`PRESET_COLORS`] (case-insensitive).
pub fn is_preset_color(name: &str) -> bool {
    PRESET_COLORS
        .iter()
        .any(|preset| preset.eq_ignore_ascii_case(name))
}

/// Error returned when parsing a [`ButtonShape`] or [`ButtonColor`] fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown button {kind}: {value}")]
pub struct UnknownValue {
    kind: &'static str,
    value: String,
}

/// Shape of a button directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ButtonShape {
    #[default]
    Pill,
    Rounded,
    Rect,
}

impl ButtonShape {
    /// All shapes, in picker order.
    pub const ALL: [Self; 3] = [Self::Pill, Self::Rounded, Self::Rect];

    /// Wire name of the shape.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pill => "pill",
            Self::Rounded => "rounded",
            Self::Rect => "rect",
        }
    }
}

impl FromStr for ButtonShape {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| UnknownValue {
                kind: "shape",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for ButtonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color preset of a button directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ButtonColor {
    Purple,
    #[default]
    Blue,
    Green,
    Red,
    Yellow,
    Gray,
    Black,
    White,
}

impl ButtonColor {
    /// All presets, in picker order.
    pub const ALL: [Self; 8] = [
        Self::Purple,
        Self::Blue,
        Self::Green,
        Self::Red,
        Self::Yellow,
        Self::Gray,
        Self::Black,
        Self::White,
    ];

    /// Wire name of the preset.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Gray => "gray",
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl FromStr for ButtonColor {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| UnknownValue {
                kind: "color",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for ButtonColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved button directive.
///
/// Formats the canonical wire form with [`to_markdown`](Self::to_markdown).
///
/// ```
/// use tint_renderer::grammar::{ButtonColor, ButtonShape, ButtonSpec};
///
/// let button = ButtonSpec::new("Text")
///     .with_url("https://x.com")
///     .with_shape(ButtonShape::Rect)
///     .with_color(ButtonColor::Red);
/// assert_eq!(
///     button.to_markdown(),
///     ":button[Text]{url=https://x.com shape=rect color=red}"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    /// Label markdown.
    pub label: String,
    /// Link target.
    pub url: String,
    pub shape: ButtonShape,
    pub color: ButtonColor,
}

impl ButtonSpec {
    /// Create a button with default url, shape and color.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: DEFAULT_BUTTON_URL.to_owned(),
            shape: ButtonShape::default(),
            color: ButtonColor::default(),
        }
    }

    /// Resolve a button from parsed directive attributes.
    ///
    /// Missing or empty values take their defaults. Unknown shapes and colors
    /// also fall back to the defaults so that the rendered class names always
    /// name a real preset. Unrecognized keys are ignored.
    #[must_use]
    pub fn from_attributes(label: impl Into<String>, attrs: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| attrs.get(key).map(String::as_str).filter(|v| !v.is_empty());

        let mut button = Self::new(label);
        if let Some(url) = value("url") {
            url.clone_into(&mut button.url);
        }
        if let Some(shape) = value("shape") {
            button.shape = shape.parse().unwrap_or_else(|e: UnknownValue| {
                tracing::debug!(error = %e, "Falling back to default button shape");
                ButtonShape::default()
            });
        }
        if let Some(color) = value("color") {
            button.color = color.parse().unwrap_or_else(|e: UnknownValue| {
                tracing::debug!(error = %e, "Falling back to default button color");
                ButtonColor::default()
            });
        }
        button
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: ButtonShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: ButtonColor) -> Self {
        self.color = color;
        self
    }

    /// Format the canonical `:button[...]{...}` markdown.
    ///
    /// The URL is emitted unquoted unless it contains whitespace or braces.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!(
            ":{BUTTON_DIRECTIVE}[{}]{{url={} shape={} color={}}}",
            self.label,
            param_value(&self.url),
            self.shape,
            self.color
        )
    }
}

/// A resolved color directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSpec {
    /// Label markdown.
    pub label: String,
    /// Hex literal or color name.
    pub color: String,
}

impl ColorSpec {
    #[must_use]
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }

    /// Format the canonical `:color[...]{...}` markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!(":{COLOR_DIRECTIVE}[{}]{{{}}}", self.label, self.color)
    }
}

/// Quote a parameter value when a bare token would not survive parsing.
fn param_value(value: &str) -> String {
    if value
        .chars()
        .any(|c| c.is_whitespace() || c == '{' || c == '}')
    {
        format!("\"{value}\"")
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_valid_colors() {
        assert!(is_valid_color("#fff"));
        assert!(is_valid_color("#FF0000"));
        assert!(is_valid_color("#ff000080"));
        assert!(is_valid_color("red"));
        assert!(is_valid_color("HotPink"));
    }

    #[test]
    fn test_invalid_colors() {
        assert!(!is_valid_color(""));
        assert!(!is_valid_color("#ff"));
        assert!(!is_valid_color("#ff0000000"));
        assert!(!is_valid_color("#ggg"));
        assert!(!is_valid_color("dark red"));
        assert!(!is_valid_color("red;background:url(x)"));
        assert!(!is_valid_color(" red"));
    }

    #[test]
    fn test_preset_colors() {
        assert!(is_preset_color("hotpink"));
        assert!(is_preset_color("DarkKhaki"));
        assert!(!is_preset_color("rebeccapurple"));
    }

    #[test]
    fn test_shape_round_trip_names() {
        for shape in ButtonShape::ALL {
            assert_eq!(shape.as_str().parse::<ButtonShape>(), Ok(shape));
        }
        assert!("oval".parse::<ButtonShape>().is_err());
    }

    #[test]
    fn test_color_names() {
        for color in ButtonColor::ALL {
            assert_eq!(color.as_str().parse::<ButtonColor>(), Ok(color));
        }
        let err = "teal".parse::<ButtonColor>().unwrap_err();
        assert_eq!(err.to_string(), "unknown button color: teal");
    }

    #[test]
    fn test_button_defaults() {
        let button = ButtonSpec::from_attributes("X", &BTreeMap::new());
        assert_eq!(button.url, "#");
        assert_eq!(button.shape, ButtonShape::Pill);
        assert_eq!(button.color, ButtonColor::Blue);
    }

    #[test]
    fn test_button_empty_url_uses_default() {
        let button = ButtonSpec::from_attributes("X", &attrs(&[("url", "")]));
        assert_eq!(button.url, "#");
    }

    #[test]
    fn test_button_unknown_values_fall_back() {
        let button = ButtonSpec::from_attributes(
            "X",
            &attrs(&[("shape", "oval"), ("color", "chartreuse"), ("size", "xl")]),
        );
        assert_eq!(button.shape, ButtonShape::Pill);
        assert_eq!(button.color, ButtonColor::Blue);
    }

    #[test]
    fn test_button_from_attributes() {
        let button = ButtonSpec::from_attributes(
            "Go",
            &attrs(&[("url", "https://x.com"), ("shape", "rect"), ("color", "red")]),
        );
        assert_eq!(
            button,
            ButtonSpec::new("Go")
                .with_url("https://x.com")
                .with_shape(ButtonShape::Rect)
                .with_color(ButtonColor::Red)
        );
    }

    #[test]
    fn test_button_markdown_quotes_spaced_url() {
        let button = ButtonSpec::new("Go").with_url("my page.html");
        assert_eq!(
            button.to_markdown(),
            r#":button[Go]{url="my page.html" shape=pill color=blue}"#
        );
    }

    #[test]
    fn test_color_markdown() {
        assert_eq!(
            ColorSpec::new("**hot**", "#ff0000").to_markdown(),
            ":color[**hot**]{#ff0000}"
        );
    }
}
