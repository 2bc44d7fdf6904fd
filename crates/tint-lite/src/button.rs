//! Inline button styles.
//!
//! Without a stylesheet the button look is spelled out in a `style`
//! attribute: a fixed base, a border radius per shape and a background per
//! color preset.

/// Style shared by every button.
pub const BASE_STYLE: &str =
    "display:inline-block;text-decoration:none;padding:8px 16px;cursor:pointer;color:white";

const SHAPES: [(&str, &str); 3] = [
    ("pill", "border-radius:9999px"),
    ("rect", "border-radius:4px"),
    ("rounded", "border-radius:8px"),
];

const COLORS: [(&str, &str); 6] = [
    ("purple", "background-color:#6366f1"),
    ("blue", "background-color:#3b82f6"),
    ("green", "background-color:#22c55e"),
    ("red", "background-color:#ef4444"),
    ("yellow", "background-color:#eab308"),
    ("gray", "background-color:#6b7280"),
];

const FALLBACK_SHAPE: &str = "rounded";
const FALLBACK_COLOR: &str = "blue";
const DEFAULT_URL: &str = "#";

/// Border radius declaration for a shape; unknown shapes use `rounded`.
pub fn shape_style(shape: &str) -> &'static str {
    lookup(&SHAPES, shape).unwrap_or_else(|| lookup(&SHAPES, FALLBACK_SHAPE).unwrap_or_default())
}

/// Background declaration for a color; unknown colors use `blue`.
pub fn color_style(color: &str) -> &'static str {
    lookup(&COLORS, color).unwrap_or_else(|| lookup(&COLORS, FALLBACK_COLOR).unwrap_or_default())
}

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, style)| *style)
}

/// Parameters of a button directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonParams {
    pub url: String,
    pub shape: String,
    pub color: String,
}

impl Default for ButtonParams {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_owned(),
            shape: FALLBACK_SHAPE.to_owned(),
            color: FALLBACK_COLOR.to_owned(),
        }
    }
}

impl ButtonParams {
    /// Parse space-separated `key=value` tokens.
    ///
    /// Quotes are not understood. Tokens without `=` or with an empty side
    /// are skipped, and unknown keys are ignored.
    ///
    /// ```
    /// use tint_lite::ButtonParams;
    ///
    /// let params = ButtonParams::parse("url=/a?b=1 shape=pill junk");
    /// assert_eq!(params.url, "/a?b=1");
    /// assert_eq!(params.shape, "pill");
    /// assert_eq!(params.color, "blue");
    /// ```
    pub fn parse(params: &str) -> Self {
        let mut result = Self::default();
        for (key, value) in params
            .split(' ')
            .filter_map(|token| token.split_once('='))
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        {
            match key {
                "url" => value.clone_into(&mut result.url),
                "shape" => value.clone_into(&mut result.shape),
                "color" => value.clone_into(&mut result.color),
                _ => {}
            }
        }
        result
    }

    /// Full `style` attribute value.
    pub fn style(&self) -> String {
        format!(
            "{BASE_STYLE};{};{}",
            shape_style(&self.shape),
            color_style(&self.color)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_style_table() {
        assert_eq!(shape_style("pill"), "border-radius:9999px");
        assert_eq!(shape_style("rect"), "border-radius:4px");
        assert_eq!(shape_style("rounded"), "border-radius:8px");
        assert_eq!(color_style("purple"), "background-color:#6366f1");
        assert_eq!(color_style("gray"), "background-color:#6b7280");
    }

    #[test]
    fn test_unknown_values_fall_back() {
        assert_eq!(shape_style("oval"), "border-radius:8px");
        assert_eq!(color_style("black"), "background-color:#3b82f6");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            ButtonParams::parse(""),
            ButtonParams {
                url: "#".to_owned(),
                shape: "rounded".to_owned(),
                color: "blue".to_owned(),
            }
        );
    }

    #[test]
    fn test_quotes_are_literal() {
        let params = ButtonParams::parse(r#"url="x" color=red"#);
        assert_eq!(params.url, r#""x""#);
        assert_eq!(params.color, "red");
    }

    #[test]
    fn test_full_style() {
        let params = ButtonParams::parse("shape=pill color=green");
        assert_eq!(
            params.style(),
            "display:inline-block;text-decoration:none;padding:8px 16px;cursor:pointer;color:white;border-radius:9999px;background-color:#22c55e"
        );
    }
}
