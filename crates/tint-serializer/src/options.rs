//! Markdown output options.

/// Markers the serializer writes.
///
/// Defaults produce ATX headings, fenced code blocks and `*` emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Bullet list marker: `*`, `-` or `+`.
    pub bullet_marker: char,
    /// Emphasis delimiter: `*` or `_`.
    pub em_delimiter: char,
    /// Strong delimiter: `**` or `__`.
    pub strong_delimiter: String,
    /// Code fence: three or more backticks or tildes.
    pub fence: String,
    /// Thematic break line.
    pub horizontal_rule: String,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            bullet_marker: '*',
            em_delimiter: '*',
            strong_delimiter: "**".to_owned(),
            fence: "```".to_owned(),
            horizontal_rule: "---".to_owned(),
        }
    }
}

impl SerializerOptions {
    #[must_use]
    pub fn with_bullet_marker(mut self, marker: char) -> Self {
        self.bullet_marker = marker;
        self
    }

    #[must_use]
    pub fn with_em_delimiter(mut self, delimiter: char) -> Self {
        self.em_delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_strong_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.strong_delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn with_fence(mut self, fence: impl Into<String>) -> Self {
        self.fence = fence.into();
        self
    }

    #[must_use]
    pub fn with_horizontal_rule(mut self, rule: impl Into<String>) -> Self {
        self.horizontal_rule = rule.into();
        self
    }

    /// Character the code fence is made of.
    pub(crate) fn fence_char(&self) -> char {
        self.fence.chars().next().unwrap_or('`')
    }
}
