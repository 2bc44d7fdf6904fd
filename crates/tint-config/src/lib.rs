//! Configuration management for tint.
//!
//! Parses `tint.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! gfm = true
//! breaks = true
//! sanitize = true
//! fallback_html = "<p>Error rendering markdown</p>"
//! max_nesting_depth = 8
//!
//! [sanitizer]
//! extra_tags = ["mark"]
//! extra_attributes = ["id"]
//!
//! [serializer]
//! bullet_marker = "-"
//! em_delimiter = "_"
//! strong_delimiter = "**"
//! fence = "~~~"
//! rule = "***"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override GFM extensions flag.
    pub gfm: Option<bool>,
    /// Override soft line break mode.
    pub breaks: Option<bool>,
    /// Override sanitizing of rendered HTML.
    pub sanitize: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tint.toml";

/// Deepest directive label nesting a config may ask for.
const MAX_NESTING_DEPTH: usize = 64;

/// Tags that ammonia strips together with their content; they cannot be
/// allowed on top of that.
const CLEAN_CONTENT_TAGS: [&str; 2] = ["script", "style"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forward transform configuration.
    pub render: RenderConfig,
    /// Sanitizer allow-list extensions.
    pub sanitizer: SanitizerConfig,
    /// Reverse transform configuration.
    pub serializer: SerializerConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Forward transform configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable GFM tables, strikethrough and task lists.
    pub gfm: bool,
    /// Render single newlines inside paragraphs as `<br>`.
    pub breaks: bool,
    /// Sanitize rendered HTML.
    pub sanitize: bool,
    /// HTML returned when rendering fails.
    pub fallback_html: String,
    /// Maximum directive label nesting depth.
    pub max_nesting_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
            sanitize: true,
            fallback_html: "<p>Error rendering markdown</p>".to_owned(),
            max_nesting_depth: 8,
        }
    }
}

/// Additions to the built-in sanitizer allow-list.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Extra tags to allow.
    pub extra_tags: Vec<String>,
    /// Extra attributes to allow on every tag.
    pub extra_attributes: Vec<String>,
}

/// Markers used by the reverse transform.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Bullet list marker.
    pub bullet_marker: String,
    /// Emphasis delimiter.
    pub em_delimiter: String,
    /// Strong delimiter.
    pub strong_delimiter: String,
    /// Code fence.
    pub fence: String,
    /// Thematic break.
    pub rule: String,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            bullet_marker: "*".to_owned(),
            em_delimiter: "*".to_owned(),
            strong_delimiter: "**".to_owned(),
            fence: "```".to_owned(),
            rule: "---".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string field to be one of `allowed`.
fn require_one_of(value: &str, allowed: &[&str], field: &str) -> Result<(), ConfigError> {
    if !allowed.contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be one of {}, got {value:?}",
            allowed.join(", ")
        )));
    }
    Ok(())
}

/// Require HTML tag or attribute names.
fn require_html_names(names: &[String], field: &str) -> Result<(), ConfigError> {
    for name in names {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(ConfigError::Validation(format!(
                "{field} contains invalid name {name:?}"
            )));
        }
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tint.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(gfm) = settings.gfm {
            self.render.gfm = gfm;
        }
        if let Some(breaks) = settings.breaks {
            self.render.breaks = breaks;
        }
        if let Some(sanitize) = settings.sanitize {
            self.render.sanitize = sanitize;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let start = std::env::current_dir().ok()?;
        Self::discover_from(&start)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first invalid key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.validate_sanitizer()?;
        self.validate_serializer()?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.fallback_html, "render.fallback_html")?;

        let depth = self.render.max_nesting_depth;
        if depth == 0 {
            return Err(ConfigError::Validation(
                "render.max_nesting_depth must be greater than 0".to_owned(),
            ));
        }
        if depth > MAX_NESTING_DEPTH {
            return Err(ConfigError::Validation(format!(
                "render.max_nesting_depth cannot exceed {MAX_NESTING_DEPTH}"
            )));
        }

        Ok(())
    }

    fn validate_sanitizer(&self) -> Result<(), ConfigError> {
        require_html_names(&self.sanitizer.extra_tags, "sanitizer.extra_tags")?;
        require_html_names(&self.sanitizer.extra_attributes, "sanitizer.extra_attributes")?;

        if let Some(tag) = self
            .sanitizer
            .extra_tags
            .iter()
            .find(|tag| CLEAN_CONTENT_TAGS.contains(&tag.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "sanitizer.extra_tags cannot allow <{tag}>"
            )));
        }

        Ok(())
    }

    fn validate_serializer(&self) -> Result<(), ConfigError> {
        let serializer = &self.serializer;
        require_one_of(
            &serializer.bullet_marker,
            &["*", "-", "+"],
            "serializer.bullet_marker",
        )?;
        require_one_of(&serializer.em_delimiter, &["*", "_"], "serializer.em_delimiter")?;
        require_one_of(
            &serializer.strong_delimiter,
            &["**", "__"],
            "serializer.strong_delimiter",
        )?;

        if !is_fence(&serializer.fence) {
            return Err(ConfigError::Validation(format!(
                "serializer.fence must be three or more backticks or tildes, got {:?}",
                serializer.fence
            )));
        }
        if !is_thematic_break(&serializer.rule) {
            return Err(ConfigError::Validation(format!(
                "serializer.rule is not a thematic break: {:?}",
                serializer.rule
            )));
        }

        Ok(())
    }
}

fn is_fence(fence: &str) -> bool {
    let Some(first) = fence.chars().next() else {
        return false;
    };
    (first == '`' || first == '~') && fence.len() >= 3 && fence.chars().all(|c| c == first)
}

fn is_thematic_break(rule: &str) -> bool {
    let marks: Vec<char> = rule.chars().filter(|c| *c != ' ').collect();
    let Some(&first) = marks.first() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && marks.len() >= 3 && marks.iter().all(|&c| c == first)
}
