//! Configuration management for the tiny HTML writer.
//!
//! Parses `tinyhtml.toml` configuration files with serde and provides
//! auto-discovery of the config file in parent directories.
//!
//! Caller-supplied values can be layered on top via [`Overrides`].
//!
//! ## Environment Variable Expansion
//!
//! String values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `writer.link`
//! - `writer.top`
//! - `writer.language_code`
//! - `writer.stylesheet` (entries may also start with `~`)

mod expand;

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tinyhtml_writer::{HeaderLevel, WriterSettings};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tinyhtml.toml";

/// Values that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    pub initial_header_level: Option<u8>,
    pub no_system_messages: Option<bool>,
    pub foot_hyperlinks: Option<bool>,
    /// Used as given; never resolved against the config directory.
    pub stylesheets: Option<Vec<String>>,
    pub embed_stylesheet: Option<bool>,
    pub link: Option<String>,
    pub top: Option<String>,
    pub language_code: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Writer options.
    pub writer: WriterConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[writer]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Level of top-level section headings.
    pub initial_header_level: u8,
    /// Drop system messages from the output.
    pub no_system_messages: bool,
    /// List hyperlink targets after the body.
    pub foot_hyperlinks: bool,
    /// Stylesheets, as a comma-separated string or an array.
    #[serde(deserialize_with = "deserialize_stylesheets")]
    pub stylesheet: Vec<String>,
    /// Inline stylesheet files instead of linking them.
    pub embed_stylesheet: bool,
    /// Label of the per-section self link.
    pub link: Option<String>,
    /// Label of the per-section "back to top" link.
    pub top: Option<String>,
    /// Document language.
    pub language_code: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            initial_header_level: HeaderLevel::default().get(),
            no_system_messages: false,
            foot_hyperlinks: false,
            stylesheet: Vec::new(),
            embed_stylesheet: false,
            link: None,
            top: None,
            language_code: "en".to_owned(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StylesheetList {
    Joined(String),
    List(Vec<String>),
}

fn deserialize_stylesheets<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match StylesheetList::deserialize(deserializer)? {
        StylesheetList::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
        StylesheetList::List(list) => list,
    };
    Ok(entries
        .into_iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect())
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`writer.stylesheet`").
        field: String,
        /// Error message (e.g., "${`CSS_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tinyhtml.toml` in the current directory and
    /// its parents, falling back to defaults.
    ///
    /// Overrides are applied after loading and take precedence over file
    /// values; the result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No config file found, using defaults");
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        // Stylesheets from the file are relative to it
        let file_stylesheets = overrides.is_none_or(|o| o.stylesheets.is_none());
        if file_stylesheets && let Some(config_dir) = config.config_dir() {
            config.resolve_paths(&config_dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        let writer = &mut self.writer;
        if let Some(level) = overrides.initial_header_level {
            writer.initial_header_level = level;
        }
        if let Some(no_system_messages) = overrides.no_system_messages {
            writer.no_system_messages = no_system_messages;
        }
        if let Some(foot_hyperlinks) = overrides.foot_hyperlinks {
            writer.foot_hyperlinks = foot_hyperlinks;
        }
        if let Some(stylesheets) = &overrides.stylesheets {
            writer.stylesheet.clone_from(stylesheets);
        }
        if let Some(embed) = overrides.embed_stylesheet {
            writer.embed_stylesheet = embed;
        }
        if let Some(link) = &overrides.link {
            writer.link = Some(link.clone());
        }
        if let Some(top) = &overrides.top {
            writer.top = Some(top.clone());
        }
        if let Some(language_code) = &overrides.language_code {
            writer.language_code.clone_from(language_code);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        config.config_path = Some(path.to_path_buf());

        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let writer = &self.writer;
        HeaderLevel::try_from(writer.initial_header_level)
            .map_err(|e| ConfigError::Validation(format!("writer.initial_header_level: {e}")))?;

        if writer.language_code.trim().is_empty() {
            return Err(ConfigError::Validation(
                "writer.language_code cannot be empty".to_owned(),
            ));
        }

        if writer.embed_stylesheet && writer.stylesheet.is_empty() {
            return Err(ConfigError::Validation(
                "writer.embed_stylesheet requires at least one stylesheet".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let writer = &mut self.writer;
        if let Some(ref link) = writer.link {
            writer.link = Some(expand::expand_env(link, "writer.link")?);
        }
        if let Some(ref top) = writer.top {
            writer.top = Some(expand::expand_env(top, "writer.top")?);
        }
        writer.language_code = expand::expand_env(&writer.language_code, "writer.language_code")?;
        writer.stylesheet = writer
            .stylesheet
            .iter()
            .map(|s| expand::expand_path(s, "writer.stylesheet"))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    /// Directory holding the loaded config file.
    fn config_dir(&self) -> Option<PathBuf> {
        let path = self.config_path.as_deref()?;
        Some(path.parent().unwrap_or(Path::new(".")).to_path_buf())
    }

    /// Resolve relative stylesheet file paths against the config directory.
    ///
    /// Only embedded stylesheets are files; linked ones are URLs and are kept.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if !self.writer.embed_stylesheet {
            return;
        }
        for stylesheet in &mut self.writer.stylesheet {
            if Path::new(stylesheet.as_str()).is_relative() {
                *stylesheet = config_dir.join(&*stylesheet).to_string_lossy().into_owned();
            }
        }
    }

    /// Writer settings described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the header level is out of range.
    pub fn writer_settings(&self) -> Result<WriterSettings, ConfigError> {
        let writer = &self.writer;
        let level = HeaderLevel::try_from(writer.initial_header_level)
            .map_err(|e| ConfigError::Validation(format!("writer.initial_header_level: {e}")))?;

        let mut settings = WriterSettings::default()
            .with_initial_header_level(level)
            .with_system_messages(!writer.no_system_messages)
            .with_foot_hyperlinks(writer.foot_hyperlinks)
            .with_stylesheets(writer.stylesheet.iter().cloned())
            .with_embedded_stylesheet(writer.embed_stylesheet)
            .with_language_code(writer.language_code.trim());
        if let Some(link) = &writer.link {
            settings = settings.with_link_label(link.clone());
        }
        if let Some(top) = &writer.top {
            settings = settings.with_top_label(top.clone());
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.writer.initial_header_level, 1);
        assert!(!config.writer.no_system_messages);
        assert!(config.writer.stylesheet.is_empty());
        assert_eq!(config.writer.language_code, "en");
        assert!(config.config_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.writer.initial_header_level, 1);
        assert_eq!(config.writer.language_code, "en");
    }

    #[test]
    fn test_parse_writer_config() {
        let toml = r#"
[writer]
initial_header_level = 2
no_system_messages = true
foot_hyperlinks = true
stylesheet = "base.css, print.css,"
link = "link"
top = "top"
language_code = "cs"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let writer = &config.writer;
        assert_eq!(writer.initial_header_level, 2);
        assert!(writer.no_system_messages);
        assert!(writer.foot_hyperlinks);
        assert_eq!(writer.stylesheet, vec!["base.css", "print.css"]);
        assert_eq!(writer.link.as_deref(), Some("link"));
        assert_eq!(writer.top.as_deref(), Some("top"));
        assert_eq!(writer.language_code, "cs");
    }

    #[test]
    fn test_parse_stylesheet_array() {
        let toml = r#"
[writer]
stylesheet = ["a.css", " b.css ", ""]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.writer.stylesheet, vec!["a.css", "b.css"]);
    }

    #[test]
    fn test_writer_settings() {
        let toml = r#"
[writer]
initial_header_level = 3
no_system_messages = true
stylesheet = "site.css"
top = "up"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let settings = config.writer_settings().unwrap();

        assert_eq!(settings.initial_header_level.get(), 3);
        assert!(settings.no_system_messages);
        assert!(!settings.foot_hyperlinks);
        assert_eq!(settings.stylesheets, vec!["site.css"]);
        assert_eq!(settings.link, None);
        assert_eq!(settings.top.as_deref(), Some("up"));
        assert_eq!(settings.language_code, "en");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[writer]\ninitial_header_level = 2\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.writer.initial_header_level, 2);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[writer\n");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_embedded_stylesheets_resolved_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[writer]\nstylesheet = [\"css/site.css\", \"/abs/print.css\"]\nembed_stylesheet = true\n",
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(
            config.writer.stylesheet,
            vec![
                dir.path().join("css/site.css").to_string_lossy().into_owned(),
                "/abs/print.css".to_owned(),
            ]
        );
    }

    #[test]
    fn test_embedding_override_resolves_file_stylesheets() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[writer]\nstylesheet = \"css/site.css\"\n");
        let overrides = Overrides {
            embed_stylesheet: Some(true),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&overrides)).unwrap();
        assert!(config.writer.embed_stylesheet);
        assert_eq!(
            config.writer.stylesheet,
            vec![dir.path().join("css/site.css").to_string_lossy().into_owned()]
        );
    }

    #[test]
    fn test_stylesheet_override_kept_as_given() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[writer]\nembed_stylesheet = true\nstylesheet = \"a.css\"\n");
        let overrides = Overrides {
            stylesheets: Some(vec!["local/b.css".to_owned()]),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&overrides)).unwrap();
        assert_eq!(config.writer.stylesheet, vec!["local/b.css"]);
    }

    #[test]
    fn test_linked_stylesheets_not_resolved() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[writer]\nstylesheet = \"css/site.css\"\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.writer.stylesheet, vec!["css/site.css"]);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[writer]\ninitial_header_level = 2\nlink = \"link\"\nlanguage_code = \"en\"\n",
        );
        let overrides = Overrides {
            initial_header_level: Some(4),
            foot_hyperlinks: Some(true),
            language_code: Some("fr".to_owned()),
            ..Overrides::default()
        };

        let config = Config::load(Some(&path), Some(&overrides)).unwrap();
        assert_eq!(config.writer.initial_header_level, 4);
        assert!(config.writer.foot_hyperlinks);
        assert_eq!(config.writer.language_code, "fr");
        assert_eq!(config.writer.link.as_deref(), Some("link"));
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = Config::default();
        config.apply_overrides(&Overrides::default());
        assert_eq!(config.writer.initial_header_level, 1);
        assert_eq!(config.writer.language_code, "en");
        assert!(config.writer.top.is_none());
    }

    #[test]
    fn test_validate_header_level() {
        let mut config = Config::default();
        config.writer.initial_header_level = 7;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("initial_header_level"));
        assert!(config.writer_settings().is_err());
    }

    #[test]
    fn test_validate_language_code() {
        let mut config = Config::default();
        config.writer.language_code = "  ".to_owned();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("language_code")
        ));
    }

    #[test]
    fn test_validate_embed_requires_stylesheet() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[writer]\nembed_stylesheet = true\n");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("embed_stylesheet"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TINYHTML_TEST_TOP", "back to top");
            std::env::remove_var("TINYHTML_TEST_UNSET_LANG");
        }

        let toml = r#"
[writer]
top = "${TINYHTML_TEST_TOP}"
language_code = "${TINYHTML_TEST_UNSET_LANG:-sk}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.writer.top.as_deref(), Some("back to top"));
        assert_eq!(config.writer.language_code, "sk");

        unsafe {
            std::env::remove_var("TINYHTML_TEST_TOP");
        }
    }

    #[test]
    fn test_expand_env_vars_missing() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TINYHTML_TEST_NO_LINK");
        }
        let mut config: Config =
            toml::from_str("[writer]\nlink = \"${TINYHTML_TEST_NO_LINK}\"\n").unwrap();

        let err = config.expand_env_vars().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "writer.link"));
    }

    #[test]
    fn test_loaded_config_renders() {
        let dir = TempDir::new().unwrap();
        let css = dir.path().join("site.css");
        fs::write(&css, "p { color: red; }\n").unwrap();
        let path = write_config(
            &dir,
            "[writer]\nstylesheet = \"site.css\"\nembed_stylesheet = true\nlanguage_code = \"de\"\n",
        );

        let config = Config::load(Some(&path), None).unwrap();
        let settings = config.writer_settings().unwrap();
        let doc = tinyhtml_writer::DocumentNode::new(tinyhtml_writer::NodeKind::Document);
        let result = tinyhtml_writer::render(&doc, &settings).unwrap();

        assert!(result.html.contains("<html lang=\"de\">"));
        assert!(result.html.contains("p { color: red; }"));
    }
}
