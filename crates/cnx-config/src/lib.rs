//! Configuration management for the CNXML renderer.
//!
//! Parses `cnx.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `links.base_url`
//! - `links.document_template`
//! - `links.latest_template`
//! - `links.resource_template`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the processor list.
    pub processors: Option<Vec<String>>,
    /// Override the resources directory.
    pub resources_dir: Option<PathBuf>,
    /// Override the link base URL.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "cnx.toml";

/// Processors built into the renderer.
const KNOWN_PROCESSORS: &[&str] = &["links"];

/// Template placeholders.
const DOCUMENT_PLACEHOLDER: &str = "{document}";
const RESOURCE_PLACEHOLDER: &str = "{resource}";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Link URL templates.
    pub links: LinksConfig,
    /// Resource configuration (paths are relative strings from TOML).
    resources: ResourcesConfigRaw,

    /// Resolved resources configuration (set after loading).
    #[serde(skip)]
    pub resources_resolved: ResourcesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Processors to run before generation, in order.
    pub processors: Vec<String>,
    /// Namespace URI treated as CNXML.
    pub cnxml_namespace: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            processors: vec!["links".to_owned()],
            cnxml_namespace: "http://cnx.rice.edu/cnxml".to_owned(),
        }
    }
}

/// Link URL templates.
///
/// Templates use `{document}`, `{version}` and `{resource}` placeholders.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Specific version of a document.
    pub document_template: String,
    /// Latest version of a document.
    pub latest_template: String,
    /// Resource belonging to another document.
    pub resource_template: String,
    /// Prefix for generated and root-relative URLs.
    pub base_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            document_template: "/content/{document}/{version}/".to_owned(),
            latest_template: "/content/{document}/latest/".to_owned(),
            resource_template: "/content/{document}/{version}/{resource}".to_owned(),
            base_url: String::new(),
        }
    }
}

/// Raw resources configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ResourcesConfigRaw {
    dir: Option<String>,
}

/// Resolved resources configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ResourcesConfig {
    /// Directory whose files make up the module's resources.
    pub dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
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
        /// Config field path (e.g., "`links.base_url`").
        field: String,
        /// Error message (e.g., "${`CNX_BASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a template to contain a placeholder.
fn require_placeholder(template: &str, placeholder: &str, field: &str) -> Result<(), ConfigError> {
    if !template.contains(placeholder) {
        return Err(ConfigError::Validation(format!(
            "{field} must contain {placeholder}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `cnx.toml` in current directory and parents.
    /// With no file found, defaults apply.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(processors) = &settings.processors {
            self.render.processors.clone_from(processors);
        }
        if let Some(dir) = &settings.resources_dir {
            self.resources_resolved.dir = Some(dir.clone());
        }
        if let Some(base_url) = &settings.base_url {
            self.links.base_url.clone_from(base_url);
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
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

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.validate_links()?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.cnxml_namespace, "render.cnxml_namespace")?;

        for (i, name) in self.render.processors.iter().enumerate() {
            if !KNOWN_PROCESSORS.contains(&name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "render.processors: unknown processor '{name}' (known: {})",
                    KNOWN_PROCESSORS.join(", ")
                )));
            }
            if self.render.processors[..i].contains(name) {
                return Err(ConfigError::Validation(format!(
                    "render.processors: '{name}' listed more than once"
                )));
            }
        }
        Ok(())
    }

    fn validate_links(&self) -> Result<(), ConfigError> {
        let links = &self.links;
        require_placeholder(
            &links.document_template,
            DOCUMENT_PLACEHOLDER,
            "links.document_template",
        )?;
        require_placeholder(
            &links.latest_template,
            DOCUMENT_PLACEHOLDER,
            "links.latest_template",
        )?;
        require_placeholder(
            &links.resource_template,
            RESOURCE_PLACEHOLDER,
            "links.resource_template",
        )?;
        if links.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "links.base_url must not end with '/'".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let links = &mut self.links;
        links.base_url = expand::expand_env(&links.base_url, "links.base_url")?;
        links.document_template =
            expand::expand_env(&links.document_template, "links.document_template")?;
        links.latest_template =
            expand::expand_env(&links.latest_template, "links.latest_template")?;
        links.resource_template =
            expand::expand_env(&links.resource_template, "links.resource_template")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.resources_resolved = ResourcesConfig {
            dir: self.resources.dir.as_deref().map(|dir| config_dir.join(dir)),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.processors, vec!["links".to_owned()]);
        assert_eq!(config.render.cnxml_namespace, "http://cnx.rice.edu/cnxml");
        assert_eq!(config.links.document_template, "/content/{document}/{version}/");
        assert_eq!(config.links.latest_template, "/content/{document}/latest/");
        assert_eq!(
            config.links.resource_template,
            "/content/{document}/{version}/{resource}"
        );
        assert_eq!(config.links.base_url, "");
        assert!(config.resources_resolved.dir.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.processors, vec!["links".to_owned()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[render]
processors = []
cnxml_namespace = "urn:cnxml"

[links]
document_template = "/d/{document}@{version}"
latest_template = "/d/{document}"
resource_template = "/r/{document}/{resource}"
base_url = "https://archive.example.org"

[resources]
dir = "media"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.render.processors.is_empty());
        assert_eq!(config.render.cnxml_namespace, "urn:cnxml");
        assert_eq!(config.links.document_template, "/d/{document}@{version}");
        assert_eq!(config.links.latest_template, "/d/{document}");
        assert_eq!(config.links.resource_template, "/r/{document}/{resource}");
        assert_eq!(config.links.base_url, "https://archive.example.org");
        assert_eq!(config.resources.dir.as_deref(), Some("media"));
    }

    #[test]
    fn test_resolve_paths() {
        let mut config: Config = toml::from_str("[resources]\ndir = \"media\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.resources_resolved.dir,
            Some(PathBuf::from("/project/media"))
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            processors: Some(Vec::new()),
            resources_dir: Some(PathBuf::from("/tmp/resources")),
            base_url: Some("https://cnx.example.org".to_owned()),
        };

        config.apply_cli_settings(&overrides);

        assert!(config.render.processors.is_empty());
        assert_eq!(
            config.resources_resolved.dir,
            Some(PathBuf::from("/tmp/resources"))
        );
        assert_eq!(config.links.base_url, "https://cnx.example.org");
        assert_eq!(config.links.latest_template, "/content/{document}/latest/"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.render.processors, vec!["links".to_owned()]);
        assert!(config.resources_resolved.dir.is_none());
    }

    #[test]
    fn test_expand_env_vars_links() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CNX_TEST_ARCHIVE", "https://archive.test");
            std::env::remove_var("CNX_TEST_LATEST");
        }

        let toml = r#"
[links]
base_url = "${CNX_TEST_ARCHIVE}"
latest_template = "${CNX_TEST_LATEST:-/latest}/{document}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.links.base_url, "https://archive.test");
        assert_eq!(config.links.latest_template, "/latest/{document}");

        unsafe {
            std::env::remove_var("CNX_TEST_ARCHIVE");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CNX_TEST_MISSING");
        }

        let mut config: Config =
            toml::from_str("[links]\nbase_url = \"${CNX_TEST_MISSING}\"\n").unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CNX_TEST_MISSING"));
        assert!(err.to_string().contains("links.base_url"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_unknown_processor() {
        let mut config = Config::default();
        config.render.processors = vec!["links".to_owned(), "mathml2png".to_owned()];
        assert_validation_error(&config, &["render.processors", "mathml2png"]);
    }

    #[test]
    fn test_validate_duplicate_processor() {
        let mut config = Config::default();
        config.render.processors = vec!["links".to_owned(), "links".to_owned()];
        assert_validation_error(&config, &["render.processors", "more than once"]);
    }

    #[test]
    fn test_validate_empty_namespace() {
        let mut config = Config::default();
        config.render.cnxml_namespace = String::new();
        assert_validation_error(&config, &["render.cnxml_namespace"]);
    }

    #[test]
    fn test_validate_template_placeholders() {
        let mut config = Config::default();
        config.links.latest_template = "/content/latest/".to_owned();
        assert_validation_error(&config, &["links.latest_template", "{document}"]);

        let mut config = Config::default();
        config.links.resource_template = "/content/{document}/".to_owned();
        assert_validation_error(&config, &["links.resource_template", "{resource}"]);
    }

    #[test]
    fn test_validate_base_url_trailing_slash() {
        let mut config = Config::default();
        config.links.base_url = "https://archive.example.org/".to_owned();
        assert_validation_error(&config, &["links.base_url"]);
    }

    // File loading tests

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[links]\nbase_url = \"https://archive.example.org\"\n\n[resources]\ndir = \"media\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.links.base_url, "https://archive.example.org");
        assert_eq!(config.resources_resolved.dir, Some(dir.path().join("media")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[render\nprocessors = 1").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[render]\nprocessors = [\"nope\"]\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err:?}");
    }

    #[test]
    fn test_load_applies_cli_settings_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[links]\nbase_url = \"/from-file\"\n").unwrap();

        let settings = CliSettings {
            base_url: Some("/from-cli".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.links.base_url, "/from-cli");
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            processors: Some(vec!["bogus".to_owned()]),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err:?}");
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        assert_eq!(Config::discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_nearest_wins() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        let nearest = nested.join(CONFIG_FILENAME);
        std::fs::write(&nearest, "").unwrap();

        assert_eq!(Config::discover_config(&nested), Some(nearest));
    }
}
