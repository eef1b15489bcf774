use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PrTallyError;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Top-level configuration loaded from `.prtally.toml`.
///
/// Supports layered resolution: CLI flags > action inputs > local config > defaults.
///
/// # Examples
///
/// ```
/// use prtally_core::PrTallyConfig;
///
/// let config = PrTallyConfig::default();
/// assert_eq!(config.github.api_base_url, "https://api.github.com");
/// assert!(!config.comment.skip_existing);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrTallyConfig {
    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,
    /// Summary comment behavior.
    #[serde(default)]
    pub comment: CommentConfig,
}

impl PrTallyConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PrTallyError::Io`] if the file cannot be read, or
    /// [`PrTallyError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use prtally_core::PrTallyConfig;
    /// use std::path::Path;
    ///
    /// let config = PrTallyConfig::from_file(Path::new(".prtally.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, PrTallyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`PrTallyError::Toml`] if parsing fails, or
    /// [`PrTallyError::Config`] if `github.api_base_url` is not an http(s) URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtally_core::PrTallyConfig;
    ///
    /// let toml = r#"
    /// [comment]
    /// skip_existing = true
    /// "#;
    /// let config = PrTallyConfig::from_toml(toml).unwrap();
    /// assert!(config.comment.skip_existing);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, PrTallyError> {
        let config: Self = toml::from_str(content)?;
        config.github.validate()?;
        Ok(config)
    }
}

/// GitHub API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST base URL; override for GitHub Enterprise Server.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

impl GitHubConfig {
    fn validate(&self) -> Result<(), PrTallyError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(PrTallyError::Config(format!(
                "github.api_base_url must be an http(s) URL, got '{url}'"
            )));
        }
        Ok(())
    }
}

/// Summary comment configuration.
///
/// # Examples
///
/// ```
/// use prtally_core::CommentConfig;
///
/// assert!(!CommentConfig::default().skip_existing);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentConfig {
    /// Skip posting when an identical summary comment is already on the PR
    /// (default: false).
    #[serde(default)]
    pub skip_existing: bool,
}
