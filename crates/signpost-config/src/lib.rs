//! Configuration management for Signpost.
//!
//! Parses `signpost.toml` (or `signpost.json`) with serde and provides
//! auto-discovery of config files in parent directories. The nav bar and
//! sidebar declarations are turned into a validated navigation model with
//! [`SiteConfig::navigation`].
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base`
//! - `social_links[].link`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use signpost_nav::{ConfigError, Navigation, RawNavEntry, RawSidebar};

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site base path.
    pub base: Option<String>,
    /// Override build output directory.
    pub out_dir: Option<PathBuf>,
}

/// Configuration filenames searched for, in order of preference.
const CONFIG_FILENAMES: [&str; 2] = ["signpost.toml", "signpost.json"];

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site metadata.
    pub site: SiteMeta,
    /// Build settings (paths are relative strings from the file).
    build: BuildConfigRaw,
    /// Links to external profiles shown in the header.
    pub social_links: Vec<SocialLink>,
    /// Nav bar entries in display order.
    pub nav: Vec<RawNavEntry>,
    /// Sidebar declarations in display order.
    pub sidebar: Vec<RawSidebar>,

    /// Resolved build settings (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata passed through to the renderer.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteMeta {
    /// Site title.
    pub title: String,
    /// Site description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Base URL path the site is deployed under.
    pub base: String,
    /// Logo image path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Label for the "last updated" footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_text: Option<String>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            description: String::new(),
            base: "/".to_owned(),
            logo: None,
            last_updated_text: None,
        }
    }
}

/// External profile link.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SocialLink {
    /// Icon name, e.g. `github`.
    pub icon: String,
    /// Absolute URL.
    pub link: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    out_dir: Option<String>,
}

/// Resolved build settings with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory the generated site is written to.
    pub out_dir: PathBuf,
}

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base`").
        field: String,
        /// Error message (e.g., "${`SITE_BASE`} not set").
        message: String,
    },
    /// Invalid nav bar or sidebar declaration.
    #[error("Navigation error: {0}")]
    Navigation(#[from] ConfigError),
}

fn require_non_empty(value: &str, field: &str) -> Result<(), LoadError> {
    if value.is_empty() {
        return Err(LoadError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), LoadError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(LoadError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Bare `$VAR` is left untouched. `field` names the config key in errors.
fn expand_env(value: &str, field: &str) -> Result<String, LoadError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map_err(|err| LoadError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })?;
    Ok(expanded.into_owned())
}

impl SiteConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `signpost.toml` or `signpost.json` in the current
    /// directory and its parents, falling back to an empty configuration.
    ///
    /// CLI settings are applied after loading and take precedence over
    /// file values; validation runs last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, LoadError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(LoadError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No configuration file found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.normalize_base();
        config.validate()?;
        Ok(config)
    }

    /// Build the validated navigation model from `nav` and `sidebar`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Navigation`] for structurally invalid entries.
    pub fn navigation(&self) -> Result<Navigation, LoadError> {
        Ok(signpost_nav::build(&self.nav, &self.sidebar)?)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base) = &settings.base {
            self.site.base.clone_from(base);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.build_resolved.out_dir.clone_from(out_dir);
        }
    }

    /// Append the trailing slash a site-absolute base is missing.
    ///
    /// `/rookie-blog/dist` is accepted as `/rookie-blog/dist/`; a base
    /// without a leading slash is left for validation to reject.
    fn normalize_base(&mut self) {
        let base = &mut self.site.base;
        if base.starts_with('/') && !base.ends_with('/') {
            tracing::debug!(base = %base, "Appending trailing slash to site.base");
            base.push('/');
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            for name in CONFIG_FILENAMES {
                let candidate = current.join(name);
                if candidate.exists() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteMeta::default(),
            build: BuildConfigRaw::default(),
            social_links: Vec::new(),
            nav: Vec::new(),
            sidebar: Vec::new(),
            build_resolved: BuildConfig {
                out_dir: base.join("dist"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(path, &content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            nav_entries = config.nav.len(),
            sidebars = config.sidebar.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Parse file content, choosing the format by extension.
    fn parse(path: &Path, content: &str) -> Result<Self, LoadError> {
        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Validate configuration values.
    ///
    /// Navigation entries are validated separately by [`Self::navigation`].
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), LoadError> {
        self.validate_site()?;
        self.validate_social_links()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), LoadError> {
        let base = &self.site.base;
        if !base.starts_with('/') || !base.ends_with('/') {
            return Err(LoadError::Validation(format!(
                "site.base must start and end with '/', got {base:?}"
            )));
        }
        Ok(())
    }

    fn validate_social_links(&self) -> Result<(), LoadError> {
        for link in &self.social_links {
            require_non_empty(&link.icon, "social_links.icon")?;
            require_non_empty(&link.link, "social_links.link")?;
            require_http_url(&link.link, "social_links.link")?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), LoadError> {
        self.site.base = expand_env(&self.site.base, "site.base")?;
        for link in &mut self.social_links {
            link.link = expand_env(&link.link, "social_links.link")?;
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.build_resolved = BuildConfig {
            out_dir: config_dir.join(self.build.out_dir.as_deref().unwrap_or("dist")),
        };
    }
}
