//! Configuration file support for bellhop.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. Environment variables (prefixed with `BELLHOP_`, sections split by `__`,
//!    e.g. `BELLHOP_TUMBLR__CONSUMER_KEY`)
//! 2. Local config file (./bellhop.toml)
//! 3. XDG config file (~/.config/bellhop/config.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite://~/.local/state/bellhop/bellhop.db?mode=rwc"  # optional, this is the default
//!
//! [media]
//! root = "/srv/bellhop/media"  # optional, defaults to the XDG data dir
//!
//! [tumblr]
//! blog = "someblog"
//! consumer_key = "..."
//! consumer_secret = "..."
//! oauth_token = "..."
//! oauth_secret = "..."
//! ```

use std::path::PathBuf;

use bellhop::tumblr::OAuthCredentials;
use config::{Config as ConfigBuilder, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

const APP_NAME: &str = "bellhop";
const ENV_PREFIX: &str = "BELLHOP";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub media: MediaConfig,
    pub tumblr: TumblrConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL.
    /// Defaults to `sqlite://<state dir>/bellhop.db?mode=rwc` if not specified.
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Directory that receives downloaded photos and videos.
    pub root: Option<PathBuf>,
}

/// Tumblr account and application credentials.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct TumblrConfig {
    /// The blog whose posts are mirrored and then deleted remotely.
    pub blog: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub oauth_token: Option<String>,
    pub oauth_secret: Option<String>,
}

impl std::fmt::Debug for TumblrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("TumblrConfig")
            .field("blog", &self.blog)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("oauth_token", &redact(&self.oauth_token))
            .field("oauth_secret", &redact(&self.oauth_secret))
            .finish()
    }
}

/// A required setting was absent from every source.
#[derive(Debug, thiserror::Error)]
#[error("missing configuration value `{key}` (set it in config.toml or {env})")]
pub struct MissingSetting {
    pub key: &'static str,
    pub env: &'static str,
}

fn required(value: &Option<String>, key: &'static str, env: &'static str) -> Result<String, MissingSetting> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(MissingSetting { key, env })
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// A broken source is logged and the built-in defaults are used instead.
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("bellhop.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./bellhop.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(Self::environment());

        match Self::from_builder(builder) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config: {}", e);
                Config::default()
            }
        }
    }

    /// `BELLHOP_TUMBLR__CONSUMER_KEY` -> `tumblr.consumer_key`.
    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize::<Config>()
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The `mode=rwc` parameter creates the SQLite file if it doesn't exist.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("bellhop.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// Get the media root, falling back to `<data dir>/media`.
    pub fn media_root(&self) -> Option<PathBuf> {
        self.media
            .root
            .clone()
            .or_else(|| Self::default_data_dir().map(|dir| dir.join("media")))
    }

    pub fn tumblr_blog(&self) -> Result<String, MissingSetting> {
        required(&self.tumblr.blog, "tumblr.blog", "BELLHOP_TUMBLR__BLOG")
    }

    pub fn tumblr_credentials(&self) -> Result<OAuthCredentials, MissingSetting> {
        let t = &self.tumblr;
        Ok(OAuthCredentials {
            consumer_key: required(
                &t.consumer_key,
                "tumblr.consumer_key",
                "BELLHOP_TUMBLR__CONSUMER_KEY",
            )?,
            consumer_secret: required(
                &t.consumer_secret,
                "tumblr.consumer_secret",
                "BELLHOP_TUMBLR__CONSUMER_SECRET",
            )?,
            token: required(
                &t.oauth_token,
                "tumblr.oauth_token",
                "BELLHOP_TUMBLR__OAUTH_TOKEN",
            )?,
            token_secret: required(
                &t.oauth_secret,
                "tumblr.oauth_secret",
                "BELLHOP_TUMBLR__OAUTH_SECRET",
            )?,
        })
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/bellhop` or `~/.local/state/bellhop`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| {
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_toml(content: &str) -> Config {
        Config::from_builder(
            ConfigBuilder::builder().add_source(File::from_str(content, FileFormat::Toml)),
        )
        .expect("valid config")
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database.url.is_none());
        assert!(config.media.root.is_none());
        assert!(config.tumblr.blog.is_none());
        assert!(config.tumblr_credentials().is_err());
    }

    #[test]
    fn test_full_config_parsing() {
        let config = from_toml(
            r#"
            [database]
            url = "sqlite:///tmp/b.db?mode=rwc"

            [media]
            root = "/tmp/media"

            [tumblr]
            blog = "someblog"
            consumer_key = "ck"
            consumer_secret = "cs"
            oauth_token = "tk"
            oauth_secret = "ts"
        "#,
        );

        assert_eq!(
            config.database_url().as_deref(),
            Some("sqlite:///tmp/b.db?mode=rwc")
        );
        assert_eq!(config.media_root(), Some(PathBuf::from("/tmp/media")));
        assert_eq!(config.tumblr_blog().expect("blog"), "someblog");

        let creds = config.tumblr_credentials().expect("credentials");
        assert_eq!(creds.consumer_key, "ck");
        assert_eq!(creds.consumer_secret, "cs");
        assert_eq!(creds.token, "tk");
        assert_eq!(creds.token_secret, "ts");
    }

    #[test]
    fn test_missing_credential_names_key_and_env() {
        let config = from_toml(
            r#"
            [tumblr]
            consumer_key = "ck"
            consumer_secret = "  "
        "#,
        );
        let err = config.tumblr_credentials().expect_err("secret is blank");
        assert_eq!(err.key, "tumblr.consumer_secret");
        assert!(err.to_string().contains("BELLHOP_TUMBLR__CONSUMER_SECRET"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let env: HashMap<String, String> = HashMap::from([
            (
                "BELLHOP_TUMBLR__CONSUMER_KEY".to_string(),
                "from-env".to_string(),
            ),
            (
                "BELLHOP_DATABASE__URL".to_string(),
                "sqlite::memory:".to_string(),
            ),
        ]);
        let builder = ConfigBuilder::builder()
            .add_source(File::from_str(
                r#"
                [tumblr]
                consumer_key = "from-file"
                blog = "someblog"
            "#,
                FileFormat::Toml,
            ))
            .add_source(Config::environment().source(Some(env)));
        let config = Config::from_builder(builder).expect("config");

        assert_eq!(config.tumblr.consumer_key.as_deref(), Some("from-env"));
        assert_eq!(config.tumblr.blog.as_deref(), Some("someblog"));
        assert_eq!(config.database_url().as_deref(), Some("sqlite::memory:"));
    }

    #[test]
    fn test_database_url_defaults_to_state_dir() {
        let url = Config::default().database_url().expect("default url");
        assert!(url.starts_with("sqlite://"));
        assert!(url.contains("bellhop.db"));
        assert!(url.ends_with("?mode=rwc"));
    }

    #[test]
    fn test_media_root_defaults_to_data_dir() {
        let root = Config::default().media_root().expect("default root");
        assert!(root.ends_with("media"));
        assert!(root.to_string_lossy().contains("bellhop"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = from_toml(
            r#"
            [tumblr]
            consumer_secret = "hunter2"
            oauth_secret = "swordfish"
        "#,
        );
        let debug = format!("{:?}", config.tumblr);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("swordfish"));
    }

    #[test]
    fn test_config_invalid_toml() {
        let result = ConfigBuilder::builder()
            .add_source(File::from_str("[tumblr\nblog = 1", FileFormat::Toml))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_unknown_fields_ignored() {
        let config = from_toml(
            r#"
            [tumblr]
            blog = "someblog"
            unknown_field = "should be ignored"
        "#,
        );
        assert_eq!(config.tumblr.blog.as_deref(), Some("someblog"));
    }
}
