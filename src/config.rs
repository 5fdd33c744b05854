//! Loads the TOML configuration file and normalizes it into [`Config`].
//!
//! Every key is optional; a missing file means all defaults.  Command-line
//! flags are applied on top in `main.rs`.
//!
//! ```toml
//! [api]
//! base_url = "https://ssot-api-staging.an.r.appspot.com"
//! timeout_secs = 30
//!
//! [auth]
//! api_key = "..."            # omit to run without signing in
//!
//! [ui]
//! language = "english"       # or "japanese"
//!
//! [logging]
//! level = "info"
//! file = "/tmp/kaigi-feeder.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::auth::IDENTITY_TOOLKIT_ENDPOINT;
use crate::model::Language;

pub const DEFAULT_BASE_URL: &str = "https://ssot-api-staging.an.r.appspot.com";
const APP_DIR: &str = "kaigi-feeder";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    api: RawApi,
    #[serde(default)]
    auth: RawAuth,
    #[serde(default)]
    ui: RawUi,
    #[serde(default)]
    logging: RawLogging,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawApi {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAuth {
    endpoint: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUi {
    language: Option<String>,
    tick_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLogging {
    level: Option<String>,
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    pub endpoint: String,
    /// No key means the app runs without an identity token.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub language: Language,
    pub tick: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout: Duration::from_secs(30),
                user_agent: format!("kaigi-feeder/{}", env!("CARGO_PKG_VERSION")),
            },
            auth: AuthConfig {
                endpoint: IDENTITY_TOOLKIT_ENDPOINT.to_string(),
                api_key: None,
            },
            ui: UiConfig {
                language: Language::default(),
                tick: Duration::from_millis(100),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: default_log_file(),
            },
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Read `path`; a file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(base_url) = raw.api.base_url {
            config.set_base_url(base_url)?;
        }
        match raw.api.timeout_secs {
            Some(0) => {
                return Err(ConfigError::Invalid("api.timeout_secs must be positive".into()));
            }
            Some(secs) => config.api.timeout = Duration::from_secs(secs),
            None => {}
        }
        if let Some(user_agent) = raw.api.user_agent {
            config.api.user_agent = user_agent;
        }

        if let Some(endpoint) = raw.auth.endpoint {
            config.auth.endpoint = endpoint;
        }
        config.auth.api_key = raw.auth.api_key.filter(|k| !k.trim().is_empty());

        if let Some(s) = raw.ui.language.as_deref() {
            config.ui.language = Language::from_wire(s)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown ui.language {s:?}")))?;
        }
        if let Some(ms) = raw.ui.tick_ms {
            config.ui.tick = Duration::from_millis(ms.max(10));
        }

        if let Some(level) = raw.logging.level {
            if level.parse::<LevelFilter>().is_err() {
                return Err(ConfigError::Invalid(format!("unknown logging.level {level:?}")));
            }
            config.logging.level = level;
        }
        if let Some(file) = raw.logging.file {
            config.logging.file = file;
        }

        Ok(config)
    }

    /// Point the feed client at `base_url`, which must be http(s).
    pub fn set_base_url(&mut self, base_url: String) -> Result<(), ConfigError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got {base_url:?}"
            )));
        }
        self.api.base_url = base_url;
        Ok(())
    }
}

/// `<config dir>/kaigi-feeder/config.toml`, or `./config.toml` when the
/// platform has no config dir.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("kaigi-feeder.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.ui.language, Language::Japanese);
        assert_eq!(config.auth.api_key, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn values_override_defaults() {
        let config = Config::from_toml(
            r#"
[api]
base_url = "http://localhost:8080"
timeout_secs = 5

[auth]
api_key = "secret"

[ui]
language = "english"
tick_ms = 250

[logging]
level = "debug"
file = "/tmp/feeder.log"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout, Duration::from_secs(5));
        assert_eq!(config.auth.api_key.as_deref(), Some("secret"));
        assert_eq!(config.ui.language, Language::English);
        assert_eq!(config.ui.tick, Duration::from_millis(250));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, PathBuf::from("/tmp/feeder.log"));
    }

    #[test]
    fn blank_api_key_counts_as_absent() {
        let config = Config::from_toml("[auth]\napi_key = \"  \"\n").unwrap();
        assert_eq!(config.auth.api_key, None);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = Config::from_toml("[ui]\nlanguage = \"french\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = Config::from_toml("[api]\nbase_url = \"ftp://example.com\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_section_is_a_toml_error() {
        let err = Config::from_toml("[database]\npath = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn misspelled_key_inside_a_section_is_rejected() {
        let err = Config::from_toml("[api]\nbase_ur = \"http://localhost:1\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "got {err:?}");
        let err = Config::from_toml("[logging]\nlevl = \"debug\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "got {err:?}");
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = Config::from_toml("[logging]\nlevel = \"chatty\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(Config::from_toml("[logging]\nlevel = \"off\"\n").is_ok());
    }

    #[test]
    fn base_url_override_is_validated() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_base_url("localhost:8080".into()),
            Err(ConfigError::Invalid(_))
        ));
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        config.set_base_url("http://localhost:8080".into()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\nlanguage = \"english\"").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.ui.language, Language::English);
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
