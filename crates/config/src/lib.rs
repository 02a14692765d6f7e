use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "chathub.toml",
    "config/chathub.toml",
    "crates/config/chathub.toml",
    "../chathub.toml",
    "../config/chathub.toml",
    "../crates/config/chathub.toml",
];

/// Plain `PORT` variable honoured for compatibility with hosting platforms.
const PORT_VARIABLE: &str = "PORT";
const PREFIXED_PORT_VARIABLE: &str = "CHATHUB__HTTP__PORT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    #[serde(default)]
    pub hub: HubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl HttpConfig {
    /// Socket address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// Tuning for the in-memory hub.
///
/// ```
/// use chathub_config::HubConfig;
///
/// let hub = HubConfig::default();
/// assert!(hub.max_messages_per_chat.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubConfig {
    /// Upper bound on messages kept per conversation. `None` keeps everything.
    #[serde(default)]
    pub max_messages_per_chat: Option<usize>,
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use chathub_config::load;
///
/// std::env::remove_var("CHATHUB_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())
        .context("invalid default for http.address")?
        .set_default("http.port", i64::from(defaults.http.port))
        .context("invalid default for http.port")?;

    let environment_overrides = config::Environment::with_prefix("CHATHUB").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("CHATHUB_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via CHATHUB_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if std::env::var(PREFIXED_PORT_VARIABLE).is_err() {
        if let Ok(raw) = std::env::var(PORT_VARIABLE) {
            config.http.port = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {PORT_VARIABLE} value {raw:?}"))?;
        }
    }

    if config.hub.max_messages_per_chat == Some(0) {
        config.hub.max_messages_per_chat = None;
    }

    debug!(?config, "loaded hub configuration");
    Ok(config)
}
