//! Settings / Configuration.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

/// Names of environments for avs-server.
/// Overrides serialization to force lower case in settings and
/// environment variables
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    /// Local environment (local testing).
    Local,
    /// Official Develop environment.
    Dev,
    /// Official environment.
    Staging,
    /// Official Production environment.
    Prod,
}

/// Implement display to force environment to lower case
impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

/// Server settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    /// Server [AppEnvironment].
    pub environment: AppEnvironment,
    /// Server port.
    pub port: u16,
    /// Inbound request timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Yoti AVS settings: credentials and endpoints for the hosted
/// age verification service.
#[derive(Clone, Debug, Deserialize)]
pub struct Yoti {
    /// SDK id issued by the Yoti Hub, sent as the `Yoti-SDK-Id` header
    /// and echoed into the hosted-flow redirect.
    pub client_sdk_id: String,
    /// API key for the `Authorization: Bearer` header.
    pub bearer_token: String,
    /// Base URL of the AVS REST API.
    pub api_url: String,
    /// Base URL of the provider-hosted verification UI.
    pub web_url: String,
    /// URL the provider sends the browser back to once the hosted flow
    /// finishes.
    pub callback_url: String,
}

/// Settings for Http clients.
#[derive(Clone, Debug, Deserialize)]
pub struct HttpClient {
    /// Optional timeout for idle sockets being kept-alive.
    /// Using `None` to disable timeout.
    pub pool_idle_timeout_ms: Option<u64>,
    /// Optional per-request timeout in milliseconds. Unset means calls
    /// to the provider wait indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self {
            pool_idle_timeout_ms: Some(5_000),
            timeout_ms: None,
        }
    }
}

impl HttpClient {
    /// Convert `pool_idle_timeout_ms` to [Duration].
    pub fn pool_idle_timeout(&self) -> Option<Duration> {
        self.pool_idle_timeout_ms.and_then(|timeout| {
            if timeout != 0 {
                Some(Duration::from_millis(timeout))
            } else {
                None
            }
        })
    }

    /// Convert `timeout_ms` to [Duration].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Clone, Debug, Deserialize)]
/// Application settings.
pub struct Settings {
    /// Server settings
    pub server: Server,
    /// Provider credentials & endpoints
    pub yoti: Yoti,
    /// Outbound http-client settings
    #[serde(default)]
    pub http_client: HttpClient,
}

impl Settings {
    /// Load settings.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .unwrap_or(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/settings.toml"));
        // inject environment variables naming them properly on the settings
        // e.g. [yoti] bearer_token="foo"
        // would be injected with environment variable AVS_SERVER__YOTI__BEARER_TOKEN="foo"
        let s = Config::builder()
            .add_source(File::with_name(&path.as_path().display().to_string()))
            .add_source(
                Environment::with_prefix("AVS_SERVER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_http_client_settings() {
        let settings = HttpClient::default();

        assert_eq!(
            settings.pool_idle_timeout(),
            Some(Duration::from_millis(5_000))
        );
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn test_http_client_overrides() {
        let settings = HttpClient {
            pool_idle_timeout_ms: Some(0),
            timeout_ms: Some(100),
        };

        assert_eq!(settings.pool_idle_timeout(), None);
        assert_eq!(settings.timeout(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_load_shipped_settings() {
        let settings = Settings::load(None).unwrap();

        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.yoti.api_url, "https://age.yoti.com/api/v1");
        assert_eq!(settings.yoti.web_url, "https://age.yoti.com");
        // Shipped config leaves provider calls unbounded.
        assert_eq!(settings.http_client.timeout(), None);
    }
}
