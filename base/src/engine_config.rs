use crate::error::{CamundaError, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENGINE_URL: &str = "http://localhost:8080/engine-rest";
pub const DEFAULT_USER_AGENT: &str = "camunda-rest-rs";

/// Connection settings for a Camunda engine REST endpoint.
///
/// # Environment Variables
/// - `CAMUNDA_URL`: engine REST base url (default: http://localhost:8080/engine-rest)
/// - `CAMUNDA_USERNAME` / `CAMUNDA_PASSWORD`: HTTP basic auth (optional)
/// - `CAMUNDA_TOKEN`: bearer token, used when no username is set (optional)
/// - `CAMUNDA_CONNECT_TIMEOUT_SEC`: connect timeout in seconds (default: 10)
/// - `CAMUNDA_REQUEST_TIMEOUT_SEC`: whole request timeout in seconds (default: 60)
/// - `CAMUNDA_USER_AGENT`: user agent header (default: camunda-rest-rs)
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "default_url")]
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    #[serde(default = "default_connect_timeout_sec")]
    pub connect_timeout_sec: u64,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_url() -> String {
    DEFAULT_ENGINE_URL.to_string()
}
fn default_connect_timeout_sec() -> u64 {
    10
}
fn default_request_timeout_sec() -> u64 {
    60
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: None,
            password: None,
            token: None,
            connect_timeout_sec: default_connect_timeout_sec(),
            request_timeout_sec: default_request_timeout_sec(),
            user_agent: default_user_agent(),
        }
    }
}

impl EngineConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.url).map_err(|e| {
            CamundaError::InvalidParameter(format!(
                "cannot parse engine url: {}, error= {:?}",
                self.url, e
            ))
        })
    }
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_sec)
    }
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_sec)
    }
}

pub fn load_engine_config_from_env() -> Result<EngineConfig> {
    envy::prefixed("CAMUNDA_")
        .from_env::<EngineConfig>()
        .map_err(|e| CamundaError::ConfigError(format!("cannot read engine config from env: {e:?}")))
}
