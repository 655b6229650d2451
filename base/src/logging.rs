use crate::error::{CamundaError, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// # Environment Variables
/// - `LOG_LEVEL`: default filter directive (default: info). `RUST_LOG` wins when set.
/// - `LOG_FORMAT`: `plain` or `json` (default: plain)
#[derive(Deserialize, Clone, Debug)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::Plain,
        }
    }
}

pub fn load_tracing_config_from_env() -> Result<LoggingConfig> {
    envy::prefixed("LOG_")
        .from_env::<LoggingConfig>()
        .map_err(|e| CamundaError::ConfigError(format!("cannot read log config from env: {e:?}")))
}

// call once per process (binaries only)
pub fn tracing_init(conf: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&conf.level))
        .map_err(|e| CamundaError::ConfigError(format!("invalid log level: {e:?}")))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let res = match conf.format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    res.map_err(|e| CamundaError::ConfigError(format!("tracing init error: {e:?}")))
}
