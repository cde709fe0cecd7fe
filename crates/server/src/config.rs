use plategate::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Path cameras POST their events to
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// Root directory for archived XML and images
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Ingestion pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            endpoint_path: default_endpoint_path(),
            storage_dir: default_storage_dir(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.{toml,yaml,json}`
    /// file and `PLATEGATE_SERVER__*` environment variables, in that order.
    pub fn load() -> anyhow::Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("PLATEGATE_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.endpoint_path.starts_with('/') {
            anyhow::bail!("endpoint_path must start with '/': {:?}", self.endpoint_path);
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.max_body_size_mb == 0 {
            anyhow::bail!("max_body_size_mb must be greater than zero");
        }
        self.pipeline.validate()?;
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_endpoint_path() -> String {
    "/api/v1/lpr/events".to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("storage")
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
