//! Configuration management

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::idmapping::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::idmapping::poller::{
    DEFAULT_BACKOFF_FACTOR, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_INTERVAL, DEFAULT_POLL_INTERVAL,
    DEFAULT_POLL_TIMEOUT,
};
use crate::idmapping::{Backoff, PollPolicy, UniProtConfig};

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default CORS allowed origin.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "*";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub uniprot: UniProtConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsConfig {
    /// True when no origin restriction applies
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Build the backoff strategy named by `POLL_BACKOFF`
pub fn parse_backoff(kind: &str, factor: f64, max_interval: Duration) -> anyhow::Result<Backoff> {
    match kind.trim().to_lowercase().as_str() {
        "fixed" => Ok(Backoff::Fixed),
        "exponential" => Ok(Backoff::Exponential {
            factor,
            max_interval,
        }),
        other => anyhow::bail!(
            "Invalid POLL_BACKOFF '{}': expected 'fixed' or 'exponential'",
            other
        ),
    }
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Read configuration from environment variables without validating it
    pub fn from_env() -> anyhow::Result<Self> {
        let backoff = parse_backoff(
            &std::env::var("POLL_BACKOFF").unwrap_or_else(|_| "fixed".to_string()),
            env_or("POLL_BACKOFF_FACTOR", DEFAULT_BACKOFF_FACTOR),
            Duration::from_millis(env_or(
                "POLL_MAX_INTERVAL_MS",
                DEFAULT_MAX_INTERVAL.as_millis() as u64,
            )),
        )?;

        let poll = PollPolicy {
            interval: Duration::from_millis(env_or(
                "POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL.as_millis() as u64,
            )),
            backoff,
            max_attempts: env_or("POLL_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            timeout: Duration::from_secs(env_or("POLL_TIMEOUT_SECS", DEFAULT_POLL_TIMEOUT.as_secs())),
        };

        Ok(Config {
            server: ServerConfig {
                host: std::env::var("GENEFUNC_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_or("GENEFUNC_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or(
                    "GENEFUNC_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", false),
            },
            uniprot: UniProtConfig {
                base_url: std::env::var("UNIPROT_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                timeout_secs: env_or("UNIPROT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
                user_agent: DEFAULT_USER_AGENT.to_string(),
                log_payloads: env_or("UNIPROT_LOG_PAYLOADS", false),
                poll,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.host.trim().is_empty() {
            anyhow::bail!("Server host cannot be empty");
        }

        self.uniprot.validate().map_err(anyhow::Error::msg)?;

        if self.cors.allows_any_origin() && self.cors.allow_credentials {
            tracing::warn!("CORS_ALLOW_CREDENTIALS has no effect while all origins are allowed");
        }

        if self.uniprot.log_payloads {
            tracing::warn!("UniProt payload logging is enabled");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: false,
            },
            uniprot: UniProtConfig::default(),
        }
    }
}
