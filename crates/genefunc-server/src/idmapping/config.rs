// UniProt ID mapping client configuration

use serde::{Deserialize, Serialize};

use super::poller::PollPolicy;

/// Production ID mapping endpoint.
pub const DEFAULT_BASE_URL: &str = "https://rest.uniprot.org/idmapping";

/// Per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_USER_AGENT: &str = concat!("GeneFunc-Relay/", env!("CARGO_PKG_VERSION"));

/// `Accept-Language` sent with the results request.
pub const RESULTS_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Configuration for talking to UniProt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniProtConfig {
    /// Base URL of the ID mapping API, without trailing slash
    pub base_url: String,

    /// Timeout applied to each individual HTTP request
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Dump upstream headers and bodies at debug level
    pub log_payloads: bool,

    /// How the job status is polled
    pub poll: PollPolicy,
}

impl Default for UniProtConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_payloads: false,
            poll: PollPolicy::default(),
        }
    }
}

impl UniProtConfig {
    pub fn builder() -> UniProtConfigBuilder {
        UniProtConfigBuilder::default()
    }

    /// `POST` target for job submission
    pub fn run_url(&self) -> String {
        format!("{}/run", self.base())
    }

    pub fn status_url(&self, job_id: &str) -> String {
        format!("{}/status/{}", self.base(), job_id)
    }

    /// Streaming results endpoint; `format=json` is added as a query parameter
    pub fn results_url(&self, job_id: &str) -> String {
        format!("{}/uniprotkb/results/stream/{}", self.base(), job_id)
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!(
                "UniProt base URL must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }

        if self.timeout_secs == 0 {
            return Err("UniProt request timeout must be greater than 0".to_string());
        }

        self.poll.validate()
    }
}

/// Builder for UniProtConfig
#[derive(Default)]
pub struct UniProtConfigBuilder {
    config: UniProtConfig,
}

impl UniProtConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn log_payloads(mut self, enabled: bool) -> Self {
        self.config.log_payloads = enabled;
        self
    }

    pub fn poll(mut self, policy: PollPolicy) -> Self {
        self.config.poll = policy;
        self
    }

    pub fn build(self) -> UniProtConfig {
        self.config
    }
}
