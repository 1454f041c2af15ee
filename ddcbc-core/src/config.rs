use crate::classify::{DEFAULT_BOT_KEYWORDS, MissingUserAgentPolicy};
use std::time::Duration;
use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_ORIGIN: &str = "https://www.cbc.ca";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Process-wide relay configuration, built once at startup and immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub listen_port: u16,
    /// Origin the relay proxies, scheme and host only, no trailing slash.
    pub upstream_origin: String,
    pub bot_keywords: Vec<String>,
    pub missing_user_agent_policy: MissingUserAgentPolicy,
    pub fetch_timeout: Duration,
}

impl RelayConfig {
    /// Build a config, validating the upstream origin up front so a bad
    /// value fails at startup rather than on the first request.
    pub fn new(listen_port: u16, upstream_origin: &str) -> Result<Self, String> {
        let parsed = Url::parse(upstream_origin)
            .map_err(|e| format!("Invalid upstream origin '{}': {}", upstream_origin, e))?;

        if parsed.host_str().is_none() {
            return Err(format!(
                "Invalid upstream origin '{}': no host",
                upstream_origin
            ));
        }

        Ok(Self {
            listen_port,
            upstream_origin: upstream_origin.trim_end_matches('/').to_string(),
            bot_keywords: DEFAULT_BOT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            missing_user_agent_policy: MissingUserAgentPolicy::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        })
    }

    pub fn with_bot_keywords(mut self, keywords: Vec<String>) -> Self {
        self.bot_keywords = keywords;
        self
    }

    pub fn with_missing_user_agent_policy(mut self, policy: MissingUserAgentPolicy) -> Self {
        self.missing_user_agent_policy = policy;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_PORT,
            upstream_origin: DEFAULT_UPSTREAM_ORIGIN.to_string(),
            bot_keywords: DEFAULT_BOT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            missing_user_agent_policy: MissingUserAgentPolicy::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
