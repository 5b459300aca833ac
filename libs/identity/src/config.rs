use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::time::Duration;

/// Location of the identity service and how long to wait for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl IdentityConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl FromEnv for IdentityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("USER_SERVICE_BASE_URL", "http://localhost:8080");
        let timeout_secs: u64 = env_parse("USER_SERVICE_TIMEOUT_SECS", "5")?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
