//! Client configuration.

use secrecy::SecretString;
use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.idswyft.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Idswyft client configuration.
///
/// Immutable after construction; owned by the client instance. The API key is
/// the only required field and is validated when the client is built.
#[derive(Debug, Clone)]
pub struct IdswyftConfig {
    /// API key sent with every request.
    pub api_key: SecretString,
    /// Base URL for all requests.
    pub base_url: String,
    /// Timeout applied uniformly to every request.
    pub timeout: Duration,
    /// Default sandbox mode for verification sessions.
    pub sandbox: bool,
}

impl Default for IdswyftConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            sandbox: false,
        }
    }
}

impl IdswyftConfig {
    /// Create a new configuration builder.
    pub fn builder() -> IdswyftConfigBuilder {
        IdswyftConfigBuilder::default()
    }
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct IdswyftConfigBuilder {
    config: IdswyftConfig,
}

impl IdswyftConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = SecretString::from(api_key.into());
        self
    }

    /// Set the base URL for all requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Enable or disable sandbox mode.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> IdswyftConfig {
        self.config
    }
}
