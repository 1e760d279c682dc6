//! Client configuration.

use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the storefront base URL
pub const BASE_URL_ENV: &str = "CHECKOUT_API_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while constructing the HTTP client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The base URL environment variable is not set
    #[error("{BASE_URL_ENV} is not set")]
    MissingBaseUrl,

    /// The underlying HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

/// Configuration for [`HttpCheckoutApi`](crate::HttpCheckoutApi)
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the storefront, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given base URL
    ///
    /// A trailing slash on the URL is stripped so endpoint paths can always
    /// start with `/api`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the base URL from `CHECKOUT_API_URL`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingBaseUrl`] when the variable is unset.
    pub fn from_env() -> Result<Self, ClientError> {
        std::env::var(BASE_URL_ENV)
            .map(Self::new)
            .map_err(|_| ClientError::MissingBaseUrl)
    }

    /// Override the per-request timeout
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // The owned base URL keeps this non-const
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ClientConfig::new("https://shop.example.com/");
        assert_eq!(config.base_url, "https://shop.example.com");

        let config = ClientConfig::new("https://shop.example.com");
        assert_eq!(config.base_url, "https://shop.example.com");
    }
}
