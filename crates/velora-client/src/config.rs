use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Connection settings for [`RestClient`](crate::RestClient).
///
/// The base URL is validated up front so a typo fails at construction, not
/// on the first request.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
    user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(30),
            user_agent: concat!("velora-client/", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
