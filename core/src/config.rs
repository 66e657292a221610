//! Where the accounts API lives.

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://accountapi:8080";

/// Collection path of the accounts resource.
pub const DEFAULT_ENDPOINT: &str = "/v1/organisation/accounts";

/// Environment variable read by [`ClientConfig::from_env`] for the base URL.
pub const BASE_URL_ENV: &str = "ACCOUNTS_API_URL";

/// Environment variable read by [`ClientConfig::from_env`] for the endpoint.
pub const ENDPOINT_ENV: &str = "ACCOUNTS_API_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Defaults overridden by `ACCOUNTS_API_URL` / `ACCOUNTS_API_ENDPOINT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(&url);
        }
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config = config.with_endpoint(&endpoint);
        }
        config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `<base_url><endpoint>`
    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint)
    }

    /// `<base_url><endpoint>/<id>`
    pub fn resource_url(&self, id: &str) -> String {
        format!("{}{}/{id}", self.base_url, self.endpoint)
    }
}
