use crate::xweather::error::XweatherError;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://data.api.xweather.com";

pub const CLIENT_ID_VAR: &str = "XWEATHER_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "XWEATHER_CLIENT_SECRET";
pub const BASE_URL_VAR: &str = "XWEATHER_BASE_URL";

/// Credentials and endpoint for the Xweather REST API.
#[derive(Clone, PartialEq, Eq)]
pub struct XweatherConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Base URL without a trailing slash.
    pub base_url: String,
}

impl XweatherConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the base URL, e.g. to point at a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads `XWEATHER_CLIENT_ID`, `XWEATHER_CLIENT_SECRET` and the optional
    /// `XWEATHER_BASE_URL` from the process environment, loading a `.env` file first if
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns [`XweatherError::MissingCredentials`] naming the first unset or empty
    /// credential variable.
    pub fn from_env() -> Result<Self, XweatherError> {
        // A missing .env file is fine; real environment variables still apply.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`XweatherConfig::from_env`] but resolves variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, XweatherError> {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(XweatherError::MissingCredentials(key))
        };
        let client_id = required(CLIENT_ID_VAR)?;
        let client_secret = required(CLIENT_SECRET_VAR)?;

        let config = Self::new(client_id, client_secret);
        Ok(match lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            Some(url) => config.with_base_url(url.trim()),
            None => config,
        })
    }
}

impl fmt::Debug for XweatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XweatherConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
