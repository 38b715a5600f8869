use crate::error::ConfigError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_LIBRARY_PATH: &str = "Shared Documents/mcp_server";
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Where the managed folders live inside the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub library_path: String,
}

impl LibraryConfig {
    pub fn new(library_path: impl Into<String>) -> Result<Self, ConfigError> {
        let library_path = library_path.into().trim().trim_matches('/').to_string();
        if library_path.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "library_path",
                details: "library path is empty".to_string(),
            });
        }

        Ok(Self { library_path })
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            library_path: DEFAULT_LIBRARY_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SharePointConfig {
    pub site_url: Url,
    pub access_token: String,
    pub timeout: Option<Duration>,
}

impl SharePointConfig {
    pub fn new(site_url: &str, access_token: impl Into<String>) -> Result<Self, ConfigError> {
        let site_url = site_url.trim();
        if site_url.is_empty() {
            return Err(ConfigError::MissingSetting("site_url"));
        }

        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return Err(ConfigError::MissingSetting("access_token"));
        }

        let site_url = Url::parse(site_url.trim_end_matches('/'))?;
        if !matches!(site_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidSetting {
                name: "site_url",
                details: format!("unsupported scheme {}", site_url.scheme()),
            });
        }

        Ok(Self {
            site_url,
            access_token,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
