//! Client configuration management
//!
//! One process-wide configuration record, read once at startup. Every field
//! has a serde default so partial config files and bare environments both
//! work.

use serde::{Deserialize, Serialize};

/// Environment variable overriding the upload size ceiling (megabytes)
pub const ENV_MAX_FILE_SIZE_MB: &str = "KB_CLIENT_MAX_FILE_SIZE_MB";

/// Environment variable overriding the API base URL
pub const ENV_API_BASE_URL: &str = "KB_CLIENT_API_BASE_URL";

/// Environment variable overriding the listing page size
pub const ENV_PAGE_SIZE: &str = "KB_CLIENT_PAGE_SIZE";

/// Environment variable enabling token revalidation in the navigation guard
pub const ENV_VALIDATE_TOKENS: &str = "KB_CLIENT_VALIDATE_TOKENS";

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the knowledge backend (e.g. `http://127.0.0.1:8080`)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Maximum upload size in megabytes
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Listing page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Whether the navigation guard revalidates the token against the server
    #[serde(default)]
    pub validate_tokens: bool,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_max_file_size_mb() -> u64 {
    50
}

fn default_page_size() -> u32 {
    35
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            max_file_size_mb: default_max_file_size_mb(),
            page_size: default_page_size(),
            validate_tokens: false,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_BASE_URL) {
            if !url.is_empty() {
                config.api_base_url = url;
            }
        }
        if let Some(mb) = env_parse::<u64>(ENV_MAX_FILE_SIZE_MB) {
            config.max_file_size_mb = mb;
        }
        if let Some(size) = env_parse::<u32>(ENV_PAGE_SIZE) {
            config.page_size = size;
        }
        if let Ok(flag) = std::env::var(ENV_VALIDATE_TOKENS) {
            config.validate_tokens = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Upload size ceiling in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
