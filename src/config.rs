use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Proxy server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Credential for the generation API (checked per request)
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    /// Credential for the video-search API (checked per request)
    #[serde(default)]
    pub youtube_api_key: Option<String>,
    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Single browser origin allowed to call the proxy
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default = "default_gemini_api_version")]
    pub gemini_api_version: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_youtube_base_url")]
    pub youtube_base_url: String,
    /// Generation request timeout in seconds
    #[serde(default = "default_generate_timeout")]
    pub generate_timeout_secs: u64,
    /// Video search request timeout in seconds
    #[serde(default = "default_search_timeout")]
    pub search_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            youtube_api_key: None,
            port: default_port(),
            allowed_origin: default_allowed_origin(),
            gemini_base_url: default_gemini_base_url(),
            gemini_api_version: default_gemini_api_version(),
            gemini_model: default_gemini_model(),
            youtube_base_url: default_youtube_base_url(),
            generate_timeout_secs: default_generate_timeout(),
            search_timeout_secs: default_search_timeout(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. `GEMINI_API_KEY`, `YOUTUBE_API_KEY` and `PORT`
    /// 2. Environment variables with CHEF__ prefix
    /// 3. chef.toml file in current directory
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("chef").required(false))
            .add_source(
                Environment::with_prefix("CHEF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("gemini_api_key", std::env::var("GEMINI_API_KEY").ok())?
            .set_override_option("youtube_api_key", std::env::var("YOUTUBE_API_KEY").ok())?
            .set_override_option("port", std::env::var("PORT").ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// Generation credential, treating a blank value as unset
    pub fn gemini_key(&self) -> Option<&str> {
        non_blank(self.gemini_api_key.as_deref())
    }

    /// Video-search credential, treating a blank value as unset
    pub fn youtube_key(&self) -> Option<&str> {
        non_blank(self.youtube_api_key.as_deref())
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}

/// Settings for the client views talking to the proxy
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// Default value functions
fn default_port() -> u16 {
    3001
}

fn default_allowed_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_api_version() -> String {
    "v1".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_youtube_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_generate_timeout() -> u64 {
    30
}

fn default_search_timeout() -> u64 {
    10
}

fn default_server_url() -> String {
    "http://localhost:3001".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.allowed_origin, "http://localhost:5173");
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.gemini_api_version, "v1");
        assert_eq!(config.generate_timeout(), Duration::from_secs(30));
        assert_eq!(config.search_timeout(), Duration::from_secs(10));
        assert!(config.gemini_key().is_none());
    }

    #[test]
    fn test_blank_credentials_are_unset() {
        let config = ServerConfig {
            gemini_api_key: Some("   ".to_string()),
            youtube_api_key: Some("yt-key".to_string()),
            ..Default::default()
        };
        assert!(config.gemini_key().is_none());
        assert_eq!(config.youtube_key(), Some("yt-key"));
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "port = 8080\ngemini_api_key = \"abc\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: ServerConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.gemini_key(), Some("abc"));
        assert_eq!(config.search_timeout_secs, 10);
    }

    #[test]
    fn test_client_config_default() {
        assert_eq!(ClientConfig::default().server_url, "http://localhost:3001");
    }
}
