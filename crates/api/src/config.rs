use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Origin of the content API.
    pub cms_base_url: String,
    /// Origin prefixed onto relative media paths.
    pub media_base_url: String,
    /// Hide sections with missing content instead of rendering defaults.
    pub hide_fallbacks: bool,
    /// Path of the form submission endpoint on the content API.
    pub contact_form_path: String,
    /// Event bus channel capacity.
    pub event_bus_capacity: usize,
    /// How long a loaded page is served from the cache, in seconds.
    pub page_cache_ttl_secs: u64,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cms_base_url = var("CMS_BASE_URL").unwrap_or_else(|| "http://localhost:1337".to_string());
        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&var, "PORT", "3030", "a valid port number")?,
            media_base_url: var("MEDIA_BASE_URL").unwrap_or_else(|| cms_base_url.clone()),
            cms_base_url,
            hide_fallbacks: match var("HIDE_FALLBACKS") {
                Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                    name: "HIDE_FALLBACKS",
                    expected: "a boolean",
                    value,
                })?,
                None => false,
            },
            contact_form_path: var("CONTACT_FORM_PATH")
                .unwrap_or_else(|| "/api/contact-submissions".to_string()),
            event_bus_capacity: parse(&var, "EVENT_BUS_CAPACITY", "1024", "a positive integer")?,
            page_cache_ttl_secs: parse(&var, "PAGE_CACHE_TTL_SECS", "300", "a number of seconds")?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn page_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.page_cache_ttl_secs)
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = var(name).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, expected, value })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3030");
        assert_eq!(config.media_base_url, "http://localhost:1337");
        assert!(!config.hide_fallbacks);
        assert_eq!(config.contact_form_path, "/api/contact-submissions");
        assert_eq!(config.event_bus_capacity, 1024);
        assert_eq!(config.page_cache_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn media_origin_follows_cms_origin() {
        let config = load(&[("CMS_BASE_URL", "https://cms.example.com"), ("HIDE_FALLBACKS", "yes")]).unwrap();
        assert_eq!(config.media_base_url, "https://cms.example.com");
        assert!(config.hide_fallbacks);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(load(&[("HIDE_FALLBACKS", "maybe")]).is_err());
        assert!(matches!(
            load(&[("PAGE_CACHE_TTL_SECS", "-1")]),
            Err(ConfigError::Invalid { name: "PAGE_CACHE_TTL_SECS", .. })
        ));
    }
}
