//! Configuration management for the Outreach MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is picked up if present; nothing is ever written to stdout, which
//! MCP uses for communication.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the Outreach MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Run the DNS stage when a tool call does not say (default: false)
    pub dns_check_by_default: bool,

    /// DNS lookup timeout in seconds (default: 5)
    pub dns_timeout_secs: u64,

    /// Addresses or bare domains rejected by the denylist listener
    pub email_denylist: Vec<String>,

    /// Tag names rewritten by the tag escaper (default: script, style)
    pub escaped_tags: Vec<String>,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `EMAIL_DNS_CHECK`: Check the mail domain by default (default: false)
    /// - `DNS_TIMEOUT_SECS`: DNS lookup timeout in seconds (default: 5)
    /// - `EMAIL_DENYLIST`: Comma-separated addresses or domains to reject
    /// - `ESCAPED_TAGS`: Comma-separated tag names to escape (default: script,style)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::DotenvError(e.to_string()));
            }
        }

        let dns_check_by_default = Self::parse_env_bool("EMAIL_DNS_CHECK", false)?;
        let dns_timeout_secs = Self::parse_env_u64("DNS_TIMEOUT_SECS", 5)?;

        if dns_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "DNS_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let email_denylist = Self::parse_env_list("EMAIL_DENYLIST")
            .into_iter()
            .map(|entry| entry.to_lowercase())
            .collect();

        let mut escaped_tags = Self::parse_env_list("ESCAPED_TAGS");
        if escaped_tags.is_empty() {
            escaped_tags = Self::default().escaped_tags;
        }

        if let Some(bad) = escaped_tags
            .iter()
            .find(|tag| !tag.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(ConfigError::InvalidValue {
                var: "ESCAPED_TAGS".to_string(),
                reason: format!("Tag names must be ASCII alphanumeric, got: {}", bad),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            dns_check_by_default,
            dns_timeout_secs,
            email_denylist,
            escaped_tags,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }

    /// Split a comma-separated variable, dropping blank entries.
    fn parse_env_list(var_name: &str) -> Vec<String> {
        env::var(var_name)
            .map(|val| {
                val.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dns_check_by_default: false,
            dns_timeout_secs: 5,
            email_denylist: Vec::new(),
            escaped_tags: vec!["script".to_string(), "style".to_string()],
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.dns_check_by_default);
        assert_eq!(config.dns_timeout_secs, 5);
        assert!(config.email_denylist.is_empty());
        assert_eq!(config.escaped_tags, vec!["script", "style"]);
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("EMAIL_DNS_CHECK", "true");
        guard.set("DNS_TIMEOUT_SECS", "2");
        guard.set("EMAIL_DENYLIST", "Spam.example , ,bad@gmail.com");
        guard.set("ESCAPED_TAGS", "script,style,iframe");

        let config = Config::from_env().unwrap();
        assert!(config.dns_check_by_default);
        assert_eq!(config.dns_timeout_secs, 2);
        assert_eq!(config.email_denylist, vec!["spam.example", "bad@gmail.com"]);
        assert_eq!(config.escaped_tags, vec!["script", "style", "iframe"]);
    }

    #[test]
    #[serial]
    fn test_config_zero_timeout_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("DNS_TIMEOUT_SECS", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "DNS_TIMEOUT_SECS"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_bool() {
        let mut guard = EnvGuard::new();
        guard.set("EMAIL_DNS_CHECK", "sometimes");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "EMAIL_DNS_CHECK"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_tag_name() {
        let mut guard = EnvGuard::new();
        guard.set("ESCAPED_TAGS", "script,<b>");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "ESCAPED_TAGS");
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        let result = Config::parse_env_u64("TEST_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_U64_INVALID", 10);
        assert!(result.is_err());
    }
}
