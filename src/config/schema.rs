//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub wiki: WikiConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    6543
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://wiki.sqlite?mode=rwc` or `sqlite::memory:`
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "sqlite://wiki.sqlite?mode=rwc".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// Session and password settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    #[serde(default = "default_secret")]
    pub secret: String,

    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// bcrypt work factor for newly set passwords (4..=31)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_secret() -> String {
    "change-me-wiki-secret".to_string()
}

fn default_cookie_name() -> String {
    "wiki_session".to_string()
}

fn default_token_ttl() -> i64 {
    86_400
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            cookie_name: default_cookie_name(),
            token_ttl_secs: default_token_ttl(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Wiki behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Page the root path redirects to
    #[serde(default = "default_front_page")]
    pub front_page: String,
}

fn default_front_page() -> String {
    "FrontPage".to_string()
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            front_page: default_front_page(),
        }
    }
}

impl Config {
    /// Check values serde cannot check on its own
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.auth.secret.is_empty() {
            return Err(crate::error::Error::Config(
                "auth.secret must not be empty".to_string(),
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(crate::error::Error::Config(format!(
                "auth.bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            )));
        }
        if !crate::models::is_valid_page_name(&self.wiki.front_page) {
            return Err(crate::error::Error::Config(format!(
                "wiki.front_page is not a valid page name: '{}'",
                self.wiki.front_page
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wiki.front_page, "FrontPage");
        assert_eq!(config.auth.cookie_name, "wiki_session");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[auth]\nsecret = \"seekrit\"\n").unwrap();
        assert_eq!(config.auth.secret, "seekrit");
        assert_eq!(config.auth.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.server.port, 6543);
    }

    #[test]
    fn test_rejects_bad_bcrypt_cost() {
        let mut config = Config::default();
        config.auth.bcrypt_cost = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_secret() {
        let mut config = Config::default();
        config.auth.secret.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_front_page_that_cannot_be_a_page() {
        let too_long = "P".repeat(256);
        for bad in ["", "a/b", "Front\tPage", too_long.as_str()] {
            let mut config = Config::default();
            config.wiki.front_page = bad.to_string();
            assert!(
                matches!(config.validate(), Err(crate::error::Error::Config(msg)) if msg.contains("front_page")),
                "{bad:?} should be rejected"
            );
        }

        let mut config = Config::default();
        config.wiki.front_page = "ÉtéPage".to_string();
        assert!(config.validate().is_ok());
    }
}
