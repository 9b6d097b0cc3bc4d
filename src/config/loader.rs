//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "wiki.toml";

/// Load configuration from an explicit path, or from the nearest wiki.toml
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => find_config_file()?,
    };
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Constant pattern; a failure here is a bug, not a runtime condition
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Wiki configuration

[server]
host = "0.0.0.0"
port = 6543

[database]
url = "${WIKI_DATABASE_URL:-sqlite://wiki.sqlite?mode=rwc}"

[auth]
secret = "${WIKI_AUTH_SECRET:-change-me-wiki-secret}"
cookie_name = "wiki_session"
token_ttl_secs = 86400
bcrypt_cost = 12

[wiki]
front_page = "FrontPage"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_env_interpolation() {
        env::set_var("WIKI_TEST_VAR", "hello");
        let content = "value = \"${WIKI_TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("WIKI_TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${WIKI_NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_content_parses() {
        let config: Config = toml::from_str(&interpolate_env_vars(default_config_content())).unwrap();
        assert_eq!(config.wiki.front_page, "FrontPage");
        assert_eq!(config.auth.cookie_name, "wiki_session");
    }

    #[test]
    fn test_load_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[wiki]\nfront_page = \"HomePage\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.wiki.front_page, "HomePage");
    }

    #[test]
    fn test_missing_file_is_config_not_found() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from_path(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound)));
    }
}
