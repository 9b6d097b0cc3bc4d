//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::api;
use crate::cli::{error, info, print_user_table, success, warn};
use crate::config::{self, Config, CONFIG_FILENAME};
use crate::db::{self, users, Database};
use crate::error::Error;
use crate::models::{Role, User};

/// Write a default wiki.toml in the current directory
pub async fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Set auth.secret, then run 'wiki initdb' to create the database");

    Ok(())
}

/// Create tables and optionally seed the default accounts
pub async fn initdb(config_path: Option<&Path>, skip_seed: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let db = connect(&config).await?;

    db.init_schema().await?;
    success("Database tables ready");

    if !skip_seed {
        db::seed::seed(&db, &config.wiki.front_page, config.auth.bcrypt_cost).await?;
        success("Seeded users 'editor' and 'basic' and the front page");
    }

    Ok(())
}

/// Add a user account
pub async fn adduser(
    config_path: Option<&Path>,
    name: &str,
    role: Role,
    password: Option<String>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let db = connect(&config).await?;
    db.init_schema().await?;

    let mut user = User::new(name, role);
    match password {
        Some(password) => user.set_password(&password, config.auth.bcrypt_cost)?,
        None => warn(&format!("'{}' has no password and cannot log in", name)),
    }

    match users::insert(db.pool(), &user).await {
        Ok(_) => {
            success(&format!("Added {} user '{}'", role, name));
            Ok(())
        }
        Err(e @ Error::UserAlreadyExists(_)) => {
            error(&e.to_string());
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// List user accounts
pub async fn list_users(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let db = connect(&config).await?;
    db.init_schema().await?;

    let all = users::list(db.pool()).await?;
    print_user_table(&all);
    Ok(())
}

/// Start the HTTP server
pub async fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config(config_path)?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting wiki on http://{}:{}", host, port));
    api::run_server(config, &host, port).await?;
    Ok(())
}

// Helper functions

fn load_config(path: Option<&Path>) -> Result<Config> {
    config::load_config(path).map_err(|e| anyhow::anyhow!("{}", e))
}

async fn connect(config: &Config) -> Result<Database> {
    Database::connect(&config.database.url)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))
}
