//! Configuration management for the wiki

pub mod loader;
mod schema;

pub use loader::{load_config, CONFIG_FILENAME};
pub use schema::*;
