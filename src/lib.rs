//! Wiki - a small wiki with role-based page editing
//!
//! This is the library interface, exposing the router, storage and
//! authorization pieces so they can be embedded or tested directly.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ui;

pub use config::Config;
pub use error::Error;
pub use models::{Page, Role, User};
