//! CLI interface for the wiki

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::Role;

#[derive(Parser)]
#[command(name = "wiki")]
#[command(version)]
#[command(about = "A small wiki with role-based page editing", long_about = None)]
pub struct Cli {
    /// Path to wiki.toml (defaults to the nearest one above the current directory)
    #[arg(short, long, global = true, env = "WIKI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default wiki.toml configuration file
    Init,

    /// Create the database tables and seed the default users and front page
    Initdb {
        /// Only create tables
        #[arg(long)]
        skip_seed: bool,
    },

    /// Add a user account
    Adduser {
        /// Login name
        #[arg(short, long)]
        name: String,

        /// Permission tier
        #[arg(short, long, value_enum, default_value = "basic")]
        role: RoleArg,

        /// Password; accounts without one cannot log in
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List user accounts
    Users,

    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Basic,
    Editor,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Basic => Role::Basic,
            RoleArg::Editor => Role::Editor,
        }
    }
}
