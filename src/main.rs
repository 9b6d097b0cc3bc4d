use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wiki::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wiki=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Initdb { skip_seed } => cli::commands::initdb(config, skip_seed).await,
        Commands::Adduser {
            name,
            role,
            password,
        } => cli::commands::adduser(config, &name, role.into(), password).await,
        Commands::Users => cli::commands::list_users(config).await,
        Commands::Serve { host, port } => cli::commands::serve(config, host, port).await,
    }
}
