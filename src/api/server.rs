//! HTTP server

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::TokenKeys;
use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::ui::{self, Renderer};

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub tokens: TokenKeys,
    pub renderer: Renderer,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let tokens = TokenKeys::from_config(&config.auth);
        let renderer = Renderer::new(&config.wiki.front_page)?;
        Ok(Self {
            config,
            db,
            tokens,
            renderer,
        })
    }
}

pub type SharedState = Arc<AppState>;

/// Run the HTTP server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let db = Database::connect(&config.database.url).await?;
    db.init_schema().await?;

    let state = Arc::new(AppState::new(config, db)?);
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(routes::view_wiki))
        .route("/login", get(routes::login).post(routes::login))
        .route("/logout", get(routes::logout))
        .route(
            "/add_page/{pagename}",
            get(routes::add_page).post(routes::add_page),
        )
        .route("/static/{*path}", get(ui::assets::static_file))
        .route("/{pagename}", get(routes::view_page))
        .route(
            "/{pagename}/edit_page",
            get(routes::edit_page).post(routes::edit_page),
        )
        .fallback(routes::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
