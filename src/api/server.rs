use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{self, AppState};
use crate::catalog::CatalogStore;
use crate::engine::TradeEngine;

pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    #[must_use]
    pub fn new(store: Arc<CatalogStore>, engine: Arc<TradeEngine>) -> Self {
        Self {
            state: AppState { store, engine },
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/calculate", post(handlers::calculate))
            .route("/players", get(handlers::players))
            .route(
                "/check_player_lockout",
                get(handlers::check_player_lockout).post(handlers::check_player_lockout_form),
            )
            .route("/health", get(handlers::health))
            .route("/admin/reload", post(handlers::admin_reload))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// Runs until ctrl-c.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Trade calculator listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Received shutdown signal, cleaning up...");
            })
            .await?;

        Ok(())
    }
}
