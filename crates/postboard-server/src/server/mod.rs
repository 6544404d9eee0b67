//! HTTP API
//!
//! ## Routes
//!
//! - `GET /api/posts` (optional `author`, `date`, `time` filters)
//! - `POST /api/posts`
//! - `GET /api/posts/:id`
//! - `PATCH /api/posts/:id/like`
//! - `DELETE /api/posts/:id`
//! - `GET /api/export`
//! - `GET /api/health`
//!
//! Anything else, including a known path with the wrong method, answers
//! 404 with a JSON error body.

pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Instant;

use axum::routing::{get, patch};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};

use postboard_core::Store;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    /// Process start, reported as uptime by the health route
    pub started: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            started: Instant::now(),
        }
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/api/posts/:id",
            get(handlers::get_post).delete(handlers::delete_post),
        )
        .route("/api/posts/:id/like", patch(handlers::toggle_like))
        .route("/api/export", get(handlers::export))
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Serve on an already bound listener until SIGINT/SIGTERM
pub async fn serve(listener: TcpListener, store: Arc<Store>) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    let location = store.location();
    let app = router(AppState::new(store));

    info!("Server listening on {}", addr);
    info!("API available at http://{}/api", addr);
    info!("Data stored in {}", location);
    info!("Health check: http://{}/api/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down gracefully...");
}
