// Server module - HTTP server setup and routing
pub mod handlers;
pub mod response;
pub mod state;

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use self::state::AppState;
use crate::config::create_cors_layer;
use crate::StartupError;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/assets/:kind",
            post(handlers::assets::create).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/assets/:kind/search",
            get(handlers::assets::search).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/assets/:kind/:id",
            get(handlers::assets::get_by_id)
                .put(handlers::assets::update)
                .delete(handlers::assets::delete)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/user-selected-goals",
            post(handlers::user_selected_goals::create).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/user-selected-goals/search",
            get(handlers::user_selected_goals::search).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/user-selected-goals/:id",
            get(handlers::user_selected_goals::get_by_id)
                .put(handlers::user_selected_goals::update)
                .delete(handlers::user_selected_goals::delete)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(cors_allowed_origins))
        .with_state(state)
}

/// Run the server on the specified address until Ctrl-C or SIGTERM.
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), StartupError> {
    info!("Server listening on {}", addr);
    info!("- Health endpoint: http://{}/health", addr);
    info!("- Assets endpoint: http://{}/api/v1/assets/{{kind}}", addr);
    info!("- Goals endpoint: http://{}/api/v1/user-selected-goals", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install terminate handler");
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
}
