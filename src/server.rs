//! Router assembly and server lifecycle

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::routes;
use crate::state::AppState;
use crate::storage::UploadStorage;
use crate::types::Config;

/// Builds the application router with CORS, tracing, and timeout layers.
///
/// # Errors
///
/// Returns an error if the configured allowed origin is not a valid header
/// value.
pub fn router(config: &Config, storage: Arc<UploadStorage>) -> anyhow::Result<Router> {
    let allowed_origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|_| anyhow::anyhow!("invalid ALLOWED_ORIGIN: {}", config.allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let state = AppState { storage };

    Ok(routes::handler()
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(5))))
}

/// Starts the server with the given configuration and storage client
///
/// # Errors
///
/// Returns an error if the router cannot be built or the server fails to
/// bind to the port.
pub async fn start(config: Config, storage: Arc<UploadStorage>) -> anyhow::Result<()> {
    let router = router(&config, storage)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Upload gateway started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }
}
