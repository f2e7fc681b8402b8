use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use database::Ledger;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Ledger,
}

/// Builds the API router over the given ledger.
pub fn router(ledger: Ledger) -> Router {
    let app_state = Arc::new(AppState { ledger });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/logs", get(handlers::list_logs).post(handlers::create_log))
        .route(
            "/api/logs/:id",
            get(handlers::get_log)
                .put(handlers::update_log)
                .delete(handlers::delete_log),
        )
        .route("/api/logs/:id/amount-due", get(handlers::amount_due))
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .route("/api/dashboard", get(handlers::dashboard))
        .with_state(app_state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// Serves the API until the process is stopped. Tracing must already be
/// initialized by the caller.
pub async fn run_server(addr: SocketAddr, ledger: Ledger) -> anyhow::Result<()> {
    let app = router(ledger);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
