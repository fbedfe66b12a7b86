//! HTTP facade over the cache store
//!
//! Two routes, `GET /` and `GET /prices`, both serving the cached price
//! mapping as JSON. Handlers are stateless per request and read only from
//! the cache store; the background refresh task is the only writer.

use std::collections::HashMap;

use axum::{extract::State, routing::get, Json, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cache::CacheStore;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    store: CacheStore,
}

/// Builds the application router
pub fn router(store: CacheStore) -> Router {
    Router::new()
        .route("/", get(get_prices))
        .route("/prices", get(get_prices))
        .with_state(AppState { store })
        .layer(TraceLayer::new_for_http())
}

/// Serves the cached price mapping
///
/// Always `200 OK` with a JSON object body. A missing or unreadable cache
/// file yields an empty object rather than an error status.
async fn get_prices(State(state): State<AppState>) -> Json<HashMap<String, f64>> {
    Json(state.store.read())
}

/// Binds the listen port and serves the router until the process exits
///
/// # Errors
/// Returns an error if the port cannot be bound, the only fatal condition
/// in the server.
pub async fn serve(router: Router, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await
}
