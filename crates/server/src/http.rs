//! HTTP transport for the recipe service.
//!
//! Routes:
//! - `GET  /v1/recipes` - list the catalog
//! - `POST /v1/brew`    - ask whether something can be brewed
//! - `GET  /v1/version` - service name and version
//!
//! Anything else gets a JSON 404, and an unreadable brew body a JSON 400.

use std::future::Future;
use std::io;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{BrewRequest, BrewResponse, ListRecipesResponse};
use crate::error::ServiceError;
use crate::service::RecipeService;

/// Build the router with all routes and request tracing.
pub fn router(service: RecipeService) -> Router {
    Router::new()
        .route("/v1/recipes", get(list_recipes))
        .route("/v1/brew", post(brew))
        .route("/v1/version", get(version))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve `service` on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve<F>(listener: TcpListener, service: RecipeService, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("HTTP server listening on {}", addr);
    }

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn list_recipes(
    State(service): State<RecipeService>,
) -> Result<Json<ListRecipesResponse>, ServiceError> {
    service.list_recipes().await.map(Json)
}

async fn brew(
    State(service): State<RecipeService>,
    payload: Result<Json<BrewRequest>, JsonRejection>,
) -> Result<Json<BrewResponse>, ServiceError> {
    let Json(request) = payload?;
    Ok(Json(service.brew(&request).await))
}

async fn version() -> Json<Value> {
    Json(json!({
        "service": "cauldron",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> ServiceError {
    ServiceError::NotFound
}
