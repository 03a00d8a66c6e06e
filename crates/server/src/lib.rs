//! # Server Crate
//!
//! The query/command facade for Cauldron and its HTTP transport.
//!
//! ## Main Components
//!
//! - **service**: `RecipeService`, exposing `list_recipes` and `brew`
//! - **api**: Request/response bodies
//! - **http**: axum router and `serve` with graceful shutdown
//! - **error**: `ServiceError` and its JSON rendering
//!
//! ## Example Usage
//!
//! ```ignore
//! let store: Arc<dyn RecipeStore> = Arc::new(SqliteRecipeStore::in_memory().await?);
//! let service = RecipeService::new(store);
//!
//! let listener = TcpListener::bind("127.0.0.1:8080").await?;
//! server::serve(listener, service, async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! ```

pub mod api;
pub mod error;
pub mod http;
pub mod service;

pub use api::{
    BrewRequest, BrewResponse, ErrorBody, IngredientRequest, IngredientView, ListRecipesResponse,
    RecipeView,
};
pub use error::{CATALOG_UNREADABLE, ServiceError};
pub use http::{router, serve};
pub use service::{BREW_FAILED, INTERNAL_ERROR_CODE, RecipeService};
