//! # Recipe Service
//!
//! The query/command facade in front of the catalog and the matching engine.
//! Transport layers (HTTP here) call into it and add nothing of their own.
//!
//! ## Operations
//! - `list_recipes`: the whole catalog, exactly as the store returns it
//! - `brew`: whether the offered ingredients can brew any stored recipe
//!
//! A catalog read failure is never reported as "nothing to list" or "cannot
//! brew". `list_recipes` returns a `ServiceError`; `brew` carries a numeric
//! error in its response body.

use std::sync::Arc;

use brew::{BrewEngine, BrewError};
use catalog::RecipeStore;
use tracing::{debug, error};

use crate::api::{BrewRequest, BrewResponse, ListRecipesResponse};
use crate::error::{CATALOG_UNREADABLE, ServiceError};

/// Error code placed in a [`BrewResponse`] when the brew could not be evaluated.
pub const INTERNAL_ERROR_CODE: i32 = 500;

/// Message for a brew that failed after the catalog was read.
pub const BREW_FAILED: &str = "could not evaluate recipes";

#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
    engine: BrewEngine,
}

impl RecipeService {
    /// Build the facade over `store`; the matching engine reads the same store.
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        let engine = BrewEngine::new(store.clone());
        Self { store, engine }
    }

    /// List every stored recipe with its ingredients.
    pub async fn list_recipes(&self) -> Result<ListRecipesResponse, ServiceError> {
        let recipes = self.store.list_all().await.map_err(|e| {
            error!("Failed to list recipes: {}", e);
            ServiceError::from(e)
        })?;

        debug!("Listing {} recipes", recipes.len());
        Ok(recipes.into_iter().collect())
    }

    /// Check whether any stored recipe can be brewed with the offered ingredients.
    ///
    /// # Returns
    /// * `started: true` - at least one recipe is brewable
    /// * `started: false` with no error - nothing matches
    /// * `started: false` with error code 500 - the catalog could not be read or
    ///   the match could not be evaluated
    pub async fn brew(&self, request: &BrewRequest) -> BrewResponse {
        let requested = request.to_requested();

        match self.engine.can_brew(&requested).await {
            Ok(started) => BrewResponse::started(started),
            Err(BrewError::CatalogRead(e)) => {
                error!("Brew failed, catalog unreadable: {}", e);
                BrewResponse::failed(INTERNAL_ERROR_CODE, CATALOG_UNREADABLE)
            }
            Err(e @ BrewError::Matching(_)) => {
                error!("Brew failed: {}", e);
                BrewResponse::failed(INTERNAL_ERROR_CODE, BREW_FAILED)
            }
        }
    }
}
