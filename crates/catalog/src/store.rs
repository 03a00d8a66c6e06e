//! The storage contract shared by the ingestion pipeline, the brew engine and
//! the query facade.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{NewRecipe, Recipe};

/// Durable home of recipes and their ingredients.
///
/// Implementations must be safe to share between one writer per ingestion
/// stream and any number of concurrent readers; a reader never observes a
/// recipe whose ingredients are only partly written.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a recipe together with all of its ingredients as one atomic unit.
    ///
    /// # Returns
    /// * `Ok(Recipe)` - The stored recipe with its assigned identities
    /// * `Err` - The write was rejected; durable state is unchanged
    async fn save(&self, recipe: &NewRecipe) -> Result<Recipe>;

    /// Every persisted recipe with its complete ingredient set.
    ///
    /// The trait makes no ordering promise. Callers must not depend on one.
    async fn list_all(&self) -> Result<Vec<Recipe>>;
}
