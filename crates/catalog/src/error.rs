//! Error types for the catalog crate.

use thiserror::Error;

use crate::types::{IngredientId, RecipeId};

/// Errors raised by a [`RecipeStore`](crate::RecipeStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be opened.
    #[error("Failed to connect to recipe store: {0}")]
    Connect(#[source] sqlx::Error),

    /// Schema migrations could not be applied.
    #[error("Failed to migrate recipe store: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// An atomic save was rejected or could not complete.
    ///
    /// Nothing from the attempted save is visible afterwards.
    #[error("Failed to save recipe '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: sqlx::Error,
    },

    /// The catalog could not be enumerated.
    #[error("Failed to read recipes: {0}")]
    Read(#[source] sqlx::Error),

    /// A stored ingredient row holds a value the domain cannot represent.
    #[error("Corrupt ingredient {ingredient_id} of recipe {recipe_id}: {reason}")]
    CorruptRow {
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
        reason: String,
    },

    /// Failure of a store that is not backed by SQL.
    #[error("Recipe store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
