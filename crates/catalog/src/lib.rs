//! # Catalog Crate
//!
//! The durable home of recipes and their ingredients.
//!
//! ## Main Components
//!
//! - **types**: Domain types (Recipe, Ingredient, NewRecipe, NewIngredient)
//! - **store**: The `RecipeStore` contract shared by every other crate
//! - **sqlite**: The sqlx/SQLite implementation of that contract
//! - **error**: Error types for storage operations
//!
//! ## Guarantees
//!
//! - A recipe and all of its ingredients are saved atomically. A save that
//!   fails at any step leaves the catalog exactly as it was.
//! - Identities are assigned by the store and never reused.
//! - Reads reconstruct each recipe's complete ingredient set.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{NewRecipe, RecipeStore, SqliteRecipeStore};
//!
//! let store = SqliteRecipeStore::in_memory().await?;
//! store.save(&NewRecipe::new("Cake").with_ingredient("flour", 100)).await?;
//!
//! for recipe in store.list_all().await? {
//!     println!("{} has {} ingredients", recipe.name, recipe.ingredients.len());
//! }
//! ```

// Public modules
pub mod error;
pub mod sqlite;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Result, StoreError};
pub use sqlite::{SqliteRecipeStore, StoreConfig};
pub use store::RecipeStore;
pub use types::{
    // Type aliases
    IngredientId,
    Quantity,
    RecipeId,
    // Core types
    Ingredient,
    NewIngredient,
    NewRecipe,
    Recipe,
};
