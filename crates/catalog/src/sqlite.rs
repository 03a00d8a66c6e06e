//! SQLite-backed recipe store.
//!
//! Recipes live in three tables: `recipes`, `ingredients` and the ownership
//! linkage `recipes_ingredients`. A save writes all three inside one
//! transaction; a read enumerates them inside one transaction so it sees a
//! single consistent snapshot.
//!
//! # Usage
//!
//! ```rust,ignore
//! use catalog::{NewRecipe, RecipeStore, SqliteRecipeStore, StoreConfig};
//!
//! let store = SqliteRecipeStore::connect(&StoreConfig::new("sqlite://cauldron.db")).await?;
//! let saved = store.save(&NewRecipe::new("Cake").with_ingredient("flour", 100)).await?;
//! let catalog = store.list_all().await?;
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::store::RecipeStore;
use crate::types::{Ingredient, IngredientId, NewRecipe, Quantity, Recipe, RecipeId};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connection settings for [`SqliteRecipeStore::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite URL, e.g. `sqlite://cauldron.db`
    pub database_url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://cauldron.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Recipe store over a sqlx SQLite pool.
///
/// Recipes are listed by id ascending and each recipe's ingredients by id
/// ascending. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct SqliteRecipeStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: RecipeId,
    name: String,
}

#[derive(sqlx::FromRow)]
struct IngredientRow {
    id: IngredientId,
    recipe_id: RecipeId,
    name: String,
    quantity: i64,
}

impl SqliteRecipeStore {
    /// Open (creating if missing) the database and apply migrations.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(StoreError::Connect)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(StoreError::Connect)?;

        debug!("Connected to recipe store at {}", config.database_url);
        Self::with_pool(pool).await
    }

    /// A private in-memory database.
    ///
    /// Each SQLite `:memory:` connection is a separate database, so the pool
    /// is pinned to exactly one connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(StoreError::Connect)?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(StoreError::Connect)?;

        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, applying migrations first.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        MIGRATOR.run(&pool).await?;
        Ok(Self { pool })
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Release every pooled connection. Used at process shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RecipeStore for SqliteRecipeStore {
    async fn save(&self, recipe: &NewRecipe) -> Result<Recipe> {
        let write_error = |source: sqlx::Error| StoreError::Write {
            name: recipe.name.clone(),
            source,
        };

        // Dropping `tx` on any early return rolls the whole save back.
        let mut tx = self.pool.begin().await.map_err(write_error)?;

        let recipe_id: RecipeId =
            sqlx::query_scalar("INSERT INTO recipes (name) VALUES (?) RETURNING id")
                .bind(&recipe.name)
                .fetch_one(&mut *tx)
                .await
                .map_err(write_error)?;

        let mut ingredients = Vec::with_capacity(recipe.ingredients.len());
        for ingredient in &recipe.ingredients {
            let ingredient_id: IngredientId = sqlx::query_scalar(
                "INSERT INTO ingredients (recipe_id, name, quantity) VALUES (?, ?, ?) RETURNING id",
            )
            .bind(recipe_id)
            .bind(&ingredient.name)
            .bind(i64::from(ingredient.quantity))
            .fetch_one(&mut *tx)
            .await
            .map_err(write_error)?;

            sqlx::query("INSERT INTO recipes_ingredients (recipe_id, ingredient_id) VALUES (?, ?)")
                .bind(recipe_id)
                .bind(ingredient_id)
                .execute(&mut *tx)
                .await
                .map_err(write_error)?;

            ingredients.push(Ingredient {
                id: ingredient_id,
                recipe_id,
                name: ingredient.name.clone(),
                quantity: ingredient.quantity,
            });
        }

        tx.commit().await.map_err(write_error)?;

        debug!(
            "Saved recipe {} '{}' with {} ingredients",
            recipe_id,
            recipe.name,
            ingredients.len()
        );

        Ok(Recipe {
            id: recipe_id,
            name: recipe.name.clone(),
            ingredients,
        })
    }

    async fn list_all(&self) -> Result<Vec<Recipe>> {
        let mut tx = self.pool.begin().await.map_err(StoreError::Read)?;

        let recipe_rows: Vec<RecipeRow> =
            sqlx::query_as("SELECT id, name FROM recipes ORDER BY id")
                .fetch_all(&mut *tx)
                .await
                .map_err(StoreError::Read)?;

        // Ownership comes from the linkage table; the join also requires the
        // ingredient's own back-reference to agree with it.
        let ingredient_rows: Vec<IngredientRow> = sqlx::query_as(
            r#"
            SELECT i.id, ri.recipe_id, i.name, i.quantity
            FROM recipes_ingredients ri
            JOIN ingredients i
              ON i.id = ri.ingredient_id
             AND i.recipe_id = ri.recipe_id
            ORDER BY i.id
            "#,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(StoreError::Read)?;

        tx.commit().await.map_err(StoreError::Read)?;

        let mut positions: HashMap<RecipeId, usize> = HashMap::with_capacity(recipe_rows.len());
        let mut recipes: Vec<Recipe> = Vec::with_capacity(recipe_rows.len());
        for row in recipe_rows {
            positions.insert(row.id, recipes.len());
            recipes.push(Recipe {
                id: row.id,
                name: row.name,
                ingredients: Vec::new(),
            });
        }

        for row in ingredient_rows {
            let quantity =
                Quantity::try_from(row.quantity).map_err(|_| StoreError::CorruptRow {
                    recipe_id: row.recipe_id,
                    ingredient_id: row.id,
                    reason: format!("quantity {} out of range", row.quantity),
                })?;

            match positions.get(&row.recipe_id) {
                Some(&position) => recipes[position].ingredients.push(Ingredient {
                    id: row.id,
                    recipe_id: row.recipe_id,
                    name: row.name,
                    quantity,
                }),
                None => warn!(
                    "Ingredient {} references unknown recipe {}",
                    row.id, row.recipe_id
                ),
            }
        }

        debug!("Listed {} recipes", recipes.len());
        Ok(recipes)
    }
}
