//! Matching a request against the whole catalog.
//!
//! ## Algorithm
//! 1. Read every recipe from the store
//! 2. On a blocking thread, evaluate the brewable predicate on each recipe in
//!    parallel (rayon)
//! 3. Report the first recipe in catalog order that passes
//!
//! An empty catalog never matches. A failed read is reported as
//! [`BrewError::CatalogRead`]; it is never turned into "no match".

use std::sync::Arc;
use std::time::Instant;

use catalog::{Recipe, RecipeId, RecipeStore};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{BrewError, Result};
use crate::request::Requested;
use crate::requirements::is_brewable;

/// The recipe chosen for a successful brew.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrewMatch {
    pub recipe_id: RecipeId,
    pub recipe_name: String,
}

impl From<&Recipe> for BrewMatch {
    fn from(recipe: &Recipe) -> Self {
        Self {
            recipe_id: recipe.id,
            recipe_name: recipe.name.clone(),
        }
    }
}

/// Return the first recipe (in slice order) that `requested` can brew.
///
/// Recipes are checked in parallel, but `find_first` keeps the answer
/// deterministic.
pub fn first_brewable<'a>(recipes: &'a [Recipe], requested: &Requested) -> Option<&'a Recipe> {
    recipes
        .par_iter()
        .find_first(|recipe| is_brewable(recipe, requested))
}

/// Answers "can these ingredients brew something?" against a recipe store.
#[derive(Clone)]
pub struct BrewEngine {
    store: Arc<dyn RecipeStore>,
}

impl BrewEngine {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Find the recipe a brew would use.
    ///
    /// # Arguments
    /// * `requested` - Ingredient names and the quantity offered of each
    ///
    /// # Returns
    /// * `Ok(Some(BrewMatch))` - the first brewable recipe in catalog order
    /// * `Ok(None)` - nothing in the catalog can be brewed (or it is empty)
    /// * `Err(BrewError::CatalogRead)` - the catalog could not be read
    /// * `Err(BrewError::Matching)` - the matching task panicked
    pub async fn find_match(&self, requested: &Requested) -> Result<Option<BrewMatch>> {
        let start = Instant::now();

        let recipes = self.store.list_all().await.map_err(BrewError::CatalogRead)?;
        let candidates = recipes.len();
        debug!(
            "Checking {} offered ingredients against {} recipes",
            requested.len(),
            candidates
        );

        // Keep the scan off the async workers
        let found = tokio::task::spawn_blocking({
            let requested = requested.clone();
            move || first_brewable(&recipes, &requested).map(BrewMatch::from)
        })
        .await
        .map_err(BrewError::Matching)?;

        match &found {
            Some(matched) => info!(
                "Brewing recipe {} ('{}') after {:?}",
                matched.recipe_id,
                matched.recipe_name,
                start.elapsed()
            ),
            None => debug!("No brewable recipe among {} candidates", candidates),
        }

        Ok(found)
    }

    /// Whether at least one stored recipe is brewable with `requested`.
    pub async fn can_brew(&self, requested: &Requested) -> Result<bool> {
        Ok(self.find_match(requested).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Ingredient;

    fn recipe(id: RecipeId, name: &str, ingredients: &[(&str, u32)]) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            ingredients: ingredients
                .iter()
                .enumerate()
                .map(|(i, (ingredient, quantity))| Ingredient {
                    id: id * 100 + i as i64,
                    recipe_id: id,
                    name: ingredient.to_string(),
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn test_first_brewable_prefers_catalog_order() {
        let recipes = vec![
            recipe(1, "Cake", &[("flour", 100), ("sugar", 50)]),
            recipe(2, "Biscuit", &[("flour", 10)]),
            recipe(3, "Scone", &[("flour", 20)]),
        ];

        let requested = Requested::new().with("flour", 50);
        let found = first_brewable(&recipes, &requested).unwrap();
        assert_eq!(found.name, "Biscuit");
    }

    #[test]
    fn test_first_brewable_empty_catalog() {
        assert!(first_brewable(&[], &Requested::new()).is_none());
    }

    #[test]
    fn test_first_brewable_nothing_matches() {
        let recipes = vec![recipe(1, "Cake", &[("flour", 100)])];
        let requested = Requested::new().with("flour", 10);
        assert!(first_brewable(&recipes, &requested).is_none());
    }

    #[test]
    fn test_brew_match_from_recipe() {
        let cake = recipe(7, "Cake", &[]);
        assert_eq!(
            BrewMatch::from(&cake),
            BrewMatch {
                recipe_id: 7,
                recipe_name: "Cake".to_string()
            }
        );
    }
}
