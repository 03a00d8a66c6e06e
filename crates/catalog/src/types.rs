//! Core domain types for the recipe catalog.
//!
//! Persisted values (`Recipe`, `Ingredient`) carry store-assigned identities.
//! Unsaved values (`NewRecipe`, `NewIngredient`) are what producers hand to
//! the store; they have no identity fields at all, so an id can never leak in
//! from the outside.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Store-assigned identifier of a recipe (the SQLite rowid).
pub type RecipeId = i64;

/// Store-assigned identifier of an ingredient row.
pub type IngredientId = i64;

/// Required or offered amount of an ingredient. Units are domain-defined.
///
/// Unsigned so a negative quantity cannot be represented.
pub type Quantity = u32;

// =============================================================================
// Persisted Types
// =============================================================================

/// A recipe as stored in the catalog, with its full ingredient set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

/// A single ingredient requirement, owned by exactly one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub recipe_id: RecipeId,
    pub name: String,
    pub quantity: Quantity,
}

impl Recipe {
    /// Returns true when the recipe requires nothing.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Strip identities, leaving the shape that was originally saved.
    pub fn to_new(&self) -> NewRecipe {
        NewRecipe {
            name: self.name.clone(),
            ingredients: self
                .ingredients
                .iter()
                .map(|ingredient| NewIngredient::new(ingredient.name.clone(), ingredient.quantity))
                .collect(),
        }
    }
}

// =============================================================================
// Unsaved Types
// =============================================================================

/// A recipe that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<NewIngredient>,
}

/// An ingredient of a [`NewRecipe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub quantity: Quantity,
}

impl NewRecipe {
    /// Create a recipe with no ingredients.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    /// Add an ingredient (builder pattern).
    pub fn with_ingredient(mut self, name: impl Into<String>, quantity: Quantity) -> Self {
        self.ingredients.push(NewIngredient::new(name, quantity));
        self
    }
}

impl NewIngredient {
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_recipe_builder() {
        let recipe = NewRecipe::new("Cake")
            .with_ingredient("flour", 100)
            .with_ingredient("sugar", 50);

        assert_eq!(recipe.name, "Cake");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1], NewIngredient::new("sugar", 50));
    }

    #[test]
    fn test_to_new_drops_identities() {
        let recipe = Recipe {
            id: 7,
            name: "Tea".to_string(),
            ingredients: vec![Ingredient {
                id: 3,
                recipe_id: 7,
                name: "leaves".to_string(),
                quantity: 2,
            }],
        };

        assert_eq!(recipe.to_new(), NewRecipe::new("Tea").with_ingredient("leaves", 2));
        assert!(!recipe.is_empty());
    }
}
