//! Request and response bodies exchanged with callers.
//!
//! These are the wire shapes; conversions to and from the domain types live
//! here so handlers stay thin.

use brew::Requested;
use catalog::{Ingredient, IngredientId, Quantity, Recipe, RecipeId};
use serde::{Deserialize, Serialize};

// ============================================================================
// ListRecipes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientView {
    pub id: IngredientId,
    pub name: String,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeView {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: Vec<IngredientView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeView>,
}

impl From<Ingredient> for IngredientView {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            quantity: ingredient.quantity,
        }
    }
}

impl From<Recipe> for RecipeView {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

impl FromIterator<Recipe> for ListRecipesResponse {
    fn from_iter<I: IntoIterator<Item = Recipe>>(iter: I) -> Self {
        Self {
            recipes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Brew
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRequest {
    pub name: String,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrewRequest {
    #[serde(default)]
    pub ingredients: Vec<IngredientRequest>,
}

impl BrewRequest {
    /// Add an offered ingredient (builder pattern).
    pub fn with(mut self, name: impl Into<String>, quantity: Quantity) -> Self {
        self.ingredients.push(IngredientRequest {
            name: name.into(),
            quantity,
        });
        self
    }

    /// Collapse the pairs into a lookup; a repeated name keeps its last quantity.
    pub fn to_requested(&self) -> Requested {
        self.ingredients
            .iter()
            .map(|ingredient| (ingredient.name.clone(), ingredient.quantity))
            .collect()
    }
}

/// Numeric error carried inside a [`BrewResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrewResponse {
    /// True when some stored recipe can be brewed with the offered ingredients.
    pub started: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl BrewResponse {
    pub fn started(started: bool) -> Self {
        Self {
            started,
            error: None,
        }
    }

    pub fn failed(code: i32, message: impl Into<String>) -> Self {
        Self {
            started: false,
            error: Some(ErrorBody {
                code,
                message: message.into(),
            }),
        }
    }
}
