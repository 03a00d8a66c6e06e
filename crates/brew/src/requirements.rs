//! Per-recipe ingredient lookup and the brewable predicate.

use std::collections::HashMap;

use catalog::{Quantity, Recipe};

use crate::request::Requested;

/// Ingredient name to required quantity for one recipe.
///
/// Built in ingredient order, so if a recipe lists the same name twice the
/// later entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRequirements<'a> {
    required: HashMap<&'a str, Quantity>,
}

impl<'a> RecipeRequirements<'a> {
    pub fn from_recipe(recipe: &'a Recipe) -> Self {
        let required = recipe
            .ingredients
            .iter()
            .map(|ingredient| (ingredient.name.as_str(), ingredient.quantity))
            .collect();
        Self { required }
    }

    pub fn get(&self, name: &str) -> Option<Quantity> {
        self.required.get(name).copied()
    }

    /// Check the offered ingredients against this recipe.
    ///
    /// ## Algorithm
    /// 1. A recipe that requires nothing is always satisfied
    /// 2. Otherwise every offered ingredient must appear in the recipe, and the
    ///    recipe must need no more of it than is offered
    /// 3. Recipe ingredients that were not offered do not matter
    pub fn is_satisfied_by(&self, requested: &Requested) -> bool {
        if self.required.is_empty() {
            return true;
        }

        requested.iter().all(|(name, offered)| {
            self.required
                .get(name)
                .is_some_and(|&required| required <= offered)
        })
    }
}

/// Shorthand for `RecipeRequirements::from_recipe(recipe).is_satisfied_by(requested)`.
pub fn is_brewable(recipe: &Recipe, requested: &Requested) -> bool {
    RecipeRequirements::from_recipe(recipe).is_satisfied_by(requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Ingredient;

    fn recipe(ingredients: &[(&str, Quantity)]) -> Recipe {
        Recipe {
            id: 1,
            name: "Test".to_string(),
            ingredients: ingredients
                .iter()
                .enumerate()
                .map(|(i, (name, quantity))| Ingredient {
                    id: i as i64 + 1,
                    recipe_id: 1,
                    name: name.to_string(),
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn test_exact_match() {
        let cake = recipe(&[("flour", 100), ("sugar", 50)]);
        let requested = Requested::new().with("flour", 100).with("sugar", 50);
        assert!(is_brewable(&cake, &requested));
    }

    #[test]
    fn test_more_than_required_is_enough() {
        let cake = recipe(&[("flour", 100), ("sugar", 50)]);
        let requested = Requested::new().with("flour", 250).with("sugar", 51);
        assert!(is_brewable(&cake, &requested));
    }

    #[test]
    fn test_one_short_ingredient_fails() {
        let cake = recipe(&[("flour", 100), ("sugar", 50)]);
        let requested = Requested::new().with("flour", 150).with("sugar", 30);
        assert!(!is_brewable(&cake, &requested));
    }

    #[test]
    fn test_offered_ingredient_missing_from_recipe_fails() {
        let cake = recipe(&[("flour", 100), ("sugar", 50)]);
        let requested = Requested::new().with("flour", 100).with("pepper", 10);
        assert!(!is_brewable(&cake, &requested));
    }

    #[test]
    fn test_unoffered_recipe_ingredients_are_irrelevant() {
        let cake = recipe(&[("flour", 100), ("sugar", 50)]);
        let requested = Requested::new().with("flour", 100);
        assert!(is_brewable(&cake, &requested));
    }

    #[test]
    fn test_empty_request_matches_any_recipe() {
        let cake = recipe(&[("flour", 100)]);
        assert!(is_brewable(&cake, &Requested::new()));
    }

    #[test]
    fn test_empty_recipe_matches_anything() {
        let water = recipe(&[]);
        assert!(is_brewable(&water, &Requested::new()));
        assert!(is_brewable(&water, &Requested::new().with("flour", 100)));
    }

    #[test]
    fn test_zero_quantity_is_trivially_satisfied() {
        let garnish = recipe(&[("parsley", 0)]);
        assert!(is_brewable(&garnish, &Requested::new().with("parsley", 0)));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let cake = recipe(&[("flour", 100)]);
        assert!(!is_brewable(&cake, &Requested::new().with("Flour", 100)));
    }

    #[test]
    fn test_duplicate_recipe_ingredient_last_wins() {
        let salty = recipe(&[("salt", 1), ("salt", 5)]);
        let requirements = RecipeRequirements::from_recipe(&salty);

        assert_eq!(requirements.get("salt"), Some(5));
        assert!(!requirements.is_satisfied_by(&Requested::new().with("salt", 3)));
        assert!(requirements.is_satisfied_by(&Requested::new().with("salt", 5)));
    }
}
