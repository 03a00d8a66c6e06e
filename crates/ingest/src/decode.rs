//! Decoder for inbound recipe messages.
//!
//! Wire format (one JSON object per message):
//!
//! ```json
//! { "name": "Cake", "ingredients": [{ "name": "flour", "quantity": 100 }] }
//! ```
//!
//! - `ingredients` may be omitted, meaning the recipe requires nothing
//! - `quantity` must be a non-negative integer that fits in 32 bits
//! - unknown fields are ignored; in particular a client-supplied `id` never
//!   becomes the recipe's identity

use catalog::NewRecipe;

use crate::error::DecodeError;

/// Decode one message payload into an unsaved recipe.
///
/// # Returns
/// * `Ok(NewRecipe)` - The decoded recipe, ready for `RecipeStore::save`
/// * `Err(DecodeError)` - The payload is not a valid recipe
pub fn decode_recipe(payload: &[u8]) -> Result<NewRecipe, DecodeError> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }

    let text = std::str::from_utf8(payload)?;
    let recipe: NewRecipe = serde_json::from_str(text)?;
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::NewIngredient;

    #[test]
    fn test_decode_full_recipe() {
        let payload =
            br#"{"name":"Cake","ingredients":[{"name":"flour","quantity":100},{"name":"sugar","quantity":50}]}"#;

        let recipe = decode_recipe(payload).unwrap();

        assert_eq!(recipe.name, "Cake");
        assert_eq!(
            recipe.ingredients,
            vec![NewIngredient::new("flour", 100), NewIngredient::new("sugar", 50)]
        );
    }

    #[test]
    fn test_missing_ingredients_means_empty_recipe() {
        let recipe = decode_recipe(br#"{"name":"Water"}"#).unwrap();
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_client_supplied_id_is_ignored() {
        let recipe = decode_recipe(br#"{"id":42,"name":"Tea","ingredients":[]}"#).unwrap();
        assert_eq!(recipe, NewRecipe::new("Tea"));
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let result = decode_recipe(
            br#"{"name":"Bad","ingredients":[{"name":"salt","quantity":-1}]}"#,
        );
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_fractional_quantity_is_rejected() {
        let result = decode_recipe(
            br#"{"name":"Bad","ingredients":[{"name":"salt","quantity":1.5}]}"#,
        );
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let result = decode_recipe(br#"{"ingredients":[]}"#);
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(decode_recipe(b"{not json"), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        assert!(matches!(decode_recipe(&[0xff, 0xfe, 0x7b]), Err(DecodeError::Utf8(_))));
    }

    #[test]
    fn test_blank_payload_is_rejected() {
        assert!(matches!(decode_recipe(b""), Err(DecodeError::Empty)));
        assert!(matches!(decode_recipe(b"  \n"), Err(DecodeError::Empty)));
    }
}
