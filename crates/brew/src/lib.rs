//! # Brew Crate
//!
//! Decides whether a set of offered ingredients can brew any stored recipe.
//!
//! ## Main Components
//!
//! - **request**: `Requested`, the offered ingredient quantities
//! - **requirements**: Per-recipe lookup and the brewable predicate
//! - **engine**: `BrewEngine`, which runs the predicate over the catalog
//! - **error**: Error types for brew operations
//!
//! ## The Brewable Rule
//!
//! A recipe is brewable with a request when:
//! - the recipe has no ingredients, or
//! - every offered ingredient appears in the recipe and the recipe requires
//!   no more of it than is offered.
//!
//! Recipe ingredients the request does not mention are ignored.
//!
//! ## Example Usage
//!
//! ```ignore
//! use brew::{BrewEngine, Requested};
//!
//! let engine = BrewEngine::new(store);
//! let requested = Requested::new().with("flour", 100).with("sugar", 50);
//!
//! if engine.can_brew(&requested).await? {
//!     println!("Something is brewing");
//! }
//! ```

pub mod engine;
pub mod error;
pub mod request;
pub mod requirements;

pub use engine::{BrewEngine, BrewMatch, first_brewable};
pub use error::{BrewError, Result};
pub use request::Requested;
pub use requirements::{RecipeRequirements, is_brewable};
