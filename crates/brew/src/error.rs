//! Error types for the brew crate.

use catalog::StoreError;
use thiserror::Error;
use tokio::task::JoinError;

/// Errors raised while answering a brew request.
///
/// Evaluating the predicate itself cannot fail. Errors come from reading
/// the catalog or from the blocking task that runs the scan.
#[derive(Error, Debug)]
pub enum BrewError {
    #[error("could not read recipes: {0}")]
    CatalogRead(#[source] StoreError),

    #[error("matching task failed: {0}")]
    Matching(#[source] JoinError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, BrewError>;
