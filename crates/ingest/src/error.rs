//! Error types for the ingest crate.

use thiserror::Error;

/// A message payload that is not a valid recipe.
///
/// Decode errors never leave the pipeline: the message is logged and dropped.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Empty message")]
    Empty,

    #[error("Message is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Message is not a valid recipe: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to pull the next message from a [`MessageSource`](crate::MessageSource).
#[derive(Error, Debug)]
pub enum SourceError {
    /// A transient delivery problem; the pipeline logs it and keeps consuming.
    #[error("Failed to receive message: {0}")]
    Receive(String),

    /// The underlying stream is broken; the pipeline stops.
    #[error("Message stream failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that end an ingestion run.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Ingestion stopped: {0}")]
    Source(#[from] SourceError),
}
