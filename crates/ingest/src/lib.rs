//! # Ingest Crate
//!
//! Consumes a stream of serialized recipes and stores each one.
//!
//! ## Components
//!
//! - **decode**: JSON payload to `NewRecipe`
//! - **source**: The `MessageSource` trait plus channel and line-based sources
//! - **pipeline**: The sequential consume loop with cooperative cancellation
//!
//! ## Failure Policy
//!
//! Every failure is handled per message: an undecodable payload or a rejected
//! save is logged and dropped, and the loop moves on. Nothing is retried and
//! nothing is dead-lettered.
//!
//! ## Example Usage
//!
//! ```ignore
//! use ingest::{IngestionPipeline, channel};
//! use tokio::sync::watch;
//!
//! let (shutdown_tx, shutdown_rx) = watch::channel(false);
//! let (sender, source) = channel("recipes", 64);
//!
//! let handle = IngestionPipeline::new(store).spawn(source, shutdown_rx);
//! sender.send(r#"{"name":"Tea","ingredients":[{"name":"leaves","quantity":2}]}"#).await?;
//!
//! shutdown_tx.send(true)?;
//! let report = handle.await??;
//! ```

pub mod decode;
pub mod error;
pub mod pipeline;
pub mod source;

// Re-export commonly used types
pub use decode::decode_recipe;
pub use error::{DecodeError, IngestError, SourceError};
pub use pipeline::{IngestReport, IngestionPipeline, MessageOutcome};
pub use source::{
    ChannelClosed, ChannelSource, LineSource, MessageSender, MessageSource, channel,
};
