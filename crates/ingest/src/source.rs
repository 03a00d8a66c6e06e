//! Message sources feeding the ingestion pipeline.
//!
//! A source yields opaque payloads, one serialized recipe each. Two
//! implementations ship with the crate:
//!
//! - [`ChannelSource`]: an in-process queue fed through a [`MessageSender`]
//! - [`LineSource`]: newline-delimited payloads from stdin or a file

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::mpsc;

use crate::error::SourceError;

/// A stream of serialized recipe messages.
///
/// The pipeline awaits `next_message` inside a `select!` against its
/// cancellation signal, so the future may be dropped before completion.
#[async_trait]
pub trait MessageSource: Send {
    /// Name used in log lines (topic, file path, ...).
    fn name(&self) -> &str;

    /// Wait for the next message.
    ///
    /// # Returns
    /// * `Ok(Some(payload))` - The next message
    /// * `Ok(None)` - The stream is exhausted and will never yield again
    /// * `Err` - Delivery failed; see [`SourceError`] for which failures are fatal
    async fn next_message(&mut self) -> Result<Option<Vec<u8>>, SourceError>;
}

// =============================================================================
// Channel Source
// =============================================================================

/// Returned by [`MessageSender::send`] once the consuming side is gone.
#[derive(Debug, thiserror::Error)]
#[error("Pipeline is no longer consuming messages")]
pub struct ChannelClosed;

/// Producer half of an in-process message queue.
#[derive(Debug, Clone)]
pub struct MessageSender {
    tx: mpsc::Sender<Vec<u8>>,
}

impl MessageSender {
    /// Enqueue one payload, waiting while the queue is full.
    pub async fn send(&self, payload: impl Into<Vec<u8>>) -> Result<(), ChannelClosed> {
        self.tx.send(payload.into()).await.map_err(|_| ChannelClosed)
    }
}

/// Consumer half of an in-process message queue.
///
/// The stream is exhausted once every [`MessageSender`] has been dropped and
/// the queue is drained.
#[derive(Debug)]
pub struct ChannelSource {
    name: String,
    rx: mpsc::Receiver<Vec<u8>>,
}

/// Create a bounded in-process queue.
///
/// # Arguments
/// * `name` - Stream name for log lines
/// * `capacity` - Messages buffered before `send` waits
pub fn channel(name: impl Into<String>, capacity: usize) -> (MessageSender, ChannelSource) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        MessageSender { tx },
        ChannelSource {
            name: name.into(),
            rx,
        },
    )
}

#[async_trait]
impl MessageSource for ChannelSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_message(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        Ok(self.rx.recv().await)
    }
}

// =============================================================================
// Line Source
// =============================================================================

/// Newline-delimited messages read from any async buffered reader.
///
/// Blank lines are skipped and a trailing `\r\n` or `\n` is stripped. Bytes
/// of an unfinished line are kept in `pending`, so a `next_message` future
/// dropped mid-line loses nothing; the next call resumes the same line.
pub struct LineSource<R> {
    name: String,
    reader: R,
    pending: Vec<u8>,
}

impl<R> LineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            pending: Vec::new(),
        }
    }
}

impl LineSource<BufReader<Stdin>> {
    /// Messages from the process's standard input.
    pub fn stdin() -> Self {
        Self::new("stdin", BufReader::new(tokio::io::stdin()))
    }
}

impl LineSource<BufReader<File>> {
    /// Messages from a file, one per line.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        Ok(Self::new(path.display().to_string(), BufReader::new(file)))
    }
}

#[async_trait]
impl<R> MessageSource for LineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_message(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        loop {
            let read = self.reader.read_until(b'\n', &mut self.pending).await?;
            if read == 0 && self.pending.is_empty() {
                return Ok(None);
            }

            let mut line = std::mem::take(&mut self.pending);

            while matches!(line.last(), Some(b'\n' | b'\r')) {
                line.pop();
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            return Ok(Some(line));
        }
    }
}
