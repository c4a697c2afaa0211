//! Channel-based progress reporting

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Error types for channel operations
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The receiving side was dropped
    #[error("Channel closed")]
    Closed,
}

/// Create an unbounded progress channel
///
/// Unbounded so that a producing step never waits on a slow consumer; the
/// producer emits at most one event per slice.
#[must_use]
pub fn progress_channel<T>() -> (ProgressSender<T>, ProgressReceiver<T>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ProgressSender { sender }, ProgressReceiver { receiver })
}

/// Producing half of a progress channel
#[derive(Debug)]
pub struct ProgressSender<T> {
    sender: mpsc::UnboundedSender<T>,
}

impl<T> Clone for ProgressSender<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> ProgressSender<T> {
    /// Send an event without waiting
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::Closed` if the receiver has been dropped.
    pub fn send(&self, event: T) -> Result<(), ChannelError> {
        self.sender.send(event).map_err(|_| ChannelError::Closed)
    }

    /// Whether the receiving side has gone away
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consuming half of a progress channel, usable as a [`Stream`]
#[derive(Debug)]
pub struct ProgressReceiver<T> {
    receiver: mpsc::UnboundedReceiver<T>,
}

impl<T> ProgressReceiver<T> {
    /// Receive the next event, or `None` once every sender is dropped
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }
}

impl<T> Stream for ProgressReceiver<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
