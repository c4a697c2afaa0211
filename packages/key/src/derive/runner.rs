//! Running an engine on the tokio runtime

use paced_common::LoggingTransformer;
use paced_hashing::WordHash;
use paced_task::{progress_channel, CancellationToken, CooperativeTask};
use tokio::sync::oneshot;

use super::engine::Pbkdf2Engine;
use crate::{DerivationEvent, DerivationHandle, DerivationStream, KdfError};

impl<H> Pbkdf2Engine<H>
where
    H: WordHash + Send + 'static,
{
    /// Start the derivation in the background and return immediately
    ///
    /// Each slice is followed by a yield to the scheduler. `on_progress`
    /// receives the completed fraction after every slice. `on_complete`
    /// receives the key as lowercase hex and the elapsed milliseconds, and
    /// is called exactly once on success, never on failure or cancellation.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn derive_key<P, C>(mut self, on_progress: P, on_complete: C) -> DerivationHandle
    where
        P: FnMut(f64) + Send + 'static,
        C: FnOnce(String, u64) + Send + 'static,
    {
        self.start_timer();
        let cancel = CancellationToken::new();
        let task = CooperativeTask::with_cancellation(self, cancel.clone());
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = task.run(on_progress).await;
            match &result {
                Ok(key) => on_complete(key.to_hex(), key.elapsed_millis()),
                Err(KdfError::Cancelled) => {}
                Err(e) => LoggingTransformer::log_derivation_error("derive_key", e),
            }
            let _ = tx.send(result);
        });

        DerivationHandle::new(rx, cancel)
    }

    /// Start the derivation in the background and observe it as a stream
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn progress_stream(mut self) -> DerivationStream {
        self.start_timer();
        let cancel = CancellationToken::new();
        let task = CooperativeTask::with_cancellation(self, cancel.clone());
        let (tx, rx) = progress_channel();

        let progress_tx = tx.clone();
        let consumer_gone = cancel.clone();
        tokio::spawn(async move {
            let result = task
                .run(move |progress| {
                    if progress_tx
                        .send(Ok(DerivationEvent::Progress(progress)))
                        .is_err()
                    {
                        consumer_gone.cancel();
                    }
                })
                .await;
            if let Err(e) = &result {
                if !matches!(e, KdfError::Cancelled) {
                    LoggingTransformer::log_derivation_error("progress_stream", e);
                }
            }
            let _ = tx.send(result.map(DerivationEvent::Complete));
        });

        DerivationStream::new(rx, cancel)
    }
}
