//! Futures and streams returned by asynchronous derivations

use futures::Stream;
use paced_task::{CancellationToken, ProgressReceiver};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::sync::oneshot;

use crate::{DerivedKey, KdfError, Result};

/// A running derivation; resolves to its [`DerivedKey`]
///
/// Dropping the handle does not stop the derivation. Use
/// [`DerivationHandle::cancel`] for that.
#[derive(Debug)]
pub struct DerivationHandle {
    receiver: oneshot::Receiver<Result<DerivedKey>>,
    cancel: CancellationToken,
}

impl DerivationHandle {
    pub(crate) fn new(
        receiver: oneshot::Receiver<Result<DerivedKey>>,
        cancel: CancellationToken,
    ) -> Self {
        Self { receiver, cancel }
    }

    /// Create a `DerivationHandle` that's already completed
    #[must_use]
    pub fn ready(result: Result<DerivedKey>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self::new(rx, CancellationToken::new())
    }

    /// Create a `DerivationHandle` that yields an error
    #[must_use]
    pub fn error(error: KdfError) -> Self {
        Self::ready(Err(error))
    }

    /// Stop the derivation at its next slice boundary
    ///
    /// The handle then resolves to `KdfError::Cancelled` and the completion
    /// callback is never invoked. No effect once the derivation has finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token observed by the derivation, for wiring into other shutdown paths
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Resolve through `handler` instead of returning the `Result`
    pub fn on_result<F, T>(self, handler: F) -> DerivationHandleWithHandler<F>
    where
        F: FnOnce(Result<DerivedKey>) -> T,
    {
        DerivationHandleWithHandler {
            handle: self,
            handler: Some(handler),
        }
    }
}

impl Future for DerivationHandle {
    type Output = Result<DerivedKey>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(KdfError::internal("Derivation task dropped"))),
            Poll::Pending => Poll::Pending,
        }
    }
}

pin_project! {
    /// Derivation handle with a user-defined result handler
    pub struct DerivationHandleWithHandler<F> {
        #[pin]
        handle: DerivationHandle,
        handler: Option<F>,
    }
}

impl<F, T> Future for DerivationHandleWithHandler<F>
where
    F: FnOnce(Result<DerivedKey>) -> T,
{
    type Output = T;

    /// # Panics
    ///
    /// Panics if polled again after returning `Poll::Ready`.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        assert!(
            this.handler.is_some(),
            "DerivationHandleWithHandler polled after completion"
        );
        let result = ready!(this.handle.poll(cx));
        this.handler
            .take()
            .map_or(Poll::Pending, |handler| Poll::Ready(handler(result)))
    }
}

/// Event emitted by a [`DerivationStream`]
#[derive(Debug, Clone, PartialEq)]
pub enum DerivationEvent {
    /// Fraction of work completed after a slice
    Progress(f64),
    /// The derivation finished; this is the last event
    Complete(DerivedKey),
}

pin_project! {
    /// Progress events of a running derivation
    ///
    /// Yields one `Progress` per slice followed by either `Complete` or an
    /// error, then ends. Dropping the stream cancels the derivation.
    pub struct DerivationStream {
        #[pin]
        events: ProgressReceiver<Result<DerivationEvent>>,
        cancel: CancellationToken,
    }

    impl PinnedDrop for DerivationStream {
        fn drop(this: Pin<&mut Self>) {
            this.cancel.cancel();
        }
    }
}

impl DerivationStream {
    pub(crate) fn new(
        events: ProgressReceiver<Result<DerivationEvent>>,
        cancel: CancellationToken,
    ) -> Self {
        Self { events, cancel }
    }

    /// Stop the derivation at its next slice boundary
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Stream for DerivationStream {
    type Item = Result<DerivationEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().events.poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::time::Duration;

    #[tokio::test]
    async fn test_ready_handle_resolves() {
        let key = DerivedKey::new(vec![1, 2, 3], Duration::ZERO);
        let resolved = DerivationHandle::ready(Ok(key.clone())).await.expect("ready");
        assert_eq!(resolved, key);
    }

    #[tokio::test]
    async fn test_handler_maps_error() {
        let message = DerivationHandle::error(KdfError::InvalidIterations)
            .on_result(|result| match result {
                Ok(key) => key.to_hex(),
                Err(e) => e.to_string(),
            })
            .await;
        assert_eq!(message, KdfError::InvalidIterations.to_string());
    }

    #[test]
    #[should_panic(expected = "polled after completion")]
    fn test_handler_future_panics_when_polled_after_completion() {
        let mut future = DerivationHandle::error(KdfError::InvalidIterations).on_result(|r| r.is_ok());
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());

        assert_eq!(future.poll_unpin(&mut cx), Poll::Ready(false));
        let _ = future.poll_unpin(&mut cx);
    }

    #[tokio::test]
    async fn test_dropped_sender_reports_internal_error() {
        let (tx, rx) = oneshot::channel();
        drop(tx);
        let result = DerivationHandle::new(rx, CancellationToken::new()).await;
        assert!(matches!(result, Err(KdfError::Internal(_))));
    }
}
