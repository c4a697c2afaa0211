//! Cooperative task stepping without blocking the host scheduler

use tokio_util::sync::CancellationToken;

/// Error types for cooperative task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The step function reported an unrecoverable failure
    #[error("Task execution failed: {0}")]
    ExecutionFailed(String),
    /// The task observed its cancellation token before starting a slice
    #[error("Task was cancelled")]
    Cancelled,
}

/// Result type for cooperative tasks
pub type TaskResult<T> = Result<T, TaskError>;

/// Outcome of advancing a steppable by one bounded slice of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// More slices are required
    Pending,
    /// The computation finished with this output
    Ready(T),
}

/// A resumable computation that advances in bounded slices
///
/// Implementations own all of their state; `step` must never block and must
/// do at most one slice of work per call.
pub trait Steppable {
    /// Value produced when the computation completes
    type Output;
    /// Error produced by a failing slice or by the runtime itself
    type Error: From<TaskError>;

    /// Advance by at most one slice
    ///
    /// # Errors
    ///
    /// Returns the implementation's error if the slice cannot be performed.
    fn step(&mut self) -> Result<Step<Self::Output>, Self::Error>;

    /// Fraction of work completed so far, in `[0, 1]`
    fn progress(&self) -> f64;
}

/// Drives a [`Steppable`] on the current tokio runtime
///
/// Each slice is followed by a `yield_now`, so other tasks sharing the
/// runtime (or the single thread of a current-thread runtime) get to run
/// between slices.
pub struct CooperativeTask<S> {
    stepper: S,
    cancel: CancellationToken,
}

impl<S> CooperativeTask<S>
where
    S: Steppable,
{
    /// Create a new cooperative task with its own cancellation token
    pub fn new(stepper: S) -> Self {
        Self::with_cancellation(stepper, CancellationToken::new())
    }

    /// Create a cooperative task observing an existing cancellation token
    pub fn with_cancellation(stepper: S, cancel: CancellationToken) -> Self {
        Self { stepper, cancel }
    }

    /// Token that cancels this task at its next slice boundary
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run until the steppable completes, reporting progress after every slice
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Cancelled` (converted into `S::Error`) if the token
    /// is cancelled before a slice starts, or any error returned by a slice.
    pub async fn run<P>(mut self, mut on_progress: P) -> Result<S::Output, S::Error>
    where
        P: FnMut(f64),
    {
        loop {
            if self.cancel.is_cancelled() {
                tracing::warn!("Cooperative task cancelled at slice boundary");
                return Err(TaskError::Cancelled.into());
            }

            let step = self.stepper.step()?;
            on_progress(self.stepper.progress());

            match step {
                Step::Pending => tokio::task::yield_now().await,
                Step::Ready(output) => return Ok(output),
            }
        }
    }

    /// Run to completion on the calling thread without yielding
    ///
    /// Intended for hosts without an event loop. Cancellation is still
    /// honoured at slice boundaries.
    ///
    /// # Errors
    ///
    /// Same as [`CooperativeTask::run`].
    pub fn run_blocking<P>(mut self, mut on_progress: P) -> Result<S::Output, S::Error>
    where
        P: FnMut(f64),
    {
        loop {
            if self.cancel.is_cancelled() {
                return Err(TaskError::Cancelled.into());
            }
            let step = self.stepper.step()?;
            on_progress(self.stepper.progress());
            if let Step::Ready(output) = step {
                return Ok(output);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts to a target, `per_slice` units at a time
    struct Counter {
        done: u32,
        target: u32,
        per_slice: u32,
    }

    impl Steppable for Counter {
        type Output = u32;
        type Error = TaskError;

        fn step(&mut self) -> Result<Step<u32>, TaskError> {
            self.done = (self.done + self.per_slice).min(self.target);
            if self.done == self.target {
                Ok(Step::Ready(self.done))
            } else {
                Ok(Step::Pending)
            }
        }

        fn progress(&self) -> f64 {
            f64::from(self.done) / f64::from(self.target)
        }
    }

    #[tokio::test]
    async fn test_run_reports_progress_after_every_slice() {
        let task = CooperativeTask::new(Counter {
            done: 0,
            target: 10,
            per_slice: 3,
        });
        let mut seen = Vec::new();
        let output = task.run(|p| seen.push(p)).await.expect("counter completes");

        assert_eq!(output, 10);
        assert_eq!(seen.len(), 4);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!((seen[3] - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_slice() {
        let task = CooperativeTask::new(Counter {
            done: 0,
            target: 10,
            per_slice: 1,
        });
        task.cancellation_token().cancel();

        let mut calls = 0;
        let result = task.run(|_| calls += 1).await;
        assert!(matches!(result, Err(TaskError::Cancelled)));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_run_blocking_completes() {
        let task = CooperativeTask::new(Counter {
            done: 0,
            target: 5,
            per_slice: 2,
        });
        let output = task.run_blocking(|_| {}).expect("counter completes");
        assert_eq!(output, 5);
    }
}
