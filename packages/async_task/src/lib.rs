//! # Cooperative Stepping Runtime
//!
//! Long computations expressed as a [`Steppable`] state machine advance one
//! bounded slice at a time. The host decides how slices are scheduled:
//!
//! - [`CooperativeTask`] drives a single steppable on a tokio runtime,
//!   yielding back to the scheduler between slices
//! - [`RoundRobinExecutor`] interleaves many independent steppables on the
//!   calling thread, one slice each per turn
//! - [`progress_channel`] carries progress events to a consumer as a stream

pub mod channel;
pub mod executor;
pub mod task;

pub use channel::{progress_channel, ChannelError, ProgressReceiver, ProgressSender};
pub use executor::{Completion, ExecutorConfig, ExecutorMetrics, RoundRobinExecutor, TaskId};
pub use task::{CooperativeTask, Step, Steppable, TaskError, TaskResult};
pub use tokio_util::sync::CancellationToken;

/// Result type for task operations
pub type Result<T> = std::result::Result<T, TaskError>;
