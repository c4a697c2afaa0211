//! Single-thread round-robin executor for independent steppables
//!
//! Every admitted task gets exactly one slice per turn. Tasks never share
//! state, so interleaving order cannot change any task's output.

use crate::{Step, Steppable, TaskError};
use std::collections::VecDeque;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Configuration for the round-robin executor
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of tasks stepped per turn; the rest wait in a queue
    pub max_active: usize,
    /// Whether step and completion counters are maintained
    pub enable_metrics: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_active: 16,
            enable_metrics: true,
        }
    }
}

/// Counters for executor activity
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecutorMetrics {
    /// Total slices performed across all tasks
    pub steps_executed: u64,
    /// Tasks that produced an output
    pub tasks_completed: u64,
    /// Tasks whose slice returned an error
    pub tasks_failed: u64,
    /// Tasks stopped through their cancellation token
    pub tasks_cancelled: u64,
}

/// Identifier handed out by [`RoundRobinExecutor::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// A finished task and its outcome
pub struct Completion<S: Steppable> {
    /// Task that finished
    pub id: TaskId,
    /// Output or error of the task
    pub result: Result<S::Output, S::Error>,
}

struct Slot<S> {
    id: TaskId,
    stepper: S,
    cancel: CancellationToken,
}

/// Interleaves independent steppables on the calling thread
pub struct RoundRobinExecutor<S> {
    config: ExecutorConfig,
    active: VecDeque<Slot<S>>,
    waiting: VecDeque<Slot<S>>,
    next_id: u64,
    metrics: ExecutorMetrics,
}

impl<S> Default for RoundRobinExecutor<S>
where
    S: Steppable,
{
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}

impl<S> RoundRobinExecutor<S>
where
    S: Steppable,
{
    /// Create a new executor
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            config,
            active: VecDeque::new(),
            waiting: VecDeque::new(),
            next_id: 0,
            metrics: ExecutorMetrics::default(),
        }
    }

    /// Admit a task with its own cancellation token
    pub fn submit(&mut self, stepper: S) -> TaskId {
        self.submit_with_cancellation(stepper, CancellationToken::new())
    }

    /// Admit a task observing the given cancellation token
    pub fn submit_with_cancellation(&mut self, stepper: S, cancel: CancellationToken) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let slot = Slot {
            id,
            stepper,
            cancel,
        };
        if self.active.len() < self.config.max_active.max(1) {
            self.active.push_back(slot);
        } else {
            tracing::debug!(%id, "Executor at capacity, queueing task");
            self.waiting.push_back(slot);
        }
        id
    }

    /// Number of tasks not yet finished
    #[must_use]
    pub fn pending(&self) -> usize {
        self.active.len() + self.waiting.len()
    }

    /// Whether every admitted task has finished
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Current metrics snapshot
    #[must_use]
    pub fn metrics(&self) -> ExecutorMetrics {
        self.metrics.clone()
    }

    /// Give every active task one slice
    ///
    /// `on_progress` is called once per stepped task. Returns the tasks that
    /// finished during this turn, in the order they finished.
    pub fn turn<P>(&mut self, mut on_progress: P) -> Vec<Completion<S>>
    where
        P: FnMut(TaskId, f64),
    {
        let mut finished = Vec::new();

        for _ in 0..self.active.len() {
            let Some(mut slot) = self.active.pop_front() else {
                break;
            };

            if slot.cancel.is_cancelled() {
                self.record(|m| m.tasks_cancelled += 1);
                finished.push(Completion {
                    id: slot.id,
                    result: Err(TaskError::Cancelled.into()),
                });
                continue;
            }

            let step = slot.stepper.step();
            self.record(|m| m.steps_executed += 1);

            match step {
                Ok(Step::Pending) => {
                    on_progress(slot.id, slot.stepper.progress());
                    self.active.push_back(slot);
                }
                Ok(Step::Ready(output)) => {
                    on_progress(slot.id, slot.stepper.progress());
                    self.record(|m| m.tasks_completed += 1);
                    finished.push(Completion {
                        id: slot.id,
                        result: Ok(output),
                    });
                }
                Err(error) => {
                    self.record(|m| m.tasks_failed += 1);
                    finished.push(Completion {
                        id: slot.id,
                        result: Err(error),
                    });
                }
            }
        }

        self.promote();
        finished
    }

    /// Run turns until every admitted task has finished
    pub fn run_until_idle<P>(&mut self, mut on_progress: P) -> Vec<Completion<S>>
    where
        P: FnMut(TaskId, f64),
    {
        let mut finished = Vec::new();
        while !self.is_idle() {
            finished.extend(self.turn(&mut on_progress));
        }
        finished
    }

    fn promote(&mut self) {
        let capacity = self.config.max_active.max(1);
        while self.active.len() < capacity {
            match self.waiting.pop_front() {
                Some(slot) => self.active.push_back(slot),
                None => break,
            }
        }
    }

    fn record(&mut self, update: impl FnOnce(&mut ExecutorMetrics)) {
        if self.config.enable_metrics {
            update(&mut self.metrics);
        }
    }
}
