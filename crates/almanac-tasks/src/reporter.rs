//! Task execution reporting

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::task::TaskKind;

/// Events emitted during pipeline execution
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// The execution order has been computed
    Scheduled { order: Vec<TaskKind> },
    /// A task is starting execution
    Started { task: TaskKind },
    /// A task completed successfully
    Completed { task: TaskKind, duration: Duration },
    /// A task had nothing to do
    Skipped { task: TaskKind, reason: String },
    /// A task failed; the pipeline stops
    Failed {
        task: TaskKind,
        duration: Duration,
        error: String,
    },
    /// The pipeline finished, successfully or not
    AllCompleted {
        executed: usize,
        skipped: usize,
        failed: usize,
        pending: usize,
        duration: Duration,
    },
}

/// Trait for reporting pipeline progress
pub trait TaskReporter: Send + Sync {
    /// Handle a task event
    fn report(&self, event: &TaskEvent);
}

/// Simple reporter that logs to tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl TaskReporter for TracingReporter {
    fn report(&self, event: &TaskEvent) {
        match event {
            TaskEvent::Scheduled { order } => {
                let names: Vec<&str> = order.iter().map(|k| k.name()).collect();
                tracing::debug!(order = ?names, "pipeline scheduled");
            }
            TaskEvent::Started { task } => {
                tracing::debug!(task = task.name(), "starting task");
            }
            TaskEvent::Completed { task, duration } => {
                tracing::info!("{} completed in {:.1}s", task, duration.as_secs_f64());
            }
            TaskEvent::Skipped { task, reason } => {
                tracing::warn!("{} skipped: {}", task, reason);
            }
            TaskEvent::Failed {
                task,
                duration,
                error,
            } => {
                tracing::error!("{} failed after {:.1}s: {}", task, duration.as_secs_f64(), error);
            }
            TaskEvent::AllCompleted {
                executed,
                skipped,
                failed,
                pending,
                duration,
            } => {
                tracing::info!(
                    "Pipeline finished: {} executed, {} skipped, {} failed, {} pending ({:.1}s)",
                    executed,
                    skipped,
                    failed,
                    pending,
                    duration.as_secs_f64()
                );
            }
        }
    }
}

/// Reporter that collects events for later inspection (useful for testing)
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<TaskEvent>>,
}

impl CollectingReporter {
    /// Get all collected events
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl TaskReporter for CollectingReporter {
    fn report(&self, event: &TaskEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

/// Registry of task reporters
pub struct TaskReporterRegistry {
    reporters: Vec<Arc<dyn TaskReporter>>,
}

impl TaskReporterRegistry {
    /// Registry that logs through [`TracingReporter`]
    pub fn new() -> Self {
        Self {
            reporters: vec![Arc::new(TracingReporter)],
        }
    }

    /// Registry with no reporters
    pub fn empty() -> Self {
        Self {
            reporters: Vec::new(),
        }
    }

    /// Add a reporter
    pub fn register(&mut self, reporter: Arc<dyn TaskReporter>) {
        self.reporters.push(reporter);
    }

    /// Registered reporters
    pub fn all(&self) -> &[Arc<dyn TaskReporter>] {
        &self.reporters
    }

    /// Broadcast an event to all registered reporters
    pub fn broadcast(&self, event: &TaskEvent) {
        for reporter in &self.reporters {
            reporter.report(event);
        }
    }
}

impl Default for TaskReporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskReporter for TaskReporterRegistry {
    fn report(&self, event: &TaskEvent) {
        self.broadcast(event);
    }
}
