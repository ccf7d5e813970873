//! Pipeline executor: runs scheduled tasks against a shared document

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, instrument};

use crate::error::PipelineError;
use crate::reporter::{TaskEvent, TaskReporter, TracingReporter};
use crate::scheduler::{execution_order, schedule};
use crate::task::{BoxedTask, Task, TaskKind, TaskOutcome};

/// Record of a task that ran
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutedTask {
    /// Task that was executed
    pub task: TaskKind,
    /// What the task reported
    pub outcome: TaskOutcome,
    /// How long the task took
    #[serde(skip)]
    pub duration: Duration,
}

/// Result of running a pipeline.
///
/// The document is only available when every task ran without an error;
/// a failed run exposes the executed and pending tasks instead.
#[derive(Debug)]
pub struct PipelineResult<D> {
    executed: Vec<ExecutedTask>,
    pending: Vec<TaskKind>,
    value: Option<D>,
}

impl<D> PipelineResult<D> {
    /// Whether every task ran without an error
    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }

    /// The final document. Fails with [`PipelineError::NoValue`] for a failed run.
    pub fn value(&self) -> Result<&D, PipelineError> {
        self.value.as_ref().ok_or(PipelineError::NoValue)
    }

    /// Take the final document. Fails with [`PipelineError::NoValue`] for a failed run.
    pub fn into_value(self) -> Result<D, PipelineError> {
        self.value.ok_or(PipelineError::NoValue)
    }

    /// Tasks that ran, in execution order
    pub fn executed_tasks(&self) -> &[ExecutedTask] {
        &self.executed
    }

    /// Tasks that never ran because an earlier task failed
    pub fn pending_tasks(&self) -> &[TaskKind] {
        &self.pending
    }

    /// The task whose error stopped the run
    pub fn failed_task(&self) -> Option<&ExecutedTask> {
        self.executed.last().filter(|t| t.outcome.is_error())
    }
}

/// An ordered set of tasks run one at a time against a single document
pub struct Pipeline<D> {
    tasks: Vec<BoxedTask<D>>,
    reporter: Arc<dyn TaskReporter>,
}

impl<D: 'static> Pipeline<D> {
    /// Create an empty pipeline that reports through tracing
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            reporter: Arc::new(TracingReporter),
        }
    }

    /// Use a custom reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn TaskReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Add a task
    pub fn with_task<T: Task<D>>(mut self, task: T) -> Self {
        self.tasks.push(Box::new(task));
        self
    }

    /// Add an already boxed task
    pub fn add_task(&mut self, task: BoxedTask<D>) {
        self.tasks.push(task);
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the pipeline has no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The order the tasks would run in, without running them
    pub fn plan(&self) -> Result<Vec<TaskKind>, PipelineError> {
        Ok(execution_order(&self.tasks)?
            .into_iter()
            .map(|i| self.tasks[i].kind())
            .collect())
    }

    /// Schedule and run every task against `document`.
    ///
    /// Configuration errors (missing dependency, cycle) are returned before
    /// any task runs. A task reporting [`TaskOutcome::Error`] stops the run;
    /// the remaining tasks are reported as pending.
    #[instrument(skip_all, fields(task_count = self.tasks.len()))]
    pub fn run(self, document: D) -> Result<PipelineResult<D>, PipelineError> {
        let Self { tasks, reporter } = self;
        let ordered = schedule(tasks)?;
        reporter.report(&TaskEvent::Scheduled {
            order: ordered.iter().map(|t| t.kind()).collect(),
        });

        let start = Instant::now();
        let mut document = document;
        let mut executed: Vec<ExecutedTask> = Vec::with_capacity(ordered.len());
        let mut remaining = ordered.into_iter();

        for mut task in remaining.by_ref() {
            let kind = task.kind();
            reporter.report(&TaskEvent::Started { task: kind });

            let task_start = Instant::now();
            let outcome = task.run(&mut document);
            let duration = task_start.elapsed();

            match &outcome {
                TaskOutcome::Success => reporter.report(&TaskEvent::Completed {
                    task: kind,
                    duration,
                }),
                TaskOutcome::Skipped(reason) => reporter.report(&TaskEvent::Skipped {
                    task: kind,
                    reason: reason.clone(),
                }),
                TaskOutcome::Error(error) => reporter.report(&TaskEvent::Failed {
                    task: kind,
                    duration,
                    error: error.clone(),
                }),
            }

            let failed = outcome.is_error();
            executed.push(ExecutedTask {
                task: kind,
                outcome,
                duration,
            });

            if failed {
                let pending: Vec<TaskKind> = remaining.map(|t| t.kind()).collect();
                report_summary(&*reporter, &executed, pending.len(), start.elapsed());
                info!(failed_task = kind.name(), pending = pending.len(), "pipeline failed");
                return Ok(PipelineResult {
                    executed,
                    pending,
                    value: None,
                });
            }
        }

        report_summary(&*reporter, &executed, 0, start.elapsed());
        Ok(PipelineResult {
            executed,
            pending: Vec::new(),
            value: Some(document),
        })
    }
}

impl<D: 'static> Default for Pipeline<D> {
    fn default() -> Self {
        Self::new()
    }
}

fn report_summary(
    reporter: &dyn TaskReporter,
    executed: &[ExecutedTask],
    pending: usize,
    duration: Duration,
) {
    let count = |f: fn(&TaskOutcome) -> bool| executed.iter().filter(|t| f(&t.outcome)).count();
    reporter.report(&TaskEvent::AllCompleted {
        executed: executed.len(),
        skipped: count(|o| matches!(o, TaskOutcome::Skipped(_))),
        failed: count(TaskOutcome::is_error),
        pending,
        duration,
    });
}
