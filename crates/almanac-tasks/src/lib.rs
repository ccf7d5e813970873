//! Almanac Tasks - Dependency-ordered task pipeline
//!
//! Tasks declare which other task types they must run before or after. The
//! scheduler turns those declarations into a [`DependencyGraph`], computes a
//! stable, cycle-free execution order and the [`Pipeline`] runs the tasks one
//! at a time against a single shared document.

pub mod error;
pub mod graph;
pub mod pipeline;
pub mod reporter;
pub mod scheduler;
pub mod task;

pub use error::PipelineError;
pub use graph::DependencyGraph;
pub use pipeline::{ExecutedTask, Pipeline, PipelineResult};
pub use reporter::{CollectingReporter, TaskEvent, TaskReporter, TaskReporterRegistry, TracingReporter};
pub use scheduler::{execution_order, schedule};
pub use task::{BoxedTask, Task, TaskKind, TaskOutcome};
