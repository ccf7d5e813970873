//! Changelog generation

use std::rc::Rc;
use std::sync::Arc;

use almanac_core::Config;
use almanac_tasks::{ExecutedTask, Pipeline, PipelineError, TaskKind, TaskOutcome, TaskReporter};
use thiserror::Error;
use tracing::{info, instrument};

use crate::source::CommitSource;
use crate::tasks::{
    FilterEntriesTask, LoadCommitsTask, LoadCurrentVersionTask, LoadVersionsFromTagsTask,
    ParseCommitsTask,
};
use crate::types::Changelog;

/// Errors from a changelog run
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The tasks could not be ordered
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A task reported an error and the run stopped
    #[error("{task} failed: {message}")]
    Failed {
        task: String,
        message: String,
        executed: Vec<ExecutedTask>,
    },
}

/// Builds a [`Changelog`] by running the changelog tasks against a commit source
pub struct ChangelogGenerator {
    config: Config,
    source: Rc<dyn CommitSource>,
    reporter: Arc<dyn TaskReporter>,
}

impl ChangelogGenerator {
    /// Create a new generator
    pub fn new(config: Config, source: Rc<dyn CommitSource>, reporter: Arc<dyn TaskReporter>) -> Self {
        Self {
            config,
            source,
            reporter,
        }
    }

    /// Assemble the pipeline with every changelog task
    pub fn pipeline(&self) -> Pipeline<Changelog> {
        let changelog = &self.config.changelog;

        Pipeline::new()
            .with_reporter(self.reporter.clone())
            .with_task(LoadVersionsFromTagsTask::new(
                self.source.clone(),
                changelog.tag_prefixes.clone(),
            ))
            .with_task(LoadCurrentVersionTask::new(
                self.source.clone(),
                changelog.current_version.clone(),
            ))
            .with_task(LoadCommitsTask::new(self.source.clone()))
            .with_task(ParseCommitsTask::new(self.config.parser.mode))
            .with_task(FilterEntriesTask::new(&changelog.include_types))
    }

    /// The order the tasks would run in
    pub fn plan(&self) -> Result<Vec<TaskKind>, GenerateError> {
        Ok(self.pipeline().plan()?)
    }

    /// Run every task and return the finished changelog
    #[instrument(skip_all, fields(mode = %self.config.parser.mode))]
    pub fn generate(&self) -> Result<Changelog, GenerateError> {
        let result = self.pipeline().run(Changelog::new())?;

        if let Some(failed) = result.failed_task() {
            let message = match &failed.outcome {
                TaskOutcome::Error(message) => message.clone(),
                _ => String::new(),
            };
            return Err(GenerateError::Failed {
                task: failed.task.name().to_string(),
                message,
                executed: result.executed_tasks().to_vec(),
            });
        }

        let changelog = result.into_value()?;
        info!(
            versions = changelog.len(),
            entries = changelog.entry_count(),
            "changelog generated"
        );
        Ok(changelog)
    }
}
