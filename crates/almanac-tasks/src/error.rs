//! Pipeline errors

use thiserror::Error;

/// Errors raised while configuring or reading a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A task declares a dependency on a task type that is not in the pipeline
    #[error("Invalid pipeline configuration: task '{declared_by}' depends on '{dependency}', which is not part of the pipeline")]
    MissingDependency {
        dependency: String,
        declared_by: String,
    },

    /// The declared dependencies form a cycle
    #[error("Invalid pipeline configuration: cyclic dependency detected: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// The document of a failed run was requested
    #[error("Pipeline did not complete successfully, no value is available")]
    NoValue,
}

impl PipelineError {
    /// Check if this error means no execution order could be determined
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDependency { .. } | Self::CyclicDependency { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message() {
        let err = PipelineError::CyclicDependency {
            cycle: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid pipeline configuration: cyclic dependency detected: A -> B -> A"
        );
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_no_value_is_not_configuration_error() {
        assert!(!PipelineError::NoValue.is_configuration_error());
    }
}
