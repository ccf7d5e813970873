//! Task types and definitions

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// Identity of a task type.
///
/// Dependencies are declared between task *types*: every instance of a type
/// that declares "runs after X" is ordered after every instance of `X`.
#[derive(Clone, Copy)]
pub struct TaskKind {
    id: TypeId,
    name: &'static str,
}

impl TaskKind {
    /// Kind of the given task type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name(std::any::type_name::<T>()),
        }
    }

    /// Type name without its module path
    pub fn name(&self) -> &'static str {
        self.name
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

impl PartialEq for TaskKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TaskKind {}

impl Hash for TaskKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TaskKind").field(&self.name).finish()
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for TaskKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// What a task reports after running
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum TaskOutcome {
    /// The task ran to completion
    Success,
    /// The task had nothing to do; execution continues
    Skipped(String),
    /// The task failed; execution stops
    Error(String),
}

impl TaskOutcome {
    /// Create a skipped outcome
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }

    /// Create an error outcome
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Check if this outcome stops the pipeline
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Check if this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// One processing step run against a shared document of type `D`.
///
/// Ordering constraints are declared per type through [`Task::runs_after`]
/// and [`Task::runs_before`]; the scheduler reads them once before anything
/// runs.
pub trait Task<D>: 'static {
    /// Identity used to match dependency declarations
    fn kind(&self) -> TaskKind {
        TaskKind::of::<Self>()
    }

    /// Task types that must complete before this one
    fn runs_after(&self) -> Vec<TaskKind> {
        Vec::new()
    }

    /// Task types that must not start before this one completes
    fn runs_before(&self) -> Vec<TaskKind> {
        Vec::new()
    }

    /// Run the task against the document
    fn run(&mut self, document: &mut D) -> TaskOutcome;
}

/// Owned, type-erased task
pub type BoxedTask<D> = Box<dyn Task<D>>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Task<()> for Noop {
        fn run(&mut self, _: &mut ()) -> TaskOutcome {
            TaskOutcome::Success
        }
    }

    struct Generic<T>(std::marker::PhantomData<T>);

    #[test]
    fn test_kind_name_strips_module_path() {
        assert_eq!(TaskKind::of::<Noop>().name(), "Noop");
        assert!(TaskKind::of::<Generic<String>>().name().starts_with("Generic<"));
    }

    #[test]
    fn test_kind_from_instance_matches_type() {
        let task: BoxedTask<()> = Box::new(Noop);
        assert_eq!(task.kind(), TaskKind::of::<Noop>());
        assert_ne!(task.kind(), TaskKind::of::<Generic<u8>>());
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(TaskOutcome::Success.is_success());
        assert!(!TaskOutcome::skipped("nothing to do").is_error());
        assert!(TaskOutcome::error("boom").is_error());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&TaskOutcome::skipped("no versions")).unwrap();
        assert_eq!(json, r#"{"status":"skipped","message":"no versions"}"#);
    }
}
