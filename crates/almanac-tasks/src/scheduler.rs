//! Task scheduler: turns dependency declarations into an execution order

use tracing::{debug, info, instrument};

use crate::error::PipelineError;
use crate::graph::DependencyGraph;
use crate::task::{BoxedTask, TaskKind};

/// Build the dependency graph for a set of tasks.
///
/// Nodes are task positions in `tasks`, added in input order. For every
/// instance of a type declaring "runs after `U`", an edge is added from every
/// instance of `U`; "runs before `U`" adds edges to every instance of `U`.
#[instrument(skip_all, fields(task_count = tasks.len()))]
pub fn build_graph<D: 'static>(tasks: &[BoxedTask<D>]) -> Result<DependencyGraph<usize>, PipelineError> {
    let kinds: Vec<TaskKind> = tasks.iter().map(|t| t.kind()).collect();
    let instances_of = |kind: &TaskKind| -> Vec<usize> {
        kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| *k == kind)
            .map(|(i, _)| i)
            .collect()
    };
    let resolve = |dependency: &TaskKind, declared_by: &TaskKind| {
        let instances = instances_of(dependency);
        if instances.is_empty() {
            Err(PipelineError::MissingDependency {
                dependency: dependency.name().to_string(),
                declared_by: declared_by.name().to_string(),
            })
        } else {
            Ok(instances)
        }
    };

    let mut graph = DependencyGraph::new();
    for index in 0..tasks.len() {
        graph.add_node(index);
    }

    for (index, task) in tasks.iter().enumerate() {
        let kind = &kinds[index];

        for predecessor in task.runs_after() {
            for before in resolve(&predecessor, kind)? {
                graph.add_edge(before, index);
            }
        }

        for successor in task.runs_before() {
            for after in resolve(&successor, kind)? {
                graph.add_edge(index, after);
            }
        }
    }

    debug!(edge_count = graph.edge_count(), "task graph built");
    Ok(graph)
}

/// Compute the execution order as positions into `tasks`.
///
/// Fails if a declared dependency is missing or the dependencies are cyclic.
pub fn execution_order<D: 'static>(tasks: &[BoxedTask<D>]) -> Result<Vec<usize>, PipelineError> {
    let graph = build_graph(tasks)?;

    graph.topological_sort().map_err(|cycle| PipelineError::CyclicDependency {
        cycle: cycle
            .into_iter()
            .map(|i| tasks[i].kind().name().to_string())
            .collect(),
    })
}

/// Reorder tasks so every task runs after the tasks it depends on.
///
/// Tasks without an ordering relationship keep their relative input order.
#[instrument(skip_all, fields(task_count = tasks.len()))]
pub fn schedule<D: 'static>(tasks: Vec<BoxedTask<D>>) -> Result<Vec<BoxedTask<D>>, PipelineError> {
    let order = execution_order(&tasks)?;

    let mut slots: Vec<Option<BoxedTask<D>>> = tasks.into_iter().map(Some).collect();
    let ordered: Vec<BoxedTask<D>> = order
        .into_iter()
        .filter_map(|index| slots.get_mut(index).and_then(Option::take))
        .collect();

    for (position, task) in ordered.iter().enumerate() {
        debug!(position, task = task.kind().name(), "scheduled task");
    }
    info!(task_count = ordered.len(), "execution order computed");

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskOutcome};

    type Log = Vec<String>;

    struct Independent(&'static str);

    impl Task<Log> for Independent {
        fn run(&mut self, log: &mut Log) -> TaskOutcome {
            log.push(self.0.to_string());
            TaskOutcome::Success
        }
    }

    struct TaskA(&'static str);
    struct TaskB(&'static str);

    impl Task<Log> for TaskA {
        fn run(&mut self, log: &mut Log) -> TaskOutcome {
            log.push(self.0.to_string());
            TaskOutcome::Success
        }
    }

    impl Task<Log> for TaskB {
        fn runs_after(&self) -> Vec<TaskKind> {
            vec![TaskKind::of::<TaskA>()]
        }

        fn run(&mut self, log: &mut Log) -> TaskOutcome {
            log.push(self.0.to_string());
            TaskOutcome::Success
        }
    }

    struct T1;
    struct T2;
    struct T3;
    struct T4;

    impl Task<Log> for T1 {
        fn run(&mut self, _: &mut Log) -> TaskOutcome {
            TaskOutcome::Success
        }
    }

    impl Task<Log> for T2 {
        fn runs_before(&self) -> Vec<TaskKind> {
            vec![TaskKind::of::<T1>()]
        }

        fn run(&mut self, _: &mut Log) -> TaskOutcome {
            TaskOutcome::Success
        }
    }

    impl Task<Log> for T3 {
        fn runs_after(&self) -> Vec<TaskKind> {
            vec![TaskKind::of::<T2>()]
        }

        fn run(&mut self, _: &mut Log) -> TaskOutcome {
            TaskOutcome::Success
        }
    }

    impl Task<Log> for T4 {
        fn run(&mut self, _: &mut Log) -> TaskOutcome {
            TaskOutcome::Success
        }
    }

    struct SelfReferencing;

    impl Task<Log> for SelfReferencing {
        fn runs_after(&self) -> Vec<TaskKind> {
            vec![TaskKind::of::<SelfReferencing>()]
        }

        fn run(&mut self, _: &mut Log) -> TaskOutcome {
            TaskOutcome::Success
        }
    }

    struct PingA;
    struct PingB;

    impl Task<Log> for PingA {
        fn runs_after(&self) -> Vec<TaskKind> {
            vec![TaskKind::of::<PingB>()]
        }

        fn run(&mut self, _: &mut Log) -> TaskOutcome {
            TaskOutcome::Success
        }
    }

    impl Task<Log> for PingB {
        fn runs_after(&self) -> Vec<TaskKind> {
            vec![TaskKind::of::<PingA>()]
        }

        fn run(&mut self, _: &mut Log) -> TaskOutcome {
            TaskOutcome::Success
        }
    }

    fn names(tasks: &[BoxedTask<Log>]) -> Vec<&'static str> {
        tasks.iter().map(|t| t.kind().name()).collect()
    }

    fn run_all(tasks: Vec<BoxedTask<Log>>) -> Log {
        let mut log = Log::new();
        for mut task in tasks {
            task.run(&mut log);
        }
        log
    }

    #[test]
    fn test_unrelated_tasks_keep_input_order() {
        let tasks: Vec<BoxedTask<Log>> = vec![Box::new(TaskA("a")), Box::new(Independent("x"))];
        let ordered = schedule(tasks).unwrap();
        assert_eq!(names(&ordered), vec!["TaskA", "Independent"]);
    }

    #[test]
    fn test_runs_after_reorders_input() {
        let tasks: Vec<BoxedTask<Log>> = vec![Box::new(TaskB("b")), Box::new(TaskA("a"))];
        let ordered = schedule(tasks).unwrap();
        assert_eq!(names(&ordered), vec!["TaskA", "TaskB"]);
    }

    #[test]
    fn test_every_instance_of_dependency_runs_first() {
        let tasks: Vec<BoxedTask<Log>> = vec![
            Box::new(TaskB("b1")),
            Box::new(TaskA("a1")),
            Box::new(TaskB("b2")),
            Box::new(TaskA("a2")),
        ];
        let log = run_all(schedule(tasks).unwrap());
        assert_eq!(log, vec!["a1", "a2", "b1", "b2"]);
    }

    #[test]
    fn test_mixed_before_and_after_declarations() {
        let tasks: Vec<BoxedTask<Log>> =
            vec![Box::new(T1), Box::new(T2), Box::new(T3), Box::new(T4)];
        let ordered = schedule(tasks).unwrap();
        assert_eq!(names(&ordered), vec!["T2", "T1", "T3", "T4"]);
    }

    #[test]
    fn test_missing_dependency() {
        let tasks: Vec<BoxedTask<Log>> = vec![Box::new(TaskB("b"))];
        let err = schedule(tasks).err().unwrap();
        assert_eq!(
            err,
            PipelineError::MissingDependency {
                dependency: "TaskA".to_string(),
                declared_by: "TaskB".to_string(),
            }
        );
    }

    #[test]
    fn test_self_reference_is_cycle() {
        let tasks: Vec<BoxedTask<Log>> = vec![Box::new(SelfReferencing)];
        let err = schedule(tasks).err().unwrap();
        assert_eq!(
            err,
            PipelineError::CyclicDependency {
                cycle: vec!["SelfReferencing".to_string(), "SelfReferencing".to_string()],
            }
        );
    }

    #[test]
    fn test_mutual_dependency_is_cycle() {
        let tasks: Vec<BoxedTask<Log>> = vec![Box::new(PingA), Box::new(PingB)];
        let err = execution_order(&tasks).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::CyclicDependency { ref cycle } if cycle.len() == 3 && cycle[0] == cycle[2]
        ));
    }

    #[test]
    fn test_empty_pipeline() {
        let tasks: Vec<BoxedTask<Log>> = Vec::new();
        assert!(schedule(tasks).unwrap().is_empty());
    }
}
