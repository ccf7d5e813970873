//! Generic dependency graph with stable ordering and cycle detection

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

use indexmap::IndexSet;
use tracing::{debug, instrument};

/// Directed graph where an edge `(from, to)` means `from` must come before `to`.
///
/// Nodes and edges keep their insertion order, which is what makes
/// [`DependencyGraph::topological_sort`] deterministic. Self-loops are
/// accepted as data and reported as cycles.
#[derive(Debug, Clone)]
pub struct DependencyGraph<T> {
    nodes: IndexSet<T>,
    edges: IndexSet<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnPath,
    Done,
}

impl<T: Eq + Hash + Clone> DependencyGraph<T> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            nodes: IndexSet::new(),
            edges: IndexSet::new(),
        }
    }

    /// Add a node. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: T) -> bool {
        self.nodes.insert(node)
    }

    /// Add an edge, inserting either endpoint if missing.
    /// Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, from: T, to: T) -> bool {
        let (from, _) = self.nodes.insert_full(from);
        let (to, _) = self.nodes.insert_full(to);
        self.edges.insert((from, to))
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter()
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&T, &T)> {
        self.edges
            .iter()
            .filter_map(|&(from, to)| Some((self.nodes.get_index(from)?, self.nodes.get_index(to)?)))
    }

    /// Check if a node is present
    pub fn contains_node(&self, node: &T) -> bool {
        self.nodes.contains(node)
    }

    /// Check if an edge is present
    pub fn contains_edge(&self, from: &T, to: &T) -> bool {
        match (self.nodes.get_index_of(from), self.nodes.get_index_of(to)) {
            (Some(from), Some(to)) => self.edges.contains(&(from, to)),
            _ => false,
        }
    }

    /// Nodes that must come directly after `node`
    pub fn successors(&self, node: &T) -> Vec<&T> {
        let Some(index) = self.nodes.get_index_of(node) else {
            return Vec::new();
        };
        self.edges
            .iter()
            .filter(|(from, _)| *from == index)
            .filter_map(|&(_, to)| self.nodes.get_index(to))
            .collect()
    }

    /// Nodes that must come directly before `node`
    pub fn predecessors(&self, node: &T) -> Vec<&T> {
        let Some(index) = self.nodes.get_index_of(node) else {
            return Vec::new();
        };
        self.edges
            .iter()
            .filter(|(_, to)| *to == index)
            .filter_map(|&(from, _)| self.nodes.get_index(from))
            .collect()
    }

    fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for &(from, to) in &self.edges {
            adjacency[from].push(to);
        }
        adjacency
    }

    /// Find a cycle using depth-first search.
    ///
    /// The cycle is the part of the current search path from the revisited
    /// node back to itself, both ends included, so a self-loop on `X` yields
    /// `[X, X]`.
    #[instrument(skip_all, fields(node_count = self.nodes.len(), edge_count = self.edges.len()))]
    pub fn find_cycle(&self) -> Option<Vec<T>> {
        fn visit(
            node: usize,
            adjacency: &[Vec<usize>],
            state: &mut [VisitState],
            path: &mut Vec<usize>,
        ) -> Option<Vec<usize>> {
            state[node] = VisitState::OnPath;
            path.push(node);

            for &next in &adjacency[node] {
                match state[next] {
                    VisitState::OnPath => {
                        let start = path.iter().position(|&n| n == next)?;
                        let mut cycle = path[start..].to_vec();
                        cycle.push(next);
                        return Some(cycle);
                    }
                    VisitState::Unvisited => {
                        if let Some(cycle) = visit(next, adjacency, state, path) {
                            return Some(cycle);
                        }
                    }
                    VisitState::Done => {}
                }
            }

            path.pop();
            state[node] = VisitState::Done;
            None
        }

        let adjacency = self.adjacency();
        let mut state = vec![VisitState::Unvisited; self.nodes.len()];
        let mut path = Vec::new();

        for start in 0..self.nodes.len() {
            if state[start] != VisitState::Unvisited {
                continue;
            }
            if let Some(cycle) = visit(start, &adjacency, &mut state, &mut path) {
                debug!(length = cycle.len(), "cycle detected");
                return Some(
                    cycle
                        .into_iter()
                        .filter_map(|i| self.nodes.get_index(i).cloned())
                        .collect(),
                );
            }
        }

        None
    }

    /// Check whether the graph contains a cycle
    pub fn has_cycle(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Stable topological sort.
    ///
    /// Among the nodes whose predecessors have all been emitted, the one
    /// inserted earliest is always picked next. Nodes without any ordering
    /// relationship therefore keep their insertion order. Returns the cycle
    /// as the error if there is one.
    #[instrument(skip_all, fields(node_count = self.nodes.len()))]
    pub fn topological_sort(&self) -> Result<Vec<T>, Vec<T>> {
        if let Some(cycle) = self.find_cycle() {
            return Err(cycle);
        }

        let adjacency = self.adjacency();
        let mut in_degree = vec![0usize; self.nodes.len()];
        for &(_, to) in &self.edges {
            in_degree[to] += 1;
        }

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(index, _)| Reverse(index))
            .collect();

        let mut sorted = Vec::with_capacity(self.nodes.len());
        while let Some(Reverse(index)) = ready.pop() {
            sorted.push(index);
            for &next in &adjacency[index] {
                in_degree[next] = in_degree[next].saturating_sub(1);
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        Ok(sorted
            .into_iter()
            .filter_map(|i| self.nodes.get_index(i).cloned())
            .collect())
    }
}

impl<T: Eq + Hash + Clone> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}
