pub mod a_star;
pub mod bfs;
pub mod dfs;
pub mod greedy;
pub mod uniform_cost;
mod search_tree;

pub use a_star::a_star;
pub use bfs::breadth_first;
pub use dfs::depth_first;
pub use greedy::greedy_best_first;
pub use uniform_cost::uniform_cost;

use search_tree::SearchTree;

use crate::errors::SearchError;

use std::{cmp::Ordering, time::{Duration, Instant}};
use num_traits::Zero;


/// Result of a single search
/// N: Node - space on a graph
/// C: Cost of the path
/// path is None when the frontier ran dry before the goal was reached, cost is then zero
#[derive(Clone, Debug, PartialEq)]
pub struct PathPlan<N, C> {
    pub path: Option<Vec<N>>,
    pub cost: C,
    pub nodes_explored: usize, // every pop from the frontier, discarded ones included
}

impl<N, C: Zero> PathPlan<N, C> {

    /// Frontier exhausted without reaching the goal
    pub fn exhausted(nodes_explored: usize) -> Self {
        Self {
            path: None,
            cost: Zero::zero(),
            nodes_explored,
        }
    }
}

impl<N, C> PathPlan<N, C> {

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of edges on the path
    pub fn steps(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len().saturating_sub(1))
    }
}


/// Hook polled once per popped node, before it is expanded
/// An empty frontier ends the search without polling
/// Returning true aborts the search with SearchError::Interrupted
pub trait Interrupt {
    fn should_stop(&mut self, nodes_explored: usize) -> bool;

    fn check(&mut self, nodes_explored: usize) -> Result<(), SearchError> {
        if self.should_stop(nodes_explored) {
            Err(SearchError::Interrupted { nodes_explored })
        } else {
            Ok(())
        }
    }
}

impl<F: FnMut(usize) -> bool> Interrupt for F {
    fn should_stop(&mut self, nodes_explored: usize) -> bool {
        self(nodes_explored)
    }
}

/// Never stops, searches run until success or exhaustion
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbounded;

impl Interrupt for Unbounded {
    fn should_stop(&mut self, _nodes_explored: usize) -> bool {
        false
    }
}

/// Stops once the given number of nodes has been explored
#[derive(Clone, Copy, Debug)]
pub struct ExpansionLimit(pub usize);

impl Interrupt for ExpansionLimit {
    fn should_stop(&mut self, nodes_explored: usize) -> bool {
        nodes_explored >= self.0
    }
}

/// Wall-clock deadline
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Self { at: Instant::now() + timeout }
    }
}

impl Interrupt for Deadline {
    fn should_stop(&mut self, _nodes_explored: usize) -> bool {
        Instant::now() >= self.at
    }
}


/// Priority queue entry
/// Ordered so that BinaryHeap pops the smallest priority first,
/// equal priorities leave in insertion order
#[derive(Debug)]
struct FrontierEntry<C> {
    step: usize, // index in the SearchTree
    priority: C,
    sequence: usize,
}

impl<C: Ord> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
impl<C: Ord> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<C: PartialEq> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}
impl<C: PartialEq> Eq for FrontierEntry<C> {}
