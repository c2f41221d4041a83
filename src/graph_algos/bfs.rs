use super::{Interrupt, PathPlan, SearchTree};
use crate::collections::FxHashSet;
use crate::errors::SearchError;

use std::{collections::VecDeque, fmt::Debug, hash::Hash};
use num_traits::Zero;


/// Breadth-first search
/// https://en.wikipedia.org/wiki/Breadth-first_search
/// Nodes are marked visited when they are enqueued, so each node enters the queue
/// at most once and the first route found to any node has the fewest edges.
/// Edge costs never influence the order, they are only summed along the route.
pub fn breadth_first<N, C, IT, NN, G, I>(start: N, neighbors: NN, goal_fn: G, interrupt: &mut I) -> Result<PathPlan<N, C>, SearchError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    I: Interrupt + ?Sized,
    {

    let mut tree = SearchTree::new();
    let mut visited: FxHashSet<N> = FxHashSet::default();
    let mut queue = VecDeque::new();

    visited.insert(start.clone());
    queue.push_back(tree.root(start, Zero::zero()));

    let mut nodes_explored = 0;
    while let Some(step) = queue.pop_front() {
        interrupt.check(nodes_explored)?;
        nodes_explored += 1;

        let node = tree.node(step);
        if goal_fn(node) {
            return Ok(tree.plan(step, nodes_explored));
        }

        let cost = tree.cost(step);
        for (neighbor, edge_cost) in neighbors(node) {
            if visited.insert(neighbor.clone()) {
                queue.push_back(tree.extend(step, neighbor, cost + edge_cost));
            }
        }
    }

    Ok(PathPlan::exhausted(nodes_explored))
}
