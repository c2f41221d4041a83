use super::{FrontierEntry, Interrupt, PathPlan, SearchTree};
use crate::collections::FxIndexMap;
use crate::errors::SearchError;

use std::{collections::BinaryHeap, fmt::Debug, hash::Hash};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};


/// Uniform-cost search (Dijkstra's algorithm stopped at the goal)
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, always expand the cheapest known route until a node meets goal criteria.
/// Edge costs must be non-negative for the first popped goal to be the cheapest route.
pub fn uniform_cost<N, C, IT, NN, G, I>(start: N, neighbors: NN, goal_fn: G, interrupt: &mut I) -> Result<PathPlan<N, C>, SearchError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    I: Interrupt + ?Sized,
    {
    relaxing_search(start, neighbors, |_, cost| cost, goal_fn, interrupt)
}


/// Best-first search with relaxation, shared by uniform-cost and A*
/// priority_fn maps (node, cost so far) to the frontier key
///
/// A neighbor is pushed whenever it is reached strictly cheaper than before.
/// Older, costlier entries for the same node stay in the frontier and are
/// expanded again when popped - there is no closed set.
pub(crate) fn relaxing_search<N, C, IT, NN, P, G, I>(start: N, neighbors: NN, priority_fn: P, goal_fn: G, interrupt: &mut I) -> Result<PathPlan<N, C>, SearchError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    P: Fn(&N, C) -> C,
    G: Fn(&N) -> bool,
    I: Interrupt + ?Sized,
    {

    // Nodes to visit - binary heap pops the smallest priority first
    let mut frontier: BinaryHeap<FrontierEntry<C>> = BinaryHeap::new();
    let mut sequence = 0;

    // Best known cost to reach each node
    let mut best_costs: FxIndexMap<N, C> = FxIndexMap::default();
    best_costs.insert(start.clone(), Zero::zero());

    let mut tree = SearchTree::new();
    let priority = priority_fn(&start, Zero::zero());
    frontier.push(FrontierEntry {
        step: tree.root(start, Zero::zero()),
        priority,
        sequence,
    });

    let mut nodes_explored = 0;
    while let Some(FrontierEntry { step, .. }) = frontier.pop() {
        interrupt.check(nodes_explored)?;
        nodes_explored += 1;

        let node = tree.node(step);
        let cost = tree.cost(step);

        // Check if we've reached the goal
        if goal_fn(node) {
            return Ok(tree.plan(step, nodes_explored));
        }

        for (neighbor, edge_cost) in neighbors(node) {

            // new cost to reach this node = edge cost + node cost
            let new_cost = cost + edge_cost;

            match best_costs.entry(neighbor.clone()) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    e.insert(new_cost);
                }
                Occupied(mut e) => {
                    if *e.get() > new_cost {
                        // We've found a better path to this neighbor
                        e.insert(new_cost);
                    } else {
                        // The existing path is at least as good, do nothing
                        continue;
                    }
                }
            }

            // Only add to the queue if we've found a better path
            sequence += 1;
            let priority = priority_fn(&neighbor, new_cost);
            frontier.push(FrontierEntry {
                step: tree.extend(step, neighbor, new_cost),
                priority,
                sequence,
            });
        }
    }

    Ok(PathPlan::exhausted(nodes_explored))
}
