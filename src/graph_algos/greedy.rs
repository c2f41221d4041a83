use super::{FrontierEntry, Interrupt, PathPlan, SearchTree};
use crate::collections::FxHashSet;
use crate::errors::SearchError;

use std::{collections::BinaryHeap, fmt::Debug, hash::Hash};
use num_traits::Zero;


/// Greedy best-first search
/// Expands whichever frontier node looks closest to the goal by heuristic alone.
/// Nodes are marked seen when pushed and never reopened, so the route is neither
/// shortest nor cheapest in general. Costs are still summed along the route.
pub fn greedy_best_first<N, C, H, IT, NN, G, I>(start: N, neighbors: NN, heuristic_fn: H, goal_fn: G, interrupt: &mut I) -> Result<PathPlan<N, C>, SearchError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    H: Fn(&N) -> C, // heuristic function
    G: Fn(&N) -> bool, // node qualifier for goal
    I: Interrupt + ?Sized,
    {

    let mut tree = SearchTree::new();
    let mut seen: FxHashSet<N> = FxHashSet::default();
    let mut frontier: BinaryHeap<FrontierEntry<C>> = BinaryHeap::new();
    let mut sequence = 0;

    seen.insert(start.clone());
    frontier.push(FrontierEntry {
        step: tree.root(start, Zero::zero()),
        priority: Zero::zero(),
        sequence,
    });

    let mut nodes_explored = 0;
    while let Some(FrontierEntry { step, .. }) = frontier.pop() {
        interrupt.check(nodes_explored)?;
        nodes_explored += 1;

        let node = tree.node(step);
        if goal_fn(node) {
            return Ok(tree.plan(step, nodes_explored));
        }

        let cost = tree.cost(step);
        for (neighbor, edge_cost) in neighbors(node) {
            if !seen.insert(neighbor.clone()) {
                continue;
            }
            sequence += 1;
            let priority = heuristic_fn(&neighbor);
            frontier.push(FrontierEntry {
                step: tree.extend(step, neighbor, cost + edge_cost),
                priority,
                sequence,
            });
        }
    }

    Ok(PathPlan::exhausted(nodes_explored))
}
