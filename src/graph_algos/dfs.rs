use super::{Interrupt, PathPlan, SearchTree};
use crate::collections::FxHashSet;
use crate::errors::SearchError;

use std::{fmt::Debug, hash::Hash};
use num_traits::Zero;


/// Depth-first search
/// https://en.wikipedia.org/wiki/Depth-first_search
/// Nodes are marked visited when popped, so a node can sit on the stack several
/// times; stale copies are discarded when popped but still count as explored.
/// Neighbors are pushed in reverse so the first listed neighbor is expanded first.
/// The goal is only tested on pop and the route found is not minimal in any sense.
pub fn depth_first<N, C, IT, NN, G, I>(start: N, neighbors: NN, goal_fn: G, interrupt: &mut I) -> Result<PathPlan<N, C>, SearchError>
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
    let mut stack = vec![tree.root(start, Zero::zero())];

    let mut nodes_explored = 0;
    while let Some(step) = stack.pop() {
        interrupt.check(nodes_explored)?;
        nodes_explored += 1;

        let node = tree.node(step);
        if !visited.insert(node.clone()) {
            continue;
        }
        if goal_fn(node) {
            return Ok(tree.plan(step, nodes_explored));
        }

        let cost = tree.cost(step);
        let successors: Vec<(N, C)> = neighbors(node).into_iter().collect();
        for (neighbor, edge_cost) in successors.into_iter().rev() {
            if !visited.contains(&neighbor) {
                stack.push(tree.extend(step, neighbor, cost + edge_cost));
            }
        }
    }

    Ok(PathPlan::exhausted(nodes_explored))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_algos::{ExpansionLimit, Unbounded};
    use crate::test_utils::{create_neighbor_fn, diamond, graph_from, names};

    #[test]
    fn test_dfs_follows_first_listed_neighbor() {
        let graph = graph_from(&[
            ("A", &[("B", 1), ("C", 1)]),
            ("B", &[("E", 1)]),
            ("C", &[("D", 1)]),
            ("E", &[]),
            ("D", &[]),
        ]);
        let plan = depth_first("A".to_string(), create_neighbor_fn(&graph), |n| n == "D", &mut Unbounded).unwrap();

        // A, B and the dead end E are explored before C
        assert_eq!(plan.path, Some(names(&["A", "C", "D"])));
        assert_eq!(plan.cost, 2);
        assert_eq!(plan.nodes_explored, 5);
    }

    #[test]
    fn test_dfs_is_not_cost_optimal() {
        let graph = diamond();
        let plan = depth_first("A".to_string(), create_neighbor_fn(&graph), |n| n == "D", &mut Unbounded).unwrap();

        // A -> C -> D costs 4, DFS goes through B first
        assert_eq!(plan.path, Some(names(&["A", "B", "D"])));
        assert_eq!(plan.cost, 6);
        assert_eq!(plan.nodes_explored, 3);
    }

    #[test]
    fn test_dfs_counts_discarded_duplicates() {
        // C is pushed twice: once from A, once from B
        let graph = graph_from(&[
            ("A", &[("B", 1), ("C", 1)]),
            ("B", &[("C", 1)]),
            ("C", &[]),
            ("Z", &[]),
        ]);
        let plan = depth_first("A".to_string(), create_neighbor_fn(&graph), |n| n == "Z", &mut Unbounded).unwrap();

        assert_eq!(plan.path, None);
        assert_eq!(plan.cost, 0);
        // A, B, C (via B), then the stale C pushed from A
        assert_eq!(plan.nodes_explored, 4);
    }

    #[test]
    fn test_dfs_with_cycle() {
        let graph = graph_from(&[
            ("A", &[("B", 1)]),
            ("B", &[("C", 1)]),
            ("C", &[("A", 1), ("D", 2)]),
            ("D", &[]),
        ]);
        let plan = depth_first("A".to_string(), create_neighbor_fn(&graph), |n| n == "D", &mut Unbounded).unwrap();

        assert_eq!(plan.path, Some(names(&["A", "B", "C", "D"])));
        assert_eq!(plan.cost, 4);
        assert_eq!(plan.nodes_explored, 4);
    }

    #[test]
    fn test_dfs_start_is_goal() {
        let graph = diamond();
        let plan = depth_first("B".to_string(), create_neighbor_fn(&graph), |n| n == "B", &mut Unbounded).unwrap();

        assert_eq!(plan.path, Some(names(&["B"])));
        assert_eq!(plan.cost, 0);
        assert_eq!(plan.nodes_explored, 1);
    }

    #[test]
    fn test_dfs_can_be_interrupted() {
        let graph = diamond();
        let result = depth_first("A".to_string(), create_neighbor_fn(&graph), |n| n == "D", &mut ExpansionLimit(1));

        assert!(matches!(result, Err(SearchError::Interrupted { nodes_explored: 1 })));
    }

    #[test]
    fn test_dfs_exhausted_before_limit_is_not_interrupted() {
        let graph = graph_from(&[
            ("A", &[("B", 1), ("C", 1)]),
            ("B", &[("C", 1)]),
            ("C", &[]),
            ("Z", &[]),
        ]);
        // four pops including the stale C
        let plan = depth_first("A".to_string(), create_neighbor_fn(&graph), |n| n == "Z", &mut ExpansionLimit(4)).unwrap();

        assert_eq!(plan.path, None);
        assert_eq!(plan.nodes_explored, 4);
    }
}
