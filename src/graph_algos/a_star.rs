use super::{Interrupt, PathPlan};
use super::uniform_cost::relaxing_search;
use crate::errors::SearchError;

use std::{fmt::Debug, hash::Hash};
use num_traits::Zero;


/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// From start Node, traverse through graph until node meets goal criteria,
/// expanding by cost so far + heuristic estimate to the goal.
/// The cost of the returned plan is the real cost, the heuristic only orders the frontier.
/// The route is cheapest only when the heuristic is admissible (never overestimates
/// the true cost to reach the goal); that is up to the caller.
pub fn a_star<N, C, IT, NN, H, G, I>(start: N, neighbors: NN, heuristic_fn: H, goal_fn: G, interrupt: &mut I) -> Result<PathPlan<N, C>, SearchError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    H: Fn(&N) -> C, // heuristic function
    G: Fn(&N) -> bool, // node qualifier for goal
    I: Interrupt + ?Sized,
    {
    relaxing_search(start, neighbors, |node, cost| cost + heuristic_fn(node), goal_fn, interrupt)
}
