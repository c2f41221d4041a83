use super::PathPlan;

/// Parent index of the root step
const ROOT: usize = usize::MAX;

#[derive(Debug)]
struct Step<N, C> {
    node: N,
    parent: usize, // index of the step this one was reached from
    cost: C, // accumulated cost from the start node
}

/// Arena of every frontier entry ever created
/// Each entry remembers the entry it was generated from, so a popped entry
/// always reconstructs the exact route it was pushed with, even when the same
/// node was pushed several times along different routes
#[derive(Debug)]
pub(crate) struct SearchTree<N, C> {
    steps: Vec<Step<N, C>>,
}

impl<N: Clone, C: Copy> SearchTree<N, C> {

    pub(crate) fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub(crate) fn root(&mut self, node: N, cost: C) -> usize {
        self.push(node, ROOT, cost)
    }

    pub(crate) fn extend(&mut self, parent: usize, node: N, cost: C) -> usize {
        self.push(node, parent, cost)
    }

    pub(crate) fn node(&self, step: usize) -> &N {
        &self.steps[step].node
    }

    pub(crate) fn cost(&self, step: usize) -> C {
        self.steps[step].cost
    }

    /// Construct the route from the start node to the given step
    /// Returns the ordered path as a vector of nodes from start to goal
    pub(crate) fn path(&self, step: usize) -> Vec<N> {
        let mut path = Vec::new();
        let mut current = step;

        // Trace back from goal to start
        while let Some(step) = self.steps.get(current) {
            path.push(step.node.clone());
            current = step.parent;
        }

        // The path is in reverse order, so reverse it
        path.reverse();
        path
    }

    pub(crate) fn plan(&self, step: usize, nodes_explored: usize) -> PathPlan<N, C> {
        PathPlan {
            path: Some(self.path(step)),
            cost: self.cost(step),
            nodes_explored,
        }
    }

    fn push(&mut self, node: N, parent: usize, cost: C) -> usize {
        self.steps.push(Step { node, parent, cost });
        self.steps.len() - 1
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_reconstruction() {
        let mut tree = SearchTree::new();
        let a = tree.root("A", 0);
        let b = tree.extend(a, "B", 1);
        let c = tree.extend(a, "C", 3);
        let d = tree.extend(c, "D", 4);

        // Test path from A to D: A -> C -> D
        assert_eq!(tree.path(d), vec!["A", "C", "D"]);
        // Test path from A to B: A -> B
        assert_eq!(tree.path(b), vec!["A", "B"]);
        assert_eq!(tree.path(a), vec!["A"]);
        assert_eq!(tree.cost(d), 4);
    }

    #[test]
    fn test_duplicate_nodes_keep_their_own_route() {
        let mut tree = SearchTree::new();
        let a = tree.root("A", 0);
        let b = tree.extend(a, "B", 1);
        let d_direct = tree.extend(a, "D", 9);
        let d_via_b = tree.extend(b, "D", 2);

        let plan = tree.plan(d_direct, 5);
        assert_eq!(plan.path, Some(vec!["A", "D"]));
        assert_eq!(plan.cost, 9);
        assert_eq!(plan.nodes_explored, 5);
        assert_eq!(tree.path(d_via_b), vec!["A", "B", "D"]);
    }
}
