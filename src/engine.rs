//! Search engine over named locations
//!
//! Binds the generic algorithms in [`crate::graph_algos`] to a [`Graph`] and its
//! [`Coordinates`], and hands back a [`SearchResult`] with plain `f64` costs.

use crate::errors::SearchError;
use crate::graph::{Coordinates, Graph, Location};
use crate::graph_algos::{self, Interrupt, PathPlan, Unbounded};
use crate::heuristic::HeuristicKind;

use std::{fmt, str::FromStr};
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use tracing::debug;


/// Search strategy selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Ucs,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Strategy::Bfs, Strategy::Dfs, Strategy::Ucs, Strategy::AStar];

    /// Selector used at the console and API boundary
    pub fn selector(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Ucs => "UCS",
            Strategy::AStar => "A*",
        }
    }

    /// Whether the strategy guarantees the cheapest route
    pub fn is_cost_optimal(self) -> bool {
        matches!(self, Strategy::Ucs | Strategy::AStar)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selector = s.trim().to_ascii_uppercase();
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.selector() == selector)
            .ok_or_else(|| SearchError::UnknownAlgorithm(s.to_string()))
    }
}

impl Serialize for Strategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.selector())
    }
}


/// Route between two locations, or the lack of one
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    pub path: Option<Vec<Location>>, // start to goal inclusive, None when no route exists
    pub total_cost: f64, // summed edge distances, 0 without a path
    pub nodes_explored: usize,
}

impl SearchResult {

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of edges on the path
    pub fn edge_count(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len().saturating_sub(1))
    }
}

impl From<PathPlan<Location, OrderedFloat<f64>>> for SearchResult {
    fn from(plan: PathPlan<Location, OrderedFloat<f64>>) -> Self {
        Self {
            path: plan.path,
            total_cost: plan.cost.into_inner(),
            nodes_explored: plan.nodes_explored,
        }
    }
}


/// Runs searches against a graph; cheap to create per request
/// Graph and coordinates are only read, so one pair can serve many engines at once
#[derive(Clone, Copy, Debug)]
pub struct SearchEngine<'a> {
    graph: &'a Graph,
    coordinates: &'a Coordinates,
    heuristic: HeuristicKind,
}

impl<'a> SearchEngine<'a> {

    pub fn new(graph: &'a Graph, coordinates: &'a Coordinates) -> Self {
        Self {
            graph,
            coordinates,
            heuristic: HeuristicKind::default(),
        }
    }

    /// Heuristic used by A* and greedy best-first
    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn heuristic(&self) -> HeuristicKind {
        self.heuristic
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// Run a strategy to completion
    pub fn search(&self, start: &str, goal: &str, strategy: Strategy) -> Result<SearchResult, SearchError> {
        self.search_with(start, goal, strategy, &mut Unbounded)
    }

    /// Run a strategy, polling the interrupt once per expansion
    pub fn search_with<I>(&self, start: &str, goal: &str, strategy: Strategy, interrupt: &mut I) -> Result<SearchResult, SearchError>
    where
        I: Interrupt + ?Sized,
    {
        let (start, goal) = self.endpoints(start, goal)?;
        debug!(%strategy, %start, %goal, heuristic = %self.heuristic, "starting search");

        let neighbors = |node: &Location| {
            self.graph
                .neighbors(node)
                .iter()
                .map(|edge| (edge.to.clone(), OrderedFloat(edge.distance)))
        };
        let goal_fn = |node: &Location| node == goal;

        let plan = match strategy {
            Strategy::Bfs => graph_algos::breadth_first(start.clone(), neighbors, goal_fn, interrupt),
            Strategy::Dfs => graph_algos::depth_first(start.clone(), neighbors, goal_fn, interrupt),
            Strategy::Ucs => graph_algos::uniform_cost(start.clone(), neighbors, goal_fn, interrupt),
            Strategy::AStar => graph_algos::a_star(start.clone(), neighbors, self.heuristic_to(goal), goal_fn, interrupt),
        };
        self.finish(strategy.selector(), plan)
    }

    /// Greedy best-first search, ordered by the heuristic alone
    pub fn greedy_best_first(&self, start: &str, goal: &str) -> Result<SearchResult, SearchError> {
        let (start, goal) = self.endpoints(start, goal)?;
        debug!(%start, %goal, heuristic = %self.heuristic, "starting greedy search");

        let neighbors = |node: &Location| {
            self.graph
                .neighbors(node)
                .iter()
                .map(|edge| (edge.to.clone(), OrderedFloat(edge.distance)))
        };
        let plan = graph_algos::greedy_best_first(
            start.clone(),
            neighbors,
            self.heuristic_to(goal),
            |node: &Location| node == goal,
            &mut Unbounded,
        );
        self.finish("greedy", plan)
    }

    // Start and goal must both be locations of the graph
    fn endpoints(&self, start: &str, goal: &str) -> Result<(&'a Location, &'a Location), SearchError> {
        let start = self.graph
            .location(start)
            .ok_or_else(|| SearchError::InvalidLocation(start.to_string()))?;
        let goal = self.graph
            .location(goal)
            .ok_or_else(|| SearchError::InvalidLocation(goal.to_string()))?;
        Ok((start, goal))
    }

    fn heuristic_to(&self, goal: &'a Location) -> impl Fn(&Location) -> OrderedFloat<f64> + 'a {
        let coordinates = self.coordinates;
        let kind = self.heuristic;
        move |node: &Location| OrderedFloat(coordinates.estimate(node, goal, kind))
    }

    fn finish(&self, algorithm: &str, plan: Result<PathPlan<Location, OrderedFloat<f64>>, SearchError>) -> Result<SearchResult, SearchError> {
        let result = SearchResult::from(plan?);
        debug!(
            algorithm,
            found = result.is_found(),
            total_cost = result.total_cost,
            nodes_explored = result.nodes_explored,
            "search finished"
        );
        Ok(result)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::graph_algos::ExpansionLimit;
    use crate::test_utils::campus;
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn route(result: &SearchResult) -> Vec<&str> {
        result.path.as_ref().map(|p| p.iter().map(|l| l.as_str()).collect()).unwrap_or_default()
    }

    fn diamond() -> (Graph, Coordinates) {
        let mut builder = Graph::builder();
        builder.add_edge("A", "B", 1.0, 1.0).unwrap();
        builder.add_edge("A", "C", 3.0, 1.0).unwrap();
        builder.add_edge("B", "D", 5.0, 1.0).unwrap();
        builder.add_edge("C", "D", 1.0, 1.0).unwrap();
        builder.add_location("Island");
        (builder.build(), Coordinates::new())
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!("BFS".parse::<Strategy>().unwrap(), Strategy::Bfs);
        assert_eq!(" dfs ".parse::<Strategy>().unwrap(), Strategy::Dfs);
        assert_eq!("ucs".parse::<Strategy>().unwrap(), Strategy::Ucs);
        assert_eq!("A*".parse::<Strategy>().unwrap(), Strategy::AStar);
        assert!(matches!("IDA*".parse::<Strategy>(), Err(SearchError::UnknownAlgorithm(_))));
        assert!(matches!("".parse::<Strategy>(), Err(SearchError::UnknownAlgorithm(_))));
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!(serde_json::to_string(&Strategy::AStar).unwrap(), "\"A*\"");
    }

    #[test]
    fn test_unknown_endpoints_fail_fast() {
        let (graph, coordinates) = diamond();
        let engine = SearchEngine::new(&graph, &coordinates);
        for strategy in Strategy::ALL {
            assert!(matches!(
                engine.search("Nowhere", "D", strategy),
                Err(SearchError::InvalidLocation(name)) if name == "Nowhere"
            ));
            assert!(matches!(
                engine.search("A", "Nowhere", strategy),
                Err(SearchError::InvalidLocation(name)) if name == "Nowhere"
            ));
        }
    }

    #[test]
    fn test_no_route_for_every_strategy() {
        let (graph, coordinates) = diamond();
        let engine = SearchEngine::new(&graph, &coordinates);
        for strategy in Strategy::ALL {
            let result = engine.search("A", "Island", strategy).unwrap();
            assert_eq!(result.path, None);
            assert_eq!(result.total_cost, 0.0);
            assert!(result.nodes_explored >= 4);
        }
    }

    #[test]
    fn test_start_is_goal_for_every_strategy() {
        let (graph, coordinates) = diamond();
        let engine = SearchEngine::new(&graph, &coordinates);
        for strategy in Strategy::ALL {
            let result = engine.search("B", "B", strategy).unwrap();
            assert_eq!(route(&result), vec!["B"]);
            assert_eq!(result.total_cost, 0.0);
            assert_eq!(result.nodes_explored, 1);
        }
        let result = engine.greedy_best_first("B", "B").unwrap();
        assert_eq!(route(&result), vec!["B"]);
    }

    #[test]
    fn test_campus_cheapest_route() {
        let map = campus();
        let engine = map.engine();
        let expected = vec![
            "Entry Gate",
            "Security Gate",
            "Flag Post",
            "Academic Block 1 Entrance",
            "Cafeteria",
            "Academic Block 2",
            "Food Court",
            "Cricket Ground",
        ];
        for strategy in [Strategy::Ucs, Strategy::AStar] {
            let result = engine.search("Entry Gate", "Cricket Ground", strategy).unwrap();
            assert_eq!(route(&result), expected);
            assert_approx_eq!(result.total_cost, 180.0 + 50.0 + 210.0 + 10.0 + 50.0 + 240.0 + 40.0);
        }
    }

    #[test]
    fn test_campus_a_star_explores_less() {
        let map = campus();
        let engine = map.engine();
        let ucs = engine.search("Entry Gate", "Cricket Ground", Strategy::Ucs).unwrap();
        let a_star = engine.search("Entry Gate", "Cricket Ground", Strategy::AStar).unwrap();
        assert_eq!(ucs.nodes_explored, 17);
        assert_eq!(a_star.nodes_explored, 10);
    }

    #[test]
    fn test_campus_uninformed_routes() {
        let map = campus();
        let engine = map.engine();

        let bfs = engine.search("Entry Gate", "Cricket Ground", Strategy::Bfs).unwrap();
        assert_eq!(
            route(&bfs),
            vec!["Entry Gate", "Security Gate", "Exit Gate", "Hostel Building 1", "Food Court", "Cricket Ground"]
        );
        assert_eq!(bfs.total_cost, 920.0);
        assert_eq!(bfs.nodes_explored, 16);

        let dfs = engine.search("Entry Gate", "Cricket Ground", Strategy::Dfs).unwrap();
        assert_eq!(dfs.total_cost, 1330.0);
        assert_eq!(dfs.nodes_explored, 20);

        // neither is cheapest
        let ucs = engine.search("Entry Gate", "Cricket Ground", Strategy::Ucs).unwrap();
        assert!(dfs.total_cost > ucs.total_cost);
        assert!(bfs.total_cost > ucs.total_cost);
        // but BFS uses the fewest edges
        assert!(bfs.edge_count() < ucs.edge_count());
    }

    #[test]
    fn test_searches_are_deterministic() {
        let map = campus();
        let engine = map.engine();
        for strategy in Strategy::ALL {
            let first = engine.search("Exit Gate", "Finance Dept", strategy).unwrap();
            let second = engine.search("Exit Gate", "Finance Dept", strategy).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_speed_factor_does_not_change_cost() {
        let mut slow = Graph::builder();
        slow.add_edge("A", "B", 10.0, 0.25).unwrap();
        let slow = slow.build();
        let coordinates = Coordinates::new();
        let result = SearchEngine::new(&slow, &coordinates).search("A", "B", Strategy::Ucs).unwrap();
        assert_eq!(result.total_cost, 10.0);
    }

    #[test]
    fn test_search_can_be_interrupted() {
        let map = campus();
        let engine = map.engine();
        let result = engine.search_with("Entry Gate", "Cricket Ground", Strategy::Ucs, &mut ExpansionLimit(5));
        assert!(matches!(result, Err(SearchError::Interrupted { nodes_explored: 5 })));

        let mut polls = 0;
        let result = engine.search_with("Entry Gate", "Cricket Ground", Strategy::Bfs, &mut |_: usize| {
            polls += 1;
            false
        });
        assert!(result.unwrap().is_found());
        // one poll before every pop
        assert_eq!(polls, 16);
    }

    #[test]
    fn test_greedy_is_not_cost_optimal() {
        // the detour through C looks closer to D
        let mut builder = Graph::builder();
        builder.add_edge("A", "B", 1.0, 1.0).unwrap();
        builder.add_edge("A", "C", 1.0, 1.0).unwrap();
        builder.add_edge("B", "D", 1.0, 1.0).unwrap();
        builder.add_edge("C", "D", 10.0, 1.0).unwrap();
        let graph = builder.build();
        let coordinates: Coordinates = [
            ("A", Point::new(0.0, 0.0)),
            ("B", Point::new(0.0, 2.0)),
            ("C", Point::new(1.5, 0.0)),
            ("D", Point::new(2.0, 0.0)),
        ]
        .into_iter()
        .collect();
        let engine = SearchEngine::new(&graph, &coordinates).with_heuristic(HeuristicKind::Euclidean);

        let greedy = engine.greedy_best_first("A", "D").unwrap();
        assert_eq!(route(&greedy), vec!["A", "C", "D"]);
        assert_eq!(greedy.total_cost, 11.0);

        let ucs = engine.search("A", "D", Strategy::Ucs).unwrap();
        assert_eq!(ucs.total_cost, 2.0);
    }

    /// Random planar graph whose edges are never shorter than the straight line
    /// between their ends, so the straight-line heuristic stays admissible
    fn random_graph(rng: &mut StdRng, size: usize) -> (Graph, Coordinates) {
        let names: Vec<String> = (0..size).map(|i| format!("n{i}")).collect();
        let coordinates: Coordinates = names
            .iter()
            .map(|name| (name.as_str(), Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0))))
            .collect();

        let mut builder = Graph::builder();
        for name in &names {
            builder.add_location(name);
        }
        for from in &names {
            for to in &names {
                if from != to && rng.random_bool(0.15) {
                    let straight = coordinates.estimate(from, to, HeuristicKind::StraightLine);
                    let detour = rng.random_range(1.0..1.5);
                    builder.add_edge(from, to, (straight * detour).round() + 1.0, 1.0).unwrap();
                }
            }
        }
        (builder.build(), coordinates)
    }

    #[test]
    fn test_random_graphs_ucs_and_a_star_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..25 {
            let (graph, coordinates) = random_graph(&mut rng, 12);
            let engine = SearchEngine::new(&graph, &coordinates);
            for goal in 1..12 {
                let goal = format!("n{goal}");
                let ucs = engine.search("n0", &goal, Strategy::Ucs).unwrap();
                let a_star = engine.search("n0", &goal, Strategy::AStar).unwrap();
                assert_eq!(ucs.is_found(), a_star.is_found());
                assert_approx_eq!(ucs.total_cost, a_star.total_cost, 1e-6);
            }
        }
    }

    #[test]
    fn test_random_graphs_bfs_uses_fewest_edges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..25 {
            let (graph, coordinates) = random_graph(&mut rng, 12);

            // unit weights turn cheapest routes into fewest-edge routes
            let mut unit = Graph::builder();
            for from in graph.locations() {
                unit.add_location(from);
                for edge in graph.neighbors(from) {
                    unit.add_edge(from, &edge.to, 1.0, edge.speed_factor).unwrap();
                }
            }
            let unit = unit.build();

            let engine = SearchEngine::new(&graph, &coordinates);
            let reference = SearchEngine::new(&unit, &coordinates);
            for goal in 1..12 {
                let goal = format!("n{goal}");
                let bfs = engine.search("n0", &goal, Strategy::Bfs).unwrap();
                let fewest = reference.search("n0", &goal, Strategy::Ucs).unwrap();
                assert_eq!(bfs.edge_count(), fewest.path.as_ref().map(|_| fewest.total_cost as usize));
            }
        }
    }
}
