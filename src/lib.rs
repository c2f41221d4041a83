#![warn(missing_debug_implementations)]

mod collections;
pub mod engine;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod heuristic;
pub mod map;
pub mod maze;
pub mod report;
pub mod verbosity;

#[cfg(test)]
mod test_utils;

pub use engine::{SearchEngine, SearchResult, Strategy};
pub use errors::SearchError;
pub use graph::{Coordinates, Edge, Graph, GraphBuilder, Location};
pub use heuristic::HeuristicKind;
pub use map::{CampusMap, Settings};
pub use maze::Maze;
pub use verbosity::Verbosity;
