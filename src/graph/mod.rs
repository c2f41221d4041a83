mod coordinates;

pub use coordinates::Coordinates;

use crate::collections::FxIndexMap;
use crate::errors::SearchError;

use std::{borrow::Borrow, fmt, ops::Deref, sync::Arc};
use rand::Rng;
use serde::Serialize;


/// Named place on a graph
/// Cheap to clone, compares and hashes like the underlying name
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Location(Arc<str>);

impl Location {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Location {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Location {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// Directed edge to a neighboring location
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub to: Location,
    pub distance: f64, // always >= 0
    pub speed_factor: f64, // > 0, carried as metadata - never affects cost
}


/// Immutable directed, weighted adjacency structure
/// Neighbor order is the order edges were added, searches rely on it
#[derive(Clone, Debug, Default)]
pub struct Graph {
    adjacency: FxIndexMap<Location, Vec<Edge>>,
}

impl Graph {

    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Outgoing edges, empty for unknown locations
    pub fn neighbors(&self, location: &str) -> &[Edge] {
        self.adjacency.get(location).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, location: &str) -> bool {
        self.adjacency.contains_key(location)
    }

    /// Canonical handle for a location name
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.adjacency.get_key_value(name).map(|(location, _)| location)
    }

    /// Case-insensitive lookup, exact matches win
    pub fn find_location(&self, name: &str) -> Option<&Location> {
        let name = name.trim();
        self.location(name).or_else(|| {
            self.adjacency
                .keys()
                .find(|location| location.eq_ignore_ascii_case(name))
        })
    }

    /// All locations in insertion order
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.adjacency.keys()
    }

    /// First listed edge between two locations
    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.neighbors(from).iter().find(|edge| edge.to.as_str() == to)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Uniformly random location, None for an empty graph
    pub fn random_location<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Location> {
        if self.adjacency.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.adjacency.len());
        self.adjacency.get_index(index).map(|(location, _)| location)
    }
}


/// Collects locations and edges, validating edge weights as they arrive
#[derive(Debug, Default)]
pub struct GraphBuilder {
    adjacency: FxIndexMap<Location, Vec<Edge>>,
}

impl GraphBuilder {

    /// Register a location without edges, no-op if already known
    pub fn add_location(&mut self, name: &str) -> &mut Self {
        if !self.adjacency.contains_key(name) {
            self.adjacency.insert(Location::new(name), Vec::new());
        }
        self
    }

    /// Add a directed edge, both ends become locations of the graph
    pub fn add_edge(&mut self, from: &str, to: &str, distance: f64, speed_factor: f64) -> Result<&mut Self, SearchError> {
        let invalid = |reason: &str| SearchError::InvalidEdge {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.to_string(),
        };
        if !distance.is_finite() || distance < 0.0 {
            return Err(invalid("distance must be finite and non-negative"));
        }
        if !speed_factor.is_finite() || speed_factor <= 0.0 {
            return Err(invalid("speed factor must be finite and positive"));
        }

        self.add_location(from);
        self.add_location(to);
        let to = self.canonical(to);
        if let Some(edges) = self.adjacency.get_mut(from) {
            edges.push(Edge { to, distance, speed_factor });
        }
        Ok(self)
    }

    /// Add edges in both directions with a speed factor of 1
    pub fn connect(&mut self, a: &str, b: &str, distance: f64) -> Result<&mut Self, SearchError> {
        self.add_edge(a, b, distance, 1.0)?;
        self.add_edge(b, a, distance, 1.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    pub fn build(self) -> Graph {
        Graph { adjacency: self.adjacency }
    }

    // Share one allocation per name
    fn canonical(&self, name: &str) -> Location {
        self.adjacency
            .get_key_value(name)
            .map(|(location, _)| location.clone())
            .unwrap_or_else(|| Location::new(name))
    }
}
