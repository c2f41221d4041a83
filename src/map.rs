//! Map files: graph, coordinates, notes and settings in one TOML document

use crate::collections::{FxIndexMap, FxIndexSet};
use crate::engine::SearchEngine;
use crate::errors::SearchError;
use crate::geometry::Point;
use crate::graph::{Coordinates, Graph, Location};
use crate::heuristic::HeuristicKind;

use std::{fs, path::Path};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The campus map shipped with the crate
const CAMPUS_MAP: &str = include_str!("../data/campus.toml");

/// Average walking speed, about 5 km/h
pub const DEFAULT_WALKING_SPEED_MPS: f64 = 1.4;


/// Tunables carried in the [settings] table of a map file
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub walking_speed_mps: f64,
    pub heuristic: HeuristicKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            walking_speed_mps: DEFAULT_WALKING_SPEED_MPS,
            heuristic: HeuristicKind::default(),
        }
    }
}


#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MapFile {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    locations: Vec<LocationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocationEntry {
    name: String,
    coords: Option<[f64; 2]>,
    info: Option<String>,
    #[serde(default)]
    edges: Vec<EdgeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeEntry {
    to: String,
    distance: f64,
    #[serde(default = "default_speed_factor")]
    speed_factor: f64,
}

fn default_speed_factor() -> f64 {
    1.0
}


/// A loaded map, built once and shared read-only by every search
#[derive(Clone, Debug)]
pub struct CampusMap {
    graph: Graph,
    coordinates: Coordinates,
    info: FxIndexMap<Location, String>,
    settings: Settings,
}

impl CampusMap {

    /// The campus map shipped with the crate
    pub fn campus() -> Result<Self, SearchError> {
        Self::from_toml_str(CAMPUS_MAP)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SearchError> {
        let file: MapFile = toml::from_str(text)?;
        Self::from_file(file)
    }

    fn from_file(file: MapFile) -> Result<Self, SearchError> {
        let settings = file.settings;
        if !settings.walking_speed_mps.is_finite() || settings.walking_speed_mps <= 0.0 {
            return Err(SearchError::InvalidMap(format!(
                "walking speed must be positive, got {}",
                settings.walking_speed_mps
            )));
        }

        // Declare every location first so the graph keeps the file order
        let mut declared: FxIndexSet<&str> = FxIndexSet::default();
        let mut builder = Graph::builder();
        for entry in &file.locations {
            if !declared.insert(entry.name.as_str()) {
                return Err(SearchError::InvalidMap(format!("duplicate location: {}", entry.name)));
            }
            builder.add_location(&entry.name);
        }

        for entry in &file.locations {
            for edge in &entry.edges {
                if !declared.contains(edge.to.as_str()) {
                    return Err(SearchError::InvalidMap(format!(
                        "edge from {} to undeclared location {}",
                        entry.name, edge.to
                    )));
                }
                builder.add_edge(&entry.name, &edge.to, edge.distance, edge.speed_factor)?;
            }
        }
        let graph = builder.build();

        let mut coordinates = Coordinates::new();
        let mut info = FxIndexMap::default();
        for entry in file.locations {
            let Some(location) = graph.location(&entry.name).cloned() else {
                continue;
            };
            if let Some(coords) = entry.coords {
                if !coords.iter().all(|c| c.is_finite()) {
                    return Err(SearchError::InvalidMap(format!(
                        "coordinates of {} must be finite, got {coords:?}",
                        entry.name
                    )));
                }
                coordinates.insert(location.clone(), Point::from(coords));
            }
            if let Some(text) = entry.info {
                info.insert(location, text);
            }
        }

        info!(
            locations = graph.len(),
            edges = graph.edge_count(),
            located = coordinates.len(),
            "loaded map"
        );
        Ok(Self { graph, coordinates, info, settings })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Free-text note about a location
    pub fn info(&self, location: &str) -> Option<&str> {
        self.info.get(location).map(String::as_str)
    }

    /// Search engine over this map using the configured heuristic
    pub fn engine(&self) -> SearchEngine<'_> {
        SearchEngine::new(&self.graph, &self.coordinates).with_heuristic(self.settings.heuristic)
    }
}
