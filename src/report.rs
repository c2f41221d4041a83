//! Turning search results into something a person or a web client can use

use crate::engine::{SearchResult, Strategy};
use crate::errors::SearchError;
use crate::graph::Location;
use crate::map::CampusMap;

use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::info;

const NO_INFO: &str = "No info available.";


/// Walking time in minutes, rounded to two decimals
pub fn walking_minutes(distance: f64, speed_mps: f64) -> f64 {
    round2(distance / speed_mps / 60.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Meters without a trailing ".0" for whole numbers
fn format_meters(distance: f64) -> String {
    let rounded = round2(distance);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        rounded.to_string()
    }
}


/// A found route, ready for display or serialization
/// Serializes to the navigation API response shape
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteReport {
    pub path: Vec<Location>,
    /// Coordinates along the path with y flipped for screen maps,
    /// locations without coordinates are skipped
    pub path_coords: Vec<[f64; 2]>,
    pub distance: f64, // meters, rounded to two decimals
    pub time: f64, // minutes
    pub nodes_explored: usize,
    pub directions: Vec<String>,
    #[serde(skip)]
    notes: Vec<Option<String>>, // aligned with path
}

impl RouteReport {

    /// None when the search found no route
    pub fn new(map: &CampusMap, result: &SearchResult) -> Option<Self> {
        let path = result.path.clone()?;

        let directions = path
            .windows(2)
            .map(|pair| {
                let (from, to) = (&pair[0], &pair[1]);
                match map.graph().edge(from, to) {
                    Some(edge) => format!("From {from}, walk {} meters to {to}.", format_meters(edge.distance)),
                    None => format!("From {from}, proceed to {to}."),
                }
            })
            .collect();

        let path_coords = path
            .iter()
            .filter_map(|location| map.coordinates().get(location))
            .map(|point| point.flipped())
            .collect();

        let notes = path
            .iter()
            .map(|location| map.info(location).map(str::to_string))
            .collect();

        Some(Self {
            path_coords,
            distance: round2(result.total_cost),
            time: walking_minutes(result.total_cost, map.settings().walking_speed_mps),
            nodes_explored: result.nodes_explored,
            directions,
            notes,
            path,
        })
    }
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<&str> = self.path.iter().map(Location::as_str).collect();
        writeln!(f, "--- Route Found! ---")?;
        writeln!(f, "Path: {}", path.join(" -> "))?;
        writeln!(f, "Total Distance: {} meters", format_meters(self.distance))?;
        writeln!(f, "Estimated Walking Time: {} minutes", self.time)?;
        writeln!(f)?;
        writeln!(f, "--- Directions ---")?;
        for (i, location) in self.path.iter().enumerate() {
            if let Some(direction) = self.directions.get(i) {
                writeln!(f, "  > {direction}")?;
            }
            if let Some(Some(note)) = self.notes.get(i) {
                writeln!(f, "    - Note about {location}: {note}")?;
            }
        }
        write!(f, "Nodes explored: {}", self.nodes_explored)
    }
}


/// Body of a navigation request, every field may be missing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub start: Option<String>,
    pub goal: Option<String>,
    pub algorithm: Option<String>,
}

/// Error body returned alongside SearchError::status_code
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&SearchError> for ErrorResponse {
    fn from(error: &SearchError) -> Self {
        Self { error: error.to_string() }
    }
}

/// Marker on the site plan
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Building {
    pub name: Location,
    pub coords: [f64; 2], // y flipped for screen maps
    pub info: String,
}


/// Validate a request, run the search and build the report
/// Rejects bad input before any search runs
pub fn navigate(map: &CampusMap, request: &NavigationRequest) -> Result<RouteReport, SearchError> {
    let start = required(&request.start, "start")?;
    let goal = required(&request.goal, "goal")?;
    let strategy: Strategy = required(&request.algorithm, "algorithm")?.parse()?;

    for name in [start, goal] {
        if !map.graph().contains(name) {
            return Err(SearchError::InvalidLocation(name.to_string()));
        }
    }

    let result = map.engine().search(start, goal, strategy)?;
    info!(%strategy, start, goal, found = result.is_found(), nodes_explored = result.nodes_explored, "navigation request");
    RouteReport::new(map, &result).ok_or_else(|| SearchError::NoPathFound {
        start: start.to_string(),
        goal: goal.to_string(),
    })
}

fn required<'r>(value: &'r Option<String>, name: &'static str) -> Result<&'r str, SearchError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SearchError::MissingParameter(name)),
    }
}

/// Every located place with its note, for drawing the site plan
pub fn buildings(map: &CampusMap) -> Vec<Building> {
    map.coordinates()
        .iter()
        .map(|(location, point)| Building {
            name: location.clone(),
            coords: point.flipped(),
            info: map.info(location).unwrap_or(NO_INFO).to_string(),
        })
        .collect()
}
