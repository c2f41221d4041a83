//! Distance estimates between located places, used by heuristic-guided search

use crate::errors::SearchError;
use crate::geometry::{Point, chebyshev_distance, euclidean, manhattan_distance};
use crate::graph::Coordinates;

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};


/// Distance metric for heuristic estimates
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    Manhattan,
    Euclidean,
    Diagonal,
    /// Straight-line walking distance, the campus default
    #[default]
    StraightLine,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::Diagonal,
        HeuristicKind::StraightLine,
    ];

    /// Distance between two points under this metric
    pub fn between(self, a: &Point, b: &Point) -> f64 {
        match self {
            HeuristicKind::Manhattan => manhattan_distance(a.x, a.y, b.x, b.y),
            HeuristicKind::Euclidean | HeuristicKind::StraightLine => euclidean(a.x, a.y, b.x, b.y),
            HeuristicKind::Diagonal => chebyshev_distance(a.x, a.y, b.x, b.y),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Euclidean => "euclidean",
            HeuristicKind::Diagonal => "diagonal",
            HeuristicKind::StraightLine => "straight-line",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "euclidean" => Ok(HeuristicKind::Euclidean),
            "diagonal" | "chebyshev" => Ok(HeuristicKind::Diagonal),
            "straight-line" | "straightline" => Ok(HeuristicKind::StraightLine),
            _ => Err(SearchError::UnknownHeuristic(s.to_string())),
        }
    }
}


impl Coordinates {

    /// Heuristic distance between two locations
    /// Never fails: a location without coordinates estimates to 0
    pub fn estimate(&self, a: &str, b: &str, kind: HeuristicKind) -> f64 {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => kind.between(a, b),
            _ => 0.0,
        }
    }
}
