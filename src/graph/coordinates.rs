use super::Location;
use crate::collections::FxIndexMap;
use crate::geometry::Point;


/// Planar positions of locations, only consulted for heuristic estimates
/// A location may be missing, estimates involving it are 0
#[derive(Clone, Debug, Default)]
pub struct Coordinates {
    points: FxIndexMap<Location, Point>,
}

impl Coordinates {

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position of a location, replacing any earlier one
    pub fn insert(&mut self, location: Location, point: Point) -> Option<Point> {
        self.points.insert(location, point)
    }

    pub fn get(&self, location: &str) -> Option<&Point> {
        self.points.get(location)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.points.contains_key(location)
    }

    /// Positions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Location, &Point)> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, Point)> for Coordinates {
    fn from_iter<I: IntoIterator<Item = (&'a str, Point)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(|(name, point)| (Location::new(name), point)).collect(),
        }
    }
}
