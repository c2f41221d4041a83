use num_traits::{Num, Signed, Float};
use serde::{Deserialize, Serialize};


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Chebyshev (diagonal) distance - the larger of the two axis offsets
pub fn chebyshev_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed + PartialOrd,
    {
    let dx = (x1 - x2).abs();
    let dy = (y1 - y2).abs();
    if dx > dy { dx } else { dy }
}


/// 2D Point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point mirrored on the x axis, screen maps grow y downwards
    pub fn flipped(&self) -> [f64; 2] {
        [self.x, -self.y]
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}
