//! Grid mazes solved with the same search core as the campus graph

use crate::engine::Strategy;
use crate::errors::SearchError;
use crate::geometry::Point;
use crate::graph_algos::{self, PathPlan, Unbounded};
use crate::heuristic::HeuristicKind;

use std::{fmt, str::FromStr};
use ordered_float::OrderedFloat;
use tracing::debug;

/// (row, col)
pub type Cell = (usize, usize);

pub type MazePlan = PathPlan<Cell, OrderedFloat<f64>>;

// down, up, right, left
const MOVES: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tile {
    Open,
    Wall,
    Start,
    Goal,
}

impl Tile {
    fn symbol(self) -> char {
        match self {
            Tile::Open => '0',
            Tile::Wall => '1',
            Tile::Start => 'S',
            Tile::Goal => 'G',
        }
    }
}


/// Rectangular maze with 4-directional unit-cost moves
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    tiles: Vec<Vec<Tile>>,
    start: Cell,
    goal: Cell,
}

impl Maze {

    /// Read a grid of S, G, 0 (open) and 1 (wall), one row per line
    /// Whitespace between cells and blank lines are ignored
    pub fn parse(text: &str) -> Result<Self, SearchError> {
        let mut tiles = Vec::new();
        let mut start = None;
        let mut goal = None;

        for line in text.lines() {
            let mut row = Vec::new();
            for symbol in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = (tiles.len(), row.len());
                let tile = match symbol {
                    '0' => Tile::Open,
                    '1' => Tile::Wall,
                    'S' => place(&mut start, cell, Tile::Start)?,
                    'G' => place(&mut goal, cell, Tile::Goal)?,
                    other => return Err(SearchError::InvalidMaze(format!("unknown cell {other:?} at {cell:?}"))),
                };
                row.push(tile);
            }
            if row.is_empty() {
                continue;
            }
            if let Some(first) = tiles.first().map(Vec::len) {
                if row.len() != first {
                    return Err(SearchError::InvalidMaze(format!(
                        "row {} has {} cells, expected {first}",
                        tiles.len(),
                        row.len()
                    )));
                }
            }
            tiles.push(row);
        }

        if tiles.is_empty() {
            return Err(SearchError::InvalidMaze("empty grid".to_string()));
        }
        let start = start.ok_or_else(|| SearchError::InvalidMaze("no start cell".to_string()))?;
        let goal = goal.ok_or_else(|| SearchError::InvalidMaze("no goal cell".to_string()))?;
        Ok(Self { tiles, start, goal })
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn cols(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn is_open(&self, (row, col): Cell) -> bool {
        self.tiles
            .get(row)
            .and_then(|tiles| tiles.get(col))
            .is_some_and(|tile| *tile != Tile::Wall)
    }

    /// Open cells one move away, in move order
    pub fn neighbors(&self, (row, col): Cell) -> impl Iterator<Item = (Cell, OrderedFloat<f64>)> + '_ {
        MOVES.iter().filter_map(move |&(dr, dc)| {
            let next = (row.checked_add_signed(dr)?, col.checked_add_signed(dc)?);
            self.is_open(next).then_some((next, OrderedFloat(1.0)))
        })
    }

    fn estimate(&self, (row, col): Cell, kind: HeuristicKind) -> OrderedFloat<f64> {
        let (goal_row, goal_col) = self.goal;
        OrderedFloat(kind.between(
            &Point::new(row as f64, col as f64),
            &Point::new(goal_row as f64, goal_col as f64),
        ))
    }

    /// Solve with one of the four strategies; the heuristic only matters for A*
    pub fn solve(&self, strategy: Strategy, heuristic: HeuristicKind) -> Result<MazePlan, SearchError> {
        let neighbors = |cell: &Cell| self.neighbors(*cell);
        let goal_fn = |cell: &Cell| *cell == self.goal;
        let interrupt = &mut Unbounded;

        let plan = match strategy {
            Strategy::Bfs => graph_algos::breadth_first(self.start, neighbors, goal_fn, interrupt)?,
            Strategy::Dfs => graph_algos::depth_first(self.start, neighbors, goal_fn, interrupt)?,
            Strategy::Ucs => graph_algos::uniform_cost(self.start, neighbors, goal_fn, interrupt)?,
            Strategy::AStar => graph_algos::a_star(
                self.start,
                neighbors,
                |cell: &Cell| self.estimate(*cell, heuristic),
                goal_fn,
                interrupt,
            )?,
        };
        debug!(%strategy, %heuristic, found = plan.is_found(), nodes_explored = plan.nodes_explored, "maze solved");
        Ok(plan)
    }

    pub fn greedy(&self, heuristic: HeuristicKind) -> Result<MazePlan, SearchError> {
        let plan = graph_algos::greedy_best_first(
            self.start,
            |cell: &Cell| self.neighbors(*cell),
            |cell: &Cell| self.estimate(*cell, heuristic),
            |cell: &Cell| *cell == self.goal,
            &mut Unbounded,
        )?;
        debug!(%heuristic, found = plan.is_found(), nodes_explored = plan.nodes_explored, "maze solved greedily");
        Ok(plan)
    }

    /// The grid with open cells on the path drawn as '*'
    pub fn render(&self, path: &[Cell]) -> String {
        let mut lines = Vec::with_capacity(self.rows());
        for (row, tiles) in self.tiles.iter().enumerate() {
            let line: String = tiles
                .iter()
                .enumerate()
                .map(|(col, tile)| match tile {
                    Tile::Open if path.contains(&(row, col)) => '*',
                    tile => tile.symbol(),
                })
                .collect();
            lines.push(line);
        }
        lines.join("\n")
    }
}

// S and G may appear once each
fn place(slot: &mut Option<Cell>, cell: Cell, tile: Tile) -> Result<Tile, SearchError> {
    match slot.replace(cell) {
        Some(previous) => Err(SearchError::InvalidMaze(format!(
            "second {} at {cell:?}, first at {previous:?}",
            tile.symbol()
        ))),
        None => Ok(tile),
    }
}

impl FromStr for Maze {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Maze::parse(s)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}
