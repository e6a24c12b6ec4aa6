/// Error types shared by the core and its loaders.

use thiserror::Error;

use crate::domain::coord::Coord;
use crate::sim::round::RoundState;

/// Misuse of the core or an invalid grid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("no grid is loaded for this session")]
    UnloadedGrid,
    #[error("round is already over ({0:?})")]
    RoundOver(RoundState),
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("grid expects {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },
    #[error("{who} at ({}, {}) is outside the grid", at.row, at.col)]
    EntityOutOfBounds { who: &'static str, at: Coord },
    #[error("{who} at ({}, {}) stands on a wall", at.row, at.col)]
    EntityOnWall { who: &'static str, at: Coord },
}

/// Failure to turn map text into a grid.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("map header must be `<rows> <cols> <portals>`: {0}")]
    BadHeader(String),
    #[error("row {row} has {actual} symbols, expected {expected}")]
    RowWidth { row: usize, expected: usize, actual: usize },
    #[error("map has {actual} rows, expected {expected}")]
    RowCount { expected: usize, actual: usize },
    #[error("unknown symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("map has no {0}")]
    Missing(&'static str),
    #[error("map has more than one {0}")]
    Duplicate(&'static str),
    #[error("header declares {declared} portals, map has {found}")]
    PortalCount { declared: usize, found: usize },
    #[error("no map available for level {0}")]
    NoMap(u32),
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Grid(#[from] MazeError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("{count} lives cost {cost} coins, only {available} available")]
    NotEnoughCoins { count: u32, cost: u32, available: u32 },
}
