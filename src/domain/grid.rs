/// Grid: the cell arena plus the out-of-band entity coordinates.
///
/// Cells are stored row-major in a flat `Vec` and addressed by
/// `row * cols + col`. The player and the enemy are not cells; their
/// coordinates live beside the arena so that pursuit can tell an empty
/// cell from an occupied one without a special symbol.
///
/// Invariants (checked by `Grid::new`):
///   - at least one row and one column
///   - player and enemy in bounds and not on a `Wall`
///
/// `set_player` / `set_enemy` do not re-check; callers validate first.

use std::fmt;

use super::cell::{Cell, SYM_ENEMY, SYM_PLAYER};
use super::coord::Coord;
use crate::error::MazeError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
    /// Portal cells in row-major discovery order. Fixed at construction.
    portals: Vec<Coord>,
    player: Coord,
    enemy: Coord,
}

// ── Construction ──

impl Grid {
    pub fn new(
        rows: usize,
        cols: usize,
        cells: Vec<Cell>,
        player: Coord,
        enemy: Coord,
    ) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::EmptyGrid);
        }
        let expected = rows.checked_mul(cols)
            .ok_or(MazeError::CellCount { expected: usize::MAX, actual: cells.len() })?;
        if cells.len() != expected {
            return Err(MazeError::CellCount { expected, actual: cells.len() });
        }

        let portals = cells.iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Portal)
            .map(|(i, _)| Coord::new(i / cols, i % cols))
            .collect();

        let grid = Grid { cells, rows, cols, portals, player, enemy };
        grid.check_entity("player", player)?;
        grid.check_entity("enemy", enemy)?;
        Ok(grid)
    }

    fn check_entity(&self, who: &'static str, at: Coord) -> Result<(), MazeError> {
        match self.cell(at) {
            None => Err(MazeError::EntityOutOfBounds { who, at }),
            Some(Cell::Wall) => Err(MazeError::EntityOnWall { who, at }),
            Some(_) => Ok(()),
        }
    }
}

// ── Cell query / mutation API ──

impl Grid {
    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    #[inline]
    pub fn is_valid_coordinate(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    /// Arena index for an in-bounds coordinate.
    #[inline]
    pub fn index_of(&self, at: Coord) -> Option<usize> {
        self.is_valid_coordinate(at).then(|| at.row * self.cols + at.col)
    }

    #[inline]
    pub fn cell(&self, at: Coord) -> Option<Cell> {
        self.index_of(at).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Returns false (and changes nothing) when out of bounds.
    #[inline]
    pub fn set_cell(&mut self, at: Coord, cell: Cell) -> bool {
        match self.index_of(at) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }
}

// ── Entities ──

impl Grid {
    pub fn player(&self) -> Coord { self.player }
    pub fn enemy(&self) -> Coord { self.enemy }

    pub fn set_player(&mut self, at: Coord) {
        self.player = at;
    }

    pub fn set_enemy(&mut self, at: Coord) {
        self.enemy = at;
    }
}

// ── Portals ──

impl Grid {
    pub fn portals(&self) -> &[Coord] {
        &self.portals
    }

    /// The portal after `current` in discovery order, wrapping last → first.
    /// `None` if `current` is not a portal.
    pub fn find_next_portal(&self, current: Coord) -> Option<Coord> {
        let idx = self.portals.iter().position(|p| *p == current)?;
        Some(self.portals[(idx + 1) % self.portals.len()])
    }
}

// ── Text view ──

impl fmt::Display for Grid {
    /// One line per row in map symbols, with `@` and `E` drawn over their cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                let at = Coord::new(row, col);
                let ch = if at == self.player {
                    SYM_PLAYER
                } else if at == self.enemy {
                    SYM_ENEMY
                } else {
                    self.cells[row * self.cols + col].symbol()
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Test fixture: build a grid from a diagram in map symbols.
/// Every row must contain one `@` and one `E` in total.
#[cfg(test)]
pub fn grid_from(rows: &[&str]) -> Grid {
    let height = rows.len();
    let width = rows[0].chars().count();
    let mut cells = Vec::with_capacity(width * height);
    let mut player = Coord::default();
    let mut enemy = Coord::default();
    for (r, line) in rows.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            match ch {
                SYM_PLAYER => {
                    player = Coord::new(r, c);
                    cells.push(Cell::Empty);
                }
                SYM_ENEMY => {
                    enemy = Coord::new(r, c);
                    cells.push(Cell::Empty);
                }
                other => cells.push(Cell::from_symbol(other).unwrap_or(Cell::Empty)),
            }
        }
    }
    Grid::new(height, width, cells, player, enemy).expect("fixture grid")
}
