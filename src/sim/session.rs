/// GameSession: the state of one level being played.
///
/// Holds the round counters the move resolver updates, the coin total
/// fixed at load time, the level number, and the grid. The grid is
/// optional: a session without one is "unloaded" and every turn on it
/// fails with `MazeError::UnloadedGrid`.
///
/// Getters/setters exist so an outside persistence layer can read the
/// session out and write it back; nothing here serializes.

use crate::domain::cell::Cell;
use crate::domain::grid::Grid;
use crate::domain::moves::Progress;
use crate::error::MazeError;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GameSession {
    pub progress: Progress,
    total_coins: u32,
    level: u32,
    grid: Option<Grid>,
}

impl GameSession {
    /// Fresh session for `level`. The coin total is whatever is on the grid now.
    pub fn new(level: u32, grid: Grid) -> Self {
        let total_coins = u32::try_from(grid.count(Cell::Coin)).unwrap_or(u32::MAX);
        GameSession {
            progress: Progress::default(),
            total_coins,
            level,
            grid: Some(grid),
        }
    }

    /// Session with no grid yet.
    pub fn unloaded(level: u32) -> Self {
        GameSession { level, ..GameSession::default() }
    }

    pub fn level(&self) -> u32 { self.level }
    pub fn total_coins(&self) -> u32 { self.total_coins }
    pub fn key_found(&self) -> bool { self.progress.key_found }
    pub fn coins_collected(&self) -> u32 { self.progress.coins_collected }

    pub fn set_key_found(&mut self, found: bool) {
        self.progress.key_found = found;
    }

    pub fn set_coins_collected(&mut self, coins: u32) {
        self.progress.coins_collected = coins;
    }

    #[allow(dead_code)]
    pub fn set_total_coins(&mut self, coins: u32) {
        self.total_coins = coins;
    }

    #[allow(dead_code)]
    pub fn is_loaded(&self) -> bool {
        self.grid.is_some()
    }

    pub fn grid(&self) -> Result<&Grid, MazeError> {
        self.grid.as_ref().ok_or(MazeError::UnloadedGrid)
    }

    pub fn grid_mut(&mut self) -> Result<&mut Grid, MazeError> {
        self.grid.as_mut().ok_or(MazeError::UnloadedGrid)
    }

    /// Install a grid (e.g. when resuming). Returns the one it replaced.
    #[allow(dead_code)]
    pub fn set_grid(&mut self, grid: Grid) -> Option<Grid> {
        self.grid.replace(grid)
    }

    /// Split borrow for the move resolver.
    pub(crate) fn parts_mut(&mut self) -> Result<(&mut Grid, &mut Progress), MazeError> {
        match self.grid.as_mut() {
            Some(grid) => Ok((grid, &mut self.progress)),
            None => Err(MazeError::UnloadedGrid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::grid_from;

    #[test]
    fn counts_coins_at_load() {
        let s = GameSession::new(2, grid_from(&["@CC", "C E"]));
        assert_eq!(s.total_coins(), 3);
        assert_eq!(s.level(), 2);
        assert_eq!(s.coins_collected(), 0);
        assert!(!s.key_found());
    }

    #[test]
    fn unloaded_session_reports_misuse() {
        let mut s = GameSession::unloaded(1);
        assert!(!s.is_loaded());
        assert_eq!(s.grid().err(), Some(MazeError::UnloadedGrid));
        assert!(s.parts_mut().is_err());

        assert!(s.set_grid(grid_from(&["@E"])).is_none());
        assert!(s.is_loaded());
    }

    #[test]
    fn setters_round_trip() {
        let mut s = GameSession::new(1, grid_from(&["@CE"]));
        s.set_key_found(true);
        s.set_coins_collected(4);
        s.set_total_coins(9);
        assert!(s.key_found());
        assert_eq!(s.coins_collected(), 4);
        assert_eq!(s.total_coins(), 9);
    }
}
