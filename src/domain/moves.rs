/// Move resolution: what happens when the player tries to step.
///
/// ## Resolution Table
///
/// Checked top to bottom; the first matching row decides.
/// ┌──────────────────────────┬──────────────────┬──────────────────────────────┐
/// │ Condition                 │ Outcome          │ Side effects                 │
/// ├──────────────────────────┼──────────────────┼──────────────────────────────┤
/// │ symbol not w/a/s/d        │ InvalidInput     │ none                         │
/// │ candidate off the grid    │ InvalidInput     │ none                         │
/// │ candidate == enemy        │ CaughtByEnemy    │ lives = 0                    │
/// │ Wall                      │ WallHit          │ lives - 1, player stays      │
/// │ Empty                     │ NoOp             │ player moves                 │
/// │ Coin                      │ CoinCollected    │ coins + 1, cell cleared, move│
/// │ Key                       │ KeyFound         │ key flag, cell cleared, move │
/// │ Portal                    │ Teleported       │ player → next portal         │
/// │ Treasure, no key          │ TreasureNoKey    │ player moves                 │
/// │ Treasure, key             │ TreasureWithKey  │ player moves                 │
/// └──────────────────────────┴──────────────────┴──────────────────────────────┘
///
/// No I/O. Only the player coordinate, one cell, the counters in
/// `Progress` and the life counter are ever touched.

use tracing::debug;

use super::cell::Cell;
use super::coord::Direction;
use super::grid::Grid;
use super::outcome::MoveOutcome;

/// Per-round counters the resolver updates.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Progress {
    pub key_found: bool,
    pub coins_collected: u32,
}

pub fn resolve(grid: &mut Grid, progress: &mut Progress, lives: &mut u32, symbol: char) -> MoveOutcome {
    let dir = match Direction::from_symbol(symbol) {
        Some(d) => d,
        None => return MoveOutcome::InvalidInput,
    };

    let candidate = match grid.player().step(dir) {
        Some(c) if grid.is_valid_coordinate(c) => c,
        _ => return MoveOutcome::InvalidInput,
    };

    if candidate == grid.enemy() {
        *lives = 0;
        return MoveOutcome::CaughtByEnemy;
    }

    // In bounds, so the lookup cannot miss.
    let Some(cell) = grid.cell(candidate) else {
        return MoveOutcome::InvalidInput;
    };

    let outcome = match cell {
        Cell::Wall => {
            *lives = lives.saturating_sub(1);
            MoveOutcome::WallHit
        }
        Cell::Empty => {
            grid.set_player(candidate);
            MoveOutcome::NoOp
        }
        Cell::Coin => {
            progress.coins_collected += 1;
            grid.set_cell(candidate, Cell::Empty);
            grid.set_player(candidate);
            MoveOutcome::CoinCollected
        }
        Cell::Key => {
            progress.key_found = true;
            grid.set_cell(candidate, Cell::Empty);
            grid.set_player(candidate);
            MoveOutcome::KeyFound
        }
        Cell::Portal => {
            let exit = grid.find_next_portal(candidate).unwrap_or(candidate);
            grid.set_player(exit);
            MoveOutcome::Teleported
        }
        Cell::Treasure => {
            grid.set_player(candidate);
            if progress.key_found {
                MoveOutcome::TreasureWithKey
            } else {
                MoveOutcome::TreasureNoKey
            }
        }
    };

    debug!(?dir, row = candidate.row, col = candidate.col, ?outcome, "resolved move");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coord::Coord;
    use crate::domain::grid::grid_from;

    fn changed_cells(before: &Grid, after: &Grid) -> usize {
        (0..before.rows())
            .flat_map(|r| (0..before.cols()).map(move |c| Coord::new(r, c)))
            .filter(|&at| before.cell(at) != after.cell(at))
            .count()
    }

    fn play(grid: &mut Grid, progress: &mut Progress, lives: &mut u32, symbol: char) -> (MoveOutcome, usize) {
        let before = grid.clone();
        let outcome = resolve(grid, progress, lives, symbol);
        (outcome, changed_cells(&before, grid))
    }

    // ── Input handling ──

    #[test]
    fn unknown_symbol_is_invalid_and_inert() {
        let mut g = grid_from(&["@ E"]);
        let before = g.clone();
        let mut p = Progress::default();
        let mut lives = 3;
        assert_eq!(resolve(&mut g, &mut p, &mut lives, 'x'), MoveOutcome::InvalidInput);
        assert_eq!(g, before);
        assert_eq!(lives, 3);
    }

    #[test]
    fn uppercase_symbols_are_accepted() {
        let mut g = grid_from(&["@ E"]);
        let mut p = Progress::default();
        let mut lives = 3;
        assert_eq!(resolve(&mut g, &mut p, &mut lives, 'D'), MoveOutcome::NoOp);
        assert_eq!(g.player(), Coord::new(0, 1));
    }

    #[test]
    fn stepping_off_any_edge_is_invalid() {
        let mut g = grid_from(&[
            "@ ",
            " E",
        ]);
        let mut p = Progress::default();
        let mut lives = 3;
        assert_eq!(resolve(&mut g, &mut p, &mut lives, 'w'), MoveOutcome::InvalidInput);
        assert_eq!(resolve(&mut g, &mut p, &mut lives, 'a'), MoveOutcome::InvalidInput);
        assert_eq!(g.player(), Coord::new(0, 0));

        let mut g = grid_from(&[
            "E ",
            " @",
        ]);
        assert_eq!(resolve(&mut g, &mut p, &mut lives, 's'), MoveOutcome::InvalidInput);
        assert_eq!(resolve(&mut g, &mut p, &mut lives, 'd'), MoveOutcome::InvalidInput);
        assert_eq!(g.player(), Coord::new(1, 1));
        assert_eq!(lives, 3);
    }

    // ── Cell dispatch ──

    #[test]
    fn walking_into_enemy_is_fatal() {
        let mut g = grid_from(&["@E"]);
        let mut p = Progress::default();
        let mut lives = 5;
        assert_eq!(resolve(&mut g, &mut p, &mut lives, 'd'), MoveOutcome::CaughtByEnemy);
        assert_eq!(lives, 0);
        assert_eq!(g.player(), Coord::new(0, 0));
    }

    #[test]
    fn wall_costs_a_life_and_blocks() {
        let mut g = grid_from(&["@#E"]);
        let mut p = Progress::default();
        let mut lives = 2;
        let (outcome, changed) = play(&mut g, &mut p, &mut lives, 'd');
        assert_eq!(outcome, MoveOutcome::WallHit);
        assert_eq!(lives, 1);
        assert_eq!(changed, 0);
        assert_eq!(g.player(), Coord::new(0, 0));
    }

    #[test]
    fn coin_is_collected_once() {
        let mut g = grid_from(&["@C E"]);
        let mut p = Progress::default();
        let mut lives = 3;
        let (outcome, changed) = play(&mut g, &mut p, &mut lives, 'd');
        assert_eq!(outcome, MoveOutcome::CoinCollected);
        assert_eq!(changed, 1);
        assert_eq!(p.coins_collected, 1);
        assert_eq!(g.cell(Coord::new(0, 1)), Some(Cell::Empty));

        // Walk away and back: the cleared cell is plain floor now.
        assert_eq!(resolve(&mut g, &mut p, &mut lives, 'a'), MoveOutcome::NoOp);
        let (outcome, changed) = play(&mut g, &mut p, &mut lives, 'd');
        assert_eq!(outcome, MoveOutcome::NoOp);
        assert_eq!(changed, 0);
        assert_eq!(p.coins_collected, 1);
    }

    #[test]
    fn key_sets_flag_and_clears_cell() {
        let mut g = grid_from(&["@& E"]);
        let mut p = Progress::default();
        let mut lives = 3;
        let (outcome, changed) = play(&mut g, &mut p, &mut lives, 'd');
        assert_eq!(outcome, MoveOutcome::KeyFound);
        assert_eq!(changed, 1);
        assert!(p.key_found);
        assert_eq!(g.player(), Coord::new(0, 1));
    }

    #[test]
    fn portal_teleports_and_stays() {
        let mut g = grid_from(&[
            "@% ",
            "   ",
            "E %",
        ]);
        let mut p = Progress::default();
        let mut lives = 3;
        let (outcome, changed) = play(&mut g, &mut p, &mut lives, 'd');
        assert_eq!(outcome, MoveOutcome::Teleported);
        assert_eq!(changed, 0);
        assert_eq!(g.player(), Coord::new(2, 2));
        assert_eq!(g.cell(Coord::new(0, 1)), Some(Cell::Portal));
    }

    #[test]
    fn treasure_needs_the_key() {
        let mut g = grid_from(&["@X E"]);
        let mut p = Progress::default();
        let mut lives = 3;
        let (outcome, changed) = play(&mut g, &mut p, &mut lives, 'd');
        assert_eq!(outcome, MoveOutcome::TreasureNoKey);
        assert_eq!(changed, 0);
        assert_eq!(g.player(), Coord::new(0, 1));
        assert_eq!(g.cell(Coord::new(0, 1)), Some(Cell::Treasure));

        let mut g = grid_from(&["@X E"]);
        let mut p = Progress { key_found: true, coins_collected: 0 };
        assert_eq!(resolve(&mut g, &mut p, &mut lives, 'd'), MoveOutcome::TreasureWithKey);
    }

    #[test]
    fn outcome_reports_movement() {
        assert!(MoveOutcome::Teleported.moved());
        assert!(!MoveOutcome::WallHit.moved());
        assert!(!MoveOutcome::CaughtByEnemy.moved());
        assert!(!MoveOutcome::InvalidInput.moved());
    }
}
