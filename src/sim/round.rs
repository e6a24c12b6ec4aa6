/// The round controller: advances a level by one player turn.
///
/// Processing order:
///   1. Precondition checks (round still running, grid loaded)
///   2. Move resolution
///   3. Win / lose check
///   4. Contact check (player landed on the enemy, e.g. via a portal)
///   5. Enemy pursuit
///   6. Catch check
///
/// An `InvalidInput` move costs nothing: the enemy does not get a turn.
/// `Won` and `Lost` are terminal; further turns are rejected.

use tracing::{debug, info};

use crate::domain::moves;
use crate::domain::outcome::MoveOutcome;
use crate::domain::pursuit;
use crate::error::MazeError;
use super::session::GameSession;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RoundState {
    InProgress,
    Won,
    Lost,
}

impl RoundState {
    pub fn is_terminal(self) -> bool {
        self != RoundState::InProgress
    }
}

/// Report for one turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Turn {
    pub outcome: MoveOutcome,
    pub state: RoundState,
    /// The enemy reached the player after the move resolved.
    pub caught: bool,
}

#[derive(Clone, Debug)]
pub struct Round {
    state: RoundState,
    steps_per_turn: usize,
    turns: u32,
}

impl Round {
    pub fn new(steps_per_turn: usize) -> Self {
        Round { state: RoundState::InProgress, steps_per_turn, turns: 0 }
    }

    pub fn state(&self) -> RoundState { self.state }
    pub fn steps_per_turn(&self) -> usize { self.steps_per_turn }
    pub fn turns(&self) -> u32 { self.turns }

    pub fn play_turn(
        &mut self,
        session: &mut GameSession,
        lives: &mut u32,
        symbol: char,
    ) -> Result<Turn, MazeError> {
        if self.state.is_terminal() {
            return Err(MazeError::RoundOver(self.state));
        }
        let level = session.level();
        let (grid, progress) = session.parts_mut()?;

        let outcome = moves::resolve(grid, progress, lives, symbol);

        if outcome == MoveOutcome::TreasureWithKey {
            return Ok(self.finish(level, outcome, RoundState::Won, false));
        }
        if *lives == 0 {
            return Ok(self.finish(level, outcome, RoundState::Lost, false));
        }
        if outcome == MoveOutcome::InvalidInput {
            return Ok(Turn { outcome, state: self.state, caught: false });
        }

        self.turns += 1;

        if grid.player() == grid.enemy() {
            return Ok(self.finish(level, outcome, RoundState::Lost, true));
        }

        let enemy = pursuit::advance_enemy(grid, self.steps_per_turn);
        grid.set_enemy(enemy);

        if enemy == grid.player() {
            return Ok(self.finish(level, outcome, RoundState::Lost, true));
        }

        debug!(turn = self.turns, ?outcome, moved = outcome.moved(), "turn complete");
        Ok(Turn { outcome, state: self.state, caught: false })
    }

    fn finish(&mut self, level: u32, outcome: MoveOutcome, state: RoundState, caught: bool) -> Turn {
        self.state = state;
        info!(level, turns = self.turns, ?outcome, ?state, caught, "round over");
        Turn { outcome, state, caught }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coord::Coord;
    use crate::domain::grid::grid_from;

    fn session(rows: &[&str]) -> GameSession {
        GameSession::new(1, grid_from(rows))
    }

    #[test]
    fn last_life_on_a_wall_loses() {
        let mut s = session(&[
            "@#  ",
            "    ",
            "   E",
        ]);
        let mut round = Round::new(1);
        let mut lives = 1;
        let turn = round.play_turn(&mut s, &mut lives, 'd').unwrap();
        assert_eq!(turn.outcome, MoveOutcome::WallHit);
        assert_eq!(turn.state, RoundState::Lost);
        assert_eq!(lives, 0);
        assert_eq!(round.state(), RoundState::Lost);
    }

    #[test]
    fn wall_with_lives_left_continues_and_enemy_moves() {
        let mut s = session(&[
            "@#  ",
            "    ",
            "   E",
        ]);
        let mut round = Round::new(1);
        let mut lives = 2;
        let turn = round.play_turn(&mut s, &mut lives, 'd').unwrap();
        assert_eq!(turn.state, RoundState::InProgress);
        assert_eq!(lives, 1);
        assert_ne!(s.grid().unwrap().enemy(), Coord::new(2, 3));
    }

    #[test]
    fn invalid_input_is_free() {
        let mut s = session(&[
            "@   ",
            "   E",
        ]);
        let before = s.clone();
        let mut round = Round::new(1);
        let mut lives = 3;
        for symbol in ['q', 'w', 'a', '?'] {
            let turn = round.play_turn(&mut s, &mut lives, symbol).unwrap();
            assert_eq!(turn.outcome, MoveOutcome::InvalidInput);
            assert_eq!(turn.state, RoundState::InProgress);
        }
        assert_eq!(s, before);
        assert_eq!(round.turns(), 0);
    }

    #[test]
    fn treasure_without_key_keeps_playing() {
        let mut s = session(&[
            "@X    ",
            "     E",
        ]);
        let mut round = Round::new(1);
        let mut lives = 3;
        let turn = round.play_turn(&mut s, &mut lives, 'd').unwrap();
        assert_eq!(turn.outcome, MoveOutcome::TreasureNoKey);
        assert_eq!(turn.state, RoundState::InProgress);
        assert!(round.play_turn(&mut s, &mut lives, 'a').is_ok());
    }

    #[test]
    fn key_then_treasure_wins() {
        let mut s = session(&[
            "@&X      ",
            "#########",
            "        E",
        ]);
        let mut round = Round::new(1);
        let mut lives = 3;
        assert_eq!(round.play_turn(&mut s, &mut lives, 'd').unwrap().outcome, MoveOutcome::KeyFound);
        let turn = round.play_turn(&mut s, &mut lives, 'd').unwrap();
        assert_eq!(turn.outcome, MoveOutcome::TreasureWithKey);
        assert_eq!(turn.state, RoundState::Won);
        assert!(s.key_found());
    }

    #[test]
    fn enemy_catches_up() {
        let mut s = session(&["@  E"]);
        let mut round = Round::new(2);
        let mut lives = 3;
        let turn = round.play_turn(&mut s, &mut lives, 'd').unwrap();
        assert_eq!(turn.outcome, MoveOutcome::NoOp);
        assert!(turn.caught);
        assert_eq!(turn.state, RoundState::Lost);
        // Being caught by pursuit does not touch the life counter.
        assert_eq!(lives, 3);
    }

    #[test]
    fn stepping_into_enemy_loses() {
        let mut s = session(&["@E  "]);
        let mut round = Round::new(1);
        let mut lives = 3;
        let turn = round.play_turn(&mut s, &mut lives, 'd').unwrap();
        assert_eq!(turn.outcome, MoveOutcome::CaughtByEnemy);
        assert_eq!(turn.state, RoundState::Lost);
        assert!(!turn.caught);
    }

    #[test]
    fn teleporting_onto_enemy_loses() {
        let mut s = session(&[
            "@%  ",
            "####",
            "  % ",
        ]);
        s.grid_mut().unwrap().set_enemy(Coord::new(2, 2));
        let mut round = Round::new(0);
        let mut lives = 3;
        let turn = round.play_turn(&mut s, &mut lives, 'd').unwrap();
        assert_eq!(turn.outcome, MoveOutcome::Teleported);
        assert!(turn.caught);
        assert_eq!(turn.state, RoundState::Lost);
    }

    #[test]
    fn terminal_rounds_reject_turns() {
        let mut s = session(&["@E"]);
        let mut round = Round::new(1);
        let mut lives = 3;
        round.play_turn(&mut s, &mut lives, 'd').unwrap();
        assert_eq!(
            round.play_turn(&mut s, &mut lives, 'a'),
            Err(MazeError::RoundOver(RoundState::Lost)),
        );
    }

    #[test]
    fn unloaded_session_is_rejected_before_mutation() {
        let mut s = GameSession::unloaded(1);
        let mut round = Round::new(1);
        let mut lives = 3;
        assert_eq!(round.play_turn(&mut s, &mut lives, 'd'), Err(MazeError::UnloadedGrid));
        assert_eq!(lives, 3);
        assert_eq!(round.state(), RoundState::InProgress);
    }
}
