/// Result of resolving one player move.
/// The presentation layer consumes these for status messages.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    NoOp,
    InvalidInput,
    WallHit,
    CoinCollected,
    KeyFound,
    Teleported,
    TreasureNoKey,
    TreasureWithKey,
    CaughtByEnemy,
}

impl MoveOutcome {
    /// Did the player's coordinate change?
    pub fn moved(self) -> bool {
        matches!(
            self,
            MoveOutcome::NoOp
                | MoveOutcome::CoinCollected
                | MoveOutcome::KeyFound
                | MoveOutcome::Teleported
                | MoveOutcome::TreasureNoKey
                | MoveOutcome::TreasureWithKey
        )
    }

    /// Status line shown after the move.
    pub fn message(self) -> &'static str {
        match self {
            MoveOutcome::NoOp => "",
            MoveOutcome::InvalidInput => "You can't go that way.",
            MoveOutcome::WallHit => "Ouch! You hit a wall!",
            MoveOutcome::CoinCollected => "You collected a coin!",
            MoveOutcome::KeyFound => "You found the key! Now find the treasure!",
            MoveOutcome::Teleported => "Whoosh! You teleported successfully!",
            MoveOutcome::TreasureNoKey => "You need a key to open the treasure!",
            MoveOutcome::TreasureWithKey => "Congratulations! You win!",
            MoveOutcome::CaughtByEnemy => "You were captured by the enemy!",
        }
    }
}
