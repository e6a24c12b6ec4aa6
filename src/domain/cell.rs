/// What a maze square holds, and the character each content is written as
/// in map files. The player and the enemy are not contents; the grid keeps
/// their coordinates separately.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Coin,
    Portal,   // Teleports to the next portal in discovery order
    Key,
    Treasure, // Goal, opens only with the key
}

pub const SYM_EMPTY: char = ' ';
pub const SYM_WALL: char = '#';
pub const SYM_COIN: char = 'C';
pub const SYM_PORTAL: char = '%';
pub const SYM_KEY: char = '&';
pub const SYM_TREASURE: char = 'X';
pub const SYM_PLAYER: char = '@';
pub const SYM_ENEMY: char = 'E';

impl Cell {
    /// Can the enemy path through this cell?
    pub fn is_open(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Map symbol for this cell.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => SYM_EMPTY,
            Cell::Wall => SYM_WALL,
            Cell::Coin => SYM_COIN,
            Cell::Portal => SYM_PORTAL,
            Cell::Key => SYM_KEY,
            Cell::Treasure => SYM_TREASURE,
        }
    }

    /// Parse a map symbol. Entity markers (`@`, `E`) are not cells.
    pub fn from_symbol(ch: char) -> Option<Cell> {
        match ch {
            SYM_EMPTY => Some(Cell::Empty),
            SYM_WALL => Some(Cell::Wall),
            SYM_COIN => Some(Cell::Coin),
            SYM_PORTAL => Some(Cell::Portal),
            SYM_KEY => Some(Cell::Key),
            SYM_TREASURE => Some(Cell::Treasure),
            _ => None,
        }
    }
}
