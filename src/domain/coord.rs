/// Grid coordinates and movement directions.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// Step one cell in `dir`. `None` when the step would go negative;
    /// upper bounds are the grid's concern.
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Coord { row, col })
    }

    #[allow(dead_code)]
    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Movement direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    /// Neighbor scan order used by pursuit. Ties break toward the earlier entry.
    pub const SCAN_ORDER: [Direction; 4] =
        [Direction::Down, Direction::Up, Direction::Right, Direction::Left];

    /// `(row, col)` unit offset.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
        }
    }

    /// Movement symbol, case-insensitive: w/a/s/d.
    pub fn from_symbol(ch: char) -> Option<Direction> {
        match ch.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Up => 'w',
            Direction::Down => 's',
            Direction::Left => 'a',
            Direction::Right => 'd',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_never_wraps_below_zero() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(Coord::new(1, 0)));
        assert_eq!(origin.step(Direction::Right), Some(Coord::new(0, 1)));
    }

    #[test]
    fn symbols_are_case_insensitive() {
        assert_eq!(Direction::from_symbol('W'), Some(Direction::Up));
        assert_eq!(Direction::from_symbol('d'), Some(Direction::Right));
        assert_eq!(Direction::from_symbol('q'), None);
        for dir in Direction::SCAN_ORDER {
            assert_eq!(Direction::from_symbol(dir.symbol()), Some(dir));
        }
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Coord::new(1, 4);
        let b = Coord::new(3, 0);
        assert_eq!(a.manhattan(b), 6);
        assert_eq!(b.manhattan(a), 6);
    }
}
