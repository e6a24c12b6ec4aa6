/// Enemy pursuit: BFS from the enemy to the player over non-wall cells.
///
/// Each pass builds an arena of visited records. A record knows its step
/// count from the enemy and the index of the record it was reached from,
/// so any record can be walked back to the enemy's cell.
///
/// Visited marking lives in a per-pass side table (`marks`), one slot per
/// grid cell holding the record index. The grid itself is never written,
/// so there is nothing to restore when the pass ends.
///
/// Neighbors are scanned down, up, right, left. The first time the player's
/// cell is reached the scan stops: FIFO order guarantees that record lies on
/// a shortest path.

use std::collections::VecDeque;

use tracing::debug;

use super::coord::{Coord, Direction};
use super::grid::Grid;

/// One visited cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VisitedRecord {
    pub at: Coord,
    pub steps: usize,
    /// Index of the record this one was reached from. `None` for the enemy's cell.
    pub parent: Option<usize>,
}

/// A finished BFS pass.
#[derive(Clone, Debug)]
pub struct Search {
    records: Vec<VisitedRecord>,
    reached_player: bool,
}

impl Search {
    #[allow(dead_code)]
    pub fn reached_player(&self) -> bool {
        self.reached_player
    }

    /// Shortest path length to the player, if reachable.
    pub fn path_len(&self) -> Option<usize> {
        if self.reached_player {
            self.last().map(|r| r.steps)
        } else {
            None
        }
    }

    pub fn records(&self) -> &[VisitedRecord] {
        &self.records
    }

    fn last(&self) -> Option<&VisitedRecord> {
        self.records.last()
    }

    /// Walk `hops` parent links back from the last record.
    /// Stops early at the enemy's cell.
    pub fn retreat(&self, hops: usize) -> Option<Coord> {
        let mut idx = self.records.len().checked_sub(1)?;
        for _ in 0..hops {
            match self.records[idx].parent {
                Some(parent) => idx = parent,
                None => break,
            }
        }
        Some(self.records[idx].at)
    }

    /// Cells from the enemy to the last record, enemy first.
    #[allow(dead_code)]
    pub fn path(&self) -> Vec<Coord> {
        let mut path = vec![];
        let mut cursor = self.records.len().checked_sub(1);
        while let Some(idx) = cursor {
            path.push(self.records[idx].at);
            cursor = self.records[idx].parent;
        }
        path.reverse();
        path
    }
}

/// Run one BFS pass from the enemy toward the player.
pub fn search(grid: &Grid) -> Search {
    let source = grid.enemy();
    let target = grid.player();

    let mut records: Vec<VisitedRecord> = Vec::with_capacity(grid.cell_count() / 2);
    let mut marks: Vec<Option<usize>> = vec![None; grid.cell_count()];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(64);

    let Some(source_idx) = grid.index_of(source) else {
        return Search { records, reached_player: false };
    };
    marks[source_idx] = Some(0);
    records.push(VisitedRecord { at: source, steps: 0, parent: None });
    queue.push_back(0);

    if source == target {
        return Search { records, reached_player: true };
    }

    while let Some(current) = queue.pop_front() {
        let here = records[current];

        for dir in Direction::SCAN_ORDER {
            let Some(next) = here.at.step(dir) else { continue };
            let Some(cell_idx) = grid.index_of(next) else { continue };
            if marks[cell_idx].is_some() { continue; }
            if !grid.cell(next).is_some_and(|c| c.is_open()) { continue; }

            let record_idx = records.len();
            marks[cell_idx] = Some(record_idx);
            records.push(VisitedRecord { at: next, steps: here.steps + 1, parent: Some(current) });

            if next == target {
                return Search { records, reached_player: true };
            }
            queue.push_back(record_idx);
        }
    }

    Search { records, reached_player: false }
}

/// Where the enemy ends up after advancing `steps_per_turn` cells along
/// the shortest path to the player.
///
/// If `steps_per_turn` covers the whole path the enemy lands on the player.
/// If the player is unreachable the enemy heads for the last cell the search
/// reached instead. With `steps_per_turn == 0` the enemy stays put.
pub fn advance_enemy(grid: &Grid, steps_per_turn: usize) -> Coord {
    let pass = search(grid);
    let total = pass.last().map_or(0, |r| r.steps);
    let hops = total.saturating_sub(steps_per_turn);
    let next = pass.retreat(hops).unwrap_or(grid.enemy());

    debug!(
        visited = pass.records().len(),
        path_len = ?pass.path_len(),
        total,
        steps_per_turn,
        row = next.row,
        col = next.col,
        "pursuit pass",
    );
    next
}
