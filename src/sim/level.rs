/// Level loader.
///
/// ## Sources (priority order):
///   1. `<maps_dir>/<level>/*.txt`, one file picked at random
///   2. Built-in embedded maps for the level
///
/// ## Map format:
///   ```text
///   <rows> <cols> <portals>
///   <rows lines of cols symbols>
///   ```
///
/// Trailing spaces may be missing from a row; short rows are padded
/// with empty cells. Longer rows are rejected, as are headers declaring
/// more than `MAX_SIDE` rows or columns.
///
/// ## Symbol legend:
///   '#' = Wall        ' ' = Empty
///   'C' = Coin        '%' = Portal
///   '&' = Key         'X' = Treasure
///   '@' = Player      'E' = Enemy
///
/// Player and enemy cells load as empty; their positions go to the grid.
/// Portals are collected in row-major order, which fixes the teleport cycle.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::domain::cell::{Cell, SYM_ENEMY, SYM_PLAYER};
use crate::domain::coord::Coord;
use crate::domain::grid::Grid;
use crate::error::LevelError;
use crate::sim::session::GameSession;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 3;

/// Largest row or column count a map header may declare.
const MAX_SIDE: usize = 1024;

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Build a fresh session for `level`, from disk if a map exists there,
/// otherwise from the built-in maps.
pub fn load_session(level: u32, config: &GameConfig) -> Result<GameSession, LevelError> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(LevelError::NoMap(level));
    }

    let files = map_files(&config.maps_dir, level);
    let mut rng = rand::thread_rng();

    if let Some(path) = files.choose(&mut rng) {
        match load_map_file(path) {
            Ok(grid) => {
                info!(level, path = %path.display(), "loaded map");
                return Ok(GameSession::new(level, grid));
            }
            Err(e) => warn!(level, path = %path.display(), "bad map file, using built-in: {e}"),
        }
    }

    let text = embedded_maps(level)
        .choose(&mut rng)
        .ok_or(LevelError::NoMap(level))?;
    let grid = parse_map(text)?;
    info!(level, "loaded built-in map");
    Ok(GameSession::new(level, grid))
}

/// Parse map text into a grid.
pub fn parse_map(text: &str) -> Result<Grid, LevelError> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));

    // The three header numbers may share a line or sit on their own lines.
    let mut header: Vec<&str> = Vec::with_capacity(3);
    while header.len() < 3 {
        let line = lines.next()
            .ok_or_else(|| LevelError::BadHeader("missing header".into()))?;
        header.extend(line.split_whitespace());
    }
    let (rows, cols, declared_portals) = parse_header(&header)?;

    let body: Vec<&str> = lines.take(rows).collect();
    if body.len() != rows {
        return Err(LevelError::RowCount { expected: rows, actual: body.len() });
    }

    let mut cells = Vec::new();
    let mut player: Option<Coord> = None;
    let mut enemy: Option<Coord> = None;

    for (row, line) in body.into_iter().enumerate() {
        let width = line.chars().count();
        if width > cols {
            return Err(LevelError::RowWidth { row, expected: cols, actual: width });
        }

        for (col, ch) in line.chars().enumerate() {
            let at = Coord::new(row, col);
            let cell = match ch {
                SYM_PLAYER => {
                    place(&mut player, at, "player")?;
                    Cell::Empty
                }
                SYM_ENEMY => {
                    place(&mut enemy, at, "enemy")?;
                    Cell::Empty
                }
                other => Cell::from_symbol(other)
                    .ok_or(LevelError::UnknownSymbol { symbol: other, row, col })?,
            };
            cells.push(cell);
        }
        cells.extend(std::iter::repeat(Cell::Empty).take(cols - width));
    }

    let player = player.ok_or(LevelError::Missing("player"))?;
    let enemy = enemy.ok_or(LevelError::Missing("enemy"))?;

    let grid = Grid::new(rows, cols, cells, player, enemy)?;
    if grid.portals().len() != declared_portals {
        return Err(LevelError::PortalCount { declared: declared_portals, found: grid.portals().len() });
    }
    Ok(grid)
}

/// Map files for a level, sorted by name.
pub fn map_files(maps_dir: &Path, level: u32) -> Vec<PathBuf> {
    let dir = maps_dir.join(level.to_string());
    let entries = match std::fs::read_dir(&dir) {
        Ok(e) => e,
        Err(_) => return vec![],
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|x| x == "txt"))
        .collect();
    files.sort();
    files
}

// ══════════════════════════════════════════════════════════════
// Internal
// ══════════════════════════════════════════════════════════════

fn load_map_file(path: &Path) -> Result<Grid, LevelError> {
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_map(&text)
}

fn parse_header(tokens: &[&str]) -> Result<(usize, usize, usize), LevelError> {
    let nums: Vec<usize> = tokens
        .iter()
        .map(|tok| tok.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|e| LevelError::BadHeader(format!("{tokens:?}: {e}")))?;

    match nums.as_slice() {
        [rows, cols, _] if *rows > MAX_SIDE || *cols > MAX_SIDE => Err(LevelError::BadHeader(
            format!("{rows}x{cols} exceeds {MAX_SIDE}x{MAX_SIDE}"),
        )),
        [rows, cols, portals] => Ok((*rows, *cols, *portals)),
        _ => Err(LevelError::BadHeader(format!("{tokens:?}"))),
    }
}

fn place(slot: &mut Option<Coord>, at: Coord, who: &'static str) -> Result<(), LevelError> {
    if slot.is_some() {
        return Err(LevelError::Duplicate(who));
    }
    *slot = Some(at);
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Embedded fallback maps
// ══════════════════════════════════════════════════════════════

pub fn embedded_maps(level: u32) -> &'static [&'static str] {
    match level {
        1 => &[LEVEL_1_A, LEVEL_1_B],
        2 => &[LEVEL_2_A, LEVEL_2_B],
        3 => &[LEVEL_3_A],
        _ => &[],
    }
}

const LEVEL_1_A: &str = "\
7 11 0
###########
#@  C    &#
# ### ### #
#   #C  # #
### # # # #
#X    #  E#
###########
";

const LEVEL_1_B: &str = "\
7 11 2
###########
#@ C#    X#
# # # ### #
# #   #C  #
# ### # # #
#%  C&  #%E
###########
";

const LEVEL_2_A: &str = "\
9 13 2
#############
#@  #   C  %#
# # # ### # #
# #   #   # #
# ### # ### #
#C  # #C  # #
### # ### # #
#%  #  &  #EX
#############
";

const LEVEL_2_B: &str = "\
9 13 0
#############
#@    C #  &#
# ##### # # #
#   C   # # #
# # ##### # #
# #     # # #
# ### # # #C#
#X    #    E#
#############
";

const LEVEL_3_A: &str = "\
11 15 3
###############
#@  C #   C  &#
# ### # ### # #
#   # #   # # #
### # ### # # #
#%  #   # #C# #
# ##### # ### #
#   C   #  %  #
# ####### ### #
#X   %  C    E#
###############
";
