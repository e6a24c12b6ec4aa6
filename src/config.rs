/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub pursuit: PursuitConfig,
    pub player: PlayerConfig,
    pub maps_dir: PathBuf,
    pub log_file: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PursuitConfig {
    /// Enemy steps per player move, indexed by level - 1.
    pub steps_per_level: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    pub starting_lives: u32,
    pub life_price: u32,
}

impl PursuitConfig {
    /// Pursuit speed for a 1-based level. Levels past the table reuse its
    /// last entry; an empty table means one step.
    pub fn steps_for(&self, level: u32) -> usize {
        let idx = (level.max(1) - 1) as usize;
        self.steps_per_level
            .get(idx)
            .or(self.steps_per_level.last())
            .copied()
            .unwrap_or(1)
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    pursuit: TomlPursuit,
    #[serde(default)]
    player: TomlPlayer,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlPursuit {
    #[serde(default = "default_steps_per_level")]
    steps_per_level: Vec<usize>,
}

#[derive(Deserialize, Debug)]
struct TomlPlayer {
    #[serde(default = "default_starting_lives")]
    starting_lives: u32,
    #[serde(default = "default_life_price")]
    life_price: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_maps_dir")]
    maps_dir: String,
    #[serde(default = "default_log_file")]
    log_file: String,
}

// ── Defaults ──

fn default_steps_per_level() -> Vec<usize> { vec![1, 1, 2] } // last level chases twice as fast
fn default_starting_lives() -> u32 { 3 }
fn default_life_price() -> u32 { 50 }
fn default_maps_dir() -> String { "maps".into() }
fn default_log_file() -> String { "maze-escape.log".into() }

impl Default for TomlPursuit {
    fn default() -> Self {
        TomlPursuit { steps_per_level: default_steps_per_level() }
    }
}

impl Default for TomlPlayer {
    fn default() -> Self {
        TomlPlayer {
            starting_lives: default_starting_lives(),
            life_price: default_life_price(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            maps_dir: default_maps_dir(),
            log_file: default_log_file(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default(), &[])
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        GameConfig::from_toml(toml_cfg, &search_dirs)
    }

    /// Parse config text directly. Malformed text yields the defaults.
    #[allow(dead_code)]
    pub fn from_toml_str(text: &str) -> Self {
        GameConfig::from_toml(parse_toml(text, Path::new("<inline>")), &[])
    }

    fn from_toml(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        // Resolve maps directory against the search dirs, like data files.
        let maps_dir_str = &toml_cfg.general.maps_dir;
        let maps_dir = if PathBuf::from(maps_dir_str).is_absolute() {
            PathBuf::from(maps_dir_str)
        } else {
            search_dirs.iter()
                .map(|d| d.join(maps_dir_str))
                .find(|p| p.is_dir())
                .unwrap_or_else(|| PathBuf::from(maps_dir_str))
        };

        GameConfig {
            pursuit: PursuitConfig {
                steps_per_level: toml_cfg.pursuit.steps_per_level,
            },
            player: PlayerConfig {
                starting_lives: toml_cfg.player.starting_lives.max(1),
                life_price: toml_cfg.player.life_price,
            },
            maps_dir,
            log_file: PathBuf::from(toml_cfg.general.log_file),
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return parse_toml(&text, &path),
                Err(e) => {
                    warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str, path: &Path) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("{} parse error, using default settings: {e}", path.display());
            TomlConfig::default()
        }
    }
}
