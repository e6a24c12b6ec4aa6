/// Player profile: lives, coins, unlocked level, and suspended rounds.
///
/// ## Round accounting
///   **Win**:  coins collected in the round are banked; winning the highest
///             unlocked level unlocks the next one (up to `MAX_LEVEL`).
///   **Loss**: lives are reset to one so the player can always retry.
///
/// ## Suspended rounds
///   Quitting mid-level parks the session under its level number. Starting
///   that level again may resume it. Any finished round clears the slot.
///
/// Profiles live in memory only.

use std::collections::BTreeMap;

use tracing::info;

use crate::error::ProfileError;
use super::level::{MAX_LEVEL, MIN_LEVEL};
use super::session::GameSession;

#[derive(Clone, Debug)]
pub struct Profile {
    pub name: String,
    /// Highest unlocked level.
    pub level: u32,
    pub lives: u32,
    pub coins: u32,
    suspended: BTreeMap<u32, GameSession>,
}

impl Profile {
    pub fn new(name: &str, starting_lives: u32) -> Self {
        Profile {
            name: name.to_string(),
            level: MIN_LEVEL,
            lives: starting_lives,
            coins: 0,
            suspended: BTreeMap::new(),
        }
    }

    /// Levels the player may choose from.
    pub fn playable_levels(&self) -> std::ops::RangeInclusive<u32> {
        MIN_LEVEL..=self.level.clamp(MIN_LEVEL, MAX_LEVEL)
    }

    // ── Round accounting ──

    pub fn record_win(&mut self, session: &GameSession) {
        self.coins += session.coins_collected();
        if session.level() == self.level && self.level < MAX_LEVEL {
            self.level += 1;
            info!(player = %self.name, level = self.level, "level unlocked");
        }
        self.suspended.remove(&session.level());
    }

    pub fn record_loss(&mut self, session: &GameSession) {
        self.lives = 1;
        self.suspended.remove(&session.level());
    }

    /// Spend coins on extra lives.
    pub fn buy_lives(&mut self, count: u32, price: u32) -> Result<(), ProfileError> {
        let cost = count.saturating_mul(price);
        if cost > self.coins {
            return Err(ProfileError::NotEnoughCoins { count, cost, available: self.coins });
        }
        self.coins -= cost;
        self.lives += count;
        Ok(())
    }

    // ── Suspended rounds ──

    pub fn suspend(&mut self, session: GameSession) {
        self.suspended.insert(session.level(), session);
    }

    pub fn has_suspended(&self, level: u32) -> bool {
        self.suspended.contains_key(&level)
    }

    pub fn resume(&mut self, level: u32) -> Option<GameSession> {
        self.suspended.remove(&level)
    }

    pub fn discard_suspended(&mut self, level: u32) {
        self.suspended.remove(&level);
    }
}
