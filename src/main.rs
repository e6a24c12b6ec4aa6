/// Entry point: level menu and turn loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::GameConfig;
use sim::level;
use sim::profile::Profile;
use sim::round::{Round, RoundState};
use sim::session::GameSession;
use ui::input::{read_command, Command};
use ui::renderer::Renderer;

const DEFAULT_PLAYER: &str = "player";

fn main() {
    let config = GameConfig::load();
    init_tracing(&config.log_file);

    let name = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_PLAYER.to_string());
    let mut profile = Profile::new(&name, config.player.starting_lives);
    info!(player = %profile.name, lives = profile.lives, "session start");

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut profile, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e:#}");
    }

    println!();
    println!("Thanks for playing Maze Escape, {}!", profile.name);
    println!("Level {} unlocked, {} coins, {} lives.", profile.level, profile.coins, profile.lives);
}

/// Log to a file so the full-screen terminal stays clean. `RUST_LOG`
/// overrides the default `info` filter. No file, no logging.
fn init_tracing(path: &Path) {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Logging disabled, cannot open {}: {e}", path.display());
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

// ── Menu ──

fn game_loop(profile: &mut Profile, renderer: &mut Renderer, config: &GameConfig) -> anyhow::Result<()> {
    let mut message = String::new();

    loop {
        renderer.draw_menu(profile, &message).context("drawing menu")?;
        message.clear();

        let choice = match read_command().context("reading input")? {
            Command::Quit => return Ok(()),
            Command::Symbol(c) => c,
        };

        if choice.eq_ignore_ascii_case(&'b') {
            message = match profile.buy_lives(1, config.player.life_price) {
                Ok(()) => format!("You bought a life! Lives: {}", profile.lives),
                Err(e) => e.to_string(),
            };
            continue;
        }

        let Some(level) = choice.to_digit(10) else {
            message = "Invalid option!".to_string();
            continue;
        };
        if !profile.playable_levels().contains(&level) {
            message = format!("Level {level} is locked.");
            continue;
        }

        let session = match choose_session(profile, renderer, level, config)? {
            Some(s) => s,
            None => {
                message = format!("Could not load level {level}; see the log.");
                continue;
            }
        };
        message = play_level(profile, renderer, session, config)?;
    }
}

/// Resume a suspended session if the player wants to, else load a fresh one.
/// `None` when no map could be loaded.
fn choose_session(
    profile: &mut Profile,
    renderer: &mut Renderer,
    level: u32,
    config: &GameConfig,
) -> anyhow::Result<Option<GameSession>> {
    if profile.has_suspended(level) {
        renderer
            .draw_prompt(&format!("Continue the saved game on level {level}?"))
            .context("drawing prompt")?;
        if confirm()? {
            return Ok(profile.resume(level));
        }
        profile.discard_suspended(level);
    }

    match level::load_session(level, config) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            warn!(level, "level load failed: {e}");
            Ok(None)
        }
    }
}

fn confirm() -> anyhow::Result<bool> {
    loop {
        match read_command().context("reading input")? {
            Command::Symbol(c) if c.eq_ignore_ascii_case(&'y') => return Ok(true),
            Command::Symbol(c) if c.eq_ignore_ascii_case(&'n') => return Ok(false),
            Command::Quit => return Ok(false),
            Command::Symbol(_) => {}
        }
    }
}

// ── Round ──

/// Play one level until it is won, lost, or suspended. Returns the line
/// shown on the menu afterwards.
fn play_level(
    profile: &mut Profile,
    renderer: &mut Renderer,
    mut session: GameSession,
    config: &GameConfig,
) -> anyhow::Result<String> {
    let level = session.level();
    let mut round = Round::new(config.pursuit.steps_for(level));
    let mut message = String::new();
    info!(level, steps = round.steps_per_turn(), "level start");

    loop {
        renderer.draw_round(&session, profile.lives, &message).context("drawing round")?;

        let symbol = match read_command().context("reading input")? {
            Command::Quit => {
                info!(level, turns = round.turns(), "level suspended");
                profile.suspend(session);
                return Ok(format!("Level {level} saved. Choose it again to continue."));
            }
            Command::Symbol(c) => c,
        };

        let turn = round
            .play_turn(&mut session, &mut profile.lives, symbol)
            .context("playing turn")?;
        message = if turn.caught {
            "The enemy caught you!".to_string()
        } else {
            turn.outcome.message().to_string()
        };

        let summary = match turn.state {
            RoundState::InProgress => continue,
            RoundState::Won => {
                profile.record_win(&session);
                format!("You won level {level} with {} coins!", session.coins_collected())
            }
            RoundState::Lost => {
                profile.record_loss(&session);
                format!("You lost level {level}. {message}")
            }
        };

        // Final board stays up until a key is pressed.
        renderer
            .draw_round(&session, profile.lives, &format!("{message}  Press any key."))
            .context("drawing round")?;
        read_command().context("reading input")?;
        return Ok(summary);
    }
}
