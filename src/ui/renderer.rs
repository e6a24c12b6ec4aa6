/// Presentation layer: full-screen terminal views.
///
/// Turn-based play redraws only after a key press, so every frame is a
/// plain clear-and-draw. All commands are batched with `queue!` and
/// flushed once at the end of the frame.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::cell::{SYM_ENEMY, SYM_PLAYER};
use crate::domain::coord::Coord;
use crate::sim::profile::Profile;
use crate::sim::session::GameSession;

const PLAYER_COLOR: Color = Color::Green;
const ENEMY_COLOR: Color = Color::Red;

pub struct Renderer {
    out: BufWriter<Stdout>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { out: BufWriter::new(io::stdout()) }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, terminal::EnterAlternateScreen, cursor::Hide)
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    // ── Menu ──

    pub fn draw_menu(&mut self, profile: &Profile, message: &str) -> io::Result<()> {
        let levels = profile.playable_levels();
        let mut lines = vec![
            "MAZE ESCAPE".to_string(),
            String::new(),
            format!("{}: level {}; {} coins; {} lives", profile.name, profile.level, profile.coins, profile.lives),
            String::new(),
            format!("[{}-{}] Play a level", levels.start(), levels.end()),
            "[b]   Buy a life".to_string(),
            "[q]   Quit".to_string(),
        ];
        if levels.clone().any(|l| profile.has_suspended(l)) {
            lines.push(String::new());
            lines.push("A suspended level can be resumed by choosing it again.".to_string());
        }
        if !message.is_empty() {
            lines.push(String::new());
            lines.push(message.to_string());
        }

        self.begin_frame()?;
        for (y, line) in lines.iter().enumerate() {
            queue!(self.out, MoveTo(0, y as u16), Print(line))?;
        }
        self.out.flush()
    }

    /// Yes/no prompt on an otherwise empty screen.
    pub fn draw_prompt(&mut self, question: &str) -> io::Result<()> {
        self.begin_frame()?;
        queue!(self.out, MoveTo(0, 0), Print(question), MoveTo(0, 2), Print("[y] Yes   [n] No"))?;
        self.out.flush()
    }

    // ── Round ──

    pub fn draw_round(&mut self, session: &GameSession, lives: u32, message: &str) -> io::Result<()> {
        self.begin_frame()?;

        let key = if session.key_found() { "Found" } else { "Not found" };
        let status = [
            format!("Level: {}", session.level()),
            format!("Lives: {lives}"),
            format!("Coins: {}/{}", session.coins_collected(), session.total_coins()),
            format!("Key: {key}"),
        ];
        for (y, line) in status.iter().enumerate() {
            queue!(self.out, MoveTo(0, y as u16), Print(line))?;
        }

        let top = status.len() as u16 + 1;
        let mut y = top;
        if let Ok(grid) = session.grid() {
            for row in 0..grid.rows() {
                queue!(self.out, MoveTo(0, y))?;
                for col in 0..grid.cols() {
                    let at = Coord::new(row, col);
                    if at == grid.player() {
                        queue!(self.out, SetForegroundColor(PLAYER_COLOR), Print(SYM_PLAYER), ResetColor)?;
                    } else if at == grid.enemy() {
                        queue!(self.out, SetForegroundColor(ENEMY_COLOR), Print(SYM_ENEMY), ResetColor)?;
                    } else {
                        let ch = grid.cell(at).map_or(' ', |c| c.symbol());
                        queue!(self.out, Print(ch))?;
                    }
                    // Two-column gap keeps the maze roughly square.
                    queue!(self.out, Print("  "))?;
                }
                y += 1;
            }
        }

        y += 1;
        if !message.is_empty() {
            queue!(self.out, MoveTo(0, y), Print(message))?;
        }
        y += 2;
        for (i, help) in ["W/↑ Up   S/↓ Down   A/← Left   D/→ Right", "Q - Quit the level saving the progress"]
            .iter()
            .enumerate()
        {
            queue!(self.out, MoveTo(0, y + i as u16), Print(help))?;
        }

        self.out.flush()
    }

    fn begin_frame(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))
    }
}
