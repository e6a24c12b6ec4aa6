/// Input adapter: terminal key events → movement symbols.
///
/// The game is turn-based, so this blocks until a key is pressed.
/// Arrow keys are folded onto w/a/s/d; every other printable key is passed
/// through untouched and the move resolver decides whether it means
/// anything. `q`, Esc and Ctrl+C become `Quit`.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::coord::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Symbol(char),
    Quit,
}

/// Wait for the next key press and translate it.
pub fn read_command() -> io::Result<Command> {
    loop {
        if let Event::Key(key) = event::read()? {
            if let Some(cmd) = command_for(key) {
                return Ok(cmd);
            }
        }
    }
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    // Release / Repeat would double-count a move.
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&'q') => Some(Command::Quit),
        KeyCode::Char(c) => Some(Command::Symbol(c)),
        KeyCode::Up => Some(Command::Symbol(Direction::Up.symbol())),
        KeyCode::Down => Some(Command::Symbol(Direction::Down.symbol())),
        KeyCode::Left => Some(Command::Symbol(Direction::Left.symbol())),
        KeyCode::Right => Some(Command::Symbol(Direction::Right.symbol())),
        KeyCode::Enter => Some(Command::Symbol('\n')),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_become_wasd() {
        assert_eq!(command_for(press(KeyCode::Up)), Some(Command::Symbol('w')));
        assert_eq!(command_for(press(KeyCode::Left)), Some(Command::Symbol('a')));
        assert_eq!(command_for(press(KeyCode::Down)), Some(Command::Symbol('s')));
        assert_eq!(command_for(press(KeyCode::Right)), Some(Command::Symbol('d')));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(command_for(press(KeyCode::Char('Q'))), Some(Command::Quit));
        assert_eq!(command_for(press(KeyCode::Esc)), Some(Command::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn other_chars_pass_through() {
        assert_eq!(command_for(press(KeyCode::Char('x'))), Some(Command::Symbol('x')));
        assert_eq!(command_for(press(KeyCode::Char('2'))), Some(Command::Symbol('2')));
        assert_eq!(command_for(press(KeyCode::F(1))), None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Char('w'));
        key.kind = KeyEventKind::Release;
        assert_eq!(command_for(key), None);
    }
}
