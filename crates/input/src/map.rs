//! Key mapping from terminal events to input actions.

use crate::types::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means before it is resolved against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Move the highlighted cell by one.
    Cursor(Direction),
    /// Jump the selected peg.
    Swipe(Direction),
    /// Tap the highlighted cell.
    Tap,
    Restart,
}

/// Map keyboard input to input actions.
pub fn handle_key_event(key: KeyEvent) -> Option<InputAction> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        // Cursor (Shift+arrow swipes instead)
        KeyCode::Up => Some(arrow(Direction::Up, shift)),
        KeyCode::Down => Some(arrow(Direction::Down, shift)),
        KeyCode::Left => Some(arrow(Direction::Left, shift)),
        KeyCode::Right => Some(arrow(Direction::Right, shift)),
        KeyCode::Char('k') | KeyCode::Char('K') => Some(InputAction::Cursor(Direction::Up)),
        KeyCode::Char('j') | KeyCode::Char('J') => Some(InputAction::Cursor(Direction::Down)),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(InputAction::Cursor(Direction::Left)),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(InputAction::Cursor(Direction::Right)),

        // Swipes
        KeyCode::Char('w') | KeyCode::Char('W') => Some(InputAction::Swipe(Direction::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(InputAction::Swipe(Direction::Down)),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(InputAction::Swipe(Direction::Left)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(InputAction::Swipe(Direction::Right)),

        KeyCode::Char(' ') | KeyCode::Enter => Some(InputAction::Tap),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Restart),

        _ => None,
    }
}

fn arrow(dir: Direction, shift: bool) -> InputAction {
    if shift {
        InputAction::Swipe(dir)
    } else {
        InputAction::Cursor(dir)
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(InputAction::Cursor(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(InputAction::Cursor(Direction::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('K'))),
            Some(InputAction::Cursor(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('l'))),
            Some(InputAction::Cursor(Direction::Right))
        );
    }

    #[test]
    fn test_swipe_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('w'))),
            Some(InputAction::Swipe(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('A'))),
            Some(InputAction::Swipe(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT)),
            Some(InputAction::Swipe(Direction::Right))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(InputAction::Tap)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(InputAction::Tap)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(InputAction::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
