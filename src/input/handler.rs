use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let direction = match key.code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Direction::Right),
            _ => None,
        };
        if let Some(direction) = direction {
            return KeyAction::GameAction(Action::Move(direction));
        }

        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r' | 'R') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the turn requested for the next tick
///
/// The first request that is not a reversal of the heading wins; anything
/// pressed after it in the same tick is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingTurn {
    direction: Option<Direction>,
}

impl PendingTurn {
    pub fn request(&mut self, current: Direction, requested: Direction) {
        if self.direction.is_none() && !current.is_opposite(requested) {
            self.direction = Some(requested);
        }
    }

    /// Hand the request to the engine and clear it
    pub fn take(&mut self) -> Action {
        Action::from(self.direction.take())
    }

    pub fn clear(&mut self) {
        self.direction = None;
    }
}
