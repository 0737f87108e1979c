//! # Input Module
//!
//! The intent vocabulary the core accepts, plus a key parser for the CLI.
//!
//! Only three kinds of intent exist: a cardinal move, drinking almond water,
//! and starting over with a new seed. Anything a key parser cannot map is
//! dropped before it reaches the session.

use crate::Direction;
use serde::{Deserialize, Serialize};

/// Intents accepted by [`Session::handle_input`](crate::Session::handle_input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Step one cell in a direction
    Move(Direction),
    /// Drink a bottle of almond water
    ConsumeItem,
    /// Discard the session and generate a new one from this seed
    NewSession(u32),
}

/// Maps keys to intents.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use liminal::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.parse_key('w'), Some(PlayerInput::Move(Direction::Up)));
    /// assert_eq!(input_handler.parse_key('?'), None);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Maps a single key to an intent.
    pub fn parse_key(&self, key: char) -> Option<PlayerInput> {
        let direction = match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            'k' if self.vi_keys_enabled => Some(Direction::Up),
            'j' if self.vi_keys_enabled => Some(Direction::Down),
            'h' if self.vi_keys_enabled => Some(Direction::Left),
            'l' if self.vi_keys_enabled => Some(Direction::Right),
            'e' => return Some(PlayerInput::ConsumeItem),
            _ => None,
        };
        direction.map(PlayerInput::Move)
    }

    /// Maps a string of keys to intents, dropping unknown keys.
    pub fn parse_script(&self, script: &str) -> Vec<PlayerInput> {
        script.chars().filter_map(|key| self.parse_key(key)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_drink() {
        let handler = InputHandler::new();
        assert_eq!(handler.parse_key('a'), Some(PlayerInput::Move(Direction::Left)));
        assert_eq!(handler.parse_key('D'), Some(PlayerInput::Move(Direction::Right)));
        assert_eq!(handler.parse_key('e'), Some(PlayerInput::ConsumeItem));
    }

    #[test]
    fn test_vi_keys_toggle() {
        let mut handler = InputHandler::new();
        assert_eq!(handler.parse_key('j'), Some(PlayerInput::Move(Direction::Down)));

        handler.vi_keys_enabled = false;
        assert_eq!(handler.parse_key('j'), None);
    }

    #[test]
    fn test_parse_script_drops_unknown_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.parse_script("w x e\nd"),
            vec![
                PlayerInput::Move(Direction::Up),
                PlayerInput::ConsumeItem,
                PlayerInput::Move(Direction::Right),
            ]
        );
    }
}
