//! Per-player key bindings

use panelpop_core::Player;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Actions a player controller can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    /// Swap the two panels under the cursor
    Swap,
    /// Push the stack up by one row
    Raise,
}

impl KeyAction {
    pub const ALL: [KeyAction; 6] = [
        KeyAction::Up,
        KeyAction::Down,
        KeyAction::Left,
        KeyAction::Right,
        KeyAction::Swap,
        KeyAction::Raise,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KeyAction::Up => "Up",
            KeyAction::Down => "Down",
            KeyAction::Left => "Left",
            KeyAction::Right => "Right",
            KeyAction::Swap => "Swap",
            KeyAction::Raise => "Raise",
        }
    }
}

/// Fixed action -> key mapping for one keyboard controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardControllerConfig {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub swap: KeyCode,
    pub raise: KeyCode,
}

impl KeyboardControllerConfig {
    /// Arrow keys, X swaps, Z raises
    pub fn player_one_defaults() -> Self {
        Self {
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            swap: KeyCode::KeyX,
            raise: KeyCode::KeyZ,
        }
    }

    /// WASD, G swaps, H raises
    pub fn player_two_defaults() -> Self {
        Self {
            up: KeyCode::KeyW,
            down: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            swap: KeyCode::KeyG,
            raise: KeyCode::KeyH,
        }
    }

    pub fn defaults_for(player: Player) -> Self {
        match player {
            Player::One => Self::player_one_defaults(),
            Player::Two => Self::player_two_defaults(),
        }
    }

    pub fn key(&self, action: KeyAction) -> KeyCode {
        match action {
            KeyAction::Up => self.up,
            KeyAction::Down => self.down,
            KeyAction::Left => self.left,
            KeyAction::Right => self.right,
            KeyAction::Swap => self.swap,
            KeyAction::Raise => self.raise,
        }
    }

    pub fn set_key(&mut self, action: KeyAction, key: KeyCode) {
        let slot = match action {
            KeyAction::Up => &mut self.up,
            KeyAction::Down => &mut self.down,
            KeyAction::Left => &mut self.left,
            KeyAction::Right => &mut self.right,
            KeyAction::Swap => &mut self.swap,
            KeyAction::Raise => &mut self.raise,
        };
        *slot = key;
    }

    /// First action bound to `key`, in `KeyAction::ALL` order
    pub fn action_for(&self, key: KeyCode) -> Option<KeyAction> {
        KeyAction::ALL.into_iter().find(|a| self.key(*a) == key)
    }
}

/// The two stored controller configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "KeyboardControllerConfig::player_one_defaults")]
    pub player1: KeyboardControllerConfig,
    #[serde(default = "KeyboardControllerConfig::player_two_defaults")]
    pub player2: KeyboardControllerConfig,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            player1: KeyboardControllerConfig::player_one_defaults(),
            player2: KeyboardControllerConfig::player_two_defaults(),
        }
    }
}

impl KeyBindings {
    pub fn get(&self, player: Player) -> &KeyboardControllerConfig {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }

    pub fn set(&mut self, player: Player, config: KeyboardControllerConfig) {
        match player {
            Player::One => self.player1 = config,
            Player::Two => self.player2 = config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_key_updates_only_that_action() {
        let mut config = KeyboardControllerConfig::player_one_defaults();
        config.set_key(KeyAction::Swap, KeyCode::Space);

        assert_eq!(config.key(KeyAction::Swap), KeyCode::Space);
        assert_eq!(config.key(KeyAction::Raise), KeyCode::KeyZ);
    }

    #[test]
    fn action_lookup() {
        let config = KeyboardControllerConfig::player_two_defaults();
        assert_eq!(config.action_for(KeyCode::KeyA), Some(KeyAction::Left));
        assert_eq!(config.action_for(KeyCode::ArrowLeft), None);
    }

    #[test]
    fn player_defaults_do_not_overlap() {
        let p1 = KeyboardControllerConfig::player_one_defaults();
        let p2 = KeyboardControllerConfig::player_two_defaults();
        for action in KeyAction::ALL {
            assert_eq!(p2.action_for(p1.key(action)), None);
        }
    }

    #[test]
    fn bindings_get_and_set() {
        let mut bindings = KeyBindings::default();
        let mut custom = *bindings.get(Player::Two);
        custom.set_key(KeyAction::Up, KeyCode::KeyI);
        bindings.set(Player::Two, custom);

        assert_eq!(bindings.get(Player::Two).up, KeyCode::KeyI);
        assert_eq!(bindings.get(Player::One).up, KeyCode::ArrowUp);
    }
}
