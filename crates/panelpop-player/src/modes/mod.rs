//! Concrete modes shown by the player

mod gameplay;
mod options;
mod title;

pub use gameplay::GameMode;
pub use options::OptionsMenu;
pub use title::TitleScreen;

use panelpop_core::Color;
use panelpop_runtime::{KeyInput, Mode, ModeFactory, ALT_KEYS};
use winit::keyboard::KeyCode;

pub(crate) const BACKGROUND: Color = Color::from_hex(0x181430);
pub(crate) const MENU_TEXT: Color = Color::from_hex(0xC8C8DC);
pub(crate) const MENU_HIGHLIGHT: Color = Color::YELLOW;

/// Line height for menu rows
pub(crate) const LINE_HEIGHT: i32 = 24;

/// Builds the title and gameplay modes at a fixed canvas size
#[derive(Debug, Clone, Copy)]
pub struct PanelPopModes {
    width: usize,
    height: usize,
}

impl PanelPopModes {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl ModeFactory for PanelPopModes {
    fn title(&self) -> Box<dyn Mode> {
        Box::new(TitleScreen::new(self.width, self.height))
    }

    fn gameplay(&self) -> Box<dyn Mode> {
        Box::new(GameMode::new(self.width, self.height))
    }
}

/// Enter, unless Alt is held for the fullscreen hotkey
pub(crate) fn enter_pressed(input: &dyn KeyInput) -> bool {
    input.is_key_just_pressed(KeyCode::Enter) && !input.is_any_down(&ALT_KEYS)
}

/// Move a menu selection by one row, wrapping at both ends
pub(crate) fn step_selection(selected: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (selected + 1) % len
    } else {
        (selected + len - 1) % len
    }
}
