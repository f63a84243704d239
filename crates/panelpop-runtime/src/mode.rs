//! Mode contract: the unit of application behaviour driven by the loop.
//!
//! Exactly one [`Mode`] is active at a time. Modes never hold references to
//! each other; they ask for a replacement through [`UpdateContext`] and the
//! orchestrator swaps it in after the current iteration's render.

use crate::canvas::Canvas;
use crate::config::ConfigService;
use crate::display::TextRenderer;
use crate::input::KeyInput;
use crate::keys::{KeyBindings, KeyboardControllerConfig};
use crate::transition::Transition;
use panelpop_core::{Color, Player};
use tracing::{debug, warn};

/// A mutually exclusive unit of behaviour (title screen, gameplay, options)
pub trait Mode {
    /// One discrete logic step. May request a transition.
    fn update(&mut self, ctx: &mut UpdateContext<'_>);

    /// Produce the canvas showing the current visual state.
    ///
    /// Must not change orchestrator state; input is readable but never polled.
    fn render(&mut self, ctx: &mut RenderContext<'_>) -> &mut Canvas;
}

/// Constructs the well-known modes used by the convenience transitions
pub trait ModeFactory {
    fn title(&self) -> Box<dyn Mode>;

    fn gameplay(&self) -> Box<dyn Mode>;
}

/// What a mode can reach during `update`
pub struct UpdateContext<'a> {
    input: &'a dyn KeyInput,
    transition: &'a mut Transition,
    factory: &'a dyn ModeFactory,
    keys: &'a mut KeyBindings,
    config: &'a mut dyn ConfigService,
    now_ms: u64,
}

impl<'a> UpdateContext<'a> {
    pub fn new(
        input: &'a dyn KeyInput,
        transition: &'a mut Transition,
        factory: &'a dyn ModeFactory,
        keys: &'a mut KeyBindings,
        config: &'a mut dyn ConfigService,
        now_ms: u64,
    ) -> Self {
        Self {
            input,
            transition,
            factory,
            keys,
            config,
            now_ms,
        }
    }

    pub fn input(&self) -> &dyn KeyInput {
        self.input
    }

    /// Tick reading of the current iteration
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Replace the active mode at the end of this iteration
    pub fn switch_to_state(&mut self, mode: Box<dyn Mode>) {
        self.transition.request(mode);
    }

    pub fn start_game(&mut self) {
        let mode = self.factory.gameplay();
        self.switch_to_state(mode);
    }

    pub fn return_to_title(&mut self) {
        let mode = self.factory.title();
        self.switch_to_state(mode);
    }

    pub fn key_config(&self, player: Player) -> &KeyboardControllerConfig {
        self.keys.get(player)
    }

    pub fn set_key_config(&mut self, player: Player, config: KeyboardControllerConfig) {
        self.keys.set(player, config);
    }

    /// Persist both players' bindings. Failures are logged, not returned.
    pub fn save_key_configs(&mut self) {
        match self.config.store_key_configs(&*self.keys) {
            Ok(()) => debug!("saved key bindings"),
            Err(e) => warn!(error = %e, "failed to save key bindings"),
        }
    }
}

/// What a mode can reach during `render`
pub struct RenderContext<'a> {
    input: &'a dyn KeyInput,
    text: &'a mut dyn TextRenderer,
    now_ms: u64,
}

impl<'a> RenderContext<'a> {
    pub fn new(input: &'a dyn KeyInput, text: &'a mut dyn TextRenderer, now_ms: u64) -> Self {
        Self {
            input,
            text,
            now_ms,
        }
    }

    pub fn input(&self) -> &dyn KeyInput {
        self.input
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn draw_text(&mut self, canvas: &mut Canvas, text: &str, x: i32, y: i32, color: Color) {
        self.text.draw_text(canvas, text, x, y, color);
    }
}
