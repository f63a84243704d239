//! Panelpop Runtime - Game loop infrastructure
//!
//! Provides the loop and the seams it drives:
//! - `Orchestrator` - fixed 16 ms logic step, 5 ms render cap, deferred mode switching
//! - `Mode` / `ModeFactory` - the two-operation behaviour contract
//! - `InputService` / `KeyboardState` - polled keyboard input with edge detection
//! - `DisplayService` / `Canvas` - software render target and presentation
//! - `ConfigService` / `TomlConfigStore` - persisted per-player key bindings
//! - `TickSource` - monotonic millisecond clocks

mod canvas;
mod clock;
mod config;
mod display;
pub mod fps;
mod input;
mod keys;
mod mode;
mod orchestrator;
mod transition;

pub use canvas::{blend_colors, Canvas};
pub use clock::{ManualClock, MonotonicClock, TickSource};
pub use config::{
    default_config_path, ConfigFile, ConfigService, InMemoryConfig, TomlConfigStore, WindowConfig,
};
pub use display::{DisplayService, TextRenderer};
pub use input::{InputService, KeyInput, KeyboardState};
pub use keys::{KeyAction, KeyBindings, KeyboardControllerConfig};
pub use mode::{Mode, ModeFactory, RenderContext, UpdateContext};
pub use orchestrator::{
    AppContext, Orchestrator, StepReport, ALT_KEYS, CTRL_KEYS, LOGIC_STEP_MS,
    RENDER_INTERVAL_MS,
};
pub use transition::Transition;

pub use winit::keyboard::KeyCode;
