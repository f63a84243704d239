//! Panelpop Player: windowed front end
//!
//! Wires the runtime loop to real services: a winit window pumped in polling
//! mode for input, a softbuffer surface for presentation, fontdue for text,
//! and the concrete title, gameplay and options modes.

mod display;
pub mod logging;
pub mod modes;
mod platform;
mod text;

pub use display::{blit_scaled, SoftbufferDisplay};
pub use modes::PanelPopModes;
pub use platform::WinitInput;
pub use text::GlyphText;
