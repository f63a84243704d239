//! Panelpop Core - Foundational types shared by the panelpop crates
//!
//! - `Color` - packed ARGB color used by the software canvas
//! - `Player` - the two local player slots
//! - Error types and Result alias

mod error;
mod types;

pub use error::{PanelPopError, Result};
pub use types::{Color, Player};
