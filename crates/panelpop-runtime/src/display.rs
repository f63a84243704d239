//! Display service seam

use crate::canvas::Canvas;
use panelpop_core::Color;

/// Draws text onto a canvas. The only display capability modes get.
pub trait TextRenderer {
    /// Draw `text` with its top-left corner at `(x, y)`
    fn draw_text(&mut self, canvas: &mut Canvas, text: &str, x: i32, y: i32, color: Color);

    /// Width and height `text` would cover. `(0, 0)` when text is not drawn.
    fn text_size(&mut self, _text: &str) -> (u32, u32) {
        (0, 0)
    }
}

/// Owns the window and its render surface.
///
/// Implementations handle their own failures: the loop assumes every call
/// succeeds.
pub trait DisplayService: TextRenderer {
    fn toggle_fullscreen(&mut self);

    fn is_fullscreen(&self) -> bool;

    /// Copy the canvas to the window and show it
    fn present(&mut self, canvas: &Canvas);
}
