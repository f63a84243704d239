//! softbuffer presentation of the software canvas

use crate::text::GlyphText;
use panelpop_core::{Color, PanelPopError, Result};
use panelpop_runtime::{Canvas, DisplayService, TextRenderer, WindowConfig};
use softbuffer::{Context, Surface};
use std::num::NonZeroU32;
use std::rc::Rc;
use winit::window::{Fullscreen, Window};

/// Letterbox fill around the scaled canvas
const BORDER: u32 = 0xFF000000;

/// Window-backed display. Failures are logged, never returned to the loop.
pub struct SoftbufferDisplay {
    window: Rc<Window>,
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    text: Option<GlyphText>,
    fullscreen: bool,
    surface_size: (u32, u32),
}

impl SoftbufferDisplay {
    pub fn new(window: Rc<Window>, config: &WindowConfig) -> Result<Self> {
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| PanelPopError::DisplayError(format!("Failed to create context: {e}")))?;
        let surface = Surface::new(&context, Rc::clone(&window))
            .map_err(|e| PanelPopError::DisplayError(format!("Failed to create surface: {e}")))?;

        let text = match GlyphText::load_or_embedded(config.font.as_deref(), config.font_size) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Text disabled, no usable font: {}", e);
                None
            }
        };

        let fullscreen = window.fullscreen().is_some();
        Ok(Self {
            window,
            _context: context,
            surface,
            text,
            fullscreen,
            surface_size: (0, 0),
        })
    }

    fn present_inner(&mut self, canvas: &Canvas) -> Result<()> {
        let size = self.window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            // Minimized
            return Ok(());
        };

        if self.surface_size != (size.width, size.height) {
            self.surface
                .resize(w, h)
                .map_err(|e| PanelPopError::DisplayError(format!("Failed to resize surface: {e}")))?;
            self.surface_size = (size.width, size.height);
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| PanelPopError::DisplayError(format!("Failed to get surface buffer: {e}")))?;
        blit_scaled(canvas, &mut buffer, size.width as usize, size.height as usize);
        buffer
            .present()
            .map_err(|e| PanelPopError::DisplayError(format!("Failed to present buffer: {e}")))?;
        Ok(())
    }
}

impl TextRenderer for SoftbufferDisplay {
    fn draw_text(&mut self, canvas: &mut Canvas, text: &str, x: i32, y: i32, color: Color) {
        if let Some(glyphs) = self.text.as_mut() {
            glyphs.draw_text(canvas, text, x, y, color);
        }
    }

    fn text_size(&mut self, text: &str) -> (u32, u32) {
        self.text.as_mut().map_or((0, 0), |glyphs| glyphs.text_size(text))
    }
}

impl DisplayService for SoftbufferDisplay {
    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        let mode = self.fullscreen.then_some(Fullscreen::Borderless(None));
        self.window.set_fullscreen(mode);
        tracing::info!("Fullscreen {}", if self.fullscreen { "on" } else { "off" });
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn present(&mut self, canvas: &Canvas) {
        if let Err(e) = self.present_inner(canvas) {
            tracing::warn!("Present failed: {}", e);
        }
    }
}

/// Nearest-neighbour scale `src` into `dst`, preserving aspect ratio and
/// filling the unused bands with black.
pub fn blit_scaled(src: &Canvas, dst: &mut [u32], dst_w: usize, dst_h: usize) {
    let (src_w, src_h) = (src.width(), src.height());
    if dst_w == 0 || dst_h == 0 || dst.len() < dst_w * dst_h {
        return;
    }
    dst[..dst_w * dst_h].fill(BORDER);
    if src_w == 0 || src_h == 0 {
        return;
    }

    // Largest size that fits, keeping src_w:src_h
    let (out_w, out_h) = if dst_w * src_h <= dst_h * src_w {
        (dst_w, (dst_w * src_h / src_w).max(1))
    } else {
        ((dst_h * src_w / src_h).max(1), dst_h)
    };
    let off_x = (dst_w - out_w) / 2;
    let off_y = (dst_h - out_h) / 2;
    let pixels = src.pixels();

    for y in 0..out_h {
        let sy = y * src_h / out_h;
        let src_row = &pixels[sy * src_w..(sy + 1) * src_w];
        let dst_row = &mut dst[(off_y + y) * dst_w + off_x..][..out_w];
        for (x, out) in dst_row.iter_mut().enumerate() {
            *out = src_row[x * src_w / out_w];
        }
    }
}
