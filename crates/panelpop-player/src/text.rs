//! Glyph rasterization onto the software canvas

use fontdue::{Font, FontSettings, Metrics};
use panelpop_core::{Color, PanelPopError, Result};
use panelpop_runtime::{Canvas, TextRenderer};
use std::collections::HashMap;
use std::path::Path;

/// DejaVu Sans Mono, used when no font file is configured
const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono.ttf");

/// A loaded font at a fixed pixel size with a per-character glyph cache
pub struct GlyphText {
    font: Font,
    font_size: f32,
    ascent: f32,
    line_height: f32,
    cache: HashMap<char, (Metrics, Vec<u8>)>,
}

impl GlyphText {
    /// The bundled font
    pub fn embedded(font_size: f32) -> Result<Self> {
        Self::from_bytes(EMBEDDED_FONT, font_size)
    }

    /// Load `path` if given, falling back to the bundled font when it is
    /// absent or unreadable.
    pub fn load_or_embedded(path: Option<&Path>, font_size: f32) -> Result<Self> {
        if let Some(path) = path {
            match Self::load(path, font_size) {
                Ok(text) => return Ok(text),
                Err(e) => tracing::warn!(
                    "Could not load font {}, using bundled font: {}",
                    path.display(),
                    e
                ),
            }
        }
        Self::embedded(font_size)
    }

    pub fn load(path: &Path, font_size: f32) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, font_size)
    }

    pub fn from_bytes(bytes: &[u8], font_size: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| PanelPopError::FontError(e.to_string()))?;
        let (ascent, line_height) = font
            .horizontal_line_metrics(font_size)
            .map(|m| (m.ascent, m.new_line_size))
            .unwrap_or((font_size, font_size));
        Ok(Self {
            font,
            font_size,
            ascent,
            line_height,
            cache: HashMap::new(),
        })
    }

    /// Measure text width in pixels
    pub fn measure_width(&mut self, text: &str) -> f32 {
        text.chars().map(|ch| self.glyph(ch).0.advance_width).sum()
    }

    fn glyph(&mut self, ch: char) -> &(Metrics, Vec<u8>) {
        let (font, size) = (&self.font, self.font_size);
        self.cache
            .entry(ch)
            .or_insert_with(|| font.rasterize(ch, size))
    }
}

impl TextRenderer for GlyphText {
    fn draw_text(&mut self, canvas: &mut Canvas, text: &str, x: i32, y: i32, color: Color) {
        let mut pen_x = x as f32;
        let baseline = y as f32 + self.ascent;

        for ch in text.chars() {
            let (metrics, bitmap) = self.glyph(ch);
            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = bitmap[row * metrics.width + col];
                    if alpha == 0 {
                        continue;
                    }
                    let px = pen_x as i32 + col as i32 + metrics.xmin;
                    let py = (glyph_top + row as f32) as i32;
                    canvas.blend_pixel(px, py, color, alpha as f32 / 255.0);
                }
            }

            pen_x += metrics.advance_width;
        }
    }

    fn text_size(&mut self, text: &str) -> (u32, u32) {
        let width = self.measure_width(text).ceil().max(0.0) as u32;
        (width, self.line_height.ceil().max(0.0) as u32)
    }
}
