//! Software render target shared by modes and the display

use panelpop_core::Color;

/// An owned ARGB pixel buffer.
///
/// All coordinates are in pixels. Out-of-bounds drawing is clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK.to_argb(); width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixels, `width * height` long
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| Color::from_argb(self.pixels[y * self.width + x]))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color.to_argb();
        }
    }

    /// Alpha-composite `color` over the existing pixel. `alpha` is 0.0..=1.0.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = blend_colors(self.pixels[idx], color.to_argb(), alpha);
        }
    }

    /// Fill a rectangle, clipped to the canvas
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x.saturating_add(w as i32)).clamp(0, self.width as i32) as usize;
        let y1 = (y.saturating_add(h as i32)).clamp(0, self.height as i32) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let argb = color.to_argb();
        for row in y0..y1 {
            let start = row * self.width;
            self.pixels[start + x0..start + x1].fill(argb);
        }
    }

    /// One-pixel rectangle outline
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        if w == 0 || h == 0 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h as i32 - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w as i32 - 1, y, 1, h, color);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}

/// Blend two `0xAARRGGBB` colors, returning an opaque result
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let alpha = alpha.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let b = ((bg >> shift) & 0xFF) as f32;
        let f = ((fg >> shift) & 0xFF) as f32;
        (b * (1.0 - alpha) + f * alpha).round() as u32
    };
    0xFF000000 | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}
