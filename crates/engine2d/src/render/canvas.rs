//! Software framebuffer
//!
//! A plain CPU-side pixel surface. Drawables plot single points (circle
//! outlines) or blit textures into it; the renderer presents the whole
//! buffer once per frame. Out-of-bounds writes are clipped silently.

use crate::assets::Texture;
use crate::foundation::math::Vec2;

/// Packed ARGB pixel surface
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::empty()
    }
}

impl Canvas {
    /// Create a surface of the given size, cleared to opaque black
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xFF00_0000; width * height],
        }
    }

    /// Create a zero-sized surface; every draw against it is clipped
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Surface width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// The underlying pixel buffer, row-major
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Fill the whole surface with one color
    pub fn clear(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    /// Plot one pixel; out-of-bounds coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, argb: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = argb;
        }
    }

    /// Read one pixel; `None` when out of bounds
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some(self.pixels[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// Blit a texture centered on `center`, scaled and rotated
    ///
    /// Nearest-neighbor sampling via the inverse transform; fully
    /// transparent texels (alpha 0) are skipped. A non-positive scale
    /// produces no output.
    pub fn blit(&mut self, texture: &Texture, center: Vec2, scale: f32, rotation: f32) {
        if scale <= 0.0 || texture.width() == 0 || texture.height() == 0 {
            return;
        }
        let half_w = texture.width() as f32 * 0.5;
        let half_h = texture.height() as f32 * 0.5;
        // Conservative destination bounds: the rotated sprite fits inside a
        // circle of this radius around the center.
        let radius = scale * (half_w * half_w + half_h * half_h).sqrt();
        let min_x = (center.x - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let max_y = (center.y + radius).ceil() as i32;

        let (sin, cos) = rotation.sin_cos();
        let inv_scale = 1.0 / scale;

        for dest_y in min_y..=max_y {
            for dest_x in min_x..=max_x {
                let dx = dest_x as f32 - center.x;
                let dy = dest_y as f32 - center.y;
                // Inverse rotation, then inverse scale, into texture space.
                let tx = (dx * cos + dy * sin) * inv_scale + half_w;
                let ty = (-dx * sin + dy * cos) * inv_scale + half_h;
                if tx < 0.0 || ty < 0.0 {
                    continue;
                }
                let Some(texel) = texture.pixel(tx as u32, ty as u32) else {
                    continue;
                };
                if texel >> 24 == 0 {
                    continue;
                }
                self.set_pixel(dest_x, dest_y, texel);
            }
        }
    }
}
