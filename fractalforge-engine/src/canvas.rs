//! Render target abstraction and the software raster canvas.

use fractalforge_core::{backing_dimensions, Rgba};

use crate::tiles::PixelRect;

/// The drawing surface handed to renderers.
///
/// Exposes a backing buffer (sized through [`resize_to_scale`] before each
/// pass),
/// tile blits for the per-pixel renderers, and segment/triangle primitives
/// for the geometric renderers. Every blit returns control to the target
/// owner, making it a cooperative yield point.
pub trait RenderTarget {
    /// Current backing buffer width in pixels.
    fn backing_width(&self) -> u32;

    /// Current backing buffer height in pixels.
    fn backing_height(&self) -> u32;

    /// Logical display size this surface is presented at.
    fn display_size(&self) -> (f64, f64);

    /// Device pixel ratio of the presenting display.
    fn pixel_ratio(&self) -> f64;

    /// Resize the backing buffer. Implementations reallocate only when the
    /// dimensions actually change.
    fn resize(&mut self, width: u32, height: u32);

    fn clear(&mut self, color: Rgba);

    /// Copy a block of RGBA8 pixels into the buffer. `pixels` is row-major
    /// and must contain exactly `rect.area()` entries.
    fn blit_tile(&mut self, rect: PixelRect, pixels: &[[u8; 4]]);

    fn stroke_segment(&mut self, a: (f64, f64), b: (f64, f64), line_width: f64, color: Rgba);

    fn fill_triangle(&mut self, a: (f64, f64), b: (f64, f64), c: (f64, f64), color: Rgba);
}

/// Resize a target's backing buffer for the given resolution scale and
/// return the new dimensions. Shared by all renderers so every pass sizes
/// the buffer identically.
pub fn resize_to_scale(canvas: &mut dyn RenderTarget, resolution_scale: f64) -> (u32, u32) {
    let (display_width, display_height) = canvas.display_size();
    let (width, height) = backing_dimensions(
        display_width,
        display_height,
        canvas.pixel_ratio(),
        resolution_scale,
    );
    canvas.resize(width, height);
    (width, height)
}

/// In-memory RGBA8 canvas.
pub struct PixelCanvas {
    display_width: f64,
    display_height: f64,
    pixel_ratio: f64,
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl PixelCanvas {
    pub fn new(display_width: f64, display_height: f64, pixel_ratio: f64) -> Self {
        Self {
            display_width,
            display_height,
            pixel_ratio,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }
}

impl RenderTarget for PixelCanvas {
    fn backing_width(&self) -> u32 {
        self.width
    }

    fn backing_height(&self) -> u32 {
        self.height
    }

    fn display_size(&self) -> (f64, f64) {
        (self.display_width, self.display_height)
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0, 255]; (width * height) as usize];
    }

    fn clear(&mut self, color: Rgba) {
        let rgba = color.to_rgba8();
        for pixel in &mut self.pixels {
            *pixel = rgba;
        }
    }

    fn blit_tile(&mut self, rect: PixelRect, pixels: &[[u8; 4]]) {
        debug_assert_eq!(pixels.len(), rect.area() as usize);
        for row in 0..rect.height {
            let y = rect.y + row;
            if y >= self.height {
                break;
            }
            for col in 0..rect.width {
                let x = rect.x + col;
                if x >= self.width {
                    break;
                }
                self.pixels[(y * self.width + x) as usize] =
                    pixels[(row * rect.width + col) as usize];
            }
        }
    }

    fn stroke_segment(&mut self, a: (f64, f64), b: (f64, f64), line_width: f64, color: Rgba) {
        let rgba = color.to_rgba8();
        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
        let radius = (line_width / 2.0).max(0.5);
        let brush = radius.ceil() as i64;

        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let cx = a.0 + dx * t;
            let cy = a.1 + dy * t;
            for oy in -brush..=brush {
                for ox in -brush..=brush {
                    let px = cx + ox as f64;
                    let py = cy + oy as f64;
                    if (px - cx).hypot(py - cy) <= radius {
                        self.set_pixel(px.round() as i64, py.round() as i64, rgba);
                    }
                }
            }
        }
    }

    fn fill_triangle(&mut self, a: (f64, f64), b: (f64, f64), c: (f64, f64), color: Rgba) {
        let rgba = color.to_rgba8();
        let min_x = a.0.min(b.0).min(c.0).floor().max(0.0) as u32;
        let max_x = a.0.max(b.0).max(c.0).ceil().min(self.width as f64) as u32;
        let min_y = a.1.min(b.1).min(c.1).floor().max(0.0) as u32;
        let max_y = a.1.max(b.1).max(c.1).ceil().min(self.height as f64) as u32;

        let edge = |p: (f64, f64), q: (f64, f64), x: f64, y: f64| {
            (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
        };

        for y in min_y..max_y {
            for x in min_x..max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;
                let w0 = edge(a, b, px, py);
                let w1 = edge(b, c, px, py);
                let w2 = edge(c, a, px, py);
                let inside =
                    (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0) || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
                if inside {
                    self.pixels[(y * self.width + x) as usize] = rgba;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_allocates_and_is_stable() {
        let mut canvas = PixelCanvas::new(100.0, 50.0, 1.0);
        canvas.resize(10, 5);
        assert_eq!(canvas.pixels().len(), 50);

        // Same dimensions: buffer identity preserved (no reallocation).
        canvas.blit_tile(PixelRect::new(0, 0, 1, 1), &[[9, 9, 9, 255]]);
        canvas.resize(10, 5);
        assert_eq!(canvas.pixel(0, 0), [9, 9, 9, 255]);

        // Different dimensions: fresh buffer.
        canvas.resize(5, 5);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn blit_tile_writes_row_major_block() {
        let mut canvas = PixelCanvas::new(4.0, 4.0, 1.0);
        canvas.resize(4, 4);
        canvas.blit_tile(
            PixelRect::new(1, 2, 2, 1),
            &[[10, 0, 0, 255], [20, 0, 0, 255]],
        );
        assert_eq!(canvas.pixel(1, 2), [10, 0, 0, 255]);
        assert_eq!(canvas.pixel(2, 2), [20, 0, 0, 255]);
        assert_eq!(canvas.pixel(0, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn blit_tile_clips_at_buffer_edge() {
        let mut canvas = PixelCanvas::new(4.0, 4.0, 1.0);
        canvas.resize(4, 4);
        canvas.blit_tile(
            PixelRect::new(3, 3, 2, 2),
            &[[1, 1, 1, 255], [2, 2, 2, 255], [3, 3, 3, 255], [4, 4, 4, 255]],
        );
        assert_eq!(canvas.pixel(3, 3), [1, 1, 1, 255]);
    }

    #[test]
    fn clear_floods_the_buffer() {
        let mut canvas = PixelCanvas::new(3.0, 3.0, 1.0);
        canvas.resize(3, 3);
        canvas.clear(Rgba::opaque(1.0, 0.0, 0.0));
        assert!(canvas.pixels().iter().all(|p| *p == [255, 0, 0, 255]));
    }

    #[test]
    fn stroke_covers_segment_endpoints() {
        let mut canvas = PixelCanvas::new(16.0, 16.0, 1.0);
        canvas.resize(16, 16);
        canvas.stroke_segment((2.0, 8.0), (13.0, 8.0), 1.0, Rgba::opaque(1.0, 1.0, 1.0));
        assert_eq!(canvas.pixel(2, 8), [255, 255, 255, 255]);
        assert_eq!(canvas.pixel(13, 8), [255, 255, 255, 255]);
        assert_eq!(canvas.pixel(8, 8), [255, 255, 255, 255]);
        assert_eq!(canvas.pixel(8, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn fill_triangle_covers_centroid_not_exterior() {
        let mut canvas = PixelCanvas::new(20.0, 20.0, 1.0);
        canvas.resize(20, 20);
        canvas.fill_triangle(
            (10.0, 2.0),
            (2.0, 18.0),
            (18.0, 18.0),
            Rgba::opaque(0.0, 1.0, 0.0),
        );
        assert_eq!(canvas.pixel(10, 12), [0, 255, 0, 255]);
        assert_eq!(canvas.pixel(1, 1), [0, 0, 0, 255]);
        assert_eq!(canvas.pixel(18, 2), [0, 0, 0, 255]);
    }
}
