//! Image buffer the renderer writes into.

use crate::tile::{partition, TileView};
use crate::Color;
use pathlight_math::Interval;

/// Linear RGB pixels in row-major order, top row first.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a new canvas filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Split the canvas into disjoint per-tile views.
    ///
    /// Views come back in the row-major order of [`partition`], so
    /// `views[i].tile().index == i`.
    pub fn tiles_mut(&mut self, tile_size: u32) -> Vec<TileView<'_>> {
        let tiles = partition(self.width, self.height, tile_size);
        if tiles.is_empty() {
            return Vec::new();
        }

        let tile_size = tile_size as usize;
        let columns = (self.width as usize).div_ceil(tile_size);
        let mut views: Vec<TileView<'_>> = tiles.into_iter().map(TileView::new).collect();

        for (y, row) in self.pixels.chunks_mut(self.width as usize).enumerate() {
            let band = y / tile_size;
            for (column, segment) in row.chunks_mut(tile_size).enumerate() {
                views[band * columns + column].push_row(segment);
            }
        }

        views
    }

    /// Convert to 8-bit RGBA, optionally gamma corrected (gamma = 2.0).
    pub fn to_rgba8(&self, gamma: bool) -> Vec<[u8; 4]> {
        self.pixels
            .iter()
            .map(|&color| {
                let color = if gamma {
                    Color::new(
                        linear_to_gamma(color.x),
                        linear_to_gamma(color.y),
                        linear_to_gamma(color.z),
                    )
                } else {
                    color
                };
                color_to_rgba(color)
            })
            .collect()
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
///
/// Channels are clamped to [0, 1] and scaled by 255.99 so that 1.0 maps to
/// 255. Non-finite channels become 0.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |c: f32| {
        let c = if c.is_nan() { 0.0 } else { c };
        (255.99 * Interval::UNIT.clamp(c)) as u8
    };
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut canvas = Canvas::new(4, 3);
        assert_eq!(canvas.pixels().len(), 12);
        canvas.set(3, 2, Color::new(0.1, 0.2, 0.3));
        assert_eq!(canvas.get(3, 2), Color::new(0.1, 0.2, 0.3));
        assert_eq!(canvas.pixels()[11], Color::new(0.1, 0.2, 0.3));
        assert_eq!(canvas.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_color_to_rgba_scaling_and_clamp() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(0.5, 2.0, -1.0)), [127, 255, 0, 255]);
        assert_eq!(color_to_rgba(Color::new(f32::NAN, f32::INFINITY, 0.0)), [0, 255, 0, 255]);
    }

    #[test]
    fn test_to_rgba8_gamma() {
        let mut canvas = Canvas::new(1, 1);
        canvas.set(0, 0, Color::splat(0.25));

        assert_eq!(canvas.to_rgba8(false), vec![[63, 63, 63, 255]]);
        assert_eq!(canvas.to_rgba8(true), vec![[127, 127, 127, 255]]);
    }

    #[test]
    fn test_tiles_mut_indices_match_partition() {
        let mut canvas = Canvas::new(50, 20);
        let views = canvas.tiles_mut(16);
        let tiles = partition(50, 20, 16);

        assert_eq!(views.len(), tiles.len());
        for (i, (view, tile)) in views.iter().zip(&tiles).enumerate() {
            assert_eq!(view.tile(), tile);
            assert_eq!(view.tile().index, i);
        }
        assert!(Canvas::new(8, 8).tiles_mut(0).is_empty());
    }
}
