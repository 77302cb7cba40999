//! Tile-based work partitioning.
//!
//! Divides the image into tiles that can be rendered independently and in
//! parallel. Each tile is handed out as a [`TileView`] holding the only
//! mutable borrow of its pixels, so workers never share a write target.

use crate::Color;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of tile's top-left corner
    pub x: u32,
    /// Y coordinate of tile's top-left corner
    pub y: u32,
    /// Width of the tile in pixels
    pub width: u32,
    /// Height of the tile in pixels
    pub height: u32,
    /// Row-major position of this tile in the grid
    pub index: usize,
}

impl Tile {
    /// Create a new tile.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this tile.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance from the tile center to `(cx, cy)`.
    fn center_distance_sq(&self, cx: f32, cy: f32) -> f32 {
        let tx = self.x as f32 + self.width as f32 / 2.0;
        let ty = self.y as f32 + self.height as f32 / 2.0;
        (tx - cx).powi(2) + (ty - cy).powi(2)
    }
}

/// Split an image into a row-major grid of tiles.
///
/// Tiles on the right and bottom edges are clipped to the image, so every
/// pixel belongs to exactly one tile. A zero tile size yields no tiles.
pub fn partition(width: u32, height: u32, tile_size: u32) -> Vec<Tile> {
    let mut tiles = Vec::new();
    if tile_size == 0 {
        return tiles;
    }

    let mut index = 0;
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let tw = tile_size.min(width - x);
            let th = tile_size.min(height - y);
            tiles.push(Tile::new(x, y, tw, th, index));
            index += 1;
            x += tile_size;
        }
        y += tile_size;
    }

    tiles
}

/// Order tiles by distance from the image center (spiral order).
///
/// Indices are left untouched: they still name the tile's grid position.
pub fn sort_spiral(views: &mut [TileView<'_>], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    views.sort_by(|a, b| {
        let a_dist = a.tile.center_distance_sq(center_x, center_y);
        let b_dist = b.tile.center_distance_sq(center_x, center_y);
        a_dist
            .partial_cmp(&b_dist)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.tile.index.cmp(&b.tile.index))
    });
}

/// Exclusive write access to the pixels of one tile.
pub struct TileView<'a> {
    tile: Tile,
    /// One slice per tile row, top to bottom
    rows: Vec<&'a mut [Color]>,
}

impl<'a> TileView<'a> {
    pub(crate) fn new(tile: Tile) -> Self {
        Self {
            tile,
            rows: Vec::with_capacity(tile.height as usize),
        }
    }

    pub(crate) fn push_row(&mut self, row: &'a mut [Color]) {
        debug_assert_eq!(row.len(), self.tile.width as usize);
        self.rows.push(row);
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    /// Write a pixel using coordinates local to the tile.
    pub fn set(&mut self, local_x: u32, local_y: u32, color: Color) {
        self.rows[local_y as usize][local_x as usize] = color;
    }

    /// Visit every pixel row-major with its image coordinates.
    pub fn for_each_pixel(&mut self, mut f: impl FnMut(u32, u32, &mut Color)) {
        let Tile { x, y, .. } = self.tile;
        for (dy, row) in self.rows.iter_mut().enumerate() {
            for (dx, pixel) in row.iter_mut().enumerate() {
                f(x + dx as u32, y + dy as u32, pixel);
            }
        }
    }
}
