//! Scrolling starfield tile grid
//!
//! The viewport is tiled with one extra column and two extra rows of
//! overscan so no gap ever shows while rows wrap from the bottom edge back
//! to the top. Resizing tears the grid down and rebuilds it; there is no
//! incremental patching.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::state::Viewport;

/// Tiles closer than this on the y axis belong to the same row
const ROW_EPSILON: f32 = 1.0;

/// One background tile: a top-left corner position and a texture variant id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: Vec2,
    /// Star texture variant, 1..=[`TILE_VARIANTS`]
    pub variant: u8,
}

/// The scrolling tile grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub tiles: Vec<Tile>,
    cols: usize,
    rows: usize,
}

impl Background {
    pub fn new(viewport: &Viewport, rng: &mut Pcg32) -> Self {
        let mut background = Self {
            tiles: Vec::new(),
            cols: 0,
            rows: 0,
        };
        background.rebuild(viewport, rng);
        background
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Tear down and rebuild the grid at the viewport's dimensions.
    ///
    /// Variants are drawn uniformly from the palette with a single retry
    /// when the draw repeats the previous tile's variant in row-major scan
    /// order - visually non-repetitive, not fully deduplicated.
    pub fn rebuild(&mut self, viewport: &Viewport, rng: &mut Pcg32) {
        self.cols = (viewport.width / TILE_SIZE).ceil() as usize + 1;
        self.rows = (viewport.height / TILE_SIZE).ceil() as usize + 2;

        self.tiles.clear();
        self.tiles.reserve(self.cols * self.rows);

        let mut previous = 1u8;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let mut variant = rng.random_range(1..=TILE_VARIANTS);
                if variant == previous {
                    variant = rng.random_range(1..=TILE_VARIANTS);
                }
                previous = variant;

                self.tiles.push(Tile {
                    pos: Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE),
                    variant,
                });
            }
        }
    }

    /// Scroll every tile down by `scroll_speed * dt`, then wrap any row
    /// that reached the viewport's bottom edge back above the topmost row.
    ///
    /// The wrap moves the full row atomically: every tile within
    /// [`ROW_EPSILON`] of the triggering tile's y is repositioned to
    /// `min_y - TILE_SIZE + 1`, preserving horizontal order.
    pub fn advance(&mut self, dt: f32, scroll_speed: f32, viewport: &Viewport) {
        for tile in &mut self.tiles {
            tile.pos.y += scroll_speed * dt;
        }

        for i in 0..self.tiles.len() {
            let row_y = self.tiles[i].pos.y;
            if row_y < viewport.height {
                continue;
            }
            let top_y = self
                .tiles
                .iter()
                .fold(viewport.height, |top, t| top.min(t.pos.y));
            let wrapped_y = top_y - TILE_SIZE + 1.0;
            for tile in &mut self.tiles {
                if (tile.pos.y - row_y).abs() < ROW_EPSILON {
                    tile.pos.y = wrapped_y;
                }
            }
        }
    }
}
