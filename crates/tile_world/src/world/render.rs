//! Backend-neutral world drawing.
//!
//! The world draws itself onto a [`TileCanvas`] in screen units centered on
//! a [`View`]. Drawing is a pure read: it visits resident chunks only and
//! never generates or mutates anything.

use bevy::color::Srgba;
use bevy::math::Vec2;

use super::ChunkMap;
use crate::config::RenderConfig;
use crate::coords::{CHUNK_WIDTH, WORLD_HEIGHT};
use crate::tile::{CollisionType, Tile, TileRegistry};

/// Background color.
pub const SKY_COLOR: Srgba = Srgba::rgb(102.0 / 255.0, 178.0 / 255.0, 255.0 / 255.0);
/// Color of the chunk-boundary markers.
pub const CHUNK_MARKER_COLOR: Srgba = Srgba::rgb(255.0 / 255.0, 0.0 / 255.0, 0.0 / 255.0);
/// Side length of a dropped item, in tiles.
const ITEM_SIZE: f64 = 0.4;
/// Side length of a non-blocking tile (saplings, tall grass), in tiles.
const DECOR_SIZE: f64 = 0.6;

/// Drawing target for the world.
///
/// Positions and sizes are in screen units, Y+ up, with the origin at the
/// view center.
pub trait TileCanvas {
  /// Fills the whole canvas.
  fn clear(&mut self, color: Srgba);
  /// Draws an axis-aligned rectangle.
  fn rect(&mut self, center: Vec2, size: Vec2, color: Srgba);
  /// Draws a line segment.
  fn line(&mut self, start: Vec2, end: Vec2, color: Srgba);
}

/// Visible world rectangle and its mapping to screen units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
  /// World position shown at the screen origin.
  pub center_x: f64,
  pub center_y: f64,
  /// Half extents of the visible area, in tiles.
  pub half_width: f64,
  pub half_height: f64,
  /// Screen units per tile.
  pub tile_pixels: f32,
}

impl View {
  /// Creates a view centered on (x, y) with the configured size.
  pub fn new(center_x: f64, center_y: f64, config: &RenderConfig) -> Self {
    Self {
      center_x,
      center_y,
      half_width: config.view_width / 2.0,
      half_height: config.view_height / 2.0,
      tile_pixels: config.tile_pixels,
    }
  }

  /// Maps a world position to screen units.
  ///
  /// The offset from the center is taken in f64 so distant positions keep
  /// full precision.
  pub fn to_screen(&self, x: f64, y: f64) -> Vec2 {
    let px = self.tile_pixels as f64;
    Vec2::new(
      ((x - self.center_x) * px) as f32,
      ((y - self.center_y) * px) as f32,
    )
  }

  /// Maps a screen position back to world units.
  pub fn to_world(&self, screen: Vec2) -> (f64, f64) {
    let px = self.tile_pixels as f64;
    (
      self.center_x + screen.x as f64 / px,
      self.center_y + screen.y as f64 / px,
    )
  }

  /// Returns true if any part of cell (x, y) is visible.
  pub fn cell_visible(&self, x: i64, y: i64) -> bool {
    let (x, y) = (x as f64, y as f64);
    x + 1.0 > self.center_x - self.half_width
      && x < self.center_x + self.half_width
      && y + 1.0 > self.center_y - self.half_height
      && y < self.center_y + self.half_height
  }

  /// Converts a size in tiles to screen units.
  pub fn scale(&self, width: f64, height: f64) -> Vec2 {
    Vec2::new(width as f32, height as f32) * self.tile_pixels
  }
}

/// Draws one tile at cell (x, y).
///
/// Blocking tiles fill their cell; non-blocking ones are drawn smaller and
/// resting on the cell floor.
pub fn render_tile(
  registry: &TileRegistry,
  canvas: &mut impl TileCanvas,
  view: &View,
  tile: Tile,
  x: i64,
  y: i64,
) {
  let def = registry.get(tile.id);
  let (x, y) = (x as f64, y as f64);
  match def.collision {
    CollisionType::FullTile => {
      canvas.rect(view.to_screen(x + 0.5, y + 0.5), view.scale(1.0, 1.0), def.color);
    }
    CollisionType::None => {
      canvas.rect(
        view.to_screen(x + 0.5, y + DECOR_SIZE / 2.0),
        view.scale(DECOR_SIZE, DECOR_SIZE),
        def.color,
      );
    }
  }
}

impl ChunkMap {
  /// Draws every visible tile and item of the resident chunks.
  ///
  /// Occupied cells at local x 0 and 255 also get a boundary marker.
  pub fn render(&self, canvas: &mut impl TileCanvas, view: &View) {
    let registry = self.registry();
    for chunk in self.chunks() {
      let origin = chunk.origin_x();
      for lx in 0..CHUNK_WIDTH {
        let x = origin + lx as i64;
        for y in 0..WORLD_HEIGHT {
          let y = y as i64;
          if !view.cell_visible(x, y) {
            continue;
          }
          let Some(tile) = chunk.tile(lx, y as u32) else {
            continue;
          };
          render_tile(registry, canvas, view, tile, x, y);
          if lx == 0 || lx == CHUNK_WIDTH - 1 {
            let mid = x as f64 + 0.5;
            canvas.line(
              view.to_screen(mid, y as f64),
              view.to_screen(mid, y as f64 + 1.0),
              CHUNK_MARKER_COLOR,
            );
          }
        }
      }

      for item in chunk.items.iter().filter(|item| !item.dead) {
        canvas.rect(
          view.to_screen(item.x, item.y),
          view.scale(ITEM_SIZE, ITEM_SIZE),
          registry.get(item.item).color,
        );
      }
    }
  }
}
