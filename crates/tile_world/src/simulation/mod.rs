//! Per-tile update rules.
//!
//! Each tile kind declares a [`TileUpdate`] behavior in the registry; the
//! world's update sweep calls [`update_tile`] for every occupied cell of every
//! resident chunk. Rules only read and write the chunk they are given.

pub mod hash;

use hash::hash41iu64;

use crate::coords::WORLD_HEIGHT;
use crate::primitives::Chunk;
use crate::tile::{Tile, TileRegistry, TileUpdate, ids};

/// Salt separating growth rolls from other hash consumers.
const GROWTH_SALT: i64 = 0x6772_6f77;

/// Context passed to update rules for deterministic randomness.
#[derive(Clone, Copy, Debug)]
pub struct TickContext {
  /// World seed.
  pub seed: i64,
  /// Tick being simulated.
  pub tick: u64,
}

/// Runs the update hook of the tile at local (x, y).
///
/// Does nothing if the cell is empty.
pub fn update_tile(registry: &TileRegistry, chunk: &mut Chunk, x: u32, y: u32, ctx: TickContext) {
  let Some(tile) = chunk.tile(x, y) else {
    return;
  };

  match registry.get(tile.id).update {
    TileUpdate::None => {}
    TileUpdate::Smother { into } => {
      let covered = y + 1 < WORLD_HEIGHT
        && chunk
          .tile(x, y + 1)
          .is_some_and(|above| registry.is_full_tile(above));
      if covered {
        chunk.set_tile(x, y, Some(Tile::new(into)));
      }
    }
    TileUpdate::Grow { stages, odds } => {
      let gx = chunk.origin_x() + x as i64;
      let roll = hash41iu64(ctx.seed ^ GROWTH_SALT, gx, y as i64, ctx.tick as i64);
      if odds > 1 && roll % odds as u64 != 0 {
        return;
      }
      let stage = tile.state.saturating_add(1);
      if stage < stages || !place_tree(chunk, x, y, 4) {
        chunk.set_tile(
          x,
          y,
          Some(Tile {
            state: stage.min(stages),
            ..tile
          }),
        );
      }
    }
    TileUpdate::NeedsSupport => {
      if y == 0 || chunk.tile(x, y - 1).is_none() {
        chunk.set_tile(x, y, None);
      }
    }
  }
}

/// Grows a tree whose trunk starts at local (x, y).
///
/// The trunk is `height` logs tall, topped by a leaf canopy. The tree is only
/// placed if it fits entirely inside the chunk and every trunk cell above the
/// base is empty; leaves fill empty cells only. Returns true if placed.
pub fn place_tree(chunk: &mut Chunk, x: u32, y: u32, height: u32) -> bool {
  let top = y + height;
  if x < 2 || x + 2 >= chunk.tiles.width() || top + 2 >= WORLD_HEIGHT {
    return false;
  }
  if (y + 1..y + height).any(|ty| chunk.tile(x, ty).is_some()) {
    return false;
  }

  for ty in y..y + height {
    chunk.set_tile(x, ty, Some(Tile::new(ids::LOG)));
  }
  for ly in top - 1..=top + 1 {
    let radius = if ly == top + 1 { 1 } else { 2 };
    for lx in x - radius..=x + radius {
      if chunk.tile(lx, ly).is_none() {
        chunk.set_tile(lx, ly, Some(Tile::new(ids::LEAVES)));
      }
    }
  }
  true
}
