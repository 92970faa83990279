//! Chunk - one vertical slice of the world.
//!
//! A chunk spans [`CHUNK_WIDTH`] columns and the full [`WORLD_HEIGHT`] of the
//! world. It owns its tile grid and the dropped items lying inside it, and
//! knows nothing about its neighbors.

use super::surface::TileGrid;
use crate::coords::{CHUNK_WIDTH, ChunkIndex, WORLD_HEIGHT, chunk_origin_x};
use crate::item::DroppedItem;
use crate::tile::Tile;

/// A chunk of the world containing tile data.
pub struct Chunk {
  /// Horizontal position of this chunk in chunk units.
  index: ChunkIndex,
  /// Tile cells, `None` where empty.
  pub tiles: TileGrid,
  /// Items dropped inside this chunk.
  pub items: Vec<DroppedItem>,
}

impl Chunk {
  /// Creates an all-empty chunk at the given index.
  pub fn new(index: ChunkIndex) -> Self {
    Self {
      index,
      tiles: TileGrid::new(CHUNK_WIDTH, WORLD_HEIGHT),
      items: Vec::new(),
    }
  }

  /// Returns the chunk index.
  #[inline]
  pub fn index(&self) -> ChunkIndex {
    self.index
  }

  /// Returns the global tile x of local column 0.
  #[inline]
  pub fn origin_x(&self) -> i64 {
    chunk_origin_x(self.index)
  }

  /// Returns the tile at local (x, y), or `None` if empty or out of bounds.
  #[inline]
  pub fn tile(&self, x: u32, y: u32) -> Option<Tile> {
    self.tiles.get(x, y).copied().flatten()
  }

  /// Writes local cell (x, y). Out-of-bounds writes are ignored.
  #[inline]
  pub fn set_tile(&mut self, x: u32, y: u32, tile: Option<Tile>) {
    self.tiles.set(x, y, tile);
  }

  /// Returns the number of occupied cells.
  pub fn occupied_count(&self) -> usize {
    self.tiles.as_slice().iter().filter(|t| t.is_some()).count()
  }

  /// Iterates occupied cells column by column: x ascending, and y ascending
  /// within each column.
  pub fn iter_occupied(&self) -> impl Iterator<Item = (u32, u32, Tile)> + '_ {
    (0..CHUNK_WIDTH).flat_map(move |x| {
      (0..WORLD_HEIGHT).filter_map(move |y| self.tile(x, y).map(|tile| (x, y, tile)))
    })
  }

  /// Spawns an item in this chunk.
  pub fn spawn_item(&mut self, item: DroppedItem) {
    self.items.push(item);
  }

  /// Removes items flagged dead since the last prune.
  ///
  /// Returns how many were removed.
  pub fn remove_dead_entities(&mut self) -> usize {
    let before = self.items.len();
    self.items.retain(|item| !item.dead);
    before - self.items.len()
  }
}
