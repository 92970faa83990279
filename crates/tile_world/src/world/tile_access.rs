//! Tile read/write API for `ChunkMap`.
//!
//! These methods provide world-coordinate tile access, translating
//! `TilePos` to chunk+local coordinates and generating chunks on demand.
//! Rows outside `[0, WORLD_HEIGHT)` read as empty and ignore writes.

use super::ChunkMap;
use crate::coords::{TilePos, chunk_index_at};
use crate::item::DroppedItem;
use crate::tile::Tile;

impl ChunkMap {
  /// Returns the tile at the given world position.
  ///
  /// Returns None for empty cells and for rows outside the world. Generates
  /// the containing chunk if it is not resident.
  pub fn get_tile(&mut self, pos: TilePos) -> Option<Tile> {
    if !pos.is_in_vertical_range() {
      return None;
    }
    let (index, local) = pos.to_chunk_and_local();
    self
      .get_or_create_chunk(index)
      .tile(local.x as u32, local.y as u32)
  }

  /// Returns the tile at the given world position without generating.
  ///
  /// Returns None if the containing chunk is not resident.
  pub fn peek_tile(&self, pos: TilePos) -> Option<Tile> {
    if !pos.is_in_vertical_range() {
      return None;
    }
    let (index, local) = pos.to_chunk_and_local();
    self.chunk(index)?.tile(local.x as u32, local.y as u32)
  }

  /// Writes the cell at the given world position.
  ///
  /// Writes outside the world's rows are ignored.
  pub fn set_tile(&mut self, pos: TilePos, tile: Option<Tile>) {
    if !pos.is_in_vertical_range() {
      return;
    }
    let (index, local) = pos.to_chunk_and_local();
    self
      .get_or_create_chunk(index)
      .set_tile(local.x as u32, local.y as u32, tile);
  }

  /// Places a tile, respecting replaceability.
  ///
  /// Returns false without changing anything if `tile` is empty or the cell
  /// holds a tile that is not replaceable. Rows outside the world hold no
  /// tile, so placing there succeeds and the write is dropped.
  pub fn place_tile(&mut self, pos: TilePos, tile: Option<Tile>) -> bool {
    let Some(tile) = tile else {
      return false;
    };
    if let Some(existing) = self.get_tile(pos) {
      if !self.registry().is_replaceable(existing) {
        log::trace!("refused placement at {:?} over {:?}", pos, existing.id);
        return false;
      }
    }
    self.set_tile(pos, Some(tile));
    true
  }

  /// Destroys the tile at the given world position.
  ///
  /// Spawns the tile's drop at the cell center when `harvest_level` is high
  /// enough, then clears the cell. Does nothing if the cell is empty.
  pub fn destroy_tile(&mut self, pos: TilePos, harvest_level: u8) {
    let Some(tile) = self.get_tile(pos) else {
      return;
    };
    if let Some(item) = self.registry().drop_item(tile, pos.x, pos.y, harvest_level) {
      self.spawn_item(item);
    }
    self.set_tile(pos, None);
  }

  /// Adds an item to the chunk whose columns contain it.
  pub fn spawn_item(&mut self, item: DroppedItem) {
    self.get_or_create_chunk(chunk_index_at(item.x)).spawn_item(item);
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::seeding::FlatGenerator;
  use crate::tile::{TileRegistry, ids};

  fn empty_map() -> ChunkMap {
    ChunkMap::new(
      Arc::new(FlatGenerator::new(0, 0)),
      Arc::new(TileRegistry::new()),
    )
  }

  #[test]
  fn peek_never_generates() {
    let map = empty_map();
    assert!(map.peek_tile(TilePos::new(10, 10)).is_none());
    assert!(map.is_empty());
  }

  #[test]
  fn get_generates_containing_chunk() {
    let mut map = empty_map();
    assert!(map.get_tile(TilePos::new(-1, 10)).is_none());
    assert!(map.is_chunk_loaded(-1));
  }

  #[test]
  fn out_of_range_rows_are_not_generated() {
    let mut map = empty_map();
    map.set_tile(TilePos::new(0, 256), Some(Tile::new(ids::DIRT)));
    assert!(map.get_tile(TilePos::new(0, -1)).is_none());
    assert!(map.is_empty());
  }

  #[test]
  fn placing_over_replaceable_tile_succeeds() {
    let mut map = empty_map();
    let pos = TilePos::new(5, 5);
    map.set_tile(pos, Some(Tile::new(ids::TALL_GRASS)));
    assert!(map.place_tile(pos, Some(Tile::new(ids::PLANKS))));
    assert_eq!(map.peek_tile(pos), Some(Tile::new(ids::PLANKS)));
  }

  #[test]
  fn items_land_in_the_chunk_of_their_column() {
    let mut map = empty_map();
    let pos = TilePos::new(-1, 20);
    map.set_tile(pos, Some(Tile::new(ids::DIRT)));
    map.destroy_tile(pos, 0);

    let items = &map.chunk(-1).unwrap().items;
    assert_eq!(items.len(), 1);
    assert_eq!((items[0].x, items[0].y), (-0.5, 20.5));
  }
}
