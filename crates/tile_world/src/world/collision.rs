//! Axis-aligned collision queries against the tile grid.
//!
//! Queries go through [`ChunkMap::get_tile`], so probing a non-resident
//! chunk generates it. Only tiles classified [`CollisionType::FullTile`]
//! block.
//!
//! [`CollisionType::FullTile`]: crate::tile::CollisionType::FullTile

use super::ChunkMap;
use crate::coords::{CellSpan, TilePos, WORLD_HEIGHT};

impl ChunkMap {
  /// Tests the single cell containing the point (x, y).
  ///
  /// Returns the cell if it holds a full-tile collider.
  pub fn collision_check_point(&mut self, x: f64, y: f64) -> Option<TilePos> {
    let pos = TilePos::containing(x, y);
    self.is_blocking(pos).then_some(pos)
  }

  /// Tests every cell overlapped by the box `[x, x + width) × [y, y + height)`.
  ///
  /// Cells are scanned x ascending, then y ascending within each column, and
  /// the first full-tile collider found is returned. A box edge lying exactly
  /// on a cell boundary does not reach into the next cell.
  pub fn collision_check_box(&mut self, x: f64, y: f64, width: f64, height: f64) -> Option<TilePos> {
    CellSpan::covering(x, y, width, height)
      .iter()
      .find(|&pos| self.is_blocking(pos))
  }

  /// Returns the row just above the highest blocking tile of column `x`, or
  /// 0 if the column has none.
  pub fn ground_height(&mut self, x: i64) -> i64 {
    (0..WORLD_HEIGHT as i64)
      .rev()
      .find(|&y| self.is_blocking(TilePos::new(x, y)))
      .map_or(0, |y| y + 1)
  }

  fn is_blocking(&mut self, pos: TilePos) -> bool {
    self
      .get_tile(pos)
      .is_some_and(|tile| self.registry().is_full_tile(tile))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::seeding::FlatGenerator;
  use crate::tile::{Tile, TileRegistry, ids};

  fn map_with(cells: &[(i64, i64)]) -> ChunkMap {
    let mut map = ChunkMap::new(
      Arc::new(FlatGenerator::new(0, 0)),
      Arc::new(TileRegistry::new()),
    );
    for &(x, y) in cells {
      map.set_tile(TilePos::new(x, y), Some(Tile::new(ids::STONE)));
    }
    map
  }

  #[test]
  fn point_query_floors_coordinates() {
    let mut map = map_with(&[(-1, 3)]);
    assert_eq!(map.collision_check_point(-0.25, 3.9), Some(TilePos::new(-1, 3)));
    assert_eq!(map.collision_check_point(0.25, 3.9), None);
  }

  #[test]
  fn non_blocking_tiles_are_ignored() {
    let mut map = map_with(&[]);
    map.set_tile(TilePos::new(4, 4), Some(Tile::new(ids::SAPLING)));
    assert_eq!(map.collision_check_box(4.0, 4.0, 1.0, 1.0), None);
  }

  #[test]
  fn scan_prefers_lower_column_then_lower_row() {
    let mut map = map_with(&[(3, 1), (2, 6), (2, 5)]);
    assert_eq!(
      map.collision_check_box(2.0, 0.0, 2.0, 8.0),
      Some(TilePos::new(2, 5))
    );
  }

  #[test]
  fn ground_height_skips_non_blocking_tiles() {
    let mut map = map_with(&[(7, 0), (7, 40)]);
    map.set_tile(TilePos::new(7, 41), Some(Tile::new(ids::TALL_GRASS)));
    assert_eq!(map.ground_height(7), 41);
    assert_eq!(map.ground_height(8), 0);
  }
}
