//! Coordinate types and spatial constants.
//!
//! Defines the coordinate system for the world:
//! - [`TilePos`]: Absolute tile position (i64 x for an unbounded horizontal
//!   axis)
//! - [`ChunkIndex`]: Horizontal chunk index (i64, so every tile column has
//!   a chunk)
//! - [`LocalPos`]: Position within a chunk (u16)
//! - [`CellSpan`]: Inclusive cell range covered by an axis-aligned box
//!
//! The world is unbounded only horizontally. Vertically it spans exactly
//! [`WORLD_HEIGHT`] tiles, with Y+ up and row 0 at the bottom.

/// Width of a chunk in tiles.
pub const CHUNK_WIDTH: u32 = 256;

/// Height of the world (and of every chunk) in tiles.
pub const WORLD_HEIGHT: u32 = 256;

/// Local x offset past which the chunk to the right is loaded ahead.
///
/// At or below this offset the chunk to the left is loaded instead.
pub const LOAD_AHEAD_THRESHOLD: u32 = CHUNK_WIDTH / 2;

/// Resident chunks further than this many chunks from the player's chunk are
/// evicted.
pub const EVICTION_DISTANCE: u64 = 2;

/// Horizontal chunk index.
pub type ChunkIndex = i64;

/// Absolute tile position in the world grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePos {
  pub x: i64,
  pub y: i64,
}

impl TilePos {
  /// Creates a new tile position.
  pub const fn new(x: i64, y: i64) -> Self {
    Self { x, y }
  }

  /// Returns the tile containing the given continuous position.
  pub fn containing(x: f64, y: f64) -> Self {
    Self::new(x.floor() as i64, y.floor() as i64)
  }

  /// Returns true if `y` lies within `[0, WORLD_HEIGHT)`.
  #[inline]
  pub fn is_in_vertical_range(self) -> bool {
    (0..WORLD_HEIGHT as i64).contains(&self.y)
  }

  /// Convert to chunk index and local offset.
  ///
  /// Uses floor division for correct negative coordinate handling.
  /// For example, tile x = -1 maps to chunk -1 with local x 255.
  ///
  /// The local y is only meaningful when [`Self::is_in_vertical_range`]
  /// holds; callers are expected to check that first.
  pub fn to_chunk_and_local(self) -> (ChunkIndex, LocalPos) {
    let width = CHUNK_WIDTH as i64;
    let chunk = self.x.div_euclid(width);
    let lx = self.x.rem_euclid(width) as u16;
    let ly = self.y.clamp(0, WORLD_HEIGHT as i64 - 1) as u16;
    (chunk, LocalPos::new(lx, ly))
  }
}

/// Position within a chunk (0 to CHUNK_WIDTH-1, 0 to WORLD_HEIGHT-1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalPos {
  pub x: u16,
  pub y: u16,
}

impl LocalPos {
  /// Creates a new local position.
  pub const fn new(x: u16, y: u16) -> Self {
    Self { x, y }
  }
}

/// Returns the global tile x of the left edge of a chunk.
#[inline]
///
/// Saturates for indices whose left edge lies outside the `i64` range.
pub fn chunk_origin_x(index: ChunkIndex) -> i64 {
  index.saturating_mul(CHUNK_WIDTH as i64)
}

/// Returns the index of the chunk containing continuous horizontal position
/// `x`.
pub fn chunk_index_at(x: f64) -> ChunkIndex {
  (x / CHUNK_WIDTH as f64).floor() as ChunkIndex
}

/// Returns the whole-tile offset of `x` within its chunk, in `[0, CHUNK_WIDTH)`.
///
/// The remainder is truncated toward zero before negative values wrap, so
/// -127.5 is offset 129 and -0.5 is offset 0.
pub fn local_offset_at(x: f64) -> u32 {
  let width = CHUNK_WIDTH as i64;
  let offset = (x % CHUNK_WIDTH as f64) as i64;
  if offset < 0 {
    (offset + width) as u32
  } else {
    offset as u32
  }
}

/// Inclusive range of tile cells covered by an axis-aligned box.
///
/// Built by [`CellSpan::covering`] from the half-open box
/// `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
  pub min_x: i64,
  pub min_y: i64,
  pub max_x: i64,
  pub max_y: i64,
}

impl CellSpan {
  /// Computes the cells covered by a box.
  ///
  /// A far edge that lands exactly on a cell boundary does not cover the cell
  /// beyond it: a box of width 1 at x = 5 covers column 5 only.
  pub fn covering(x: f64, y: f64, width: f64, height: f64) -> Self {
    let far_x = x + width;
    let far_y = y + height;
    let mut max_x = far_x.floor() as i64;
    let mut max_y = far_y.floor() as i64;
    if max_x as f64 == far_x {
      max_x -= 1;
    }
    if max_y as f64 == far_y {
      max_y -= 1;
    }
    Self {
      min_x: x.floor() as i64,
      min_y: y.floor() as i64,
      max_x,
      max_y,
    }
  }

  /// Returns true if the span covers no cells.
  pub fn is_empty(&self) -> bool {
    self.max_x < self.min_x || self.max_y < self.min_y
  }

  /// Iterates cells in scan order: x ascending, and y ascending within each
  /// column.
  pub fn iter(&self) -> impl Iterator<Item = TilePos> {
    let (min_y, max_y) = (self.min_y, self.max_y);
    (self.min_x..=self.max_x).flat_map(move |x| (min_y..=max_y).map(move |y| TilePos::new(x, y)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn negative_x_maps_to_previous_chunk() {
    let (chunk, local) = TilePos::new(-1, 10).to_chunk_and_local();
    assert_eq!(chunk, -1);
    assert_eq!(local, LocalPos::new(255, 10));

    let (chunk, local) = TilePos::new(-256, 0).to_chunk_and_local();
    assert_eq!(chunk, -1);
    assert_eq!(local.x, 0);

    let (chunk, local) = TilePos::new(-257, 0).to_chunk_and_local();
    assert_eq!(chunk, -2);
    assert_eq!(local.x, 255);
  }

  #[test]
  fn chunk_and_local_recompose_to_x() {
    for x in -1000i64..1000 {
      let (chunk, local) = TilePos::new(x, 0).to_chunk_and_local();
      assert_eq!(chunk_origin_x(chunk) + local.x as i64, x);
      assert!((local.x as u32) < CHUNK_WIDTH);
    }
  }

  #[test]
  fn vertical_range_is_zero_to_255() {
    assert!(TilePos::new(0, 0).is_in_vertical_range());
    assert!(TilePos::new(0, 255).is_in_vertical_range());
    assert!(!TilePos::new(0, -1).is_in_vertical_range());
    assert!(!TilePos::new(0, 256).is_in_vertical_range());
  }

  #[test]
  fn continuous_position_to_chunk() {
    assert_eq!(chunk_index_at(300.0), 1);
    assert_eq!(local_offset_at(300.0), 44);
    assert_eq!(chunk_index_at(450.0), 1);
    assert_eq!(local_offset_at(450.0), 194);
    assert_eq!(chunk_index_at(-0.5), -1);
    assert_eq!(local_offset_at(-0.5), 0);
    assert_eq!(chunk_index_at(-10.0), -1);
    assert_eq!(local_offset_at(-10.0), 246);
  }

  #[test]
  fn negative_fractional_offsets_truncate_before_wrapping() {
    assert_eq!(local_offset_at(-127.5), 129);
    assert_eq!(local_offset_at(-127.9), 129);
    assert_eq!(local_offset_at(-128.5), 128);
    assert_eq!(local_offset_at(-256.0), 0);
  }

  #[test]
  fn far_tiles_keep_distinct_chunks() {
    let far = 1i64 << 50;
    let (chunk, local) = TilePos::new(far + 3, 0).to_chunk_and_local();
    assert_eq!(chunk, far / CHUNK_WIDTH as i64);
    assert_eq!(chunk_origin_x(chunk) + local.x as i64, far + 3);

    let (left, _) = TilePos::new(i64::MIN, 0).to_chunk_and_local();
    let (right, _) = TilePos::new(i64::MAX, 0).to_chunk_and_local();
    assert_eq!(left, i64::MIN / CHUNK_WIDTH as i64);
    assert_eq!(right, i64::MAX / CHUNK_WIDTH as i64);
    assert_ne!(left, right);
  }

  #[test]
  fn span_excludes_cell_on_exact_far_edge() {
    let span = CellSpan::covering(5.0, 2.0, 1.0, 1.0);
    assert_eq!(span.min_x, 5);
    assert_eq!(span.max_x, 5);
    assert_eq!(span.iter().collect::<Vec<_>>(), vec![TilePos::new(5, 2)]);
  }

  #[test]
  fn span_includes_partially_covered_cells() {
    let span = CellSpan::covering(4.5, 2.25, 1.0, 1.0);
    assert_eq!((span.min_x, span.max_x), (4, 5));
    assert_eq!((span.min_y, span.max_y), (2, 3));
  }

  #[test]
  fn span_scans_columns_outer_rows_inner() {
    let cells: Vec<_> = CellSpan::covering(0.0, 0.0, 2.0, 2.0).iter().collect();
    assert_eq!(
      cells,
      vec![
        TilePos::new(0, 0),
        TilePos::new(0, 1),
        TilePos::new(1, 0),
        TilePos::new(1, 1),
      ]
    );
  }

  #[test]
  fn zero_sized_box_at_integer_covers_nothing() {
    assert!(CellSpan::covering(3.0, 3.0, 0.0, 0.0).is_empty());
    assert_eq!(CellSpan::covering(3.0, 3.0, 0.0, 0.0).iter().count(), 0);
  }
}
