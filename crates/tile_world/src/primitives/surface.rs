//! Fixed-size 2D grid backing chunk storage.
//!
//! Cells are stored row by row starting from the bottom row, so `(0, 0)` is
//! the bottom-left cell and Y+ points toward the sky like world coordinates.

use crate::tile::Tile;

/// Row-major grid of `T` with bounds-checked access.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface<T> {
  cells: Box<[T]>,
  width: u32,
  height: u32,
}

/// Grid of optional tiles; `None` is an empty cell.
pub type TileGrid = Surface<Option<Tile>>;

impl<T: Clone + Default> Surface<T> {
  /// Creates a `width` by `height` grid of default cells.
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      cells: vec![T::default(); width as usize * height as usize].into_boxed_slice(),
      width,
      height,
    }
  }
}

impl<T> Surface<T> {
  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  fn slot(&self, x: u32, y: u32) -> Option<usize> {
    (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
  }

  /// Returns the cell at (x, y), or `None` outside the grid.
  #[inline]
  pub fn get(&self, x: u32, y: u32) -> Option<&T> {
    self.slot(x, y).map(|i| &self.cells[i])
  }

  /// Overwrites the cell at (x, y). Returns false outside the grid.
  #[inline]
  pub fn set(&mut self, x: u32, y: u32, value: T) -> bool {
    match self.slot(x, y) {
      Some(i) => {
        self.cells[i] = value;
        true
      }
      None => false,
    }
  }

  /// All cells, bottom row first.
  #[inline]
  pub fn as_slice(&self) -> &[T] {
    &self.cells
  }
}
