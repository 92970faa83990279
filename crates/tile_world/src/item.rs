//! Dropped items - the only entities owned by chunks.

use crate::tile::TileId;

/// Ticks a dropped item survives before despawning (100 s at 60 Hz).
pub const ITEM_LIFETIME_TICKS: u32 = 6000;

/// An item lying in the world, waiting to be picked up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DroppedItem {
  pub item: TileId,
  /// World position in tile units (Y+ up).
  pub x: f64,
  pub y: f64,
  /// Ticks since the item was spawned.
  pub age: u32,
  /// Set when the item should be removed at the next prune.
  pub dead: bool,
}

impl DroppedItem {
  /// Creates a fresh item at the given position.
  pub fn new(item: TileId, x: f64, y: f64) -> Self {
    Self {
      item,
      x,
      y,
      age: 0,
      dead: false,
    }
  }

  /// Advances the item's age, flagging it dead once its lifetime is over.
  pub fn tick(&mut self) {
    self.age = self.age.saturating_add(1);
    if self.age >= ITEM_LIFETIME_TICKS {
      self.dead = true;
    }
  }

  /// Returns the squared distance from the item to a point.
  pub fn distance_squared(&self, x: f64, y: f64) -> f64 {
    let dx = self.x - x;
    let dy = self.y - y;
    dx * dx + dy * dy
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tile::ids;

  #[test]
  fn item_expires_after_lifetime() {
    let mut item = DroppedItem::new(ids::DIRT, 0.5, 0.5);
    for _ in 0..ITEM_LIFETIME_TICKS - 1 {
      item.tick();
    }
    assert!(!item.dead);
    item.tick();
    assert!(item.dead);
  }
}
