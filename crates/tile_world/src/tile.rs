//! Tile definitions and registry.
//!
//! A [`Tile`] is a small `Copy` value stored in chunk grids. Everything a tile
//! can do (collide, be replaced, drop an item, update itself, render) is
//! described by the [`TileDef`] registered for its [`TileId`].

use bevy::color::Srgba;

use crate::item::DroppedItem;

/// Tile registry index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u8);

/// A tile occupying one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
  pub id: TileId,
  /// Per-cell scratch state owned by update hooks (growth stage, etc.).
  pub state: u8,
}

impl Tile {
  /// Creates a tile of the given kind with zeroed state.
  pub const fn new(id: TileId) -> Self {
    Self { id, state: 0 }
  }
}

impl From<TileId> for Tile {
  fn from(id: TileId) -> Self {
    Self::new(id)
  }
}

/// How a tile blocks movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionType {
  /// Entities pass through.
  None,
  /// The entire cell blocks movement.
  FullTile,
}

/// Item produced when a tile is destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileDrop {
  /// Item kind that is dropped.
  pub item: TileId,
  /// Minimum harvest level required for the drop to appear.
  pub min_harvest_level: u8,
}

/// Per-tick behavior of a tile kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileUpdate {
  /// Static tile.
  None,
  /// Turns into `into` when a full-tile block sits directly on top.
  Smother { into: TileId },
  /// Advances one growth stage with a 1/`odds` chance per tick and grows a
  /// tree after `stages` stages.
  Grow { stages: u8, odds: u32 },
  /// Breaks (without drop) when the cell below is empty.
  NeedsSupport,
}

/// Tile kind properties.
#[derive(Clone, Debug)]
pub struct TileDef {
  pub name: &'static str,
  /// Fill color used by the renderer.
  pub color: Srgba,
  /// Whether placing another tile may overwrite this one.
  pub replaceable: bool,
  pub collision: CollisionType,
  pub drop: Option<TileDrop>,
  pub update: TileUpdate,
}

/// Built-in tile IDs.
pub mod ids {
  use super::TileId;
  pub const GRASS: TileId = TileId(0);
  pub const DIRT: TileId = TileId(1);
  pub const STONE: TileId = TileId(2);
  pub const BEDROCK: TileId = TileId(3);
  pub const SAND: TileId = TileId(4);
  pub const LOG: TileId = TileId(5);
  pub const LEAVES: TileId = TileId(6);
  pub const PLANKS: TileId = TileId(7);
  pub const COAL_ORE: TileId = TileId(8);
  pub const IRON_ORE: TileId = TileId(9);
  pub const SAPLING: TileId = TileId(10);
  pub const TALL_GRASS: TileId = TileId(11);
  pub const COBBLESTONE: TileId = TileId(12);
}

use ids::*;

/// Tile registry with built-in definitions.
pub struct TileRegistry {
  entries: Vec<TileDef>,
}

impl TileRegistry {
  pub fn new() -> Self {
    let solid = |name, color, drop: Option<TileDrop>| TileDef {
      name,
      color,
      replaceable: false,
      collision: CollisionType::FullTile,
      drop,
      update: TileUpdate::None,
    };
    let drops = |item, min_harvest_level| {
      Some(TileDrop {
        item,
        min_harvest_level,
      })
    };

    Self {
      entries: vec![
        // GRASS turns to dirt once something solid covers it
        TileDef {
          update: TileUpdate::Smother { into: DIRT },
          ..solid("Grass", Srgba::rgb_u8(96, 160, 56), drops(DIRT, 0))
        },
        solid("Dirt", Srgba::rgb_u8(134, 96, 67), drops(DIRT, 0)),
        solid("Stone", Srgba::rgb_u8(125, 125, 125), drops(COBBLESTONE, 1)),
        solid("Bedrock", Srgba::rgb_u8(40, 40, 40), None),
        solid("Sand", Srgba::rgb_u8(219, 207, 163), drops(SAND, 0)),
        solid("Log", Srgba::rgb_u8(102, 81, 51), drops(LOG, 0)),
        TileDef {
          replaceable: true,
          ..solid("Leaves", Srgba::rgb_u8(58, 125, 34), drops(SAPLING, 0))
        },
        solid("Planks", Srgba::rgb_u8(162, 130, 78), drops(PLANKS, 0)),
        solid("Coal Ore", Srgba::rgb_u8(60, 60, 60), drops(COAL_ORE, 1)),
        solid("Iron Ore", Srgba::rgb_u8(175, 142, 119), drops(IRON_ORE, 2)),
        TileDef {
          name: "Sapling",
          color: Srgba::rgb_u8(72, 140, 40),
          replaceable: true,
          collision: CollisionType::None,
          drop: drops(SAPLING, 0),
          update: TileUpdate::Grow {
            stages: 8,
            odds: 64,
          },
        },
        TileDef {
          name: "Tall Grass",
          color: Srgba::rgb_u8(110, 180, 70),
          replaceable: true,
          collision: CollisionType::None,
          drop: None,
          update: TileUpdate::NeedsSupport,
        },
        solid("Cobblestone", Srgba::rgb_u8(110, 110, 110), drops(COBBLESTONE, 1)),
      ],
    }
  }

  /// Returns the definition for a tile kind.
  ///
  /// # Panics
  /// Panics if `id` was never registered.
  pub fn get(&self, id: TileId) -> &TileDef {
    &self.entries[id.0 as usize]
  }

  /// Registers an additional tile kind, returning its ID.
  ///
  /// Returns None if all 256 IDs are taken.
  pub fn register(&mut self, def: TileDef) -> Option<TileId> {
    let id = u8::try_from(self.entries.len()).ok()?;
    self.entries.push(def);
    Some(TileId(id))
  }

  /// Returns the number of registered tile kinds.
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns true if no tile kinds are registered.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Returns true if another tile may be placed over `tile`.
  #[inline]
  pub fn is_replaceable(&self, tile: Tile) -> bool {
    self.get(tile.id).replaceable
  }

  /// Returns the collision classification of `tile`.
  #[inline]
  pub fn collision(&self, tile: Tile) -> CollisionType {
    self.get(tile.id).collision
  }

  /// Returns true if `tile` blocks its whole cell.
  #[inline]
  pub fn is_full_tile(&self, tile: Tile) -> bool {
    self.collision(tile) == CollisionType::FullTile
  }

  /// Runs the drop behavior of `tile` destroyed at cell (`x`, `y`).
  ///
  /// Returns the spawned item, centered on the cell, or `None` when the tile
  /// drops nothing or `harvest_level` is too low.
  pub fn drop_item(&self, tile: Tile, x: i64, y: i64, harvest_level: u8) -> Option<DroppedItem> {
    let drop = self.get(tile.id).drop?;
    if harvest_level < drop.min_harvest_level {
      return None;
    }
    Some(DroppedItem::new(drop.item, x as f64 + 0.5, y as f64 + 0.5))
  }
}

impl Default for TileRegistry {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_ids_match_registry_order() {
    let registry = TileRegistry::new();
    assert_eq!(registry.get(GRASS).name, "Grass");
    assert_eq!(registry.get(STONE).name, "Stone");
    assert_eq!(registry.get(SAPLING).name, "Sapling");
    assert_eq!(registry.get(COBBLESTONE).name, "Cobblestone");
    assert_eq!(registry.len(), COBBLESTONE.0 as usize + 1);
  }

  #[test]
  fn stone_needs_a_pickaxe_to_drop() {
    let registry = TileRegistry::new();
    assert!(registry.drop_item(Tile::new(STONE), 3, 4, 0).is_none());

    let item = registry.drop_item(Tile::new(STONE), 3, 4, 1).unwrap();
    assert_eq!(item.item, COBBLESTONE);
    assert_eq!((item.x, item.y), (3.5, 4.5));
  }

  #[test]
  fn bedrock_never_drops() {
    let registry = TileRegistry::new();
    assert!(registry.drop_item(Tile::new(BEDROCK), 0, 0, u8::MAX).is_none());
  }

  #[test]
  fn registered_kinds_get_the_next_id() {
    let mut registry = TileRegistry::new();
    let glass = registry.register(TileDef {
      name: "Glass",
      color: Srgba::rgb_u8(200, 230, 240),
      replaceable: false,
      collision: CollisionType::FullTile,
      drop: None,
      update: TileUpdate::None,
    })
    .unwrap();
    assert_eq!(glass, TileId(COBBLESTONE.0 + 1));
    assert!(registry.is_full_tile(Tile::new(glass)));
  }
}
