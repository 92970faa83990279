//! The player - movement, harvesting and building.
//!
//! The player never holds a reference to the world. Each tick the world
//! lends it the chunk map, through which it issues collision queries and
//! tile edits.

use std::collections::BTreeMap;

use bevy::color::Srgba;

use crate::config::PlayerConfig;
use crate::coords::{CellSpan, TilePos};
use crate::tile::{Tile, TileId, ids};
use crate::world::{ChunkMap, TileCanvas, View};

/// Player body color.
pub const PLAYER_COLOR: Srgba = Srgba::rgb(230.0 / 255.0, 80.0 / 255.0, 60.0 / 255.0);

/// Largest distance moved per collision step, in tiles.
///
/// Must stay below one tile so a step can only enter the leading row or
/// column of cells.
const MAX_STEP: f64 = 0.25;

/// Gap left between the player and a wall it was pushed out of.
const SKIN: f64 = 1e-9;

/// Player intent for the next tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
  pub left: bool,
  pub right: bool,
  pub jump: bool,
  /// Cell to place the selected tile into.
  pub place: Option<TilePos>,
  /// Cell to harvest.
  pub destroy: Option<TilePos>,
  /// Tile kind to select for placement.
  pub select: Option<TileId>,
}

/// The player character.
///
/// Positions are in tiles, Y+ up. `x` is the horizontal center and `y` the
/// bottom of the collision box.
#[derive(Clone, Debug)]
pub struct Player {
  pub x: f64,
  pub y: f64,
  /// Velocity in tiles per second.
  pub vx: f64,
  pub vy: f64,
  pub width: f64,
  pub height: f64,
  /// True when the last tick ended standing on a blocking tile.
  pub grounded: bool,
  /// Tool strength compared against each tile's drop requirement.
  pub harvest_level: u8,
  /// Tile kind placed by place requests.
  pub selected: TileId,
  /// Collected items by kind.
  pub inventory: BTreeMap<TileId, u32>,
  input: PlayerInput,
}

impl Player {
  pub const WIDTH: f64 = 0.6;
  pub const HEIGHT: f64 = 1.8;

  /// Creates a player standing with its feet at (x, y).
  pub fn new(x: f64, y: f64) -> Self {
    Self {
      x,
      y,
      vx: 0.0,
      vy: 0.0,
      width: Self::WIDTH,
      height: Self::HEIGHT,
      grounded: false,
      harvest_level: 1,
      selected: ids::DIRT,
      inventory: BTreeMap::new(),
      input: PlayerInput::default(),
    }
  }

  /// Stores the intent applied by the next [`Player::update`].
  ///
  /// Place, destroy and select requests are consumed by that update; held
  /// movement keys stay until replaced.
  pub fn input(&mut self, input: PlayerInput) {
    self.input = input;
  }

  /// Returns the pending intent.
  pub fn pending_input(&self) -> &PlayerInput {
    &self.input
  }

  /// Returns how many items of a kind the player holds.
  pub fn count(&self, item: TileId) -> u32 {
    self.inventory.get(&item).copied().unwrap_or(0)
  }

  /// Returns the center of the collision box.
  pub fn center(&self) -> (f64, f64) {
    (self.x, self.y + self.height / 2.0)
  }

  /// Returns true if cell `pos` is within `reach` of the player's center.
  pub fn can_reach(&self, pos: TilePos, reach: f64) -> bool {
    let (cx, cy) = self.center();
    let dx = pos.x as f64 + 0.5 - cx;
    let dy = pos.y as f64 + 0.5 - cy;
    dx * dx + dy * dy <= reach * reach
  }

  /// Advances the player by one tick.
  pub fn update(&mut self, chunks: &mut ChunkMap, config: &PlayerConfig) {
    let input = self.input;
    let dt = config.tick_seconds();

    if let Some(id) = input.select {
      self.selected = id;
    }

    self.vx = match (input.left, input.right) {
      (true, false) => -config.walk_speed,
      (false, true) => config.walk_speed,
      _ => 0.0,
    };
    if input.jump && self.grounded {
      self.vy = config.jump_speed;
    }
    self.vy = (self.vy - config.gravity * dt).max(-config.max_fall_speed);

    self.move_horizontal(chunks, self.vx * dt);
    self.move_vertical(chunks, self.vy * dt);

    if let Some(pos) = input.destroy {
      if self.can_reach(pos, config.reach) {
        chunks.destroy_tile(pos, self.harvest_level);
      }
    }
    if let Some(pos) = input.place {
      self.try_place(chunks, pos, config.reach);
    }
    self.pick_up_items(chunks, config.pickup_radius);

    self.input.place = None;
    self.input.destroy = None;
    self.input.select = None;
  }

  /// Draws the player's collision box.
  pub fn render(&self, canvas: &mut impl TileCanvas, view: &View) {
    let (cx, cy) = self.center();
    canvas.rect(
      view.to_screen(cx, cy),
      view.scale(self.width, self.height),
      PLAYER_COLOR,
    );
  }

  fn check(&self, chunks: &mut ChunkMap, x: f64, y: f64) -> Option<TilePos> {
    chunks.collision_check_box(x - self.width / 2.0, y, self.width, self.height)
  }

  fn move_horizontal(&mut self, chunks: &mut ChunkMap, dx: f64) {
    let mut remaining = dx;
    while remaining != 0.0 {
      let step = remaining.clamp(-MAX_STEP, MAX_STEP);
      remaining -= step;
      let next = self.x + step;
      match self.check(chunks, next, self.y) {
        None => self.x = next,
        Some(hit) => {
          self.x = if step > 0.0 {
            hit.x as f64 - self.width / 2.0 - SKIN
          } else {
            hit.x as f64 + 1.0 + self.width / 2.0 + SKIN
          };
          self.vx = 0.0;
          return;
        }
      }
    }
  }

  fn move_vertical(&mut self, chunks: &mut ChunkMap, dy: f64) {
    self.grounded = false;
    let mut remaining = dy;
    while remaining != 0.0 {
      let step = remaining.clamp(-MAX_STEP, MAX_STEP);
      remaining -= step;
      let next = self.y + step;
      match self.check(chunks, self.x, next) {
        None => self.y = next,
        Some(hit) => {
          if step < 0.0 {
            self.y = hit.y as f64 + 1.0;
            self.grounded = true;
          } else {
            self.y = hit.y as f64 - self.height - SKIN;
          }
          self.vy = 0.0;
          return;
        }
      }
    }
  }

  fn try_place(&mut self, chunks: &mut ChunkMap, pos: TilePos, reach: f64) {
    if !self.can_reach(pos, reach) || self.count(self.selected) == 0 {
      return;
    }
    if !pos.is_in_vertical_range() {
      return;
    }
    let tile = Tile::new(self.selected);
    let body = CellSpan::covering(self.x - self.width / 2.0, self.y, self.width, self.height);
    let inside_body = body.iter().any(|cell| cell == pos);
    if inside_body && chunks.registry().is_full_tile(tile) {
      return;
    }
    if chunks.place_tile(pos, Some(tile)) {
      if let Some(count) = self.inventory.get_mut(&self.selected) {
        *count -= 1;
      }
    }
  }

  fn pick_up_items(&mut self, chunks: &mut ChunkMap, radius: f64) {
    let (cx, cy) = self.center();
    for item in chunks.items_mut() {
      if item.distance_squared(cx, cy) <= radius * radius {
        item.dead = true;
        *self.inventory.entry(item.item).or_insert(0) += 1;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::item::DroppedItem;
  use crate::seeding::FlatGenerator;
  use crate::tile::TileRegistry;

  fn flat_map() -> ChunkMap {
    // grass surface at y = 63
    ChunkMap::new(
      Arc::new(FlatGenerator::new(0, 64)),
      Arc::new(TileRegistry::new()),
    )
  }

  fn settle(player: &mut Player, chunks: &mut ChunkMap, config: &PlayerConfig) {
    for _ in 0..240 {
      player.update(chunks, config);
    }
  }

  #[test]
  fn falls_onto_the_ground_and_stops() {
    let mut chunks = flat_map();
    let config = PlayerConfig::default();
    let mut player = Player::new(10.5, 80.0);

    settle(&mut player, &mut chunks, &config);

    assert_eq!(player.y, 64.0);
    assert!(player.grounded);
    assert_eq!(player.vy, 0.0);
  }

  #[test]
  fn walls_stop_horizontal_movement() {
    let mut chunks = flat_map();
    for y in 64..70 {
      chunks.set_tile(TilePos::new(14, y), Some(Tile::new(ids::STONE)));
    }
    let config = PlayerConfig::default();
    let mut player = Player::new(10.5, 64.0);
    player.input(PlayerInput {
      right: true,
      ..Default::default()
    });

    settle(&mut player, &mut chunks, &config);

    assert!(player.x < 14.0 - player.width / 2.0);
    assert!(player.x > 13.6);
    assert!(player.grounded);
  }

  #[test]
  fn jumping_leaves_the_ground() {
    let mut chunks = flat_map();
    let config = PlayerConfig::default();
    let mut player = Player::new(10.5, 64.0);
    settle(&mut player, &mut chunks, &config);

    player.input(PlayerInput {
      jump: true,
      ..Default::default()
    });
    player.update(&mut chunks, &config);

    assert!(player.y > 64.0);
    assert!(!player.grounded);
  }

  #[test]
  fn harvesting_then_collecting_fills_inventory() {
    let mut chunks = flat_map();
    let config = PlayerConfig::default();
    let mut player = Player::new(10.5, 64.0);
    settle(&mut player, &mut chunks, &config);

    player.input(PlayerInput {
      destroy: Some(TilePos::new(11, 63)),
      ..Default::default()
    });
    player.update(&mut chunks, &config);

    assert!(chunks.peek_tile(TilePos::new(11, 63)).is_none());
    assert_eq!(player.count(ids::DIRT), 1);
    assert_eq!(chunks.prune_dead_entities(), 1);
  }

  #[test]
  fn out_of_reach_requests_are_ignored() {
    let mut chunks = flat_map();
    let config = PlayerConfig::default();
    let mut player = Player::new(10.5, 64.0);
    settle(&mut player, &mut chunks, &config);

    player.input(PlayerInput {
      destroy: Some(TilePos::new(40, 63)),
      ..Default::default()
    });
    player.update(&mut chunks, &config);

    assert_eq!(chunks.peek_tile(TilePos::new(40, 63)), Some(Tile::new(ids::GRASS)));
  }

  #[test]
  fn placing_consumes_inventory_and_avoids_the_body() {
    let mut chunks = flat_map();
    let config = PlayerConfig::default();
    let mut player = Player::new(10.5, 64.0);
    settle(&mut player, &mut chunks, &config);
    player.inventory.insert(ids::PLANKS, 1);

    player.input(PlayerInput {
      select: Some(ids::PLANKS),
      place: Some(TilePos::new(10, 64)),
      ..Default::default()
    });
    player.update(&mut chunks, &config);
    assert!(chunks.peek_tile(TilePos::new(10, 64)).is_none());

    player.input(PlayerInput {
      place: Some(TilePos::new(12, 64)),
      ..Default::default()
    });
    player.update(&mut chunks, &config);
    assert_eq!(chunks.peek_tile(TilePos::new(12, 64)), Some(Tile::new(ids::PLANKS)));
    assert_eq!(player.count(ids::PLANKS), 0);
  }

  #[test]
  fn placing_below_the_world_keeps_the_item() {
    // bedrock-only floor at y = 0
    let mut chunks = ChunkMap::new(
      Arc::new(FlatGenerator::new(0, 1)),
      Arc::new(TileRegistry::new()),
    );
    let config = PlayerConfig::default();
    let mut player = Player::new(10.5, 4.0);
    settle(&mut player, &mut chunks, &config);
    assert_eq!(player.y, 1.0);
    player.inventory.insert(ids::PLANKS, 1);

    player.input(PlayerInput {
      select: Some(ids::PLANKS),
      place: Some(TilePos::new(11, -1)),
      ..Default::default()
    });
    player.update(&mut chunks, &config);

    assert_eq!(player.count(ids::PLANKS), 1);
  }

  #[test]
  fn far_items_stay_on_the_ground() {
    let mut chunks = flat_map();
    chunks.spawn_item(DroppedItem::new(ids::SAND, 30.5, 64.5));
    let config = PlayerConfig::default();
    let mut player = Player::new(10.5, 64.0);
    settle(&mut player, &mut chunks, &config);

    assert_eq!(player.count(ids::SAND), 0);
    assert_eq!(chunks.prune_dead_entities(), 0);
  }
}
