//! TileWorld - chunk streaming, tile access and collision.
//!
//! [`TileWorld`] owns the resident chunks and the player. Chunk storage and
//! every world-coordinate query live on [`ChunkMap`], split by
//! responsibility:
//! - [`tile_access`] - tile read/write/place/destroy
//! - [`collision`] - point and box collision queries
//! - [`streaming`] - load-ahead and eviction around the player
//! - [`render`] - drawing onto a [`TileCanvas`]

mod chunk_map;
mod collision;
pub mod plugin;
mod render;
mod streaming;
mod tile_access;

use std::sync::Arc;

use bevy::prelude::Resource;
pub use chunk_map::ChunkMap;
pub use render::{CHUNK_MARKER_COLOR, SKY_COLOR, TileCanvas, View, render_tile};
pub use streaming::{StreamingDelta, StreamingPlan};

use crate::config::TileWorldConfig;
use crate::coords::{ChunkIndex, TilePos};
use crate::player::{Player, PlayerInput};
use crate::primitives::Chunk;
use crate::seeding::{ChunkGenerator, TerrainGenerator};
use crate::tile::{Tile, TileRegistry};

/// The world: resident chunks plus the player moving through them.
///
/// Each [`TileWorld::update`] runs, in order: the tile update sweep, the
/// player update, streaming, and dead-entity pruning.
#[derive(Resource)]
pub struct TileWorld {
  chunks: ChunkMap,
  player: Player,
  config: TileWorldConfig,
}

impl TileWorld {
  /// Creates a world with the default terrain generator.
  pub fn new(seed: i64, config: TileWorldConfig) -> Self {
    let generator = TerrainGenerator::with_config(seed, config.generator.clone());
    Self::with_generator(Arc::new(generator), Arc::new(TileRegistry::new()), config)
  }

  /// Creates a world filled by `generator`.
  ///
  /// The player spawns standing on the ground at `config.player.spawn_x`.
  pub fn with_generator(
    generator: Arc<dyn ChunkGenerator>,
    registry: Arc<TileRegistry>,
    config: TileWorldConfig,
  ) -> Self {
    let mut chunks = ChunkMap::new(generator, registry);
    let spawn_x = config.player.spawn_x;
    let ground = chunks.ground_height(spawn_x.floor() as i64);
    log::info!(
      "world seed {} spawning player at ({}, {})",
      chunks.seed(),
      spawn_x,
      ground
    );
    Self {
      chunks,
      player: Player::new(spawn_x, ground as f64),
      config,
    }
  }

  /// Advances the world by one tick.
  ///
  /// Returns the chunks loaded and evicted by streaming.
  pub fn update(&mut self) -> StreamingDelta {
    self.chunks.update_tiles();
    self.player.update(&mut self.chunks, &self.config.player);
    let delta = self.chunks.stream(self.player.x);
    self.chunks.prune_dead_entities();
    delta
  }

  /// Forwards input to the player for the next update.
  pub fn input(&mut self, input: PlayerInput) {
    self.player.input(input);
  }

  /// Returns the view centered on the player.
  pub fn view(&self) -> View {
    let (x, y) = self.player.center();
    View::new(x, y, &self.config.render)
  }

  /// Draws the world as seen from the player.
  ///
  /// Fills the sky, then draws resident chunks and finally the player. Only
  /// reads state.
  pub fn render(&self, canvas: &mut impl TileCanvas) {
    let view = self.view();
    canvas.clear(SKY_COLOR);
    self.chunks.render(canvas, &view);
    self.player.render(canvas, &view);
  }

  pub fn chunks(&self) -> &ChunkMap {
    &self.chunks
  }

  pub fn chunks_mut(&mut self) -> &mut ChunkMap {
    &mut self.chunks
  }

  pub fn player(&self) -> &Player {
    &self.player
  }

  pub fn player_mut(&mut self) -> &mut Player {
    &mut self.player
  }

  pub fn config(&self) -> &TileWorldConfig {
    &self.config
  }

  pub fn seed(&self) -> i64 {
    self.chunks.seed()
  }

  /// Returns the number of completed ticks.
  pub fn tick(&self) -> u64 {
    self.chunks.tick()
  }

  /// See [`ChunkMap::get_or_create_chunk`].
  pub fn get_or_create_chunk(&mut self, index: ChunkIndex) -> &mut Chunk {
    self.chunks.get_or_create_chunk(index)
  }

  /// See [`ChunkMap::get_tile`].
  pub fn get_tile(&mut self, pos: TilePos) -> Option<Tile> {
    self.chunks.get_tile(pos)
  }

  /// See [`ChunkMap::set_tile`].
  pub fn set_tile(&mut self, pos: TilePos, tile: Option<Tile>) {
    self.chunks.set_tile(pos, tile);
  }

  /// See [`ChunkMap::place_tile`].
  pub fn place_tile(&mut self, pos: TilePos, tile: Option<Tile>) -> bool {
    self.chunks.place_tile(pos, tile)
  }

  /// See [`ChunkMap::destroy_tile`].
  pub fn destroy_tile(&mut self, pos: TilePos, harvest_level: u8) {
    self.chunks.destroy_tile(pos, harvest_level);
  }

  /// See [`ChunkMap::collision_check_point`].
  pub fn collision_check_point(&mut self, x: f64, y: f64) -> Option<TilePos> {
    self.chunks.collision_check_point(x, y)
  }

  /// See [`ChunkMap::collision_check_box`].
  pub fn collision_check_box(&mut self, x: f64, y: f64, width: f64, height: f64) -> Option<TilePos> {
    self.chunks.collision_check_box(x, y, width, height)
  }
}
