//! Tile World - a horizontally unbounded, chunk-streamed tile world.
//!
//! This crate provides the world core of a side-scrolling tile sandbox:
//! lazily generated 256-wide chunks, tile access and collision queries in
//! world coordinates, a bounded residency window around the player, and a
//! Bevy plugin driving it all on a fixed tick.

pub mod config;
pub mod coords;
pub mod item;
pub mod player;
pub mod primitives;
pub mod seeding;
pub mod simulation;
pub mod tile;
pub mod world;

pub use config::{ConfigError, GeneratorConfig, PlayerConfig, RenderConfig, TileWorldConfig};
pub use coords::{
  CHUNK_WIDTH, CellSpan, ChunkIndex, EVICTION_DISTANCE, LOAD_AHEAD_THRESHOLD, LocalPos, TilePos,
  WORLD_HEIGHT,
};
pub use item::{DroppedItem, ITEM_LIFETIME_TICKS};
pub use player::{Player, PlayerInput};
pub use primitives::{Chunk, Surface, TileGrid};
pub use seeding::{
  ChunkGenerator, DEFAULT_SEED, FlatGenerator, TerrainGenerator, seed_from_text,
};
pub use tile::{CollisionType, Tile, TileDef, TileId, TileRegistry, ids as tile_ids};
pub use world::plugin::{PlayerIntent, TileWorldPlugin, TileWorldSet};
pub use world::{ChunkMap, StreamingDelta, StreamingPlan, TileCanvas, TileWorld, View};
