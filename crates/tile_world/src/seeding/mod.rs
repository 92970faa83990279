//! Chunk generation - populating freshly created chunks.
//!
//! The [`ChunkGenerator`] trait provides a pluggable interface for filling a
//! chunk the first time its index is referenced. The world treats it as an
//! opaque capability: given a seed (captured at construction) and a chunk
//! index, fill every cell exactly once.

mod terrain;

pub use terrain::TerrainGenerator;

use crate::coords::WORLD_HEIGHT;
use crate::primitives::Chunk;
use crate::tile::{Tile, ids};

/// Seed used when no seed text is supplied.
pub const DEFAULT_SEED: i64 = 1_234_567_890;

/// Trait for populating chunks with initial tiles.
///
/// Implementations must be deterministic in `(seed, chunk.index())` so a
/// chunk regenerated after eviction is identical to the original, and must
/// only write to the chunk they are given.
///
/// The `Send + Sync` bounds let the world live in a Bevy resource.
pub trait ChunkGenerator: Send + Sync {
  /// Fills an all-empty chunk.
  fn generate(&self, chunk: &mut Chunk);

  /// Returns the seed this generator was built from.
  fn seed(&self) -> i64;
}

/// Derives a world seed from user-entered text.
///
/// `None` or empty text gives [`DEFAULT_SEED`]. Otherwise the text is hashed
/// with the classic 31-multiplier polynomial over its UTF-16 code units,
/// wrapping at 32 bits, so the same text always names the same world.
pub fn seed_from_text(text: Option<&str>) -> i64 {
  match text {
    None | Some("") => DEFAULT_SEED,
    Some(text) => text
      .encode_utf16()
      .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32)) as i64,
  }
}

/// Generator producing flat layered ground.
///
/// Bedrock at row 0, stone, a few rows of dirt and a grass surface whose top
/// cell is `ground_height - 1`. Useful for tests and benchmarks.
pub struct FlatGenerator {
  seed: i64,
  ground_height: u32,
}

impl FlatGenerator {
  /// Thickness of the dirt layer, grass included.
  const DIRT_DEPTH: u32 = 4;

  /// Creates a flat generator with the surface just below `ground_height`.
  pub fn new(seed: i64, ground_height: u32) -> Self {
    Self {
      seed,
      ground_height: ground_height.min(WORLD_HEIGHT),
    }
  }
}

impl ChunkGenerator for FlatGenerator {
  fn generate(&self, chunk: &mut Chunk) {
    let width = chunk.tiles.width();
    let dirt_from = self.ground_height.saturating_sub(Self::DIRT_DEPTH);
    for x in 0..width {
      for y in 0..self.ground_height {
        let id = if y == 0 {
          ids::BEDROCK
        } else if y + 1 == self.ground_height {
          ids::GRASS
        } else if y >= dirt_from {
          ids::DIRT
        } else {
          ids::STONE
        };
        chunk.set_tile(x, y, Some(Tile::new(id)));
      }
    }
  }

  fn seed(&self) -> i64 {
    self.seed
  }
}
