//! Noise-based terrain generation using the `noise` crate.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::ChunkGenerator;
use crate::config::GeneratorConfig;
use crate::coords::{CHUNK_WIDTH, WORLD_HEIGHT};
use crate::primitives::Chunk;
use crate::simulation::hash::{hash21iu64, hash31if64};
use crate::simulation::place_tree;
use crate::tile::{Tile, TileId, ids};

/// Salts separating the hash streams used by the generator.
const ORE_SALT: i64 = 0x6f72_6573;
const DECOR_SALT: i64 = 0x6465_636f;

/// Procedural terrain generator.
///
/// Generates deterministic terrain from the world seed and column position:
/// - Surface height from fractal Perlin noise
/// - Grass (or sand near the waterline) over dirt over stone
/// - Bedrock floor, coal and iron ore, noise-carved caves
/// - Trees and tall grass, only where they fit inside the chunk
pub struct TerrainGenerator {
  seed: i64,
  config: GeneratorConfig,
  surface: Fbm<Perlin>,
  caves: Fbm<Perlin>,
}

impl TerrainGenerator {
  /// Lowest allowed surface row.
  const MIN_SURFACE: u32 = 16;
  /// Headroom kept above the highest surface for trees.
  const SKY_MARGIN: u32 = 16;
  /// Caves are not carved within this many rows of the surface.
  const CAVE_ROOF: u32 = 8;

  /// Creates a generator with default parameters.
  pub fn new(seed: i64) -> Self {
    Self::with_config(seed, GeneratorConfig::default())
  }

  /// Creates a generator with the given parameters.
  pub fn with_config(seed: i64, config: GeneratorConfig) -> Self {
    let noise_seed = (seed as u64 ^ (seed as u64 >> 32)) as u32;
    let surface = Fbm::<Perlin>::new(noise_seed)
      .set_octaves(config.octaves.max(1))
      .set_frequency(1.0);
    let caves = Fbm::<Perlin>::new(noise_seed.wrapping_add(1))
      .set_octaves(2)
      .set_frequency(1.0);
    Self {
      seed,
      config,
      surface,
      caves,
    }
  }

  /// Returns the generator parameters.
  pub fn config(&self) -> &GeneratorConfig {
    &self.config
  }

  /// Returns the topmost solid row of column `gx`.
  pub fn surface_height(&self, gx: i64) -> u32 {
    let n = self
      .surface
      .get([gx as f64 / self.config.feature_scale.max(1.0), 0.5]);
    let h = self.config.ground_height as f64 + n * self.config.height_amplitude;
    let max = WORLD_HEIGHT - Self::SKY_MARGIN;
    (h.round().max(0.0) as u32).clamp(Self::MIN_SURFACE, max)
  }

  fn is_cave(&self, gx: i64, y: u32, surface: u32) -> bool {
    if y < 3 || y + Self::CAVE_ROOF > surface {
      return false;
    }
    let n = self.caves.get([gx as f64 / 24.0, y as f64 / 16.0]);
    n > self.config.cave_threshold
  }

  fn underground_tile(&self, gx: i64, y: u32, surface: u32, sandy: bool) -> TileId {
    if y == 0 || (y < 3 && hash21iu64(self.seed ^ gx, y as i64) % 2 == 0) {
      return ids::BEDROCK;
    }
    if y + self.config.dirt_depth > surface {
      return if sandy { ids::SAND } else { ids::DIRT };
    }
    let roll = hash31if64(self.seed ^ ORE_SALT, gx, y as i64);
    if roll < self.config.ore_chance * 0.4 && y < surface / 2 {
      ids::IRON_ORE
    } else if roll < self.config.ore_chance {
      ids::COAL_ORE
    } else {
      ids::STONE
    }
  }
}

impl ChunkGenerator for TerrainGenerator {
  fn generate(&self, chunk: &mut Chunk) {
    let origin = chunk.origin_x();
    let mut surfaces = [0u32; CHUNK_WIDTH as usize];

    for lx in 0..CHUNK_WIDTH {
      let gx = origin + lx as i64;
      let surface = self.surface_height(gx);
      surfaces[lx as usize] = surface;
      let sandy = surface <= self.config.sand_level;

      for y in 0..surface {
        if self.is_cave(gx, y, surface) {
          continue;
        }
        let id = self.underground_tile(gx, y, surface, sandy);
        chunk.set_tile(lx, y, Some(Tile::new(id)));
      }
      let top = if sandy { ids::SAND } else { ids::GRASS };
      chunk.set_tile(lx, surface, Some(Tile::new(top)));
    }

    // Decorations go in after the columns so canopies are not overwritten.
    for lx in 0..CHUNK_WIDTH {
      let surface = surfaces[lx as usize];
      if chunk.tile(lx, surface).map(|t| t.id) != Some(ids::GRASS) {
        continue;
      }
      let gx = origin + lx as i64;
      let roll = hash31if64(self.seed ^ DECOR_SALT, gx, surface as i64);
      if roll < self.config.tree_chance {
        let height = 4 + (hash21iu64(self.seed, gx) % 3) as u32;
        place_tree(chunk, lx, surface + 1, height);
      } else if roll < self.config.tree_chance + 0.2 && chunk.tile(lx, surface + 1).is_none() {
        chunk.set_tile(lx, surface + 1, Some(Tile::new(ids::TALL_GRASS)));
      }
    }
  }

  fn seed(&self) -> i64 {
    self.seed
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn generate(generator: &TerrainGenerator, index: i64) -> Chunk {
    let mut chunk = Chunk::new(index);
    generator.generate(&mut chunk);
    chunk
  }

  #[test]
  fn same_seed_same_chunk() {
    let a = TerrainGenerator::new(42);
    let b = TerrainGenerator::new(42);
    let ca = generate(&a, -7);
    let cb = generate(&b, -7);
    assert_eq!(ca.tiles.as_slice(), cb.tiles.as_slice());
  }

  #[test]
  fn different_seeds_differ() {
    let a = generate(&TerrainGenerator::new(1), 0);
    let b = generate(&TerrainGenerator::new(2), 0);
    assert_ne!(a.tiles.as_slice(), b.tiles.as_slice());
  }

  #[test]
  fn every_column_has_bedrock_and_a_surface() {
    let generator = TerrainGenerator::new(9);
    let chunk = generate(&generator, 1);
    for lx in 0..CHUNK_WIDTH {
      assert_eq!(chunk.tile(lx, 0), Some(Tile::new(ids::BEDROCK)));
      let surface = generator.surface_height(chunk.origin_x() + lx as i64);
      let top = chunk.tile(lx, surface).map(|t| t.id);
      assert!(top == Some(ids::GRASS) || top == Some(ids::SAND));
    }
  }

  #[test]
  fn surface_stays_in_range() {
    let generator = TerrainGenerator::with_config(
      5,
      GeneratorConfig {
        height_amplitude: 1000.0,
        ..GeneratorConfig::default()
      },
    );
    for gx in (-5000..5000).step_by(37) {
      let h = generator.surface_height(gx);
      assert!((TerrainGenerator::MIN_SURFACE..=WORLD_HEIGHT - 16).contains(&h));
    }
  }
}
