//! Resident chunk storage.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use crate::coords::{CHUNK_WIDTH, ChunkIndex, WORLD_HEIGHT};
use crate::item::DroppedItem;
use crate::primitives::Chunk;
use crate::seeding::ChunkGenerator;
use crate::simulation::{TickContext, update_tile};
use crate::tile::TileRegistry;

/// Owns every resident chunk, keyed by index.
///
/// Chunks are created on first reference and filled by the generator before
/// anything else sees them. The map guarantees at most one chunk per index,
/// and iterates chunks in ascending index order.
pub struct ChunkMap {
  chunks: BTreeMap<ChunkIndex, Chunk>,
  generator: Arc<dyn ChunkGenerator>,
  registry: Arc<TileRegistry>,
  /// Number of completed update sweeps.
  tick: u64,
}

impl ChunkMap {
  /// Creates an empty map filling new chunks with `generator`.
  pub fn new(generator: Arc<dyn ChunkGenerator>, registry: Arc<TileRegistry>) -> Self {
    Self {
      chunks: BTreeMap::new(),
      generator,
      registry,
      tick: 0,
    }
  }

  /// Returns the tile registry.
  pub fn registry(&self) -> &TileRegistry {
    &self.registry
  }

  /// Returns the seed of the generator.
  pub fn seed(&self) -> i64 {
    self.generator.seed()
  }

  /// Returns the number of completed update sweeps.
  pub fn tick(&self) -> u64 {
    self.tick
  }

  /// Returns the chunk at `index`, generating it first if not resident.
  ///
  /// Generation runs to completion before the chunk is inserted. Repeated
  /// calls return the same chunk until it is evicted.
  pub fn get_or_create_chunk(&mut self, index: ChunkIndex) -> &mut Chunk {
    match self.chunks.entry(index) {
      Entry::Occupied(entry) => entry.into_mut(),
      Entry::Vacant(entry) => {
        let mut chunk = Chunk::new(index);
        self.generator.generate(&mut chunk);
        log::debug!(
          "generated chunk {} ({} tiles)",
          index,
          chunk.occupied_count()
        );
        entry.insert(chunk)
      }
    }
  }

  /// Returns the resident chunk at `index` without generating it.
  pub fn chunk(&self, index: ChunkIndex) -> Option<&Chunk> {
    self.chunks.get(&index)
  }

  /// Returns true if the chunk at `index` is resident.
  pub fn is_chunk_loaded(&self, index: ChunkIndex) -> bool {
    self.chunks.contains_key(&index)
  }

  /// Iterates resident chunk indices in ascending order.
  pub fn resident_indices(&self) -> impl Iterator<Item = ChunkIndex> + '_ {
    self.chunks.keys().copied()
  }

  /// Iterates resident chunks in ascending index order.
  pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
    self.chunks.values()
  }

  /// Returns the number of resident chunks.
  pub fn len(&self) -> usize {
    self.chunks.len()
  }

  /// Returns true if no chunk is resident.
  pub fn is_empty(&self) -> bool {
    self.chunks.is_empty()
  }

  /// Iterates live items across all resident chunks.
  pub fn items_mut(&mut self) -> impl Iterator<Item = &mut DroppedItem> {
    self
      .chunks
      .values_mut()
      .flat_map(|chunk| chunk.items.iter_mut())
      .filter(|item| !item.dead)
  }

  /// Runs one update sweep over every resident chunk.
  ///
  /// Chunks are visited in ascending index order and cells column by column
  /// (x outer, y inner), which is also the collision scan order. Each
  /// occupied cell runs its tile's update rule, then every item ages by one
  /// tick. Never creates chunks.
  pub fn update_tiles(&mut self) {
    let ctx = TickContext {
      seed: self.generator.seed(),
      tick: self.tick,
    };
    for chunk in self.chunks.values_mut() {
      for x in 0..CHUNK_WIDTH {
        for y in 0..WORLD_HEIGHT {
          if chunk.tile(x, y).is_some() {
            update_tile(&self.registry, chunk, x, y, ctx);
          }
        }
      }
      for item in &mut chunk.items {
        item.tick();
      }
    }
    self.tick += 1;
  }

  /// Removes dead items from every resident chunk.
  ///
  /// Returns how many were removed.
  pub fn prune_dead_entities(&mut self) -> usize {
    self
      .chunks
      .values_mut()
      .map(Chunk::remove_dead_entities)
      .sum()
  }

  /// Drops every resident chunk for which `keep` returns false.
  ///
  /// Returns the evicted indices in ascending order.
  pub(crate) fn evict_where(&mut self, mut keep: impl FnMut(ChunkIndex) -> bool) -> Vec<ChunkIndex> {
    let mut evicted = Vec::new();
    self.chunks.retain(|&index, _| {
      let kept = keep(index);
      if !kept {
        evicted.push(index);
      }
      kept
    });
    for index in &evicted {
      log::debug!("evicted chunk {}", index);
    }
    evicted
  }
}
