//! Streaming window logic for chunk residency.
//!
//! Each tick the chunk under the player and one neighbor are made resident,
//! then every chunk more than [`EVICTION_DISTANCE`] chunks from the player is
//! dropped. The neighbor is the chunk the player is closer to: the right one
//! past the middle of the current chunk, the left one otherwise.

use super::ChunkMap;
use crate::coords::{ChunkIndex, EVICTION_DISTANCE, LOAD_AHEAD_THRESHOLD, chunk_index_at, local_offset_at};

/// Chunks required around a player position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamingPlan {
  /// Chunk containing the player.
  pub player_chunk: ChunkIndex,
  /// Neighbor loaded ahead of the player.
  pub load_ahead: ChunkIndex,
}

impl StreamingPlan {
  /// Computes the plan for a player at horizontal position `x`.
  pub fn for_position(x: f64) -> Self {
    let player_chunk = chunk_index_at(x);
    let load_ahead = if local_offset_at(x) > LOAD_AHEAD_THRESHOLD {
      player_chunk.saturating_add(1)
    } else {
      player_chunk.saturating_sub(1)
    };
    Self {
      player_chunk,
      load_ahead,
    }
  }

  /// Returns true if the chunk at `index` may stay resident.
  #[inline]
  pub fn keeps(&self, index: ChunkIndex) -> bool {
    index.abs_diff(self.player_chunk) <= EVICTION_DISTANCE
  }
}

/// Changes from one streaming pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingDelta {
  /// Chunks generated by this pass.
  pub loaded: Vec<ChunkIndex>,
  /// Chunks dropped by this pass, ascending.
  pub evicted: Vec<ChunkIndex>,
}

impl StreamingDelta {
  /// Returns true if the pass changed nothing.
  pub fn is_empty(&self) -> bool {
    self.loaded.is_empty() && self.evicted.is_empty()
  }
}

impl ChunkMap {
  /// Applies the streaming policy for a player at horizontal position `x`.
  ///
  /// Loads the player's chunk and its load-ahead neighbor, then evicts
  /// chunks that are too far away. Eviction always follows loading.
  pub fn stream(&mut self, x: f64) -> StreamingDelta {
    let plan = StreamingPlan::for_position(x);
    let mut delta = StreamingDelta::default();

    for index in [plan.player_chunk, plan.load_ahead] {
      if !self.is_chunk_loaded(index) {
        self.get_or_create_chunk(index);
        delta.loaded.push(index);
      }
    }
    delta.evicted = self.evict_where(|index| plan.keeps(index));
    delta
  }
}
