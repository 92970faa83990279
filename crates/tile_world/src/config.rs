//! World configuration loaded from TOML.
//!
//! Every section and field is optional; missing values fall back to the
//! defaults below, so a partial file only overrides what it names.
//!
//! ```toml
//! [generator]
//! ground_height = 96
//!
//! [player]
//! walk_speed = 6.0
//! ```

use std::io;
use std::path::Path;

use serde::Deserialize;

/// Terrain generator parameters.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
  /// Average surface height in tiles.
  pub ground_height: u32,
  /// Maximum deviation of the surface from `ground_height`.
  pub height_amplitude: f64,
  /// Horizontal size of terrain features in tiles.
  pub feature_scale: f64,
  /// Number of noise octaves.
  pub octaves: usize,
  /// Thickness of the dirt layer under the surface.
  pub dirt_depth: u32,
  /// Surfaces at or below this height are sand instead of grass.
  pub sand_level: u32,
  /// Per-column chance of a tree on grass.
  pub tree_chance: f64,
  /// Per-cell chance of ore replacing stone.
  pub ore_chance: f64,
  /// Cave noise above this value carves out underground cells.
  pub cave_threshold: f64,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      ground_height: 96,
      height_amplitude: 24.0,
      feature_scale: 160.0,
      octaves: 4,
      dirt_depth: 4,
      sand_level: 80,
      tree_chance: 0.06,
      ore_chance: 0.012,
      cave_threshold: 0.55,
    }
  }
}

/// Player movement parameters. Distances are in tiles, speeds in tiles per
/// second.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
  pub spawn_x: f64,
  pub walk_speed: f64,
  pub jump_speed: f64,
  pub gravity: f64,
  pub max_fall_speed: f64,
  /// Maximum distance from the player's center to a placed/destroyed cell.
  pub reach: f64,
  pub pickup_radius: f64,
  /// Fixed simulation rate.
  pub tick_hz: f64,
}

impl Default for PlayerConfig {
  fn default() -> Self {
    Self {
      spawn_x: 0.5,
      walk_speed: 5.0,
      jump_speed: 9.0,
      gravity: 30.0,
      max_fall_speed: 40.0,
      reach: 5.0,
      pickup_radius: 2.0,
      tick_hz: 60.0,
    }
  }
}

impl PlayerConfig {
  /// Seconds simulated per tick.
  pub fn tick_seconds(&self) -> f64 {
    1.0 / self.tick_hz
  }
}

/// Renderer parameters.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
  /// On-screen size of one tile in pixels.
  pub tile_pixels: f32,
  /// Visible area around the player in tiles.
  pub view_width: f64,
  pub view_height: f64,
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self {
      tile_pixels: 16.0,
      view_width: 84.0,
      view_height: 48.0,
    }
  }
}

/// Complete world configuration.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TileWorldConfig {
  pub generator: GeneratorConfig,
  pub player: PlayerConfig,
  pub render: RenderConfig,
}

impl TileWorldConfig {
  /// Parses a configuration from TOML text.
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  /// Rejects values the fixed-step loop cannot run with.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let hz = self.player.tick_hz;
    if !(hz.is_finite() && hz > 0.0) {
      return Err(ConfigError::Invalid(format!(
        "player.tick_hz must be a positive number, got {}",
        hz
      )));
    }
    Ok(())
  }

  /// Reads and parses a configuration file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Self::from_toml_str(&text)
  }
}

/// Error loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
  Io(io::Error),
  Parse(toml::de::Error),
  /// Parsed, but a value is out of range.
  Invalid(String),
}

impl From<io::Error> for ConfigError {
  fn from(err: io::Error) -> Self {
    Self::Io(err)
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "I/O error: {}", e),
      Self::Parse(e) => write!(f, "parse error: {}", e),
      Self::Invalid(msg) => write!(f, "invalid config: {}", msg),
    }
  }
}

impl std::error::Error for ConfigError {}
