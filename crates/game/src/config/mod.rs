//! Game configuration file.
//!
//! The file holds a `[window]` section next to the world sections understood
//! by [`TileWorldConfig`]; every section may be omitted.

use std::path::Path;

use serde::Deserialize;
use tile_world::{ConfigError, TileWorldConfig};

/// Default location of the configuration file, relative to the working
/// directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.config.toml";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
  pub window: WindowConfig,
  #[serde(flatten)]
  pub world: TileWorldConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

impl Default for WindowConfig {
  fn default() -> Self {
    Self {
      width: 1344,
      height: 768,
      title: "Tile World".to_string(),
    }
  }
}

impl GameConfig {
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(text)?;
    config.world.validate()?;
    Ok(config)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Self::from_toml_str(&text)
  }
}
