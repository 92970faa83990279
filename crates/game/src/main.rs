mod config;
mod core;
mod input;

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use clap::Parser;
use tile_world::{TileWorldPlugin, seed_from_text};

use crate::config::{DEFAULT_CONFIG_PATH, GameConfig};

/// Side-scrolling tile sandbox.
#[derive(Parser, Debug)]
#[command(name = "tileworld")]
struct Args {
  /// World seed text; omitted or empty uses the default seed
  #[arg(long)]
  seed: Option<String>,
  /// Configuration file
  #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
  config: PathBuf,
}

fn main() {
  let args = Args::parse();

  let (config, load_error) = match GameConfig::load(&args.config) {
    Ok(config) => (config, None),
    Err(err) => (GameConfig::default(), Some(err)),
  };
  let seed = seed_from_text(args.seed.as_deref());

  let mut app = App::new();
  app
    .add_plugins(
      DefaultPlugins
        .set(ImagePlugin::default_nearest())
        .set(WindowPlugin {
          primary_window: Some(Window {
            resolution: WindowResolution::new(config.window.width, config.window.height),
            title: config.window.title.clone(),
            present_mode: PresentMode::AutoVsync,
            ..default()
          }),
          ..default()
        }),
    )
    .add_plugins(TileWorldPlugin {
      seed,
      config: config.world.clone(),
    })
    .add_plugins(core::CorePlugin)
    .add_plugins(input::InputPlugin);

  // LogPlugin is live once DefaultPlugins are built
  if let Some(err) = load_error {
    warn!(
      "could not load {}: {}; using defaults",
      args.config.display(),
      err
    );
  }
  info!("starting with seed {}", seed);
  app.run();
}
