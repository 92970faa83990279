//! ECS plugin and systems for TileWorld.
//!
//! The world ticks in `FixedUpdate` at the configured rate and is drawn with
//! gizmos in `Update`.

use bevy::gizmos::GizmoPlugin;
use bevy::prelude::*;

use super::{TileCanvas, TileWorld};
use crate::config::{PlayerConfig, TileWorldConfig};
use crate::player::PlayerInput;
use crate::seeding::DEFAULT_SEED;

/// System sets for ordering against the world tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TileWorldSet {
  /// Systems writing [`PlayerIntent`].
  Input,
  /// The world tick itself.
  Tick,
}

/// Player intent fed to the world every tick.
///
/// Held movement keys persist; place, destroy and select requests are
/// cleared once a tick has consumed them.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PlayerIntent(pub PlayerInput);

/// Plugin simulating and drawing a [`TileWorld`].
///
/// Add it after `DefaultPlugins`: drawing systems are only registered when
/// gizmos are available, so a headless app with `MinimalPlugins` only ticks.
pub struct TileWorldPlugin {
  pub seed: i64,
  pub config: TileWorldConfig,
}

impl Default for TileWorldPlugin {
  fn default() -> Self {
    Self {
      seed: DEFAULT_SEED,
      config: TileWorldConfig::default(),
    }
  }
}

impl Plugin for TileWorldPlugin {
  fn build(&self, app: &mut App) {
    let mut config = self.config.clone();
    if let Err(err) = config.validate() {
      warn!("{}; using the default tick rate", err);
      config.player.tick_hz = PlayerConfig::default().tick_hz;
    }
    let tick_hz = config.player.tick_hz;

    app
      .insert_resource(TileWorld::new(self.seed, config))
      .insert_resource(Time::<Fixed>::from_hz(tick_hz))
      .init_resource::<PlayerIntent>()
      .configure_sets(FixedUpdate, (TileWorldSet::Input, TileWorldSet::Tick).chain())
      .add_systems(FixedUpdate, tick_world.in_set(TileWorldSet::Tick));

    if app.is_plugin_added::<GizmoPlugin>() {
      app
        .init_resource::<ClearColor>()
        .add_systems(Update, draw_world);
    } else {
      debug!("GizmoPlugin missing, tile world will not be drawn");
    }
  }
}

/// System: Feeds the latest intent to the player and advances the world.
pub fn tick_world(mut world: ResMut<TileWorld>, mut intent: ResMut<PlayerIntent>) {
  world.input(intent.0);
  intent.0.place = None;
  intent.0.destroy = None;
  intent.0.select = None;

  let delta = world.update();
  if !delta.is_empty() {
    debug!(
      "tick {}: loaded chunks {:?}, evicted {:?}",
      world.tick(),
      delta.loaded,
      delta.evicted
    );
  }
}

/// System: Draws the world around the player with gizmos.
pub fn draw_world(world: Res<TileWorld>, mut gizmos: Gizmos, mut clear_color: ResMut<ClearColor>) {
  let mut canvas = GizmoCanvas {
    gizmos: &mut gizmos,
    clear_color: &mut clear_color,
  };
  world.render(&mut canvas);
}

/// [`TileCanvas`] drawing tile outlines and lines with gizmos.
struct GizmoCanvas<'a, 'w, 's> {
  gizmos: &'a mut Gizmos<'w, 's>,
  clear_color: &'a mut ClearColor,
}

impl TileCanvas for GizmoCanvas<'_, '_, '_> {
  fn clear(&mut self, color: Srgba) {
    self.clear_color.0 = color.into();
  }

  fn rect(&mut self, center: Vec2, size: Vec2, color: Srgba) {
    self
      .gizmos
      .rect_2d(Isometry2d::from_translation(center), size, color);
  }

  fn line(&mut self, start: Vec2, end: Vec2, color: Srgba) {
    self.gizmos.line_2d(start, end, color);
  }
}
