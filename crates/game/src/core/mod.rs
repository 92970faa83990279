//! Camera and window-title bookkeeping.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tile_world::TileWorld;

/// Marker component for the game camera.
///
/// The world is drawn relative to the player, so the camera stays at the
/// origin and the terrain scrolls underneath it.
#[derive(Component)]
pub struct GameCamera;

pub struct CorePlugin;

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, setup_camera)
      .add_systems(Update, update_title);
  }
}

fn setup_camera(mut commands: Commands) {
  commands.spawn((GameCamera, Camera2d));
}

/// Shows seed, position and the selected tile in the window title.
fn update_title(world: Res<TileWorld>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
  if !world.is_changed() {
    return;
  }
  let Ok(mut window) = windows.single_mut() else {
    return;
  };
  let player = world.player();
  let selected = world.chunks().registry().get(player.selected);
  let title = format!(
    "Tile World - seed {} - ({:.0}, {:.0}) - {} x{}",
    world.seed(),
    player.x,
    player.y,
    selected.name,
    player.count(player.selected)
  );
  if window.title != title {
    window.title = title;
  }
}
