//! Keyboard and mouse mapping to [`PlayerIntent`].
//!
//! - `A`/`D` or arrows walk, `Space`/`W` jumps
//! - left click harvests, right click places the selected tile
//! - `1`..`9` select a tile kind

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tile_world::{PlayerIntent, TileId, TilePos, TileWorld, tile_ids};

use crate::core::GameCamera;

/// Tile kinds on the number keys, in order.
const HOTBAR: [TileId; 9] = [
  tile_ids::DIRT,
  tile_ids::STONE,
  tile_ids::COBBLESTONE,
  tile_ids::PLANKS,
  tile_ids::LOG,
  tile_ids::LEAVES,
  tile_ids::SAND,
  tile_ids::SAPLING,
  tile_ids::TALL_GRASS,
];

const HOTBAR_KEYS: [KeyCode; 9] = [
  KeyCode::Digit1,
  KeyCode::Digit2,
  KeyCode::Digit3,
  KeyCode::Digit4,
  KeyCode::Digit5,
  KeyCode::Digit6,
  KeyCode::Digit7,
  KeyCode::Digit8,
  KeyCode::Digit9,
];

pub struct InputPlugin;

impl Plugin for InputPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(Update, (read_movement, read_hotbar, read_pointer));
  }
}

/// Held keys are rewritten every frame.
fn read_movement(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<PlayerIntent>) {
  intent.0.left = keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
  intent.0.right = keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
  intent.0.jump = keys.any_pressed([KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp]);
}

fn read_hotbar(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<PlayerIntent>) {
  for (key, id) in HOTBAR_KEYS.iter().zip(HOTBAR) {
    if keys.just_pressed(*key) {
      intent.0.select = Some(id);
    }
  }
}

/// Clicks are latched until the next fixed tick consumes them.
fn read_pointer(
  buttons: Res<ButtonInput<MouseButton>>,
  windows: Query<&Window, With<PrimaryWindow>>,
  cameras: Query<(&Camera, &GlobalTransform), With<GameCamera>>,
  world: Res<TileWorld>,
  mut intent: ResMut<PlayerIntent>,
) {
  let destroy = buttons.just_pressed(MouseButton::Left);
  let place = buttons.just_pressed(MouseButton::Right);
  if !destroy && !place {
    return;
  }

  let Ok(window) = windows.single() else {
    return;
  };
  let Some(cursor) = window.cursor_position() else {
    return;
  };
  let Ok((camera, camera_transform)) = cameras.single() else {
    return;
  };
  let Ok(screen) = camera.viewport_to_world_2d(camera_transform, cursor) else {
    return;
  };

  let (x, y) = world.view().to_world(screen);
  let target = TilePos::containing(x, y);
  if destroy {
    intent.0.destroy = Some(target);
  }
  if place {
    intent.0.place = Some(target);
  }
}
