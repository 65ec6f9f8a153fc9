//! Character domain: per-frame input snapshot and keyboard/mouse sampling.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::MainCamera;

/// Press/hold/release phases of a trigger within one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TriggerInput {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

/// Input intent for the current frame.
///
/// `jump_pressed`, `shoot_pressed` and `dash_pressed` are single-frame edges;
/// `run_held` and `crouch_held` are level-held.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CharacterInput {
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub run_held: bool,
    pub crouch_held: bool,
    pub shoot_pressed: bool,
    pub dash_pressed: bool,
    pub charge: TriggerInput,
    /// Cursor position in world space, if the cursor is over the window.
    pub pointer_world: Option<Vec2>,
}

pub(crate) fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut input: ResMut<CharacterInput>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (aims dashes)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_pressed = keyboard.just_pressed(KeyCode::Space);
    input.run_held = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    input.crouch_held = keyboard.pressed(KeyCode::KeyS)
        || keyboard.pressed(KeyCode::ArrowDown)
        || keyboard.pressed(KeyCode::ControlLeft);
    input.shoot_pressed = keyboard.just_pressed(KeyCode::KeyF);
    input.dash_pressed = keyboard.just_pressed(KeyCode::KeyE);
    input.charge = TriggerInput {
        pressed: mouse.just_pressed(MouseButton::Left),
        held: mouse.pressed(MouseButton::Left),
        released: mouse.just_released(MouseButton::Left),
    };
    input.pointer_world = pointer_world(&windows, &cameras);
}

fn pointer_world(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<Vec2> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.single().ok()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}
