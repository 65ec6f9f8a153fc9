//! Core domain: camera setup and follow.

use bevy::prelude::*;

use crate::character::Player;
use crate::core::components::{CameraFollow, MainCamera};

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        MainCamera,
        CameraFollow::default(),
        Transform::default(),
    ));
}

pub(crate) fn follow_player(
    player_query: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut camera_query: Query<(&mut Transform, &mut CameraFollow), With<MainCamera>>,
) {
    let player_pos = player_query
        .iter()
        .next()
        .map(|t| t.translation.truncate());

    for (mut transform, mut follow) in &mut camera_query {
        if let Some(target) = follow.target(transform.translation.truncate(), player_pos) {
            transform.translation.x = target.x;
            transform.translation.y = target.y;
        }
    }
}
