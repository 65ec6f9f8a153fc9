//! Core domain: camera and run-wide progress.

mod components;
mod resources;
mod systems;


pub use components::{CameraFollow, MainCamera};
pub use resources::RunProgress;

use bevy::prelude::*;

use crate::character::CharacterSet;
use crate::core::systems::{follow_player, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunProgress>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, follow_player.after(CharacterSet));
    }
}
