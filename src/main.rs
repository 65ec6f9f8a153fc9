mod character;
mod combat;
mod content;
mod core;
mod level;
mod ui;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ninja Platformer".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((
            content::ContentPlugin,
            core::CorePlugin,
            character::CharacterPlugin,
            combat::CombatPlugin,
            level::LevelPlugin,
            ui::UiPlugin,
        ))
        .run();
}
