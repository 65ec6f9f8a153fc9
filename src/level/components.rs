//! Level domain: terrain, pickups and teardown markers.

use bevy::prelude::*;

/// Everything spawned for a level; despawned as a group on (re)load.
#[derive(Component, Debug)]
pub struct LevelEntity;

#[derive(Component, Debug)]
pub struct Ground;

#[derive(Component, Debug)]
pub struct Wall;

/// A spinning, bobbing pickup worth `value` coins
#[derive(Component, Debug)]
pub struct Coin {
    pub value: u32,
    /// Rest height the bob oscillates around.
    pub base_y: f32,
}

/// Touching it loads `target`
#[derive(Component, Debug)]
pub struct Portal {
    pub target: String,
}

/// Spin (as horizontal scale) and vertical bob offset at `elapsed` seconds.
pub fn coin_motion(elapsed: f32, spin_speed: f32, bob_speed: f32, bob_height: f32) -> (f32, f32) {
    let angle = (elapsed * spin_speed).to_radians();
    let scale_x = angle.cos();
    let bob = (elapsed * bob_speed).sin() * bob_height;
    (scale_x, bob)
}
