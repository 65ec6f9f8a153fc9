//! Character domain: the player's state machine, dash and shooting, plus
//! the plugin wiring that drives it from input and avian physics.

mod components;
mod dash;
#[cfg(feature = "dev-tools")]
mod dev;
mod events;
mod input;
mod machine;
mod physics;
mod shoot;
mod states;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    BoxShape, CharacterBody, ColliderProfile, ColliderShapes, Facing, GameLayer, GroundCheck,
    Player,
};
pub use dash::{DashController, DashStep};
pub use events::{
    DashUnlockedEvent, DieRequest, PlayerDiedEvent, ShotFiredEvent, StateChangedEvent,
};
pub use input::{CharacterInput, TriggerInput};
pub use machine::{
    Character, CharacterStateMachine, StateChange, TickContext, TickReport, VelocityDriver,
};
pub use physics::{PhysicsProbe, SpatialProbe, terrain_filter};
pub use shoot::{ChargeMeter, ShootController, ShotKind, ShotRequest, aim_direction};
pub use states::{AnimationPose, JumpKind, StateId, animation_pose};

use bevy::prelude::*;

use crate::character::input::sample_input;
use crate::character::systems::{
    apply_collider_profile, apply_die_requests, configure_gravity, drive_character,
    end_dash_on_contact, unlock_dash_on_defeat, update_pose,
};

/// Ordering anchor for systems that consume this frame's character output.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterSet;

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CharacterInput>()
            .add_message::<StateChangedEvent>()
            .add_message::<ShotFiredEvent>()
            .add_message::<DieRequest>()
            .add_message::<PlayerDiedEvent>()
            .add_message::<DashUnlockedEvent>()
            .add_systems(Startup, configure_gravity)
            .add_systems(
                Update,
                (
                    sample_input,
                    unlock_dash_on_defeat,
                    apply_die_requests,
                    end_dash_on_contact,
                    drive_character,
                    apply_collider_profile,
                    update_pose,
                )
                    .chain()
                    .in_set(CharacterSet),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, dev::draw_probes.after(CharacterSet));
    }
}
