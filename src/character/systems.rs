//! Character domain: systems bridging the ECS and avian to the character core.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::components::{CharacterBody, ColliderShapes, GroundCheck, Player};
use crate::character::events::{
    DashUnlockedEvent, DieRequest, PlayerDiedEvent, ShotFiredEvent, StateChangedEvent,
};
use crate::character::input::CharacterInput;
use crate::character::machine::{Character, CharacterStateMachine, TickContext};
use crate::character::physics::SpatialProbe;
use crate::character::states::AnimationPose;
use crate::combat::EnemyDefeatedEvent;
use crate::content::CharacterTuning;
use crate::core::RunProgress;

fn read_body(transform: &Transform, velocity: &LinearVelocity, gravity: &GravityScale) -> CharacterBody {
    CharacterBody {
        position: transform.translation.truncate(),
        velocity: velocity.0,
        gravity_scale: gravity.0,
    }
}

fn write_body(
    body: &CharacterBody,
    transform: &mut Transform,
    velocity: &mut LinearVelocity,
    gravity: &mut GravityScale,
) {
    transform.translation.x = body.position.x;
    transform.translation.y = body.position.y;
    velocity.0 = body.velocity;
    gravity.0 = body.gravity_scale;
}

pub(crate) fn configure_gravity(mut commands: Commands, tuning: Res<CharacterTuning>) {
    commands.insert_resource(Gravity(Vec2::NEG_Y * tuning.gravity));
}

pub(crate) fn drive_character(
    time: Res<Time>,
    input: Res<CharacterInput>,
    tuning: Res<CharacterTuning>,
    spatial_query: SpatialQuery,
    mut state_events: MessageWriter<StateChangedEvent>,
    mut shot_events: MessageWriter<ShotFiredEvent>,
    mut query: Query<
        (
            Entity,
            &mut Character,
            &mut CharacterStateMachine,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
            Option<&GroundCheck>,
            Option<&ColliderShapes>,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (entity, mut character, mut machine, mut transform, mut velocity, mut gravity, ground, shapes) in
        &mut query
    {
        let mut body = read_body(&transform, &velocity, &gravity);
        let probe = SpatialProbe::new(&spatial_query, body.position, ground, shapes, &tuning.probe);
        let ctx = TickContext {
            dt,
            now: time.elapsed_secs(),
            input: &input,
            probe: &probe,
            tuning: &tuning,
        };

        let report = machine.tick(&mut character, &mut body, &ctx);
        write_body(&body, &mut transform, &mut velocity, &mut gravity);

        for change in report.changes {
            state_events.write(StateChangedEvent {
                entity,
                from: change.from,
                to: change.to,
            });
        }
        for shot in report.shots {
            shot_events.write(ShotFiredEvent {
                shooter: entity,
                shot,
            });
        }
    }
}

/// Swap the physics collider when the character's profile changed.
pub(crate) fn apply_collider_profile(
    mut query: Query<(&Character, &mut ColliderShapes, &mut Collider), With<Player>>,
) {
    for (character, mut shapes, mut collider) in &mut query {
        if shapes.applied != character.collider_profile {
            *collider = shapes.collider(character.collider_profile);
            shapes.applied = character.collider_profile;
            debug!("Collider profile: {:?}", character.collider_profile);
        }
    }
}

/// Any solid contact cuts an active dash short.
pub(crate) fn end_dash_on_contact(
    mut collision_events: MessageReader<CollisionStart>,
    tuning: Res<CharacterTuning>,
    sensors: Query<(), With<Sensor>>,
    mut player_query: Query<
        (
            &mut Character,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
        ),
        With<Player>,
    >,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player_entity, other) in pairs {
            if sensors.contains(other) {
                continue;
            }
            let Ok((mut character, mut transform, mut velocity, mut gravity)) =
                player_query.get_mut(player_entity)
            else {
                continue;
            };
            if !character.dash.is_active() {
                continue;
            }

            let mut body = read_body(&transform, &velocity, &gravity);
            if character.end_dash(&mut body, &tuning) {
                write_body(&body, &mut transform, &mut velocity, &mut gravity);
                debug!("Dash interrupted by contact with {:?}", other);
            }
        }
    }
}

pub(crate) fn apply_die_requests(
    mut requests: MessageReader<DieRequest>,
    mut died_events: MessageWriter<PlayerDiedEvent>,
    tuning: Res<CharacterTuning>,
    mut player_query: Query<
        (
            &mut Character,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
        ),
        With<Player>,
    >,
) {
    for request in requests.read() {
        let Ok((mut character, mut transform, mut velocity, mut gravity)) =
            player_query.get_mut(request.entity)
        else {
            continue;
        };

        let mut body = read_body(&transform, &velocity, &gravity);
        if character.die(&mut body, &tuning) {
            write_body(&body, &mut transform, &mut velocity, &mut gravity);
            info!("Player died");
            died_events.write(PlayerDiedEvent {
                entity: request.entity,
            });
        }
    }
}

/// Defeating an enemy unlocks dash for the rest of the run.
pub(crate) fn unlock_dash_on_defeat(
    mut defeated: MessageReader<EnemyDefeatedEvent>,
    mut unlocked_events: MessageWriter<DashUnlockedEvent>,
    mut progress: ResMut<RunProgress>,
    mut player_query: Query<(Entity, &mut Character), With<Player>>,
) {
    for event in defeated.read() {
        progress.dash_unlocked = true;

        for (entity, mut character) in &mut player_query {
            if character.unlock_dash() {
                info!("Dash unlocked by defeating {:?}", event.kind);
                unlocked_events.write(DashUnlockedEvent { entity });
            }
        }
    }
}

fn pose_color(pose: AnimationPose) -> Color {
    match pose {
        AnimationPose::Idle => Color::srgb(0.9, 0.9, 0.9),
        AnimationPose::Walk => Color::srgb(0.8, 0.9, 0.8),
        AnimationPose::Run => Color::srgb(0.6, 0.9, 0.6),
        AnimationPose::Rising => Color::srgb(0.6, 0.8, 1.0),
        AnimationPose::Falling => Color::srgb(0.4, 0.6, 0.9),
        AnimationPose::Crouch => Color::srgb(0.9, 0.8, 0.5),
        AnimationPose::Slide => Color::srgb(1.0, 0.7, 0.3),
        AnimationPose::WallCling => Color::srgb(0.7, 0.5, 0.9),
        AnimationPose::Shoot => Color::srgb(1.0, 0.5, 0.5),
    }
}

/// Stand-in for animation playback: tint and flip the sprite by pose.
pub(crate) fn update_pose(
    mut query: Query<
        (
            &Character,
            &CharacterStateMachine,
            &LinearVelocity,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    for (character, machine, velocity, mut sprite) in &mut query {
        sprite.color = if !character.alive {
            Color::srgb(0.3, 0.3, 0.3)
        } else if character.dash.is_active() {
            Color::srgb(1.0, 1.0, 0.4)
        } else {
            pose_color(machine.pose(velocity.y))
        };
        sprite.flip_x = character.facing.sign() < 0.0;
    }
}
