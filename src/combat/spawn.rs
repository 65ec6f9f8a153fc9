//! Combat domain: enemy and projectile spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::{GameLayer, ShotKind, ShotRequest};
use crate::combat::ai::bull::BullCharge;
use crate::combat::ai::snail::SnailPatrol;
use crate::combat::components::{Enemy, EnemyKind, Health, Projectile, SnailShell};
use crate::content::{EnemyTuning, ShootTuning};
use crate::level::LevelEntity;

fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::Enemy,
        [
            GameLayer::Ground,
            GameLayer::Wall,
            GameLayer::Player,
            GameLayer::Enemy,
            GameLayer::PlayerProjectile,
        ],
    )
}

pub fn spawn_bull(commands: &mut Commands, position: Vec2, tuning: &EnemyTuning) -> Entity {
    let kind = EnemyKind::Bull;
    let size = kind.size();

    commands
        .spawn((
            (
                Enemy { kind },
                Health::new(tuning.bull.health),
                BullCharge::default(),
                LevelEntity,
            ),
            Sprite {
                color: kind.color(),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
            (
                RigidBody::Dynamic,
                Collider::rectangle(size.x, size.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(1.0),
                Friction::new(0.0),
                CollisionEventsEnabled,
                enemy_layers(),
            ),
        ))
        .id()
}

/// Snails glide along their patrol without gravity and cannot be hurt.
pub fn spawn_snail(commands: &mut Commands, position: Vec2) -> Entity {
    let kind = EnemyKind::Snail;
    let size = kind.size();

    commands
        .spawn((
            (Enemy { kind }, SnailPatrol::new(position.x), LevelEntity),
            Transform::from_xyz(position.x, position.y, 0.0),
            Visibility::default(),
            (
                RigidBody::Kinematic,
                Collider::rectangle(size.x, size.y),
                CollisionEventsEnabled,
                enemy_layers(),
            ),
        ))
        .with_children(|parent| {
            parent.spawn((
                SnailShell,
                Sprite {
                    color: kind.color(),
                    custom_size: Some(size),
                    ..default()
                },
                Transform::default(),
            ));
        })
        .id()
}

/// Spawn the projectile for a fired shot. Charged shots are drawn larger.
pub fn spawn_projectile(
    commands: &mut Commands,
    shooter: Entity,
    shot: &ShotRequest,
    tuning: &ShootTuning,
) -> Entity {
    let radius = match shot.kind {
        ShotKind::Quick => tuning.projectile_radius,
        ShotKind::Charged => tuning.projectile_radius * 2.0,
    };
    let color = match shot.kind {
        ShotKind::Quick => Color::srgb(1.0, 0.9, 0.4),
        ShotKind::Charged => Color::srgb(0.4, 0.9, 1.0),
    };

    commands
        .spawn((
            (
                Projectile {
                    shooter,
                    kind: shot.kind,
                    damage: shot.damage,
                    lifetime: tuning.projectile_lifetime,
                },
                LevelEntity,
            ),
            Sprite {
                color,
                custom_size: Some(Vec2::splat(radius * 2.0)),
                ..default()
            },
            Transform::from_xyz(shot.origin.x, shot.origin.y, 1.0),
            (
                RigidBody::Dynamic,
                Collider::circle(radius),
                Sensor,
                CollisionEventsEnabled,
                GravityScale(0.0),
                LinearVelocity(shot.direction * shot.speed),
                // Players, portals and coins are never hit
                CollisionLayers::new(
                    GameLayer::PlayerProjectile,
                    [GameLayer::Ground, GameLayer::Wall, GameLayer::Enemy],
                ),
            ),
        ))
        .id()
}
