//! Combat domain: projectiles, damage, deaths and enemy contact.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::{CharacterBody, DieRequest, Player, ShotFiredEvent};
use crate::combat::ai::bull::BullCharge;
use crate::combat::ai::snail::SnailPatrol;
use crate::combat::components::{
    DamageOutcome, Enemy, Health, HitTarget, Projectile, ProjectileHit, classify_projectile_hit,
};
use crate::combat::events::{DamageEvent, DeathEvent, EnemyDefeatedEvent};
use crate::combat::spawn::spawn_projectile;
use crate::content::{CharacterTuning, EnemyTuning};

pub(crate) fn spawn_fired_projectiles(
    mut commands: Commands,
    mut shot_events: MessageReader<ShotFiredEvent>,
    tuning: Res<CharacterTuning>,
) {
    for event in shot_events.read() {
        spawn_projectile(&mut commands, event.shooter, &event.shot, &tuning.shoot);
    }
}

pub(crate) fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Projectile)>,
) {
    let dt = time.delta_secs();
    for (entity, mut projectile) in &mut query {
        projectile.lifetime -= dt;
        if projectile.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn detect_projectile_hits(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    projectile_query: Query<&Projectile>,
    player_query: Query<(), With<Player>>,
    sensor_query: Query<(), (With<Sensor>, Without<Projectile>)>,
    health_query: Query<(), With<Health>>,
) {
    let mut spent: Vec<Entity> = Vec::new();

    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (projectile_entity, other) in pairs {
            if spent.contains(&projectile_entity) {
                continue;
            }
            let Ok(projectile) = projectile_query.get(projectile_entity) else {
                continue;
            };

            let target = HitTarget {
                is_shooter: other == projectile.shooter,
                is_player: player_query.contains(other),
                is_sensor: sensor_query.contains(other),
                damageable: health_query.contains(other),
            };

            match classify_projectile_hit(target, projectile.damage) {
                ProjectileHit::Ignore => continue,
                ProjectileHit::Damage(amount) => {
                    debug!("Projectile hit {:?} for {}", other, amount);
                    damage_events.write(DamageEvent {
                        source: projectile.shooter,
                        target: other,
                        amount,
                    });
                }
                ProjectileHit::Destroy => {}
            }

            spent.push(projectile_entity);
            commands.entity(projectile_entity).despawn();
        }
    }
}

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<(&mut Health, &mut Sprite)>,
) {
    for event in damage_events.read() {
        let Ok((mut health, mut sprite)) = query.get_mut(event.target) else {
            continue;
        };

        match health.take_damage(event.amount) {
            DamageOutcome::Survived => {
                sprite.color = Color::srgb(1.0, 0.5, 0.5);
                debug!(
                    "Damage applied: target={:?}, health={}/{}",
                    event.target, health.current, health.max
                );
            }
            DamageOutcome::Died => {
                death_events.write(DeathEvent {
                    entity: event.target,
                });
            }
            DamageOutcome::AlreadyDead => {}
        }
    }
}

pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    mut defeated_events: MessageWriter<EnemyDefeatedEvent>,
    enemy_query: Query<&Enemy>,
) {
    for event in death_events.read() {
        if let Ok(enemy) = enemy_query.get(event.entity) {
            info!("Enemy defeated: {:?}", enemy.kind);
            defeated_events.write(EnemyDefeatedEvent {
                entity: event.entity,
                kind: enemy.kind,
            });
            commands.entity(event.entity).despawn();
        }
    }
}

/// Enemies kill the player on touch; any other solid contact stops a bull
/// charge or turns a snail around.
pub(crate) fn resolve_enemy_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut die_requests: MessageWriter<DieRequest>,
    tuning: Res<EnemyTuning>,
    enemy_query: Query<(), With<Enemy>>,
    player_query: Query<(), With<Player>>,
    sensor_query: Query<(), With<Sensor>>,
    mut bull_query: Query<
        (
            &mut BullCharge,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
        ),
        Without<Player>,
    >,
    mut snail_query: Query<&mut SnailPatrol>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (enemy_entity, other) in pairs {
            if !enemy_query.contains(enemy_entity) {
                continue;
            }

            if player_query.contains(other) {
                die_requests.write(DieRequest { entity: other });
                continue;
            }
            if sensor_query.contains(other) {
                continue;
            }

            if let Ok((mut bull, mut transform, mut velocity, mut gravity)) =
                bull_query.get_mut(enemy_entity)
            {
                let mut body = CharacterBody {
                    position: transform.translation.truncate(),
                    velocity: velocity.0,
                    gravity_scale: gravity.0,
                };
                if bull.interrupt(&mut body, &tuning.bull) {
                    transform.translation.x = body.position.x;
                    transform.translation.y = body.position.y;
                    velocity.0 = body.velocity;
                    gravity.0 = body.gravity_scale;
                    debug!("Bull charge interrupted by {:?}", other);
                }
            }

            if let Ok(mut snail) = snail_query.get_mut(enemy_entity) {
                snail.reverse();
            }
        }
    }
}
