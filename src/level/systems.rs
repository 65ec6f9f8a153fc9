//! Level domain: loading, pickups, portals and the death reload.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::{
    Character, CharacterStateMachine, ColliderProfile, ColliderShapes, DieRequest, GameLayer,
    GroundCheck, Player, PlayerDiedEvent,
};
use crate::combat::{spawn_bull, spawn_snail};
use crate::content::{CharacterTuning, EnemyTuning, LevelTuning};
use crate::core::{MainCamera, RunProgress};
use crate::level::components::{Coin, Ground, LevelEntity, Portal, Wall, coin_motion};
use crate::level::data::{Block, BlockKind, LevelLayout, layout};
use crate::level::events::{CoinCollectedEvent, LevelLoadRequest, LevelLoadedEvent, LoadReason};
use crate::level::resources::{CurrentLevel, LevelFlow};

const COIN_SIZE: f32 = 16.0;
const PORTAL_SIZE: Vec2 = Vec2::new(40.0, 80.0);
/// Camera position relative to the first spawn; the follow offset is
/// captured from it.
const START_FRAMING: Vec2 = Vec2::new(0.0, 120.0);

pub(crate) fn request_start_level(
    tuning: Res<LevelTuning>,
    mut requests: MessageWriter<LevelLoadRequest>,
) {
    requests.write(LevelLoadRequest {
        target: tuning.start_level.clone(),
        reason: LoadReason::Start,
    });
}

/// Coins the player should hold after a load for `reason`.
pub fn coins_after_load(reason: LoadReason, held: u32, entry_coins: u32) -> u32 {
    match reason {
        LoadReason::Start => 0,
        LoadReason::Portal => held,
        LoadReason::Reload => entry_coins,
    }
}

/// Tear down the current level and build the requested one. Only the last
/// request of a frame is honoured.
pub(crate) fn load_level(
    mut commands: Commands,
    mut requests: MessageReader<LevelLoadRequest>,
    mut loaded_events: MessageWriter<LevelLoadedEvent>,
    mut current: ResMut<CurrentLevel>,
    mut flow: ResMut<LevelFlow>,
    character_tuning: Res<CharacterTuning>,
    enemy_tuning: Res<EnemyTuning>,
    progress: Res<RunProgress>,
    level_entities: Query<Entity, With<LevelEntity>>,
    player_query: Query<&Character, With<Player>>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };

    let Some(layout) = layout(&request.target) else {
        warn!("Unknown level '{}', load skipped", request.target);
        return;
    };

    let held = player_query.iter().map(|c| c.coins).max().unwrap_or(0);
    let coins = coins_after_load(request.reason, held, current.entry_coins);

    for entity in &level_entities {
        commands.entity(entity).despawn();
    }

    spawn_terrain(&mut commands, &layout);
    spawn_pickups(&mut commands, &layout);
    for position in &layout.bulls {
        spawn_bull(&mut commands, *position, &enemy_tuning);
    }
    for position in &layout.snails {
        spawn_snail(&mut commands, *position);
    }
    spawn_player(
        &mut commands,
        layout.player_spawn,
        &character_tuning,
        progress.dash_unlocked,
        coins,
    );

    if request.reason == LoadReason::Start {
        let framed = layout.player_spawn + START_FRAMING;
        for mut transform in &mut camera_query {
            transform.translation.x = framed.x;
            transform.translation.y = framed.y;
        }
    }

    current.name = Some(layout.name.to_string());
    current.entry_coins = coins;
    flow.clear();

    info!(
        "Loaded level '{}' ({:?}): {} blocks, {} coins, {} enemies, carrying {} coins",
        layout.name,
        request.reason,
        layout.blocks.len(),
        layout.coins.len(),
        layout.bulls.len() + layout.snails.len(),
        coins
    );
    loaded_events.write(LevelLoadedEvent {
        name: layout.name.to_string(),
        coins,
    });
}

fn spawn_terrain(commands: &mut Commands, layout: &LevelLayout) {
    let ground_color = Color::srgb(0.35, 0.4, 0.35);
    let wall_color = Color::srgb(0.25, 0.25, 0.35);
    let blocks_hit_by = [
        GameLayer::Player,
        GameLayer::Enemy,
        GameLayer::PlayerProjectile,
    ];

    for Block { kind, center, size } in layout.blocks.iter().copied() {
        let transform = Transform::from_xyz(center.x, center.y, 0.0);
        let physics = (
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        );

        match kind {
            BlockKind::Ground => {
                commands.spawn((
                    Ground,
                    LevelEntity,
                    Sprite {
                        color: ground_color,
                        custom_size: Some(size),
                        ..default()
                    },
                    transform,
                    physics,
                    CollisionLayers::new(GameLayer::Ground, blocks_hit_by),
                ));
            }
            BlockKind::Wall => {
                commands.spawn((
                    Wall,
                    LevelEntity,
                    Sprite {
                        color: wall_color,
                        custom_size: Some(size),
                        ..default()
                    },
                    transform,
                    physics,
                    CollisionLayers::new(GameLayer::Wall, blocks_hit_by),
                ));
            }
        }
    }
}

fn spawn_pickups(commands: &mut Commands, layout: &LevelLayout) {
    for position in &layout.coins {
        commands.spawn((
            Coin {
                value: 1,
                base_y: position.y,
            },
            LevelEntity,
            Sprite {
                color: Color::srgb(1.0, 0.85, 0.2),
                custom_size: Some(Vec2::splat(COIN_SIZE)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.5),
            RigidBody::Static,
            Collider::circle(COIN_SIZE * 0.5),
            Sensor,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ));
    }

    for portal in &layout.portals {
        commands.spawn((
            Portal {
                target: portal.target.to_string(),
            },
            LevelEntity,
            Sprite {
                color: Color::srgb(0.4, 0.6, 0.9),
                custom_size: Some(PORTAL_SIZE),
                ..default()
            },
            Transform::from_xyz(portal.position.x, portal.position.y, -0.5),
            RigidBody::Static,
            Collider::rectangle(PORTAL_SIZE.x, PORTAL_SIZE.y),
            Sensor,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ));
    }
}

pub fn spawn_player(
    commands: &mut Commands,
    position: Vec2,
    tuning: &CharacterTuning,
    dash_unlocked: bool,
    coins: u32,
) -> Entity {
    let shapes = ColliderShapes::from_tuning(&tuning.collider);
    let mut character = Character::new(tuning);
    character.can_dash = dash_unlocked;
    character.coins = coins;

    commands
        .spawn((
            (
                Player,
                character,
                CharacterStateMachine::default(),
                GroundCheck {
                    offset: Vec2::new(0.0, tuning.probe.ground_check_offset_y),
                    radius: tuning.probe.ground_check_radius,
                },
                shapes,
                LevelEntity,
            ),
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(shapes.standing.size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.0),
            (
                RigidBody::Dynamic,
                shapes.collider(ColliderProfile::Standing),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(1.0),
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [
                        GameLayer::Ground,
                        GameLayer::Wall,
                        GameLayer::Enemy,
                        GameLayer::Sensor,
                    ],
                ),
            ),
        ))
        .id()
}

pub(crate) fn collect_coins(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut collected_events: MessageWriter<CoinCollectedEvent>,
    coin_query: Query<&Coin>,
    mut player_query: Query<&mut Character, With<Player>>,
) {
    let mut taken: Vec<Entity> = Vec::new();

    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (coin_entity, other) in pairs {
            if taken.contains(&coin_entity) {
                continue;
            }
            let Ok(coin) = coin_query.get(coin_entity) else {
                continue;
            };
            let Ok(mut character) = player_query.get_mut(other) else {
                continue;
            };
            if !character.alive {
                continue;
            }

            let total = character.add_coins(coin.value);
            taken.push(coin_entity);
            commands.entity(coin_entity).despawn();
            info!("Coin collected: +{} (total {})", coin.value, total);
            collected_events.write(CoinCollectedEvent {
                player: other,
                value: coin.value,
                total,
            });
        }
    }
}

pub(crate) fn enter_portals(
    mut collision_events: MessageReader<CollisionStart>,
    mut requests: MessageWriter<LevelLoadRequest>,
    portal_query: Query<&Portal>,
    player_query: Query<&Character, With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (portal_entity, other) in pairs {
            let Ok(portal) = portal_query.get(portal_entity) else {
                continue;
            };
            let Ok(character) = player_query.get(other) else {
                continue;
            };
            if !character.alive {
                continue;
            }

            info!("Portal entered: -> '{}'", portal.target);
            requests.write(LevelLoadRequest {
                target: portal.target.clone(),
                reason: LoadReason::Portal,
            });
        }
    }
}

pub(crate) fn fall_out_of_level(
    current: Res<CurrentLevel>,
    mut die_requests: MessageWriter<DieRequest>,
    player_query: Query<(Entity, &Character, &Transform), With<Player>>,
) {
    let Some(kill_y) = current
        .name
        .as_deref()
        .and_then(layout)
        .map(|layout| layout.kill_y)
    else {
        return;
    };

    for (entity, character, transform) in &player_query {
        if character.alive && transform.translation.y < kill_y {
            debug!("Player fell out of the level at y={}", transform.translation.y);
            die_requests.write(DieRequest { entity });
        }
    }
}

pub(crate) fn schedule_reload_on_death(
    mut died_events: MessageReader<PlayerDiedEvent>,
    mut flow: ResMut<LevelFlow>,
    tuning: Res<LevelTuning>,
) {
    for _ in died_events.read() {
        if flow.arm_reload(tuning.death_reload_delay) {
            info!("Reloading level in {:.1}s", tuning.death_reload_delay);
        }
    }
}

pub(crate) fn tick_level_flow(
    time: Res<Time>,
    current: Res<CurrentLevel>,
    mut flow: ResMut<LevelFlow>,
    mut requests: MessageWriter<LevelLoadRequest>,
) {
    if !flow.tick(time.delta_secs()) {
        return;
    }
    let Some(name) = current.name.clone() else {
        return;
    };
    requests.write(LevelLoadRequest {
        target: name,
        reason: LoadReason::Reload,
    });
}

pub(crate) fn animate_coins(
    time: Res<Time>,
    tuning: Res<LevelTuning>,
    mut query: Query<(&Coin, &mut Transform)>,
) {
    let elapsed = time.elapsed_secs();
    let (scale_x, bob) = coin_motion(
        elapsed,
        tuning.coin_spin_speed,
        tuning.coin_bob_speed,
        tuning.coin_bob_height,
    );

    for (coin, mut transform) in &mut query {
        transform.scale.x = scale_x;
        transform.translation.y = coin.base_y + bob;
    }
}
