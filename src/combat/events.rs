//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::components::EnemyKind;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: i32,
}

impl Message for DamageEvent {}

/// Emitted once when an entity's health runs out
#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// An enemy was killed by the player
#[derive(Debug)]
pub struct EnemyDefeatedEvent {
    pub entity: Entity,
    pub kind: EnemyKind,
}

impl Message for EnemyDefeatedEvent {}
