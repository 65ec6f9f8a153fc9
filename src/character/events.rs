//! Character domain: messages published by the character core.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::character::shoot::ShotRequest;
use crate::character::states::StateId;

/// Emitted once per completed state switch
#[derive(Debug)]
pub struct StateChangedEvent {
    pub entity: Entity,
    pub from: StateId,
    pub to: StateId,
}

impl Message for StateChangedEvent {}

/// A projectile the character fired this frame
#[derive(Debug)]
pub struct ShotFiredEvent {
    pub shooter: Entity,
    pub shot: ShotRequest,
}

impl Message for ShotFiredEvent {}

/// Ask the character core to kill `entity` (hazard contact, enemy touch)
#[derive(Debug)]
pub struct DieRequest {
    pub entity: Entity,
}

impl Message for DieRequest {}

/// The player died; the level flow schedules a reload
#[derive(Debug)]
pub struct PlayerDiedEvent {
    pub entity: Entity,
}

impl Message for PlayerDiedEvent {}

#[derive(Debug)]
pub struct DashUnlockedEvent {
    pub entity: Entity,
}

impl Message for DashUnlockedEvent {}
