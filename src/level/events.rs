//! Level domain: level flow and pickup events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Why a level is being (re)loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadReason {
    Start,
    /// Entered through a portal; coins carry over.
    Portal,
    /// Reloaded after death; coins reset to the level-entry count.
    Reload,
}

#[derive(Debug)]
pub struct LevelLoadRequest {
    pub target: String,
    pub reason: LoadReason,
}

impl Message for LevelLoadRequest {}

#[derive(Debug)]
pub struct LevelLoadedEvent {
    pub name: String,
    /// Coins the respawned player starts with.
    pub coins: u32,
}

impl Message for LevelLoadedEvent {}

#[derive(Debug)]
pub struct CoinCollectedEvent {
    pub player: Entity,
    pub value: u32,
    pub total: u32,
}

impl Message for CoinCollectedEvent {}
