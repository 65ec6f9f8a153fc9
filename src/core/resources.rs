//! Core domain: progress that outlives a level reload.

use bevy::prelude::*;

/// Unlocks earned during this run. Reloading a level respawns the player,
/// so anything the player earned is re-applied from here.
#[derive(Resource, Debug, Default)]
pub struct RunProgress {
    pub dash_unlocked: bool,
}
