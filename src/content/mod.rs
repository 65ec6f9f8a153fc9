//! Content domain: tuning data loaded from RON at startup.

mod loader;
#[cfg(test)]
mod tests;
mod tuning;

pub use loader::{ConfigLoadError, TUNING_PATH, load_tuning, parse_tuning};
pub use tuning::{
    BullTuning, CharacterTuning, ColliderTuning, DashTuning, EnemyTuning, JumpRefill, JumpTuning,
    LevelTuning, ProbeTuning, ShootTuning, SlideTuning, SnailTuning, TuningFile, WallTuning,
};

use std::path::Path;

use bevy::prelude::*;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        // Loaded synchronously so every Startup system already sees final values.
        let tuning = match load_tuning(Path::new(TUNING_PATH)) {
            Ok(tuning) => {
                info!("Loaded tuning from {}", TUNING_PATH);
                tuning
            }
            Err(e) => {
                warn!("{}; using built-in tuning defaults", e);
                TuningFile::default()
            }
        };

        app.insert_resource(tuning.character)
            .insert_resource(tuning.enemies)
            .insert_resource(tuning.level);
    }
}
