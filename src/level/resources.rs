//! Level domain: current level and the death-reload timer.

use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct CurrentLevel {
    pub name: Option<String>,
    /// Coins held when this level was entered; restored on a death reload.
    pub entry_coins: u32,
}

/// Counts down from death to the level reload
#[derive(Resource, Debug, Default)]
pub struct LevelFlow {
    reload_timer: Option<f32>,
}

impl LevelFlow {
    pub fn is_reload_pending(&self) -> bool {
        self.reload_timer.is_some()
    }

    /// Returns false if a reload is already pending.
    pub fn arm_reload(&mut self, delay: f32) -> bool {
        if self.reload_timer.is_some() {
            return false;
        }
        self.reload_timer = Some(delay);
        true
    }

    /// Returns true exactly once, on the tick the timer runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.reload_timer.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.reload_timer = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.reload_timer = None;
    }
}
