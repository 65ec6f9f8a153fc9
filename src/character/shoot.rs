//! Character domain: quick shots and the charge meter.

use bevy::prelude::*;

use crate::character::components::Facing;
use crate::character::input::TriggerInput;
use crate::content::ShootTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotKind {
    /// Press-to-fire, gated by the shoot cooldown.
    Quick,
    /// Released after a full charge.
    Charged,
}

/// A projectile the character wants spawned this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub kind: ShotKind,
    pub origin: Vec2,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub damage: i32,
}

/// Direction from `origin` toward the pointer, or along `facing` when there
/// is no pointer or it sits on the origin.
pub fn aim_direction(origin: Vec2, pointer: Option<Vec2>, facing: Facing) -> Vec2 {
    pointer
        .map(|p| (p - origin).normalize_or_zero())
        .filter(|d| *d != Vec2::ZERO)
        .unwrap_or_else(|| facing.direction())
}

/// Charge accumulated while a trigger is held.
///
/// Release fires only at full charge; anything less is discarded.
#[derive(Debug, Clone, Default)]
pub struct ChargeMeter {
    charge: f32,
    charging: bool,
}

impl ChargeMeter {
    pub fn charge(&self) -> f32 {
        self.charge
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    pub fn fraction(&self, charge_time: f32) -> f32 {
        if charge_time <= 0.0 {
            return if self.charging { 1.0 } else { 0.0 };
        }
        (self.charge / charge_time).clamp(0.0, 1.0)
    }

    pub fn press(&mut self) {
        self.charging = true;
        self.charge = 0.0;
    }

    pub fn hold(&mut self, dt: f32, charge_time: f32) {
        if self.charging {
            self.charge = (self.charge + dt).min(charge_time);
        }
    }

    /// Returns true when the release should fire.
    pub fn release(&mut self, charge_time: f32) -> bool {
        if !self.charging {
            return false;
        }
        let full = self.charge >= charge_time;
        self.cancel();
        full
    }

    pub fn cancel(&mut self) {
        self.charging = false;
        self.charge = 0.0;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShootController {
    cooldown_remaining: f32,
    meter: ChargeMeter,
    queued: Vec<ShotRequest>,
}

impl ShootController {
    pub fn meter(&self) -> &ChargeMeter {
        &self.meter
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
    }

    /// Fire a quick shot unless the cooldown is still running.
    pub fn try_quick_fire(&mut self, origin: Vec2, direction: Vec2, tuning: &ShootTuning) -> bool {
        if !self.is_ready() {
            return false;
        }

        self.cooldown_remaining = tuning.cooldown;
        self.queue(ShotKind::Quick, origin, direction, tuning);
        true
    }

    /// Feed one frame of charge-trigger input. Returns true if a charged shot fired.
    pub fn process_charge(
        &mut self,
        trigger: TriggerInput,
        dt: f32,
        origin: Vec2,
        direction: Vec2,
        tuning: &ShootTuning,
    ) -> bool {
        if trigger.pressed {
            self.meter.press();
        }
        if trigger.held {
            self.meter.hold(dt, tuning.charge_time);
        }
        if trigger.released && self.meter.release(tuning.charge_time) {
            self.queue(ShotKind::Charged, origin, direction, tuning);
            return true;
        }
        false
    }

    pub fn cancel_charge(&mut self) {
        self.meter.cancel();
    }

    /// Drain shots queued since the last call.
    pub fn take_shots(&mut self) -> Vec<ShotRequest> {
        std::mem::take(&mut self.queued)
    }

    fn queue(&mut self, kind: ShotKind, origin: Vec2, direction: Vec2, tuning: &ShootTuning) {
        debug!("Shot fired: {:?} toward {:?}", kind, direction);
        self.queued.push(ShotRequest {
            kind,
            origin,
            direction,
            speed: tuning.projectile_speed,
            damage: tuning.projectile_damage,
        });
    }
}
