//! Character domain: the dash override.
//!
//! While a dash is active it owns the body's velocity outright: gravity is
//! suspended, velocity is pinned to `direction * speed`, and the body is
//! lifted by a small hop. Ending the dash (timer expiry or any contact)
//! undoes all three and starts the cooldown clock.

use bevy::prelude::*;

use crate::character::components::CharacterBody;
use crate::content::DashTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStep {
    Continuing,
    Ended,
}

#[derive(Debug, Clone, Default)]
pub struct DashController {
    active: bool,
    remaining: f32,
    direction: Vec2,
    cooldown_remaining: f32,
    saved_gravity_scale: f32,
    lift_applied: f32,
}

impl DashController {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Not dashing and the cooldown has elapsed.
    pub fn is_ready(&self) -> bool {
        !self.active && self.cooldown_remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// The cooldown clock only runs between dashes.
    pub fn tick_cooldown(&mut self, dt: f32) {
        if !self.active && self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
    }

    /// Begin a dash along `direction` (expected normalized). Callers check
    /// [`is_ready`](Self::is_ready) and any unlock gate first.
    pub fn start(&mut self, body: &mut CharacterBody, direction: Vec2, tuning: &DashTuning) {
        self.active = true;
        self.remaining = tuning.duration;
        self.direction = direction;
        self.saved_gravity_scale = body.gravity_scale;
        self.lift_applied = tuning.lift;

        body.gravity_scale = 0.0;
        body.velocity = direction * tuning.speed;
        body.position.y += tuning.lift;

        debug!(
            "Dash start: direction={:?}, duration={}",
            direction, tuning.duration
        );
    }

    /// Advance an active dash by `dt`, pinning velocity. Ends it on expiry.
    pub fn advance(&mut self, dt: f32, body: &mut CharacterBody, tuning: &DashTuning) -> DashStep {
        if !self.active {
            return DashStep::Ended;
        }

        self.remaining -= dt;
        body.velocity = self.direction * tuning.speed;

        if self.remaining <= 0.0 {
            self.end(body, tuning);
            DashStep::Ended
        } else {
            DashStep::Continuing
        }
    }

    /// Restore gravity, stop, drop the lift and start the cooldown.
    /// Returns false if no dash was active.
    pub fn end(&mut self, body: &mut CharacterBody, tuning: &DashTuning) -> bool {
        if !self.active {
            return false;
        }

        self.active = false;
        self.remaining = 0.0;
        self.cooldown_remaining = tuning.cooldown;

        body.gravity_scale = self.saved_gravity_scale;
        body.velocity = Vec2::ZERO;
        body.position.y -= self.lift_applied;
        self.lift_applied = 0.0;

        debug!("Dash end: cooldown={}", tuning.cooldown);
        true
    }
}
