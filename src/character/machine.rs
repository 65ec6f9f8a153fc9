//! Character domain: the character record and the state machine that ticks it.
//!
//! Per-tick order is fixed: timers decay, the landing edge refills jumps, a
//! dash may start, then either the dash or the active state drives velocity
//! (never both), and finally quick fire and the charge trigger are processed.

use bevy::prelude::*;

use crate::character::components::{CharacterBody, ColliderProfile, Facing};
use crate::character::dash::{DashController, DashStep};
use crate::character::input::CharacterInput;
use crate::character::physics::PhysicsProbe;
use crate::character::shoot::{ShootController, ShotRequest, aim_direction};
use crate::character::states::{self, AnimationPose, StateId};
use crate::content::CharacterTuning;

/// Everything a tick reads but does not own.
pub struct TickContext<'a> {
    pub dt: f32,
    /// Elapsed seconds, used to timestamp transitions.
    pub now: f32,
    pub input: &'a CharacterInput,
    pub probe: &'a dyn PhysicsProbe,
    pub tuning: &'a CharacterTuning,
}

/// Long-lived character data shared by every state.
#[derive(Component, Debug, Clone)]
pub struct Character {
    pub facing: Facing,
    pub jumps_remaining: u8,
    /// While positive, grounded reads false.
    pub coyote_timer: f32,
    /// While positive, air control is suppressed after a wall jump.
    pub wall_jump_lock: f32,
    pub was_grounded: bool,
    /// Granted by defeating an enemy; gates [`Character::try_start_dash`].
    pub can_dash: bool,
    pub alive: bool,
    pub coins: u32,
    pub collider_profile: ColliderProfile,
    pub dash: DashController,
    pub shoot: ShootController,
}

impl Character {
    pub fn new(tuning: &CharacterTuning) -> Self {
        Self {
            facing: Facing::Right,
            jumps_remaining: tuning.jump.max_jumps,
            coyote_timer: 0.0,
            wall_jump_lock: 0.0,
            was_grounded: false,
            can_dash: false,
            alive: true,
            coins: 0,
            collider_profile: ColliderProfile::Standing,
            dash: DashController::default(),
            shoot: ShootController::default(),
        }
    }

    pub fn arm_coyote_grace(&mut self, duration: f32) {
        self.coyote_timer = self.coyote_timer.max(duration);
    }

    /// Ground contact, masked to false during the coyote grace window.
    pub fn is_grounded(&self, probe: &dyn PhysicsProbe) -> bool {
        self.coyote_timer <= 0.0 && probe.ground_contact()
    }

    pub fn is_touching_wall(&self, probe: &dyn PhysicsProbe) -> bool {
        probe.wall_contact(self.facing)
    }

    /// Start a dash along the movement input, or along facing without
    /// input. Does nothing unless dash is unlocked and off cooldown.
    pub fn try_start_dash(
        &mut self,
        body: &mut CharacterBody,
        axis: Vec2,
        tuning: &CharacterTuning,
    ) -> bool {
        if !self.can_dash || !self.dash.is_ready() {
            return false;
        }

        let direction = if axis.length_squared() > tuning.input_deadzone * tuning.input_deadzone {
            axis.normalize_or_zero()
        } else {
            self.facing.direction()
        };
        if let Some(facing) = Facing::from_input(direction.x, tuning.input_deadzone) {
            self.facing = facing;
        }

        body.velocity = Vec2::ZERO;
        self.dash.start(body, direction, &tuning.dash);
        true
    }

    /// End an active dash early (contact with anything solid).
    pub fn end_dash(&mut self, body: &mut CharacterBody, tuning: &CharacterTuning) -> bool {
        self.dash.end(body, &tuning.dash)
    }

    /// Disable control and stop the body. Returns false if already dead.
    pub fn die(&mut self, body: &mut CharacterBody, tuning: &CharacterTuning) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.dash.end(body, &tuning.dash);
        self.shoot.cancel_charge();
        body.velocity = Vec2::ZERO;
        true
    }

    /// Returns true the first time dash is unlocked.
    pub fn unlock_dash(&mut self) -> bool {
        let newly = !self.can_dash;
        self.can_dash = true;
        newly
    }

    pub fn add_coins(&mut self, amount: u32) -> u32 {
        self.coins = self.coins.saturating_add(amount);
        self.coins
    }

    pub fn charge_fraction(&self, tuning: &CharacterTuning) -> f32 {
        self.shoot.meter().fraction(tuning.shoot.charge_time)
    }

    /// Fire a quick shot toward `pointer` (or along facing) if the cooldown
    /// allows, turning to face the shot.
    pub fn fire_quick(
        &mut self,
        origin: Vec2,
        pointer: Option<Vec2>,
        tuning: &CharacterTuning,
    ) -> bool {
        let direction = aim_direction(origin, pointer, self.facing);
        if !self.shoot.try_quick_fire(origin, direction, &tuning.shoot) {
            return false;
        }
        if let Some(facing) = Facing::from_input(direction.x, tuning.input_deadzone) {
            self.facing = facing;
        }
        true
    }

    pub fn can_shoot(&self) -> bool {
        self.alive && self.shoot.is_ready()
    }

    pub fn dash_available(&self) -> bool {
        self.alive && self.can_dash && self.dash.is_ready()
    }
}

/// A completed switch, reported to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateChange {
    pub from: StateId,
    pub to: StateId,
    pub at: f32,
}

/// Which mechanic wrote velocity this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VelocityDriver {
    /// Dead characters are not driven.
    #[default]
    None,
    Dash,
    State,
}

#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub driver: VelocityDriver,
    pub changes: Vec<StateChange>,
    pub shots: Vec<ShotRequest>,
    pub landed: bool,
    pub dash_started: bool,
    pub dash_ended: bool,
}

#[derive(Component, Debug, Clone, Default)]
pub struct CharacterStateMachine {
    current: StateId,
    entered_at: f32,
    time_in_state: f32,
}

impl CharacterStateMachine {
    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    pub fn state_duration(&self, now: f32) -> f32 {
        (now - self.entered_at).max(0.0)
    }

    pub fn pose(&self, vertical_velocity: f32) -> AnimationPose {
        states::animation_pose(self.current, vertical_velocity)
    }

    /// Exit the current state and enter `next`. Switching to the current
    /// state does nothing and reports nothing.
    pub fn switch_state(
        &mut self,
        next: StateId,
        c: &mut Character,
        body: &mut CharacterBody,
        ctx: &TickContext,
    ) -> Option<StateChange> {
        if next == self.current {
            return None;
        }

        let from = self.current;
        states::exit(from, c);
        self.current = next;
        self.entered_at = ctx.now;
        self.time_in_state = 0.0;
        states::enter(next, c, body, ctx);

        debug!("State: {} -> {}", from.name(), next.name());
        Some(StateChange {
            from,
            to: next,
            at: ctx.now,
        })
    }

    pub fn tick(
        &mut self,
        c: &mut Character,
        body: &mut CharacterBody,
        ctx: &TickContext,
    ) -> TickReport {
        let mut report = TickReport::default();
        if !c.alive {
            return report;
        }

        let dt = ctx.dt;
        let tuning = ctx.tuning;

        c.coyote_timer = (c.coyote_timer - dt).max(0.0);
        c.wall_jump_lock = (c.wall_jump_lock - dt).max(0.0);
        c.dash.tick_cooldown(dt);
        c.shoot.tick_cooldown(dt);
        self.time_in_state += dt;

        let grounded = c.is_grounded(ctx.probe);
        if grounded && !c.was_grounded {
            c.jumps_remaining = tuning.jump.refill.refill(tuning.jump.max_jumps);
            report.landed = true;
            debug!("Landed: jumps_remaining={}", c.jumps_remaining);
        }
        c.was_grounded = grounded;

        if ctx.input.dash_pressed {
            report.dash_started = c.try_start_dash(body, ctx.input.axis, tuning);
        }

        if c.dash.is_active() {
            report.driver = VelocityDriver::Dash;
            report.dash_ended = c.dash.advance(dt, body, &tuning.dash) == DashStep::Ended;
        } else {
            report.driver = VelocityDriver::State;
            let next = states::tick(self.current, self.time_in_state, c, body, ctx);
            if let Some(change) = next.and_then(|next| self.switch_state(next, c, body, ctx)) {
                report.changes.push(change);
            }
        }

        // Quick fire runs whatever the state or dash; Shoot only claims the pose
        if ctx.input.shoot_pressed {
            c.fire_quick(body.position, ctx.input.pointer_world, tuning);
        }

        let direction = aim_direction(body.position, ctx.input.pointer_world, c.facing);
        c.shoot
            .process_charge(ctx.input.charge, dt, body.position, direction, &tuning.shoot);
        report.shots = c.shoot.take_shots();

        report
    }
}
