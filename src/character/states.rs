//! Character domain: the nine locomotion/combat states.
//!
//! Each state is a [`StateId`] variant dispatched through [`enter`], [`tick`]
//! and [`exit`]. States own no data beyond their activation; everything that
//! outlives a tick lives on [`Character`]. A tick returns the next state, if
//! any, and the machine performs the switch.
//!
//! Most states defer to [`shared_transition`], which evaluates the common
//! priority list top to bottom:
//!
//! 1. airborne, not rising, pressing into a wall: WallCling
//! 2. airborne and not clinging: Fall
//! 3. shoot pressed: Shoot
//! 4. grounded and crouch held: Crouch, or Slide when running at speed
//! 5. jump pressed with a jump available: Jump
//! 6. grounded: Idle / Walk / Run from movement input

use bevy::prelude::*;

use crate::character::components::{CharacterBody, ColliderProfile, Facing};
use crate::character::input::CharacterInput;
use crate::character::machine::{Character, TickContext};
use crate::content::CharacterTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateId {
    #[default]
    Idle,
    Walk,
    Run,
    Jump,
    Crouch,
    Slide,
    WallCling,
    Fall,
    Shoot,
}

impl StateId {
    pub const ALL: [StateId; 9] = [
        StateId::Idle,
        StateId::Walk,
        StateId::Run,
        StateId::Jump,
        StateId::Crouch,
        StateId::Slide,
        StateId::WallCling,
        StateId::Fall,
        StateId::Shoot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StateId::Idle => "Idle",
            StateId::Walk => "Walk",
            StateId::Run => "Run",
            StateId::Jump => "Jump",
            StateId::Crouch => "Crouch",
            StateId::Slide => "Slide",
            StateId::WallCling => "WallCling",
            StateId::Fall => "Fall",
            StateId::Shoot => "Shoot",
        }
    }

    /// States that only make sense with ground underfoot.
    pub fn is_grounded_state(self) -> bool {
        matches!(
            self,
            StateId::Idle | StateId::Walk | StateId::Run | StateId::Crouch | StateId::Slide
        )
    }
}

/// Which impulse a jump launch applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Wall,
    Grounded,
    Air,
}

/// Pose shown by the animation collaborator. Airborne states split on the
/// sign of vertical velocity without implying a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPose {
    Idle,
    Walk,
    Run,
    Rising,
    Falling,
    Crouch,
    Slide,
    WallCling,
    Shoot,
}

pub fn animation_pose(state: StateId, vertical_velocity: f32) -> AnimationPose {
    match state {
        StateId::Idle => AnimationPose::Idle,
        StateId::Walk => AnimationPose::Walk,
        StateId::Run => AnimationPose::Run,
        StateId::Jump | StateId::Fall => {
            if vertical_velocity > 0.0 {
                AnimationPose::Rising
            } else {
                AnimationPose::Falling
            }
        }
        StateId::Crouch => AnimationPose::Crouch,
        StateId::Slide => AnimationPose::Slide,
        StateId::WallCling => AnimationPose::WallCling,
        StateId::Shoot => AnimationPose::Shoot,
    }
}

pub fn enter(state: StateId, c: &mut Character, body: &mut CharacterBody, ctx: &TickContext) {
    let tuning = ctx.tuning;

    match state {
        StateId::Idle => {
            body.velocity.x = 0.0;
        }
        StateId::Crouch => {
            c.collider_profile = ColliderProfile::Crouching;
        }
        StateId::Slide => {
            c.collider_profile = ColliderProfile::Crouching;
            let speed = body.velocity.x.abs().max(tuning.move_speed) * tuning.slide.boost;
            body.velocity.x = c.facing.sign() * speed;
        }
        StateId::Jump => {
            // Sample before the grace window masks the ground reading
            let grounded = c.is_grounded(ctx.probe);
            let wall = !grounded && c.is_touching_wall(ctx.probe);
            launch_jump(c, body, grounded, wall, tuning);
            c.arm_coyote_grace(tuning.jump.coyote_grace);
        }
        StateId::WallCling => {
            clamp_wall_slide(body, tuning);
        }
        StateId::Walk | StateId::Run | StateId::Fall | StateId::Shoot => {}
    }
}

pub fn exit(state: StateId, c: &mut Character) {
    match state {
        StateId::Crouch | StateId::Slide => {
            c.collider_profile = ColliderProfile::Standing;
        }
        _ => {}
    }
}

/// Run one frame of `state`. Returns the state to switch to, if any.
pub fn tick(
    state: StateId,
    time_in_state: f32,
    c: &mut Character,
    body: &mut CharacterBody,
    ctx: &TickContext,
) -> Option<StateId> {
    match state {
        StateId::Idle => tick_idle(c, body, ctx),
        StateId::Walk => tick_ground_move(StateId::Walk, ctx.tuning.walk_speed(), c, body, ctx),
        StateId::Run => tick_ground_move(StateId::Run, ctx.tuning.move_speed, c, body, ctx),
        StateId::Jump => tick_jump(c, body, ctx),
        StateId::Crouch => tick_crouch(c, body, ctx),
        StateId::Slide => tick_slide(c, body, ctx),
        StateId::WallCling => tick_wall_cling(c, body, ctx),
        StateId::Fall => tick_fall(c, body, ctx),
        StateId::Shoot => tick_shoot(time_in_state, c, body, ctx),
    }
}

/// The common priority list. Returns `None` when the winning rule names
/// `current` or nothing matches.
pub fn shared_transition(
    current: StateId,
    c: &Character,
    body: &CharacterBody,
    ctx: &TickContext,
) -> Option<StateId> {
    let input = ctx.input;
    let grounded = c.is_grounded(ctx.probe);

    if !grounded {
        let wall = c.is_touching_wall(ctx.probe);
        if wall && body.velocity.y <= 0.0 && pressing_toward(c.facing, input, ctx.tuning) {
            if current != StateId::WallCling {
                return Some(StateId::WallCling);
            }
        } else if !wall || body.velocity.y <= 0.0 {
            if current != StateId::Fall {
                return Some(StateId::Fall);
            }
        } else if current.is_grounded_state() {
            // Rising along a wall with nothing underfoot
            return Some(StateId::Fall);
        }
    }

    if input.shoot_pressed && current != StateId::Shoot {
        return Some(StateId::Shoot);
    }

    if grounded && input.crouch_held {
        let next = if current == StateId::Run
            && body.velocity.x.abs() > ctx.tuning.walk_speed()
        {
            StateId::Slide
        } else {
            StateId::Crouch
        };
        return (next != current).then_some(next);
    }

    if input.jump_pressed && can_jump(c, grounded, ctx.tuning) {
        return (current != StateId::Jump).then_some(StateId::Jump);
    }

    if grounded {
        let next = lateral_choice(input, ctx.tuning.input_deadzone);
        return (next != current).then_some(next);
    }

    None
}

/// Whether horizontal input holds toward `facing`. Clinging needs it, so a
/// character drifting down a wall without input falls instead.
fn pressing_toward(facing: Facing, input: &CharacterInput, tuning: &CharacterTuning) -> bool {
    Facing::from_input(input.axis.x, tuning.input_deadzone) == Some(facing)
}

/// Idle with no horizontal input, Run with input and run held, Walk otherwise.
pub fn lateral_choice(input: &CharacterInput, deadzone: f32) -> StateId {
    if input.axis.x.abs() <= deadzone {
        StateId::Idle
    } else if input.run_held {
        StateId::Run
    } else {
        StateId::Walk
    }
}

/// A grounded jump costs what the refill convention says; any other jump
/// needs a charge left.
pub fn can_jump(c: &Character, grounded: bool, tuning: &CharacterTuning) -> bool {
    if grounded {
        c.jumps_remaining >= tuning.jump.refill.grounded_jump_cost()
    } else {
        c.jumps_remaining > 0
    }
}

/// Apply the jump impulse for the current contact situation. Returns `None`
/// when no jump charge is available for it.
pub fn launch_jump(
    c: &mut Character,
    body: &mut CharacterBody,
    grounded: bool,
    wall: bool,
    tuning: &CharacterTuning,
) -> Option<JumpKind> {
    let kind = if grounded {
        let cost = tuning.jump.refill.grounded_jump_cost();
        if c.jumps_remaining < cost {
            return None;
        }
        c.jumps_remaining -= cost;
        body.velocity.y = tuning.jump.jump_force;
        JumpKind::Grounded
    } else if c.jumps_remaining == 0 {
        return None;
    } else if wall {
        c.jumps_remaining -= 1;
        c.facing = c.facing.flipped();
        c.wall_jump_lock = tuning.wall.wall_jump_lock;
        body.velocity.x = c.facing.sign() * tuning.wall.wall_jump_horizontal;
        body.velocity.y = tuning.wall.wall_jump_force;
        JumpKind::Wall
    } else {
        c.jumps_remaining -= 1;
        body.velocity.y = tuning.jump.jump_force;
        JumpKind::Air
    };

    debug!(
        "Jump launch: kind={:?}, jumps_remaining={}",
        kind, c.jumps_remaining
    );
    Some(kind)
}

fn steer(c: &mut Character, input: &CharacterInput, deadzone: f32) {
    if let Some(facing) = Facing::from_input(input.axis.x, deadzone) {
        c.facing = facing;
    }
}

fn air_control(c: &mut Character, body: &mut CharacterBody, ctx: &TickContext, speed: f32) {
    if c.wall_jump_lock > 0.0 {
        return;
    }
    steer(c, ctx.input, ctx.tuning.input_deadzone);
    body.velocity.x = ctx.input.axis.x * speed;
}

fn clamp_wall_slide(body: &mut CharacterBody, tuning: &CharacterTuning) {
    body.velocity.y = body.velocity.y.max(-tuning.wall.wall_slide_speed);
}

fn tick_idle(c: &mut Character, body: &mut CharacterBody, ctx: &TickContext) -> Option<StateId> {
    body.velocity.x = 0.0;
    shared_transition(StateId::Idle, c, body, ctx)
}

fn tick_ground_move(
    state: StateId,
    speed: f32,
    c: &mut Character,
    body: &mut CharacterBody,
    ctx: &TickContext,
) -> Option<StateId> {
    steer(c, ctx.input, ctx.tuning.input_deadzone);
    body.velocity.x = ctx.input.axis.x * speed;
    shared_transition(state, c, body, ctx)
}

fn tick_jump(c: &mut Character, body: &mut CharacterBody, ctx: &TickContext) -> Option<StateId> {
    // Another jump while still in Jump relaunches in place
    if ctx.input.jump_pressed {
        let grounded = c.is_grounded(ctx.probe);
        if can_jump(c, grounded, ctx.tuning) {
            let wall = !grounded && c.is_touching_wall(ctx.probe);
            launch_jump(c, body, grounded, wall, ctx.tuning);
            c.arm_coyote_grace(ctx.tuning.jump.coyote_grace);
        }
    }

    air_control(c, body, ctx, ctx.tuning.move_speed);
    shared_transition(StateId::Jump, c, body, ctx)
}

fn tick_fall(c: &mut Character, body: &mut CharacterBody, ctx: &TickContext) -> Option<StateId> {
    air_control(c, body, ctx, ctx.tuning.air_control_speed);
    shared_transition(StateId::Fall, c, body, ctx)
}

fn tick_crouch(c: &mut Character, body: &mut CharacterBody, ctx: &TickContext) -> Option<StateId> {
    steer(c, ctx.input, ctx.tuning.input_deadzone);
    body.velocity.x = ctx.input.axis.x * ctx.tuning.crouch_speed();

    match shared_transition(StateId::Crouch, c, body, ctx)? {
        next @ (StateId::Fall | StateId::WallCling) => Some(next),
        _ if !ctx.probe.can_stand_up() => None,
        StateId::Run => Some(StateId::Walk),
        next => Some(next),
    }
}

fn tick_slide(c: &mut Character, body: &mut CharacterBody, ctx: &TickContext) -> Option<StateId> {
    let tuning = ctx.tuning;
    let grounded = c.is_grounded(ctx.probe);
    if !grounded {
        return Some(StateId::Fall);
    }

    let speed = (body.velocity.x.abs() - tuning.slide.deceleration * ctx.dt).max(0.0);
    body.velocity.x = c.facing.sign() * speed;

    let room = ctx.probe.can_stand_up();
    if ctx.input.shoot_pressed && room {
        return Some(StateId::Shoot);
    }
    if ctx.input.jump_pressed && room && can_jump(c, grounded, tuning) {
        return Some(StateId::Jump);
    }

    if speed < tuning.walk_speed() {
        if ctx.input.crouch_held || !room {
            return Some(StateId::Crouch);
        }
        return Some(StateId::Idle);
    }

    None
}

fn tick_wall_cling(
    c: &mut Character,
    body: &mut CharacterBody,
    ctx: &TickContext,
) -> Option<StateId> {
    let input = ctx.input;

    if c.is_grounded(ctx.probe) || !c.is_touching_wall(ctx.probe) {
        return Some(StateId::Fall);
    }
    if input.shoot_pressed {
        return Some(StateId::Shoot);
    }
    if input.jump_pressed && can_jump(c, false, ctx.tuning) {
        return Some(StateId::Jump);
    }
    if input.axis.x.abs() <= ctx.tuning.input_deadzone {
        return Some(StateId::Fall);
    }

    clamp_wall_slide(body, ctx.tuning);
    None
}

fn tick_shoot(
    time_in_state: f32,
    c: &mut Character,
    body: &mut CharacterBody,
    ctx: &TickContext,
) -> Option<StateId> {
    let tuning = ctx.tuning;
    let grounded = c.is_grounded(ctx.probe);

    if grounded {
        steer(c, ctx.input, tuning.input_deadzone);
        body.velocity.x = ctx.input.axis.x * tuning.walk_speed();
    } else {
        air_control(c, body, ctx, tuning.air_control_speed);
    }

    // Hold the pose; only losing the ground cuts it short
    if time_in_state < tuning.shoot.pose_time {
        if grounded {
            return None;
        }
        let wall = c.is_touching_wall(ctx.probe);
        let cling = wall && pressing_toward(c.facing, ctx.input, tuning);
        return Some(if cling && body.velocity.y <= 0.0 {
            StateId::WallCling
        } else {
            StateId::Fall
        });
    }

    match shared_transition(StateId::Shoot, c, body, ctx) {
        None if !grounded => Some(StateId::Fall),
        next => next,
    }
}
