//! Character domain: tests for the state machine, dash and shooting.

use bevy::prelude::*;

use super::*;
use crate::content::{CharacterTuning, JumpRefill};

const DT: f32 = 1.0 / 60.0;

/// Probe with hand-set answers.
struct ScriptedProbe {
    ground: bool,
    /// Side the wall is on, if any.
    wall: Option<Facing>,
    headroom: bool,
}

impl PhysicsProbe for ScriptedProbe {
    fn ground_contact(&self) -> bool {
        self.ground
    }

    fn wall_contact(&self, facing: Facing) -> bool {
        self.wall == Some(facing)
    }

    fn can_stand_up(&self) -> bool {
        self.headroom
    }
}

struct Rig {
    tuning: CharacterTuning,
    character: Character,
    machine: CharacterStateMachine,
    body: CharacterBody,
    probe: ScriptedProbe,
    now: f32,
}

impl Rig {
    fn with_tuning(tuning: CharacterTuning) -> Self {
        Self {
            character: Character::new(&tuning),
            tuning,
            machine: CharacterStateMachine::default(),
            body: CharacterBody::default(),
            probe: ScriptedProbe {
                ground: true,
                wall: None,
                headroom: true,
            },
            now: 0.0,
        }
    }

    fn grounded() -> Self {
        let mut rig = Self::with_tuning(CharacterTuning::default());
        rig.tick(CharacterInput::default());
        rig
    }

    fn airborne() -> Self {
        let mut rig = Self::with_tuning(CharacterTuning::default());
        rig.probe.ground = false;
        rig
    }

    fn tick(&mut self, input: CharacterInput) -> TickReport {
        self.now += DT;
        let ctx = TickContext {
            dt: DT,
            now: self.now,
            input: &input,
            probe: &self.probe,
            tuning: &self.tuning,
        };
        self.machine.tick(&mut self.character, &mut self.body, &ctx)
    }

    fn switch(&mut self, next: StateId) -> Option<StateChange> {
        let input = CharacterInput::default();
        let ctx = TickContext {
            dt: DT,
            now: self.now,
            input: &input,
            probe: &self.probe,
            tuning: &self.tuning,
        };
        self.machine
            .switch_state(next, &mut self.character, &mut self.body, &ctx)
    }

    fn state(&self) -> StateId {
        self.machine.current()
    }
}

fn jump() -> CharacterInput {
    CharacterInput {
        jump_pressed: true,
        ..default()
    }
}

fn moving(x: f32) -> CharacterInput {
    CharacterInput {
        axis: Vec2::new(x, 0.0),
        ..default()
    }
}

// ============================================================================
// State switching
// ============================================================================

#[test]
fn test_switch_to_current_state_is_silent() {
    let mut rig = Rig::grounded();

    let change = rig.switch(StateId::Crouch);
    assert_eq!(
        change.map(|c| (c.from, c.to)),
        Some((StateId::Idle, StateId::Crouch))
    );
    assert_eq!(rig.character.collider_profile, ColliderProfile::Crouching);

    // Neither exit nor enter may run again for a same-state switch
    rig.character.collider_profile = ColliderProfile::Standing;
    assert!(rig.switch(StateId::Crouch).is_none());
    assert_eq!(rig.character.collider_profile, ColliderProfile::Standing);
    assert_eq!(rig.state(), StateId::Crouch);
}

#[test]
fn test_switch_records_entry_time() {
    let mut rig = Rig::grounded();
    rig.now = 2.0;
    rig.switch(StateId::Walk);

    assert_eq!(rig.machine.time_in_state(), 0.0);
    assert!((rig.machine.state_duration(2.5) - 0.5).abs() < 1e-6);
}

#[test]
fn test_every_state_has_a_distinct_name() {
    let mut names: Vec<&str> = StateId::ALL.iter().map(|s| s.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 9);
}

// ============================================================================
// Jumping
// ============================================================================

#[test]
fn test_two_jumps_then_third_is_ignored() {
    let mut rig = Rig::grounded();
    assert_eq!(rig.character.jumps_remaining, 2);

    let report = rig.tick(jump());
    assert_eq!(rig.state(), StateId::Jump);
    assert_eq!(rig.character.jumps_remaining, 1);
    assert_eq!(rig.body.velocity.y, rig.tuning.jump.jump_force);
    assert_eq!(report.changes.len(), 1);

    rig.probe.ground = false;
    rig.body.velocity.y = 100.0;
    rig.tick(jump());
    assert_eq!(rig.character.jumps_remaining, 0);
    assert_eq!(rig.body.velocity.y, rig.tuning.jump.jump_force);

    rig.body.velocity.y = 100.0;
    rig.tick(jump());
    assert_eq!(rig.character.jumps_remaining, 0);
    assert_eq!(rig.body.velocity.y, 100.0);
    assert_eq!(rig.state(), StateId::Fall);
}

#[test]
fn test_landing_refills_all_jumps() {
    let mut rig = Rig::airborne();
    rig.character.jumps_remaining = 0;
    rig.tick(CharacterInput::default());
    assert_eq!(rig.state(), StateId::Fall);

    rig.probe.ground = true;
    let report = rig.tick(CharacterInput::default());
    assert!(report.landed);
    assert_eq!(rig.character.jumps_remaining, 2);
    assert_eq!(rig.state(), StateId::Idle);
}

#[test]
fn test_spent_one_refill_makes_grounded_jump_free() {
    let mut tuning = CharacterTuning::default();
    tuning.jump.refill = JumpRefill::SpentOne;
    let mut rig = Rig::with_tuning(tuning);
    rig.probe.ground = false;
    rig.tick(CharacterInput::default());

    rig.probe.ground = true;
    rig.tick(CharacterInput::default());
    assert_eq!(rig.character.jumps_remaining, 1);

    rig.tick(jump());
    assert_eq!(rig.state(), StateId::Jump);
    assert_eq!(rig.character.jumps_remaining, 1);
    assert_eq!(rig.body.velocity.y, rig.tuning.jump.jump_force);
}

#[test]
fn test_coyote_grace_masks_ground_after_launch() {
    let mut rig = Rig::grounded();
    rig.tick(jump());
    assert!(!rig.character.is_grounded(&rig.probe));

    // Still touching the ground once the window closes counts as landing
    let mut landed = false;
    for _ in 0..10 {
        landed |= rig.tick(CharacterInput::default()).landed;
    }
    assert!(landed);
    assert!(rig.character.is_grounded(&rig.probe));
    assert_eq!(rig.character.jumps_remaining, 2);
}

#[test]
fn test_wall_cling_clamps_slide_and_wall_jump_pushes_away() {
    let mut rig = Rig::airborne();
    rig.probe.wall = Some(Facing::Right);
    rig.body.velocity.y = -50.0;

    rig.tick(moving(1.0));
    assert_eq!(rig.state(), StateId::WallCling);

    rig.body.velocity.y = -500.0;
    rig.tick(moving(1.0));
    assert_eq!(rig.body.velocity.y, -rig.tuning.wall.wall_slide_speed);

    let input = CharacterInput {
        axis: Vec2::X,
        jump_pressed: true,
        ..default()
    };
    rig.tick(input);
    assert_eq!(rig.state(), StateId::Jump);
    assert_eq!(rig.character.facing, Facing::Left);
    assert_eq!(rig.character.jumps_remaining, 1);
    assert_eq!(rig.body.velocity.x, -rig.tuning.wall.wall_jump_horizontal);
    assert_eq!(rig.body.velocity.y, rig.tuning.wall.wall_jump_force);

    // Holding toward the wall cannot cancel the push while locked
    rig.tick(moving(1.0));
    assert_eq!(rig.body.velocity.x, -rig.tuning.wall.wall_jump_horizontal);
}

#[test]
fn test_wall_cling_drops_without_input() {
    let mut rig = Rig::airborne();
    rig.probe.wall = Some(Facing::Right);
    rig.body.velocity.y = -10.0;
    rig.tick(moving(1.0));
    assert_eq!(rig.state(), StateId::WallCling);

    rig.tick(CharacterInput::default());
    assert_eq!(rig.state(), StateId::Fall);
}

#[test]
fn test_drifting_down_wall_without_input_stays_falling() {
    let mut rig = Rig::airborne();
    rig.probe.wall = Some(Facing::Right);
    rig.body.velocity.y = -10.0;

    let report = rig.tick(CharacterInput::default());
    assert_eq!(rig.state(), StateId::Fall);
    assert_eq!(report.changes.len(), 1);

    for _ in 0..5 {
        rig.body.velocity.y = -10.0;
        let report = rig.tick(CharacterInput::default());
        assert_eq!(rig.state(), StateId::Fall);
        assert!(report.changes.is_empty());
    }

    // Pressing into the wall grabs it
    rig.tick(moving(1.0));
    assert_eq!(rig.state(), StateId::WallCling);
}

// ============================================================================
// Ground locomotion
// ============================================================================

#[test]
fn test_walk_and_run_speeds() {
    let mut rig = Rig::grounded();
    rig.tick(moving(-1.0));
    assert_eq!(rig.state(), StateId::Walk);

    rig.tick(moving(-1.0));
    assert_eq!(rig.body.velocity.x, -rig.tuning.walk_speed());
    assert_eq!(rig.character.facing, Facing::Left);

    let run = CharacterInput {
        axis: Vec2::new(-1.0, 0.0),
        run_held: true,
        ..default()
    };
    rig.tick(run);
    assert_eq!(rig.state(), StateId::Run);
    rig.tick(run);
    assert_eq!(rig.body.velocity.x, -rig.tuning.move_speed);

    // Releasing run drops back to walking
    rig.tick(moving(-1.0));
    assert_eq!(rig.state(), StateId::Walk);
}

#[test]
fn test_losing_ground_while_rising_along_wall_falls() {
    let mut rig = Rig::grounded();
    rig.tick(moving(1.0));
    assert_eq!(rig.state(), StateId::Walk);

    rig.probe.ground = false;
    rig.probe.wall = Some(Facing::Right);
    rig.body.velocity.y = 200.0;
    rig.tick(moving(1.0));
    assert_eq!(rig.state(), StateId::Fall);
}

#[test]
fn test_crouch_waits_for_headroom() {
    let mut rig = Rig::grounded();
    let crouch = CharacterInput {
        crouch_held: true,
        ..default()
    };
    rig.tick(crouch);
    assert_eq!(rig.state(), StateId::Crouch);
    assert_eq!(rig.character.collider_profile, ColliderProfile::Crouching);

    rig.probe.headroom = false;
    rig.tick(CharacterInput::default());
    assert_eq!(rig.state(), StateId::Crouch);

    rig.probe.headroom = true;
    rig.tick(CharacterInput::default());
    assert_eq!(rig.state(), StateId::Idle);
    assert_eq!(rig.character.collider_profile, ColliderProfile::Standing);
}

#[test]
fn test_crouch_speed_and_walk_exit() {
    let mut rig = Rig::grounded();
    let crouch_move = CharacterInput {
        axis: Vec2::X,
        crouch_held: true,
        ..default()
    };
    rig.tick(crouch_move);
    rig.tick(crouch_move);
    assert_eq!(rig.body.velocity.x, rig.tuning.crouch_speed());

    // Run held on release still comes out walking
    let release = CharacterInput {
        axis: Vec2::X,
        run_held: true,
        ..default()
    };
    rig.tick(release);
    assert_eq!(rig.state(), StateId::Walk);
}

#[test]
fn test_slide_decelerates_into_crouch() {
    let mut rig = Rig::grounded();
    let run = CharacterInput {
        axis: Vec2::X,
        run_held: true,
        ..default()
    };
    rig.tick(run);
    rig.tick(run);
    assert_eq!(rig.state(), StateId::Run);

    let slide = CharacterInput {
        crouch_held: true,
        ..run
    };
    rig.tick(slide);
    assert_eq!(rig.state(), StateId::Slide);
    assert_eq!(rig.character.collider_profile, ColliderProfile::Crouching);
    assert!(rig.body.velocity.x > rig.tuning.move_speed);

    let mut previous = rig.body.velocity.x;
    for _ in 0..60 {
        rig.tick(slide);
        if rig.state() != StateId::Slide {
            break;
        }
        assert!(rig.body.velocity.x < previous);
        previous = rig.body.velocity.x;
    }
    assert_eq!(rig.state(), StateId::Crouch);
    assert!(rig.body.velocity.x < rig.tuning.walk_speed());
}

#[test]
fn test_slide_ends_idle_when_crouch_released() {
    let mut rig = Rig::grounded();
    rig.switch(StateId::Slide);

    for _ in 0..60 {
        rig.tick(CharacterInput::default());
        if rig.state() != StateId::Slide {
            break;
        }
    }
    assert_eq!(rig.state(), StateId::Idle);
    assert_eq!(rig.character.collider_profile, ColliderProfile::Standing);
}

#[test]
fn test_no_ground_reading_treated_as_airborne() {
    let mut rig = Rig::airborne();
    rig.tick(moving(1.0));
    assert_eq!(rig.state(), StateId::Fall);
    assert!(!rig.character.is_grounded(&rig.probe));
    assert!(!rig.character.is_touching_wall(&rig.probe));
}

// ============================================================================
// Dash
// ============================================================================

fn dash(axis: Vec2) -> CharacterInput {
    CharacterInput {
        axis,
        dash_pressed: true,
        ..default()
    }
}

#[test]
fn test_dash_locked_without_unlock() {
    let mut rig = Rig::grounded();
    assert!(!rig.character.can_dash);

    let report = rig.tick(dash(Vec2::X));
    assert!(!report.dash_started);
    assert!(!rig.character.dash.is_active());
    assert_eq!(report.driver, VelocityDriver::State);
    assert_eq!(rig.body.gravity_scale, 1.0);
}

#[test]
fn test_dash_cycle_restores_body() {
    let mut rig = Rig::grounded();
    rig.character.unlock_dash();

    let report = rig.tick(dash(Vec2::X));
    assert!(report.dash_started);
    assert_eq!(report.driver, VelocityDriver::Dash);
    assert_eq!(rig.body.gravity_scale, 0.0);
    assert_eq!(rig.body.velocity, Vec2::X * rig.tuning.dash.speed);
    assert_eq!(rig.body.position.y, rig.tuning.dash.lift);

    let mut ended = false;
    for _ in 0..60 {
        let report = rig.tick(moving(1.0));
        assert_eq!(report.driver, VelocityDriver::Dash);
        // State ticking is suspended; Idle never sees the input
        assert_eq!(rig.state(), StateId::Idle);
        if report.dash_ended {
            ended = true;
            break;
        }
        assert_eq!(rig.body.velocity, Vec2::X * rig.tuning.dash.speed);
    }
    assert!(ended);
    assert_eq!(rig.body.velocity, Vec2::ZERO);
    assert_eq!(rig.body.gravity_scale, 1.0);
    assert!(rig.body.position.y.abs() < 1e-4);

    let report = rig.tick(moving(1.0));
    assert_eq!(report.driver, VelocityDriver::State);
    assert_eq!(rig.state(), StateId::Walk);
}

#[test]
fn test_dash_defaults_to_facing_direction() {
    let mut rig = Rig::grounded();
    rig.character.unlock_dash();
    rig.character.facing = Facing::Left;

    rig.tick(dash(Vec2::ZERO));
    assert_eq!(rig.character.dash.direction(), Vec2::NEG_X);
}

#[test]
fn test_dash_cooldown_gates_restart() {
    let mut rig = Rig::grounded();
    rig.character.unlock_dash();
    rig.tick(dash(Vec2::X));
    while rig.character.dash.is_active() {
        rig.tick(CharacterInput::default());
    }
    assert_eq!(rig.character.dash.cooldown_remaining(), rig.tuning.dash.cooldown);

    assert!(!rig.tick(dash(Vec2::X)).dash_started);

    let ticks = (rig.tuning.dash.cooldown / DT) as usize + 2;
    for _ in 0..ticks {
        rig.tick(CharacterInput::default());
    }
    assert!(rig.tick(dash(Vec2::X)).dash_started);
}

#[test]
fn test_contact_ends_dash_early() {
    let mut rig = Rig::grounded();
    rig.character.unlock_dash();
    rig.tick(dash(Vec2::X));

    assert!(rig.character.end_dash(&mut rig.body, &rig.tuning));
    assert!(!rig.character.dash.is_active());
    assert_eq!(rig.body.gravity_scale, 1.0);
    assert_eq!(rig.body.velocity, Vec2::ZERO);
    assert!(!rig.character.end_dash(&mut rig.body, &rig.tuning));
}

// ============================================================================
// Shooting
// ============================================================================

fn charge(pressed: bool, held: bool, released: bool) -> CharacterInput {
    CharacterInput {
        charge: TriggerInput {
            pressed,
            held,
            released,
        },
        ..default()
    }
}

#[test]
fn test_short_charge_is_discarded() {
    let mut rig = Rig::grounded();
    rig.tick(charge(true, true, false));
    for _ in 0..60 {
        rig.tick(charge(false, true, false));
    }
    assert!(rig.character.charge_fraction(&rig.tuning) < 1.0);

    let report = rig.tick(charge(false, false, true));
    assert!(report.shots.is_empty());
    assert_eq!(rig.character.shoot.meter().charge(), 0.0);
    assert!(!rig.character.shoot.meter().is_charging());
}

#[test]
fn test_full_charge_fires_on_release() {
    let mut rig = Rig::grounded();
    rig.tick(charge(true, true, false));
    for _ in 0..130 {
        rig.tick(charge(false, true, false));
    }
    assert_eq!(rig.character.charge_fraction(&rig.tuning), 1.0);

    let report = rig.tick(charge(false, false, true));
    assert_eq!(report.shots.len(), 1);
    assert_eq!(report.shots[0].kind, ShotKind::Charged);
    assert_eq!(report.shots[0].damage, rig.tuning.shoot.projectile_damage);
    assert_eq!(rig.character.charge_fraction(&rig.tuning), 0.0);
}

#[test]
fn test_shoot_state_fires_and_respects_cooldown() {
    let mut rig = Rig::grounded();

    let report = rig.tick(shoot());
    assert_eq!(rig.state(), StateId::Shoot);
    assert_eq!(report.shots.len(), 1);
    assert_eq!(report.shots[0].kind, ShotKind::Quick);
    assert_eq!(report.shots[0].direction, Vec2::X);

    assert!(rig.tick(shoot()).shots.is_empty());

    for _ in 0..30 {
        rig.tick(CharacterInput::default());
        if rig.state() != StateId::Shoot {
            break;
        }
    }
    assert_eq!(rig.state(), StateId::Idle);
    assert!(rig.machine.time_in_state() < rig.tuning.shoot.pose_time);
}

fn shoot() -> CharacterInput {
    CharacterInput {
        shoot_pressed: true,
        ..default()
    }
}

#[test]
fn test_quick_fire_interrupts_slide() {
    let mut rig = Rig::grounded();
    let run = CharacterInput {
        axis: Vec2::X,
        run_held: true,
        ..default()
    };
    rig.tick(run);
    rig.tick(run);
    let slide = CharacterInput {
        crouch_held: true,
        ..run
    };
    rig.tick(slide);
    assert_eq!(rig.state(), StateId::Slide);

    let report = rig.tick(CharacterInput {
        shoot_pressed: true,
        ..slide
    });
    assert_eq!(rig.state(), StateId::Shoot);
    assert_eq!(report.shots.len(), 1);
    assert_eq!(rig.character.collider_profile, ColliderProfile::Standing);
}

#[test]
fn test_quick_fire_while_dashing() {
    let mut rig = Rig::grounded();
    rig.character.unlock_dash();
    rig.tick(dash(Vec2::X));
    assert!(rig.character.dash.is_active());

    let report = rig.tick(shoot());
    assert_eq!(report.driver, VelocityDriver::Dash);
    assert_eq!(report.shots.len(), 1);
    assert_eq!(report.shots[0].kind, ShotKind::Quick);
    assert!(rig.character.dash.is_active());
    assert_eq!(rig.body.velocity, Vec2::X * rig.tuning.dash.speed);
}

#[test]
fn test_quick_fire_from_crouch_under_low_ceiling() {
    let mut rig = Rig::grounded();
    rig.probe.headroom = false;
    let crouch = CharacterInput {
        crouch_held: true,
        ..default()
    };
    rig.tick(crouch);
    assert_eq!(rig.state(), StateId::Crouch);

    let report = rig.tick(CharacterInput {
        shoot_pressed: true,
        ..crouch
    });
    assert_eq!(rig.state(), StateId::Crouch);
    assert_eq!(report.shots.len(), 1);
}

#[test]
fn test_can_shoot_follows_quick_fire_cooldown() {
    let mut rig = Rig::grounded();
    assert!(rig.character.can_shoot());

    rig.tick(shoot());
    assert!(!rig.character.can_shoot());

    let ticks = (rig.tuning.shoot.cooldown / DT) as usize + 2;
    for _ in 0..ticks {
        rig.tick(CharacterInput::default());
    }
    assert!(rig.character.can_shoot());
}

#[test]
fn test_aim_toward_pointer_or_facing() {
    let aim = aim_direction(Vec2::ZERO, Some(Vec2::new(0.0, 10.0)), Facing::Right);
    assert_eq!(aim, Vec2::Y);

    assert_eq!(aim_direction(Vec2::ONE, None, Facing::Left), Vec2::NEG_X);
    assert_eq!(
        aim_direction(Vec2::ONE, Some(Vec2::ONE), Facing::Right),
        Vec2::X
    );
}

#[test]
fn test_quick_fire_is_independent_of_charge() {
    let tuning = CharacterTuning::default();
    let mut shooter = ShootController::default();
    shooter.process_charge(
        TriggerInput {
            pressed: true,
            held: true,
            released: false,
        },
        DT,
        Vec2::ZERO,
        Vec2::X,
        &tuning.shoot,
    );

    assert!(shooter.try_quick_fire(Vec2::ZERO, Vec2::X, &tuning.shoot));
    assert!(shooter.meter().is_charging());
    assert!(!shooter.try_quick_fire(Vec2::ZERO, Vec2::X, &tuning.shoot));
    assert_eq!(shooter.take_shots().len(), 1);
}

// ============================================================================
// Life, coins and observers
// ============================================================================

#[test]
fn test_dead_character_is_not_driven() {
    let mut rig = Rig::grounded();
    rig.body.velocity = Vec2::new(50.0, -20.0);

    assert!(rig.character.die(&mut rig.body, &rig.tuning));
    assert!(!rig.character.die(&mut rig.body, &rig.tuning));
    assert_eq!(rig.body.velocity, Vec2::ZERO);

    let report = rig.tick(jump());
    assert_eq!(report.driver, VelocityDriver::None);
    assert_eq!(rig.state(), StateId::Idle);
    assert!(!rig.character.can_shoot());
}

#[test]
fn test_add_coins_accumulates() {
    let mut character = Character::new(&CharacterTuning::default());
    assert_eq!(character.add_coins(3), 3);
    assert_eq!(character.add_coins(2), 5);

    character.coins = u32::MAX - 1;
    assert_eq!(character.add_coins(5), u32::MAX);
}

#[test]
fn test_unlock_dash_reports_first_time_only() {
    let mut character = Character::new(&CharacterTuning::default());
    assert!(!character.dash_available());
    assert!(character.unlock_dash());
    assert!(!character.unlock_dash());
    assert!(character.dash_available());
}

#[test]
fn test_pose_splits_airborne_on_vertical_velocity() {
    assert_eq!(animation_pose(StateId::Jump, 10.0), AnimationPose::Rising);
    assert_eq!(animation_pose(StateId::Jump, -10.0), AnimationPose::Falling);
    assert_eq!(animation_pose(StateId::Fall, 5.0), AnimationPose::Rising);
    assert_eq!(animation_pose(StateId::Run, -5.0), AnimationPose::Run);
}
