//! Combat domain: tests for health, projectile hits and enemy behaviour.

use bevy::prelude::*;

use super::*;
use crate::character::CharacterBody;
use crate::content::{BullTuning, SnailTuning};

const DT: f32 = 1.0 / 60.0;

// ============================================================================
// Health and projectile hits
// ============================================================================

#[test]
fn test_three_hits_kill_exactly_once() {
    let mut health = Health::new(3);
    let hit = classify_projectile_hit(
        HitTarget {
            damageable: true,
            ..default()
        },
        1,
    );
    let ProjectileHit::Damage(amount) = hit else {
        panic!("expected a damaging hit, got {:?}", hit);
    };

    assert_eq!(health.take_damage(amount), DamageOutcome::Survived);
    assert_eq!(health.current, 2);
    assert_eq!(health.take_damage(amount), DamageOutcome::Survived);
    assert_eq!(health.take_damage(amount), DamageOutcome::Died);
    assert!(health.is_dead());
    assert_eq!(health.take_damage(amount), DamageOutcome::AlreadyDead);
    assert_eq!(health.current, 0);
}

#[test]
fn test_overkill_floors_at_zero() {
    let mut health = Health::new(3);
    assert_eq!(health.take_damage(10), DamageOutcome::Died);
    assert_eq!(health.current, 0);
    assert_eq!(health.percent(), 0.0);
}

#[test]
fn test_projectile_passes_player_and_triggers() {
    let player = HitTarget {
        is_player: true,
        ..default()
    };
    let shooter = HitTarget {
        is_shooter: true,
        ..default()
    };
    let sensor = HitTarget {
        is_sensor: true,
        ..default()
    };

    assert_eq!(classify_projectile_hit(player, 1), ProjectileHit::Ignore);
    assert_eq!(classify_projectile_hit(shooter, 1), ProjectileHit::Ignore);
    assert_eq!(classify_projectile_hit(sensor, 1), ProjectileHit::Ignore);
}

#[test]
fn test_projectile_destroyed_by_terrain() {
    assert_eq!(
        classify_projectile_hit(HitTarget::default(), 1),
        ProjectileHit::Destroy
    );
}

// ============================================================================
// Bull
// ============================================================================

fn bull_body() -> CharacterBody {
    CharacterBody::default()
}

#[test]
fn test_bull_waits_for_player_in_range() {
    let tuning = BullTuning::default();
    let mut bull = BullCharge::default();
    let mut body = bull_body();

    let far = Vec2::new(tuning.detection_radius + 10.0, 0.0);
    assert_eq!(bull.tick(DT, &mut body, Some(far), &tuning), BullStep::Waiting);
    assert_eq!(bull.tick(DT, &mut body, None, &tuning), BullStep::Waiting);
    assert!(!bull.is_dashing());
}

#[test]
fn test_bull_charges_horizontally_then_cools_down() {
    let tuning = BullTuning::default();
    let mut bull = BullCharge::default();
    let mut body = bull_body();
    let player = Vec2::new(-100.0, 40.0);

    assert_eq!(bull.tick(DT, &mut body, Some(player), &tuning), BullStep::Started);
    assert_eq!(bull.direction(), Vec2::NEG_X);
    assert_eq!(body.velocity, Vec2::NEG_X * tuning.dash_speed);
    assert_eq!(body.gravity_scale, 0.0);
    assert_eq!(body.position.y, tuning.lift);

    let mut ended = false;
    for _ in 0..60 {
        if bull.tick(DT, &mut body, Some(player), &tuning) == BullStep::Ended {
            ended = true;
            break;
        }
    }
    assert!(ended);
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(body.gravity_scale, 1.0);
    assert!(body.position.y.abs() < 1e-4);
    assert_eq!(bull.cooldown(), tuning.dash_cooldown);

    // Cooling down even with the player right there
    assert_eq!(bull.tick(DT, &mut body, Some(player), &tuning), BullStep::Waiting);
}

#[test]
fn test_bull_interrupt_only_while_charging() {
    let tuning = BullTuning::default();
    let mut bull = BullCharge::default();
    let mut body = bull_body();

    assert!(!bull.interrupt(&mut body, &tuning));

    bull.tick(DT, &mut body, Some(Vec2::new(50.0, 0.0)), &tuning);
    assert!(bull.interrupt(&mut body, &tuning));
    assert!(!bull.is_dashing());
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(bull.cooldown(), tuning.dash_cooldown);
}

// ============================================================================
// Snail
// ============================================================================

#[test]
fn test_snail_pauses_at_patrol_end_then_turns() {
    let tuning = SnailTuning::default();
    let mut snail = SnailPatrol::new(0.0);
    let mut position = Vec2::ZERO;

    let mut paused = false;
    for _ in 0..200 {
        snail.tick(DT, &mut position, &tuning);
        if snail.is_paused() {
            paused = true;
            break;
        }
    }
    assert!(paused);
    assert!((position.x - tuning.patrol_radius).abs() < tuning.arrive_tolerance);
    assert!(snail.is_moving_right());

    let pause_ticks = (tuning.pause_time / DT) as usize + 2;
    for _ in 0..pause_ticks {
        snail.tick(DT, &mut position, &tuning);
    }
    assert!(!snail.is_moving_right());
    assert_eq!(snail.target_x(&tuning), -tuning.patrol_radius);
}

#[test]
fn test_snail_yaw_eases_toward_heading() {
    let tuning = SnailTuning::default();
    let mut snail = SnailPatrol::new(0.0);
    let mut position = Vec2::ZERO;

    snail.reverse();
    snail.tick(DT, &mut position, &tuning);
    let first = snail.yaw_degrees();
    assert!(first > 0.0 && first < 180.0);

    for _ in 0..120 {
        snail.tick(DT, &mut position, &tuning);
    }
    assert_eq!(snail.yaw_degrees(), 180.0);
    assert!(position.x < 0.0);
}
