//! Combat domain: the snail's back-and-forth patrol.

use bevy::prelude::*;

use crate::combat::components::{Enemy, SnailShell};
use crate::content::{EnemyTuning, SnailTuning};

/// Patrols `origin_x ± patrol_radius`, pausing at each end before turning.
/// The turn is a yaw that eases toward 0 or 180 degrees each tick.
#[derive(Component, Debug, Clone)]
pub struct SnailPatrol {
    origin_x: f32,
    moving_right: bool,
    pause_remaining: f32,
    yaw_degrees: f32,
}

impl SnailPatrol {
    pub fn new(origin_x: f32) -> Self {
        Self {
            origin_x,
            moving_right: true,
            pause_remaining: 0.0,
            yaw_degrees: 0.0,
        }
    }

    pub fn is_moving_right(&self) -> bool {
        self.moving_right
    }

    pub fn is_paused(&self) -> bool {
        self.pause_remaining > 0.0
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn target_x(&self, tuning: &SnailTuning) -> f32 {
        if self.moving_right {
            self.origin_x + tuning.patrol_radius
        } else {
            self.origin_x - tuning.patrol_radius
        }
    }

    fn target_yaw(&self) -> f32 {
        if self.moving_right { 0.0 } else { 180.0 }
    }

    pub fn tick(&mut self, dt: f32, position: &mut Vec2, tuning: &SnailTuning) {
        self.turn(dt, tuning);

        if self.is_paused() {
            self.pause_remaining -= dt;
            if self.pause_remaining <= 0.0 {
                self.pause_remaining = 0.0;
                self.moving_right = !self.moving_right;
            }
            return;
        }

        let target = self.target_x(tuning);
        let gap = target - position.x;
        let step = tuning.move_speed * dt;
        if gap.abs() <= step {
            position.x = target;
        } else {
            position.x += gap.signum() * step;
        }

        if (position.x - target).abs() < tuning.arrive_tolerance {
            if tuning.pause_time > 0.0 {
                self.pause_remaining = tuning.pause_time;
            } else {
                self.moving_right = !self.moving_right;
            }
        }
    }

    /// Turn around immediately (bumped into something).
    pub fn reverse(&mut self) {
        self.moving_right = !self.moving_right;
        self.pause_remaining = 0.0;
    }

    fn turn(&mut self, dt: f32, tuning: &SnailTuning) {
        let target = self.target_yaw();
        let max_step = tuning.turn_speed * dt;
        let delta = target - self.yaw_degrees;
        if delta.abs() <= max_step {
            self.yaw_degrees = target;
        } else {
            self.yaw_degrees += delta.signum() * max_step;
        }
    }
}

pub(crate) fn update_snails(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    mut snail_query: Query<(&mut SnailPatrol, &mut Transform, &Children), With<Enemy>>,
    mut shell_query: Query<&mut Transform, (With<SnailShell>, Without<SnailPatrol>)>,
) {
    let dt = time.delta_secs();

    for (mut patrol, mut transform, children) in &mut snail_query {
        let mut position = transform.translation.truncate();
        patrol.tick(dt, &mut position, &tuning.snail);
        transform.translation.x = position.x;
        transform.translation.y = position.y;

        for child in children.iter() {
            if let Ok(mut shell) = shell_query.get_mut(child) {
                shell.rotation = Quat::from_rotation_y(patrol.yaw_degrees().to_radians());
            }
        }
    }
}
