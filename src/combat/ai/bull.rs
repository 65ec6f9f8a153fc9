//! Combat domain: the bull's horizontal charge.
//!
//! Idle until the player comes within the detection radius and the cooldown
//! has run out, then hops up and charges horizontally at the player with
//! gravity suspended. The charge ends on its timer or on any solid contact.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::{CharacterBody, Player};
use crate::combat::components::Enemy;
use crate::content::{BullTuning, EnemyTuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BullStep {
    Waiting,
    Started,
    Charging,
    Ended,
}

#[derive(Component, Debug, Clone, Default)]
pub struct BullCharge {
    dashing: bool,
    dash_timer: f32,
    cooldown: f32,
    direction: Vec2,
    saved_gravity_scale: f32,
}

impl BullCharge {
    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn tick(
        &mut self,
        dt: f32,
        body: &mut CharacterBody,
        player: Option<Vec2>,
        tuning: &BullTuning,
    ) -> BullStep {
        if self.dashing {
            self.dash_timer -= dt;
            body.velocity = self.direction * tuning.dash_speed;
            if self.dash_timer <= 0.0 {
                self.finish(body, tuning);
                return BullStep::Ended;
            }
            return BullStep::Charging;
        }

        self.cooldown = (self.cooldown - dt).max(0.0);
        if self.cooldown > 0.0 {
            return BullStep::Waiting;
        }

        let Some(player) = player else {
            return BullStep::Waiting;
        };
        let to_player = player - body.position;
        if to_player.length() > tuning.detection_radius {
            return BullStep::Waiting;
        }

        let direction = Vec2::new(to_player.x, 0.0).normalize_or_zero();
        if direction == Vec2::ZERO {
            return BullStep::Waiting;
        }

        self.dashing = true;
        self.dash_timer = tuning.dash_duration;
        self.direction = direction;
        self.saved_gravity_scale = body.gravity_scale;

        body.gravity_scale = 0.0;
        body.velocity = direction * tuning.dash_speed;
        body.position.y += tuning.lift;
        BullStep::Started
    }

    /// Stop a charge early. Returns false if the bull was not charging.
    pub fn interrupt(&mut self, body: &mut CharacterBody, tuning: &BullTuning) -> bool {
        if !self.dashing {
            return false;
        }
        self.finish(body, tuning);
        true
    }

    fn finish(&mut self, body: &mut CharacterBody, tuning: &BullTuning) {
        self.dashing = false;
        self.dash_timer = 0.0;
        self.cooldown = tuning.dash_cooldown;

        body.velocity = Vec2::ZERO;
        body.gravity_scale = self.saved_gravity_scale;
        body.position.y -= tuning.lift;
    }
}

pub(crate) fn update_bulls(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    player_query: Query<&Transform, With<Player>>,
    mut bull_query: Query<
        (
            &mut BullCharge,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let dt = time.delta_secs();
    let player_pos = player_query
        .iter()
        .next()
        .map(|t| t.translation.truncate());

    for (mut bull, mut transform, mut velocity, mut gravity) in &mut bull_query {
        let mut body = CharacterBody {
            position: transform.translation.truncate(),
            velocity: velocity.0,
            gravity_scale: gravity.0,
        };

        let step = bull.tick(dt, &mut body, player_pos, &tuning.bull);
        if step == BullStep::Waiting {
            continue;
        }
        if step == BullStep::Started {
            debug!("Bull charging {:?}", bull.direction());
        }

        transform.translation.x = body.position.x;
        transform.translation.y = body.position.y;
        velocity.0 = body.velocity;
        gravity.0 = body.gravity_scale;
    }
}
