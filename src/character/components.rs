//! Character domain: components, physics layers and the rigid-body view.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::ColliderTuning;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Sensors (portals, coins) - should not block movement
    Sensor,
    /// Projectiles fired by the player
    PlayerProjectile,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn direction(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Facing implied by horizontal input, if it clears the deadzone.
    pub fn from_input(x: f32, deadzone: f32) -> Option<Self> {
        if x > deadzone {
            Some(Facing::Right)
        } else if x < -deadzone {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Rigid-body values the character core reads and writes during a tick.
///
/// Systems copy `Transform`, `LinearVelocity` and `GravityScale` in before
/// ticking and write them back afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }
}

/// Ground-check anchor relative to the body origin.
///
/// Without it the ground probe always reports airborne.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundCheck {
    pub offset: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColliderProfile {
    #[default]
    Standing,
    Crouching,
}

/// An axis-aligned box collider and its offset from the body origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxShape {
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Standing and crouching collider shapes plus the one currently applied
/// to the entity's `Collider`.
#[derive(Component, Debug, Clone, Copy)]
pub struct ColliderShapes {
    pub standing: BoxShape,
    pub crouching: BoxShape,
    pub applied: ColliderProfile,
}

impl ColliderShapes {
    pub fn from_tuning(tuning: &ColliderTuning) -> Self {
        Self {
            standing: BoxShape {
                size: Vec2::new(tuning.standing_width, tuning.standing_height),
                offset: Vec2::new(0.0, tuning.standing_offset_y),
            },
            crouching: BoxShape {
                size: Vec2::new(tuning.crouching_width, tuning.crouching_height),
                offset: Vec2::new(0.0, tuning.crouching_offset_y),
            },
            applied: ColliderProfile::Standing,
        }
    }

    pub fn shape(&self, profile: ColliderProfile) -> BoxShape {
        match profile {
            ColliderProfile::Standing => self.standing,
            ColliderProfile::Crouching => self.crouching,
        }
    }

    pub fn collider(&self, profile: ColliderProfile) -> Collider {
        let shape = self.shape(profile);
        Collider::compound(vec![(
            Position(shape.offset),
            Rotation::default(),
            Collider::rectangle(shape.size.x, shape.size.y),
        )])
    }
}

