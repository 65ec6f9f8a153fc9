//! Combat domain: enemies, health and projectiles.

use bevy::prelude::*;

use crate::character::ShotKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Bull,
    Snail,
}

impl EnemyKind {
    pub fn color(&self) -> Color {
        match self {
            EnemyKind::Bull => Color::srgb(0.7, 0.25, 0.2),
            EnemyKind::Snail => Color::srgb(0.55, 0.6, 0.3),
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            EnemyKind::Bull => Vec2::new(48.0, 36.0),
            EnemyKind::Snail => Vec2::new(32.0, 20.0),
        }
    }
}

/// Touching an enemy kills the player
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Survived,
    /// Health crossed zero on this hit.
    Died,
    AlreadyDead,
}

/// Integer health for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Reports `Died` exactly once, on the hit that empties the pool.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::AlreadyDead;
        }

        self.current = (self.current - amount.max(0)).max(0);
        if self.is_dead() {
            DamageOutcome::Died
        } else {
            DamageOutcome::Survived
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// A fired shot in flight
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub shooter: Entity,
    pub kind: ShotKind,
    pub damage: i32,
    pub lifetime: f32,
}

/// What a projectile touched, as far as hit resolution cares.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitTarget {
    pub is_shooter: bool,
    pub is_player: bool,
    /// Portals, coins and other triggers.
    pub is_sensor: bool,
    pub damageable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileHit {
    /// Pass through; the projectile lives on.
    Ignore,
    /// Deal damage, then the projectile is destroyed.
    Damage(i32),
    /// Destroyed without dealing damage.
    Destroy,
}

pub fn classify_projectile_hit(target: HitTarget, damage: i32) -> ProjectileHit {
    if target.is_shooter || target.is_player || target.is_sensor {
        ProjectileHit::Ignore
    } else if target.damageable {
        ProjectileHit::Damage(damage)
    } else {
        ProjectileHit::Destroy
    }
}

/// Child entity carrying the snail's turn so the physics body never rotates
#[derive(Component, Debug)]
pub struct SnailShell;
