//! Combat domain: projectiles, enemy health and the bull/snail behaviours.

mod ai;
mod components;
mod events;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use ai::bull::{BullCharge, BullStep};
pub use ai::snail::SnailPatrol;
pub use components::{
    DamageOutcome, Enemy, EnemyKind, Health, HitTarget, Projectile, ProjectileHit, SnailShell,
    classify_projectile_hit,
};
pub use events::{DamageEvent, DeathEvent, EnemyDefeatedEvent};
pub use spawn::{spawn_bull, spawn_projectile, spawn_snail};

use bevy::prelude::*;

use crate::character::CharacterSet;
use crate::combat::ai::{update_bulls, update_snails};
use crate::combat::systems::{
    apply_damage, detect_projectile_hits, expire_projectiles, process_deaths,
    resolve_enemy_contacts, spawn_fired_projectiles,
};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<EnemyDefeatedEvent>()
            .add_systems(
                Update,
                (update_bulls, update_snails, resolve_enemy_contacts)
                    .chain()
                    .before(CharacterSet),
            )
            .add_systems(
                Update,
                (
                    spawn_fired_projectiles,
                    expire_projectiles,
                    detect_projectile_hits,
                    apply_damage,
                    process_deaths,
                )
                    .chain()
                    .after(CharacterSet),
            );
    }
}
