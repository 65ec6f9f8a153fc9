//! Content domain: tunable values for the character, enemies and level flow.
//!
//! Every struct is `#[serde(default)]`, so a tuning file only needs the
//! fields it wants to override. Units are world pixels and seconds.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Root of `tuning.ron`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TuningFile {
    pub character: CharacterTuning,
    pub enemies: EnemyTuning,
    pub level: LevelTuning,
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CharacterTuning {
    /// Full (run) horizontal speed.
    pub move_speed: f32,
    /// Walk speed as a fraction of `move_speed`.
    pub walk_multiplier: f32,
    /// Crouch speed as a fraction of `move_speed`.
    pub crouch_multiplier: f32,
    /// Horizontal speed while falling.
    pub air_control_speed: f32,
    /// Horizontal input below this magnitude counts as no input.
    pub input_deadzone: f32,
    pub gravity: f32,
    pub jump: JumpTuning,
    pub wall: WallTuning,
    pub slide: SlideTuning,
    pub dash: DashTuning,
    pub shoot: ShootTuning,
    pub probe: ProbeTuning,
    pub collider: ColliderTuning,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            move_speed: 320.0,
            walk_multiplier: 0.5,
            crouch_multiplier: 0.25,
            air_control_speed: 280.0,
            input_deadzone: 0.01,
            gravity: 1800.0,
            jump: JumpTuning::default(),
            wall: WallTuning::default(),
            slide: SlideTuning::default(),
            dash: DashTuning::default(),
            shoot: ShootTuning::default(),
            probe: ProbeTuning::default(),
            collider: ColliderTuning::default(),
        }
    }
}

impl CharacterTuning {
    pub fn walk_speed(&self) -> f32 {
        self.move_speed * self.walk_multiplier
    }

    pub fn crouch_speed(&self) -> f32 {
        self.move_speed * self.crouch_multiplier
    }
}

/// How many jump charges a landing restores, and what a grounded jump costs.
///
/// Both conventions give `max_jumps` launches per airtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum JumpRefill {
    /// Landing restores `max_jumps`; the grounded launch spends one charge.
    #[default]
    Full,
    /// Landing restores `max_jumps - 1`; the grounded launch is free.
    SpentOne,
}

impl JumpRefill {
    pub fn refill(self, max_jumps: u8) -> u8 {
        match self {
            JumpRefill::Full => max_jumps,
            JumpRefill::SpentOne => max_jumps.saturating_sub(1),
        }
    }

    pub fn grounded_jump_cost(self) -> u8 {
        match self {
            JumpRefill::Full => 1,
            JumpRefill::SpentOne => 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpTuning {
    /// Launches per airtime (1 = single jump, 2 = double jump).
    pub max_jumps: u8,
    /// Vertical velocity applied on launch.
    pub jump_force: f32,
    pub refill: JumpRefill,
    /// Seconds after a launch during which the ground probe reports airborne.
    pub coyote_grace: f32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            max_jumps: 2,
            jump_force: 680.0,
            refill: JumpRefill::Full,
            coyote_grace: 0.10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WallTuning {
    pub wall_jump_force: f32,
    pub wall_jump_horizontal: f32,
    /// Air control is ignored for this long after a wall jump.
    pub wall_jump_lock: f32,
    /// Maximum downward speed while clinging.
    pub wall_slide_speed: f32,
}

impl Default for WallTuning {
    fn default() -> Self {
        Self {
            wall_jump_force: 600.0,
            wall_jump_horizontal: 400.0,
            wall_jump_lock: 0.15,
            wall_slide_speed: 100.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlideTuning {
    /// Entry speed as a multiple of `move_speed`.
    pub boost: f32,
    /// Horizontal speed lost per second.
    pub deceleration: f32,
}

impl Default for SlideTuning {
    fn default() -> Self {
        Self {
            boost: 1.25,
            deceleration: 900.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashTuning {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
    /// Vertical hop applied on start and removed on end.
    pub lift: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            speed: 900.0,
            duration: 0.5,
            cooldown: 3.0,
            lift: 24.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShootTuning {
    /// Minimum time between quick shots.
    pub cooldown: f32,
    /// How long the Shoot state holds before handing control back.
    pub pose_time: f32,
    /// Hold time needed for a charged shot.
    pub charge_time: f32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub projectile_lifetime: f32,
    pub projectile_radius: f32,
}

impl Default for ShootTuning {
    fn default() -> Self {
        Self {
            cooldown: 0.5,
            pose_time: 0.2,
            charge_time: 2.0,
            projectile_speed: 600.0,
            projectile_damage: 1,
            projectile_lifetime: 3.0,
            projectile_radius: 5.0,
        }
    }
}

/// Geometry of the ground, wall and headroom probes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeTuning {
    pub ground_check_radius: f32,
    /// Vertical offset of the ground-check anchor from the body origin.
    pub ground_check_offset_y: f32,
    /// Ray length past the collider's half width.
    pub wall_check_distance: f32,
    /// Height of the box tested above the standing collider.
    pub stand_up_check_distance: f32,
    /// Width of that box as a fraction of the standing width.
    pub stand_up_width_ratio: f32,
}

impl Default for ProbeTuning {
    fn default() -> Self {
        Self {
            ground_check_radius: 6.0,
            ground_check_offset_y: -24.0,
            wall_check_distance: 4.0,
            stand_up_check_distance: 4.0,
            stand_up_width_ratio: 0.9,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColliderTuning {
    pub standing_width: f32,
    pub standing_height: f32,
    pub standing_offset_y: f32,
    pub crouching_width: f32,
    pub crouching_height: f32,
    pub crouching_offset_y: f32,
}

impl Default for ColliderTuning {
    fn default() -> Self {
        Self {
            standing_width: 24.0,
            standing_height: 48.0,
            standing_offset_y: 0.0,
            crouching_width: 24.0,
            crouching_height: 24.0,
            crouching_offset_y: -12.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub bull: BullTuning,
    pub snail: SnailTuning,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BullTuning {
    pub health: i32,
    pub detection_radius: f32,
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub lift: f32,
}

impl Default for BullTuning {
    fn default() -> Self {
        Self {
            health: 3,
            detection_radius: 288.0,
            dash_speed: 576.0,
            dash_duration: 0.5,
            dash_cooldown: 3.0,
            lift: 24.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SnailTuning {
    pub move_speed: f32,
    pub patrol_radius: f32,
    /// Degrees per second while turning around.
    pub turn_speed: f32,
    pub pause_time: f32,
    /// Distance from a patrol end that counts as arrived.
    pub arrive_tolerance: f32,
}

impl Default for SnailTuning {
    fn default() -> Self {
        Self {
            move_speed: 96.0,
            patrol_radius: 144.0,
            turn_speed: 180.0,
            pause_time: 1.0,
            arrive_tolerance: 4.8,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Seconds between death and the level reload.
    pub death_reload_delay: f32,
    /// Coin spin in degrees per second.
    pub coin_spin_speed: f32,
    pub coin_bob_speed: f32,
    pub coin_bob_height: f32,
    /// Level loaded at startup.
    pub start_level: String,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            death_reload_delay: 1.5,
            coin_spin_speed: 100.0,
            coin_bob_speed: 1.0,
            coin_bob_height: 9.6,
            start_level: "main".to_string(),
        }
    }
}
