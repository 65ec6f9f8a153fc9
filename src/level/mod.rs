//! Level domain: built-in layouts, coins, portals and the death reload.

mod components;
mod data;
mod events;
mod resources;
mod systems;


pub use components::{Coin, Ground, LevelEntity, Portal, Wall, coin_motion};
pub use data::{Block, BlockKind, LEVEL_NAMES, LevelLayout, PortalPlacement, layout};
pub use events::{CoinCollectedEvent, LevelLoadRequest, LevelLoadedEvent, LoadReason};
pub use resources::{CurrentLevel, LevelFlow};
pub use systems::{coins_after_load, spawn_player};

use bevy::prelude::*;

use crate::character::CharacterSet;
use crate::level::systems::{
    animate_coins, collect_coins, enter_portals, fall_out_of_level, load_level,
    request_start_level, schedule_reload_on_death, tick_level_flow,
};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentLevel>()
            .init_resource::<LevelFlow>()
            .add_message::<LevelLoadRequest>()
            .add_message::<LevelLoadedEvent>()
            .add_message::<CoinCollectedEvent>()
            .add_systems(Startup, request_start_level)
            .add_systems(
                Update,
                (
                    collect_coins,
                    enter_portals,
                    fall_out_of_level,
                    schedule_reload_on_death,
                    tick_level_flow,
                    load_level,
                    animate_coins,
                )
                    .chain()
                    .after(CharacterSet),
            );
    }
}
