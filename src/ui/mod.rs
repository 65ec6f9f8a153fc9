//! UI domain: in-run HUD elements.

mod hud_abilities;
mod hud_wallet;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::ui::hud_abilities::{
    spawn_ability_hud, update_charge_meter, update_dash_indicator, update_shoot_indicator,
};
use crate::ui::hud_wallet::{spawn_coin_display_ui, update_coin_display};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_ability_hud, spawn_coin_display_ui))
            .add_systems(
                Update,
                (
                    update_charge_meter,
                    update_dash_indicator,
                    update_shoot_indicator,
                    update_coin_display,
                ),
            );
    }
}
