//! UI domain: charge meter and ability pips.

use bevy::prelude::*;

use crate::character::{Character, Player};
use crate::content::CharacterTuning;

pub(crate) const CHARGE_BAR_WIDTH: f32 = 200.0;
pub(crate) const CHARGE_BAR_HEIGHT: f32 = 14.0;
pub(crate) const HUD_PADDING: f32 = 16.0;

/// Marker for the charge meter container; hidden unless charging
#[derive(Component)]
pub struct ChargeMeterUI;

/// Marker for the charge meter fill element
#[derive(Component)]
pub struct ChargeMeterFill;

/// Marker for the dash availability pip
#[derive(Component)]
pub struct DashIndicator;

/// Marker for the quick-shot cooldown pip
#[derive(Component)]
pub struct ShootIndicator;

const PIP_SIZE: f32 = 18.0;
const DASH_COLOR: Color = Color::srgb(1.0, 1.0, 0.4);
const SHOOT_COLOR: Color = Color::srgb(1.0, 0.5, 0.5);

/// Full color when ready, dimmed while cooling down.
pub(crate) fn pip_color(ready: bool, color: Color) -> Color {
    if ready {
        color
    } else {
        color.with_alpha(0.3)
    }
}

fn pip_node(right: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        right: Val::Px(right),
        top: Val::Px(HUD_PADDING),
        width: Val::Px(PIP_SIZE),
        height: Val::Px(PIP_SIZE),
        ..default()
    }
}

pub(crate) fn spawn_ability_hud(mut commands: Commands) {
    commands
        .spawn((
            ChargeMeterUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING),
                width: Val::Px(CHARGE_BAR_WIDTH),
                height: Val::Px(CHARGE_BAR_HEIGHT),
                border: UiRect::all(Val::Px(2.0)),
                display: Display::None,
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
        ))
        .with_children(|parent| {
            parent.spawn((
                ChargeMeterFill,
                Node {
                    width: Val::Percent(0.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.4, 0.9, 1.0)),
            ));
        });

    commands.spawn((
        ShootIndicator,
        pip_node(HUD_PADDING),
        BackgroundColor(SHOOT_COLOR),
    ));

    // Hidden until dash is unlocked
    commands.spawn((
        DashIndicator,
        Node {
            display: Display::None,
            ..pip_node(HUD_PADDING + PIP_SIZE + 8.0)
        },
        BackgroundColor(DASH_COLOR),
    ));
}

pub(crate) fn update_charge_meter(
    tuning: Res<CharacterTuning>,
    player_query: Query<&Character, With<Player>>,
    mut container_query: Query<&mut Node, (With<ChargeMeterUI>, Without<ChargeMeterFill>)>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<ChargeMeterFill>>,
) {
    let character = player_query.single().ok();
    let charging = character.is_some_and(|c| c.alive && c.shoot.meter().is_charging());
    let fraction = character.map_or(0.0, |c| c.charge_fraction(&tuning));

    for mut node in &mut container_query {
        node.display = if charging { Display::Flex } else { Display::None };
    }

    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(fraction * 100.0);
        // Full charge turns white
        bg_color.0 = if fraction >= 1.0 {
            Color::WHITE
        } else {
            Color::srgb(0.4, 0.9, 1.0)
        };
    }
}

pub(crate) fn update_dash_indicator(
    player_query: Query<&Character, With<Player>>,
    mut query: Query<(&mut Node, &mut BackgroundColor), With<DashIndicator>>,
) {
    let Ok(character) = player_query.single() else {
        return;
    };

    for (mut node, mut bg_color) in &mut query {
        node.display = if character.can_dash {
            Display::Flex
        } else {
            Display::None
        };
        bg_color.0 = pip_color(character.dash_available(), DASH_COLOR);
    }
}

pub(crate) fn update_shoot_indicator(
    player_query: Query<&Character, With<Player>>,
    mut query: Query<&mut BackgroundColor, With<ShootIndicator>>,
) {
    let Ok(character) = player_query.single() else {
        return;
    };

    for mut bg_color in &mut query {
        bg_color.0 = pip_color(character.can_shoot(), SHOOT_COLOR);
    }
}
