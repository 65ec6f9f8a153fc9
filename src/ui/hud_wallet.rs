//! UI domain: coin display HUD element.

use bevy::prelude::*;

use crate::level::{CoinCollectedEvent, LevelLoadedEvent};
use crate::ui::hud_abilities::{CHARGE_BAR_HEIGHT, HUD_PADDING};

/// Marker for the coin display UI container
#[derive(Component)]
pub struct CoinDisplayUI;

/// Marker for the coin amount text
#[derive(Component)]
pub struct CoinAmountText;

pub(crate) fn spawn_coin_display_ui(mut commands: Commands) {
    // Below the charge meter's slot
    commands
        .spawn((
            CoinDisplayUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING + CHARGE_BAR_HEIGHT + 8.0),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(16.0),
                    height: Val::Px(16.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.9, 0.75, 0.2)),
            ));

            parent.spawn((
                CoinAmountText,
                Text::new("0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.5)),
            ));
        });
}

/// Newest coin total among this frame's level loads and pickups. Loads run
/// after pickups, so a load wins.
pub(crate) fn latest_coin_total(
    loaded: impl IntoIterator<Item = u32>,
    collected: impl IntoIterator<Item = u32>,
) -> Option<u32> {
    loaded.into_iter().last().or(collected.into_iter().last())
}

pub(crate) fn update_coin_display(
    mut loaded_events: MessageReader<LevelLoadedEvent>,
    mut collected_events: MessageReader<CoinCollectedEvent>,
    mut query: Query<&mut Text, With<CoinAmountText>>,
) {
    let loaded: Vec<u32> = loaded_events.read().map(|event| event.coins).collect();
    let collected: Vec<u32> = collected_events.read().map(|event| event.total).collect();

    let Some(total) = latest_coin_total(loaded, collected) else {
        return;
    };
    for mut text in &mut query {
        **text = format!("{}", total);
    }
}
