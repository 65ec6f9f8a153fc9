//! UI domain: tests for HUD value selection.

use bevy::prelude::*;

use super::hud_abilities::pip_color;
use super::hud_wallet::latest_coin_total;

#[test]
fn test_coin_total_follows_latest_pickup() {
    assert_eq!(latest_coin_total([0u32; 0], [1, 2, 3]), Some(3));
    assert_eq!(latest_coin_total([0u32; 0], [0u32; 0]), None);
}

#[test]
fn test_level_load_overrides_same_frame_pickup() {
    // Death reload restores the entry count even if a coin was grabbed
    assert_eq!(latest_coin_total([4], [9]), Some(4));
}

#[test]
fn test_pip_dims_while_cooling_down() {
    let color = Color::srgb(1.0, 0.5, 0.5);
    assert_eq!(pip_color(true, color), color);
    assert!(pip_color(false, color).alpha() < color.alpha());
}
