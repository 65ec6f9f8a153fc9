//! Content domain: tests for tuning parsing and defaults.

use std::path::Path;

use super::{JumpRefill, TuningFile, load_tuning, parse_tuning};

#[test]
fn test_empty_file_yields_defaults() {
    let tuning = parse_tuning("()", "inline").unwrap();
    let defaults = TuningFile::default();

    assert_eq!(tuning.character.move_speed, defaults.character.move_speed);
    assert_eq!(tuning.character.jump.max_jumps, 2);
    assert_eq!(tuning.character.dash.cooldown, 3.0);
    assert_eq!(tuning.enemies.bull.health, 3);
    assert_eq!(tuning.level.start_level, "main");
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let text = r#"(
        character: (
            move_speed: 200.0,
            jump: (max_jumps: 3, refill: SpentOne),
        ),
    )"#;
    let tuning = parse_tuning(text, "inline").unwrap();

    assert_eq!(tuning.character.move_speed, 200.0);
    assert_eq!(tuning.character.jump.max_jumps, 3);
    assert_eq!(tuning.character.jump.refill, JumpRefill::SpentOne);
    // Untouched siblings keep defaults
    assert_eq!(tuning.character.jump.coyote_grace, 0.10);
    assert_eq!(tuning.character.shoot.charge_time, 2.0);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_tuning("(character: (move_speed: \"fast\"))", "bad.ron").unwrap_err();
    assert_eq!(err.file, "bad.ron");
    assert!(err.to_string().starts_with("Failed to load bad.ron: Parse error"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_tuning(Path::new("definitely/not/here/tuning.ron")).unwrap_err();
    assert!(err.message.starts_with("IO error"));
}

#[test]
fn test_jump_refill_conventions() {
    assert_eq!(JumpRefill::Full.refill(2), 2);
    assert_eq!(JumpRefill::Full.grounded_jump_cost(), 1);
    assert_eq!(JumpRefill::SpentOne.refill(2), 1);
    assert_eq!(JumpRefill::SpentOne.refill(0), 0);
    assert_eq!(JumpRefill::SpentOne.grounded_jump_cost(), 0);
}

#[test]
fn test_derived_speeds() {
    let tuning = TuningFile::default().character;
    assert_eq!(tuning.walk_speed(), 160.0);
    assert_eq!(tuning.crouch_speed(), 80.0);
}
