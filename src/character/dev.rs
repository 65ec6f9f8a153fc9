//! Character domain: debug-only probe visualisation.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::components::{ColliderShapes, GroundCheck, Player};
use crate::character::machine::Character;
use crate::character::physics::{PhysicsProbe, SpatialProbe, stand_up_area, wall_ray};
use crate::content::CharacterTuning;

const HIT: Color = Color::srgb(0.2, 1.0, 0.3);
const MISS: Color = Color::srgb(1.0, 0.3, 0.2);

fn probe_color(hit: bool) -> Color {
    if hit { HIT } else { MISS }
}

/// Draw the ground circle, wall ray and stand-up box, green on contact.
pub(crate) fn draw_probes(
    mut gizmos: Gizmos,
    spatial_query: SpatialQuery,
    tuning: Res<CharacterTuning>,
    query: Query<(&Transform, &Character, &GroundCheck, &ColliderShapes), With<Player>>,
) {
    for (transform, character, ground, shapes) in &query {
        let position = transform.translation.truncate();
        let probe = SpatialProbe::new(
            &spatial_query,
            position,
            Some(ground),
            Some(shapes),
            &tuning.probe,
        );

        gizmos.circle_2d(
            Isometry2d::from_translation(position + ground.offset),
            ground.radius,
            probe_color(probe.ground_contact()),
        );

        let (origin, sign, length) =
            wall_ray(shapes, shapes.applied, position, character.facing, &tuning.probe);
        gizmos.line_2d(
            origin,
            origin + Vec2::X * sign * length,
            probe_color(probe.wall_contact(character.facing)),
        );

        let (center, size) = stand_up_area(shapes, position, &tuning.probe);
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            size,
            probe_color(!probe.can_stand_up()),
        );
    }
}
