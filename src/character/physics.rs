//! Character domain: ground, wall and headroom queries.
//!
//! The core only sees the [`PhysicsProbe`] trait. [`SpatialProbe`] answers it
//! with avian spatial queries against the terrain layers; a missing ground
//! anchor or collider profile degrades the affected query to its safe value
//! instead of failing the tick.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::character::components::{
    ColliderProfile, ColliderShapes, Facing, GameLayer, GroundCheck,
};
use crate::content::ProbeTuning;

pub trait PhysicsProbe {
    /// Raw ground contact at the ground-check anchor, without coyote masking.
    fn ground_contact(&self) -> bool;

    /// Whether a solid surface sits just beyond the collider in `facing`.
    fn wall_contact(&self, facing: Facing) -> bool;

    /// Whether the standing collider would fit at the current position.
    fn can_stand_up(&self) -> bool;
}

/// Layers the probes treat as solid terrain.
pub fn terrain_filter() -> SpatialQueryFilter {
    SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall])
}

/// Ray used by the wall probe: origin, direction sign and length.
pub fn wall_ray(
    shapes: &ColliderShapes,
    profile: ColliderProfile,
    position: Vec2,
    facing: Facing,
    tuning: &ProbeTuning,
) -> (Vec2, f32, f32) {
    let shape = shapes.shape(profile);
    let origin = position + shape.offset;
    let length = shape.half_extents().x + tuning.wall_check_distance;
    (origin, facing.sign(), length)
}

/// Box tested for headroom: a thin strip just above the standing collider.
/// Returns (center, size).
pub fn stand_up_area(shapes: &ColliderShapes, position: Vec2, tuning: &ProbeTuning) -> (Vec2, Vec2) {
    let standing = shapes.standing;
    let top = position + standing.offset + Vec2::Y * standing.half_extents().y;
    let size = Vec2::new(
        standing.size.x * tuning.stand_up_width_ratio,
        tuning.stand_up_check_distance,
    );
    (top + Vec2::Y * (size.y * 0.5), size)
}

/// [`PhysicsProbe`] backed by avian's [`SpatialQuery`].
pub struct SpatialProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    position: Vec2,
    ground_check: Option<&'a GroundCheck>,
    shapes: Option<&'a ColliderShapes>,
    tuning: &'a ProbeTuning,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> SpatialProbe<'a, 'w, 's> {
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        position: Vec2,
        ground_check: Option<&'a GroundCheck>,
        shapes: Option<&'a ColliderShapes>,
        tuning: &'a ProbeTuning,
    ) -> Self {
        Self {
            spatial_query,
            position,
            ground_check,
            shapes,
            tuning,
            filter: terrain_filter(),
        }
    }
}

impl PhysicsProbe for SpatialProbe<'_, '_, '_> {
    fn ground_contact(&self) -> bool {
        let Some(anchor) = self.ground_check else {
            warn_once!("Player has no GroundCheck anchor; treating it as airborne");
            return false;
        };

        let hits = self.spatial_query.shape_intersections(
            &Collider::circle(anchor.radius),
            self.position + anchor.offset,
            0.0,
            &self.filter,
        );
        !hits.is_empty()
    }

    fn wall_contact(&self, facing: Facing) -> bool {
        let Some(shapes) = self.shapes else {
            warn_once!("Player has no ColliderShapes; wall checks disabled");
            return false;
        };

        let (origin, sign, length) =
            wall_ray(shapes, shapes.applied, self.position, facing, self.tuning);
        let direction = if sign > 0.0 { Dir2::X } else { Dir2::NEG_X };

        self.spatial_query
            .cast_ray(origin, direction, length, true, &self.filter)
            .is_some()
    }

    fn can_stand_up(&self) -> bool {
        // Cannot check, assume there is room
        let Some(shapes) = self.shapes else {
            return true;
        };

        let (center, size) = stand_up_area(shapes, self.position, self.tuning);
        self.spatial_query
            .shape_intersections(&Collider::rectangle(size.x, size.y), center, 0.0, &self.filter)
            .is_empty()
    }
}
