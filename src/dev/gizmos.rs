//! Dev domain: gizmo drawing of the contact probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::movement::{
    BodyExtents, BoxProbe, Character2d, ContactCaster, ProbeLayout, RayProbe, SideRays,
    SpatialCaster,
};

const HIT: Color = Color::srgb(0.2, 0.9, 0.3);
const MISS: Color = Color::srgb(0.9, 0.2, 0.2);

fn hit_color(hit: bool) -> Color {
    if hit { HIT } else { MISS }
}

fn draw_box(gizmos: &mut Gizmos, caster: &impl ContactCaster, cast: BoxProbe) {
    let hit = caster
        .cast_box(cast.origin, cast.half_extents, cast.direction, cast.distance)
        .is_some();
    let swept_center = cast.origin + cast.direction * (cast.distance * 0.5);
    let swept_size = Vec2::new(
        cast.half_extents.x * 2.0,
        cast.half_extents.y * 2.0 + cast.distance,
    );
    gizmos.rect_2d(
        Isometry2d::from_translation(swept_center),
        swept_size,
        hit_color(hit),
    );
}

fn draw_ray(gizmos: &mut Gizmos, caster: &impl ContactCaster, ray: RayProbe) {
    let hit = caster
        .cast_ray(ray.origin, ray.direction, ray.distance)
        .is_some();
    gizmos.line_2d(
        ray.origin,
        ray.origin + ray.direction * ray.distance,
        hit_color(hit),
    );
}

fn draw_side(gizmos: &mut Gizmos, caster: &impl ContactCaster, side: Option<SideRays>) {
    if let Some(side) = side {
        for ray in [side.head, side.body, side.feet] {
            draw_ray(gizmos, caster, ray);
        }
    }
}

pub(crate) fn draw_probe_gizmos(
    mut gizmos: Gizmos,
    spatial_query: SpatialQuery,
    query: Query<(Entity, &Position, &BodyExtents, &MovementConfig), With<Character2d>>,
) {
    for (entity, position, extents, config) in &query {
        let caster = SpatialCaster::new(&spatial_query, config.ground_layer_mask(), entity);
        let layout = ProbeLayout::new(position.0, *extents, config);

        if let Some(ground) = layout.ground {
            draw_box(&mut gizmos, &caster, ground);
        }
        if let Some(head) = layout.head {
            draw_box(&mut gizmos, &caster, head);
        }
        draw_side(&mut gizmos, &caster, layout.left);
        draw_side(&mut gizmos, &caster, layout.right);
    }
}
