//! Movement domain: ground, head and wall probes for 2D characters.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::movement::{BodyExtents, ContactState, SideContacts, WallContacts};

/// Inset of the head/feet wall rays from the body edges, so a ray starting on
/// the floor or ceiling surface is not reported as a wall.
pub const PROBE_SKIN: f32 = 0.01;

/// Geometry the probes cast against.
///
/// Both casts return the distance to the first hit within `max_distance`.
/// A cast whose origin already overlaps solid geometry hits at distance zero.
pub trait ContactCaster {
    fn cast_box(
        &self,
        origin: Vec2,
        half_extents: Vec2,
        direction: Dir2,
        max_distance: f32,
    ) -> Option<f32>;

    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<f32>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxProbe {
    pub origin: Vec2,
    pub half_extents: Vec2,
    pub direction: Dir2,
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayProbe {
    pub origin: Vec2,
    pub direction: Dir2,
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideRays {
    pub head: RayProbe,
    pub body: RayProbe,
    pub feet: RayProbe,
}

/// Where every probe of one character goes this step.
///
/// A probe is `None` when its configured length is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeLayout {
    pub ground: Option<BoxProbe>,
    pub head: Option<BoxProbe>,
    pub left: Option<SideRays>,
    pub right: Option<SideRays>,
}

impl ProbeLayout {
    pub fn new(center: Vec2, extents: BodyExtents, config: &MovementConfig) -> Self {
        let half = extents.half_size;
        let bottom = center.y - half.y;
        let top = center.y + half.y;

        let ground = (config.ground_detection_ray_length > 0.0).then(|| BoxProbe {
            origin: Vec2::new(center.x, bottom),
            half_extents: Vec2::new(half.x, config.ground_detection_ray_length * 0.5),
            direction: Dir2::NEG_Y,
            distance: config.ground_detection_ray_length,
        });

        let head = (config.head_detection_ray_length > 0.0).then(|| BoxProbe {
            origin: Vec2::new(center.x, top),
            half_extents: Vec2::new(
                half.x * config.head_width,
                config.head_detection_ray_length * 0.5,
            ),
            direction: Dir2::Y,
            distance: config.head_detection_ray_length,
        });

        let wall_distance = half.x + config.wall_detection_ray_length;
        let side = |direction: Dir2| SideRays {
            head: RayProbe {
                origin: Vec2::new(center.x, top - PROBE_SKIN),
                direction,
                distance: wall_distance,
            },
            body: RayProbe {
                origin: center,
                direction,
                distance: wall_distance,
            },
            feet: RayProbe {
                origin: Vec2::new(center.x, bottom + PROBE_SKIN),
                direction,
                distance: wall_distance,
            },
        };
        let walls_enabled = config.wall_detection_ray_length > 0.0;

        Self {
            ground,
            head,
            left: walls_enabled.then(|| side(Dir2::NEG_X)),
            right: walls_enabled.then(|| side(Dir2::X)),
        }
    }
}

fn cast_side(caster: &impl ContactCaster, rays: Option<SideRays>) -> SideContacts {
    let Some(rays) = rays else {
        return SideContacts::default();
    };
    let hit = |ray: RayProbe| {
        caster
            .cast_ray(ray.origin, ray.direction, ray.distance)
            .is_some()
    };
    SideContacts {
        head: hit(rays.head),
        body: hit(rays.body),
        feet: hit(rays.feet),
    }
}

/// Classify ground, head and wall contact for a character centred at `center`.
///
/// Pure function of the pose and the geometry behind `caster`; nothing is
/// retained between calls.
pub fn probe(
    center: Vec2,
    extents: BodyExtents,
    config: &MovementConfig,
    caster: &impl ContactCaster,
) -> ContactState {
    let layout = ProbeLayout::new(center, extents, config);

    let ground_distance = layout.ground.and_then(|cast| {
        caster.cast_box(cast.origin, cast.half_extents, cast.direction, cast.distance)
    });
    let bumped_head = layout
        .head
        .and_then(|cast| {
            caster.cast_box(cast.origin, cast.half_extents, cast.direction, cast.distance)
        })
        .is_some();

    ContactState {
        grounded: ground_distance.is_some(),
        bumped_head,
        walls: WallContacts {
            left: cast_side(caster, layout.left),
            right: cast_side(caster, layout.right),
        },
        ground_distance,
        ground_velocity: None,
    }
}
