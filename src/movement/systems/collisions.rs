//! Movement domain: Avian-backed contact probing for 2D characters.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::movement::{BodyExtents, Character2d, ContactCaster, ContactState, probe};

/// [`ContactCaster`] over the 2D physics world, limited to the ground layer
/// and blind to the probing character itself.
pub struct SpatialCaster<'a, 'w, 's> {
    query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> SpatialCaster<'a, 'w, 's> {
    pub fn new(query: &'a SpatialQuery<'w, 's>, layer_mask: u32, exclude: Entity) -> Self {
        Self {
            query,
            filter: SpatialQueryFilter::from_mask(LayerMask(layer_mask))
                .with_excluded_entities([exclude]),
        }
    }
}

impl ContactCaster for SpatialCaster<'_, '_, '_> {
    fn cast_box(
        &self,
        origin: Vec2,
        half_extents: Vec2,
        direction: Dir2,
        max_distance: f32,
    ) -> Option<f32> {
        let shape = Collider::rectangle(half_extents.x * 2.0, half_extents.y * 2.0);
        self.query
            .cast_shape(
                &shape,
                origin,
                0.0,
                direction,
                &ShapeCastConfig::from_max_distance(max_distance),
                &self.filter,
            )
            .map(|hit| hit.distance)
    }

    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<f32> {
        self.query
            .cast_ray(origin, direction, max_distance, true, &self.filter)
            .map(|hit| hit.distance)
    }
}

pub(crate) fn probe_contacts_2d(
    spatial_query: SpatialQuery,
    mut query: Query<
        (
            Entity,
            &Position,
            &BodyExtents,
            &MovementConfig,
            &mut ContactState,
        ),
        With<Character2d>,
    >,
) {
    for (entity, position, extents, config, mut contacts) in &mut query {
        let caster = SpatialCaster::new(&spatial_query, config.ground_layer_mask(), entity);
        let was_grounded = contacts.grounded;

        *contacts = probe(position.0, *extents, config, &caster);

        if contacts.grounded != was_grounded {
            debug!("{}: grounded={}", entity, contacts.grounded);
        }
    }
}
