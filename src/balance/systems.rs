//! Balance domain: ride-height casts, 3D locomotion and force application.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::balance::{
    Balancer, Character3d, GroundReaction, MovementCamera, RideHit, RideInput, ride_spring,
    upright_torque,
};
use crate::config::MovementConfig;
use crate::movement::{
    ContactState, ExternalVelocity, JumpContacts, JumpInputs, JumpStateMachine, JumpedEvent,
    LandedEvent, MoveState, MovementIntent, advance_jump, camera_relative_move,
    integrate_horizontal,
};

pub(crate) fn seed_balancer_targets(mut query: Query<(&Rotation, &mut Balancer), Added<Balancer>>) {
    for (rotation, mut balancer) in &mut query {
        if balancer.target_rotation.is_none() {
            balancer.target_rotation = Some(rotation.0);
        }
    }
}

/// Cast down from each 3D character and run the ride-height spring.
pub(crate) fn probe_ride_height(
    spatial_query: SpatialQuery,
    colliders: Query<&ColliderOf>,
    bodies: Query<(&RigidBody, &LinearVelocity)>,
    mut query: Query<
        (
            Entity,
            &Position,
            &Rotation,
            &LinearVelocity,
            &MovementConfig,
            &mut Balancer,
            &mut ContactState,
        ),
        With<Character3d>,
    >,
) {
    for (entity, position, rotation, velocity, config, mut balancer, mut contacts) in &mut query {
        let balancer = &mut *balancer;
        balancer.hits.clear();

        if config.ride_height > 0.0 {
            let filter = SpatialQueryFilter::from_mask(LayerMask(config.ground_layer_mask()))
                .with_excluded_entities([entity]);
            let origin = position.0;
            let hits = &mut balancer.hits;
            spatial_query.ray_hits_callback(
                origin,
                Dir3::NEG_Y,
                config.ride_height * 2.0,
                true,
                &filter,
                |hit| {
                    hits.push(RideHit {
                        entity: hit.entity,
                        distance: hit.distance,
                        point: origin + Vec3::NEG_Y * hit.distance,
                    })
                },
            );
        }

        let nearest = balancer.hits.nearest();
        let ground_body = nearest.map(|hit| {
            colliders
                .get(hit.entity)
                .map(|collider_of| collider_of.body)
                .unwrap_or(hit.entity)
        });
        let ground = ground_body.and_then(|body| bodies.get(body).ok().map(|b| (body, b)));
        let ground_velocity = match ground {
            Some((_, (rigid_body, ground_velocity))) if !rigid_body.is_static() => ground_velocity.0,
            _ => Vec3::ZERO,
        };

        let spring = ride_spring(
            nearest,
            RideInput {
                down: rotation.0 * Vec3::NEG_Y,
                velocity: velocity.0,
                ground_velocity,
            },
            config.ride_height,
            config.spring_strength,
            config.spring_damper,
        );

        let reaction = match (ground, nearest) {
            (Some((body, (rigid_body, _))), Some(hit))
                if spring.grounded && rigid_body.is_dynamic() =>
            {
                Some(GroundReaction {
                    body,
                    force: -spring.force,
                    point: hit.point,
                })
            }
            _ => None,
        };

        if spring.grounded != contacts.grounded {
            debug!("{}: grounded={}", entity, spring.grounded);
        }

        balancer.output.grounded = spring.grounded;
        balancer.output.force = spring.force;
        balancer.output.reaction = reaction;

        *contacts = ContactState {
            grounded: spring.grounded,
            ground_distance: nearest.map(|hit| hit.distance),
            ground_velocity: nearest.map(|_| ground_velocity),
            ..default()
        };
    }
}

pub(crate) fn apply_jump_3d(
    time: Res<Time>,
    mut jumped: MessageWriter<JumpedEvent>,
    mut landed: MessageWriter<LandedEvent>,
    mut query: Query<
        (
            Entity,
            &MovementConfig,
            &mut MovementIntent,
            &ContactState,
            &mut MoveState,
            &mut JumpStateMachine,
            &mut ExternalVelocity,
            &mut LinearVelocity,
        ),
        With<Character3d>,
    >,
) {
    let dt = time.delta_secs();

    for (
        entity,
        config,
        mut intent,
        contacts,
        mut move_state,
        mut jump,
        mut external,
        mut velocity,
    ) in &mut query
    {
        jump.sync_grounded_velocity(velocity.y);

        let step = advance_jump(
            JumpInputs {
                entity,
                config,
                intent: &mut *intent,
                contacts: JumpContacts {
                    grounded: contacts.grounded,
                    bumped_head: false,
                },
                move_state: &mut *move_state,
                jump: &mut *jump,
                external: &mut *external,
            },
            dt,
            &mut jumped,
            &mut landed,
        );

        // While riding, the spring owns the vertical axis and the resting
        // bias is not applied.
        let state = jump.state();
        if state.is_jumping || state.is_falling {
            velocity.y = step.vertical_velocity;
        } else if step.landed {
            velocity.y = step.external_vertical.unwrap_or(0.0);
        } else if step.external_vertical.is_some() {
            velocity.y = step.vertical_velocity;
        }
    }
}

pub(crate) fn apply_horizontal_3d(
    time: Res<Time>,
    cameras: Query<&GlobalTransform, With<MovementCamera>>,
    mut query: Query<
        (
            &MovementConfig,
            &MovementIntent,
            &ContactState,
            &mut MoveState,
            &mut ExternalVelocity,
            &mut LinearVelocity,
            &mut Balancer,
        ),
        With<Character3d>,
    >,
) {
    let dt = time.delta_secs();
    let (forward, right) = match cameras.iter().next() {
        Some(camera) => (camera.forward().as_vec3(), camera.right().as_vec3()),
        None => (Vec3::NEG_Z, Vec3::X),
    };

    for (config, intent, contacts, mut move_state, mut external, mut velocity, mut balancer) in
        &mut query
    {
        let direction = camera_relative_move(intent.move_axis, forward, right);

        let step = integrate_horizontal(
            &mut move_state,
            contacts,
            direction.xz(),
            intent.run_held,
            external.take_horizontal(),
            config,
            dt,
        );

        velocity.x = step.velocity.x;
        velocity.z = step.velocity.y;
        balancer.face_direction(direction);
    }
}

pub(crate) fn update_upright_torque(
    mut query: Query<
        (
            &Rotation,
            &AngularVelocity,
            &MovementConfig,
            &mut Balancer,
        ),
        With<Character3d>,
    >,
) {
    for (rotation, angular_velocity, config, mut balancer) in &mut query {
        let target = balancer.target_rotation.unwrap_or(rotation.0);
        balancer.output.torque = upright_torque(
            rotation.0,
            target,
            angular_velocity.0,
            config.upright_strength,
            config.upright_damper,
        );
    }
}

pub(crate) fn apply_balance_forces(
    mut reactions: MessageWriter<GroundReaction>,
    mut query: Query<(Forces, &Balancer), With<Character3d>>,
) {
    for (mut forces, balancer) in &mut query {
        let output = balancer.output;
        forces.apply_force(output.force);
        forces.apply_torque(output.torque);

        if let Some(reaction) = output.reaction {
            reactions.write(reaction);
        }
    }
}

pub(crate) fn apply_ground_reactions(
    mut reactions: MessageReader<GroundReaction>,
    mut bodies: Query<Forces>,
) {
    for reaction in reactions.read() {
        if let Ok(mut forces) = bodies.get_mut(reaction.body) {
            forces.apply_force_at_point(reaction.force, reaction.point);
        }
    }
}
