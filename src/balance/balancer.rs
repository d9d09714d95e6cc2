//! Balance domain: ride-height spring and upright torque math.
//!
//! Everything here is a pure function of the body state and the ground hits,
//! so it can be tested without a physics world.

use bevy::prelude::*;

/// Hits a ride-height cast can keep per step.
pub const HIT_CAPACITY: usize = 5;

/// Below this rotation angle (radians) the upright spring is considered settled.
const SETTLED_ANGLE: f32 = 1.0e-4;

/// One ground hit below a 3D character.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RideHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// Fixed-capacity hit list, cleared and refilled every step.
///
/// Extra hits past [`HIT_CAPACITY`] are dropped, like a non-allocating
/// raycast into a preallocated array.
#[derive(Debug, Default, Clone, PartialEq, Reflect)]
pub struct HitBuffer {
    hits: Vec<RideHit>,
}

impl HitBuffer {
    pub fn new() -> Self {
        Self {
            hits: Vec::with_capacity(HIT_CAPACITY),
        }
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// Store a hit; returns `false` once the buffer is full.
    pub fn push(&mut self, hit: RideHit) -> bool {
        if self.hits.len() >= HIT_CAPACITY {
            return false;
        }
        self.hits.push(hit);
        true
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn hits(&self) -> &[RideHit] {
        &self.hits
    }

    pub fn nearest(&self) -> Option<RideHit> {
        self.hits
            .iter()
            .copied()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Body and ground state the ride spring reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideInput {
    /// The character's local down direction.
    pub down: Vec3,
    pub velocity: Vec3,
    /// Velocity of the body under the character, zero for static ground.
    pub ground_velocity: Vec3,
}

/// Spring outcome for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RideSpring {
    pub grounded: bool,
    /// Force on the character.
    pub force: Vec3,
    /// Distance from the ride height to the ground; negative when riding low.
    pub height_error: f32,
}

/// Spring/damper that holds the character `ride_height` above the nearest hit.
///
/// Grounded iff the nearest hit is within `ride_height`. No force is produced
/// while airborne; the ground body receives the negated force.
pub fn ride_spring(
    nearest: Option<RideHit>,
    input: RideInput,
    ride_height: f32,
    strength: f32,
    damper: f32,
) -> RideSpring {
    let Some(hit) = nearest else {
        return RideSpring::default();
    };

    let height_error = hit.distance - ride_height;
    if height_error > 0.0 {
        return RideSpring {
            height_error,
            ..default()
        };
    }

    let closing_velocity = input.down.dot(input.velocity) - input.down.dot(input.ground_velocity);
    let spring = height_error * strength - closing_velocity * damper;

    RideSpring {
        grounded: true,
        force: input.down * spring,
        height_error,
    }
}

/// Rotation that takes `from` to `to`, picking the short way around.
pub fn shortest_rotation(to: Quat, from: Quat) -> Quat {
    if to.dot(from) < 0.0 {
        to * (-from).inverse()
    } else {
        to * from.inverse()
    }
}

/// Torque that rotates `current` toward `target`, damped by `angular_velocity`.
pub fn upright_torque(
    current: Quat,
    target: Quat,
    angular_velocity: Vec3,
    strength: f32,
    damper: f32,
) -> Vec3 {
    let (axis, angle) = shortest_rotation(target, current).to_axis_angle();
    let spring = if angle.abs() > SETTLED_ANGLE && axis.is_finite() {
        axis.normalize_or_zero() * (angle * strength)
    } else {
        Vec3::ZERO
    };
    spring - angular_velocity * damper
}

/// Yaw-only orientation whose forward (`-Z`) points along `direction`.
///
/// `None` when `direction` has no horizontal component.
pub fn face_direction(direction: Vec3) -> Option<Quat> {
    let planar = Vec3::new(direction.x, 0.0, direction.z);
    if planar.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-planar.x, -planar.z)))
}
