//! One-shot external velocity (knockback, bounce pads) waiting to be applied.

use bevy::prelude::*;

/// Accumulates external velocity between physics steps.
///
/// The horizontal part is drained by the locomotion integrator and the
/// vertical part by the vertical integrator; each non-zero part is applied
/// exactly once.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Reflect)]
pub struct ExternalVelocity {
    horizontal: Vec2,
    vertical: f32,
}

impl ExternalVelocity {
    pub fn add(&mut self, horizontal: Vec2, vertical: f32) {
        self.horizontal += horizontal;
        self.vertical += vertical;
    }

    /// 2D contribution: `x` is horizontal, `y` is vertical.
    pub fn add_2d(&mut self, velocity: Vec2) {
        self.add(Vec2::new(velocity.x, 0.0), velocity.y);
    }

    /// 3D contribution: `x`/`z` are horizontal, `y` is vertical.
    pub fn add_3d(&mut self, velocity: Vec3) {
        self.add(velocity.xz(), velocity.y);
    }

    pub fn pending(&self) -> (Vec2, f32) {
        (self.horizontal, self.vertical)
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal == Vec2::ZERO && self.vertical == 0.0
    }

    pub fn take_horizontal(&mut self) -> Option<Vec2> {
        if self.horizontal == Vec2::ZERO {
            return None;
        }
        Some(std::mem::take(&mut self.horizontal))
    }

    pub fn take_vertical(&mut self) -> Option<f32> {
        if self.vertical == 0.0 {
            return None;
        }
        Some(std::mem::take(&mut self.vertical))
    }
}
