//! Movement domain: schedule settings and input lock resources.

use bevy::prelude::*;
use std::collections::HashSet;

/// When the jump buffer and coyote timers count down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum TimerCadence {
    /// Once per physics step, right before the jump step.
    #[default]
    FixedStep,
    /// Once per rendered frame, using the frame delta.
    Frame,
}

#[derive(Resource, Debug, Default, Clone, Reflect)]
#[reflect(Resource)]
pub struct LocomotionSettings {
    pub timer_cadence: TimerCadence,
}

/// Blocks keyboard input for [`PlayerControlled`](crate::movement::PlayerControlled)
/// characters while any source holds it.
///
/// Locked characters receive a neutral intent, so they decelerate and fall
/// normally instead of freezing.
#[derive(Resource, Debug, Default)]
pub struct InputLock {
    pub sources: HashSet<String>,
}

impl InputLock {
    pub fn is_locked(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn lock(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unlock(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }
}

/// Run condition: true when the timers tick on the physics step.
pub fn timers_on_fixed_step(settings: Res<LocomotionSettings>) -> bool {
    settings.timer_cadence == TimerCadence::FixedStep
}

/// Run condition: true when the timers tick once per frame.
pub fn timers_on_frame(settings: Res<LocomotionSettings>) -> bool {
    settings.timer_cadence == TimerCadence::Frame
}
