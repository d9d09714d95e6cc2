//! Movement domain: the jump state machine.
//!
//! Buffering, coyote time, multi-jump, jump-cut and landing. Gravity shaping
//! lives in [`super::vertical`]; this module decides *when* a jump starts and
//! ends.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::movement::JumpEdge;
use crate::movement::vertical;

/// Coarse jump phase, derived from [`JumpState`] for animation consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum JumpPhase {
    Grounded,
    Ascending,
    ApexHang,
    Descending,
    FastFalling,
}

/// Which trigger rule started a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum JumpKind {
    /// Standing on ground.
    Ground,
    /// Shortly after walking off a ledge.
    Coyote,
    /// Another jump while the current one is still going.
    Multi,
    /// Jump after free-falling past the coyote window (costs two jumps).
    Air,
}

/// Contacts the jump machine reacts to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpContacts {
    pub grounded: bool,
    pub bumped_head: bool,
}

/// Result of one physics step of the jump machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpStep {
    pub vertical_velocity: f32,
    pub jumped: Option<JumpKind>,
    pub landed: bool,
    /// External vertical velocity added this step.
    pub external_vertical: Option<f32>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Reflect)]
pub struct JumpState {
    pub is_jumping: bool,
    pub is_falling: bool,
    pub is_fast_falling: bool,
    pub is_past_apex_threshold: bool,
    pub jumps_used: u8,
    pub vertical_velocity: f32,
    pub jump_buffer_timer: f32,
    pub coyote_timer: f32,
    pub fast_fall_time: f32,
    pub fast_fall_release_speed: f32,
    pub time_past_apex_threshold: f32,
}

impl JumpState {
    pub fn phase(&self) -> JumpPhase {
        if !self.is_jumping && !self.is_falling {
            JumpPhase::Grounded
        } else if self.is_fast_falling {
            JumpPhase::FastFalling
        } else if self.is_jumping && self.is_past_apex_threshold && self.vertical_velocity >= 0.0 {
            JumpPhase::ApexHang
        } else if self.is_jumping && self.vertical_velocity >= 0.0 {
            JumpPhase::Ascending
        } else {
            JumpPhase::Descending
        }
    }

    pub fn jumps_remaining(&self, config: &MovementConfig) -> u8 {
        config.number_of_jumps_allowed.saturating_sub(self.jumps_used)
    }

    /// Cut the jump short right now: no upward speed, full fall gravity.
    pub(crate) fn cut_to_fall(&mut self, config: &MovementConfig) {
        self.is_past_apex_threshold = false;
        self.is_fast_falling = true;
        self.fast_fall_time = config.time_for_upwards_cancel;
        self.vertical_velocity = 0.0;
    }

    /// Start a fast-fall that blends `release_speed` down to zero.
    pub(crate) fn begin_fast_fall(&mut self, release_speed: f32) {
        self.is_fast_falling = true;
        self.fast_fall_release_speed = release_speed;
        self.fast_fall_time = 0.0;
    }
}

/// Owns a character's [`JumpState`] and advances it.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct JumpStateMachine {
    state: JumpState,
    released_during_buffer: bool,
}

impl JumpStateMachine {
    pub fn state(&self) -> &JumpState {
        &self.state
    }

    pub fn phase(&self) -> JumpPhase {
        self.state.phase()
    }

    /// Advance the buffer and coyote timers by one timer tick.
    ///
    /// Both count down toward zero; coyote time is re-armed while grounded.
    pub fn tick_timers(&mut self, dt: f32, grounded: bool, config: &MovementConfig) {
        self.state.jump_buffer_timer = (self.state.jump_buffer_timer - dt).max(0.0);
        self.state.coyote_timer = if grounded {
            config.jump_coyote_time
        } else {
            (self.state.coyote_timer - dt).max(0.0)
        };
    }

    /// Take over the body's vertical speed while standing or riding, so a
    /// later fall starts from what the body is actually doing.
    pub fn sync_grounded_velocity(&mut self, vertical_velocity: f32) {
        if !self.state.is_jumping && !self.state.is_falling {
            self.state.vertical_velocity = vertical_velocity;
        }
    }

    /// Run one physics step: buffering, trigger, landing, gravity, clamp.
    ///
    /// `external_vertical` is a drained one-shot vertical velocity, added
    /// before the clamp.
    pub fn step(
        &mut self,
        edge: JumpEdge,
        contacts: JumpContacts,
        external_vertical: Option<f32>,
        config: &MovementConfig,
        dt: f32,
    ) -> JumpStep {
        self.buffer_edge(edge, config);

        // A buffered press that meets the ground lands first, so the new
        // jump starts from a fresh jump count.
        let mut landed = false;
        if self.state.jump_buffer_timer > 0.0 && self.is_touching_down(contacts.grounded) {
            self.land(config);
            landed = true;
        }

        let jumped = self.try_trigger(contacts.grounded, config);

        if !landed && self.is_touching_down(contacts.grounded) {
            self.land(config);
            landed = true;
        }

        vertical::integrate(&mut self.state, contacts, config, dt);
        if let Some(vertical) = external_vertical {
            self.state.vertical_velocity += vertical;
        }
        vertical::clamp(&mut self.state, config);

        JumpStep {
            vertical_velocity: self.state.vertical_velocity,
            jumped,
            landed,
            external_vertical,
        }
    }

    /// Apply a jump button edge: arm the buffer on press, cut the jump on
    /// release. [`step`](Self::step) does this for its own edge; call it
    /// directly for an earlier edge within the same physics step.
    pub fn buffer_edge(&mut self, edge: JumpEdge, config: &MovementConfig) {
        match edge {
            JumpEdge::Pressed => {
                self.state.jump_buffer_timer = config.jump_buffer_time;
                self.released_during_buffer = false;
            }
            JumpEdge::Released => {
                if self.state.jump_buffer_timer > 0.0 {
                    self.released_during_buffer = true;
                }

                if self.state.is_jumping && self.state.vertical_velocity > 0.0 {
                    if self.state.is_past_apex_threshold {
                        self.state.cut_to_fall(config);
                    } else {
                        let release_speed = self.state.vertical_velocity;
                        self.state.begin_fast_fall(release_speed);
                    }
                }
            }
            JumpEdge::None => {}
        }
    }

    fn try_trigger(&mut self, grounded: bool, config: &MovementConfig) -> Option<JumpKind> {
        if self.state.jump_buffer_timer <= 0.0 {
            return None;
        }

        let allowed = config.number_of_jumps_allowed;
        let state = self.state;

        if !state.is_jumping && (grounded || state.coyote_timer > 0.0) {
            if state.jumps_used >= allowed {
                return None;
            }
            self.launch(1, config);
            if self.released_during_buffer {
                let release_speed = self.state.vertical_velocity;
                self.state.begin_fast_fall(release_speed);
            }
            Some(if grounded {
                JumpKind::Ground
            } else {
                JumpKind::Coyote
            })
        } else if state.is_jumping && state.jumps_used < allowed {
            self.launch(1, config);
            Some(JumpKind::Multi)
        } else if !state.is_jumping && state.is_falling && state.jumps_used + 1 < allowed {
            // Coyote time lapsed: the skipped ground jump is spent as well.
            self.launch(2, config);
            Some(JumpKind::Air)
        } else {
            None
        }
    }

    fn launch(&mut self, jumps: u8, config: &MovementConfig) {
        debug_assert!(
            self.state.jumps_used + jumps <= config.number_of_jumps_allowed,
            "jump count would exceed the allowed number of jumps"
        );
        let state = &mut self.state;
        state.is_jumping = true;
        state.is_falling = false;
        state.is_fast_falling = false;
        state.fast_fall_time = 0.0;
        state.is_past_apex_threshold = false;
        state.time_past_apex_threshold = 0.0;
        state.jump_buffer_timer = 0.0;
        state.vertical_velocity = config.initial_jump_velocity();
        state.jumps_used += jumps;
    }

    fn is_touching_down(&self, grounded: bool) -> bool {
        (self.state.is_jumping || self.state.is_falling)
            && grounded
            && self.state.vertical_velocity <= 0.0
    }

    fn land(&mut self, config: &MovementConfig) {
        let state = &mut self.state;
        state.is_jumping = false;
        state.is_falling = false;
        state.is_fast_falling = false;
        state.fast_fall_time = 0.0;
        state.is_past_apex_threshold = false;
        state.time_past_apex_threshold = 0.0;
        state.jumps_used = 0;
        state.vertical_velocity = config.resting_vertical_velocity;
    }
}
