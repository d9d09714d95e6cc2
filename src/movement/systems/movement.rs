//! Movement domain: locomotion systems for timers, jumping and horizontal motion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::movement::{
    Character2d, ContactState, ExternalVelocity, JumpContacts, JumpStateMachine, JumpStep,
    JumpedEvent, LandedEvent, MoveState, MovementIntent, dampen_on_jump, integrate_horizontal,
};

/// Counts the jump buffer and coyote timers down.
///
/// Scheduled in `FixedUpdate` or `Update` depending on
/// [`TimerCadence`](crate::movement::TimerCadence); `Time` resolves to the
/// matching clock in either schedule.
pub(crate) fn tick_jump_timers(
    time: Res<Time>,
    mut query: Query<(&MovementConfig, &ContactState, &mut JumpStateMachine)>,
) {
    let dt = time.delta_secs();

    for (config, contacts, mut jump) in &mut query {
        jump.tick_timers(dt, contacts.grounded, config);
    }
}

/// Everything one jump step touches on a character.
pub(crate) struct JumpInputs<'a> {
    pub entity: Entity,
    pub config: &'a MovementConfig,
    pub intent: &'a mut MovementIntent,
    pub contacts: JumpContacts,
    pub move_state: &'a mut MoveState,
    pub jump: &'a mut JumpStateMachine,
    pub external: &'a mut ExternalVelocity,
}

/// Run the jump machine for one character and report the transitions.
///
/// Shared by the 2D and 3D controllers; the caller decides how the resulting
/// vertical velocity reaches the body.
pub(crate) fn advance_jump(
    inputs: JumpInputs<'_>,
    dt: f32,
    jumped: &mut MessageWriter<JumpedEvent>,
    landed: &mut MessageWriter<LandedEvent>,
) -> JumpStep {
    let JumpInputs {
        entity,
        config,
        intent,
        contacts,
        move_state,
        jump,
        external,
    } = inputs;

    let edges = intent.take_jump_edges();
    jump.buffer_edge(edges.first, config);
    let step = jump.step(edges.second, contacts, external.take_vertical(), config, dt);

    if step.landed {
        debug!("{}: landed", entity);
        landed.write(LandedEvent { entity });
    }

    if let Some(kind) = step.jumped {
        dampen_on_jump(move_state, config);
        debug!(
            "{}: {:?} jump, {} jump(s) left",
            entity,
            kind,
            jump.state().jumps_remaining(config)
        );
        jumped.write(JumpedEvent { entity, kind });
    }

    step
}

pub(crate) fn apply_jump_2d(
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
        With<Character2d>,
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
        let step = advance_jump(
            JumpInputs {
                entity,
                config,
                intent: &mut *intent,
                contacts: JumpContacts {
                    grounded: contacts.grounded,
                    bumped_head: contacts.bumped_head,
                },
                move_state: &mut *move_state,
                jump: &mut *jump,
                external: &mut *external,
            },
            dt,
            &mut jumped,
            &mut landed,
        );

        velocity.y = step.vertical_velocity;
    }
}

pub(crate) fn apply_horizontal_2d(
    time: Res<Time>,
    mut query: Query<
        (
            &MovementConfig,
            &MovementIntent,
            &ContactState,
            &mut MoveState,
            &mut ExternalVelocity,
            &mut LinearVelocity,
            &mut Position,
        ),
        With<Character2d>,
    >,
) {
    let dt = time.delta_secs();

    for (config, intent, contacts, mut move_state, mut external, mut velocity, mut position) in
        &mut query
    {
        let external = external
            .take_horizontal()
            .map(|horizontal| Vec2::new(horizontal.x, 0.0));
        let direction = Vec2::new(intent.move_axis.x.clamp(-1.0, 1.0), 0.0);

        let step = integrate_horizontal(
            &mut move_state,
            contacts,
            direction,
            intent.run_held,
            external,
            config,
            dt,
        );

        velocity.x = step.velocity.x;
        position.y += step.ledge_nudge;
    }
}
