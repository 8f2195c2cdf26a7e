use bevy::prelude::*;

use super::{LanderState, OutcomeState};
use crate::config::{FlightParams, LandingZone, StartPose};
use crate::input::ControlInput;

/// Fixed-step flight model. Owns the lander state and the pad geometry.
pub struct FlightModel {
    state: LanderState,
    zone: LandingZone,
    start: StartPose,
    params: FlightParams,
}

impl FlightModel {
    pub fn new(params: FlightParams, zone: LandingZone, start: StartPose) -> Self {
        Self {
            state: LanderState::at_start(&start),
            zone,
            start,
            params,
        }
    }

    pub fn state(&self) -> &LanderState {
        &self.state
    }

    pub fn zone(&self) -> &LandingZone {
        &self.zone
    }

    /// Advance one tick. A terminal outcome freezes the lander in place.
    pub fn advance(&mut self, input: &ControlInput, outcome: OutcomeState) {
        if outcome.is_terminal() {
            return;
        }

        let params = &self.params;
        let state = &mut self.state;

        // Position first, from last tick's velocity
        state.position += state.velocity;
        state.velocity.y -= params.gravity;
        state.velocity += thrust_vector(state.angle, state.thrust);

        state.thrust *= params.thrust_decay;
        if input.thrust {
            state.thrust = params.ignition_thrust;
        }

        if input.rotate_left {
            state.angle += params.rotation_step;
        }
        if input.rotate_right {
            state.angle -= params.rotation_step;
        }
    }

    pub fn reset(&mut self) {
        self.state = LanderState::at_start(&self.start);
    }
}

/// Thrust along the lander's nose. Angle is in degrees with 0 pointing straight up.
pub fn thrust_vector(angle: f32, thrust: f32) -> Vec2 {
    let heading = (angle + 90.0).to_radians();
    Vec2::new(heading.cos() * thrust, heading.sin() * thrust)
}
