// simulation/mod.rs
use bevy::prelude::*;

use crate::config::{LanderConfig, LandingZone, StartPose};
use crate::input::ControlInput;

mod flight;
mod outcome;

pub use flight::FlightModel;
pub use outcome::OutcomeEvaluator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanderState {
    pub position: Vec2, // world units
    pub velocity: Vec2, // world units per tick
    pub angle: f32,     // degrees, 0 is upright, never wrapped
    pub thrust: f32,    // current thrust magnitude, >= 0
}

impl LanderState {
    pub fn at_start(start: &StartPose) -> Self {
        Self {
            position: Vec2::new(start.x, start.y),
            velocity: Vec2::ZERO,
            angle: 0.0,
            thrust: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutcomeState {
    #[default]
    Flying,
    Landed,
    Crashed,
}

impl OutcomeState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OutcomeState::Flying)
    }
}

/// Snapshot published after every tick for the renderer and HUD.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub thrust: f32,
    pub outcome: OutcomeState,
}

#[derive(Resource)]
pub struct Simulation {
    flight: FlightModel,
    evaluator: OutcomeEvaluator,
}

impl Simulation {
    pub fn new(config: &LanderConfig) -> Self {
        Self {
            flight: FlightModel::new(config.physics, config.zone, config.start),
            evaluator: OutcomeEvaluator::new(config.criteria),
        }
    }

    pub fn state(&self) -> &LanderState {
        self.flight.state()
    }

    pub fn zone(&self) -> &LandingZone {
        self.flight.zone()
    }

    pub fn outcome(&self) -> OutcomeState {
        self.evaluator.outcome()
    }

    /// Run one tick. A reset request consumes the tick and publishes the start pose.
    pub fn step(&mut self, input: &ControlInput) -> Telemetry {
        if input.reset {
            self.reset();
            return self.telemetry();
        }

        let before = self.outcome();
        self.flight.advance(input, before);
        let after = self.evaluator.evaluate(self.flight.state(), self.flight.zone());

        if after != before {
            let state = self.flight.state();
            info!(
                "{:?} at ({:.1}, {:.1}), velocity ({:.3}, {:.3}), angle {:.1}°",
                after,
                state.position.x,
                state.position.y,
                state.velocity.x,
                state.velocity.y,
                state.angle
            );
        }

        self.telemetry()
    }

    pub fn reset(&mut self) {
        self.flight.reset();
        self.evaluator.reset();
        info!("Lander reset to start pose");
    }

    pub fn telemetry(&self) -> Telemetry {
        let state = self.flight.state();
        Telemetry {
            position: state.position,
            velocity: state.velocity,
            angle: state.angle,
            thrust: state.thrust,
            outcome: self.evaluator.outcome(),
        }
    }
}

pub fn simulation_system(
    mut simulation: ResMut<Simulation>,
    mut input: ResMut<ControlInput>,
    mut telemetry: ResMut<Telemetry>,
) {
    *telemetry = simulation.step(&input);
    input.reset = false;
}

// Ticks run on the fixed clock; everything else only reads Telemetry.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<LanderConfig>()
            .cloned()
            .unwrap_or_default();
        let simulation = Simulation::new(&config);

        app.insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            .insert_resource(simulation.telemetry())
            .insert_resource(simulation)
            .init_resource::<ControlInput>()
            .add_systems(FixedUpdate, simulation_system);
    }
}
