use super::{LanderState, OutcomeState};
use crate::config::{LandingCriteria, LandingZone};

/// Landing state machine. `Landed` and `Crashed` are sticky until `reset`.
pub struct OutcomeEvaluator {
    outcome: OutcomeState,
    criteria: LandingCriteria,
}

impl OutcomeEvaluator {
    pub fn new(criteria: LandingCriteria) -> Self {
        Self {
            outcome: OutcomeState::Flying,
            criteria,
        }
    }

    pub fn outcome(&self) -> OutcomeState {
        self.outcome
    }

    pub fn evaluate(&mut self, state: &LanderState, zone: &LandingZone) -> OutcomeState {
        if !self.outcome.is_terminal() {
            self.outcome = classify(state, zone, &self.criteria);
        }
        self.outcome
    }

    pub fn reset(&mut self) {
        self.outcome = OutcomeState::Flying;
    }
}

fn classify(state: &LanderState, zone: &LandingZone, criteria: &LandingCriteria) -> OutcomeState {
    // Fell out of the world
    if state.position.y < 0.0 {
        return OutcomeState::Crashed;
    }

    if state.position.y > zone.trigger_altitude() {
        return OutcomeState::Flying;
    }

    // Beside the pad the lander keeps falling; only the world floor stops it
    if !criteria.within_band(zone, state.position.x) {
        return OutcomeState::Flying;
    }

    if criteria.upright(state.angle) {
        OutcomeState::Landed
    } else {
        OutcomeState::Crashed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    fn lander(x: f32, y: f32, angle: f32) -> LanderState {
        LanderState {
            position: Vec2::new(x, y),
            velocity: Vec2::new(0.0, -1.0),
            angle,
            thrust: 0.0,
        }
    }

    fn evaluate(state: LanderState) -> OutcomeState {
        OutcomeEvaluator::new(LandingCriteria::default()).evaluate(&state, &LandingZone::default())
    }

    #[test]
    fn test_above_trigger_is_flying() {
        assert_eq!(evaluate(lander(100.0, 28.5, 30.0)), OutcomeState::Flying);
    }

    #[test]
    fn test_upright_on_pad_lands() {
        assert_eq!(evaluate(lander(100.0, 28.0, 0.0)), OutcomeState::Landed);
        assert_eq!(evaluate(lander(50.0, 27.0, 5.0)), OutcomeState::Landed);
        assert_eq!(evaluate(lander(150.0, 27.0, -5.0)), OutcomeState::Landed);
    }

    #[test]
    fn test_tilted_on_pad_crashes() {
        assert_eq!(evaluate(lander(100.0, 27.0, 5.5)), OutcomeState::Crashed);
        assert_eq!(evaluate(lander(100.0, 27.0, -10.0)), OutcomeState::Crashed);
        // No wrapping: a full turn is not upright
        assert_eq!(evaluate(lander(100.0, 27.0, 360.0)), OutcomeState::Crashed);
    }

    #[test]
    fn test_beside_pad_keeps_flying() {
        assert_eq!(evaluate(lander(151.0, 27.0, 0.0)), OutcomeState::Flying);
        assert_eq!(evaluate(lander(10.0, 0.0, 40.0)), OutcomeState::Flying);
    }

    #[test]
    fn test_below_floor_crashes_first() {
        // Upright and inside the band, but under the floor
        assert_eq!(evaluate(lander(100.0, -0.1, 0.0)), OutcomeState::Crashed);
        assert_eq!(evaluate(lander(300.0, -0.1, 0.0)), OutcomeState::Crashed);
    }

    #[test]
    fn test_terminal_is_sticky_until_reset() {
        let zone = LandingZone::default();
        let mut evaluator = OutcomeEvaluator::new(LandingCriteria::default());

        assert_eq!(
            evaluator.evaluate(&lander(100.0, 27.0, 0.0), &zone),
            OutcomeState::Landed
        );
        assert_eq!(
            evaluator.evaluate(&lander(100.0, -50.0, 90.0), &zone),
            OutcomeState::Landed
        );

        evaluator.reset();
        assert_eq!(evaluator.outcome(), OutcomeState::Flying);
        assert_eq!(
            evaluator.evaluate(&lander(100.0, 27.0, 90.0), &zone),
            OutcomeState::Crashed
        );
    }

    #[test]
    fn test_custom_band_width() {
        let criteria = LandingCriteria {
            horizontal_tolerance: 5.0,
            angle_tolerance: 1.0,
        };
        let zone = LandingZone::default();
        let mut evaluator = OutcomeEvaluator::new(criteria);

        assert_eq!(
            evaluator.evaluate(&lander(110.0, 27.0, 0.0), &zone),
            OutcomeState::Flying
        );
        assert_eq!(
            evaluator.evaluate(&lander(104.0, 27.0, 2.0), &zone),
            OutcomeState::Crashed
        );
    }
}
