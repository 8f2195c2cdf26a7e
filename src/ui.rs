use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::simulation::{OutcomeState, Simulation, Telemetry};

/// Live telemetry readout, enabled with `--debug`.
#[derive(Resource, Default)]
pub struct DebugOverlay(pub bool);

pub fn status_message(outcome: OutcomeState) -> &'static str {
    match outcome {
        OutcomeState::Flying => "Bring the booster down upright on the pad",
        OutcomeState::Landed => "Booster landed and secure. Press R to fly again",
        OutcomeState::Crashed => "Booster lost. Press R to try again",
    }
}

pub fn print_controls() {
    info!("Press T or Up-arrow for thrust.");
    info!("Press Left or Right arrows for rocket thrust vector.");
    info!("Press R to reset, Escape to quit.");
}

pub fn hud_system(
    mut contexts: EguiContexts,
    telemetry: Res<Telemetry>,
    simulation: Res<Simulation>,
    debug: Res<DebugOverlay>,
) {
    egui::Area::new(egui::Id::new("hud"))
        .fixed_pos(egui::pos2(10.0, 10.0))
        .show(contexts.ctx_mut(), |ui| {
            let color = match telemetry.outcome {
                OutcomeState::Flying => egui::Color32::WHITE,
                OutcomeState::Landed => egui::Color32::GREEN,
                OutcomeState::Crashed => egui::Color32::RED,
            };
            ui.colored_label(color, status_message(telemetry.outcome));

            if debug.0 {
                ui.add_space(4.0);
                ui.label(format!(
                    "pos: {:.2} {:.2}",
                    telemetry.position.x, telemetry.position.y
                ));
                ui.label(format!(
                    "vel: {:.3} {:.3}",
                    telemetry.velocity.x, telemetry.velocity.y
                ));
                ui.label(format!("angle: {:.1}°", telemetry.angle));
                ui.label(format!("thrust: {:.5}", telemetry.thrust));
                ui.label(format!(
                    "pad trigger: {:.1}",
                    simulation.zone().trigger_altitude()
                ));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_messages_mention_reset() {
        assert!(status_message(OutcomeState::Landed).contains("Press R"));
        assert!(status_message(OutcomeState::Crashed).contains("Press R"));
        assert!(!status_message(OutcomeState::Flying).contains("Press R"));
    }
}
