use bevy::app::AppExit;
use bevy::prelude::*;

/// Control snapshot consumed by one simulation tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub reset: bool,
}

#[cfg(test)]
impl ControlInput {
    pub fn thrust() -> Self {
        Self {
            thrust: true,
            ..default()
        }
    }

    pub fn reset() -> Self {
        Self {
            reset: true,
            ..default()
        }
    }
}

// Held keys are sampled every frame; the reset press is latched until the
// fixed tick takes it, since frames and ticks do not line up one to one.
pub fn read_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<ControlInput>,
    mut exit: EventWriter<AppExit>,
) {
    input.thrust = keys.pressed(KeyCode::KeyT) || keys.pressed(KeyCode::ArrowUp);
    input.rotate_left = keys.pressed(KeyCode::ArrowLeft);
    input.rotate_right = keys.pressed(KeyCode::ArrowRight);
    if keys.just_pressed(KeyCode::KeyR) {
        input.reset = true;
    }

    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}
