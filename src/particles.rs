use bevy::prelude::*;
use rand::Rng;

use crate::constants::LANDER_VERTICES;
use crate::simulation::{OutcomeState, Telemetry};
use crate::visualization::Lander;

// Constants for the crash burst
const DEBRIS_LIFETIME: f32 = 1.2;
const DEBRIS_SIZE: f32 = 3.0;
const DEBRIS_COUNT_MIN: usize = 100;
const DEBRIS_COUNT_MAX: usize = 200;
const DEBRIS_SPEED: f32 = 90.0; // pixels per second
const DEBRIS_SPREAD: f32 = 0.25; // radians
const DEBRIS_GRAVITY: f32 = 120.0;
const DEBRIS_BOUNCE_DAMPING: f32 = 0.3;
const DEBRIS_GROUND_Y: f32 = 0.0;

#[derive(Component)]
pub struct Debris {
    lifetime: Timer,
    velocity: Vec2,
}

/// Tracks whether the burst for the current crash has already gone off.
#[derive(Resource, Default)]
pub struct CrashEffect {
    pub spawned: bool,
}

// Burst of debris from the middle of the hull
pub fn kaboom(commands: &mut Commands, lander_pos: Vec2, lander_angle: f32) {
    let mut rng = rand::thread_rng();
    let center = lander_pos
        + Vec2::from_angle(lander_angle.to_radians()).rotate(Vec2::new(
            0.0,
            LANDER_VERTICES[1][1] / 2.0,
        ));

    let particle_count = rng.gen_range(DEBRIS_COUNT_MIN..DEBRIS_COUNT_MAX);
    for i in 0..particle_count {
        let angle = (i as f32 / particle_count as f32) * std::f32::consts::TAU
            + rng.gen_range(-DEBRIS_SPREAD..DEBRIS_SPREAD);
        let velocity = Vec2::from_angle(angle) * DEBRIS_SPEED * rng.gen_range(0.4_f32..1.2);

        commands.spawn((
            Sprite {
                color: Color::srgb(1.0, rng.gen_range(0.2..0.7), 0.0),
                custom_size: Some(Vec2::new(DEBRIS_SIZE, DEBRIS_SIZE)),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 2.0),
            Debris {
                lifetime: Timer::from_seconds(DEBRIS_LIFETIME, TimerMode::Once),
                velocity,
            },
        ));
    }
}

pub fn particle_system(
    mut commands: Commands,
    time: Res<Time>,
    mut crash: ResMut<CrashEffect>,
    mut debris_query: Query<(Entity, &mut Transform, &mut Debris)>,
    mut lander_query: Query<&mut Visibility, With<Lander>>,
    telemetry: Res<Telemetry>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut debris) in debris_query.iter_mut() {
        debris.lifetime.tick(time.delta());
        if debris.lifetime.finished() {
            commands.entity(entity).despawn();
            continue;
        }

        debris.velocity.y -= DEBRIS_GRAVITY * dt;
        transform.translation.x += debris.velocity.x * dt;
        transform.translation.y += debris.velocity.y * dt;

        if transform.translation.y <= DEBRIS_GROUND_Y {
            transform.translation.y = DEBRIS_GROUND_Y;
            debris.velocity.y = -debris.velocity.y * DEBRIS_BOUNCE_DAMPING;
            debris.velocity.x *= 0.8;
        }
    }

    match telemetry.outcome {
        OutcomeState::Crashed if !crash.spawned => {
            kaboom(&mut commands, telemetry.position, telemetry.angle);
            crash.spawned = true;
            for mut visibility in lander_query.iter_mut() {
                *visibility = Visibility::Hidden;
            }
        }
        OutcomeState::Crashed => {}
        // A reset re-arms the effect and brings the hull back
        _ => {
            crash.spawned = false;
            for mut visibility in lander_query.iter_mut() {
                visibility.set_if_neq(Visibility::Inherited);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crash_app(outcome: OutcomeState) -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<CrashEffect>()
            .insert_resource(Telemetry {
                position: Vec2::new(100.0, 20.0),
                velocity: Vec2::ZERO,
                angle: 12.0,
                thrust: 0.0,
                outcome,
            })
            .add_systems(Update, particle_system);
        app.world_mut().spawn((Lander, Visibility::Inherited));
        app
    }

    fn lander_visibility(app: &mut App) -> Visibility {
        let mut query = app
            .world_mut()
            .query_filtered::<&Visibility, With<Lander>>();
        *query.single(app.world())
    }

    fn debris_count(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&Debris>();
        query.iter(app.world()).count()
    }

    #[test]
    fn test_crash_spawns_one_burst() {
        let mut app = crash_app(OutcomeState::Crashed);
        app.update();
        let spawned = debris_count(&mut app);
        assert!((DEBRIS_COUNT_MIN..DEBRIS_COUNT_MAX).contains(&spawned));

        assert_eq!(lander_visibility(&mut app), Visibility::Hidden);

        app.update();
        assert_eq!(debris_count(&mut app), spawned);
        assert!(app.world().resource::<CrashEffect>().spawned);
        assert_eq!(lander_visibility(&mut app), Visibility::Hidden);
    }

    #[test]
    fn test_reset_rearms_burst() {
        let mut app = crash_app(OutcomeState::Crashed);
        app.update();

        assert_eq!(lander_visibility(&mut app), Visibility::Hidden);

        app.world_mut().resource_mut::<Telemetry>().outcome = OutcomeState::Flying;
        app.update();
        assert!(!app.world().resource::<CrashEffect>().spawned);
        assert_eq!(lander_visibility(&mut app), Visibility::Inherited);
    }

    #[test]
    fn test_no_burst_after_landing() {
        let mut app = crash_app(OutcomeState::Landed);
        app.update();
        assert_eq!(debris_count(&mut app), 0);
        assert_eq!(lander_visibility(&mut app), Visibility::Inherited);
    }
}
