use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_resource::PrimitiveTopology;
use rand::Rng;

use crate::constants::{LANDER_VERTICES, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::simulation::{OutcomeState, Simulation, Telemetry};

const FLAME_LINES: usize = 25;

// Components
#[derive(Component)]
pub struct MainCamera;

#[derive(Component)]
pub struct Lander;

#[derive(Component)]
pub struct LandingPad;

fn srgb_to_vertex(r: u8, g: u8, b: u8) -> [f32; 4] {
    let c = Color::srgb_u8(r, g, b).to_linear();
    [c.red, c.green, c.blue, c.alpha]
}

fn create_triangle_mesh() -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );

    let vertices: Vec<[f32; 3]> = LANDER_VERTICES
        .iter()
        .map(|[x, y]| [*x, *y, 0.0])
        .collect();
    let normals: [[f32; 3]; 3] = [[0.0, 0.0, 1.0]; 3];
    let uvs: [[f32; 2]; 3] = [[0.0, 1.0], [0.5, 0.0], [1.0, 1.0]];

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals.to_vec());
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs.to_vec());
    mesh.insert_indices(Indices::U32(vec![0, 1, 2]));
    mesh
}

// Dusk gradient, orange at the ground fading to purple overhead
fn create_sky_mesh() -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );

    let ground = srgb_to_vertex(250, 160, 80);
    let sky = srgb_to_vertex(100, 80, 200);
    let vertices = vec![
        [0.0, 0.0, 0.0],
        [0.0, WINDOW_HEIGHT, 0.0],
        [WINDOW_WIDTH, WINDOW_HEIGHT, 0.0],
        [WINDOW_WIDTH, 0.0, 0.0],
    ];

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0_f32, 0.0, 1.0]; 4]);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, vec![ground, sky, sky, ground]);
    mesh.insert_indices(Indices::U32(vec![0, 1, 2, 0, 2, 3]));
    mesh
}

pub fn spawn_visualization(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    simulation: Res<Simulation>,
) {
    // World origin at the bottom-left corner of the window
    commands.spawn((
        Camera2d,
        Transform::from_xyz(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0, 0.0),
        MainCamera,
    ));

    commands.spawn((
        Mesh2d(meshes.add(create_sky_mesh())),
        MeshMaterial2d(materials.add(ColorMaterial::default())),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));

    let zone = simulation.zone();
    commands.spawn((
        Sprite {
            color: Color::srgb_u8(250, 250, 20),
            custom_size: Some(Vec2::new(zone.half_width * 2.0, zone.half_height * 2.0)),
            ..default()
        },
        Transform::from_xyz(zone.center_x, zone.base_y, 0.0),
        LandingPad,
    ));

    let state = simulation.state();
    commands.spawn((
        Mesh2d(meshes.add(create_triangle_mesh())),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::WHITE))),
        Transform::from_xyz(state.position.x, state.position.y, 1.0),
        Visibility::Inherited,
        Lander,
    ));
}

pub fn outcome_color(outcome: OutcomeState) -> Color {
    match outcome {
        OutcomeState::Flying => Color::srgb_u8(250, 250, 250),
        OutcomeState::Landed => Color::srgb(0.0, 1.0, 0.0),
        OutcomeState::Crashed => Color::srgb_u8(250, 0, 0),
    }
}

pub fn update_visualization(
    mut lander_query: Query<(&mut Transform, &MeshMaterial2d<ColorMaterial>), With<Lander>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    telemetry: Res<Telemetry>,
) {
    if let Ok((mut transform, material)) = lander_query.get_single_mut() {
        transform.translation.x = telemetry.position.x;
        transform.translation.y = telemetry.position.y;
        transform.rotation = Quat::from_rotation_z(telemetry.angle.to_radians());

        if let Some(material) = materials.get_mut(&material.0) {
            material.color = outcome_color(telemetry.outcome);
        }
    }
}

/// The flame burns while there is thrust, and goes out with the hull on a crash.
pub fn flame_visible(telemetry: &Telemetry) -> bool {
    telemetry.thrust > 0.0 && telemetry.outcome != OutcomeState::Crashed
}

// Flickering exhaust under the nozzle, scaled by the current thrust
pub fn draw_thrust_flame(mut gizmos: Gizmos, telemetry: Res<Telemetry>) {
    if !flame_visible(&telemetry) {
        return;
    }

    let mut rng = rand::thread_rng();
    let rotation = Vec2::from_angle(telemetry.angle.to_radians());
    let to_world = |local: Vec2| telemetry.position + rotation.rotate(local);

    for _ in 0..FLAME_LINES {
        let nozzle = Vec2::new(rng.gen_range(-5.0_f32..5.0), 0.0);
        let tip = Vec2::new(
            rng.gen_range(-7.0_f32..7.0),
            -telemetry.thrust * rng.gen_range(4000.0_f32..6000.0),
        );
        gizmos.line_gradient_2d(
            to_world(nozzle),
            to_world(tip),
            Color::srgb_u8(0, 0, 255),
            Color::srgb_u8(250, 250, 0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_colors_differ() {
        let flying = outcome_color(OutcomeState::Flying);
        let landed = outcome_color(OutcomeState::Landed);
        let crashed = outcome_color(OutcomeState::Crashed);

        assert_ne!(flying, landed);
        assert_ne!(flying, crashed);
        assert_ne!(landed, crashed);
    }

    #[test]
    fn test_flame_follows_thrust_until_crash() {
        let mut telemetry = Telemetry {
            position: Vec2::new(200.0, 300.0),
            velocity: Vec2::ZERO,
            angle: 0.0,
            thrust: 0.01,
            outcome: OutcomeState::Flying,
        };
        assert!(flame_visible(&telemetry));

        // Decayed thrust keeps the flame lit while frozen on the pad
        telemetry.outcome = OutcomeState::Landed;
        assert!(flame_visible(&telemetry));

        telemetry.outcome = OutcomeState::Crashed;
        assert!(!flame_visible(&telemetry));

        telemetry.outcome = OutcomeState::Flying;
        telemetry.thrust = 0.0;
        assert!(!flame_visible(&telemetry));
    }

    #[test]
    fn test_lander_mesh_has_base_at_origin() {
        let mesh = create_triangle_mesh();
        assert_eq!(mesh.count_vertices(), 3);
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .unwrap();
        assert!(positions.iter().all(|[_, y, _]| *y >= 0.0));
        assert_eq!(positions[1], [0.0, 30.0, 0.0]);
    }
}
