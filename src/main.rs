use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::EguiPlugin;
use clap::Parser;

mod config;
mod constants;
mod input;
mod particles;
mod simulation;
mod ui;
mod visualization;

use config::{report_config, LanderConfig};
use constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use input::read_keyboard;
use particles::{particle_system, CrashEffect};
use simulation::SimulationPlugin;
use ui::{hud_system, print_controls, DebugOverlay};
use visualization::{draw_thrust_flame, spawn_visualization, update_visualization};

#[derive(Debug, Parser)]
#[clap(author, version, about = "Land the booster back on the pad", long_about = None)]
struct Cli {
    /// Lander tuning file (RON)
    #[clap(short, long, default_value = "assets/lander.ron")]
    config: PathBuf,
    /// Show live telemetry in the HUD
    #[clap(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    let (config, source) = LanderConfig::load_or_default(&cli.config);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Aerospace Lander Challenge".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(Color::srgb(0.1, 0.1, 0.1)))
        .insert_resource(config)
        .insert_resource(source)
        .insert_resource(DebugOverlay(cli.debug))
        .init_resource::<CrashEffect>()
        .add_plugins(SimulationPlugin)
        .add_systems(
            Startup,
            (report_config, print_controls, spawn_visualization),
        )
        .add_systems(
            Update,
            (
                read_keyboard,
                update_visualization,
                draw_thrust_flame,
                particle_system,
                hud_system,
            ),
        )
        .run();
}
