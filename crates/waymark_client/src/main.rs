use bevy::prelude::*;
use waymark_simulation::{
    init_logger, log_info, log_warning, spawn_camera_rig, spawn_player, SimulationPlugin,
    WaypointTable,
};

mod camera;
mod input;
mod rendering;

use camera::CameraPlugin;
use input::InputPlugin;
use rendering::RenderingSyncPlugin;

const WAYPOINT_TABLE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/sample_path.json");

fn main() {
    init_logger();

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Waymark".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Таблица локаций до SimulationPlugin (он не перетирает resource)
        .insert_resource(load_waypoint_table())
        // Simulation (headless ECS logic)
        .add_plugins(SimulationPlugin)
        // Keyboard + on-screen pad + location buttons
        .add_plugins(InputPlugin)
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        // Orbit camera поверх CameraRig
        .add_plugins(CameraPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}

/// Таблица из assets, при ошибке — встроенная
fn load_waypoint_table() -> WaypointTable {
    match WaypointTable::load(WAYPOINT_TABLE_PATH) {
        Ok(table) => {
            log_info(&format!(
                "Loaded {} locations from {}",
                table.len(),
                WAYPOINT_TABLE_PATH
            ));
            table
        }
        Err(err) => {
            log_warning(&format!("{}; using built-in waypoint table", err));
            WaypointTable::sample()
        }
    }
}

/// Spawn ground plane, lights, player box and camera
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane (20x20m)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(10.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Управляемая entity (visual добавит RenderingSyncPlugin)
    let player = spawn_player(&mut commands, Vec3::new(0.0, 0.5, 0.0));
    commands.entity(player).insert(rendering::NeedsVisual);

    // Camera: rig из simulation + Camera3d + orbit контроллер
    let rig = spawn_camera_rig(
        &mut commands,
        Vec3::new(10.0, 10.0, 15.0),
        Vec3::new(0.0, 0.5, 0.0),
    );
    commands
        .entity(rig)
        .insert((Camera3d::default(), camera::OrbitCamera::default()));
}
