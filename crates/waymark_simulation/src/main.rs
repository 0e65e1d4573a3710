//! Headless simulation Waymark
//!
//! Прогоняет сценарий по встроенной waypoint table без рендера:
//! hospital → library (teleport) → convenience_store → неизвестная локация.

use bevy::prelude::*;
use waymark_simulation::{
    create_headless_app, log_info, run_fixed_tick, spawn_camera_rig, spawn_player, GoToLocation,
    LocomotionController, Player, SimulationPlugin, WaypointTable,
};

/// (tick, локация) — когда отправить команду
const SCRIPT: [(usize, &str); 4] = [
    (10, "hospital"),
    (300, "library"),
    (360, "convenience_store"),
    (700, "airport"),
];

const TICK_COUNT: usize = 900;

fn main() {
    let mut app = create_headless_app();
    app.insert_resource(WaypointTable::sample())
        .add_plugins(SimulationPlugin);

    spawn_player(&mut app.world_mut().commands(), Vec3::new(0.0, 0.5, 0.0));
    spawn_camera_rig(
        &mut app.world_mut().commands(),
        Vec3::new(10.0, 10.0, 15.0),
        Vec3::new(0.0, 0.5, 0.0),
    );
    app.world_mut().flush();

    log_info("Starting Waymark headless simulation");

    for tick in 0..TICK_COUNT {
        if let Some((_, location)) = SCRIPT.iter().find(|(at, _)| *at == tick) {
            app.world_mut().send_event(GoToLocation::new(*location));
        }

        run_fixed_tick(&mut app);

        if tick % 60 == 0 {
            let world = app.world_mut();
            let mut query = world.query_filtered::<&LocomotionController, With<Player>>();
            if let Ok(controller) = query.single(world) {
                log_info(&format!(
                    "Tick {}: {} at ({:.2}, {:.2}), θ {:.1}°",
                    tick,
                    controller.mode_kind().as_str(),
                    controller.position().x,
                    controller.position().z,
                    controller.yaw().to_degrees()
                ));
            }
        }
    }

    log_info("Simulation complete!");
}
