//! Waymark Simulation Core
//!
//! Headless ECS-логика на Bevy 0.16: locomotion state machine одной
//! управляемой entity + camera rig, который за ней следует.
//!
//! Порядок внутри fixed tick (LocomotionSet, chained):
//! 1. Input — snapshot directional input (VirtualPad + источники client)
//! 2. Dispatch — GoToLocation → CommandDispatcher
//! 3. Motion — LocomotionController::tick, Transform
//! 4. Camera — CameraRig::follow
//! 5. Output — FrameOutput (render sink), логи переходов
//!
//! Рендер, сцена, клавиатура и кнопки живут в waymark_client.

use bevy::prelude::*;
use std::time::Duration;

// Публичные модули
pub mod animation;
pub mod camera;
pub mod command;
pub mod input;
pub mod locomotion;
pub mod logger;
pub mod path;
pub mod player;
pub mod waypoints;

// Re-export базовых типов для удобства
pub use animation::RotationAnimator;
pub use camera::{follow_player_with_camera, CameraRig, CameraRigConfig};
pub use command::{process_go_to_commands, CommandDispatcher, CommandError, GoToLocation};
pub use input::{sample_virtual_pad, DirectionalInput, InputSnapshot, LogicalDirection, VirtualPad};
pub use locomotion::{
    CameraPose, FrameOutput, GoToOutcome, LocomotionConfig, LocomotionController, LocomotionEvent,
    LocomotionMode, LocomotionModeKind, PendingTravel, TickReport,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use path::{PathError, PathParameterization, SplinePath};
pub use player::{spawn_camera_rig, spawn_player, Player};
pub use waypoints::{WaypointTable, WaypointTableError};

/// Частота fixed tick simulation
pub const FIXED_TICK_HZ: f64 = 60.0;

/// Этапы fixed tick (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    Input,
    Dispatch,
    Motion,
    Camera,
    Output,
}

/// Главный plugin simulation (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_HZ))
            // Resources: config, table, input. init_* не перетирает то, что
            // client вставил до plugin (например загруженную WaypointTable)
            .init_resource::<LocomotionConfig>()
            .init_resource::<WaypointTable>()
            .init_resource::<InputSnapshot>()
            .init_resource::<VirtualPad>()
            .add_event::<GoToLocation>()
            .add_event::<LocomotionEvent>()
            .add_event::<FrameOutput>()
            .configure_sets(
                FixedUpdate,
                (
                    LocomotionSet::Input,
                    LocomotionSet::Dispatch,
                    LocomotionSet::Motion,
                    LocomotionSet::Camera,
                    LocomotionSet::Output,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    sample_virtual_pad.in_set(LocomotionSet::Input),
                    process_go_to_commands.in_set(LocomotionSet::Dispatch),
                    locomotion::tick_locomotion.in_set(LocomotionSet::Motion),
                    follow_player_with_camera.in_set(LocomotionSet::Camera),
                    (locomotion::publish_frame, locomotion::log_locomotion_events)
                        .chain()
                        .in_set(LocomotionSet::Output),
                ),
            );
    }
}

/// Создаёт minimal Bevy App для headless simulation
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_HZ));

    app
}

/// Прогоняет ровно один fixed tick (без привязки к wall clock)
///
/// Сдвигает `Time<Fixed>` на его timestep и запускает `FixedUpdate`.
/// Используется headless binary и тестами — результат детерминирован.
pub fn run_fixed_tick(app: &mut App) {
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    run_fixed_tick_with(app, timestep);
}

/// Как `run_fixed_tick`, но с произвольным dt
pub fn run_fixed_tick_with(app: &mut App, delta: Duration) {
    let world = app.world_mut();
    world.resource_mut::<Time<Fixed>>().advance_by(delta);
    world.run_schedule(FixedUpdate);
}

/// Snapshot компонентов для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Debug-представление достаточно для побайтового сравнения прогонов
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
