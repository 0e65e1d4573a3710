//! CommandDispatcher — имя локации → маршрут для LocomotionController
//!
//! Flow:
//! 1. lookup в WaypointTable (нет имени / пустой список → CommandError)
//! 2. схлопываем подряд идущие дубликаты точек
//! 3. одна точка → teleport (камера переносится с сохранением offset)
//! 4. ≥2 точек → offset камеры фиксируется, controller.go_to строит путь

use bevy::prelude::*;
use thiserror::Error;

use super::events::GoToLocation;
use crate::camera::CameraRig;
use crate::locomotion::{GoToOutcome, LocomotionConfig, LocomotionController, LocomotionEvent};
use crate::logger;
use crate::path::{points_coincide, PathError};
use crate::player::Player;
use crate::waypoints::WaypointTable;

/// Ошибки команды go_to (состояние при ошибке не меняется)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown location '{0}'")]
    UnknownLocation(String),
    #[error("location '{0}' has no waypoints")]
    EmptyLocation(String),
    #[error("cannot build path to '{name}': {source}")]
    InvalidPath {
        name: String,
        #[source]
        source: PathError,
    },
}

/// Переводит go_to(name) в маршрут для LocomotionController
pub struct CommandDispatcher<'a> {
    table: &'a WaypointTable,
}

impl<'a> CommandDispatcher<'a> {
    pub fn new(table: &'a WaypointTable) -> Self {
        Self { table }
    }

    /// Выполняет команду немедленно (вызывать между tick)
    pub fn go_to(
        &self,
        name: &str,
        controller: &mut LocomotionController,
        mut rig: Option<&mut CameraRig>,
        config: &LocomotionConfig,
    ) -> Result<GoToOutcome, CommandError> {
        let waypoints = self
            .table
            .lookup(name)
            .ok_or_else(|| CommandError::UnknownLocation(name.to_string()))?;

        if waypoints.is_empty() {
            return Err(CommandError::EmptyLocation(name.to_string()));
        }

        let waypoints = collapse_duplicates(waypoints);
        let camera_offset = rig.as_deref().map(CameraRig::offset);

        let outcome = controller
            .go_to(&waypoints, camera_offset, config)
            .map_err(|source| CommandError::InvalidPath {
                name: name.to_string(),
                source,
            })?;

        if let (GoToOutcome::Teleported { position }, Some(rig)) = (&outcome, rig.as_deref_mut()) {
            rig.snap_to(*position);
        }

        Ok(outcome)
    }
}

/// Убирает подряд идущие совпадающие точки (ε per axis)
///
/// Маршрут, схлопнувшийся до одной точки, обрабатывается как teleport.
pub fn collapse_duplicates(points: &[Vec3]) -> Vec<Vec3> {
    let mut collapsed = points.to_vec();
    collapsed.dedup_by(|current, previous| points_coincide(*current, *previous));
    collapsed
}

/// Система: обработка GoToLocation
///
/// Работает в начале fixed tick, до tick_locomotion — эффект команды виден
/// со следующего tick после её отправки.
pub fn process_go_to_commands(
    mut requests: EventReader<GoToLocation>,
    table: Res<WaypointTable>,
    config: Res<LocomotionConfig>,
    mut players: Query<&mut LocomotionController, With<Player>>,
    mut rigs: Query<&mut CameraRig>,
    mut locomotion_events: EventWriter<LocomotionEvent>,
) {
    let dispatcher = CommandDispatcher::new(&table);

    for request in requests.read() {
        let Ok(mut controller) = players.single_mut() else {
            logger::log_warning(&format!(
                "go_to('{}') ignored: no single player entity",
                request.name
            ));
            continue;
        };
        let mut rig = rigs.single_mut().ok();

        match dispatcher.go_to(&request.name, &mut controller, rig.as_deref_mut(), &config) {
            Ok(outcome) => {
                logger::log_info(&format!("go_to('{}'): {:?}", request.name, outcome));
                locomotion_events.write(outcome.as_event());
            }
            Err(err) => {
                logger::log_warning(&format!("go_to rejected: {}", err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locomotion::LocomotionModeKind;

    fn table() -> WaypointTable {
        let mut table = WaypointTable::sample();
        table.insert("nowhere", Vec::new());
        table.insert(
            "stutter",
            vec![Vec3::new(3.0, 0.5, 3.0), Vec3::new(3.0, 0.5, 3.0)],
        );
        table
    }

    #[test]
    fn test_unknown_location_is_noop() {
        let table = table();
        let config = LocomotionConfig::default();
        let mut controller = LocomotionController::new(Vec3::new(1.0, 0.5, 1.0), 1.0);
        let before = controller.clone();

        let err = CommandDispatcher::new(&table)
            .go_to("airport", &mut controller, None, &config)
            .unwrap_err();

        assert_eq!(err, CommandError::UnknownLocation("airport".to_string()));
        assert_eq!(controller, before);
    }

    #[test]
    fn test_empty_location_is_noop() {
        let table = table();
        let config = LocomotionConfig::default();
        let mut controller = LocomotionController::default();
        let before = controller.clone();

        let err = CommandDispatcher::new(&table)
            .go_to("nowhere", &mut controller, None, &config)
            .unwrap_err();

        assert_eq!(err, CommandError::EmptyLocation("nowhere".to_string()));
        assert_eq!(controller, before);
    }

    #[test]
    fn test_single_point_teleports_with_camera() {
        let table = table();
        let config = LocomotionConfig::default();
        let mut controller = LocomotionController::new(Vec3::new(0.0, 0.5, 0.0), 0.7);
        let mut rig = CameraRig::new(Vec3::new(10.0, 10.0, 15.0), Vec3::new(0.0, 0.5, 0.0));
        let offset = rig.offset();

        let outcome = CommandDispatcher::new(&table)
            .go_to("library", &mut controller, Some(&mut rig), &config)
            .unwrap();

        let target = Vec3::new(2.0, 0.5, 2.0);
        assert_eq!(outcome, GoToOutcome::Teleported { position: target });
        assert_eq!(controller.position(), target);
        assert_eq!(controller.yaw(), 0.7);
        assert_eq!(controller.mode_kind(), LocomotionModeKind::FreeRoam);
        assert_eq!(rig.look_target(), target);
        assert!((rig.offset() - offset).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_path_becomes_teleport() {
        let table = table();
        let config = LocomotionConfig::default();
        let mut controller = LocomotionController::default();

        let outcome = CommandDispatcher::new(&table)
            .go_to("stutter", &mut controller, None, &config)
            .unwrap();

        assert!(matches!(outcome, GoToOutcome::Teleported { .. }));
        assert_eq!(controller.mode_kind(), LocomotionModeKind::FreeRoam);
        assert_eq!(controller.position(), Vec3::new(3.0, 0.5, 3.0));
    }

    #[test]
    fn test_travel_captures_camera_offset() {
        let table = table();
        let config = LocomotionConfig::default();
        let mut controller = LocomotionController::new(Vec3::new(5.0, 0.5, 0.0), 0.0);
        let mut rig = CameraRig::new(Vec3::new(10.0, 10.0, 15.0), Vec3::new(5.0, 0.5, 0.0));

        CommandDispatcher::new(&table)
            .go_to("hospital", &mut controller, Some(&mut rig), &config)
            .unwrap();

        let pending = controller.pending_travel().expect("travel queued");
        assert_eq!(pending.camera_offset, Some(Vec3::new(5.0, 9.5, 15.0)));
        // Rig не трогаем до tick
        assert_eq!(rig.position(), Vec3::new(10.0, 10.0, 15.0));
    }

    #[test]
    fn test_travel_without_camera_has_no_offset() {
        let table = table();
        let config = LocomotionConfig::default();
        let mut controller = LocomotionController::default();

        CommandDispatcher::new(&table)
            .go_to("convenience_store", &mut controller, None, &config)
            .unwrap();

        assert_eq!(controller.pending_travel().unwrap().camera_offset, None);
    }

    #[test]
    fn test_collapse_duplicates_keeps_order() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 0.0, 0.0);
        assert_eq!(collapse_duplicates(&[a, a, b, b, a]), vec![a, b, a]);
    }
}
