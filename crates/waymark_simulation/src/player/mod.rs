//! Player control marker + spawn helpers

use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::locomotion::LocomotionController;

/// Marker component для player-controlled entity
///
/// Systems locomotion/camera работают только с entity с этим маркером.
/// В single-player режиме он ровно один.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Spawn helper: управляемая entity в `position`, yaw = 0 (смотрит в −Z)
///
/// Создает entity с:
/// - Player marker
/// - LocomotionController
/// - Transform (пишется tick_locomotion каждый tick)
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Player,
            LocomotionController::new(position, 0.0),
            Transform::from_translation(position),
        ))
        .id()
}

/// Spawn helper: CameraRig, смотрящий на `look_target`
///
/// Client добавляет к этой entity Camera3d + orbit контроллер.
pub fn spawn_camera_rig(commands: &mut Commands, position: Vec3, look_target: Vec3) -> Entity {
    commands
        .spawn((
            CameraRig::new(position, look_target),
            Transform::from_translation(position).looking_at(look_target, Vec3::Y),
        ))
        .id()
}
