//! Locomotion systems (FixedUpdate)

use bevy::prelude::*;

use super::config::LocomotionConfig;
use super::controller::{LocomotionController, LocomotionModeKind};
use super::events::{FrameOutput, LocomotionEvent};
use crate::camera::CameraRig;
use crate::input::InputSnapshot;
use crate::logger;
use crate::player::Player;

/// Система: один tick state machine для player entity
///
/// Пишет Transform (translation + поворот вокруг Y) — его читает render.
pub fn tick_locomotion(
    time: Res<Time<Fixed>>,
    input: Res<InputSnapshot>,
    config: Res<LocomotionConfig>,
    mut players: Query<(&mut LocomotionController, &mut Transform), With<Player>>,
    mut locomotion_events: EventWriter<LocomotionEvent>,
) {
    let delta = time.delta_secs();

    for (mut controller, mut transform) in players.iter_mut() {
        let report = controller.tick(delta, &input, &config);

        transform.translation = controller.position();
        transform.rotation = Quat::from_rotation_y(controller.yaw());

        if let Some(event) = report.event {
            locomotion_events.write(event);
        }
    }
}

/// Система: render sink — pose entity и камеры раз в tick
pub fn publish_frame(
    players: Query<&LocomotionController, With<Player>>,
    rigs: Query<&CameraRig>,
    mut frames: EventWriter<FrameOutput>,
) {
    let Ok(controller) = players.single() else {
        return;
    };

    frames.write(FrameOutput {
        position: controller.position(),
        yaw: controller.yaw(),
        camera: rigs.single().ok().map(CameraRig::pose),
    });
}

/// Система: переходы state machine → Info лог
pub fn log_locomotion_events(mut events: EventReader<LocomotionEvent>) {
    for event in events.read() {
        match event {
            LocomotionEvent::Teleported { position } => {
                logger::log_info(&format!("Teleported to {:?}", position));
            }
            LocomotionEvent::TravelQueued { start, target_yaw } => {
                logger::log_info(&format!(
                    "{} started at {:?}, target yaw {:.1}°",
                    LocomotionModeKind::TurnAnimation.as_str(),
                    start,
                    target_yaw.to_degrees()
                ));
            }
            LocomotionEvent::TurnFinished { yaw, travel_started } => {
                let next = if *travel_started {
                    LocomotionModeKind::PathFollow
                } else {
                    LocomotionModeKind::FreeRoam
                };
                logger::log_info(&format!(
                    "{} finished at {:.1}° → {}",
                    LocomotionModeKind::TurnAnimation.as_str(),
                    yaw.to_degrees(),
                    next.as_str()
                ));
            }
            LocomotionEvent::TravelFinished { position, yaw } => {
                logger::log_info(&format!(
                    "{} finished at {:?}, yaw {:.1}° → {}",
                    LocomotionModeKind::PathFollow.as_str(),
                    position,
                    yaw.to_degrees(),
                    LocomotionModeKind::FreeRoam.as_str()
                ));
            }
        }
    }
}
