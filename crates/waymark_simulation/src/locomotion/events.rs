//! Locomotion events

use bevy::prelude::*;

/// Event: переходы state machine и результаты команд
///
/// Генерируется:
/// - process_go_to_commands (Teleported, TravelQueued)
/// - tick_locomotion (TurnFinished, TravelFinished)
///
/// Обрабатывается:
/// - log_locomotion_events (Info лог)
/// - client UI (при необходимости)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum LocomotionEvent {
    /// Одна точка в маршруте — мгновенный перенос, yaw не меняется
    Teleported { position: Vec3 },
    /// Маршрут построен, entity поворачивается к первому сегменту
    TravelQueued { start: Vec3, target_yaw: f32 },
    /// Поворот закончен; `travel_started` — сразу начался PathFollow
    TurnFinished { yaw: f32, travel_started: bool },
    /// Путь пройден до конца, возврат во FreeRoam
    TravelFinished { position: Vec3, yaw: f32 },
}

/// Поза камеры для render sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_target: Vec3,
}

/// Event: render sink, публикуется раз в tick
///
/// Fire-and-forget: simulation не ждёт ответа. `camera` — None если
/// CameraRig не заспавнен (headless без камеры).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub position: Vec3,
    pub yaw: f32,
    pub camera: Option<CameraPose>,
}
