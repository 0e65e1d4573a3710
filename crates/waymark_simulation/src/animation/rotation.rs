//! RotationAnimator — поворот yaw по кратчайшей дуге за фиксированное время
//!
//! Прогресс растёт на `dt / duration` и не превышает 1. Animator только
//! считает угол, применяет его caller (LocomotionController).

use bevy::prelude::*;

use crate::locomotion::yaw::shortest_arc;

/// Длительность поворота по умолчанию (секунды)
pub const DEFAULT_TURN_DURATION: f32 = 0.5;

/// Состояние поворота: start, delta по кратчайшей дуге, progress ∈ [0,1]
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RotationAnimator {
    start_angle: f32,
    target_angle: f32,
    /// Кратчайшая знаковая дуга start → target, (−π, π]
    delta: f32,
    progress: f32,
    duration: f32,
}

impl Default for RotationAnimator {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            target_angle: 0.0,
            delta: 0.0,
            progress: 1.0, // Ничего не анимируем до start()
            duration: DEFAULT_TURN_DURATION,
        }
    }
}

impl RotationAnimator {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            ..default()
        }
    }

    /// Сбрасывает progress и запоминает кратчайшую дугу `from → to`
    pub fn start(&mut self, from: f32, to: f32) {
        self.start_angle = from;
        self.target_angle = to;
        self.delta = shortest_arc(from, to);
        self.progress = 0.0;
    }

    /// Сдвигает progress на `dt / duration` и возвращает текущий угол
    ///
    /// Угол не канонизирован: `from + delta * progress` может выйти за [0, 2π).
    pub fn advance(&mut self, dt: f32) -> f32 {
        let step = if self.duration > 0.0 {
            dt.max(0.0) / self.duration
        } else {
            1.0
        };
        self.progress = (self.progress + step).min(1.0);
        self.current_angle()
    }

    pub fn current_angle(&self) -> f32 {
        self.start_angle + self.delta * self.progress
    }

    pub fn is_done(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}
