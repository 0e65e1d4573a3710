//! LocomotionController — state machine управляемой entity
//!
//! Режимы (ровно один активен, payload живёт внутри варианта):
//! FreeRoam → (go_to) → TurnAnimation → (поворот закончен) → PathFollow → FreeRoam
//!
//! Порядок в tick (исполняется ровно одна ветка):
//! 1. TurnAnimation — крутим yaw, позиция заморожена
//! 2. PathFollow — двигаемся по сплайну, yaw по tangent
//! 3. FreeRoam — input snapshot → yaw + смещение вдоль heading

use bevy::prelude::*;

use super::config::LocomotionConfig;
use super::events::LocomotionEvent;
use super::yaw::{canonicalize_yaw, yaw_from_direction};
use crate::animation::RotationAnimator;
use crate::input::InputSnapshot;
use crate::path::{PathError, SplinePath};

/// Маршрут, ожидающий окончания поворота
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct PendingTravel {
    pub path: SplinePath,
    /// camera position − look-target в момент команды (None — камеры нет)
    pub camera_offset: Option<Vec3>,
}

/// Режим движения (tagged variant вместо набора флагов)
#[derive(Debug, Clone, PartialEq, Default, Reflect)]
pub enum LocomotionMode {
    /// Прямое управление с input
    #[default]
    FreeRoam,

    /// Поворот на месте к началу маршрута
    TurnAnimation {
        animator: RotationAnimator,
        /// Позиция, замороженная на время поворота
        anchor: Vec3,
        /// Маршрут, который стартует после поворота (максимум один)
        pending: Option<PendingTravel>,
    },

    /// Движение по сплайну
    PathFollow {
        path: SplinePath,
        /// t ∈ [0,1], не убывает
        progress: f32,
        camera_offset: Option<Vec3>,
    },
}

/// Дискриминант режима (для логов, тестов, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum LocomotionModeKind {
    FreeRoam,
    TurnAnimation,
    PathFollow,
}

impl LocomotionModeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocomotionModeKind::FreeRoam => "FreeRoam",
            LocomotionModeKind::TurnAnimation => "TurnAnimation",
            LocomotionModeKind::PathFollow => "PathFollow",
        }
    }
}

/// Результат go_to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoToOutcome {
    /// Одна точка — мгновенный перенос
    Teleported { position: Vec3 },
    /// Поворот запущен, маршрут в PendingTravel
    TravelQueued { start: Vec3, target_yaw: f32 },
}

impl GoToOutcome {
    pub fn as_event(&self) -> LocomotionEvent {
        match *self {
            GoToOutcome::Teleported { position } => LocomotionEvent::Teleported { position },
            GoToOutcome::TravelQueued { start, target_yaw } => {
                LocomotionEvent::TravelQueued { start, target_yaw }
            }
        }
    }
}

/// Результат одного tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    /// Изменение Position за этот tick
    pub displacement: Vec3,
    /// Переход состояния, если случился
    pub event: Option<LocomotionEvent>,
}

/// State machine движения
///
/// Владеет Position и Yaw. Единственный писатель Position.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LocomotionController {
    position: Vec3,
    /// [0, 2π), yaw = 0 смотрит в −Z
    yaw: f32,
    mode: LocomotionMode,
    /// Смещение последнего tick (CameraRig двигает камеру во FreeRoam)
    last_displacement: Vec3,
    /// Offset chase-камеры пути, завершившегося в последнем tick
    finished_camera_offset: Option<Vec3>,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }
}

impl LocomotionController {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw: canonicalize_yaw(yaw),
            mode: LocomotionMode::FreeRoam,
            last_displacement: Vec3::ZERO,
            finished_camera_offset: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn mode(&self) -> &LocomotionMode {
        &self.mode
    }

    pub fn mode_kind(&self) -> LocomotionModeKind {
        match self.mode {
            LocomotionMode::FreeRoam => LocomotionModeKind::FreeRoam,
            LocomotionMode::TurnAnimation { .. } => LocomotionModeKind::TurnAnimation,
            LocomotionMode::PathFollow { .. } => LocomotionModeKind::PathFollow,
        }
    }

    pub fn last_displacement(&self) -> Vec3 {
        self.last_displacement
    }

    /// Offset камеры пути, который закончился в последнем tick
    ///
    /// Режим к этому моменту уже FreeRoam, но камера на завершающем tick
    /// ещё ставится в `position + offset`.
    pub fn finished_camera_offset(&self) -> Option<Vec3> {
        self.finished_camera_offset
    }

    /// Маршрут, ожидающий окончания поворота
    pub fn pending_travel(&self) -> Option<&PendingTravel> {
        match &self.mode {
            LocomotionMode::TurnAnimation { pending, .. } => pending.as_ref(),
            _ => None,
        }
    }

    /// Progress по текущему пути (только PathFollow)
    pub fn travel_progress(&self) -> Option<f32> {
        match self.mode {
            LocomotionMode::PathFollow { progress, .. } => Some(progress),
            _ => None,
        }
    }

    /// Зафиксированный offset камеры (только PathFollow)
    pub fn camera_offset(&self) -> Option<Vec3> {
        match self.mode {
            LocomotionMode::PathFollow { camera_offset, .. } => camera_offset,
            _ => None,
        }
    }

    /// Запуск движения по waypoints
    ///
    /// - 0 точек → ошибка, состояние не меняется
    /// - 1 точка → teleport (yaw не трогаем, режим FreeRoam)
    /// - ≥2 точки → SplinePath от текущей позиции, позиция сразу на старт
    ///   пути, поворот к первому сегменту, маршрут в PendingTravel
    ///
    /// Любой активный поворот/путь отбрасывается.
    pub fn go_to(
        &mut self,
        waypoints: &[Vec3],
        camera_offset: Option<Vec3>,
        config: &LocomotionConfig,
    ) -> Result<GoToOutcome, PathError> {
        match waypoints {
            [] => Err(PathError::TooFewPoints(0)),
            [point] => {
                if !point.is_finite() {
                    return Err(PathError::NonFinitePoint { index: 0, point: *point });
                }
                self.position = *point;
                self.mode = LocomotionMode::FreeRoam;
                Ok(GoToOutcome::Teleported { position: *point })
            }
            _ => {
                let path = SplinePath::from_current_position(self.position, waypoints)?;
                let points = path.control_points();
                let target_yaw = yaw_from_direction(points[1] - points[0])
                    .map(canonicalize_yaw)
                    .unwrap_or(self.yaw);

                let mut animator = RotationAnimator::new(config.turn_duration);
                animator.start(self.yaw, target_yaw);

                let start = path.start();
                self.position = start;
                self.mode = LocomotionMode::TurnAnimation {
                    animator,
                    anchor: start,
                    pending: Some(PendingTravel { path, camera_offset }),
                };

                Ok(GoToOutcome::TravelQueued { start, target_yaw })
            }
        }
    }

    /// Один шаг state machine
    pub fn tick(&mut self, dt: f32, input: &InputSnapshot, config: &LocomotionConfig) -> TickReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let before = self.position;
        let mut next_mode = None;
        let mut event = None;
        self.finished_camera_offset = None;

        match &mut self.mode {
            LocomotionMode::TurnAnimation { animator, anchor, pending } => {
                let angle = animator.advance(dt);
                self.position = *anchor;
                self.yaw = canonicalize_yaw(angle);

                if animator.is_done() {
                    let travel = pending.take();
                    event = Some(LocomotionEvent::TurnFinished {
                        yaw: self.yaw,
                        travel_started: travel.is_some(),
                    });
                    next_mode = Some(match travel {
                        Some(PendingTravel { path, camera_offset }) => LocomotionMode::PathFollow {
                            path,
                            progress: 0.0,
                            camera_offset,
                        },
                        None => LocomotionMode::FreeRoam,
                    });
                }
            }

            LocomotionMode::PathFollow {
                path,
                progress,
                camera_offset,
            } => {
                *progress = (*progress + config.travel_speed * dt).min(1.0);
                let sample = path.sample(*progress, config.parameterization);
                self.position = sample.position;

                // Нулевой tangent — оставляем предыдущий yaw
                if let Some(yaw) = sample.tangent.and_then(yaw_from_direction) {
                    self.yaw = canonicalize_yaw(yaw);
                }

                if *progress >= 1.0 {
                    event = Some(LocomotionEvent::TravelFinished {
                        position: self.position,
                        yaw: self.yaw,
                    });
                    self.finished_camera_offset = *camera_offset;
                    next_mode = Some(LocomotionMode::FreeRoam);
                }
            }

            LocomotionMode::FreeRoam => {
                // Противоположные направления просто суммируются
                let step = config.move_speed * dt;
                let mut forward = 0.0;
                if input.up {
                    forward -= step;
                }
                if input.down {
                    forward += step;
                }

                let turn = config.rotate_speed * dt;
                let mut yaw = self.yaw;
                if input.left {
                    yaw += turn;
                }
                if input.right {
                    yaw -= turn;
                }
                self.yaw = canonicalize_yaw(yaw);

                self.position += Vec3::new(self.yaw.sin() * forward, 0.0, self.yaw.cos() * forward);
            }
        }

        if let Some(mode) = next_mode {
            self.mode = mode;
        }

        self.last_displacement = self.position - before;

        TickReport {
            displacement: self.last_displacement,
            event,
        }
    }
}
