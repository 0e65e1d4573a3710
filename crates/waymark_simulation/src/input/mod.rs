//! Input domain — pollable directional input
//!
//! Архитектура:
//! - Источники (клавиатура в client, on-screen VirtualPad) реализуют
//!   `DirectionalInput`
//! - Раз в tick источники сэмплируются в `InputSnapshot` (OR всех источников)
//! - LocomotionController читает только snapshot — источник ему не важен

use bevy::prelude::*;

/// Логическое направление (не зависит от клавиш/кнопок)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum LogicalDirection {
    /// Вперёд (−Z в локальных координатах)
    Up,
    /// Назад (+Z)
    Down,
    /// Поворот влево (yaw растёт)
    Left,
    /// Поворот вправо (yaw убывает)
    Right,
}

impl LogicalDirection {
    pub const ALL: [LogicalDirection; 4] = [
        LogicalDirection::Up,
        LogicalDirection::Down,
        LogicalDirection::Left,
        LogicalDirection::Right,
    ];

    fn index(self) -> usize {
        match self {
            LogicalDirection::Up => 0,
            LogicalDirection::Down => 1,
            LogicalDirection::Left => 2,
            LogicalDirection::Right => 3,
        }
    }
}

/// Источник input: "зажато ли направление прямо сейчас"
pub trait DirectionalInput {
    fn is_pressed(&self, direction: LogicalDirection) -> bool;
}

/// Snapshot input на текущий tick (атомарный, без очереди событий)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputSnapshot {
    /// Опрашивает источник по всем четырём направлениям
    pub fn sample(source: &impl DirectionalInput) -> Self {
        Self {
            up: source.is_pressed(LogicalDirection::Up),
            down: source.is_pressed(LogicalDirection::Down),
            left: source.is_pressed(LogicalDirection::Left),
            right: source.is_pressed(LogicalDirection::Right),
        }
    }

    /// OR двух snapshot (клавиатура + on-screen кнопки)
    pub fn merge(self, other: InputSnapshot) -> Self {
        Self {
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }

    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

impl DirectionalInput for InputSnapshot {
    fn is_pressed(&self, direction: LogicalDirection) -> bool {
        match direction {
            LogicalDirection::Up => self.up,
            LogicalDirection::Down => self.down,
            LogicalDirection::Left => self.left,
            LogicalDirection::Right => self.right,
        }
    }
}

/// On-screen стрелки (mouse/touch press → held до release)
///
/// Client пишет press/release из UI handlers, simulation читает раз в tick.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct VirtualPad {
    held: [bool; 4],
}

impl VirtualPad {
    pub fn press(&mut self, direction: LogicalDirection) {
        self.held[direction.index()] = true;
    }

    pub fn release(&mut self, direction: LogicalDirection) {
        self.held[direction.index()] = false;
    }

    /// Сброс всех кнопок (pointer ушёл с pad, окно потеряло фокус)
    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }
}

impl DirectionalInput for VirtualPad {
    fn is_pressed(&self, direction: LogicalDirection) -> bool {
        self.held[direction.index()]
    }
}

/// Система: начало tick — snapshot из VirtualPad
///
/// Другие источники (клавиатура в client) добавляются после неё в том же
/// `LocomotionSet::Input` через `InputSnapshot::merge`.
pub fn sample_virtual_pad(pad: Res<VirtualPad>, mut snapshot: ResMut<InputSnapshot>) {
    *snapshot = InputSnapshot::sample(pad.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_default_is_idle() {
        assert!(InputSnapshot::default().is_idle());
    }

    #[test]
    fn test_virtual_pad_press_release() {
        let mut pad = VirtualPad::default();
        pad.press(LogicalDirection::Up);
        pad.press(LogicalDirection::Left);

        let snapshot = InputSnapshot::sample(&pad);
        assert!(snapshot.up && snapshot.left);
        assert!(!snapshot.down && !snapshot.right);

        pad.release(LogicalDirection::Up);
        assert!(!pad.is_pressed(LogicalDirection::Up));

        pad.release_all();
        assert!(InputSnapshot::sample(&pad).is_idle());
    }

    #[test]
    fn test_merge_is_logical_or() {
        let keyboard = InputSnapshot { up: true, ..default() };
        let pad = InputSnapshot { right: true, ..default() };

        let merged = keyboard.merge(pad);
        assert_eq!(
            merged,
            InputSnapshot {
                up: true,
                down: false,
                left: false,
                right: true
            }
        );
    }

    #[test]
    fn test_snapshot_is_directional_input() {
        let snapshot = InputSnapshot { down: true, ..default() };
        for direction in LogicalDirection::ALL {
            assert_eq!(snapshot.is_pressed(direction), direction == LogicalDirection::Down);
        }
    }
}
