//! Command events

use bevy::prelude::*;

/// Event: запрос переместиться в именованную локацию
///
/// Генерируется:
/// - client UI (кнопки локаций)
/// - headless сценарии / тесты
///
/// Обрабатывается:
/// - process_go_to_commands — в начале следующего fixed tick
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct GoToLocation {
    pub name: String,
}

impl GoToLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
