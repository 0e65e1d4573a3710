//! Client input: клавиатура, on-screen стрелки, кнопки локаций
//!
//! Клавиатура сэмплируется в FixedUpdate (LocomotionSet::Input) после
//! VirtualPad и OR-ится в InputSnapshot. UI только пишет в VirtualPad
//! и шлёт GoToLocation — эффект виден со следующего fixed tick.

use bevy::prelude::*;
use waymark_simulation::{
    sample_virtual_pad, DirectionalInput, GoToLocation, InputSnapshot, LocomotionSet,
    LogicalDirection, VirtualPad,
};

/// Кнопки локаций в UI (имя в таблице, подпись)
const LOCATION_BUTTONS: [(&str, &str); 3] = [
    ("hospital", "Hospital"),
    ("library", "Library"),
    ("convenience_store", "Convenience store"),
];

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_input_ui)
            .add_systems(
                FixedUpdate,
                sample_keyboard
                    .in_set(LocomotionSet::Input)
                    .after(sample_virtual_pad),
            )
            .add_systems(Update, (update_virtual_pad, handle_location_buttons));
    }
}

/// Стрелки + WASD
struct Keyboard<'a>(&'a ButtonInput<KeyCode>);

impl DirectionalInput for Keyboard<'_> {
    fn is_pressed(&self, direction: LogicalDirection) -> bool {
        let (arrow, letter) = match direction {
            LogicalDirection::Up => (KeyCode::ArrowUp, KeyCode::KeyW),
            LogicalDirection::Down => (KeyCode::ArrowDown, KeyCode::KeyS),
            LogicalDirection::Left => (KeyCode::ArrowLeft, KeyCode::KeyA),
            LogicalDirection::Right => (KeyCode::ArrowRight, KeyCode::KeyD),
        };
        self.0.pressed(arrow) || self.0.pressed(letter)
    }
}

fn sample_keyboard(keys: Res<ButtonInput<KeyCode>>, mut snapshot: ResMut<InputSnapshot>) {
    let keyboard = InputSnapshot::sample(&Keyboard(&keys));
    *snapshot = snapshot.merge(keyboard);
}

/// On-screen стрелка
#[derive(Component)]
struct ArrowButton(LogicalDirection);

/// Кнопка "go to <location>"
#[derive(Component)]
struct LocationButton(&'static str);

const BUTTON_IDLE: Color = Color::srgb(0.2, 0.2, 0.25);
const BUTTON_HOVERED: Color = Color::srgb(0.3, 0.3, 0.38);
const BUTTON_PRESSED: Color = Color::srgb(0.35, 0.55, 0.35);

fn spawn_input_ui(mut commands: Commands) {
    // Стрелки: правый нижний угол
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            bottom: Val::Px(16.0),
            display: Display::Grid,
            grid_template_columns: RepeatedGridTrack::px(3, 56.0),
            grid_template_rows: RepeatedGridTrack::px(2, 56.0),
            column_gap: Val::Px(4.0),
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|pad| {
            let layout = [
                (LogicalDirection::Up, "↑", 2, 1),
                (LogicalDirection::Left, "←", 1, 2),
                (LogicalDirection::Down, "↓", 2, 2),
                (LogicalDirection::Right, "→", 3, 2),
            ];
            for (direction, label, column, row) in layout {
                pad.spawn((
                    Button,
                    ArrowButton(direction),
                    Node {
                        grid_column: GridPlacement::start(column),
                        grid_row: GridPlacement::start(row),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(BUTTON_IDLE),
                ))
                .with_child((Text::new(label), TextFont::from_font_size(28.0)));
            }
        });

    // Локации: левый нижний угол
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|list| {
            for (name, label) in LOCATION_BUTTONS {
                list.spawn((
                    Button,
                    LocationButton(name),
                    Node {
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                        ..default()
                    },
                    BackgroundColor(BUTTON_IDLE),
                ))
                .with_child((Text::new(label), TextFont::from_font_size(18.0)));
            }
        });
}

/// Зажатые стрелки → VirtualPad (held пока Interaction::Pressed)
fn update_virtual_pad(
    mut pad: ResMut<VirtualPad>,
    mut buttons: Query<(&Interaction, &ArrowButton, &mut BackgroundColor)>,
) {
    for (interaction, arrow, mut background) in buttons.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                pad.press(arrow.0);
                *background = BUTTON_PRESSED.into();
            }
            Interaction::Hovered => {
                pad.release(arrow.0);
                *background = BUTTON_HOVERED.into();
            }
            Interaction::None => {
                pad.release(arrow.0);
                *background = BUTTON_IDLE.into();
            }
        }
    }
}

fn handle_location_buttons(
    mut buttons: Query<
        (&Interaction, &LocationButton, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut requests: EventWriter<GoToLocation>,
) {
    for (interaction, location, mut background) in buttons.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                requests.write(GoToLocation::new(location.0));
                *background = BUTTON_PRESSED.into();
            }
            Interaction::Hovered => *background = BUTTON_HOVERED.into(),
            Interaction::None => *background = BUTTON_IDLE.into(),
        }
    }
}
