use bevy::prelude::*;
use waymark_simulation::{FrameOutput, LocomotionController, LocomotionMode, Player, WaypointTable};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_debug_readout).add_systems(
            Update,
            (
                spawn_visuals_for_new_entities,
                sync_transforms,
                update_debug_readout,
                draw_waypoints,
                draw_active_path,
            )
                .chain(),
        );
    }
}

/// Marker: simulation entity needs visual representation
#[derive(Component)]
pub struct NeedsVisual;

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Debug panel: x, z, θ°
#[derive(Component)]
struct DebugReadout;

/// Spawn visual representation (box mesh) for new simulation entities
fn spawn_visuals_for_new_entities(
    mut commands: Commands,
    query: Query<(Entity, &Transform), (With<NeedsVisual>, With<Player>)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, sim_transform) in query.iter() {
        let visual_entity = commands
            .spawn((
                Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.8, 0.3, 0.2),
                    ..default()
                })),
                *sim_transform,
                VisualOf(sim_entity),
            ))
            .with_children(|visual| {
                // "Нос" по −Z, чтобы был виден yaw
                visual.spawn((
                    Mesh3d(meshes.add(Cuboid::new(0.2, 0.2, 0.4))),
                    MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.9))),
                    Transform::from_xyz(0.0, 0.2, -0.6),
                ));
            })
            .id();

        // Link simulation ↔ visual
        commands
            .entity(sim_entity)
            .remove::<NeedsVisual>()
            .insert(HasVisual(visual_entity));
    }
}

/// Sync simulation transforms → visual transforms
fn sync_transforms(
    sim_query: Query<(&Transform, &HasVisual), Changed<Transform>>,
    mut visual_query: Query<&mut Transform, (With<VisualOf>, Without<HasVisual>)>,
) {
    for (sim_transform, has_visual) in sim_query.iter() {
        if let Ok(mut visual_transform) = visual_query.get_mut(has_visual.0) {
            *visual_transform = *sim_transform;
        }
    }
}

fn spawn_debug_readout(mut commands: Commands) {
    commands.spawn((
        DebugReadout,
        Text::new(format_readout(Vec3::ZERO, 0.0)),
        TextFont::from_font_size(16.0),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn format_readout(position: Vec3, yaw: f32) -> String {
    format!(
        "x: {:.2}  z: {:.2}  θ: {:.1}°",
        position.x,
        position.z,
        yaw.to_degrees().rem_euclid(360.0)
    )
}

/// Последний FrameOutput → текст панели
fn update_debug_readout(
    mut frames: EventReader<FrameOutput>,
    mut readouts: Query<&mut Text, With<DebugReadout>>,
) {
    let Some(frame) = frames.read().last() else {
        return;
    };

    for mut text in readouts.iter_mut() {
        text.0 = format_readout(frame.position, frame.yaw);
    }
}

/// Маркеры точек всех локаций
fn draw_waypoints(table: Res<WaypointTable>, mut gizmos: Gizmos) {
    for name in table.names() {
        let Some(points) = table.lookup(name) else {
            continue;
        };
        for point in points {
            gizmos.sphere(
                bevy::math::Isometry3d::from_translation(*point),
                0.15,
                Color::srgb(0.9, 0.8, 0.2),
            );
        }
    }
}

/// Активный маршрут (PendingTravel во время поворота или текущий путь)
fn draw_active_path(players: Query<&LocomotionController, With<Player>>, mut gizmos: Gizmos) {
    const SEGMENTS: usize = 64;

    for controller in players.iter() {
        let path = match controller.mode() {
            LocomotionMode::PathFollow { path, .. } => path,
            LocomotionMode::TurnAnimation { .. } => match controller.pending_travel() {
                Some(pending) => &pending.path,
                None => continue,
            },
            LocomotionMode::FreeRoam => continue,
        };

        let points = (0..=SEGMENTS).map(|i| path.position_at(i as f32 / SEGMENTS as f32));
        gizmos.linestrip(points, Color::srgb(0.2, 0.7, 0.9));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_wraps_theta() {
        let text = format_readout(Vec3::new(1.0, 0.5, -2.5), -std::f32::consts::FRAC_PI_2);
        assert_eq!(text, "x: 1.00  z: -2.50  θ: 270.0°");
    }
}
