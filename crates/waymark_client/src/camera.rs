use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use waymark_simulation::{CameraRig, LocomotionController, LocomotionModeKind, Player};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                sync_orbit_from_rig,
                orbit_camera_controls,
                apply_orbit_to_rig,
                update_camera_transform,
            )
                .chain(),
        );
    }
}

/// Free-look вокруг look-target CameraRig
///
/// Параметры пересчитываются из offset rig каждый кадр, поэтому orbit
/// продолжает с того места, куда rig довёз камеру.
#[derive(Component)]
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub sensitivity: f32,
    pub zoom_speed: f32,
    /// Пользователь повернул/зазумил в этом кадре
    moved: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: 15.0,
            yaw: std::f32::consts::FRAC_PI_4,   // 45°
            pitch: std::f32::consts::FRAC_PI_6, // 30°
            sensitivity: 0.005,
            zoom_speed: 1.0,
            moved: false,
        }
    }
}

impl OrbitCamera {
    /// Offset камеры от focus по сферическим координатам
    pub fn offset(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        Vec3::new(x, y, z)
    }

    /// Обратное к `offset`
    pub fn set_from_offset(&mut self, offset: Vec3) {
        let distance = offset.length();
        if distance < f32::EPSILON {
            return;
        }
        self.distance = distance;
        self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        self.yaw = offset.x.atan2(offset.z);
    }
}

fn sync_orbit_from_rig(mut query: Query<(&mut OrbitCamera, &CameraRig)>) {
    for (mut orbit, rig) in query.iter_mut() {
        orbit.set_from_offset(rig.offset());
        orbit.moved = false;
    }
}

/// Handle mouse input for orbit camera
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let Ok(mut camera) = query.single_mut() else {
        return;
    };

    // Right mouse button: orbit
    if mouse_buttons.pressed(MouseButton::Right) {
        for motion in mouse_motion.read() {
            camera.yaw -= motion.delta.x * camera.sensitivity;
            camera.pitch -= motion.delta.y * camera.sensitivity;

            // Clamp pitch to avoid gimbal lock
            camera.pitch = camera.pitch.clamp(
                -std::f32::consts::FRAC_PI_2 + 0.1,
                std::f32::consts::FRAC_PI_2 - 0.1,
            );
            camera.moved = true;
        }
    } else {
        // Consume motion events even when not orbiting
        mouse_motion.clear();
    }

    // Mouse wheel: zoom
    for wheel in mouse_wheel.read() {
        camera.distance -= wheel.y * camera.zoom_speed;
        camera.distance = camera.distance.clamp(3.0, 50.0);
        camera.moved = true;
    }
}

/// Orbit → позиция rig (кроме PathFollow: там chase-камера с фиксированным offset)
fn apply_orbit_to_rig(
    players: Query<&LocomotionController, With<Player>>,
    mut query: Query<(&OrbitCamera, &mut CameraRig)>,
) {
    let following_path = players
        .single()
        .is_ok_and(|controller| controller.mode_kind() == LocomotionModeKind::PathFollow);
    if following_path {
        return;
    }

    for (orbit, mut rig) in query.iter_mut() {
        if orbit.moved {
            let position = rig.look_target() + orbit.offset();
            rig.set_position(position);
        }
    }
}

/// Update camera transform from the rig pose
fn update_camera_transform(mut query: Query<(&CameraRig, &mut Transform), Changed<CameraRig>>) {
    for (rig, mut transform) in query.iter_mut() {
        *transform = Transform::from_translation(rig.position()).looking_at(rig.look_target(), Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_round_trip_keeps_position() {
        let mut orbit = OrbitCamera::default();
        let offset = Vec3::new(5.0, 9.5, 15.0);

        orbit.set_from_offset(offset);
        assert!((orbit.offset() - offset).length() < 1e-4);
    }

    #[test]
    fn test_zero_offset_is_ignored() {
        let mut orbit = OrbitCamera::default();
        orbit.set_from_offset(Vec3::ZERO);
        assert_eq!(orbit.distance, 15.0);
    }
}
