//! Camera domain — CameraRig вокруг управляемой entity
//!
//! Содержит:
//! - CameraRig (pose камеры + правила follow по режиму locomotion)
//! - CameraRigConfig
//! - follow_player_with_camera (system)

pub mod rig;

pub use rig::*;
