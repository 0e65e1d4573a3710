//! Locomotion domain — state machine управляемой entity
//!
//! Содержит:
//! - LocomotionController (Position, Yaw, LocomotionMode)
//! - LocomotionConfig (скорости, длительность поворота)
//! - LocomotionEvent / FrameOutput (events для UI, логов и render sink)
//! - yaw helpers (canonicalize, shortest arc, heading из направления)
//! - systems: tick_locomotion, publish_frame, log_locomotion_events

pub mod config;
pub mod controller;
pub mod events;
pub mod systems;
pub mod yaw;


// Re-export all components and events
pub use config::*;
pub use controller::*;
pub use events::*;
pub use systems::*;
