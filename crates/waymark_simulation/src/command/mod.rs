//! Command domain — "go to named location"
//!
//! Содержит:
//! - GoToLocation (event от UI)
//! - CommandDispatcher (waypoint table → LocomotionController::go_to)
//! - CommandError
//! - process_go_to_commands (system)

pub mod dispatcher;
pub mod events;

pub use dispatcher::*;
pub use events::*;
