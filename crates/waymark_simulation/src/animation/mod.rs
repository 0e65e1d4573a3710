//! Animation domain — time-based интерполяция ориентации

pub mod rotation;

pub use rotation::*;
