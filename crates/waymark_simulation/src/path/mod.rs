//! Path domain — кривые для PathFollow
//!
//! Содержит:
//! - SplinePath (centripetal Catmull-Rom through-spline)
//! - PathParameterization (segment / arc length)
//! - PathSample, PathError

pub mod spline;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod spline_tests;

pub use spline::*;
