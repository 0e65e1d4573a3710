//! Yaw helpers: canonicalization, shortest arc, heading из направления
//!
//! Конвенция: yaw = 0 смотрит в −Z (forward mesh axis), рост yaw — поворот
//! влево (против часовой, если смотреть сверху).

use bevy::prelude::Vec3;
use std::f32::consts::{PI, TAU};

/// Приводит угол к [0, 2π)
///
/// `rem_euclid` для крошечных отрицательных значений может вернуть ровно TAU
/// (округление `r + TAU`), поэтому верхнюю границу дожимаем вручную.
pub fn canonicalize_yaw(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Кратчайшая знаковая дуга от `from` к `to`, в (−π, π]
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

/// Heading для направления движения: `atan2(-x, -z)`
///
/// `None` для нулевого (или почти нулевого) направления — atan2(0, 0) не несёт
/// смысла, caller сохраняет предыдущий yaw.
pub fn yaw_from_direction(direction: Vec3) -> Option<f32> {
    if direction.x.abs() < f32::EPSILON && direction.z.abs() < f32::EPSILON {
        return None;
    }
    Some((-direction.x).atan2(-direction.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_wraps_into_range() {
        assert_eq!(canonicalize_yaw(0.0), 0.0);
        assert!((canonicalize_yaw(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!((canonicalize_yaw(5.0 * PI) - PI).abs() < 1e-4);
        assert_eq!(canonicalize_yaw(TAU), 0.0);

        let tiny = canonicalize_yaw(-1e-9);
        assert!((0.0..TAU).contains(&tiny), "tiny negative wrapped to {}", tiny);
    }

    #[test]
    fn test_canonicalize_non_finite_falls_back_to_zero() {
        assert_eq!(canonicalize_yaw(f32::NAN), 0.0);
        assert_eq!(canonicalize_yaw(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_shortest_arc_range() {
        // 350° → 10°: +20°, не −340°
        let delta = shortest_arc(350f32.to_radians(), 10f32.to_radians());
        assert!((delta - 20f32.to_radians()).abs() < 1e-5);

        // 10° → 350°: −20°
        let delta = shortest_arc(10f32.to_radians(), 350f32.to_radians());
        assert!((delta + 20f32.to_radians()).abs() < 1e-5);

        // Ровно π — положительная граница интервала
        let delta = shortest_arc(0.0, PI);
        assert!(delta > 0.0 && (delta - PI).abs() < 1e-5);
    }

    #[test]
    fn test_yaw_from_direction_convention() {
        // −Z → yaw 0
        assert!(yaw_from_direction(Vec3::NEG_Z).unwrap().abs() < 1e-6);
        // −X → yaw π/2 (поворот влево)
        assert!((yaw_from_direction(Vec3::NEG_X).unwrap() - PI / 2.0).abs() < 1e-6);
        // Вертикальное направление не задаёт heading
        assert!(yaw_from_direction(Vec3::Y).is_none());
    }
}
