//! SplinePath — centripetal Catmull-Rom через все control points
//!
//! Кривая проходит точно через каждую точку (through-spline), первая
//! производная непрерывна на стыках сегментов. На концах phantom-точки
//! отражаются от соседнего сегмента, поэтому кривая не "загибается" у краёв.
//!
//! Параметризация:
//! - `Segment` — t ∈ [0,1] делится поровну между сегментами (быстро, но
//!   скорость по кривой зависит от длины сегмента)
//! - `ArcLength` — t пересчитывается через таблицу длин дуги (равномерная
//!   скорость)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Количество семплов в таблице длины дуги
pub const ARC_LENGTH_SAMPLES: usize = 200;

/// Порог совпадения координат (per-axis) для waypoints
pub const POINT_EPSILON: f32 = 1e-6;

/// Knot distance ниже этого порога считается вырожденной
const MIN_KNOT_INTERVAL: f32 = 1e-4;

/// Производная короче этого считается нулевой (tangent не определён)
const MIN_TANGENT_LENGTH_SQUARED: f32 = 1e-12;

/// Как normalized progress отображается на параметр кривой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum PathParameterization {
    /// Равные доли t на каждый сегмент
    #[default]
    Segment,
    /// Равные доли t на равные отрезки длины дуги
    ArcLength,
}

/// Ошибки построения SplinePath
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("spline needs at least 2 control points, got {0}")]
    TooFewPoints(usize),
    #[error("control point {index} is not finite: {point}")]
    NonFinitePoint { index: usize, point: Vec3 },
}

/// Результат семплирования кривой
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub position: Vec3,
    /// Нормализованное направление, `None` если производная нулевая
    pub tangent: Option<Vec3>,
}

/// Через-сплайн по упорядоченным control points (≥ 2, immutable после build)
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct SplinePath {
    points: Vec<Vec3>,
    /// Кумулятивная длина дуги в t = i / ARC_LENGTH_SAMPLES
    arc_lengths: Vec<f32>,
}

impl SplinePath {
    /// Строит путь из готового списка точек
    pub fn new(points: Vec<Vec3>) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::TooFewPoints(points.len()));
        }
        if let Some((index, point)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(PathError::NonFinitePoint { index, point: *point });
        }

        let mut path = Self {
            points,
            arc_lengths: Vec::new(),
        };
        path.arc_lengths = path.build_arc_lengths();
        Ok(path)
    }

    /// Строит путь, который начинается там, где сейчас стоит entity
    ///
    /// Если `current` совпадает с первым waypoint (ε per axis) — не дублируем
    /// точку, иначе `current` добавляется в начало.
    pub fn from_current_position(current: Vec3, waypoints: &[Vec3]) -> Result<Self, PathError> {
        let starts_here = waypoints
            .first()
            .is_some_and(|first| points_coincide(current, *first));

        let points = if starts_here {
            waypoints.to_vec()
        } else {
            std::iter::once(current)
                .chain(waypoints.iter().copied())
                .collect()
        };

        Self::new(points)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn start(&self) -> Vec3 {
        self.points[0]
    }

    pub fn end(&self) -> Vec3 {
        self.points[self.points.len() - 1]
    }

    /// Приближённая длина кривой (по таблице семплов)
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Позиция на кривой, t ∈ [0,1] (segment-параметризация)
    pub fn position_at(&self, t: f32) -> Vec3 {
        let (index, weight) = self.locate(t);
        let [c0, c1, c2, c3] = self.coefficients(index);
        c0 + c1 * weight + c2 * weight * weight + c3 * weight * weight * weight
    }

    /// Нормализованное направление кривой, t ∈ [0,1]
    ///
    /// `None` когда производная вырождается (совпадающие соседние точки).
    pub fn tangent_at(&self, t: f32) -> Option<Vec3> {
        let (index, weight) = self.locate(t);
        let [_, c1, c2, c3] = self.coefficients(index);
        let derivative = c1 + c2 * (2.0 * weight) + c3 * (3.0 * weight * weight);

        if derivative.length_squared() < MIN_TANGENT_LENGTH_SQUARED {
            None
        } else {
            derivative.try_normalize()
        }
    }

    /// Позиция и tangent для normalized progress с выбранной параметризацией
    pub fn sample(&self, progress: f32, parameterization: PathParameterization) -> PathSample {
        let t = match parameterization {
            PathParameterization::Segment => progress.clamp(0.0, 1.0),
            PathParameterization::ArcLength => self.arc_to_curve_t(progress),
        };

        PathSample {
            position: self.position_at(t),
            tangent: self.tangent_at(t),
        }
    }

    /// Переводит долю длины дуги u ∈ [0,1] в параметр кривой t
    pub fn arc_to_curve_t(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let total = self.length();
        if total <= 0.0 {
            return u;
        }

        let target = u * total;
        // Первый индекс, где кумулятивная длина ≥ target
        let upper = self
            .arc_lengths
            .partition_point(|length| *length < target)
            .clamp(1, ARC_LENGTH_SAMPLES);
        let lower = upper - 1;

        let segment_start = self.arc_lengths[lower];
        let segment_length = self.arc_lengths[upper] - segment_start;
        let fraction = if segment_length > 0.0 {
            (target - segment_start) / segment_length
        } else {
            0.0
        };

        ((lower as f32 + fraction) / ARC_LENGTH_SAMPLES as f32).clamp(0.0, 1.0)
    }

    /// Сегмент и локальный вес для t
    fn locate(&self, t: f32) -> (usize, f32) {
        let last = self.points.len() - 1;
        let scaled = last as f32 * t.clamp(0.0, 1.0);
        let index = scaled.floor() as usize;

        if index >= last {
            (last - 1, 1.0)
        } else {
            (index, scaled - index as f32)
        }
    }

    /// Кубические коэффициенты сегмента `index` (centripetal, α = 0.5)
    fn coefficients(&self, index: usize) -> [Vec3; 4] {
        let points = &self.points;
        let p1 = points[index];
        let p2 = points[index + 1];
        let p0 = if index > 0 { points[index - 1] } else { p1 * 2.0 - p2 };
        let p3 = if index + 2 < points.len() {
            points[index + 2]
        } else {
            p2 * 2.0 - p1
        };

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);

        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }

        // Касательные non-uniform Catmull-Rom, приведённые к интервалу [0,1]
        let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        [
            p1,
            m1,
            p1 * -3.0 + p2 * 3.0 - m1 * 2.0 - m2,
            p1 * 2.0 - p2 * 2.0 + m1 + m2,
        ]
    }

    fn build_arc_lengths(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_SAMPLES + 1);
        let mut previous = self.position_at(0.0);
        let mut total = 0.0;
        lengths.push(0.0);

        for i in 1..=ARC_LENGTH_SAMPLES {
            let point = self.position_at(i as f32 / ARC_LENGTH_SAMPLES as f32);
            total += point.distance(previous);
            lengths.push(total);
            previous = point;
        }

        lengths
    }
}

/// Совпадение точек с точностью POINT_EPSILON по каждой оси
pub fn points_coincide(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().cmplt(Vec3::splat(POINT_EPSILON)).all()
}
