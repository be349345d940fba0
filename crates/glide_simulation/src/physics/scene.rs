//! StaticScene — синтетическая статическая сцена с ray-cast
//!
//! Используется в headless симуляции и тестах вместо host physics.
//! Агент в сцене не хранится, поэтому self-hits невозможны
//! (`reports_self_hits() == false`).
//!
//! Лучи, стартующие внутри solid, возвращают попадание с `distance = 0`
//! и нормалью ближайшей поверхности.

use bevy::prelude::*;

use super::query::{LayerMask, RayHit, RayHits, SceneQuery};

/// Параллельность луча и грани
const PARALLEL_EPSILON: f32 = 1e-6;

/// Форма статического коллайдера
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum SceneShape {
    /// Бесконечная стена: solid со стороны, противоположной `normal`
    HalfPlane { point: Vec2, normal: Vec2 },
    /// Отрезок (двусторонний, без толщины)
    Segment { a: Vec2, b: Vec2 },
    Circle { center: Vec2, radius: f32 },
    /// Axis-aligned box
    Aabb { min: Vec2, max: Vec2 },
}

impl SceneShape {
    pub fn half_plane(point: Vec2, normal: Vec2) -> Self {
        Self::HalfPlane {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    pub fn aabb(a: Vec2, b: Vec2) -> Self {
        Self::Aabb {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Пересечение луча (`direction` normalized) → (distance, normal)
    fn intersect(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<(f32, Vec2)> {
        let (distance, normal) = match *self {
            SceneShape::HalfPlane { point, normal } => ray_half_plane(origin, direction, point, normal)?,
            SceneShape::Segment { a, b } => ray_segment(origin, direction, a, b)?,
            SceneShape::Circle { center, radius } => ray_circle(origin, direction, center, radius)?,
            SceneShape::Aabb { min, max } => ray_aabb(origin, direction, min, max)?,
        };

        (distance <= max_distance).then_some((distance, normal))
    }

    /// Расстояние от точки до поверхности (отрицательное внутри solid)
    ///
    /// Для отрезка — просто расстояние (у него нет "внутри").
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        match *self {
            SceneShape::HalfPlane { point: on_plane, normal } => (point - on_plane).dot(normal),
            SceneShape::Segment { a, b } => {
                let edge = b - a;
                let t = ((point - a).dot(edge) / edge.length_squared().max(f32::EPSILON)).clamp(0.0, 1.0);
                point.distance(a + edge * t)
            }
            SceneShape::Circle { center, radius } => point.distance(center) - radius,
            SceneShape::Aabb { min, max } => {
                let center = (min + max) * 0.5;
                let half = (max - min) * 0.5;
                let q = (point - center).abs() - half;
                q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0)
            }
        }
    }
}

fn ray_half_plane(origin: Vec2, direction: Vec2, point: Vec2, normal: Vec2) -> Option<(f32, Vec2)> {
    let height = (origin - point).dot(normal);
    if height < 0.0 {
        return Some((0.0, normal));
    }

    let approach = direction.dot(normal);
    if approach >= -PARALLEL_EPSILON {
        return None;
    }

    Some((height / -approach, normal))
}

fn ray_segment(origin: Vec2, direction: Vec2, a: Vec2, b: Vec2) -> Option<(f32, Vec2)> {
    let edge = b - a;
    let denom = direction.perp_dot(edge);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let to_a = a - origin;
    let distance = to_a.perp_dot(edge) / denom;
    let along = to_a.perp_dot(direction) / denom;
    if distance < 0.0 || !(0.0..=1.0).contains(&along) {
        return None;
    }

    // Нормаль смотрит навстречу лучу
    let mut normal = edge.perp().normalize_or_zero();
    if normal.dot(direction) > 0.0 {
        normal = -normal;
    }
    Some((distance, normal))
}

fn ray_circle(origin: Vec2, direction: Vec2, center: Vec2, radius: f32) -> Option<(f32, Vec2)> {
    let from_center = origin - center;
    let c = from_center.length_squared() - radius * radius;
    if c < 0.0 {
        let normal = from_center.try_normalize().unwrap_or(-direction);
        return Some((0.0, normal));
    }

    let b = from_center.dot(direction);
    if b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let distance = -b - discriminant.sqrt();
    let normal = (origin + direction * distance - center).normalize_or_zero();
    Some((distance.max(0.0), normal))
}

fn ray_aabb(origin: Vec2, direction: Vec2, min: Vec2, max: Vec2) -> Option<(f32, Vec2)> {
    if origin.cmpge(min).all() && origin.cmple(max).all() {
        let faces = [
            (origin.x - min.x, Vec2::NEG_X),
            (max.x - origin.x, Vec2::X),
            (origin.y - min.y, Vec2::NEG_Y),
            (max.y - origin.y, Vec2::Y),
        ];
        let (_, normal) = faces.into_iter().min_by(|a, b| a.0.total_cmp(&b.0))?;
        return Some((0.0, normal));
    }

    let mut t_enter = 0.0_f32;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    for (axis, unit) in [(0, Vec2::X), (1, Vec2::Y)] {
        let (o, d, lo, hi) = (origin[axis], direction[axis], min[axis], max[axis]);

        if d.abs() < PARALLEL_EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let (mut near, mut far) = ((lo - o) / d, (hi - o) / d);
        if near > far {
            std::mem::swap(&mut near, &mut far);
        }
        if near > t_enter {
            t_enter = near;
            normal = unit * -d.signum();
        }
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    Some((t_enter, normal))
}

/// Статический коллайдер сцены
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SceneCollider {
    pub shape: SceneShape,
    /// Слой (один бит из `physics::layers`)
    pub layer: u32,
}

/// Набор статических коллайдеров (snapshot на тик)
#[derive(Resource, Debug, Clone, Default)]
pub struct StaticScene {
    colliders: Vec<SceneCollider>,
}

impl StaticScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, shape: SceneShape, layer: u32) -> Self {
        self.add(shape, layer);
        self
    }

    pub fn add(&mut self, shape: SceneShape, layer: u32) {
        self.colliders.push(SceneCollider { shape, layer });
    }

    /// Прямоугольная комната из 4 бесконечных стен, нормали смотрят внутрь
    pub fn walled_room(min: Vec2, max: Vec2, layer: u32) -> Self {
        Self::new()
            .with(SceneShape::half_plane(min, Vec2::X), layer)
            .with(SceneShape::half_plane(min, Vec2::Y), layer)
            .with(SceneShape::half_plane(max, Vec2::NEG_X), layer)
            .with(SceneShape::half_plane(max, Vec2::NEG_Y), layer)
    }

    pub fn colliders(&self) -> &[SceneCollider] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Минимальное расстояние от точки до коллайдеров из `layers`
    ///
    /// `None` если подходящих коллайдеров нет.
    pub fn distance_to_nearest(&self, point: Vec2, layers: LayerMask) -> Option<f32> {
        self.colliders
            .iter()
            .filter(|collider| layers.contains(collider.layer))
            .map(|collider| collider.shape.signed_distance(point))
            .min_by(f32::total_cmp)
    }
}

impl SceneQuery for StaticScene {
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32, layers: LayerMask) -> RayHits {
        let mut hits = RayHits::new();

        let Some(direction) = direction.try_normalize() else {
            return hits;
        };
        if !(max_distance > 0.0) || !origin.is_finite() {
            return hits;
        }

        for collider in self.colliders.iter().filter(|c| layers.contains(c.layer)) {
            if let Some((distance, normal)) = collider.shape.intersect(origin, direction, max_distance) {
                hits.insert(RayHit {
                    distance,
                    fraction: (distance / max_distance).clamp(0.0, 1.0),
                    point: origin + direction * distance,
                    normal,
                });
            }
        }

        hits
    }

    fn reports_self_hits(&self) -> bool {
        false
    }
}
