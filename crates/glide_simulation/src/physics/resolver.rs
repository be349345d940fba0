//! Move-and-slide resolver для круглых тел
//!
//! Алгоритм за тик (дешёвая итеративная релаксация, не точный swept-circle):
//! 1. **Sweep:** луч из центра тела вдоль displacement (с lookahead за
//!    конечную точку). Если стена ближе, чем нужно, клампим центр на
//!    расстоянии `radius` от её плоскости, а остаток displacement проецируем
//!    на касательную (slide). До `max_sweeps` поверхностей.
//! 2. **Probe:** луч длиной `radius` из target вдоль направления движения,
//!    push-out по нормали на `(1 - fraction) * radius`.
//! 3. **Fan:** то же самое для направления, повёрнутого на каждый test angle
//!    (+z, затем −z). Каждый probe видит уже скорректированный target.
//!
//! Число лучей за тик ограничено `max_casts()`.

use bevy::prelude::*;

use super::body::CircleBody;
use super::query::{select_hit, select_hit_beyond, LayerMask, SceneQuery};

/// Углы fan probing (градусы), по возрастанию
pub const DEFAULT_TEST_ANGLES: [f32; 5] = [10.0, 20.0, 40.0, 60.0, 80.0];

/// Максимум поверхностей, по которым скользит sweep за тик
pub const DEFAULT_MAX_SWEEPS: usize = 3;

/// Lookahead sweep-луча за конечную точку, в радиусах
///
/// Покрывает подход к стене под углом до ~86° от нормали; более пологие
/// углы добирает fan.
pub const SWEEP_LOOKAHEAD_RADII: f32 = 16.0;

/// Допустимый максимум `max_sweeps` для `angle_count` углов fan
pub fn max_sweeps_for(angle_count: usize) -> usize {
    1 + 2 * angle_count
}

/// Ниже этого косинуса считаем, что движемся вдоль/от поверхности
const MIN_APPROACH_COS: f32 = 1e-4;

/// Move-and-slide resolver
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct MoveResolver {
    /// Слои, в которые упирается тело
    pub layers: LayerMask,
    /// Углы fan probing (градусы)
    pub test_angles: Vec<f32>,
    pub max_sweeps: usize,
}

impl Default for MoveResolver {
    fn default() -> Self {
        Self::new(LayerMask::ALL)
    }
}

impl MoveResolver {
    pub fn new(layers: LayerMask) -> Self {
        Self {
            layers,
            test_angles: DEFAULT_TEST_ANGLES.to_vec(),
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }

    pub fn with_test_angles(mut self, test_angles: impl Into<Vec<f32>>) -> Self {
        self.test_angles = test_angles.into();
        self
    }

    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Сколько sweep итераций реально делаем: не больше, чем probe лучей
    /// (forward + fan), чтобы за тик было не больше `2 * (1 + 2 * angles)` лучей.
    pub fn sweep_limit(&self) -> usize {
        self.max_sweeps.min(max_sweeps_for(self.test_angles.len()))
    }

    /// Верхняя граница числа ray-cast'ов за один `resolve()`
    pub fn max_casts(&self) -> usize {
        self.sweep_limit() + 1 + 2 * self.test_angles.len()
    }

    /// Ближайшая достижимая позиция для `body` при смещении на `displacement`
    ///
    /// Нулевой (или не-finite) displacement → позиция не меняется.
    /// `position.z` сохраняется.
    pub fn resolve<S: SceneQuery + ?Sized>(&self, scene: &S, body: &CircleBody, displacement: Vec2) -> Vec3 {
        let Some(direction) = displacement.try_normalize() else {
            return body.position;
        };

        let mut target = self.sweep(scene, body.center(), displacement, body.radius);

        let probe = direction * body.radius;
        target += self.probe_adjustment(scene, target, probe, body.radius);

        for &angle in &self.test_angles {
            let rotation = Vec2::from_angle(angle.to_radians());
            target += self.probe_adjustment(scene, target, rotation.rotate(probe), body.radius);

            let rotation = Vec2::from_angle(-angle.to_radians());
            target += self.probe_adjustment(scene, target, rotation.rotate(probe), body.radius);
        }

        (target - body.offset).extend(body.position.z)
    }

    /// Sweep центра вдоль displacement со скольжением по поверхностям
    ///
    /// Returns новый центр. Если поверхности кончились раньше displacement,
    /// тело останавливается на последнем контакте.
    /// `max_sweeps == 0` отключает sweep: target = start + displacement.
    fn sweep<S: SceneQuery + ?Sized>(&self, scene: &S, start: Vec2, displacement: Vec2, radius: f32) -> Vec2 {
        let limit = self.sweep_limit();
        if limit == 0 {
            return start + displacement;
        }

        let mut center = start;
        let mut remaining = displacement;

        for _ in 0..limit {
            let Some(direction) = remaining.try_normalize() else {
                return center;
            };
            let length = remaining.length();

            let hits = scene.cast(center, direction, length + radius * SWEEP_LOOKAHEAD_RADII, self.layers);
            let Some(hit) = select_hit_beyond(&hits, scene.reports_self_hits(), radius) else {
                return center + remaining;
            };

            let normal = hit.normal.normalize_or_zero();
            let approach = -direction.dot(normal);
            if approach <= MIN_APPROACH_COS {
                return center + remaining;
            }

            // Центр должен остановиться в `radius` от плоскости поверхности
            let stop = (hit.distance - radius / approach).max(0.0);
            if stop >= length {
                return center + remaining;
            }

            center += direction * stop;
            remaining -= direction * stop;
            remaining -= normal * remaining.dot(normal);
        }

        center
    }

    /// Push-out adjustment для одного probe луча
    fn probe_adjustment<S: SceneQuery + ?Sized>(&self, scene: &S, origin: Vec2, probe: Vec2, radius: f32) -> Vec2 {
        let hits = scene.cast(origin, probe, radius, self.layers);

        match select_hit(&hits, scene.reports_self_hits()) {
            Some(hit) => hit.normal.normalize_or_zero() * ((1.0 - hit.fraction) * radius),
            None => Vec2::ZERO,
        }
    }
}
