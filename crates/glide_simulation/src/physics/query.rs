//! Scene query capability (ray-cast как host service)
//!
//! Resolver не знает, откуда берутся коллайдеры: host physics engine, Rapier
//! или синтетическая `StaticScene` из тестов. Всё, что ему нужно, это один
//! метод `cast()`, возвращающий до двух попаданий, отсортированных по дистанции.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Ёмкость результата ray-cast (как у non-alloc буфера в host physics)
pub const MAX_RAY_HITS: usize = 2;

/// Порог self-hit: попадание ближе половины луча считаем своим коллайдером
pub const SELF_HIT_FRACTION: f32 = 0.5;

/// Битовая маска слоёв для фильтрации коллайдеров
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Лежит ли коллайдер со слоем `layer_bits` в маске
    pub fn contains(self, layer_bits: u32) -> bool {
        self.0 & layer_bits != 0
    }

    pub fn with(self, layer_bits: u32) -> Self {
        Self(self.0 | layer_bits)
    }
}

/// Одно попадание луча
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RayHit {
    /// Дистанция от origin до точки попадания
    pub distance: f32,
    /// `distance / max_distance`, в [0, 1]
    pub fraction: f32,
    /// Точка попадания (world space)
    pub point: Vec2,
    /// Нормаль поверхности в точке попадания
    pub normal: Vec2,
}

/// Результат ray-cast: до `MAX_RAY_HITS` попаданий по возрастанию дистанции
///
/// Инвариант: `hits[..len]` отсортированы по `distance`.
/// Если попаданий больше ёмкости, дальние отбрасываются.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RayHits {
    hits: [RayHit; MAX_RAY_HITS],
    len: usize,
}

impl RayHits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[RayHit] {
        &self.hits[..self.len]
    }

    pub fn first(&self) -> Option<&RayHit> {
        self.as_slice().first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RayHit> {
        self.as_slice().iter()
    }

    /// Вставить попадание с сохранением порядка по дистанции
    ///
    /// Returns `false` если буфер полон и попадание дальше всех имеющихся.
    pub fn insert(&mut self, hit: RayHit) -> bool {
        let index = self
            .as_slice()
            .iter()
            .position(|existing| hit.distance < existing.distance)
            .unwrap_or(self.len);

        if index >= MAX_RAY_HITS {
            return false;
        }

        // Сдвигаем хвост вправо (последний элемент выпадает если буфер полон)
        let last = (self.len + 1).min(MAX_RAY_HITS);
        for i in (index + 1..last).rev() {
            self.hits[i] = self.hits[i - 1];
        }
        self.hits[index] = hit;
        self.len = last;
        true
    }
}

impl FromIterator<RayHit> for RayHits {
    fn from_iter<I: IntoIterator<Item = RayHit>>(iter: I) -> Self {
        let mut hits = Self::new();
        for hit in iter {
            hits.insert(hit);
        }
        hits
    }
}

/// Ray-cast capability, инжектится в resolver
pub trait SceneQuery {
    /// Бросить луч из `origin` в направлении `direction` (не обязательно normalized)
    /// длиной `max_distance`, учитывая только коллайдеры из `layers`.
    ///
    /// Пустой результат = "нет коллизии", ошибок нет.
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32, layers: LayerMask) -> RayHits;

    /// Может ли query вернуть коллайдер самого движущегося тела.
    ///
    /// Host physics (коллайдер агента лежит в той же сцене) → `true`,
    /// и resolver применяет self-hit эвристику. Сцены без агента → `false`.
    fn reports_self_hits(&self) -> bool {
        true
    }
}

impl<S: SceneQuery + ?Sized> SceneQuery for &S {
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32, layers: LayerMask) -> RayHits {
        (**self).cast(origin, direction, max_distance, layers)
    }

    fn reports_self_hits(&self) -> bool {
        (**self).reports_self_hits()
    }
}

/// Выбрать попадание, по которому делаем push-out
///
/// Self-hit эвристика (fixed capacity 2):
/// - 0 попаданий, или 1 попадание ближе `SELF_HIT_FRACTION` → нет коллизии (только мы сами)
/// - 1 попадание дальше порога, или первое из нескольких дальше порога → первое
/// - иначе первое = self-hit, берём второе
///
/// Без self-hits (`filter_self_hits == false`) всегда берём ближайшее.
pub fn select_hit(hits: &RayHits, filter_self_hits: bool) -> Option<RayHit> {
    if !filter_self_hits {
        return hits.first().copied();
    }

    match hits.as_slice() {
        [] => None,
        [only] if only.fraction < SELF_HIT_FRACTION => None,
        [only] => Some(*only),
        [first, ..] if first.fraction > SELF_HIT_FRACTION => Some(*first),
        [_, second, ..] => Some(*second),
    }
}

/// Выбрать попадание для длинного луча (sweep)
///
/// Fraction-порог имеет смысл только для лучей длиной `radius`. На длинном
/// луче своим коллайдером считаем попадания ближе `min_distance`.
pub fn select_hit_beyond(hits: &RayHits, filter_self_hits: bool, min_distance: f32) -> Option<RayHit> {
    hits.iter()
        .find(|hit| !filter_self_hits || hit.distance >= min_distance)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(fraction: f32) -> RayHit {
        RayHit {
            distance: fraction,
            fraction,
            point: Vec2::ZERO,
            normal: Vec2::NEG_X,
        }
    }

    #[test]
    fn test_ray_hits_sorted_and_capped() {
        let hits: RayHits = [hit(0.9), hit(0.1), hit(0.5)].into_iter().collect();

        assert_eq!(hits.len(), MAX_RAY_HITS);
        assert_eq!(hits.as_slice()[0].fraction, 0.1);
        assert_eq!(hits.as_slice()[1].fraction, 0.5);
    }

    #[test]
    fn test_insert_far_hit_into_full_buffer_is_dropped() {
        let mut hits: RayHits = [hit(0.2), hit(0.3)].into_iter().collect();
        assert!(!hits.insert(hit(0.8)));
        assert_eq!(hits.as_slice()[1].fraction, 0.3);
    }

    #[test]
    fn test_self_hit_policy_table() {
        let none = RayHits::new();
        let single_self: RayHits = [hit(0.1)].into_iter().collect();
        let single_far: RayHits = [hit(0.7)].into_iter().collect();
        let single_half: RayHits = [hit(0.5)].into_iter().collect();
        let two_far: RayHits = [hit(0.6), hit(0.9)].into_iter().collect();
        let self_then_wall: RayHits = [hit(0.0), hit(0.8)].into_iter().collect();
        let two_at_half: RayHits = [hit(0.5), hit(0.7)].into_iter().collect();

        assert_eq!(select_hit(&none, true), None);
        assert_eq!(select_hit(&single_self, true), None);
        assert_eq!(select_hit(&single_far, true).map(|h| h.fraction), Some(0.7));
        assert_eq!(select_hit(&single_half, true).map(|h| h.fraction), Some(0.5));
        assert_eq!(select_hit(&two_far, true).map(|h| h.fraction), Some(0.6));
        assert_eq!(select_hit(&self_then_wall, true).map(|h| h.fraction), Some(0.8));
        // Первый ровно на пороге не "дальше порога" → берём второй
        assert_eq!(select_hit(&two_at_half, true).map(|h| h.fraction), Some(0.7));
    }

    #[test]
    fn test_without_self_hits_nearest_wins() {
        let single_near: RayHits = [hit(0.1)].into_iter().collect();
        assert_eq!(select_hit(&single_near, false).map(|h| h.fraction), Some(0.1));
    }

    #[test]
    fn test_long_ray_self_hits_filtered_by_distance() {
        let mut lone_wall = RayHits::new();
        lone_wall.insert(RayHit { distance: 1.0, fraction: 0.1, point: Vec2::X, normal: Vec2::NEG_X });
        let self_then_wall: RayHits = [
            RayHit { distance: 0.0, fraction: 0.0, point: Vec2::ZERO, normal: Vec2::NEG_X },
            RayHit { distance: 2.0, fraction: 0.2, point: Vec2::X * 2.0, normal: Vec2::NEG_X },
        ]
        .into_iter()
        .collect();

        // Fraction 0.1 < порога, но дистанция больше радиуса: это стена
        assert_eq!(select_hit_beyond(&lone_wall, true, 0.5).map(|h| h.distance), Some(1.0));
        assert_eq!(select_hit(&lone_wall, true), None);

        assert_eq!(select_hit_beyond(&self_then_wall, true, 0.5).map(|h| h.distance), Some(2.0));
        assert_eq!(select_hit_beyond(&self_then_wall, false, 0.5).map(|h| h.distance), Some(0.0));
        assert_eq!(select_hit_beyond(&RayHits::new(), true, 0.5), None);
    }

    #[test]
    fn test_layer_mask() {
        let mask = LayerMask(0b100).with(0b1000);
        assert!(mask.contains(0b100));
        assert!(mask.contains(0b1000));
        assert!(!mask.contains(0b10));
        assert!(!LayerMask::NONE.contains(0b1));
    }
}
