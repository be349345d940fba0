//! Animation parameters adapter
//!
//! Controller раз в тик отдаёт `AnimationInput` в `AnimationSink`.
//! `AnimationParameters` — стандартный sink: маппит вектор движения в
//! параметры sprite state machine (blend tree Horizontal/Vertical + Speed).
//! Host (renderer) читает параметры по имени через `float_parameters()`.

use bevy::prelude::*;

/// Clamp диапазон playback speed анимации
pub const MIN_ANIMATION_SPEED: f32 = 0.5;
pub const MAX_ANIMATION_SPEED: f32 = 2.5;

// Имена параметров animator'а
pub const PARAM_HORIZONTAL: &str = "Horizontal";
pub const PARAM_VERTICAL: &str = "Vertical";
pub const PARAM_MAGNITUDE: &str = "Magnitude";
pub const PARAM_SPEED: &str = "Speed";
pub const PARAM_LAST_HORIZONTAL: &str = "LastHorizontal";
pub const PARAM_LAST_VERTICAL: &str = "LastVertical";
pub const PARAM_DASH: &str = "Dash";

/// Что controller сообщает анимации за тик
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationInput {
    /// Вектор, которым двигались на этом тике (dash direction во время dash)
    pub current_vector: Vec2,
    pub last_non_zero_vector: Vec2,
    pub dashing: bool,
    /// move_speed (или dash_speed во время dash)
    pub speed_multiplier: f32,
}

/// Потребитель анимационных параметров (инжектится в controller)
pub trait AnimationSink {
    fn animate(&mut self, input: &AnimationInput);
}

impl<A: AnimationSink + ?Sized> AnimationSink for &mut A {
    fn animate(&mut self, input: &AnimationInput) {
        (**self).animate(input);
    }
}

/// Sink, который ничего не делает (headless агенты без спрайта)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnimation;

impl AnimationSink for NoAnimation {
    fn animate(&mut self, _input: &AnimationInput) {}
}

/// Параметры sprite state machine
///
/// `last_*` и `flip_x` обновляются только пока есть движение
/// (`magnitude > 0`), чтобы idle анимация смотрела туда, куда шли.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationParameters {
    pub horizontal: f32,
    pub vertical: f32,
    /// Квадрат длины текущего вектора
    pub magnitude: f32,
    pub speed: f32,
    pub last_horizontal: f32,
    pub last_vertical: f32,
    pub dash: bool,
    /// Зеркалить спрайт (последний горизонтальный ввод вправо)
    pub flip_x: bool,
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            horizontal: 0.0,
            vertical: 0.0,
            magnitude: 0.0,
            speed: MIN_ANIMATION_SPEED,
            last_horizontal: 0.0,
            last_vertical: 0.0,
            dash: false,
            flip_x: false,
        }
    }
}

impl AnimationParameters {
    /// Float параметры по имени (для host animator)
    pub fn float_parameters(&self) -> [(&'static str, f32); 6] {
        [
            (PARAM_HORIZONTAL, self.horizontal),
            (PARAM_VERTICAL, self.vertical),
            (PARAM_MAGNITUDE, self.magnitude),
            (PARAM_SPEED, self.speed),
            (PARAM_LAST_HORIZONTAL, self.last_horizontal),
            (PARAM_LAST_VERTICAL, self.last_vertical),
        ]
    }

    /// Bool параметры по имени
    pub fn bool_parameters(&self) -> [(&'static str, bool); 1] {
        [(PARAM_DASH, self.dash)]
    }
}

impl AnimationSink for AnimationParameters {
    fn animate(&mut self, input: &AnimationInput) {
        let magnitude = input.current_vector.length_squared();

        self.horizontal = input.current_vector.x;
        self.vertical = input.current_vector.y;
        self.magnitude = magnitude;
        self.dash = input.dashing;
        self.speed = (magnitude * input.speed_multiplier).clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);

        if magnitude > 0.0 {
            self.last_horizontal = input.last_non_zero_vector.x;
            self.last_vertical = input.last_non_zero_vector.y;
            self.flip_x = input.last_non_zero_vector.x > 0.0;
        }
    }
}
