//! PlayerController — агент: Intent + CircleBody + resolver + animation sink
//!
//! Всё инжектится при создании (config, позиция, animation sink), никакого
//! поиска компонентов по типу. Host вызывает:
//! - `on_move` / `on_dash` / `on_interact` когда приходит ввод;
//! - `step(delta, scene)` раз в тик симуляции.

use bevy::prelude::*;

use crate::animation::{AnimationInput, AnimationParameters, AnimationSink};
use crate::config::ControllerConfig;
use crate::input::{Intent, MovementState};
use crate::logger;
use crate::physics::{CircleBody, MoveResolver, SceneQuery};

/// Результат одного тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Новая позиция (z не меняется)
    pub position: Vec3,
    /// Смещение, которое хотели сделать
    pub requested: Vec2,
    /// Смещение, которое получилось после коллизий
    pub displacement: Vec2,
    /// Состояние после тика
    pub state: MovementState,
    /// Interact trigger был забран на этом тике
    pub interacted: bool,
}

/// Player controller component
#[derive(Component, Debug, Clone)]
pub struct PlayerController<A: AnimationSink + Send + Sync + 'static = AnimationParameters> {
    config: ControllerConfig,
    intent: Intent,
    body: CircleBody,
    resolver: MoveResolver,
    animation: A,
}

impl<A: AnimationSink + Send + Sync + 'static> PlayerController<A> {
    pub fn new(config: ControllerConfig, position: Vec3, animation: A) -> Self {
        Self {
            intent: Intent::new(config.default_facing),
            body: config.body_at(position),
            resolver: config.resolver(),
            animation,
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn body(&self) -> &CircleBody {
        &self.body
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Телепорт / синхронизация с host Transform
    pub fn set_position(&mut self, position: Vec3) {
        self.body.position = position;
    }

    pub fn state(&self) -> MovementState {
        self.intent.state()
    }

    pub fn on_move(&mut self, vector: Vec2) {
        self.intent.on_move(vector, self.config.minimum_magnitude);
    }

    /// Returns `true` если dash стартовал (во время dash trigger игнорируется)
    pub fn on_dash(&mut self) -> bool {
        let started = self.intent.on_dash(self.config.dash_time);
        if started {
            logger::log(&format!(
                "Dash started: direction {:?}, {:.2}s",
                self.intent.dash.direction, self.config.dash_time
            ));
        }
        started
    }

    pub fn on_interact(&mut self) {
        self.intent.on_interact();
    }

    /// Один тик: выбрать вектор (dash или ввод) → resolve → анимация → dash countdown
    pub fn step<S: SceneQuery + ?Sized>(&mut self, delta: f32, scene: &S) -> StepReport {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        let dashing = self.intent.is_dashing();
        let (vector, speed) = self.intent.tick_motion(self.config.move_speed, self.config.dash_speed);
        let requested = vector * speed * delta * self.config.displacement_scale;

        let previous = self.body.position;
        let position = self.resolver.resolve(scene, &self.body, requested);
        self.body.position = position;

        self.animation.animate(&AnimationInput {
            current_vector: vector,
            last_non_zero_vector: self.intent.last_non_zero_vector,
            dashing,
            speed_multiplier: speed,
        });

        if dashing && self.intent.advance_dash(delta) {
            logger::log(&format!("Dash finished, now {:?}", self.intent.state()));
        }

        StepReport {
            position,
            requested,
            displacement: position.truncate() - previous.truncate(),
            state: self.intent.state(),
            interacted: self.intent.take_interact(),
        }
    }
}
