//! Controller config (tunables)
//!
//! Все параметры движения, dash и коллайдера в одном месте.
//! Хранится как JSON (data-driven), defaults через `Default`.
//!
//! ```json
//! { "move_speed": 1.5, "dash_time": 0.15, "radius": 0.4 }
//! ```
//! Отсутствующие поля берутся из `ControllerConfig::default()`.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::DEFAULT_FACING;
use crate::logger;
use crate::physics::layers::COLLISION_MASK_PLAYER;
use crate::physics::{max_sweeps_for, CircleBody, LayerMask, MoveResolver, DEFAULT_MAX_SWEEPS, DEFAULT_TEST_ANGLES};

/// Ошибка загрузки/валидации конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables player controller'а
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Множитель скорости ходьбы (и скорости анимации)
    pub move_speed: f32,
    pub dash_speed: f32,
    /// Длительность dash (секунды)
    pub dash_time: f32,
    /// Порог ввода, сравнивается с |v|² (0.04 = |v| > 0.2)
    pub minimum_magnitude: f32,
    /// Фиксированный множитель displacement за тик (overshoot)
    pub displacement_scale: f32,
    /// Радиус круглого коллайдера
    pub radius: f32,
    /// Offset коллайдера относительно pivot
    pub offset: Vec2,
    /// Слои, в которые упирается игрок
    pub collision_layers: LayerMask,
    /// Углы fan probing (градусы)
    pub test_angles: Vec<f32>,
    /// Sweep итераций за тик, `0..=1 + 2 * test_angles.len()` (0 = без sweep)
    pub max_sweeps: usize,
    /// Начальное направление взгляда
    pub default_facing: Vec2,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 1.0,
            dash_speed: 3.0,
            dash_time: 0.2,
            minimum_magnitude: 0.04,
            displacement_scale: 5.0,
            radius: 0.5,
            offset: Vec2::ZERO,
            collision_layers: LayerMask(COLLISION_MASK_PLAYER),
            test_angles: DEFAULT_TEST_ANGLES.to_vec(),
            max_sweeps: DEFAULT_MAX_SWEEPS,
            default_facing: DEFAULT_FACING,
        }
    }
}

impl ControllerConfig {
    /// Парсинг + валидация
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить JSON конфиг с диска
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        logger::log_info(&format!("ControllerConfig loaded from {}", path.display()));
        Ok(config)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Проверка инвариантов (всё конечное, скорости/радиус/время > 0)
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("move_speed", self.move_speed),
            ("dash_speed", self.dash_speed),
            ("dash_time", self.dash_time),
            ("displacement_scale", self.displacement_scale),
            ("radius", self.radius),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        if !self.minimum_magnitude.is_finite() || self.minimum_magnitude < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "minimum_magnitude must be >= 0, got {}",
                self.minimum_magnitude
            )));
        }
        if !self.offset.is_finite() {
            return Err(ConfigError::Invalid("offset must be finite".to_string()));
        }
        if !self.default_facing.is_finite() || self.default_facing == Vec2::ZERO {
            return Err(ConfigError::Invalid("default_facing must be a non-zero vector".to_string()));
        }
        if let Some(angle) = self.test_angles.iter().find(|a| !a.is_finite() || **a <= 0.0 || **a >= 180.0) {
            return Err(ConfigError::Invalid(format!("test angle {} out of (0, 180)", angle)));
        }
        // 0 = без sweep (только probes); сверху — бюджет лучей за тик
        let sweep_cap = max_sweeps_for(self.test_angles.len());
        if self.max_sweeps > sweep_cap {
            return Err(ConfigError::Invalid(format!(
                "max_sweeps {} exceeds {} for {} test angles",
                self.max_sweeps,
                sweep_cap,
                self.test_angles.len()
            )));
        }

        Ok(())
    }

    /// Resolver с углами/слоями из конфига
    pub fn resolver(&self) -> MoveResolver {
        MoveResolver::new(self.collision_layers)
            .with_test_angles(self.test_angles.clone())
            .with_max_sweeps(self.max_sweeps)
    }

    /// Тело агента в `position`
    pub fn body_at(&self, position: Vec3) -> CircleBody {
        CircleBody::new(position, self.radius).with_offset(self.offset)
    }
}
