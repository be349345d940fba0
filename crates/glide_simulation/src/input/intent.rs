//! Intent / Dash state machine
//!
//! States: `Idle` → `Moving` → `Dashing` (см. `MovementState`).
//!
//! Порог ввода сравнивается с **квадратом** длины вектора (без sqrt).
//! `last_non_zero_vector` переживает нейтральный ввод: dash после остановки
//! идёт туда, куда игрок смотрел последним.

use bevy::prelude::*;

/// Направление взгляда по умолчанию (вниз, к камере)
pub const DEFAULT_FACING: Vec2 = Vec2::NEG_Y;

/// Состояние движения (выводится из Intent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum MovementState {
    #[default]
    Idle,
    Moving,
    Dashing,
}

/// Активный dash
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct DashState {
    pub active: bool,
    /// Normalized, захвачено в момент trigger
    pub direction: Vec2,
    /// Секунды до конца dash
    pub remaining_time: f32,
}

/// Намерение игрока (последний ввод + dash)
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Intent {
    pub desired_vector: Vec2,
    pub is_moving: bool,
    /// Инвариант: никогда не ноль
    pub last_non_zero_vector: Vec2,
    pub dash: DashState,
    /// One-shot interact trigger, сбрасывается следующим тиком
    pub interact_requested: bool,
}

impl Default for Intent {
    fn default() -> Self {
        Self::new(DEFAULT_FACING)
    }
}

impl Intent {
    /// Новый Intent с начальным направлением взгляда
    ///
    /// Нулевой/не-finite `facing` заменяется на `DEFAULT_FACING`.
    pub fn new(facing: Vec2) -> Self {
        let facing = if facing.is_finite() && facing != Vec2::ZERO {
            facing
        } else {
            DEFAULT_FACING
        };

        Self {
            desired_vector: Vec2::ZERO,
            is_moving: false,
            last_non_zero_vector: facing,
            dash: DashState::default(),
            interact_requested: false,
        }
    }

    /// MoveInput: last-write-wins
    ///
    /// `|v|² > minimum_magnitude` → двигаемся, иначе стоим
    /// (`last_non_zero_vector` при этом не трогаем).
    pub fn on_move(&mut self, vector: Vec2, minimum_magnitude: f32) {
        if vector.is_finite() && vector.length_squared() > minimum_magnitude && vector != Vec2::ZERO {
            self.desired_vector = vector;
            self.last_non_zero_vector = vector;
            self.is_moving = true;
        } else {
            self.desired_vector = Vec2::ZERO;
            self.is_moving = false;
        }
    }

    /// DashInput: стартует dash в направлении `last_non_zero_vector`
    ///
    /// Returns `false` если dash уже идёт (повторный trigger игнорируется, без очереди).
    pub fn on_dash(&mut self, dash_time: f32) -> bool {
        if self.dash.active {
            return false;
        }

        self.dash = DashState {
            active: true,
            direction: self.last_non_zero_vector.try_normalize().unwrap_or(DEFAULT_FACING),
            remaining_time: dash_time,
        };
        true
    }

    /// InteractInput
    pub fn on_interact(&mut self) {
        self.interact_requested = true;
    }

    /// Забрать interact trigger (true максимум один раз на trigger)
    pub fn take_interact(&mut self) -> bool {
        std::mem::take(&mut self.interact_requested)
    }

    /// Dash countdown за тик
    ///
    /// Returns `true` если dash закончился на этом тике.
    pub fn advance_dash(&mut self, delta: f32) -> bool {
        if !self.dash.active {
            return false;
        }

        self.dash.remaining_time -= delta;
        if self.dash.remaining_time <= 0.0 {
            self.dash = DashState::default();
            return true;
        }
        false
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.active
    }

    pub fn state(&self) -> MovementState {
        if self.dash.active {
            MovementState::Dashing
        } else if self.is_moving {
            MovementState::Moving
        } else {
            MovementState::Idle
        }
    }

    /// Вектор и скорость для текущего тика: dash перекрывает обычный ввод
    pub fn tick_motion(&self, move_speed: f32, dash_speed: f32) -> (Vec2, f32) {
        if self.dash.active {
            (self.dash.direction, dash_speed)
        } else {
            (self.desired_vector, move_speed)
        }
    }
}
