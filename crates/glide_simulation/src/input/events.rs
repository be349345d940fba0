//! Player input events
//!
//! Host input system (gamepad, keyboard, replay) шлёт события в любой момент
//! между тиками. `apply_player_input` применяет их к `PlayerController`
//! до FixedUpdate. Для move вектора — last-write-wins, без очереди.

use bevy::prelude::*;

/// Направление движения (stick/WASD), ещё не нормализованное
///
/// # Coordinate System
/// - `x`: -1.0 (left) → +1.0 (right)
/// - `y`: -1.0 (down) → +1.0 (up)
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveInput {
    pub entity: Entity,
    pub vector: Vec2,
}

/// Dash trigger (just_pressed)
#[derive(Event, Debug, Clone, Copy)]
pub struct DashInput {
    pub entity: Entity,
}

/// Interact trigger (just_pressed)
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractInput {
    pub entity: Entity,
}

/// Event: игрок провзаимодействовал (ECS → host)
///
/// Генерируется один раз на каждый обработанный `InteractInput`,
/// на том тике, где trigger был забран.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInteracted {
    pub entity: Entity,
    /// Позиция в момент interact (для поиска trigger зоны)
    pub position: Vec3,
}
