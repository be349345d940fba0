//! Player spawn helpers
//!
//! Два пути:
//! - `spawn_player(commands, config, position)` — явный config (тесты, tools)
//! - `SpawnPlayer` event → `spawn_requested_players` — config из `ControllerConfig` resource

use bevy::prelude::*;

use super::controller::PlayerController;
use super::player::Player;
use crate::animation::AnimationParameters;
use crate::config::ControllerConfig;
use crate::logger;
use crate::physics::layers::get_mask_names;

/// Event: заспавнить игрока с текущим `ControllerConfig` resource
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlayer {
    pub position: Vec3,
}

/// Компоненты player entity
///
/// - Player marker (только такие entity получают input события)
/// - Transform (authoritative позиция для host)
/// - PlayerController (Intent + CircleBody + resolver + AnimationParameters sink)
pub fn player_bundle(config: &ControllerConfig, position: Vec3) -> impl Bundle {
    (
        Player,
        Transform::from_translation(position),
        PlayerController::new(config.clone(), position, AnimationParameters::default()),
    )
}

/// Spawn player entity в ECS world
///
/// # Returns
/// Entity ID созданного player
pub fn spawn_player(commands: &mut Commands, config: &ControllerConfig, position: Vec3) -> Entity {
    let entity = commands.spawn(player_bundle(config, position)).id();
    logger::log_info(&format!(
        "Player {:?} spawned at {:?} (radius {}, collides with {:?})",
        entity,
        position,
        config.radius,
        get_mask_names(config.collision_layers.0)
    ));
    entity
}

/// Система: обработать `SpawnPlayer` запросы
pub fn spawn_requested_players(
    mut commands: Commands,
    config: Res<ControllerConfig>,
    mut requests: EventReader<SpawnPlayer>,
) {
    for request in requests.read() {
        spawn_player(&mut commands, &config, request.position);
    }
}
