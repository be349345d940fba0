//! Player ECS systems
//!
//! # Flow за кадр
//! 1. PreUpdate: `apply_player_input` — события ввода → Intent (last-write-wins)
//! 2. FixedUpdate: `step_player_controllers` — Transform → body, `step()`,
//!    body → Transform, `PlayerInteracted` если был interact
//!
//! Сцена для resolver'а — `StaticScene` resource (snapshot на тик).

use bevy::prelude::*;

use super::controller::PlayerController;
use super::player::Player;
use super::spawn::{spawn_requested_players, SpawnPlayer};
use crate::config::ControllerConfig;
use crate::input::{DashInput, InteractInput, MoveInput, PlayerInteracted};
use crate::physics::StaticScene;

/// Система: применить события ввода к player controller'ам
///
/// Событие для entity без `Player`/`PlayerController` молча отбрасывается.
pub fn apply_player_input(
    mut move_events: EventReader<MoveInput>,
    mut dash_events: EventReader<DashInput>,
    mut interact_events: EventReader<InteractInput>,
    mut controllers: Query<&mut PlayerController, With<Player>>,
) {
    for event in move_events.read() {
        if let Ok(mut controller) = controllers.get_mut(event.entity) {
            controller.on_move(event.vector);
        }
    }

    for event in dash_events.read() {
        if let Ok(mut controller) = controllers.get_mut(event.entity) {
            controller.on_dash();
        }
    }

    for event in interact_events.read() {
        if let Ok(mut controller) = controllers.get_mut(event.entity) {
            controller.on_interact();
        }
    }
}

/// Система: тик movement resolver'а
///
/// Работает в FixedUpdate для детерминизма.
/// Transform — authoritative для позиции (host мог телепортировать entity).
pub fn step_player_controllers(
    time: Res<Time<Fixed>>,
    scene: Res<StaticScene>,
    mut controllers: Query<(Entity, &mut PlayerController, &mut Transform)>,
    mut interacted: EventWriter<PlayerInteracted>,
) {
    let delta = time.delta_secs();

    for (entity, mut controller, mut transform) in controllers.iter_mut() {
        controller.set_position(transform.translation);

        let report = controller.step(delta, &*scene);
        transform.translation = report.position;

        if report.interacted {
            interacted.write(PlayerInteracted {
                entity,
                position: report.position,
            });
        }
    }
}

/// Plugin для player controller'а
///
/// Регистрирует события, дефолтные `StaticScene`/`ControllerConfig`
/// (если host не вставил свои) и системы. `ControllerConfig` resource
/// читается при `SpawnPlayer`.
pub struct PlayerControllerPlugin;

impl Plugin for PlayerControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveInput>()
            .add_event::<DashInput>()
            .add_event::<InteractInput>()
            .add_event::<PlayerInteracted>()
            .add_event::<SpawnPlayer>()
            .init_resource::<StaticScene>()
            .init_resource::<ControllerConfig>()
            .add_systems(PreUpdate, (spawn_requested_players, apply_player_input).chain())
            .add_systems(FixedUpdate, step_player_controllers);
    }
}
