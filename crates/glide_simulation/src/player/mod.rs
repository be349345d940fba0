//! Player domain — controller, marker, ECS systems
//!
//! `PlayerController` живёт отдельно от Bevy: его можно гонять вручную
//! через `step()`. `PlayerControllerPlugin` — один из возможных host'ов.

pub mod controller;
pub mod player;
pub mod spawn;
pub mod systems;

pub use controller::{PlayerController, StepReport};
pub use player::Player;
pub use spawn::{player_bundle, spawn_player, spawn_requested_players, SpawnPlayer};
pub use systems::{apply_player_input, step_player_controllers, PlayerControllerPlugin};
