//! Input domain — события ввода и Intent state machine
//!
//! Содержит:
//! - MoveInput / DashInput / InteractInput (host → ECS)
//! - PlayerInteracted (ECS → host)
//! - Intent, DashState, MovementState

pub mod events;
pub mod intent;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod intent_tests;

pub use events::*;
pub use intent::*;
