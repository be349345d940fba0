//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Input systems применяют `MoveInput`/`DashInput`/`InteractInput` только к
/// entity с этим маркером: событие для entity без `Player` игнорируется.
///
/// # Possession
/// ```ignore
/// commands.entity(old_actor).remove::<Player>();
/// commands.entity(new_actor).insert(Player);
/// ```
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
