//! Collision layers — centralised constants
//!
//! - **Layer:** на каком слое лежит коллайдер сцены
//! - **Mask:** какие слои учитывает ray-cast resolver'а
//!
//! ```rust
//! use glide_simulation::physics::layers::*;
//! use glide_simulation::physics::LayerMask;
//!
//! let mask = LayerMask(COLLISION_MASK_PLAYER);
//! assert!(mask.contains(COLLISION_LAYER_WALLS));
//! assert!(!mask.contains(COLLISION_LAYER_TRIGGERS));
//! ```

/// Layer 2: Player/NPC тела
pub const COLLISION_LAYER_ACTORS: u32 = 0b10; // 2

/// Layer 3: стены и непроходимый terrain
pub const COLLISION_LAYER_WALLS: u32 = 0b100; // 4

/// Layer 4: пропсы (ящики, колонны, бочки)
pub const COLLISION_LAYER_PROPS: u32 = 0b1000; // 8

/// Layer 5: trigger зоны (interact), сквозь них ходим
pub const COLLISION_LAYER_TRIGGERS: u32 = 0b1_0000; // 16

/// Mask: игрок упирается в стены и пропсы, но проходит сквозь триггеры и других акторов
pub const COLLISION_MASK_PLAYER: u32 = COLLISION_LAYER_WALLS | COLLISION_LAYER_PROPS;

/// Название слоя для debug логов
pub fn get_layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        COLLISION_LAYER_ACTORS => "Actors",
        COLLISION_LAYER_WALLS => "Walls",
        COLLISION_LAYER_PROPS => "Props",
        COLLISION_LAYER_TRIGGERS => "Triggers",
        _ => "Unknown",
    }
}

/// Названия всех слоёв маски (для логов), по возрастанию бита
pub fn get_mask_names(mask: u32) -> Vec<&'static str> {
    (0..u32::BITS)
        .map(|bit| 1u32 << bit)
        .filter(|layer| mask & layer != 0)
        .map(get_layer_name)
        .collect()
}
