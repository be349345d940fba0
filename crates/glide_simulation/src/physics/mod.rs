//! Physics module — 2D move-and-slide для круглых тел
//!
//! Resolver ходит в сцену только через `SceneQuery::cast()`, поэтому
//! host physics (или синтетическая `StaticScene`) инжектится снаружи.

pub mod body;
pub mod layers;
pub mod query;
pub mod resolver;
pub mod scene;


// Re-export основных типов
pub use body::CircleBody;
pub use query::{select_hit, select_hit_beyond, LayerMask, RayHit, RayHits, SceneQuery, MAX_RAY_HITS, SELF_HIT_FRACTION};
pub use resolver::{max_sweeps_for, MoveResolver, DEFAULT_MAX_SWEEPS, DEFAULT_TEST_ANGLES};
pub use scene::{SceneCollider, SceneShape, StaticScene};
