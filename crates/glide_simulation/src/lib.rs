//! GLIDE Simulation Core
//!
//! Top-down 2D player controller на Bevy 0.16:
//! - input: Intent (Idle/Moving/Dashing) + события ввода
//! - physics: move-and-slide для круглого тела (sweep + fan probing)
//! - animation: параметры sprite state machine
//! - player: `PlayerController` + ECS host (`PlayerControllerPlugin`)
//!
//! Controller не зависит от Bevy schedule: `PlayerController::step()` можно
//! звать вручную с любым `SceneQuery`. Plugin — headless host поверх него.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod config;
pub mod input;
pub mod logger;
pub mod physics;
pub mod player;

// Re-export для удобства
pub use animation::{AnimationInput, AnimationParameters, AnimationSink, NoAnimation};
pub use config::{ConfigError, ConfigResult, ControllerConfig};
pub use input::{DashInput, InteractInput, Intent, MoveInput, MovementState, PlayerInteracted};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use physics::{CircleBody, LayerMask, MoveResolver, RayHit, RayHits, SceneQuery, SceneShape, StaticScene};
pub use player::{spawn_player, Player, PlayerController, PlayerControllerPlugin, SpawnPlayer, StepReport};

/// Частота simulation tick (FixedUpdate)
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

        // Seed, вставленный host'ом раньше, не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_plugins(PlayerControllerPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Headless App, где каждый `update()` = ровно один FixedUpdate тик
///
/// Время двигается вручную (не wall clock), поэтому прогон детерминирован.
/// Первый `update()` — прогрев (delta = 0), тиков в нём нет.
pub fn create_fixed_step_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(std::time::Duration::from_secs_f64(
        1.0 / SIMULATION_HZ,
    )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
