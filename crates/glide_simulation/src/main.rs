//! Headless симуляция GLIDE
//!
//! Игрок бродит по комнате со столбами: направление ввода меняется каждые
//! полсекунды (DeterministicRng), иногда dash. Позиции пишутся в лог.
//!
//! ```text
//! glide_simulation [controller.json]
//! ```

use bevy::prelude::*;
use rand::Rng;

use glide_simulation::physics::layers::{COLLISION_LAYER_PROPS, COLLISION_LAYER_WALLS};
use glide_simulation::{
    create_fixed_step_app, log_info, log_warning, ControllerConfig, DashInput, DeterministicRng, MoveInput, Player,
    PlayerController, SceneShape, SpawnPlayer, StaticScene,
};

const SEED: u64 = 42;
const TICK_COUNT: usize = 600;
/// Тиков между сменой направления
const WANDER_PERIOD: u32 = 30;

fn main() {
    let mut app = create_fixed_step_app(SEED);

    let config = match std::env::args().nth(1) {
        Some(path) => ControllerConfig::load(&path).unwrap_or_else(|err| {
            log_warning(&format!("Failed to load config {}: {}, using defaults", path, err));
            ControllerConfig::default()
        }),
        None => ControllerConfig::default(),
    };

    log_info(&format!("Starting GLIDE headless simulation (seed: {})", SEED));

    app.insert_resource(demo_scene())
        .insert_resource(config)
        .add_systems(Update, wander_input);

    // Player спавнится в PreUpdate первого кадра с config из resource
    app.world_mut().send_event(SpawnPlayer { position: Vec3::ZERO });

    let mut players = app.world_mut().query_filtered::<&PlayerController, With<Player>>();

    for tick in 0..TICK_COUNT {
        app.update();

        if tick % 60 == 0 {
            for controller in players.iter(app.world()) {
                log_info(&format!(
                    "Tick {}: position {:?}, state {:?}",
                    tick,
                    controller.position(),
                    controller.state()
                ));
            }
        }
    }

    log_info("Simulation complete!");
}

/// Комната 20x20 с тремя столбами и ящиком
fn demo_scene() -> StaticScene {
    let mut scene = StaticScene::walled_room(Vec2::splat(-10.0), Vec2::splat(10.0), COLLISION_LAYER_WALLS);
    for center in [Vec2::new(4.0, 3.0), Vec2::new(-5.0, -2.0), Vec2::new(1.0, -6.0)] {
        scene.add(SceneShape::Circle { center, radius: 1.0 }, COLLISION_LAYER_WALLS);
    }
    scene.add(
        SceneShape::aabb(Vec2::new(-7.0, 5.0), Vec2::new(-4.0, 6.5)),
        COLLISION_LAYER_PROPS,
    );
    scene
}

/// Система: случайный ввод (вместо клавиатуры)
fn wander_input(
    mut tick: Local<u32>,
    mut rng: ResMut<DeterministicRng>,
    players: Query<Entity, With<Player>>,
    mut move_events: EventWriter<MoveInput>,
    mut dash_events: EventWriter<DashInput>,
) {
    *tick += 1;
    if *tick % WANDER_PERIOD != 1 {
        return;
    }

    for entity in players.iter() {
        let angle = rng.rng.gen_range(0.0..std::f32::consts::TAU);
        let vector = if rng.rng.gen_bool(0.2) {
            Vec2::ZERO
        } else {
            Vec2::from_angle(angle)
        };
        move_events.write(MoveInput { entity, vector });

        if rng.rng.gen_bool(0.25) {
            dash_events.write(DashInput { entity });
        }
    }
}
