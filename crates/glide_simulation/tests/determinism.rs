//! Тесты детерминизма
//!
//! Одинаковый seed → одинаковая траектория игрока (ввод генерится из
//! DeterministicRng, время двигается вручную).

use bevy::prelude::*;
use rand::Rng;

use glide_simulation::physics::layers::COLLISION_LAYER_WALLS;
use glide_simulation::player::player_bundle;
use glide_simulation::{
    create_fixed_step_app, world_snapshot, ControllerConfig, DashInput, DeterministicRng, MoveInput, Player,
    SceneShape, StaticScene,
};

/// Система: случайный ввод раз в 10 тиков
fn random_input(
    mut tick: Local<u32>,
    mut rng: ResMut<DeterministicRng>,
    players: Query<Entity, With<Player>>,
    mut move_events: EventWriter<MoveInput>,
    mut dash_events: EventWriter<DashInput>,
) {
    *tick += 1;
    if *tick % 10 != 0 {
        return;
    }

    for entity in players.iter() {
        let vector = Vec2::new(rng.rng.gen_range(-1.0..=1.0), rng.rng.gen_range(-1.0..=1.0));
        move_events.write(MoveInput { entity, vector });

        if rng.rng.gen_bool(0.3) {
            dash_events.write(DashInput { entity });
        }
    }
}

fn scene() -> StaticScene {
    StaticScene::walled_room(Vec2::splat(-6.0), Vec2::splat(6.0), COLLISION_LAYER_WALLS)
        .with(SceneShape::Circle { center: Vec2::new(2.0, 2.0), radius: 1.0 }, COLLISION_LAYER_WALLS)
        .with(SceneShape::aabb(Vec2::new(-4.0, -1.0), Vec2::new(-2.0, 3.0)), COLLISION_LAYER_WALLS)
}

/// Запускает симуляцию и возвращает snapshot Transform'ов
fn run_simulation(seed: u64, player_count: usize, tick_count: usize) -> Vec<u8> {
    let mut app = create_fixed_step_app(seed);
    let config = ControllerConfig::default();

    app.insert_resource(scene()).add_systems(Update, random_input);

    for i in 0..player_count {
        let x = -4.5 + i as f32 * 1.5;
        app.world_mut().spawn(player_bundle(&config, Vec3::new(x, -4.5, 0.0)));
    }

    for _ in 0..tick_count {
        app.update();
    }

    world_snapshot::<Transform>(app.world_mut())
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let snapshot1 = run_simulation(SEED, 4, 600);
    let snapshot2 = run_simulation(SEED, 4, 600);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let snapshots: Vec<_> = (0..5).map(|_| run_simulation(SEED, 2, 300)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let snapshot1 = run_simulation(1, 2, 300);
    let snapshot2 = run_simulation(2, 2, 300);

    assert_ne!(snapshot1, snapshot2);
}
