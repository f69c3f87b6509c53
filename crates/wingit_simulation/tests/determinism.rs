//! Тесты детерминизма
//!
//! Проверяем что полная симуляция (locomotion + AI + combat) с одинаковым seed
//! даёт идентичные результаты

use bevy::prelude::*;
use wingit_simulation::*;

const TICK_COUNT: usize = 600;

/// Снепшоты всех компонентов, которые меняет симуляция
struct Snapshot {
    transforms: Vec<u8>,
    health: Vec<u8>,
    locomotion: Vec<u8>,
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> Snapshot {
    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, HeadlessPhysicsPlugin));

    let config = ActorConfig {
        // Короткие fidget'ы, чтобы RNG реально участвовал в прогоне
        idle_fidget_range: (0.5, 2.0),
        // Никто не умирает за прогон, состав мира стабилен
        max_health: 1000.0,
        ..Default::default()
    };

    let world = app.world_mut();
    let structure = world
        .spawn(structure_bundle(Vec3::ZERO, &config).expect("valid config"))
        .id();
    let player = world
        .spawn(player_bundle(Vec3::new(0.0, 0.0, 8.0), &config).expect("valid config"))
        .id();
    let targets = KnownTargets { structure, player };

    for i in 0..4 {
        let angle = i as f32 * std::f32::consts::FRAC_PI_2;
        let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * 15.0;
        world.spawn(enemy_bundle(position, &config, targets).expect("valid config"));
    }

    for tick in 0..tick_count {
        {
            let mut raw = app.world_mut().resource_mut::<RawInput>();
            raw.axes = if tick < 120 { Vec2::new(1.0, 0.0) } else { Vec2::ZERO };
            if tick == 30 {
                raw.press_dash();
            }
        }
        app.update();
    }

    let world = app.world_mut();
    Snapshot {
        transforms: world_snapshot::<Transform>(world),
        health: world_snapshot::<Health>(world),
        locomotion: world_snapshot::<LocomotionStateMachine>(world),
    }
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_simulation(SEED, TICK_COUNT);
    let second = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        first.transforms, second.transforms,
        "Симуляция с одинаковым seed ({}) дала разные позиции!",
        SEED
    );
    assert_eq!(first.health, second.health);
    assert_eq!(first.locomotion, second.locomotion);
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    // Запускаем 3 раза — все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, 300)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0].locomotion, snapshot.locomotion,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
        assert_eq!(snapshots[0].transforms, snapshot.transforms);
    }
}

#[test]
fn test_seed_changes_fidget_schedule() {
    let first = run_simulation(1, 200);
    let second = run_simulation(2, 200);

    // Игрок стоит с тика 120 → fidget wait из разных RNG потоков
    assert_ne!(first.locomotion, second.locomotion);
}
