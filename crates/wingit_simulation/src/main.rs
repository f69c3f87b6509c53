//! Headless симуляция WingIt
//!
//! Запускает Bevy App без рендера: база, игрок (scripted input) и два врага.
//! Опционально: путь к JSON `ActorConfig` первым аргументом.

use std::process::ExitCode;

use bevy::prelude::*;
use wingit_simulation::{
    create_headless_app, enemy_bundle, init_logger, log_info, player_bundle, set_log_level,
    structure_bundle, ActorConfig, ConfigError, Health, HeadlessPhysicsPlugin, KnownTargets,
    LogLevel, RawInput, SimulationPlugin,
};

const SEED: u64 = 42;
const TICKS: u32 = 1200;

/// Нет аргумента → defaults. Нечитаемый или невалидный файл — ошибка.
fn load_config() -> Result<ActorConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let config = ActorConfig::from_file(&path)?;
            log_info(&format!("Loaded actor config from {}", path));
            Ok(config)
        }
        None => Ok(ActorConfig::default()),
    }
}

fn build_app(config: &ActorConfig) -> Result<App, ConfigError> {
    let mut app = create_headless_app(SEED);
    app.add_plugins((SimulationPlugin, HeadlessPhysicsPlugin));

    let world = app.world_mut();
    let structure = world.spawn(structure_bundle(Vec3::ZERO, config)?).id();
    let player = world.spawn(player_bundle(Vec3::new(0.0, 0.0, 4.0), config)?).id();
    let targets = KnownTargets { structure, player };

    world.spawn(enemy_bundle(Vec3::new(12.0, 0.0, -12.0), config, targets)?);
    world.spawn(enemy_bundle(Vec3::new(-10.0, 0.0, 10.0), config, targets)?);

    Ok(app)
}

/// Scripted player: бежим вперёд, дэш, прыжок, потом стоим.
fn drive_player(raw: &mut RawInput, tick: u32) {
    raw.axes = if tick < 240 { Vec2::new(0.0, 1.0) } else { Vec2::ZERO };
    raw.sprint_held = (60..180).contains(&tick);

    match tick {
        90 => raw.press_dash(),
        150 => raw.press_jump(),
        _ => {}
    }
}

fn main() -> ExitCode {
    init_logger();
    set_log_level(LogLevel::Info);

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid actor config: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut app = match build_app(&config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Failed to spawn actors: {}", err);
            return ExitCode::FAILURE;
        }
    };

    log_info(&format!("Starting WingIt headless simulation (seed: {})", SEED));

    for tick in 0..TICKS {
        drive_player(&mut app.world_mut().resource_mut::<RawInput>(), tick);
        app.update();

        if tick % 60 == 0 {
            let world = app.world_mut();
            let mut actors = world.query::<(Entity, &Transform, &Health)>();
            for (entity, transform, health) in actors.iter(world) {
                log_info(&format!(
                    "Tick {}: {:?} at {:.2} hp {:.0}/{:.0}",
                    tick, entity, transform.translation, health.current, health.max
                ));
            }
        }
    }

    log_info("Simulation complete!");
    ExitCode::SUCCESS
}
