//! Locomotion integration test
//!
//! Игрок в headless мире: RawInput → MovementIntent → state machine →
//! HeadlessPhysicsPlugin → GroundSensor → обратно в state machine.

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use wingit_simulation::*;

fn create_player_app(config: &ActorConfig) -> (App, Entity) {
    let mut app = create_headless_app(42);
    app.add_plugins((SimulationPlugin, HeadlessPhysicsPlugin));

    let player = app
        .world_mut()
        .spawn(player_bundle(Vec3::ZERO, config).expect("valid config"))
        .id();

    // Первый update только запускает часы
    app.update();

    (app, player)
}

fn run_collecting(app: &mut App, ticks: usize) -> Vec<LocomotionEvent> {
    let mut cursor = EventCursor::<ActorLocomotionEvent>::default();
    let mut seen = Vec::new();

    for _ in 0..ticks {
        app.update();
        let events = app.world().resource::<Events<ActorLocomotionEvent>>();
        seen.extend(cursor.read(events).map(|event| event.event));
    }

    seen
}

fn count(events: &[LocomotionEvent], wanted: LocomotionEvent) -> usize {
    events.iter().filter(|event| **event == wanted).count()
}

/// Прыжок с места: Jumped один раз, Landed один раз, снова на земле
#[test]
fn test_jump_lands_once() {
    let config = ActorConfig::default();
    let (mut app, player) = create_player_app(&config);

    app.world_mut().resource_mut::<RawInput>().press_jump();

    // sqrt(2·9.8·2) ≈ 6.26 m/s → ~1.28s в воздухе
    let events = run_collecting(&mut app, 150);

    assert_eq!(count(&events, LocomotionEvent::Jumped), 1);
    assert_eq!(count(&events, LocomotionEvent::Landed), 1);

    let world = app.world();
    let machine = world.get::<LocomotionStateMachine>(player).unwrap();
    assert!(!machine.is_airborne());
    assert_eq!(world.get::<Transform>(player).unwrap().translation.y, 0.0);
    assert!(world.get::<GroundSensor>(player).unwrap().grounded);
}

/// Апекс прыжка ≈ jump_height
#[test]
fn test_jump_apex_matches_height() {
    let config = ActorConfig::default();
    let (mut app, player) = create_player_app(&config);

    app.world_mut().resource_mut::<RawInput>().press_jump();

    let mut apex = 0.0f32;
    for _ in 0..150 {
        app.update();
        apex = apex.max(app.world().get::<Transform>(player).unwrap().translation.y);
    }

    // Semi-implicit Euler на 60Hz → небольшая погрешность
    assert!((apex - config.jump_height).abs() < 0.1, "apex {}", apex);
}

/// Ходьба вперёд по view basis (-Z) на walk speed
#[test]
fn test_walks_along_view_forward() {
    let config = ActorConfig::default();
    let (mut app, player) = create_player_app(&config);

    app.world_mut().resource_mut::<RawInput>().axes = Vec2::new(0.0, 1.0);
    let events = run_collecting(&mut app, 60);

    let position = app.world().get::<Transform>(player).unwrap().translation;
    assert!((position.z + config.walk_speed).abs() < 0.01, "position {}", position);
    assert!(position.x.abs() < 1e-4);

    assert_eq!(count(&events, LocomotionEvent::MovingChanged(true)), 1);
    assert_eq!(count(&events, LocomotionEvent::FootstepsChanged(true)), 1);
}

/// Повёрнутая камера поворачивает направление движения
#[test]
fn test_view_basis_rotates_input() {
    let config = ActorConfig::default();
    let (mut app, player) = create_player_app(&config);

    // Камера смотрит вдоль +X (и немного вниз)
    app.world_mut().insert_resource(ViewBasis::from_view_axes(
        Vec3::new(1.0, -0.5, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ));
    app.world_mut().resource_mut::<RawInput>().axes = Vec2::new(0.0, 1.0);

    run_collecting(&mut app, 30);

    let position = app.world().get::<Transform>(player).unwrap().translation;
    assert!(position.x > 1.9, "position {}", position);
    assert!(position.z.abs() < 1e-4);
    assert_eq!(position.y, 0.0);
}

/// Дэш: 3 × walk speed на dash_duration, потом обратно в ходьбу
#[test]
fn test_dash_burst() {
    let config = ActorConfig::default();
    let (mut app, player) = create_player_app(&config);

    {
        let mut raw = app.world_mut().resource_mut::<RawInput>();
        raw.axes = Vec2::new(1.0, 0.0);
        raw.press_dash();
    }

    let events = run_collecting(&mut app, 30);

    assert_eq!(count(&events, LocomotionEvent::DashStarted), 1);
    assert_eq!(count(&events, LocomotionEvent::DashEnded), 1);

    // 0.25s × 12 m/s + остаток ходьбой (4 m/s) ≈ 3.0 + 1.0
    let position = app.world().get::<Transform>(player).unwrap().translation;
    assert!((position.x - 4.0).abs() < 0.2, "position {}", position);

    let machine = app.world().get::<LocomotionStateMachine>(player).unwrap();
    assert_eq!(machine.state(), LocomotionState::Moving);
}
