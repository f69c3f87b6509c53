//! Locomotion systems (FixedUpdate).

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{CollisionMode, DesiredMotion, GroundSensor, MovementCommand, Player};
use crate::input::{MovementIntent, ViewBasis};
use crate::DeterministicRng;

use super::events::{ActorLocomotionEvent, LocomotionEvent};
use super::state_machine::{LocomotionInput, LocomotionStateMachine};

/// Система: один тик locomotion для каждого живого актора
///
/// Источник направления:
/// - `MovementIntent` (игрок) → через `ViewBasis`
/// - `MovementCommand` (AI) → прямая к точке (pathfinding — внешний collaborator)
/// - ничего → стоим (но гравитация/приземление работают)
///
/// Пишет `DesiredMotion` для physics collaborator и поворот в `Transform`.
pub fn drive_locomotion(
    mut actors: Query<
        (
            Entity,
            &mut LocomotionStateMachine,
            &GroundSensor,
            &mut Transform,
            &mut DesiredMotion,
            Option<&MovementIntent>,
            Option<&MovementCommand>,
        ),
        Without<Dead>,
    >,
    basis: Res<ViewBasis>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut locomotion_events: EventWriter<ActorLocomotionEvent>,
) {
    let delta = time.delta_secs();

    for (entity, mut machine, ground, mut transform, mut motion, intent, command) in actors.iter_mut() {
        let input = match (intent, command) {
            (Some(intent), _) => LocomotionInput::from_intent(intent, &basis, ground.grounded),
            (None, Some(command)) => LocomotionInput::steering(
                command.steering_direction(transform.translation),
                ground.grounded,
            ),
            (None, None) => LocomotionInput {
                grounded: ground.grounded,
                ..Default::default()
            },
        };

        let output = machine.tick(&input, delta, &mut rng.rng);

        transform.rotation = machine.facing();
        motion.displacement = output.displacement;
        motion.velocity = output.velocity;

        for event in output.events {
            match event {
                LocomotionEvent::DashStarted | LocomotionEvent::Jumped | LocomotionEvent::Landed => {
                    crate::log(&format!("🏃 {:?}: {:?}", entity, event));
                }
                _ => {}
            }

            locomotion_events.write(ActorLocomotionEvent { entity, event });
        }
    }
}

/// Система: пока живой игрок в дэше, остальные акторы проницаемы
///
/// Physics collaborator читает `CollisionMode` (коллайдер → trigger).
pub fn sync_dash_passthrough(
    players: Query<&LocomotionStateMachine, (With<Player>, Without<Dead>)>,
    mut others: Query<&mut CollisionMode, Without<Player>>,
) {
    let mode = if players.iter().any(|machine| machine.is_dashing()) {
        CollisionMode::PassThrough
    } else {
        CollisionMode::Solid
    };

    for mut collision in others.iter_mut() {
        // Проверяем что режим изменился — иначе Changed<CollisionMode> спамит
        if *collision != mode {
            *collision = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::config::ActorConfig;

    fn dashing_machine() -> LocomotionStateMachine {
        let mut machine = LocomotionStateMachine::new(&ActorConfig::default()).expect("valid config");
        let dash = LocomotionInput {
            direction: Vec3::X,
            dash: true,
            grounded: true,
            ..Default::default()
        };
        machine.tick(&dash, 0.01, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(machine.is_dashing());
        machine
    }

    fn passthrough_app() -> App {
        let mut app = App::new();
        app.add_systems(Update, sync_dash_passthrough);
        app
    }

    #[test]
    fn test_dashing_player_makes_enemies_passable() {
        let mut app = passthrough_app();
        app.world_mut().spawn((Player, dashing_machine()));
        let enemy = app.world_mut().spawn(CollisionMode::Solid).id();

        app.update();

        assert_eq!(
            *app.world().get::<CollisionMode>(enemy).unwrap(),
            CollisionMode::PassThrough
        );
    }

    #[test]
    fn test_player_killed_mid_dash_restores_collision() {
        let mut app = passthrough_app();
        let player = app.world_mut().spawn((Player, dashing_machine())).id();
        let enemy = app.world_mut().spawn(CollisionMode::Solid).id();

        app.update();
        assert_eq!(
            *app.world().get::<CollisionMode>(enemy).unwrap(),
            CollisionMode::PassThrough
        );

        // Мёртвый игрок больше не тикается: is_dashing() застывает в true
        app.world_mut().entity_mut(player).insert(Dead);
        app.update();

        assert_eq!(
            *app.world().get::<CollisionMode>(enemy).unwrap(),
            CollisionMode::Solid
        );
    }
}
