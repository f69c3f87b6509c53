//! AI movement systems.

use bevy::prelude::*;

use crate::combat::{CombatTargeting, Dead, KnownTargets};
use crate::components::MovementCommand;

/// Система: pursuit
///
/// Каждый тик → MoveToPosition к текущей цели. Без цели → Idle.
/// Locomotion читает команду на следующем тике.
pub fn pursue_targets(
    mut ai_query: Query<(&CombatTargeting, &KnownTargets, &mut MovementCommand), Without<Dead>>,
    positions: Query<&Transform>,
) {
    for (targeting, known, mut command) in ai_query.iter_mut() {
        let destination = targeting
            .current()
            .and_then(|slot| positions.get(known.entity(slot)).ok())
            .map(|transform| transform.translation);

        let next = match destination {
            Some(target) => MovementCommand::MoveToPosition { target },
            None => MovementCommand::Idle,
        };

        // Проверяем что команда изменилась — иначе Changed<MovementCommand> спамит
        if *command != next {
            *command = next;
        }
    }
}
