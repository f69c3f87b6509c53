//! AI target selection system.

use bevy::prelude::*;

use crate::combat::{CombatTargeting, Dead, KnownTargets, TargetCandidates, TargetSlot};
use crate::components::Health;

/// Position of a candidate if it can be targeted this tick.
///
/// Despawned, dead (marker или health ≤ 0) → None.
pub fn resolve_candidate(
    entity: Entity,
    candidates: &Query<(&Transform, &Health), Without<Dead>>,
) -> Option<Vec3> {
    let (transform, health) = candidates.get(entity).ok()?;

    if health.is_alive() {
        Some(transform.translation)
    } else {
        None
    }
}

/// Система: пересчёт цели каждый тик (ближайший из двух кандидатов)
pub fn select_targets(
    mut ai_query: Query<(Entity, &Transform, &KnownTargets, &mut CombatTargeting), Without<Dead>>,
    candidates: Query<(&Transform, &Health), Without<Dead>>,
) {
    for (entity, transform, known, mut targeting) in ai_query.iter_mut() {
        let positions = TargetCandidates {
            structure: resolve_candidate(known.entity(TargetSlot::Structure), &candidates),
            player: resolve_candidate(known.entity(TargetSlot::Player), &candidates),
        };

        let previous = targeting.current();
        let selected = targeting.select(transform.translation, &positions);

        if selected != previous {
            crate::log(&format!(
                "🎯 AI {:?}: target {:?} → {:?}",
                entity, previous, selected
            ));
        }
    }
}
