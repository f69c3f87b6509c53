//! AI attack execution.

use bevy::prelude::*;

use crate::combat::{AttackLanded, CombatTargeting, Dead, KnownTargets, MeleeAttacker};

/// Система: AI attack execution
///
/// Цель в радиусе (strict) + cooldown готов → AttackLanded.
/// Урон применяет combat (Health set) в этом же тике.
pub fn execute_attacks(
    mut ai_query: Query<
        (Entity, &Transform, &CombatTargeting, &KnownTargets, &mut MeleeAttacker),
        Without<Dead>,
    >,
    targets: Query<&Transform, Without<Dead>>,
    time: Res<Time<Fixed>>,
    mut attack_events: EventWriter<AttackLanded>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, targeting, known, mut attacker) in ai_query.iter_mut() {
        let Some(slot) = targeting.current() else {
            continue;
        };

        let target = known.entity(slot);
        let Ok(target_transform) = targets.get(target) else {
            continue;
        };

        let distance = transform.translation.distance(target_transform.translation);

        if let Some(damage) = attacker.try_attack(now, distance) {
            crate::log(&format!(
                "⚔️ AI {:?}: attacking {:?} ({:?}) for {}",
                entity, target, slot, damage
            ));

            attack_events.write(AttackLanded {
                attacker: entity,
                target,
                damage,
            });
        }
    }
}
