//! Damage resolution и death handling
//!
//! Поток:
//! ```text
//! execute_attacks (AI) → AttackLanded
//!   ↓
//! apply_damage → Health::apply_damage → DamageDealt (+ EntityDied ровно один раз)
//!   ↓
//! handle_deaths → Dead marker, AI off, DespawnAfter
//!   ↓
//! despawn_after_timeout → actor убран из симуляции
//! ```

use bevy::prelude::*;

use crate::components::{DamageOutcome, DesiredMotion, Health, MovementCommand};
use crate::combat::{CombatTargeting, MeleeAttacker};

/// Command: attack connected, damage should be applied to `target`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackLanded {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    pub remaining_health: f32,
    pub target_died: bool,
}

/// Событие: entity умер (health пересёк 0). Терминально, ровно один раз на актора.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
///
/// Все системы симуляции фильтруют `Without<Dead>`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    /// Время деспавна (секунды от старта симуляции)
    pub despawn_time: f32,
}

/// Корпус задержки деспавна для актора (из `ActorConfig::corpse_linger`).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CorpseLinger(pub f32);

/// Система: apply damage от AttackLanded
///
/// Урон по мёртвым или despawned целям — no-op.
pub fn apply_damage(
    mut attacks: EventReader<AttackLanded>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut targets: Query<&mut Health, Without<Dead>>,
) {
    for attack in attacks.read() {
        let Ok(mut health) = targets.get_mut(attack.target) else {
            continue;
        };

        let target_died = match health.apply_damage(attack.damage) {
            DamageOutcome::Ignored => continue,
            DamageOutcome::Damaged { .. } => false,
            DamageOutcome::Died => true,
        };

        damage_dealt_events.write(DamageDealt {
            attacker: attack.attacker,
            target: attack.target,
            damage: attack.damage,
            remaining_health: health.current,
            target_died,
        });

        if target_died {
            entity_died_events.write(EntityDied {
                entity: attack.target,
                killer: Some(attack.attacker),
            });

            crate::log_info(&format!(
                "💀 Entity {:?} killed by {:?}",
                attack.target, attack.attacker
            ));
        }
    }
}

/// Система: death handling
///
/// Добавляет Dead, выключает AI (targeting, attacker, команды движения),
/// обнуляет движение и планирует деспавн.
pub fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut motion: Query<&mut DesiredMotion>,
    lingers: Query<&CorpseLinger>,
    time: Res<Time<Fixed>>,
) {
    for event in death_events.read() {
        if let Ok(mut desired) = motion.get_mut(event.entity) {
            *desired = DesiredMotion::default();
        }

        let linger = lingers.get(event.entity).map(|linger| linger.0).unwrap_or(0.0);

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands
                .remove::<(CombatTargeting, MeleeAttacker, MovementCommand)>()
                .insert((
                    Dead,
                    DespawnAfter {
                        despawn_time: time.elapsed_secs() + linger,
                    },
                ));

            crate::log(&format!("Disabled dead entity {:?}", event.entity));
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::log(&format!("⚰️ Despawning entity {:?}", entity));
            commands.entity(entity).despawn();
        }
    }
}
