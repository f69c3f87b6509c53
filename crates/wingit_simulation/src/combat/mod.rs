//! Combat module
//!
//! ECS ответственность:
//! - Combat state: Health (components), MeleeAttacker + CombatCooldown, CombatTargeting
//! - Combat rules: nearer-target selection, strict reach, cooldown gate, terminal death
//! - Events: AttackLanded, DamageDealt, EntityDied
//!
//! Решения "кого бить и когда" принимает AI (`crate::ai`), здесь — данные и
//! применение урона.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod attacker;
pub mod damage;
pub mod targeting;

// Re-export основных типов
pub use attacker::{CombatCooldown, MeleeAttacker};
pub use damage::{
    AttackLanded, CorpseLinger, DamageDealt, Dead, DespawnAfter, EntityDied, apply_damage,
    despawn_after_timeout, handle_deaths,
};
pub use targeting::{CombatTargeting, KnownTargets, TargetCandidates, TargetSlot};

/// Combat Plugin
///
/// Регистрирует combat события и health системы в FixedUpdate (Health set).
///
/// Порядок выполнения:
/// 1. despawn_after_timeout — убираем трупы прошлых тиков
/// 2. apply_damage — AttackLanded → Health → DamageDealt / EntityDied
/// 3. handle_deaths — Dead marker, AI off, DespawnAfter
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttackLanded>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (despawn_after_timeout, apply_damage, handle_deaths)
                .chain()
                .in_set(SimulationSet::Health),
        );
    }
}
