//! AI decision-making module
//!
//! Aggro AI врага: ближайшая из двух целей (база / игрок), преследование,
//! melee атака по cooldown. Без FSM — решение пересчитывается каждый тик.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod systems;

// Re-export основных систем
pub use systems::{execute_attacks, pursue_targets, resolve_candidate, select_targets};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (Combat set) для детерминизма.
/// Порядок выполнения:
/// 1. select_targets — пересчёт ближайшей цели
/// 2. pursue_targets — цель → MovementCommand
/// 3. execute_attacks — генерация AttackLanded событий
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (select_targets, pursue_targets, execute_attacks)
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Combat),
        );
    }
}
