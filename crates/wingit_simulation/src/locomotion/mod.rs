//! Locomotion domain — input-driven и AI-driven движение
//!
//! Содержит:
//! - LocomotionStateMachine (Idle/Moving/Dashing + airborne, sprint blend, facing)
//! - LocomotionEvent / ActorLocomotionEvent (для animation/audio слоя)
//! - Системы: drive_locomotion, sync_dash_passthrough

use bevy::prelude::*;

use crate::input::{sample_player_input, RawInput, ViewBasis};
use crate::SimulationSet;

pub mod events;
pub mod state_machine;
pub mod systems;


pub use events::*;
pub use state_machine::*;
pub use systems::*;

/// Locomotion Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. Input: sample_player_input — RawInput → MovementIntent
/// 2. Locomotion: drive_locomotion — tick state machine → DesiredMotion
/// 3. Locomotion: sync_dash_passthrough — CollisionMode для врагов
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RawInput>()
            .init_resource::<ViewBasis>()
            .add_event::<ActorLocomotionEvent>()
            .add_systems(FixedUpdate, sample_player_input.in_set(SimulationSet::Input))
            .add_systems(
                FixedUpdate,
                (drive_locomotion, sync_dash_passthrough)
                    .chain()
                    .in_set(SimulationSet::Locomotion),
            );
    }
}
