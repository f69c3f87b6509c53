//! Locomotion events (для animation/audio слоя)

use bevy::prelude::*;

/// Discrete locomotion event; the core doesn't know how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionEvent {
    Landed,
    Jumped,
    DashStarted,
    DashEnded,
    FidgetTriggered,
    MovingChanged(bool),
    /// Moving on the ground started/stopped (footstep loop on/off)
    FootstepsChanged(bool),
}

/// Event: locomotion event конкретного актора
///
/// Генерируется `drive_locomotion` (FixedUpdate, Locomotion set).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorLocomotionEvent {
    pub entity: Entity,
    pub event: LocomotionEvent,
}
