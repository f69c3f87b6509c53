//! Attacker component — melee reach, damage и cooldown gate
//!
//! Cooldown — чистый time gate: `now − last_attack_time ≥ cooldown`.
//! Попытки атаки во время cooldown не копятся и не буферизуются.

use bevy::prelude::*;

use crate::config::{ActorConfig, ConfigError};

/// Monotonic "time since last attack" gate. Lives for the actor's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CombatCooldown {
    /// Simulation time of the last successful attack; `None` before the first one
    pub last_attack_time: Option<f32>,
    /// Minimum seconds between attacks
    pub duration: f32,
}

impl CombatCooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            last_attack_time: None,
            duration,
        }
    }

    pub fn is_ready(&self, now: f32) -> bool {
        match self.last_attack_time {
            Some(last) => now - last >= self.duration,
            None => true,
        }
    }

    /// Consume the gate at `now`. Returns `false` (and changes nothing) while cooling down.
    pub fn try_trigger(&mut self, now: f32) -> bool {
        if !self.is_ready(now) {
            return false;
        }

        self.last_attack_time = Some(now);
        true
    }

    pub fn remaining(&self, now: f32) -> f32 {
        match self.last_attack_time {
            Some(last) => (self.duration - (now - last)).max(0.0),
            None => 0.0,
        }
    }
}

/// MeleeAttacker — компонент для акторов которые бьют в ближнем бою
///
/// Используется AI attack системой: в радиусе + cooldown готов → AttackLanded.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MeleeAttacker {
    pub damage: f32,
    /// Attack only when strictly closer than this (m)
    pub range: f32,
    pub cooldown: CombatCooldown,
}

impl MeleeAttacker {
    pub fn from_config(config: &ActorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            damage: config.attack_damage,
            range: config.attack_range,
            cooldown: CombatCooldown::new(config.attack_cooldown),
        })
    }

    pub fn in_range(&self, distance: f32) -> bool {
        distance < self.range
    }

    /// One attack attempt at `now` against a target `distance` away.
    ///
    /// Returns the damage to apply when the attack lands.
    pub fn try_attack(&mut self, now: f32, distance: f32) -> Option<f32> {
        if !self.in_range(distance) {
            return None;
        }

        if self.cooldown.try_trigger(now) {
            Some(self.damage)
        } else {
            None
        }
    }
}
