//! Базовые компоненты акторов: Actor, Health

use bevy::prelude::*;

/// Role of an actor in the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ActorKind {
    #[default]
    Player,
    Enemy,
    /// Defended structure (the base the enemies go after)
    Structure,
}

/// Актор (игрок, враг, база) — базовый компонент для всего, что можно бить
///
/// Автоматически добавляет Health и Transform через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Transform)]
pub struct Actor {
    pub kind: ActorKind,
}

impl Actor {
    pub fn new(kind: ActorKind) -> Self {
        Self { kind }
    }
}

/// What a single `apply_damage` call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Dead target, or a non-positive / non-finite amount
    Ignored,
    Damaged { remaining: f32 },
    /// Health crossed from > 0 to ≤ 0 on this call. Returned at most once.
    Died,
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max. Смерть терминальна: после `Died` все
/// последующие вызовы `apply_damage` — `Ignored`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() || !amount.is_finite() || amount <= 0.0 {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount).max(0.0);

        if self.is_alive() {
            DamageOutcome::Damaged {
                remaining: self.current,
            }
        } else {
            DamageOutcome::Died
        }
    }
}
