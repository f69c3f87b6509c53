//! AI target selection между двумя известными кандидатами
//!
//! Кандидаты фиксированы: защищаемая база и игрок. AI не владеет ими —
//! держит только handles (`KnownTargets`), выданные при спавне.

use bevy::prelude::*;

/// Which of the two well-known candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TargetSlot {
    Structure,
    Player,
}

/// Handles of the two candidates, injected at spawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct KnownTargets {
    pub structure: Entity,
    pub player: Entity,
}

impl KnownTargets {
    pub fn entity(&self, slot: TargetSlot) -> Entity {
        match slot {
            TargetSlot::Structure => self.structure,
            TargetSlot::Player => self.player,
        }
    }
}

/// Candidate positions for one tick; `None` = not resolvable this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetCandidates {
    pub structure: Option<Vec3>,
    pub player: Option<Vec3>,
}

impl TargetCandidates {
    pub fn position(&self, slot: TargetSlot) -> Option<Vec3> {
        match slot {
            TargetSlot::Structure => self.structure,
            TargetSlot::Player => self.player,
        }
    }
}

/// Current target of an AI actor, recomputed every tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct CombatTargeting {
    current: Option<TargetSlot>,
}

impl CombatTargeting {
    pub fn current(&self) -> Option<TargetSlot> {
        self.current
    }

    /// Pick the nearer candidate.
    ///
    /// - Equal distances keep the previous target (no oscillation); with no
    ///   previous target a tie goes to the structure.
    /// - An unresolvable candidate is skipped; with none resolvable the
    ///   selection is cleared.
    pub fn select(&mut self, from: Vec3, candidates: &TargetCandidates) -> Option<TargetSlot> {
        let structure = candidates.structure.map(|position| from.distance(position));
        let player = candidates.player.map(|position| from.distance(position));

        self.current = match (structure, player) {
            (Some(structure), Some(player)) => {
                if player < structure {
                    Some(TargetSlot::Player)
                } else if structure < player {
                    Some(TargetSlot::Structure)
                } else {
                    Some(self.current.unwrap_or(TargetSlot::Structure))
                }
            }
            (Some(_), None) => Some(TargetSlot::Structure),
            (None, Some(_)) => Some(TargetSlot::Player),
            (None, None) => None,
        };

        self.current
    }
}
