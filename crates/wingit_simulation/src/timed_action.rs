//! Timed actions: multi-tick behaviour (dash, idle fidget) as plain state
//!
//! Действие живёт между тиками за счёт `elapsed`, никакого suspend/resume.
//! Отмена — флаг, который проверяется на следующем `tick`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TimedActionKind {
    Dash,
    IdleFidget,
}

/// Result of advancing an action by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Running,
    /// Elapsed reached duration; the completion effect should fire.
    Completed,
    /// Cancelled before completion; the completion effect must not fire.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct TimedAction {
    pub kind: TimedActionKind,
    pub elapsed: f32,
    pub duration: f32,
    pub cancelled: bool,
}

impl TimedAction {
    pub fn new(kind: TimedActionKind, duration: f32) -> Self {
        Self {
            kind,
            elapsed: 0.0,
            duration: duration.max(0.0),
            cancelled: false,
        }
    }

    /// Advance by `delta` seconds.
    ///
    /// A cancelled action reports `Cancelled` and does not advance.
    pub fn tick(&mut self, delta: f32) -> ActionStatus {
        if self.cancelled {
            return ActionStatus::Cancelled;
        }

        self.elapsed += delta.max(0.0);

        if self.elapsed >= self.duration {
            ActionStatus::Completed
        } else {
            ActionStatus::Running
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }
}

/// At most one running action per kind.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct ActionSlots {
    dash: Option<TimedAction>,
    idle_fidget: Option<TimedAction>,
}

impl ActionSlots {
    fn slot(&self, kind: TimedActionKind) -> &Option<TimedAction> {
        match kind {
            TimedActionKind::Dash => &self.dash,
            TimedActionKind::IdleFidget => &self.idle_fidget,
        }
    }

    fn slot_mut(&mut self, kind: TimedActionKind) -> &mut Option<TimedAction> {
        match kind {
            TimedActionKind::Dash => &mut self.dash,
            TimedActionKind::IdleFidget => &mut self.idle_fidget,
        }
    }

    /// Start an action; no-op returning `false` if one of the same kind is active.
    pub fn start(&mut self, kind: TimedActionKind, duration: f32) -> bool {
        let slot = self.slot_mut(kind);
        if slot.is_some() {
            return false;
        }

        *slot = Some(TimedAction::new(kind, duration));
        true
    }

    /// Terminate immediately without completion. Returns `true` if something was running.
    pub fn cancel(&mut self, kind: TimedActionKind) -> bool {
        self.slot_mut(kind).take().is_some()
    }

    pub fn is_active(&self, kind: TimedActionKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn get(&self, kind: TimedActionKind) -> Option<&TimedAction> {
        self.slot(kind).as_ref()
    }

    /// Advance the action of `kind`; the slot is freed once it stops running.
    ///
    /// `None` when nothing of that kind is active.
    pub fn tick(&mut self, kind: TimedActionKind, delta: f32) -> Option<ActionStatus> {
        let slot = self.slot_mut(kind);
        let status = slot.as_mut()?.tick(delta);

        if status != ActionStatus::Running {
            *slot = None;
        }

        Some(status)
    }
}
