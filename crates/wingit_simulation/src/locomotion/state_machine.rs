//! Locomotion state machine (player and AI share the same primitive)
//!
//! Горизонталь: Idle / Moving / Dashing. Вертикаль: ортогональный флаг airborne.
//!
//! Порядок внутри одного `tick`:
//! 1. landing (grounded sensor + падаем) → `Landed`
//! 2. dash start / dash tick / walk-sprint / idle fidget
//! 3. jump impulse или гравитация
//! 4. sprint blend, facing, moving/footsteps события

use bevy::prelude::*;
use rand::Rng;

use crate::config::{ActorConfig, ConfigError};
use crate::components::{DesiredMotion, GroundSensor};
use crate::input::{MovementIntent, ViewBasis};
use crate::timed_action::{ActionSlots, ActionStatus, TimedActionKind};

use super::events::LocomotionEvent;

/// Discrete horizontal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum LocomotionState {
    #[default]
    Idle,
    Moving,
    Dashing,
}

/// Everything the state machine reads in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocomotionInput {
    /// World-space desired direction on the ground plane; clamped to unit length by the machine
    pub direction: Vec3,
    pub sprint: bool,
    /// Edge: dash pressed this tick
    pub dash: bool,
    /// Edge: jump pressed this tick
    pub jump: bool,
    pub grounded: bool,
    /// Raw intent is non-zero even if `direction` projected to zero (degenerate view basis)
    pub intent_active: bool,
}

impl LocomotionInput {
    /// Player input resolved against the view basis.
    pub fn from_intent(intent: &MovementIntent, basis: &ViewBasis, grounded: bool) -> Self {
        Self {
            direction: intent.world_direction(basis),
            sprint: intent.sprint_held,
            dash: intent.dash_pressed,
            jump: intent.jump_pressed,
            grounded,
            intent_active: intent.has_movement(),
        }
    }

    /// AI steering: walk along `direction`, no sprint, dash or jump.
    pub fn steering(direction: Vec3, grounded: bool) -> Self {
        Self {
            direction,
            grounded,
            ..Default::default()
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocomotionOutput {
    /// velocity × dt
    pub displacement: Vec3,
    pub velocity: Vec3,
    pub sprint_blend: f32,
    pub events: Vec<LocomotionEvent>,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
struct LocomotionTuning {
    walk_speed: f32,
    sprint_speed: f32,
    sprint_blend_rate: f32,
    turn_rate: f32,
    jump_height: f32,
    gravity: f32,
    dash_speed_multiplier: f32,
    dash_duration: f32,
    idle_fidget_range: (f32, f32),
}

impl From<&ActorConfig> for LocomotionTuning {
    fn from(config: &ActorConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            sprint_speed: config.sprint_speed,
            sprint_blend_rate: config.sprint_blend_rate,
            turn_rate: config.turn_rate,
            jump_height: config.jump_height,
            gravity: config.gravity,
            dash_speed_multiplier: config.dash_speed_multiplier,
            dash_duration: config.dash_duration,
            idle_fidget_range: config.idle_fidget_range,
        }
    }
}

/// Per-actor locomotion state.
///
/// Mutated only through [`LocomotionStateMachine::tick`]. Physics collaborator
/// получает `DesiredMotion`, ground sensor пишет `GroundSensor`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(GroundSensor, DesiredMotion, Transform)]
pub struct LocomotionStateMachine {
    tuning: LocomotionTuning,
    state: LocomotionState,
    sprint_blend: f32,
    vertical_velocity: f32,
    airborne: bool,
    facing: Quat,
    dash_direction: Vec3,
    actions: ActionSlots,
    moving: bool,
    footsteps: bool,
}

impl LocomotionStateMachine {
    pub fn new(config: &ActorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            tuning: LocomotionTuning::from(config),
            state: LocomotionState::Idle,
            sprint_blend: 0.0,
            vertical_velocity: 0.0,
            airborne: false,
            facing: Quat::IDENTITY,
            dash_direction: Vec3::ZERO,
            actions: ActionSlots::default(),
            moving: false,
            footsteps: false,
        })
    }

    /// Same machine, initial facing set (spawn orientation).
    pub fn with_facing(mut self, facing: Quat) -> Self {
        self.facing = facing;
        self
    }

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    pub fn is_dashing(&self) -> bool {
        self.state == LocomotionState::Dashing
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn sprint_blend(&self) -> f32 {
        self.sprint_blend
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn facing(&self) -> Quat {
        self.facing
    }

    /// Unit vector the actor faces (local -Z).
    pub fn facing_direction(&self) -> Vec3 {
        self.facing * Vec3::NEG_Z
    }

    /// Direction locked at dash start, zero when not dashing.
    pub fn dash_direction(&self) -> Vec3 {
        if self.is_dashing() {
            self.dash_direction
        } else {
            Vec3::ZERO
        }
    }

    pub fn actions(&self) -> &ActionSlots {
        &self.actions
    }

    /// Wait time of the running idle fidget, if any.
    pub fn fidget_wait(&self) -> Option<f32> {
        self.actions
            .get(TimedActionKind::IdleFidget)
            .map(|action| action.duration)
    }

    /// `sqrt(2 · g · h)`
    pub fn launch_velocity(&self) -> f32 {
        (2.0 * self.tuning.gravity * self.tuning.jump_height).sqrt()
    }

    pub fn dash_speed(&self) -> f32 {
        self.tuning.dash_speed_multiplier * self.tuning.walk_speed
    }

    /// Uniform sample from the idle fidget range `[min, max)`.
    pub fn sample_fidget_wait<R: Rng>(&self, rng: &mut R) -> f32 {
        let (min, max) = self.tuning.idle_fidget_range;
        if min < max {
            rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Advance one simulation tick.
    pub fn tick<R: Rng>(
        &mut self,
        input: &LocomotionInput,
        delta: f32,
        rng: &mut R,
    ) -> LocomotionOutput {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let direction = if input.direction.is_finite() {
            Vec3::new(input.direction.x, 0.0, input.direction.z).clamp_length_max(1.0)
        } else {
            Vec3::ZERO
        };
        let has_direction = direction != Vec3::ZERO;
        let has_intent = has_direction || input.intent_active;
        let mut events = Vec::new();

        self.resolve_landing(input.grounded, &mut events);

        let horizontal =
            self.update_horizontal(input, direction, has_intent, delta, rng, &mut events);

        self.update_vertical(input, delta, &mut events);

        let sprinting = input.sprint && has_intent;
        self.update_sprint_blend(sprinting, delta);

        let heading = if self.is_dashing() {
            self.dash_direction
        } else {
            direction
        };
        self.update_facing(heading, delta);

        let moving = self.state != LocomotionState::Idle;
        if moving != self.moving {
            self.moving = moving;
            events.push(LocomotionEvent::MovingChanged(moving));
        }

        let footsteps = moving && !self.airborne;
        if footsteps != self.footsteps {
            self.footsteps = footsteps;
            events.push(LocomotionEvent::FootstepsChanged(footsteps));
        }

        let velocity = horizontal + Vec3::Y * self.vertical_velocity;

        LocomotionOutput {
            displacement: velocity * delta,
            velocity,
            sprint_blend: self.sprint_blend,
            events,
        }
    }

    fn resolve_landing(&mut self, grounded: bool, events: &mut Vec<LocomotionEvent>) {
        if grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = 0.0;

            if self.airborne {
                self.airborne = false;
                events.push(LocomotionEvent::Landed);
            }
        }
    }

    /// Returns horizontal velocity for this tick.
    fn update_horizontal<R: Rng>(
        &mut self,
        input: &LocomotionInput,
        direction: Vec3,
        has_intent: bool,
        delta: f32,
        rng: &mut R,
        events: &mut Vec<LocomotionEvent>,
    ) -> Vec3 {
        // Дэшу нужно реальное направление, не только intent
        if input.dash && !self.is_dashing() && !self.airborne && direction != Vec3::ZERO {
            self.start_dash(direction, events);
        }

        if self.is_dashing() {
            // Направление зафиксировано на старте, input игнорируем до конца дэша
            let velocity = self.dash_direction * self.dash_speed();

            let status = self.actions.tick(TimedActionKind::Dash, delta);
            if status != Some(ActionStatus::Running) {
                self.state = if has_intent {
                    LocomotionState::Moving
                } else {
                    LocomotionState::Idle
                };
                events.push(LocomotionEvent::DashEnded);
            }

            return velocity;
        }

        if has_intent {
            self.state = LocomotionState::Moving;
            self.actions.cancel(TimedActionKind::IdleFidget);

            let speed = if input.sprint {
                self.tuning.sprint_speed
            } else {
                self.tuning.walk_speed
            };
            direction * speed
        } else {
            self.state = LocomotionState::Idle;
            self.update_idle_fidget(delta, rng, events);
            Vec3::ZERO
        }
    }

    fn start_dash(&mut self, direction: Vec3, events: &mut Vec<LocomotionEvent>) {
        if !self
            .actions
            .start(TimedActionKind::Dash, self.tuning.dash_duration)
        {
            return;
        }

        self.actions.cancel(TimedActionKind::IdleFidget);
        self.dash_direction = direction.normalize_or_zero();
        self.state = LocomotionState::Dashing;
        events.push(LocomotionEvent::DashStarted);
    }

    fn update_idle_fidget<R: Rng>(
        &mut self,
        delta: f32,
        rng: &mut R,
        events: &mut Vec<LocomotionEvent>,
    ) {
        if !self.actions.is_active(TimedActionKind::IdleFidget) {
            let wait = self.sample_fidget_wait(rng);
            self.actions.start(TimedActionKind::IdleFidget, wait);
        }

        if self.actions.tick(TimedActionKind::IdleFidget, delta) == Some(ActionStatus::Completed) {
            events.push(LocomotionEvent::FidgetTriggered);
        }
    }

    fn update_vertical(
        &mut self,
        input: &LocomotionInput,
        delta: f32,
        events: &mut Vec<LocomotionEvent>,
    ) {
        if input.jump && input.grounded && !self.airborne {
            self.vertical_velocity = self.launch_velocity();
            self.airborne = true;
            events.push(LocomotionEvent::Jumped);
        } else if self.airborne || !input.grounded {
            self.airborne = true;
            self.vertical_velocity -= self.tuning.gravity * delta;
        }
    }

    fn update_sprint_blend(&mut self, sprinting: bool, delta: f32) {
        let target = if sprinting { 1.0 } else { 0.0 };
        let max_step = self.tuning.sprint_blend_rate * delta;
        let difference = target - self.sprint_blend;

        let next = if difference.abs() <= max_step {
            target
        } else {
            self.sprint_blend + max_step.copysign(difference)
        };
        self.sprint_blend = next.clamp(0.0, 1.0);
    }

    fn update_facing(&mut self, heading: Vec3, delta: f32) {
        if heading == Vec3::ZERO {
            return;
        }

        // Local -Z смотрит в heading
        let target = Quat::from_rotation_y(f32::atan2(-heading.x, -heading.z));
        self.facing = self
            .facing
            .rotate_towards(target, self.tuning.turn_rate * delta);
    }
}
