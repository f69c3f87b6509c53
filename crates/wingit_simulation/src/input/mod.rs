//! Player input → MovementIntent
//!
//! Архитектура:
//! - Device collaborator пишет `RawInput` (resource) каждый frame
//! - `sample_player_input` (FixedUpdate, Input set) превращает его в `MovementIntent`
//! - View collaborator пишет `ViewBasis` (forward/right камеры, спроецированные на землю)
//!
//! Нормализация диагонали — забота потребителя (locomotion), не sampler'а.

use bevy::prelude::*;

use crate::components::Player;

/// Raw device state for the local player.
///
/// `dash_pressed`/`jump_pressed` are edges latched by the device layer; the
/// sampling system clears them once a fixed tick has seen them.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct RawInput {
    /// Horizontal (x) and vertical (y) axes, nominally [-1, 1]
    pub axes: Vec2,
    pub sprint_held: bool,
    pub dash_pressed: bool,
    pub jump_pressed: bool,
}

impl RawInput {
    /// Device layer helper: latch a dash press until the next tick consumes it.
    pub fn press_dash(&mut self) {
        self.dash_pressed = true;
    }

    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
    }
}

/// Per-tick movement intent. Recomputed every tick, never persisted.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Clamped to [-1, 1] per axis, not normalized
    pub axes: Vec2,
    pub sprint_held: bool,
    pub dash_pressed: bool,
    pub jump_pressed: bool,
}

impl MovementIntent {
    /// Exactly-zero axes mean "no movement".
    pub fn has_movement(&self) -> bool {
        self.axes != Vec2::ZERO
    }

    /// World-space desired direction: `forward·y + right·x`, clamped to unit length.
    pub fn world_direction(&self, basis: &ViewBasis) -> Vec3 {
        (basis.forward() * self.axes.y + basis.right() * self.axes.x).clamp_length_max(1.0)
    }
}

pub struct InputSampler;

impl InputSampler {
    /// Pure conversion of device state into an intent.
    pub fn sample(raw: &RawInput) -> MovementIntent {
        MovementIntent {
            axes: Vec2::new(clamp_axis(raw.axes.x), clamp_axis(raw.axes.y)),
            sprint_held: raw.sprint_held,
            dash_pressed: raw.dash_pressed,
            jump_pressed: raw.jump_pressed,
        }
    }
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Ground-projected, normalized basis of the reference viewpoint.
///
/// Core не считает геометрию камеры: view collaborator кладёт сюда свои оси.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    forward: Vec3,
    right: Vec3,
}

impl Default for ViewBasis {
    fn default() -> Self {
        // Bevy convention: forward = -Z, right = +X
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl ViewBasis {
    /// Projects the viewpoint axes onto the ground plane (y = 0) and normalizes them.
    ///
    /// An axis that is vertical (projects to zero) becomes `Vec3::ZERO`.
    pub fn from_view_axes(forward: Vec3, right: Vec3) -> Self {
        Self {
            forward: ground_project(forward),
            right: ground_project(right),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }
}

fn ground_project(axis: Vec3) -> Vec3 {
    Vec3::new(axis.x, 0.0, axis.z).normalize_or_zero()
}

/// System: RawInput → MovementIntent for every player-controlled actor.
///
/// Edges are consumed here so each press is seen by exactly one fixed tick.
pub fn sample_player_input(
    mut raw: ResMut<RawInput>,
    mut players: Query<&mut MovementIntent, With<Player>>,
) {
    let intent = InputSampler::sample(&raw);

    for mut player_intent in players.iter_mut() {
        *player_intent = intent;
    }

    if raw.dash_pressed || raw.jump_pressed {
        raw.dash_pressed = false;
        raw.jump_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_clamps_axes() {
        let raw = RawInput {
            axes: Vec2::new(2.5, -7.0),
            sprint_held: true,
            dash_pressed: false,
            jump_pressed: true,
        };

        let intent = InputSampler::sample(&raw);
        assert_eq!(intent.axes, Vec2::new(1.0, -1.0));
        assert!(intent.sprint_held);
        assert!(intent.jump_pressed);
        assert!(!intent.dash_pressed);
    }

    #[test]
    fn test_sampler_drops_non_finite_axes() {
        let raw = RawInput {
            axes: Vec2::new(f32::NAN, 0.5),
            ..Default::default()
        };

        assert_eq!(InputSampler::sample(&raw).axes, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_diagonal_clamped_to_unit_length() {
        let intent = MovementIntent {
            axes: Vec2::new(1.0, 1.0),
            ..Default::default()
        };

        let direction = intent.world_direction(&ViewBasis::default());
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!(direction.x > 0.0 && direction.z < 0.0);
    }

    #[test]
    fn test_partial_stick_keeps_magnitude() {
        let intent = MovementIntent {
            axes: Vec2::new(0.0, 0.5),
            ..Default::default()
        };

        let direction = intent.world_direction(&ViewBasis::default());
        assert!((direction - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-6);
    }

    #[test]
    fn test_view_basis_ground_projection() {
        // Камера смотрит вниз под 45°
        let basis = ViewBasis::from_view_axes(Vec3::new(0.0, -1.0, -1.0), Vec3::new(2.0, 0.0, 0.0));

        assert!((basis.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert_eq!(basis.right(), Vec3::X);

        let straight_down = ViewBasis::from_view_axes(Vec3::NEG_Y, Vec3::X);
        assert_eq!(straight_down.forward(), Vec3::ZERO);
    }
}
