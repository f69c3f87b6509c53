//! Headless physics collaborator
//!
//! Минимальная замена физ. движку для headless binary и тестов:
//! - `DesiredMotion.displacement` → `Transform.translation` (без коллизий)
//! - плоская земля на `y = 0` → `GroundSensor`
//!
//! В игре этот plugin не добавляется: движок сам двигает тело и пишет sensor.

use bevy::prelude::*;

use crate::components::{DesiredMotion, GroundSensor};
use crate::SimulationSet;

/// Height of the flat ground plane.
pub const GROUND_HEIGHT: f32 = 0.0;

pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, integrate_motion.in_set(SimulationSet::Physics));
    }
}

/// Moves `translation` by `displacement`, resting on the ground plane.
///
/// Returns the new position and whether it is grounded.
pub fn step_body(translation: Vec3, displacement: Vec3) -> (Vec3, bool) {
    let mut next = translation + displacement;

    if next.y <= GROUND_HEIGHT {
        next.y = GROUND_HEIGHT;
        (next, true)
    } else {
        (next, false)
    }
}

/// Система: применяем DesiredMotion и обновляем GroundSensor
pub fn integrate_motion(mut bodies: Query<(&DesiredMotion, &mut Transform, &mut GroundSensor)>) {
    for (motion, mut transform, mut ground) in bodies.iter_mut() {
        let (translation, grounded) = step_body(transform.translation, motion.displacement);
        transform.translation = translation;

        if ground.grounded != grounded {
            ground.grounded = grounded;
        }
    }
}
