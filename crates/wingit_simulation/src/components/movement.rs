//! Movement компоненты: команды перемещения, ground sensor, выход locomotion

use bevy::prelude::*;

/// Команда движения для AI актора
///
/// Архитектура:
/// - AI система пишет MovementCommand (high-level intent) каждый тик
/// - Locomotion читает его и ведёт актора по прямой к точке
/// - Pathfinding collaborator может подменить steering, core его не реализует
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// Стоять на месте
    #[default]
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
}

impl MovementCommand {
    /// Ground-plane unit direction from `from` toward the command target.
    ///
    /// Zero when idle or already standing on the target.
    pub fn steering_direction(&self, from: Vec3) -> Vec3 {
        match self {
            MovementCommand::Idle => Vec3::ZERO,
            MovementCommand::MoveToPosition { target } => {
                let offset = *target - from;
                Vec3::new(offset.x, 0.0, offset.z).normalize_or_zero()
            }
        }
    }
}

/// "Is this actor resting on a walkable surface", written by the physics collaborator.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroundSensor {
    pub grounded: bool,
}

impl Default for GroundSensor {
    fn default() -> Self {
        Self { grounded: true }
    }
}

/// Locomotion output for the physics collaborator: what to apply to the body this tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct DesiredMotion {
    /// World-space displacement for this tick (velocity × dt)
    pub displacement: Vec3,
    pub velocity: Vec3,
}

/// Whether other bodies may pass through this actor.
///
/// AI actors switch to `PassThrough` while the player dashes (dash through enemies).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum CollisionMode {
    #[default]
    Solid,
    PassThrough,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steering_ignores_height() {
        let command = MovementCommand::MoveToPosition {
            target: Vec3::new(3.0, 5.0, 4.0),
        };

        let direction = command.steering_direction(Vec3::ZERO);
        assert!((direction - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_steering_zero_on_target() {
        let command = MovementCommand::MoveToPosition { target: Vec3::ONE };
        assert_eq!(command.steering_direction(Vec3::ONE), Vec3::ZERO);
        assert_eq!(MovementCommand::Idle.steering_direction(Vec3::ONE), Vec3::ZERO);
    }
}
