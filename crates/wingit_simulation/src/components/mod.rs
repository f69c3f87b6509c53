//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (kind, health)
//! - movement: команды перемещения, ground sensor, выход locomotion
//! - player: маркеры (Player, DefendedStructure)

pub mod actor;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use player::*;
