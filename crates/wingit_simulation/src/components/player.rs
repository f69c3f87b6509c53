//! Control markers: player-controlled actor, defended structure

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// - Input systems используют `With<Player>` (только управляемые игроком акторы)
/// - AI получает игрока как кандидата через `KnownTargets`, а не через глобальный поиск
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker component для защищаемой базы (второй кандидат в цели AI)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DefendedStructure;
