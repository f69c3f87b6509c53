//! WingIt Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: управление акторами маленькой action игры.
//!
//! - Игрок: input → locomotion (walk/sprint blend, dash, jump, idle fidget)
//! - Враг: ближайшая цель (база / игрок) → преследование → melee по cooldown
//! - Health: урон, терминальная смерть
//!
//! Движок (рендер, анимации, звук, физика, pathfinding) — внешние collaborators:
//! читают `DesiredMotion`, `ActorLocomotionEvent`, `DamageDealt`, `EntityDied`,
//! пишут `RawInput`, `ViewBasis`, `GroundSensor`.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod input;
pub mod locomotion;
pub mod logger;
pub mod physics;
pub mod timed_action;

// Re-export базовых типов для удобства
pub use ai::AIPlugin;
pub use combat::{
    AttackLanded, CombatCooldown, CombatPlugin, CombatTargeting, CorpseLinger, DamageDealt, Dead,
    DespawnAfter, EntityDied, KnownTargets, MeleeAttacker, TargetCandidates, TargetSlot,
};
pub use components::*;
pub use config::{ActorConfig, ConfigError};
pub use input::{InputSampler, MovementIntent, RawInput, ViewBasis};
pub use locomotion::{
    ActorLocomotionEvent, LocomotionEvent, LocomotionInput, LocomotionOutput, LocomotionPlugin,
    LocomotionState, LocomotionStateMachine,
};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use physics::HeadlessPhysicsPlugin;
pub use timed_action::{ActionSlots, ActionStatus, TimedAction, TimedActionKind};

/// Simulation tick rate (FixedUpdate)
pub const TICK_HZ: f64 = 60.0;

/// Порядок фаз одного simulation тика (FixedUpdate, chained)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// RawInput → MovementIntent
    Input,
    /// State machines → DesiredMotion, locomotion события
    Locomotion,
    /// Physics collaborator применяет движение, пишет GroundSensor
    Physics,
    /// AI: цель, преследование, атаки
    Combat,
    /// Урон, смерть, деспавн
    Health,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Headless app уже мог выставить свой seed
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Input,
                    SimulationSet::Locomotion,
                    SimulationSet::Physics,
                    SimulationSet::Combat,
                    SimulationSet::Health,
                )
                    .chain(),
            )
            .add_plugins((LocomotionPlugin, CombatPlugin, AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную ровно на один fixed step за `app.update()`.
/// Первый `update()` только запускает часы (delta = 0, FixedUpdate не идёт).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

/// Player-controlled actor: input-driven locomotion + health.
pub fn player_bundle(position: Vec3, config: &ActorConfig) -> Result<impl Bundle, ConfigError> {
    Ok((
        Actor::new(ActorKind::Player),
        Player,
        Health::new(config.max_health),
        Transform::from_translation(position),
        LocomotionStateMachine::new(config)?,
        MovementIntent::default(),
        CorpseLinger(config.corpse_linger),
    ))
}

/// Defended structure: static, only health.
pub fn structure_bundle(position: Vec3, config: &ActorConfig) -> Result<impl Bundle, ConfigError> {
    config.validate()?;

    Ok((
        Actor::new(ActorKind::Structure),
        DefendedStructure,
        Health::new(config.max_health),
        Transform::from_translation(position),
        CorpseLinger(config.corpse_linger),
    ))
}

/// AI enemy: targeting между `targets`, steering locomotion, melee attacker.
pub fn enemy_bundle(
    position: Vec3,
    config: &ActorConfig,
    targets: KnownTargets,
) -> Result<impl Bundle, ConfigError> {
    Ok((
        Actor::new(ActorKind::Enemy),
        Health::new(config.max_health),
        Transform::from_translation(position),
        LocomotionStateMachine::new(config)?,
        MeleeAttacker::from_config(config)?,
        CombatTargeting::default(),
        targets,
        MovementCommand::Idle,
        CollisionMode::Solid,
        CorpseLinger(config.corpse_linger),
    ))
}
