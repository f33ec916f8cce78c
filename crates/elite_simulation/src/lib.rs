//! Elite Monster Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 для боевого AI элитного монстра.
//!
//! Два слоя:
//! - ядро (engine-agnostic): `ai::elite`, `ai::schedule`, `ai::patrol`,
//!   `ai::ports`, `combat::knockback`: чистые данные + trait порты
//! - ECS host: системы в FixedUpdate, которые подставляют порты и
//!   превращают результаты тика в события

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;

// Re-export базовых типов для удобства
pub use ai::{
    elite_bundle, spawn_elite, spawn_elite_in_world, AIPlugin, AnimationTriggered, EliteMonster, EliteState,
    GameState, TickOutcome,
};
pub use combat::{
    CombatPlugin, DamageDealt, DamageRequest, EntityDied, Explosion, GoldPickup, KnockbackController,
    LootDropRequested, PlayerHit,
};
pub use components::*;
pub use config::{ConfigError, EliteConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Частота FixedUpdate (simulation tick)
pub const SIMULATION_HZ: f64 = 60.0;

/// Фазы одного simulation tick (FixedUpdate, строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Внешний урон: взрывы → DamageRequest
    Impacts,
    /// Урон по монстрам + тик FSM
    Ai,
    /// Knockback + навигация
    Movement,
    /// Урон по игроку, лут
    Consequences,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed мог быть задан create_headless_app: не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .init_resource::<GameFlow>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Impacts,
                    SimulationSet::Ai,
                    SimulationSet::Movement,
                    SimulationSet::Consequences,
                )
                    .chain(),
            )
            // Подсистемы
            .add_plugins((CombatPlugin, AIPlugin));
    }
}

/// Глобальный gate AI: монстры думают только в `GameState::Playing`
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameFlow {
    pub state: GameState,
}

impl GameFlow {
    pub fn playing() -> Self {
        Self {
            state: GameState::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
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
/// Время двигается ручным шагом 1/60 сек на каждый `app.update()`,
/// так что результат не зависит от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ)); // 60Hz FixedUpdate

    app
}

/// Snapshot компонента `T` по всем entity для сравнения детерминизма
///
/// Одна строка `index:generation {T:?}` на entity, в порядке `Entity`.
/// Для `EliteMonster` строка включает state, health, таймеры и очередь
/// continuation'ов, так что расхождение FSM видно сразу.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<(Entity, &T)>();
    let mut rows: Vec<(Entity, String)> = query
        .iter(world)
        .map(|(entity, component)| (entity, format!("{:?}", component)))
        .collect();
    rows.sort_by_key(|(entity, _)| *entity);

    rows.into_iter()
        .flat_map(|(entity, row)| {
            format!("{}:{} {}\n", entity.index(), entity.generation(), row).into_bytes()
        })
        .collect()
}
