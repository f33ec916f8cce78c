//! AI decision-making module
//!
//! EliteMonster: engine-agnostic FSM (ядро) + ECS-слой, который
//! подставляет ему порты и переводит результаты тика в события.

use bevy::prelude::*;

pub mod components;
pub mod elite;
pub mod events;
pub mod patrol;
pub mod ports;
pub mod schedule;
pub mod systems;


// Re-export основных типов
pub use components::{EliteState, GameState};
pub use elite::{EliteMonster, TickOutcome};
pub use events::AnimationTriggered;
pub use patrol::PatrolRoute;
pub use systems::{elite_bundle, spawn_elite, spawn_elite_in_world};

use crate::components::NavigationAgent;
use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. apply_damage_requests: DamageRequest → Hit/Death (SimulationSet::Ai)
/// 2. drive_elite_monsters: тик FSM (SimulationSet::Ai)
/// 3. steer_navigation_agents: движение по навигации (SimulationSet::Movement, после knockback)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationTriggered>()
            .register_type::<NavigationAgent>();

        app.add_systems(
            FixedUpdate,
            (systems::apply_damage_requests, systems::drive_elite_monsters)
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Ai),
        )
        .add_systems(
            FixedUpdate,
            systems::steer_navigation_agents
                .in_set(SimulationSet::Movement)
                .after(crate::combat::tick_knockback),
        );
    }
}
