//! Combat system module
//!
//! ECS ответственность:
//! - Damage events: DamageRequest → (AI) → DamageDealt, EntityDied
//! - Player damage: PlayerHit → Health → GameOver
//! - Knockback: sibling impulse рядом с FSM
//! - Loot: LootDropRequested → GoldPickup entities
//! - Explosions: splash → DamageRequest

use bevy::prelude::*;

pub mod damage;
pub mod explosion;
pub mod knockback;
pub mod loot;

// Re-export основных типов
pub use damage::{apply_player_damage, DamageDealt, DamageRequest, EntityDied, PlayerHit};
pub use explosion::{resolve_explosions, splash_damage, Explosion};
pub use knockback::{tick_knockback, KnockbackController};
pub use loot::{spawn_loot, GoldPickup, LootDropRequested};

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat события и системы в FixedUpdate.
///
/// Порядок выполнения (через SimulationSet):
/// 1. resolve_explosions: Impacts (до обработки урона)
/// 2. tick_knockback: Movement (после тика FSM)
/// 3. apply_player_damage, spawn_loot: Consequences
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<PlayerHit>()
            .add_event::<LootDropRequested>()
            .add_event::<Explosion>();

        app.register_type::<KnockbackController>()
            .register_type::<GoldPickup>();

        app.add_systems(FixedUpdate, resolve_explosions.in_set(SimulationSet::Impacts))
            .add_systems(FixedUpdate, tick_knockback.in_set(SimulationSet::Movement))
            .add_systems(
                FixedUpdate,
                (apply_player_damage, spawn_loot)
                    .chain() // Последовательное выполнение
                    .in_set(SimulationSet::Consequences),
            );
    }
}
