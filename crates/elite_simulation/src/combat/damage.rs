//! Damage events и урон по игроку.

use bevy::prelude::*;

use crate::ai::components::GameState;
use crate::components::{Health, Player};
use crate::GameFlow;

/// Запрос урона по элитному монстру (снаряд, взрыв, удар игрока)
///
/// Обрабатывается `ai::systems::apply_damage_requests` до тика FSM.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
    /// Позиция атакующего (направление knockback'а)
    pub attacker_position: Vec3,
}

/// Событие: урон обработан
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    pub target: Entity,
    pub amount: f32,
    /// false: цель уже была мертва, урон отклонён
    pub accepted: bool,
    pub killed: bool,
}

/// Событие: entity умер (health <= 0)
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDied {
    pub entity: Entity,
}

/// Событие: монстр ударил игрока (charge, heavy attack, обычная атака)
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerHit {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
}

/// Система: применить PlayerHit к здоровью игрока
///
/// Смерть игрока переключает GameFlow в GameOver (AI замирает).
pub fn apply_player_damage(
    mut hits: EventReader<PlayerHit>,
    mut players: Query<&mut Health, With<Player>>,
    mut flow: ResMut<GameFlow>,
) {
    for hit in hits.read() {
        let Ok(mut health) = players.get_mut(hit.target) else {
            crate::log_warning(&format!(
                "PlayerHit for {:?} dropped: not a player",
                hit.target
            ));
            continue;
        };

        if !health.is_alive() {
            continue;
        }

        health.take_damage(hit.amount);
        crate::log_info(&format!(
            "Player {:?} took {} damage from {:?} ({}/{})",
            hit.target, hit.amount, hit.source, health.current, health.max
        ));

        if !health.is_alive() && flow.state != GameState::GameOver {
            flow.state = GameState::GameOver;
            crate::log_info("Player died → GameOver");
        }
    }
}
