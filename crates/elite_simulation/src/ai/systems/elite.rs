//! Elite monster ECS systems: урон, тик FSM, спавн.
//!
//! Адаптеры портов: Transform → Locomotion, NavigationAgent → Navigation,
//! Vec буферы → AnimationSink/LootSpawner, PlayerProxy → PlayerTarget.
//! Всё, что накопилось в буферах за тик, уходит в Bevy events.

use bevy::prelude::*;
use rand::RngCore;

use crate::ai::components::EliteState;
use crate::ai::elite::{EliteMonster, TickOutcome};
use crate::ai::events::AnimationTriggered;
use crate::ai::ports::{triggers, EliteContext, LootDrop, PlayerProxy, Surroundings, TransformBody};
use crate::combat::{DamageDealt, DamageRequest, EntityDied, KnockbackController, LootDropRequested, PlayerHit};
use crate::components::{NavigationAgent, Player};
use crate::config::{ConfigError, EliteConfig};
use crate::{DeterministicRng, GameFlow};

type EliteParts = (
    &'static mut EliteMonster,
    &'static mut Transform,
    &'static mut NavigationAgent,
    &'static mut KnockbackController,
);

/// Собрать компоненты элитного монстра.
///
/// NavigationAgent и KnockbackController получают параметры из конфига
/// (иначе Required Components подставили бы defaults).
pub fn elite_bundle(
    config: EliteConfig,
    origin: Vec3,
    rng: &mut dyn RngCore,
) -> Result<(EliteMonster, Transform, NavigationAgent, KnockbackController), ConfigError> {
    let navigation = NavigationAgent::new(config.move_speed);
    let knockback = KnockbackController::from_config(&config.knockback);
    let monster = EliteMonster::spawn(config, origin, rng)?;

    Ok((monster, Transform::from_translation(origin), navigation, knockback))
}

/// Заспавнить элитного монстра через Commands
pub fn spawn_elite(
    commands: &mut Commands,
    config: EliteConfig,
    origin: Vec3,
    rng: &mut dyn RngCore,
) -> Result<Entity, ConfigError> {
    let bundle = elite_bundle(config, origin, rng)?;
    Ok(commands.spawn(bundle).id())
}

/// Заспавнить элитного монстра напрямую в World (RNG из DeterministicRng)
pub fn spawn_elite_in_world(world: &mut World, config: EliteConfig, origin: Vec3) -> Result<Entity, ConfigError> {
    let bundle = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        elite_bundle(config, origin, &mut rng.rng)?
    };
    Ok(world.spawn(bundle).id())
}

/// Система: DamageRequest → EliteMonster::apply_damage
///
/// Работает и на паузе: урон: внешний вызов, не часть тика.
pub fn apply_damage_requests(
    mut requests: EventReader<DamageRequest>,
    mut elites: Query<EliteParts>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
    mut animations: EventWriter<AnimationTriggered>,
) {
    for request in requests.read() {
        let Ok((mut monster, mut transform, mut navigation, mut knockback)) = elites.get_mut(request.target) else {
            crate::log_warning(&format!(
                "DamageRequest for {:?} dropped: not an elite monster",
                request.target
            ));
            continue;
        };

        let mut fired: Vec<&'static str> = Vec::new();
        let accepted = {
            let mut body = TransformBody(&mut *transform);
            let mut ctx = EliteContext {
                body: &mut body,
                navigation: &mut *navigation,
                animator: &mut fired,
                knockback: &mut *knockback,
            };
            monster.apply_damage(&mut ctx, request.amount, request.attacker_position)
        };

        let killed = accepted && monster.state() == EliteState::Death;

        for trigger in fired {
            animations.write(AnimationTriggered {
                entity: request.target,
                trigger,
            });
        }

        dealt.write(DamageDealt {
            target: request.target,
            amount: request.amount,
            accepted,
            killed,
        });

        if killed {
            died.write(EntityDied {
                entity: request.target,
            });
        }
    }
}

/// Система: один тик FSM для каждого элитного монстра
///
/// Порядок обхода: по Entity (общий RNG должен расходоваться детерминированно).
pub fn drive_elite_monsters(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    flow: Res<GameFlow>,
    mut rng: ResMut<DeterministicRng>,
    mut elites: Query<(Entity, EliteParts), Without<Player>>,
    players: Query<(Entity, &Transform), (With<Player>, Without<EliteMonster>)>,
    mut animations: EventWriter<AnimationTriggered>,
    mut player_hits: EventWriter<PlayerHit>,
    mut loot_requests: EventWriter<LootDropRequested>,
) {
    let Ok((player_entity, player_transform)) = players.single() else {
        return;
    };
    let player_position = player_transform.translation;
    let delta = time.delta_secs();

    let mut order: Vec<Entity> = elites.iter().map(|(entity, _)| entity).collect();
    order.sort();

    for entity in order {
        let Ok((_, (mut monster, mut transform, mut navigation, mut knockback))) = elites.get_mut(entity) else {
            continue;
        };

        let mut fired: Vec<&'static str> = Vec::new();
        let mut drops: Vec<LootDrop> = Vec::new();
        let mut player = PlayerProxy::new(player_position);

        let outcome = {
            let mut body = TransformBody(&mut *transform);
            let mut ctx = EliteContext {
                body: &mut body,
                navigation: &mut *navigation,
                animator: &mut fired,
                knockback: &mut *knockback,
            };
            let mut world = Surroundings {
                player: &mut player,
                loot: &mut drops,
                rng: &mut rng.rng,
            };
            monster.tick(&mut ctx, &mut world, delta, flow.state)
        };

        // Headless аниматор: attack-событие клипа срабатывает сразу
        if fired.contains(&triggers::ATTACK) {
            monster.on_attack_event(&mut player);
        }

        for trigger in fired {
            animations.write(AnimationTriggered { entity, trigger });
        }

        for amount in player.damage_taken {
            player_hits.write(PlayerHit {
                source: entity,
                target: player_entity,
                amount,
            });
        }

        for drop in drops {
            loot_requests.write(LootDropRequested {
                source: entity,
                count: drop.count,
                position: drop.position,
                value_per_item: drop.value_per_item,
            });
        }

        if outcome == TickOutcome::Removed {
            commands.entity(entity).despawn();
            crate::log_info(&format!("[elite] {:?} removed from simulation", entity));
        }
    }
}
