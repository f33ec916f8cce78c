//! Explosion splash damage
//!
//! Overlap query по сфере: каждый элитный монстр в радиусе получает
//! DamageRequest с ослаблением по дистанции.

use bevy::prelude::*;

use crate::ai::EliteMonster;
use crate::combat::DamageRequest;

/// Взрыв в точке (гранаты, бочки)
#[derive(Event, Debug, Clone, Copy)]
pub struct Explosion {
    pub position: Vec3,
    pub radius: f32,
    pub damage: f32,
}

/// Урон с falloff: damage / max(1, distance)
///
/// Внутри одного метра урон полный.
pub fn splash_damage(damage: f32, distance: f32) -> f32 {
    damage / distance.max(1.0)
}

/// Система: взрывы → DamageRequest для юнитов в радиусе
///
/// Мёртвые юниты тоже получают запрос, `apply_damage` вернёт false
/// и он будет проигнорирован.
pub fn resolve_explosions(
    mut explosions: EventReader<Explosion>,
    elites: Query<(Entity, &Transform), With<EliteMonster>>,
    mut requests: EventWriter<DamageRequest>,
) {
    for explosion in explosions.read() {
        // Сортируем по Entity для детерминированного порядка
        let mut hit: Vec<(Entity, f32)> = elites
            .iter()
            .filter_map(|(entity, transform)| {
                let distance = transform.translation.distance(explosion.position);
                (distance <= explosion.radius).then_some((entity, distance))
            })
            .collect();
        hit.sort_by_key(|(entity, _)| *entity);

        for (entity, distance) in hit {
            requests.write(DamageRequest {
                target: entity,
                amount: splash_damage(explosion.damage, distance),
                attacker_position: explosion.position,
            });
        }

        crate::log(&format!(
            "Explosion at {:?} (r={}) resolved",
            explosion.position, explosion.radius
        ));
    }
}
