//! Loot drop: золото после смерти элитного монстра
//!
//! FSM отдаёт только (count, position, value_per_item). Здесь монеты
//! становятся entity с начальным импульсом разлёта. Физику монет и
//! подбор игроком симуляция не моделирует.

use bevy::prelude::*;
use rand::{Rng, RngCore};

use crate::DeterministicRng;

/// Горизонтальная сила разлёта монеты
pub const GOLD_DROP_FORCE: f32 = 3.0;
/// Вертикальный подброс монеты
pub const GOLD_DROP_UP_FORCE: f32 = 4.0;

/// Запрос на выпадение лута (из death sequence)
#[derive(Event, Debug, Clone, Copy)]
pub struct LootDropRequested {
    pub source: Entity,
    pub count: u32,
    pub position: Vec3,
    pub value_per_item: u32,
}

/// Монета золота на земле
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct GoldPickup {
    pub amount: u32,
    /// Импульс при выпадении (случайное горизонтальное направление + подброс)
    pub launch_impulse: Vec3,
}

/// Случайный импульс разлёта из seeded RNG
pub fn scatter_impulse(rng: &mut dyn RngCore) -> Vec3 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let horizontal = Vec3::new(angle.cos(), 0.0, angle.sin()) * GOLD_DROP_FORCE;
    horizontal + Vec3::Y * GOLD_DROP_UP_FORCE
}

/// Система: LootDropRequested → GoldPickup entities
pub fn spawn_loot(
    mut commands: Commands,
    mut requests: EventReader<LootDropRequested>,
    mut rng: ResMut<DeterministicRng>,
) {
    for request in requests.read() {
        for _ in 0..request.count {
            let launch_impulse = scatter_impulse(&mut rng.rng);
            commands.spawn((
                GoldPickup {
                    amount: request.value_per_item,
                    launch_impulse,
                },
                Transform::from_translation(request.position),
            ));
        }

        crate::log_info(&format!(
            "Loot from {:?}: {} gold x{} at {:?}",
            request.source, request.count, request.value_per_item, request.position
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scatter_impulse_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..32 {
            let impulse = scatter_impulse(&mut rng);
            let horizontal = Vec3::new(impulse.x, 0.0, impulse.z).length();

            assert!((horizontal - GOLD_DROP_FORCE).abs() < 1e-4);
            assert_eq!(impulse.y, GOLD_DROP_UP_FORCE);
        }
    }

    #[test]
    fn test_scatter_is_seeded() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);

        assert_eq!(scatter_impulse(&mut a), scatter_impulse(&mut b));
    }
}
