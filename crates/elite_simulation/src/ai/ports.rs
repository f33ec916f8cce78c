//! Порты элитного монстра (capabilities, которые юнит потребляет)
//!
//! Ядро FSM не знает про ECS: всё, что оно трогает снаружи, приходит
//! через эти traits. ECS-слой (`ai::systems`) и тесты подставляют
//! свои реализации.

use bevy::prelude::*;
use rand::RngCore;

use crate::combat::KnockbackController;

/// Pathfinding порт (NavMesh agent)
pub trait Navigation {
    /// Задать цель; агент ведёт юнит к ней несколько тиков
    fn navigate_to(&mut self, point: Vec3);
    /// Сбросить текущий путь
    fn stop(&mut self);
    /// Приостановить автономную навигацию (Hit/Death) и сбросить путь
    fn suspend(&mut self);
    fn resume(&mut self);
    fn has_arrived(&self) -> bool;
    fn is_on_navigable_surface(&self) -> bool;
}

/// Raw locomotion порт (CharacterController.Move аналог)
pub trait Locomotion {
    fn position(&self) -> Vec3;
    fn move_by(&mut self, displacement: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
}

/// Animation sink: fire-and-forget триггеры
pub trait AnimationSink {
    fn play_trigger(&mut self, trigger: &'static str);
}

/// Противник (игрок): позиция только на чтение, урон: вызовом
pub trait PlayerTarget {
    fn position(&self) -> Vec3;
    fn apply_damage(&mut self, amount: f32);
}

/// Loot drop: спавн `count` золотых монет в точке
pub trait LootSpawner {
    fn spawn(&mut self, count: u32, position: Vec3, value_per_item: u32);
}

/// Порты самого юнита (тело, навигация, аниматор, отбрасывание).
///
/// Все поля обязательны: юнит без коллаборатора собрать нельзя.
pub struct EliteContext<'a> {
    pub body: &'a mut dyn Locomotion,
    pub navigation: &'a mut dyn Navigation,
    pub animator: &'a mut dyn AnimationSink,
    pub knockback: &'a mut KnockbackController,
}

/// Окружение юнита на время одного тика: игрок, лут, RNG.
pub struct Surroundings<'a> {
    pub player: &'a mut dyn PlayerTarget,
    pub loot: &'a mut dyn LootSpawner,
    pub rng: &'a mut dyn RngCore,
}

/// Буфер триггеров (ECS-слой сбрасывает его в события, тесты: проверяют)
impl AnimationSink for Vec<&'static str> {
    fn play_trigger(&mut self, trigger: &'static str) {
        self.push(trigger);
    }
}

/// Один запрос на выпадение лута
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootDrop {
    pub count: u32,
    pub position: Vec3,
    pub value_per_item: u32,
}

impl LootSpawner for Vec<LootDrop> {
    fn spawn(&mut self, count: u32, position: Vec3, value_per_item: u32) {
        self.push(LootDrop {
            count,
            position,
            value_per_item,
        });
    }
}

/// Снимок игрока на один тик: позиция + накопленный урон.
#[derive(Debug, Clone, Default)]
pub struct PlayerProxy {
    pub position: Vec3,
    pub damage_taken: Vec<f32>,
}

impl PlayerProxy {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            damage_taken: Vec::new(),
        }
    }
}

impl PlayerTarget for PlayerProxy {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn apply_damage(&mut self, amount: f32) {
        self.damage_taken.push(amount);
    }
}

/// Locomotion поверх Bevy Transform
pub struct TransformBody<'a>(pub &'a mut Transform);

impl Locomotion for TransformBody<'_> {
    fn position(&self) -> Vec3 {
        self.0.translation
    }

    fn move_by(&mut self, displacement: Vec3) {
        self.0.translation += displacement;
    }

    fn rotation(&self) -> Quat {
        self.0.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.0.rotation = rotation;
    }
}

/// Имена animation триггеров
pub mod triggers {
    pub const IDLE: &str = "Idle";
    pub const IDLE_TO_DETECT: &str = "IdleToDetect";
    pub const PATROL_TO_DETECT: &str = "PatrolToDetect";
    pub const DETECT_TO_IDLE: &str = "DetectToIdle";
    pub const DETECT_TO_CHARGE: &str = "DetectToCharge";
    pub const CHARGE_TO_ATTACK: &str = "ChargeToAttack";
    pub const CHARGE_TO_TRACE: &str = "ChargeToTrace";
    pub const TRACE_TO_ATTACK: &str = "TraceToAttack";
    pub const TRACE_TO_HEAVY_ATTACK: &str = "TraceToHeavyAttack";
    pub const TRACE_TO_COMEBACK: &str = "TraceToComeback";
    pub const ATTACK_TO_TRACE: &str = "AttackToTrace";
    pub const COMEBACK_TO_DETECT: &str = "ComebackToDetect";
    pub const ATTACK: &str = "Attack";
    pub const HEAVY_ATTACK: &str = "HeavyAttack";
    pub const HIT: &str = "Hit";
    pub const DEATH: &str = "Death";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_body_moves_translation() {
        let mut transform = Transform::from_xyz(1.0, 0.0, 0.0);
        let mut body = TransformBody(&mut transform);

        body.move_by(Vec3::new(0.5, 0.0, -1.0));
        assert_eq!(body.position(), Vec3::new(1.5, 0.0, -1.0));

        body.set_rotation(Quat::from_rotation_y(1.0));
        assert_eq!(transform.rotation, Quat::from_rotation_y(1.0));
    }

    #[test]
    fn test_player_proxy_records_damage() {
        let mut player = PlayerProxy::new(Vec3::X);
        player.apply_damage(20.0);
        player.apply_damage(30.0);

        assert_eq!(player.position(), Vec3::X);
        assert_eq!(player.damage_taken, vec![20.0, 30.0]);
    }

    #[test]
    fn test_buffers_collect_calls() {
        let mut sink: Vec<&'static str> = Vec::new();
        sink.play_trigger(triggers::HIT);
        assert_eq!(sink, vec!["Hit"]);

        let mut drops: Vec<LootDrop> = Vec::new();
        drops.spawn(12, Vec3::Y, 10);
        assert_eq!(drops[0].count, 12);
        assert_eq!(drops[0].value_per_item, 10);
    }
}
