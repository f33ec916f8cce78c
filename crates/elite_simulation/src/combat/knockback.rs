//! Knockback controller: короткий импульс отбрасывания от атакующего
//!
//! Живёт рядом с FSM (sibling component), а не внутри неё:
//! двигает только позицию и никогда не трогает state.

use bevy::prelude::*;

use crate::ai::ports::{Locomotion, TransformBody};
use crate::config::KnockbackConfig;
use crate::GameFlow;

/// Импульс отбрасывания
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct KnockbackController {
    /// Сила (метры/сек)
    pub force: f32,
    /// Длительность импульса (секунды)
    pub duration: f32,
    /// Нормализованное направление unit - attacker
    direction: Vec3,
    /// Оставшееся время (секунды), > 0 пока активен
    remaining: f32,
}

impl Default for KnockbackController {
    fn default() -> Self {
        Self::from_config(&KnockbackConfig::default())
    }
}

impl KnockbackController {
    pub fn from_config(config: &KnockbackConfig) -> Self {
        Self {
            force: config.force,
            duration: config.duration,
            direction: Vec3::ZERO,
            remaining: 0.0,
        }
    }

    /// Взвести импульс: направление от атакующего к юниту.
    ///
    /// Совпадающие позиции дают нулевое направление (импульс без смещения).
    pub fn apply_knockback(&mut self, unit_position: Vec3, attacker_position: Vec3) {
        self.direction = (unit_position - attacker_position).normalize_or_zero();
        self.remaining = self.duration;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Один тик: смещение direction × force × delta, пока таймер > 0.
    ///
    /// Возвращает применённое смещение.
    pub fn tick(&mut self, body: &mut dyn Locomotion, delta: f32) -> Vec3 {
        if !self.is_active() {
            return Vec3::ZERO;
        }

        self.remaining = (self.remaining - delta).max(0.0);
        let displacement = self.direction * self.force * delta;
        body.move_by(displacement);
        displacement
    }
}

/// System: тик всех активных knockback импульсов
pub fn tick_knockback(
    mut query: Query<(&mut KnockbackController, &mut Transform)>,
    flow: Res<GameFlow>,
    time: Res<Time<Fixed>>,
) {
    if !flow.is_playing() {
        return;
    }

    let delta = time.delta_secs();

    for (mut knockback, mut transform) in query.iter_mut() {
        if !knockback.is_active() {
            continue;
        }
        knockback.tick(&mut TransformBody(&mut *transform), delta);
    }
}
