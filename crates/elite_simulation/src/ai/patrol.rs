//! Patrol route: генерация точек патруля вокруг origin
//!
//! Каталог offset'ов фиксирован (центр, 4 диагонали, 4 оси × near_axis_scale).
//! Точки выбираются случайно без повторов, поэтому маршрут никогда не
//! длиннее каталога и не содержит дубликатов.

use bevy::prelude::*;
use rand::{Rng, RngCore};

use crate::config::PatrolConfig;

/// Каталог offset'ов относительно origin (совпадающие offset'ы схлопываются)
pub fn offset_catalogue(radius: f32, near_axis_scale: f32) -> Vec<Vec3> {
    let axis = radius * near_axis_scale;
    let offsets = [
        Vec3::ZERO,
        Vec3::new(radius, 0.0, radius),
        Vec3::new(-radius, 0.0, -radius),
        Vec3::new(radius, 0.0, -radius),
        Vec3::new(-radius, 0.0, radius),
        Vec3::new(axis, 0.0, 0.0),
        Vec3::new(-axis, 0.0, 0.0),
        Vec3::new(0.0, 0.0, axis),
        Vec3::new(0.0, 0.0, -axis),
    ];

    let mut catalogue: Vec<Vec3> = Vec::with_capacity(offsets.len());
    for offset in offsets {
        if !catalogue.contains(&offset) {
            catalogue.push(offset);
        }
    }
    catalogue
}

/// Маршрут патруля с циклическим индексом
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatrolRoute {
    points: Vec<Vec3>,
    current: usize,
}

impl PatrolRoute {
    /// Генерирует маршрут из `count` случайных offset'ов каталога (без повторов)
    pub fn generate(origin: Vec3, catalogue: &[Vec3], count: usize, rng: &mut dyn RngCore) -> Self {
        let mut candidates = catalogue.to_vec();
        let mut points = Vec::with_capacity(count.min(candidates.len()));

        while points.len() < count && !candidates.is_empty() {
            let index = rng.gen_range(0..candidates.len());
            points.push(origin + candidates.remove(index));
        }

        Self { points, current: 0 }
    }

    /// Маршрут по PatrolConfig (пустой, если патруль выключен)
    pub fn from_config(origin: Vec3, config: &PatrolConfig, rng: &mut dyn RngCore) -> Self {
        if !config.enabled {
            return Self::default();
        }
        let catalogue = offset_catalogue(config.radius, config.near_axis_scale);
        Self::generate(origin, &catalogue, config.point_count, rng)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_point(&self) -> Option<Vec3> {
        self.points.get(self.current).copied()
    }

    /// Следующая точка (wrap по модулю длины)
    pub fn advance(&mut self) {
        if !self.points.is_empty() {
            self.current = (self.current + 1) % self.points.len();
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}
