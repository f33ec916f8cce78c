//! Конфигурация элитного монстра (RON data files)
//!
//! Все поля имеют defaults, поэтому RON файл может переопределять
//! только то, что отличается от базового юнита.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Ошибки загрузки/валидации конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Параметры элитного монстра
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EliteConfig {
    pub max_health: f32,

    /// Радиус обнаружения игрока (метры)
    pub detect_distance: f32,
    /// Радиус обычной атаки (метры)
    pub attack_distance: f32,
    /// Скорость NavigationAgent при Trace/Comeback
    pub move_speed: f32,
    /// Период между обычными атаками (секунды)
    pub attack_period: f32,
    pub attack_damage: f32,

    /// Время предупреждения в Detect перед рывком
    pub detect_warning_time: f32,
    /// Коэффициент сглаживания поворота к игроку (× delta)
    pub turn_smoothing: f32,

    pub charge_speed: f32,
    /// Максимальная дистанция рывка
    pub charge_distance: f32,
    pub charge_damage: f32,

    pub heavy_attack_range: f32,
    pub heavy_attack_damage: f32,
    pub heavy_attack_cooldown: f32,
    /// Задержка HeavyAttack → Trace
    pub heavy_attack_wind_down: f32,

    /// Длительность Hit (stagger)
    pub hit_stagger: f32,
    /// Длительность death анимации до лута и деспавна
    pub death_duration: f32,

    pub patrol: PatrolConfig,
    pub knockback: KnockbackConfig,
    pub loot: LootConfig,
}

impl Default for EliteConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            detect_distance: 7.5,
            attack_distance: 3.5,
            move_speed: 4.0,
            attack_period: 3.0,
            attack_damage: 30.0,
            detect_warning_time: 2.0,
            turn_smoothing: 5.0,
            charge_speed: 8.0,
            charge_distance: 15.0,
            charge_damage: 20.0,
            heavy_attack_range: 5.0,
            heavy_attack_damage: 20.0,
            heavy_attack_cooldown: 6.0,
            heavy_attack_wind_down: 1.5,
            hit_stagger: 0.3,
            death_duration: 3.0,
            patrol: PatrolConfig::default(),
            knockback: KnockbackConfig::default(),
            loot: LootConfig::default(),
        }
    }
}

/// Параметры патруля
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    pub enabled: bool,
    /// Желаемое число точек (обрезается до размера каталога)
    pub point_count: usize,
    pub radius: f32,
    pub wait_time: f32,
    pub speed: f32,
    /// Дистанция "прибыл" для patrol точек и origin
    pub arrival_epsilon: f32,
    /// Множитель радиуса для осевых offset'ов каталога
    pub near_axis_scale: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            point_count: 5,
            radius: 8.0,
            wait_time: 3.0,
            speed: 2.0,
            arrival_epsilon: 0.5,
            near_axis_scale: 1.5,
        }
    }
}

/// Параметры отбрасывания
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KnockbackConfig {
    pub force: f32,
    pub duration: f32,
}

impl Default for KnockbackConfig {
    fn default() -> Self {
        Self {
            force: 2.5,
            duration: 0.3,
        }
    }
}

/// Параметры выпадения золота
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LootConfig {
    pub min_count: u32,
    /// Включительно
    pub max_count: u32,
    pub value_per_item: u32,
    /// Смещение точки выпадения вверх от позиции юнита
    pub drop_height: f32,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            min_count: 10,
            max_count: 20,
            value_per_item: 10,
            drop_height: 1.0,
        }
    }
}

impl EliteConfig {
    /// Парсит и валидирует RON строку
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: EliteConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Загружает конфиг из RON файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Проверяет инварианты конфига.
    ///
    /// Patrol с нулём точек: валиден (юнит просто уйдёт в Idle).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_health > 0.0) {
            return Err(invalid("max_health", "must be greater than zero"));
        }

        let non_negative = [
            ("detect_distance", self.detect_distance),
            ("attack_distance", self.attack_distance),
            ("move_speed", self.move_speed),
            ("attack_period", self.attack_period),
            ("attack_damage", self.attack_damage),
            ("detect_warning_time", self.detect_warning_time),
            ("turn_smoothing", self.turn_smoothing),
            ("charge_speed", self.charge_speed),
            ("charge_distance", self.charge_distance),
            ("charge_damage", self.charge_damage),
            ("heavy_attack_range", self.heavy_attack_range),
            ("heavy_attack_damage", self.heavy_attack_damage),
            ("heavy_attack_cooldown", self.heavy_attack_cooldown),
            ("heavy_attack_wind_down", self.heavy_attack_wind_down),
            ("hit_stagger", self.hit_stagger),
            ("death_duration", self.death_duration),
            ("patrol.radius", self.patrol.radius),
            ("patrol.wait_time", self.patrol.wait_time),
            ("patrol.speed", self.patrol.speed),
            ("patrol.arrival_epsilon", self.patrol.arrival_epsilon),
            ("patrol.near_axis_scale", self.patrol.near_axis_scale),
            ("knockback.force", self.knockback.force),
            ("knockback.duration", self.knockback.duration),
            ("loot.drop_height", self.loot.drop_height),
        ];
        for (field, value) in non_negative {
            // NaN тоже отклоняем
            if !(value >= 0.0) {
                return Err(invalid(field, format!("must be non-negative, got {}", value)));
            }
        }

        // Нулевой радиус или масштаб осей схлопывает каталог в дубликаты
        if self.patrol.enabled {
            for (field, value) in [
                ("patrol.radius", self.patrol.radius),
                ("patrol.near_axis_scale", self.patrol.near_axis_scale),
            ] {
                if value <= 0.0 {
                    return Err(invalid(field, "must be greater than zero while patrol is enabled"));
                }
            }
        }

        if self.loot.min_count > self.loot.max_count {
            return Err(invalid(
                "loot.min_count",
                format!(
                    "min_count ({}) exceeds max_count ({})",
                    self.loot.min_count, self.loot.max_count
                ),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
