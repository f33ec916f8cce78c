//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье и маркер игрока (Health, Player)
//! - movement: headless навигация (NavigationAgent)

pub mod actor;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
