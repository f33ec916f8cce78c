//! AI systems (ECS host для EliteMonster)

pub mod elite;
pub mod movement;

// Re-export all systems
pub use elite::*;
pub use movement::*;
