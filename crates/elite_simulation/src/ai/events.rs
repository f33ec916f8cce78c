//! AI Events: выходные события элитных монстров
//!
//! FSM пишет триггеры в буфер, ECS-слой превращает их в события
//! для внешнего аниматора (health bar, VFX, звук).

use bevy::prelude::*;

/// Animation триггер от элитного монстра (fire-and-forget)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTriggered {
    pub entity: Entity,
    /// Имя триггера (см. `ai::ports::triggers`)
    pub trigger: &'static str,
}
