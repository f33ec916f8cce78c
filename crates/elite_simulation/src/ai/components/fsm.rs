//! FSM состояния элитного монстра.

use bevy::prelude::*;

/// Состояния элитного монстра
///
/// Ровно одно активно в каждый момент времени.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EliteState {
    /// Стоит на месте, ждёт игрока
    #[default]
    Idle,
    /// Обходит patrol точки вокруг origin
    Patrol,
    /// Заметил игрока, разворачивается и предупреждает перед рывком
    Detect,
    /// Рывок по зафиксированному направлению
    Charge,
    /// Преследование через навигацию
    Trace,
    /// Обычная атака с периодом
    Attack,
    /// Тяжёлый удар + wind-down
    HeavyAttack,
    /// Stagger после попадания
    Hit,
    /// Возврат к origin
    Comeback,
    /// Терминальное состояние
    Death,
}

impl EliteState {
    pub const ALL: [EliteState; 10] = [
        EliteState::Idle,
        EliteState::Patrol,
        EliteState::Detect,
        EliteState::Charge,
        EliteState::Trace,
        EliteState::Attack,
        EliteState::HeavyAttack,
        EliteState::Hit,
        EliteState::Comeback,
        EliteState::Death,
    ];

    /// Состояние, в которое можно вернуться после Hit
    pub fn is_resumable(&self) -> bool {
        !matches!(self, EliteState::Hit | EliteState::Death)
    }

    /// Состояния, где юнит ведёт NavigationAgent
    pub fn uses_navigation(&self) -> bool {
        matches!(self, EliteState::Trace | EliteState::Comeback)
    }
}

/// Глобальное состояние партии (AI работает только в Playing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum GameState {
    #[default]
    Ready,
    Playing,
    GameOver,
}
