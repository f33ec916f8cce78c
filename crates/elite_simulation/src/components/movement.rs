//! Movement компоненты: headless NavigationAgent
//!
//! Заменяет NavMesh agent в headless симуляции: прямой seek к цели
//! без pathfinding. FSM отдаёт ему только destination, двигает юнит
//! система `steer_navigation_agents`.

use bevy::prelude::*;

use crate::ai::ports::Navigation;

/// Навигационный агент (straight-line seek)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct NavigationAgent {
    /// Скорость движения (метры/сек)
    pub speed: f32,
    /// Дистанция, на которой цель считается достигнутой
    pub stopping_distance: f32,
    /// Текущая цель (None = стоим)
    pub destination: Option<Vec3>,
    /// true пока юнит в Hit/Death (автономное движение запрещено)
    pub suspended: bool,
    /// Стоит ли юнит на проходимой поверхности
    pub on_navigable_surface: bool,
    arrived: bool,
}

impl Default for NavigationAgent {
    fn default() -> Self {
        Self {
            speed: 4.0,
            stopping_distance: 0.1,
            destination: None,
            suspended: false,
            on_navigable_surface: true,
            arrived: false,
        }
    }
}

impl NavigationAgent {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    /// Один шаг seek'а: смещение к destination, не перелетая цель.
    ///
    /// Возвращает Vec3::ZERO если агент стоит, приостановлен или уже на месте.
    pub fn step(&mut self, position: Vec3, delta: f32) -> Vec3 {
        if self.suspended {
            return Vec3::ZERO;
        }
        let Some(destination) = self.destination else {
            return Vec3::ZERO;
        };

        let to_target = destination - position;
        let distance = to_target.length();
        if distance <= self.stopping_distance {
            self.arrived = true;
            return Vec3::ZERO;
        }

        let travel = (self.speed * delta).min(distance);
        if travel >= distance - self.stopping_distance {
            self.arrived = true;
        }
        to_target.normalize_or_zero() * travel
    }
}

impl Navigation for NavigationAgent {
    fn navigate_to(&mut self, point: Vec3) {
        if self.destination != Some(point) {
            self.arrived = false;
        }
        self.destination = Some(point);
    }

    fn stop(&mut self) {
        self.destination = None;
        self.arrived = false;
    }

    fn suspend(&mut self) {
        self.suspended = true;
        self.stop();
    }

    fn resume(&mut self) {
        self.suspended = false;
    }

    fn has_arrived(&self) -> bool {
        self.arrived
    }

    fn is_on_navigable_surface(&self) -> bool {
        self.on_navigable_surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_toward_destination() {
        let mut agent = NavigationAgent::new(4.0);
        agent.navigate_to(Vec3::new(10.0, 0.0, 0.0));

        let displacement = agent.step(Vec3::ZERO, 0.5);
        assert_eq!(displacement, Vec3::new(2.0, 0.0, 0.0));
        assert!(!agent.has_arrived());
    }

    #[test]
    fn test_step_does_not_overshoot() {
        let mut agent = NavigationAgent::new(4.0);
        agent.navigate_to(Vec3::new(1.0, 0.0, 0.0));

        let displacement = agent.step(Vec3::ZERO, 1.0);
        assert_eq!(displacement, Vec3::new(1.0, 0.0, 0.0));
        assert!(agent.has_arrived());
    }

    #[test]
    fn test_suspend_clears_path_and_blocks_movement() {
        let mut agent = NavigationAgent::new(4.0);
        agent.navigate_to(Vec3::new(10.0, 0.0, 0.0));
        agent.suspend();

        assert_eq!(agent.destination, None);
        agent.navigate_to(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(agent.step(Vec3::ZERO, 1.0), Vec3::ZERO);

        agent.resume();
        assert_ne!(agent.step(Vec3::ZERO, 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_new_destination_resets_arrival() {
        let mut agent = NavigationAgent::new(4.0);
        agent.navigate_to(Vec3::X * 0.05);
        agent.step(Vec3::ZERO, 0.1);
        assert!(agent.has_arrived());

        agent.navigate_to(Vec3::X * 5.0);
        assert!(!agent.has_arrived());
    }
}
