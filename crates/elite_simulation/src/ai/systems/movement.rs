//! AI movement systems.

use bevy::prelude::*;

use crate::components::NavigationAgent;
use crate::GameFlow;

/// Система: headless NavigationAgent → Transform
///
/// Двигает юнит к destination, которую FSM выставил в Trace/Comeback.
/// Приостановленные агенты (Hit/Death) стоят на месте.
pub fn steer_navigation_agents(
    mut agents: Query<(&mut NavigationAgent, &mut Transform)>,
    flow: Res<GameFlow>,
    time: Res<Time<Fixed>>,
) {
    if !flow.is_playing() {
        return;
    }

    let delta = time.delta_secs();

    for (mut agent, mut transform) in agents.iter_mut() {
        let displacement = agent.step(transform.translation, delta);
        if displacement != Vec3::ZERO {
            transform.translation += displacement;
        }
    }
}
