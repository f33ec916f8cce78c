//! Headless симуляция элитного монстра
//!
//! Запускает Bevy App без рендера: игрок подходит к монстру, переживает
//! рывок, отвечает уроном и добивает монстра взрывом.

use bevy::prelude::*;
use elite_simulation::{
    create_headless_app, log_info, log_warning, spawn_elite_in_world, DamageRequest, EliteConfig, EliteMonster,
    Explosion, GameFlow, GoldPickup, Health, Player, SimulationPlugin,
};

const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/data/elite_monster.ron");

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin).insert_resource(GameFlow::playing());

    log_info(&format!("Starting elite monster headless simulation (seed: {})", seed));

    let config = match EliteConfig::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            log_warning(&format!("{}; using built-in defaults", err));
            EliteConfig::default()
        }
    };

    let elite = match spawn_elite_in_world(app.world_mut(), config, Vec3::ZERO) {
        Ok(entity) => entity,
        Err(err) => {
            log_warning(&format!("Failed to spawn elite: {}", err));
            return;
        }
    };

    let player = app
        .world_mut()
        .spawn((Player, Health::new(300.0), Transform::from_xyz(0.0, 0.0, 20.0)))
        .id();

    for tick in 0..1200u32 {
        match tick {
            // Игрок входит в detect радиус
            120 => set_player_position(&mut app, player, Vec3::new(0.0, 0.0, 6.0)),
            // Два удара мечом
            400 | 420 => {
                let position = player_position(&mut app, player);
                app.world_mut().send_event(DamageRequest {
                    target: elite,
                    amount: 25.0,
                    attacker_position: position,
                });
            }
            // Граната под ногами монстра
            600 => {
                let position = elite_position(&mut app, elite).unwrap_or(Vec3::ZERO);
                app.world_mut().send_event(Explosion {
                    position: position + Vec3::X,
                    radius: 4.0,
                    damage: 80.0,
                });
            }
            _ => {}
        }

        app.update();

        if tick % 100 == 0 {
            let state = app
                .world()
                .get::<EliteMonster>(elite)
                .map(|monster| format!("{:?} hp={}", monster.state(), monster.health().current))
                .unwrap_or_else(|| "removed".to_string());
            log_info(&format!("Tick {}: elite {}", tick, state));
        }
    }

    let gold: u32 = app
        .world_mut()
        .query::<&GoldPickup>()
        .iter(app.world())
        .map(|pickup| pickup.amount)
        .sum();
    log_info(&format!("Simulation complete! Gold on the ground: {}", gold));
}

fn set_player_position(app: &mut App, player: Entity, position: Vec3) {
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
        transform.translation = position;
    }
}

fn player_position(app: &mut App, player: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(player)
        .map(|transform| transform.translation)
        .unwrap_or(Vec3::ZERO)
}

fn elite_position(app: &mut App, elite: Entity) -> Option<Vec3> {
    app.world().get::<Transform>(elite).map(|transform| transform.translation)
}
