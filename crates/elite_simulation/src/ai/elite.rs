//! Elite monster: FSM ядро элитного монстра
//!
//! Idle/Patrol → Detect → Charge → Attack/HeavyAttack ⇄ Trace → Comeback
//! Hit и Death приходят только через `apply_damage`.
//!
//! Архитектура:
//! - один вызов `tick(delta)` на шаг симуляции, без глобального scheduler'а
//! - задержки (stagger, wind-down, death): continuation'ы в `Continuations`
//! - все внешние эффекты идут через порты (`EliteContext`, `Surroundings`)

use bevy::prelude::*;
use rand::{Rng, RngCore};

use crate::ai::components::{EliteState, GameState};
use crate::ai::patrol::PatrolRoute;
use crate::ai::ports::{triggers, EliteContext, PlayerTarget, Surroundings};
use crate::ai::schedule::{Continuations, ScheduledAction};
use crate::combat::KnockbackController;
use crate::components::{Health, NavigationAgent};
use crate::config::{ConfigError, EliteConfig};

/// Результат тика
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Юнит продолжает жить в симуляции
    Active,
    /// Death sequence завершён, юнит нужно удалить
    Removed,
}

/// Элитный монстр
///
/// Required Components гарантируют, что рядом всегда есть
/// NavigationAgent и KnockbackController.
#[derive(Component, Debug, Clone)]
#[require(Transform, NavigationAgent, KnockbackController)]
pub struct EliteMonster {
    config: EliteConfig,
    state: EliteState,
    health: Health,
    origin: Vec3,
    state_prior_to_hit: EliteState,

    attack_elapsed: f32,
    heavy_attack_cooldown: f32,
    heavy_strike_done: bool,
    detect_elapsed: f32,
    charge_traveled: f32,
    charge_direction: Vec3,

    patrol: PatrolRoute,
    patrol_wait_elapsed: f32,
    waiting_at_patrol_point: bool,

    last_attacker_position: Option<Vec3>,
    schedule: Continuations,
    removed: bool,
}

impl EliteMonster {
    /// Собрать юнит в точке `origin`.
    ///
    /// Маршрут патруля генерируется один раз здесь и больше не меняется.
    pub fn spawn(config: EliteConfig, origin: Vec3, rng: &mut dyn RngCore) -> Result<Self, ConfigError> {
        config.validate()?;

        let patrol = PatrolRoute::from_config(origin, &config.patrol, rng);
        let state = if config.patrol.enabled {
            EliteState::Patrol
        } else {
            EliteState::Idle
        };

        crate::log(&format!(
            "[elite] spawned at {:?}: {} patrol points, start state {:?}",
            origin,
            patrol.len(),
            state
        ));

        Ok(Self {
            health: Health::new(config.max_health),
            config,
            state,
            origin,
            state_prior_to_hit: EliteState::Idle,
            attack_elapsed: 0.0,
            heavy_attack_cooldown: 0.0,
            heavy_strike_done: false,
            detect_elapsed: 0.0,
            charge_traveled: 0.0,
            charge_direction: Vec3::ZERO,
            patrol,
            patrol_wait_elapsed: 0.0,
            waiting_at_patrol_point: false,
            last_attacker_position: None,
            schedule: Continuations::default(),
            removed: false,
        })
    }

    pub fn state(&self) -> EliteState {
        self.state
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn config(&self) -> &EliteConfig {
        &self.config
    }

    pub fn state_prior_to_hit(&self) -> EliteState {
        self.state_prior_to_hit
    }

    pub fn heavy_attack_cooldown_remaining(&self) -> f32 {
        self.heavy_attack_cooldown
    }

    pub fn attack_elapsed(&self) -> f32 {
        self.attack_elapsed
    }

    pub fn detect_elapsed(&self) -> f32 {
        self.detect_elapsed
    }

    pub fn charge_distance_traveled(&self) -> f32 {
        self.charge_traveled
    }

    pub fn charge_direction(&self) -> Vec3 {
        self.charge_direction
    }

    pub fn patrol_route(&self) -> &PatrolRoute {
        &self.patrol
    }

    pub fn patrol_wait_elapsed(&self) -> f32 {
        self.patrol_wait_elapsed
    }

    pub fn is_waiting_at_patrol_point(&self) -> bool {
        self.waiting_at_patrol_point
    }

    pub fn last_attacker_position(&self) -> Option<Vec3> {
        self.last_attacker_position
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Один шаг симуляции.
    ///
    /// Вне `GameState::Playing` юнит заморожен целиком, включая таймеры
    /// и отложенные continuation'ы.
    pub fn tick(
        &mut self,
        ctx: &mut EliteContext<'_>,
        world: &mut Surroundings<'_>,
        delta: f32,
        game_state: GameState,
    ) -> TickOutcome {
        if self.removed {
            return TickOutcome::Removed;
        }
        if game_state != GameState::Playing {
            return TickOutcome::Active;
        }

        let delta = delta.max(0.0);

        // Фоновый таймер, не зависит от активного state
        self.heavy_attack_cooldown = (self.heavy_attack_cooldown - delta).max(0.0);

        for action in self.schedule.advance(delta) {
            self.run_continuation(action, ctx, world);
            if self.removed {
                return TickOutcome::Removed;
            }
        }

        match self.state {
            EliteState::Idle => self.idle(ctx, world),
            EliteState::Patrol => self.patrol(ctx, world, delta),
            EliteState::Detect => self.detect(ctx, world, delta),
            EliteState::Charge => self.charge(ctx, world, delta),
            EliteState::Trace => self.trace(ctx, world, delta),
            EliteState::Attack => self.attack(ctx, world, delta),
            EliteState::HeavyAttack => self.heavy_attack(ctx, world),
            EliteState::Comeback => self.comeback(ctx, world, delta),
            // Hit/Death ждут своих continuation'ов
            EliteState::Hit | EliteState::Death => {}
        }

        TickOutcome::Active
    }

    /// Применить урон от атакующего в `attacker_position`.
    ///
    /// `false`: юнит уже мёртв (health и state не меняются).
    pub fn apply_damage(&mut self, ctx: &mut EliteContext<'_>, amount: f32, attacker_position: Vec3) -> bool {
        if self.state == EliteState::Death {
            return false;
        }

        self.health.take_damage(amount);
        self.last_attacker_position = Some(attacker_position);
        ctx.navigation.suspend();

        // Любой ранее запланированный recovery/wind-down становится stale
        self.schedule.bump_generation();

        if self.health.is_alive() {
            // В цепочке попаданий помним state до ПЕРВОГО удара
            if self.state != EliteState::Hit {
                self.state_prior_to_hit = self.state;
            }
            self.set_state(EliteState::Hit);

            ctx.knockback.apply_knockback(ctx.body.position(), attacker_position);
            ctx.animator.play_trigger(triggers::HIT);
            self.schedule.schedule(self.config.hit_stagger, ScheduledAction::RecoverFromHit);

            crate::log_info(&format!(
                "[elite] hit for {} ({}/{} hp left)",
                amount, self.health.current, self.health.max
            ));
        } else {
            self.set_state(EliteState::Death);
            ctx.animator.play_trigger(triggers::DEATH);
            self.schedule.schedule(self.config.death_duration, ScheduledAction::FinishDeath);

            crate::log_info(&format!("[elite] killed by {} damage", amount));
        }

        true
    }

    /// Callback attack-события анимации: обычный удар по игроку.
    ///
    /// Засчитывается только пока юнит в Attack.
    pub fn on_attack_event(&mut self, player: &mut dyn PlayerTarget) -> bool {
        if self.state != EliteState::Attack {
            return false;
        }
        player.apply_damage(self.config.attack_damage);
        crate::log(&format!("[elite] attack damage: {}", self.config.attack_damage));
        true
    }

    // --- State behaviours ---

    fn idle(&mut self, ctx: &mut EliteContext<'_>, world: &mut Surroundings<'_>) {
        if self.distance_to_player(ctx, world) <= self.config.detect_distance {
            self.transition(ctx, EliteState::Detect, Some(triggers::IDLE_TO_DETECT));
        }
    }

    fn patrol(&mut self, ctx: &mut EliteContext<'_>, world: &mut Surroundings<'_>, delta: f32) {
        let Some(target) = self.patrol.current_point() else {
            crate::log_warning("[elite] patrol enabled but route is empty, falling back to Idle");
            self.transition(ctx, EliteState::Idle, None);
            return;
        };

        if self.distance_to_player(ctx, world) <= self.config.detect_distance {
            self.transition(ctx, EliteState::Detect, Some(triggers::PATROL_TO_DETECT));
            return;
        }

        if self.waiting_at_patrol_point {
            self.patrol_wait_elapsed += delta;
            if self.patrol_wait_elapsed >= self.config.patrol.wait_time {
                self.waiting_at_patrol_point = false;
                self.patrol_wait_elapsed = 0.0;
                self.patrol.advance();
            }
            return;
        }

        let position = ctx.body.position();
        let distance = position.distance(target);
        if distance <= self.config.patrol.arrival_epsilon {
            self.waiting_at_patrol_point = true;
            self.patrol_wait_elapsed = 0.0;
            crate::log(&format!(
                "[elite] reached patrol point {}, waiting",
                self.patrol.current_index()
            ));
            return;
        }

        // Не перепрыгиваем точку на большом delta
        let step = (self.config.patrol.speed * delta).min(distance);
        ctx.body.move_by((target - position).normalize_or_zero() * step);
    }

    fn detect(&mut self, ctx: &mut EliteContext<'_>, world: &mut Surroundings<'_>, delta: f32) {
        let to_player = world.player.position() - ctx.body.position();
        self.face_towards(ctx, to_player, delta);

        self.detect_elapsed += delta;

        if to_player.length() > self.config.detect_distance {
            self.detect_elapsed = 0.0;
            self.transition(ctx, EliteState::Idle, Some(triggers::DETECT_TO_IDLE));
            return;
        }

        if self.detect_elapsed >= self.config.detect_warning_time {
            self.charge_direction = to_player.normalize_or_zero();
            self.transition(ctx, EliteState::Charge, Some(triggers::DETECT_TO_CHARGE));
        }
    }

    fn charge(&mut self, ctx: &mut EliteContext<'_>, world: &mut Surroundings<'_>, delta: f32) {
        let step = self.config.charge_speed * delta;
        ctx.body.move_by(self.charge_direction * step);
        self.charge_traveled += step;

        if self.distance_to_player(ctx, world) <= self.config.attack_distance {
            world.player.apply_damage(self.config.charge_damage);
            crate::log(&format!("[elite] charge damage: {}", self.config.charge_damage));
            self.transition(ctx, EliteState::Attack, Some(triggers::CHARGE_TO_ATTACK));
            return;
        }

        if self.charge_traveled >= self.config.charge_distance {
            self.transition(ctx, EliteState::Trace, Some(triggers::CHARGE_TO_TRACE));
        }
    }

    fn trace(&mut self, ctx: &mut EliteContext<'_>, world: &mut Surroundings<'_>, delta: f32) {
        let player_position = world.player.position();
        let distance = ctx.body.position().distance(player_position);

        self.pursue(ctx, player_position, delta);

        if distance <= self.config.attack_distance {
            if self.heavy_attack_cooldown <= 0.0 {
                self.transition(ctx, EliteState::HeavyAttack, Some(triggers::TRACE_TO_HEAVY_ATTACK));
            } else {
                self.transition(ctx, EliteState::Attack, Some(triggers::TRACE_TO_ATTACK));
            }
            return;
        }

        if distance > self.config.detect_distance {
            self.transition(ctx, EliteState::Comeback, Some(triggers::TRACE_TO_COMEBACK));
        }
    }

    fn attack(&mut self, ctx: &mut EliteContext<'_>, world: &mut Surroundings<'_>, delta: f32) {
        if self.distance_to_player(ctx, world) > self.config.attack_distance {
            self.transition(ctx, EliteState::Trace, Some(triggers::ATTACK_TO_TRACE));
            return;
        }

        // Урон наносит attack-событие анимации (on_attack_event), не этот тик
        self.attack_elapsed += delta;
        if self.attack_elapsed >= self.config.attack_period {
            ctx.animator.play_trigger(triggers::ATTACK);
            self.attack_elapsed = 0.0;
        }
    }

    fn heavy_attack(&mut self, ctx: &mut EliteContext<'_>, world: &mut Surroundings<'_>) {
        if !self.heavy_strike_done {
            self.heavy_strike_done = true;
            ctx.animator.play_trigger(triggers::HEAVY_ATTACK);

            if self.distance_to_player(ctx, world) <= self.config.heavy_attack_range {
                world.player.apply_damage(self.config.heavy_attack_damage);
                crate::log(&format!(
                    "[elite] heavy attack damage: {}",
                    self.config.heavy_attack_damage
                ));
            }

            self.heavy_attack_cooldown = self.config.heavy_attack_cooldown;
        }

        // Wind-down мог быть отменён попаданием: перепланируем без повторного удара
        if !self.schedule.has_live(ScheduledAction::FinishHeavyAttack) {
            self.schedule
                .schedule(self.config.heavy_attack_wind_down, ScheduledAction::FinishHeavyAttack);
        }
    }

    fn comeback(&mut self, ctx: &mut EliteContext<'_>, world: &mut Surroundings<'_>, delta: f32) {
        let position = ctx.body.position();
        let distance_to_player = position.distance(world.player.position());
        let distance_to_origin = position.distance(self.origin);

        if distance_to_origin <= self.config.patrol.arrival_epsilon {
            if self.config.patrol.enabled {
                self.transition(ctx, EliteState::Patrol, None);
            } else {
                self.transition(ctx, EliteState::Idle, None);
            }
            return;
        }

        self.pursue(ctx, self.origin, delta);

        if distance_to_player <= self.config.detect_distance {
            self.transition(ctx, EliteState::Detect, Some(triggers::COMEBACK_TO_DETECT));
        }
    }

    // --- Continuations ---

    fn run_continuation(
        &mut self,
        action: ScheduledAction,
        ctx: &mut EliteContext<'_>,
        world: &mut Surroundings<'_>,
    ) {
        match action {
            ScheduledAction::RecoverFromHit => {
                if self.state != EliteState::Hit {
                    return;
                }
                ctx.navigation.resume();
                let restored = self.state_prior_to_hit;
                self.set_state(restored);
            }
            ScheduledAction::FinishHeavyAttack => {
                if self.state == EliteState::HeavyAttack {
                    self.transition(ctx, EliteState::Trace, None);
                }
            }
            ScheduledAction::FinishDeath => self.finish_death(ctx, world),
        }
    }

    fn finish_death(&mut self, ctx: &mut EliteContext<'_>, world: &mut Surroundings<'_>) {
        let loot = &self.config.loot;
        let count = world.rng.gen_range(loot.min_count..=loot.max_count);
        let position = ctx.body.position() + Vec3::Y * loot.drop_height;

        if count > 0 {
            world.loot.spawn(count, position, loot.value_per_item);
        }
        crate::log_info(&format!("[elite] dropped {} gold at {:?}", count, position));

        self.removed = true;
    }

    // --- Helpers ---

    /// Переход с ресетом таймеров входимой фазы.
    fn transition(&mut self, ctx: &mut EliteContext<'_>, next: EliteState, trigger: Option<&'static str>) {
        if self.state.uses_navigation() && !next.uses_navigation() {
            ctx.navigation.stop();
        }

        match next {
            EliteState::Detect => {
                self.detect_elapsed = 0.0;
                self.waiting_at_patrol_point = false;
                self.patrol_wait_elapsed = 0.0;
            }
            EliteState::Charge => self.charge_traveled = 0.0,
            EliteState::Attack => self.attack_elapsed = 0.0,
            EliteState::HeavyAttack => self.heavy_strike_done = false,
            EliteState::Patrol => {
                self.patrol.reset();
                self.waiting_at_patrol_point = false;
                self.patrol_wait_elapsed = 0.0;
            }
            _ => {}
        }

        self.set_state(next);

        if let Some(trigger) = trigger {
            ctx.animator.play_trigger(trigger);
        }
        if next == EliteState::Idle {
            ctx.animator.play_trigger(triggers::IDLE);
        }
    }

    fn set_state(&mut self, next: EliteState) {
        crate::log(&format!("[elite] {:?} -> {:?}", self.state, next));
        self.state = next;
    }

    fn distance_to_player(&self, ctx: &EliteContext<'_>, world: &Surroundings<'_>) -> f32 {
        ctx.body.position().distance(world.player.position())
    }

    /// Двигаться к точке через NavMesh, а вне её напрямую на move_speed
    fn pursue(&mut self, ctx: &mut EliteContext<'_>, destination: Vec3, delta: f32) {
        if ctx.navigation.is_on_navigable_surface() {
            ctx.navigation.navigate_to(destination);
            return;
        }

        let position = ctx.body.position();
        let distance = position.distance(destination);
        let step = (self.config.move_speed * delta).min(distance);
        ctx.body.move_by((destination - position).normalize_or_zero() * step);
    }

    /// Плавный поворот по yaw к направлению (forward = -Z)
    fn face_towards(&self, ctx: &mut EliteContext<'_>, direction: Vec3, delta: f32) {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() <= f32::EPSILON {
            return;
        }

        let look = Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z));
        let t = (delta * self.config.turn_smoothing).clamp(0.0, 1.0);
        let current = ctx.body.rotation();
        ctx.body.set_rotation(current.slerp(look, t));
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: EliteState) {
        self.state = state;
    }
}
