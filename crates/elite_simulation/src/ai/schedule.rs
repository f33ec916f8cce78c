//! Отложенные continuation'ы юнита (stagger, wind-down, death)
//!
//! Вместо coroutine: список `(remaining, generation, action)`, который юнит
//! проверяет каждый тик. Храним обратный отсчёт, а не абсолютное время:
//! точность не деградирует на длинной сессии. Каждое новое попадание увеличивает generation,
//! так что recovery, запланированный до него, при срабатывании игнорируется.

/// Что сделать по истечении задержки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Hit → state до попадания
    RecoverFromHit,
    /// HeavyAttack → Trace
    FinishHeavyAttack,
    /// Лут + удаление юнита
    FinishDeath,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingAction {
    remaining: f32,
    generation: u64,
    action: ScheduledAction,
}

/// Очередь continuation'ов с generation-фильтром
#[derive(Debug, Clone, Default)]
pub struct Continuations {
    generation: u64,
    pending: Vec<PendingAction>,
}

impl Continuations {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Новое прерывание: все ранее запланированные действия становятся stale
    pub fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Запланировать действие через `delay` секунд (в текущем generation)
    pub fn schedule(&mut self, delay: f32, action: ScheduledAction) {
        self.pending.push(PendingAction {
            remaining: delay.max(0.0),
            generation: self.generation,
            action,
        });
    }

    /// Есть ли живое (не stale) действие данного типа
    pub fn has_live(&self, action: ScheduledAction) -> bool {
        self.pending
            .iter()
            .any(|p| p.action == action && p.generation == self.generation)
    }

    /// Отсчитать `delta` и вернуть созревшие живые действия (раньше созревшие первыми).
    ///
    /// Stale записи выбрасываются без срабатывания.
    pub fn advance(&mut self, delta: f32) -> Vec<ScheduledAction> {
        let generation = self.generation;

        let mut due: Vec<PendingAction> = Vec::new();
        self.pending.retain_mut(|p| {
            if p.generation != generation {
                return false;
            }
            p.remaining -= delta;
            if p.remaining <= 0.0 {
                due.push(*p);
                return false;
            }
            true
        });

        // Более отрицательный остаток = созрело раньше
        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining));
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
