use std::time::Duration;

use crate::Effect;

pub type TimerId = u64;

/// Owns the single refresh timer. At most one timer is pending at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    steady_interval: Duration,
    pending: Option<TimerId>,
    next_id: TimerId,
}

impl Scheduler {
    pub fn new(steady_interval: Duration) -> Self {
        Self {
            steady_interval,
            pending: None,
            next_id: 1,
        }
    }

    pub fn steady_interval(&self) -> Duration {
        self.steady_interval
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Arms the first timer. Negative or absent delays fall back to the steady interval.
    pub fn start(&mut self, initial_delay_ms: Option<i64>) -> Vec<Effect> {
        let delay = self.resolve_delay(initial_delay_ms);
        self.reschedule(delay)
    }

    pub fn resolve_delay(&self, delay_ms: Option<i64>) -> Duration {
        match delay_ms {
            Some(ms) if ms >= 0 => Duration::from_millis(ms.unsigned_abs()),
            _ => self.steady_interval,
        }
    }

    /// Cancels the pending timer, if any, and arms a new one.
    pub fn reschedule(&mut self, delay: Duration) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if let Some(timer_id) = self.pending.take() {
            effects.push(Effect::CancelTimer { timer_id });
        }
        let timer_id = self.next_id;
        self.next_id += 1;
        self.pending = Some(timer_id);
        effects.push(Effect::ArmTimer { timer_id, delay });
        effects
    }

    /// Consumes a fired timer. Returns false for timers that were already replaced.
    pub fn fire(&mut self, timer_id: TimerId) -> bool {
        if self.pending == Some(timer_id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) -> Vec<Effect> {
        self.pending
            .take()
            .map(|timer_id| vec![Effect::CancelTimer { timer_id }])
            .unwrap_or_default()
    }
}
