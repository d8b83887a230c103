//! Repeating timer driven by the simulation clock

/// Shortest delay a timer accepts; zero would fire forever at one instant
pub const MIN_DELAY_MS: f64 = 1.0;

/// Fires every `delay_ms`, measured from the previous fire time so that frame
/// jitter never accumulates into the cadence
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatingTimer {
    delay_ms: f64,
    next_fire_ms: f64,
}

impl RepeatingTimer {
    /// First fire happens `delay_ms` after `now_ms`
    pub fn start(now_ms: f64, delay_ms: f64) -> Self {
        let delay_ms = delay_ms.max(MIN_DELAY_MS);
        Self {
            delay_ms,
            next_fire_ms: now_ms + delay_ms,
        }
    }

    #[inline]
    pub fn next_fire_ms(&self) -> f64 {
        self.next_fire_ms
    }

    /// Take one pending fire, if due. Returns the scheduled fire time and
    /// schedules the following one with the current delay.
    pub fn poll(&mut self, now_ms: f64) -> Option<f64> {
        if now_ms < self.next_fire_ms {
            return None;
        }
        let fired_at = self.next_fire_ms;
        self.next_fire_ms = fired_at + self.delay_ms;
        Some(fired_at)
    }

    /// Change the delay; the next fire is re-anchored on `fired_at_ms`
    pub fn set_delay(&mut self, fired_at_ms: f64, delay_ms: f64) {
        self.delay_ms = delay_ms.max(MIN_DELAY_MS);
        self.next_fire_ms = fired_at_ms + self.delay_ms;
    }
}
