//! Emission throttling.

/// Whether enough time has passed since the last emission.
///
/// `None` means nothing has been emitted yet, which always opens the gate.
pub fn should_emit(now_ms: u64, last_emit_ms: Option<u64>, min_interval_ms: u64) -> bool {
    match last_emit_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= min_interval_ms,
    }
}

/// Minimum-interval gate. The timestamp only moves when the owner
/// actually emits.
#[derive(Debug, Clone)]
pub struct UpdateGate {
    min_interval_ms: u64,
    last_emit_ms: Option<u64>,
}

impl UpdateGate {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_emit_ms: None,
        }
    }

    pub fn is_open(&self, now_ms: u64) -> bool {
        should_emit(now_ms, self.last_emit_ms, self.min_interval_ms)
    }

    pub fn record_emit(&mut self, now_ms: u64) {
        self.last_emit_ms = Some(now_ms);
    }

    pub fn last_emit_ms(&self) -> Option<u64> {
        self.last_emit_ms
    }

    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }

    pub fn reset(&mut self) {
        self.last_emit_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attempt_always_emits() {
        assert!(should_emit(0, None, 1000));
        assert!(should_emit(5, None, u64::MAX));
    }

    #[test]
    fn test_interval_boundary() {
        assert!(!should_emit(1999, Some(1000), 1000));
        assert!(should_emit(2000, Some(1000), 1000));
    }

    #[test]
    fn test_clock_going_backwards_stays_closed() {
        assert!(!should_emit(500, Some(1000), 1000));
    }

    #[test]
    fn test_gate_only_moves_on_record() {
        let mut gate = UpdateGate::new(1000);
        assert!(gate.is_open(0));
        gate.record_emit(0);
        assert!(!gate.is_open(999));
        // Not recording keeps the original reference point
        assert!(gate.is_open(1000));
        gate.record_emit(1000);
        assert_eq!(gate.last_emit_ms(), Some(1000));

        gate.reset();
        assert!(gate.is_open(1001));
    }
}
