use std::time::{Duration, Instant};

/// Lifecycle of one simulated remote call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpState {
    #[default]
    Idle,
    InFlight { ready_at: Instant },
}

impl OpState {
    pub fn start(now: Instant, latency: Duration) -> Self {
        OpState::InFlight {
            ready_at: now + latency,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, OpState::InFlight { .. })
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self {
            OpState::InFlight { ready_at } => now >= *ready_at,
            OpState::Idle => false,
        }
    }
}

/// Simulated round-trip times for the store's operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latency {
    pub load: Duration,
    pub save: Duration,
    pub delete: Duration,
}

impl Latency {
    /// Complete every operation on the next poll.
    pub fn none() -> Self {
        Self {
            load: Duration::ZERO,
            save: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            load: Duration::from_millis(500),
            save: Duration::from_millis(500),
            delete: Duration::from_millis(1000),
        }
    }
}
