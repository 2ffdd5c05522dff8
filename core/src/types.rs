//! Shared primitive types used across the staffing core.

use serde::{Deserialize, Serialize};

/// Offered traffic, in Erlangs (expected concurrent work).
pub type Erlangs = f64;

/// Number of simultaneously active agents.
pub type AgentCount = u32;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Offered load for an arrival rate and mean handling time.
pub fn offered_load(calls_per_hour: f64, aht_seconds: f64) -> Erlangs {
    calls_per_hour * aht_seconds / SECONDS_PER_HOUR
}

/// Demand seen by the queue: the two scalars the core consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    pub calls_per_hour: f64,
    pub aht_minutes:    f64,
}

impl Demand {
    pub fn new(calls_per_hour: f64, aht_minutes: f64) -> Self {
        Self { calls_per_hour, aht_minutes }
    }

    pub fn aht_seconds(&self) -> f64 {
        self.aht_minutes * 60.0
    }

    pub fn offered_load(&self) -> Erlangs {
        offered_load(self.calls_per_hour, self.aht_seconds())
    }
}

/// "Answer `service_level_pct` percent of contacts within `window_seconds`."
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceLevelTarget {
    pub service_level_pct: f64,
    pub window_seconds:    f64,
}

impl ServiceLevelTarget {
    pub fn new(service_level_pct: f64, window_seconds: f64) -> Self {
        Self { service_level_pct, window_seconds }
    }
}

/// Round to 2 decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
