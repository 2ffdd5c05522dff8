//! Service level: percentage of contacts answered within a target window.
//!
//! SL = [1 - P(wait) · exp(-(c - a) · window / aht)] × 100
//!
//! Non-decreasing in the agent count for a fixed load. The staffing
//! search depends on that, so the result is clamped to [0,100] to keep
//! rounding noise near the boundaries from breaking it.

use crate::{
    erlang::wait_probability,
    types::{offered_load, AgentCount},
};

pub fn service_level(
    servers: AgentCount,
    calls_per_hour: f64,
    aht_seconds: f64,
    window_seconds: f64,
) -> f64 {
    let load = offered_load(calls_per_hour, aht_seconds);
    let c = f64::from(servers);

    // Overloaded: nothing is served within any finite window.
    if c <= load {
        return 0.0;
    }

    let p_wait = wait_probability(servers, load);
    let escape = (-(c - load) * window_seconds / aht_seconds).exp();
    ((1.0 - p_wait * escape) * 100.0).clamp(0.0, 100.0)
}
