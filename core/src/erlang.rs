//! Erlang B / Erlang C probabilities for an M/M/c queue.
//!
//! RULE: No factorials. Blocking probability is built with the
//! recurrence B(k) = a·B(k-1) / (k + a·B(k-1)), B(0) = 1, which stays
//! inside [0,1] at every step and cannot overflow for large agent counts.
//!
//! Modelling assumption: handling times are exponential (memoryless).
//! When they are not, every figure derived from here is an approximation.

use crate::types::{AgentCount, Erlangs};

/// Erlang B blocking probability for `servers` agents and `load` Erlangs.
pub fn erlang_b(servers: AgentCount, load: Erlangs) -> f64 {
    let mut blocking = 1.0_f64;
    for k in 1..=servers {
        let carried = load * blocking;
        blocking = carried / (f64::from(k) + carried);
    }
    blocking.clamp(0.0, 1.0)
}

/// Erlang C probability that an arriving contact has to wait.
///
/// Returns exactly 1.0 when `servers <= load`: the queue is unstable
/// and grows without bound, so every arrival waits.
pub fn wait_probability(servers: AgentCount, load: Erlangs) -> f64 {
    let c = f64::from(servers);
    if c <= load {
        return 1.0;
    }

    let blocking = erlang_b(servers, load);
    let waiting = blocking / (1.0 - (load / c) * (1.0 - blocking));
    waiting.clamp(0.0, 1.0)
}
