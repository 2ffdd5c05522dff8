//! Staffing search — the minimum agent count that meets a service-level target.
//!
//! The search starts at the stability floor (smallest integer strictly above
//! the offered load; anything at or below it has a service level of 0) and
//! stops at `SearchConfig::max_agents`, inclusive. Service level is monotone
//! in the agent count, so a linear walk and a bisection over the same range
//! return the same minimum.
//!
//! RULES:
//!   - Inputs are validated before any evaluation. Bad inputs never reach the
//!     formulas, so results are never NaN or infinite.
//!   - Comparisons use the unrounded service level. Rounding is presentation only.
//!   - An exhausted range is `Ok(None)`, never a best-effort answer.

use crate::{
    config::{SearchConfig, SearchStrategy},
    error::{CoreResult, StaffingError},
    service_level::service_level,
    types::{round2, AgentCount, Demand, Erlangs, ServiceLevelTarget},
};
use serde::{Deserialize, Serialize};

/// Absorbs representation noise in `agents / (1 - u)`, e.g. 21 / 0.7.
const ROSTER_EPSILON: f64 = 1e-9;

/// Outcome of one successful search. Built once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingResult {
    /// Agents that must be logged in and handling contacts.
    pub required_agents:    AgentCount,
    /// Agents to schedule once unavailability is accounted for.
    pub required_roster:    u32,
    /// Achieved service level, percent, rounded to 2dp.
    pub service_level:      f64,
    /// Agent occupancy, percent, rounded to 2dp.
    pub occupancy:          f64,
    pub offered_load:       Erlangs,
    pub unavailability_pct: f64,
    pub calls_per_hour:     f64,
    pub aht_minutes:        f64,
    pub target:             ServiceLevelTarget,
}

/// Smallest agent count that keeps the queue stable.
pub fn stability_floor(load: Erlangs) -> AgentCount {
    // `as` saturates for loads beyond the u32 range.
    (load.floor() as AgentCount).saturating_add(1)
}

/// Agents to schedule so that `agents` remain after unavailability.
pub fn required_roster(agents: AgentCount, unavailability_fraction: f64) -> u32 {
    let raw = f64::from(agents) / (1.0 - unavailability_fraction);
    (raw - ROSTER_EPSILON).ceil() as u32
}

pub fn validate_inputs(
    demand: &Demand,
    target: &ServiceLevelTarget,
    search: &SearchConfig,
) -> CoreResult<()> {
    if !(demand.calls_per_hour.is_finite() && demand.calls_per_hour >= 0.0) {
        return Err(StaffingError::invalid(
            "calls_per_hour",
            format!("must be a finite value >= 0, got {}", demand.calls_per_hour),
        ));
    }
    if !(demand.aht_minutes.is_finite() && demand.aht_minutes > 0.0) {
        return Err(StaffingError::invalid(
            "aht_minutes",
            format!("must be a finite value > 0, got {}", demand.aht_minutes),
        ));
    }
    if !(target.window_seconds.is_finite() && target.window_seconds > 0.0) {
        return Err(StaffingError::invalid(
            "window_seconds",
            format!("must be a finite value > 0, got {}", target.window_seconds),
        ));
    }
    if !target.service_level_pct.is_finite() {
        return Err(StaffingError::invalid(
            "service_level_pct",
            format!("must be finite, got {}", target.service_level_pct),
        ));
    }
    // Finite raw inputs can still overflow once converted, e.g. aht_minutes = 1e307.
    if !demand.aht_seconds().is_finite() {
        return Err(StaffingError::invalid(
            "aht_minutes",
            format!("{} minutes overflows when converted to seconds", demand.aht_minutes),
        ));
    }
    if !demand.offered_load().is_finite() {
        return Err(StaffingError::invalid(
            "offered_load",
            format!(
                "{} calls/h at {} minutes is not a finite load",
                demand.calls_per_hour, demand.aht_minutes
            ),
        ));
    }
    search.validate()
}

/// Find the minimum agent count whose service level reaches `target`.
///
/// Returns `Ok(None)` when no count up to `search.max_agents` qualifies,
/// including the case where the stability floor is already above the ceiling.
pub fn find_required_agents(
    demand: &Demand,
    target: &ServiceLevelTarget,
    search: &SearchConfig,
) -> CoreResult<Option<StaffingResult>> {
    validate_inputs(demand, target, search)?;

    let load = demand.offered_load();
    let aht_seconds = demand.aht_seconds();
    let floor = stability_floor(load);

    if floor > search.max_agents {
        log::warn!(
            "staffing: load {load:.2} Erl needs at least {floor} agents, ceiling is {}",
            search.max_agents
        );
        return Ok(None);
    }

    let meets_target = |agents: AgentCount| {
        service_level(agents, demand.calls_per_hour, aht_seconds, target.window_seconds)
            >= target.service_level_pct
    };

    let found = match search.strategy {
        SearchStrategy::Linear => (floor..=search.max_agents).find(|&a| meets_target(a)),
        SearchStrategy::Bisection => bisect(floor, search.max_agents, meets_target),
    };

    let Some(agents) = found else {
        log::warn!(
            "staffing: {}/{}s unreachable with {} agents (load {load:.2} Erl)",
            target.service_level_pct,
            target.window_seconds,
            search.max_agents
        );
        return Ok(None);
    };

    let achieved =
        service_level(agents, demand.calls_per_hour, aht_seconds, target.window_seconds);
    let occupancy = load / f64::from(agents) * 100.0;

    log::debug!(
        "staffing: load={load:.3} {}/{}s -> agents={agents} sl={achieved:.3} occ={occupancy:.2}",
        target.service_level_pct,
        target.window_seconds
    );

    Ok(Some(StaffingResult {
        required_agents:    agents,
        required_roster:    required_roster(agents, search.unavailability_fraction),
        service_level:      round2(achieved),
        occupancy:          round2(occupancy),
        offered_load:       load,
        unavailability_pct: search.unavailability_fraction * 100.0,
        calls_per_hour:     demand.calls_per_hour,
        aht_minutes:        demand.aht_minutes,
        target:             *target,
    }))
}

/// First value in `[lo, hi]` satisfying a monotone predicate.
fn bisect(
    mut lo: AgentCount,
    mut hi: AgentCount,
    meets: impl Fn(AgentCount) -> bool,
) -> Option<AgentCount> {
    if !meets(hi) {
        return None;
    }
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if meets(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Some(lo)
}
