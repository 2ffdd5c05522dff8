//! Hourly staffing plan — one search per hour of the demand profile.
//!
//! Every hour uses the profile's global average handle time, the same
//! way the aggregated demand is consumed downstream.

use crate::{
    config::SearchConfig,
    demand::DemandProfile,
    error::CoreResult,
    staffing::{find_required_agents, StaffingResult},
    types::{Demand, ServiceLevelTarget},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRequirement {
    pub hour:           u32,
    pub calls_per_hour: f64,
    /// `None` when the target is unreachable within the ceiling.
    pub staffing:       Option<StaffingResult>,
}

pub fn hourly_plan(
    profile: &DemandProfile,
    target: &ServiceLevelTarget,
    search: &SearchConfig,
) -> CoreResult<Vec<HourlyRequirement>> {
    profile
        .hours
        .iter()
        .map(|h| -> CoreResult<HourlyRequirement> {
            let demand = Demand::new(h.calls_per_hour_avg, profile.aht_minutes);
            let staffing = find_required_agents(&demand, target, search)?;
            if staffing.is_none() {
                log::warn!(
                    "plan: hour {:02}:00 infeasible at {:.1} calls/h",
                    h.hour,
                    h.calls_per_hour_avg
                );
            }
            Ok(HourlyRequirement {
                hour: h.hour,
                calls_per_hour: h.calls_per_hour_avg,
                staffing,
            })
        })
        .collect()
}

/// Largest on-phone requirement across the plan's feasible hours.
pub fn peak_agents(plan: &[HourlyRequirement]) -> Option<u32> {
    plan.iter()
        .filter_map(|h| h.staffing.as_ref().map(|s| s.required_agents))
        .max()
}
