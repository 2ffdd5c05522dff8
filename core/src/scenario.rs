//! Scenario comparison — one staffing search per named target.
//!
//! Scenarios are independent. The result set keeps the order in which
//! they were requested and leaves out any scenario the search could not
//! satisfy, so a missing name means "infeasible under this ceiling".

use crate::{
    config::{ensure_unique_names, ScenarioSpec, SearchConfig},
    error::CoreResult,
    staffing::{find_required_agents, validate_inputs, StaffingResult},
    types::Demand,
};
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from scenario name to its staffing result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioSet {
    entries: Vec<(String, StaffingResult)>,
}

impl ScenarioSet {
    pub fn get(&self, name: &str) -> Option<&StaffingResult> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StaffingResult)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extra roster needed to move from scenario `from` to scenario `to`,
    /// with the increase as a percentage of `from`'s roster.
    /// None if either scenario is absent.
    pub fn roster_delta(&self, from: &str, to: &str) -> Option<RosterDelta> {
        let base = self.get(from)?;
        let next = self.get(to)?;
        let extra = i64::from(next.required_roster) - i64::from(base.required_roster);
        let pct_increase = if base.required_roster > 0 {
            extra as f64 / f64::from(base.required_roster) * 100.0
        } else {
            0.0
        };
        Some(RosterDelta { extra_roster: extra, pct_increase })
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn from_outcomes(outcomes: Vec<(&ScenarioSpec, Option<StaffingResult>)>) -> Self {
        let entries = outcomes
            .into_iter()
            .filter_map(|(spec, outcome)| match outcome {
                Some(result) => Some((spec.name.clone(), result)),
                None => {
                    log::warn!("scenario '{}' infeasible, omitted", spec.name);
                    None
                }
            })
            .collect();
        Self { entries }
    }
}

impl Serialize for ScenarioSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, result) in &self.entries {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterDelta {
    pub extra_roster: i64,
    pub pct_increase: f64,
}

/// Runs one staffing search per scenario against a fixed demand.
pub struct ScenarioComparator {
    demand: Demand,
    search: SearchConfig,
}

impl ScenarioComparator {
    pub fn new(demand: Demand, search: SearchConfig) -> Self {
        Self { demand, search }
    }

    fn validate(&self, scenarios: &[ScenarioSpec]) -> CoreResult<()> {
        ensure_unique_names(scenarios)?;
        for spec in scenarios {
            validate_inputs(&self.demand, &spec.target(), &self.search)?;
        }
        Ok(())
    }

    fn search_one<'a>(
        &self,
        spec: &'a ScenarioSpec,
    ) -> CoreResult<(&'a ScenarioSpec, Option<StaffingResult>)> {
        find_required_agents(&self.demand, &spec.target(), &self.search)
            .map(|outcome| (spec, outcome))
    }

    /// Evaluate every scenario in order on the current thread.
    pub fn compare(&self, scenarios: &[ScenarioSpec]) -> CoreResult<ScenarioSet> {
        self.validate(scenarios)?;
        let outcomes = scenarios
            .iter()
            .map(|spec| self.search_one(spec))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(ScenarioSet::from_outcomes(outcomes))
    }

    /// Evaluate scenarios on the rayon pool. Same set, same order as `compare`.
    pub fn compare_parallel(&self, scenarios: &[ScenarioSpec]) -> CoreResult<ScenarioSet> {
        self.validate(scenarios)?;
        let outcomes = scenarios
            .par_iter()
            .map(|spec| self.search_one(spec))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(ScenarioSet::from_outcomes(outcomes))
    }
}

/// Compare scenarios for one demand point with the default ceiling.
pub fn compare(
    calls_per_hour: f64,
    aht_minutes: f64,
    unavailability_fraction: f64,
    scenarios: &[ScenarioSpec],
) -> CoreResult<ScenarioSet> {
    let search = SearchConfig::default().with_unavailability(unavailability_fraction);
    ScenarioComparator::new(Demand::new(calls_per_hour, aht_minutes), search).compare(scenarios)
}
