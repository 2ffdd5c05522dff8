use crate::{
    error::{CoreResult, StaffingError},
    types::{AgentCount, ServiceLevelTarget},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_UNAVAILABILITY_FRACTION: f64 = 0.30;
pub const DEFAULT_MAX_AGENTS: AgentCount = 100;

/// How the staffing search walks the agent range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Walk upward from the stability floor.
    #[default]
    Linear,
    /// Bisect [floor, max_agents]. Same answer, fewer evaluations.
    Bisection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Share of paid time agents are unavailable (breaks, training). In [0,1).
    pub unavailability_fraction: f64,
    /// Search ceiling, inclusive.
    pub max_agents:              AgentCount,
    pub strategy:                SearchStrategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            unavailability_fraction: DEFAULT_UNAVAILABILITY_FRACTION,
            max_agents:              DEFAULT_MAX_AGENTS,
            strategy:                SearchStrategy::Linear,
        }
    }
}

impl SearchConfig {
    pub fn with_unavailability(mut self, fraction: f64) -> Self {
        self.unavailability_fraction = fraction;
        self
    }

    pub fn with_max_agents(mut self, max_agents: AgentCount) -> Self {
        self.max_agents = max_agents;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        let u = self.unavailability_fraction;
        if !(0.0..1.0).contains(&u) {
            return Err(StaffingError::invalid(
                "unavailability_fraction",
                format!("must be in [0, 1), got {u}"),
            ));
        }
        if self.max_agents == 0 {
            return Err(StaffingError::invalid("max_agents", "must be positive"));
        }
        Ok(())
    }
}

/// A named service-level target, e.g. "80/20".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name:              String,
    pub service_level_pct: f64,
    pub window_seconds:    f64,
}

impl ScenarioSpec {
    pub fn new(name: impl Into<String>, service_level_pct: f64, window_seconds: f64) -> Self {
        Self {
            name: name.into(),
            service_level_pct,
            window_seconds,
        }
    }

    pub fn target(&self) -> ServiceLevelTarget {
        ServiceLevelTarget::new(self.service_level_pct, self.window_seconds)
    }
}

/// Scenario names key the comparison result, so each may appear once.
pub fn ensure_unique_names(scenarios: &[ScenarioSpec]) -> CoreResult<()> {
    let mut seen = HashSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.name.as_str()) {
            return Err(StaffingError::invalid(
                "scenario.name",
                format!("'{}' appears more than once", scenario.name),
            ));
        }
    }
    Ok(())
}

/// The common industry targets compared by default.
pub fn standard_scenarios() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec::new("80/20", 80.0, 20.0),
        ScenarioSpec::new("80/30", 80.0, 30.0),
        ScenarioSpec::new("90/20", 90.0, 20.0),
        ScenarioSpec::new("90/30", 90.0, 30.0),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingConfig {
    #[serde(default)]
    pub search:    SearchConfig,
    #[serde(default = "standard_scenarios")]
    pub scenarios: Vec<ScenarioSpec>,
}

impl Default for StaffingConfig {
    fn default() -> Self {
        Self {
            search:    SearchConfig::default(),
            scenarios: standard_scenarios(),
        }
    }
}

impl StaffingConfig {
    /// Load from a JSON file. Missing sections fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: StaffingConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.search.validate()?;
        for scenario in &self.scenarios {
            if scenario.name.trim().is_empty() {
                return Err(StaffingError::invalid("scenario.name", "must not be empty"));
            }
            if !(scenario.window_seconds.is_finite() && scenario.window_seconds > 0.0) {
                return Err(StaffingError::invalid(
                    "scenario.window_seconds",
                    format!("must be positive for '{}'", scenario.name),
                ));
            }
        }
        ensure_unique_names(&self.scenarios)
    }
}
