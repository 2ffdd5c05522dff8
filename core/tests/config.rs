use staffing_core::{
    config::{
        ScenarioSpec, SearchConfig, SearchStrategy, StaffingConfig, DEFAULT_MAX_AGENTS,
        DEFAULT_UNAVAILABILITY_FRACTION,
    },
    error::StaffingError,
};

fn write_temp(name: &str, body: &str) -> String {
    let path = std::env::temp_dir().join(format!("staffing-{name}-{}.json", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn defaults_are_explicit() {
    let config = StaffingConfig::default();
    assert_eq!(config.search.unavailability_fraction, 0.30);
    assert_eq!(config.search.max_agents, 100);
    assert_eq!(config.search.unavailability_fraction, DEFAULT_UNAVAILABILITY_FRACTION);
    assert_eq!(config.search.max_agents, DEFAULT_MAX_AGENTS);
    assert_eq!(config.search.strategy, SearchStrategy::Linear);

    let names: Vec<&str> = config.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["80/20", "80/30", "90/20", "90/30"]);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let path = write_temp("partial", r#"{"search": {"max_agents": 50, "strategy": "bisection"}}"#);
    let config = StaffingConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.search.max_agents, 50);
    assert_eq!(config.search.strategy, SearchStrategy::Bisection);
    assert_eq!(config.search.unavailability_fraction, 0.30);
    assert_eq!(config.scenarios.len(), 4);
}

#[test]
fn custom_scenarios_load_in_file_order() {
    let path = write_temp(
        "scenarios",
        r#"{
            "search": {"unavailability_fraction": 0.25},
            "scenarios": [
                {"name": "95/15", "service_level_pct": 95.0, "window_seconds": 15.0},
                {"name": "70/60", "service_level_pct": 70.0, "window_seconds": 60.0}
            ]
        }"#,
    );
    let config = StaffingConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.search.unavailability_fraction, 0.25);
    assert_eq!(config.scenarios[0].name, "95/15");
    assert_eq!(config.scenarios[1].target().window_seconds, 60.0);
}

#[test]
fn out_of_range_values_are_rejected_on_load() {
    let path = write_temp("bad-shrinkage", r#"{"search": {"unavailability_fraction": 1.0}}"#);
    let result = StaffingConfig::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());

    let path = write_temp(
        "bad-window",
        r#"{"scenarios": [{"name": "x", "service_level_pct": 80.0, "window_seconds": 0.0}]}"#,
    );
    let result = StaffingConfig::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn missing_file_names_the_path() {
    let err = StaffingConfig::load("/nonexistent/staffing.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/staffing.json"));
}

#[test]
fn builder_methods_compose() {
    let search = SearchConfig::default()
        .with_unavailability(0.1)
        .with_max_agents(250)
        .with_strategy(SearchStrategy::Bisection);
    assert_eq!(search.unavailability_fraction, 0.1);
    assert_eq!(search.max_agents, 250);
    assert!(search.validate().is_ok());
}

#[test]
fn duplicate_scenario_names_fail_validation() {
    let mut config = StaffingConfig::default();
    config.scenarios.push(ScenarioSpec::new("80/20", 85.0, 15.0));
    match config.validate() {
        Err(StaffingError::InvalidInput { field, reason }) => {
            assert_eq!(field, "scenario.name");
            assert!(reason.contains("80/20"), "{reason}");
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}
