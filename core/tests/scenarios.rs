//! Scenario comparison tests.

use staffing_core::{
    config::{standard_scenarios, ScenarioSpec, SearchConfig},
    error::StaffingError,
    scenario::{compare, ScenarioComparator},
    types::Demand,
};

#[test]
fn standard_scenarios_keep_request_order() {
    let set = compare(100.0, 5.0, 0.30, &standard_scenarios()).unwrap();

    let names: Vec<&str> = set.names().collect();
    assert_eq!(names, vec!["80/20", "80/30", "90/20", "90/30"]);
    assert_eq!(set.get("80/20").unwrap().required_agents, 12);
    assert_eq!(set.get("80/30").unwrap().required_agents, 12);
    assert_eq!(set.get("90/20").unwrap().required_agents, 13);
    assert_eq!(set.get("90/30").unwrap().required_agents, 13);
}

#[test]
fn custom_order_is_preserved() {
    let scenarios = vec![
        ScenarioSpec::new("strict", 95.0, 10.0),
        ScenarioSpec::new("loose", 50.0, 60.0),
        ScenarioSpec::new("middle", 80.0, 20.0),
    ];
    let set = compare(100.0, 5.0, 0.30, &scenarios).unwrap();
    let names: Vec<&str> = set.names().collect();
    assert_eq!(names, vec!["strict", "loose", "middle"]);
}

#[test]
fn infeasible_scenarios_are_omitted() {
    let comparator = ScenarioComparator::new(
        Demand::new(100.0, 5.0),
        SearchConfig::default().with_max_agents(12),
    );
    let set = comparator.compare(&standard_scenarios()).unwrap();

    assert_eq!(set.len(), 2);
    assert!(set.contains("80/20"));
    assert!(set.contains("80/30"));
    assert!(!set.contains("90/20"), "90/20 needs 13 agents");
    assert!(set.get("90/30").is_none());
}

#[test]
fn every_scenario_infeasible_gives_an_empty_set() {
    let comparator = ScenarioComparator::new(
        Demand::new(100.0, 5.0),
        SearchConfig::default().with_max_agents(5),
    );
    let set = comparator.compare(&standard_scenarios()).unwrap();
    assert!(set.is_empty());
}

#[test]
fn parallel_comparison_matches_sequential() {
    let scenarios: Vec<ScenarioSpec> = (0..16)
        .map(|i| ScenarioSpec::new(format!("s{i}"), 50.0 + 3.0 * f64::from(i), 10.0 + f64::from(i)))
        .collect();
    let comparator = ScenarioComparator::new(Demand::new(420.0, 3.5), SearchConfig::default());

    let sequential = comparator.compare(&scenarios).unwrap();
    let parallel = comparator.compare_parallel(&scenarios).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn roster_delta_between_scenarios() {
    let set = compare(100.0, 5.0, 0.30, &standard_scenarios()).unwrap();
    let delta = set.roster_delta("80/20", "90/30").unwrap();
    assert_eq!(delta.extra_roster, 1, "18 -> 19 rostered agents");
    assert!((delta.pct_increase - 100.0 / 18.0).abs() < 1e-9);

    assert!(set.roster_delta("80/20", "missing").is_none());
}

#[test]
fn invalid_unavailability_rejects_the_whole_batch() {
    let err = compare(100.0, 5.0, 1.0, &standard_scenarios()).unwrap_err();
    assert!(matches!(err, StaffingError::InvalidInput { .. }));
}

#[test]
fn json_output_keeps_scenario_order() {
    let scenarios = vec![
        ScenarioSpec::new("90/30", 90.0, 30.0),
        ScenarioSpec::new("80/20", 80.0, 20.0),
    ];
    let json = compare(100.0, 5.0, 0.30, &scenarios).unwrap().to_json().unwrap();

    let first = json.find("\"90/30\"").expect("90/30 key");
    let second = json.find("\"80/20\"").expect("80/20 key");
    assert!(first < second, "{json}");
    assert!(json.contains("\"required_agents\": 13"));
}

#[test]
fn duplicate_scenario_names_are_rejected() {
    let scenarios = vec![
        ScenarioSpec::new("sla", 80.0, 20.0),
        ScenarioSpec::new("sla", 95.0, 10.0),
    ];
    match compare(100.0, 5.0, 0.30, &scenarios) {
        Err(StaffingError::InvalidInput { field, .. }) => assert_eq!(field, "scenario.name"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }

    let comparator = ScenarioComparator::new(Demand::new(100.0, 5.0), SearchConfig::default());
    assert!(comparator.compare_parallel(&scenarios).is_err());
}
