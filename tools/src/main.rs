//! staffing-runner: Erlang C staffing calculator.
//!
//! Usage:
//!   staffing-runner --calls 100 --aht 5 --target 80 --window 20 --shrinkage 0.3
//!   staffing-runner --config staffing.json --records megaline_calls.csv --json

use anyhow::{Context, Result};
use staffing_core::{
    config::{SearchStrategy, StaffingConfig},
    demand::{load_records, DemandProfile},
    plan::{hourly_plan, peak_agents, HourlyRequirement},
    scenario::{ScenarioComparator, ScenarioSet},
    staffing::{find_required_agents, StaffingResult},
    types::{Demand, ServiceLevelTarget},
};
use std::env;

#[derive(serde::Serialize)]
struct RunReport<'a> {
    demand:    Demand,
    target:    ServiceLevelTarget,
    result:    Option<&'a StaffingResult>,
    scenarios: &'a ScenarioSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile:   Option<&'a DemandProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan:      Option<&'a [HourlyRequirement]>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");

    let mut config = match find_flag(&args, "--config") {
        Some(path) => StaffingConfig::load(path)?,
        None => StaffingConfig::default(),
    };
    config.search.unavailability_fraction =
        parse_arg(&args, "--shrinkage", config.search.unavailability_fraction);
    config.search.max_agents = parse_arg(&args, "--max-agents", config.search.max_agents);
    if args.iter().any(|a| a == "--bisect") {
        config.search.strategy = SearchStrategy::Bisection;
    }
    config.validate()?;

    let profile = match find_flag(&args, "--records") {
        Some(path) => {
            let records = load_records(path)?;
            Some(DemandProfile::from_records(&records).context("aggregating call records")?)
        }
        None => None,
    };

    // Explicit flags override whatever the records say.
    let default_aht = profile.as_ref().map_or(5.0, |p| p.aht_minutes);
    let default_calls = profile
        .as_ref()
        .and_then(|p| p.peak_hour())
        .map_or(100.0, |h| h.calls_per_hour_avg);
    let demand = Demand::new(
        parse_arg(&args, "--calls", default_calls),
        parse_arg(&args, "--aht", default_aht),
    );
    let target = ServiceLevelTarget::new(
        parse_arg(&args, "--target", 80.0),
        parse_arg(&args, "--window", 20.0),
    );

    log::info!(
        "runner: calls={} aht={}m target={}/{}s shrinkage={} max_agents={}",
        demand.calls_per_hour,
        demand.aht_minutes,
        target.service_level_pct,
        target.window_seconds,
        config.search.unavailability_fraction,
        config.search.max_agents
    );

    let result = find_required_agents(&demand, &target, &config.search)?;
    let scenarios = ScenarioComparator::new(demand, config.search).compare(&config.scenarios)?;
    let plan = match &profile {
        Some(p) => Some(hourly_plan(p, &target, &config.search)?),
        None => None,
    };

    if json_mode {
        let report = RunReport {
            demand,
            target,
            result: result.as_ref(),
            scenarios: &scenarios,
            profile: profile.as_ref(),
            plan: plan.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_scenario(&demand, &target, config.search.unavailability_fraction);
    print_result(result.as_ref(), &target);
    print_comparison(&scenarios);
    if let (Some(profile), Some(plan)) = (&profile, &plan) {
        print_plan(profile, plan);
    }
    Ok(())
}

fn print_scenario(demand: &Demand, target: &ServiceLevelTarget, shrinkage: f64) {
    println!("Erlang C staffing calculator");
    println!("  call volume:   {} calls/hour", demand.calls_per_hour);
    println!("  handle time:   {} minutes", demand.aht_minutes);
    println!(
        "  target:        {}% in {} seconds",
        target.service_level_pct, target.window_seconds
    );
    println!("  shrinkage:     {:.1}%", shrinkage * 100.0);
    println!();
}

fn print_result(result: Option<&StaffingResult>, target: &ServiceLevelTarget) {
    println!("=== RESULT ===");
    match result {
        Some(r) => {
            println!("  agents (on phones):   {}", r.required_agents);
            println!("  roster (shrinkage):   {}", r.required_roster);
            println!("  service level:        {}%", r.service_level);
            println!("  occupancy:            {}%", r.occupancy);
            println!("  traffic intensity:    {:.2} Erlangs", r.offered_load);
        }
        None => println!(
            "  {}/{}s cannot be met within the agent ceiling",
            target.service_level_pct, target.window_seconds
        ),
    }
    println!();
}

fn print_comparison(scenarios: &ScenarioSet) {
    println!("=== SERVICE LEVEL COMPARISON ===");
    println!(
        "  {:<10} {:<10} {:<10} {:<12} Occupancy",
        "SLA", "Agents", "Roster", "Actual SL"
    );
    for (name, r) in scenarios.iter() {
        println!(
            "  {:<10} {:<10} {:<10} {:<12.1} {:.1}%",
            name, r.required_agents, r.required_roster, r.service_level, r.occupancy
        );
    }
    if let Some(delta) = scenarios.roster_delta("80/20", "90/30") {
        println!();
        println!(
            "  80/20 -> 90/30 needs {} more rostered agents ({:.1}% increase)",
            delta.extra_roster, delta.pct_increase
        );
    }
    println!();
}

fn print_plan(profile: &DemandProfile, plan: &[HourlyRequirement]) {
    println!("=== HOURLY PLAN ===");
    println!(
        "  {} calls over {} days, AHT {:.2} minutes",
        profile.total_calls, profile.num_days, profile.aht_minutes
    );
    for h in plan {
        match &h.staffing {
            Some(s) => println!(
                "  {:02}:00  {:>8.1} calls/h  {:>4} agents  {:>4} roster",
                h.hour, h.calls_per_hour, s.required_agents, s.required_roster
            ),
            None => println!("  {:02}:00  {:>8.1} calls/h  infeasible", h.hour, h.calls_per_hour),
        }
    }
    if let Some(peak) = peak_agents(plan) {
        println!("  peak on-phone requirement: {peak} agents");
    }
}

fn find_flag<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
