//! Service-level formula tests.

use staffing_core::{erlang::wait_probability, service_level::service_level};

#[test]
fn overloaded_system_has_zero_service_level() {
    // 100 calls/h at 300s = 8.333 Erlangs.
    for agents in 0..=8 {
        assert_eq!(service_level(agents, 100.0, 300.0, 20.0), 0.0);
    }
    // Exactly at the load is still unstable.
    assert_eq!(service_level(10, 120.0, 300.0, 20.0), 0.0);
}

#[test]
fn service_level_follows_the_erlang_c_formula() {
    let load = 100.0 * 300.0 / 3600.0;
    let p = wait_probability(12, load);
    let expected = (1.0 - p * (-(12.0 - load) * 20.0 / 300.0_f64).exp()) * 100.0;
    let actual = service_level(12, 100.0, 300.0, 20.0);
    assert!((actual - expected).abs() < 1e-12);
    assert!((actual - 86.2188).abs() < 1e-3, "SL(12) = {actual}");
}

#[test]
fn eleven_agents_miss_eighty_twenty_and_twelve_meet_it() {
    let sl_11 = service_level(11, 100.0, 300.0, 20.0);
    let sl_12 = service_level(12, 100.0, 300.0, 20.0);
    assert!(sl_11 < 80.0, "SL(11) = {sl_11:.3}");
    assert!(sl_12 >= 80.0, "SL(12) = {sl_12:.3}");
}

#[test]
fn wider_window_never_lowers_service_level() {
    for agents in 9..30 {
        let narrow = service_level(agents, 100.0, 300.0, 20.0);
        let wide = service_level(agents, 100.0, 300.0, 30.0);
        assert!(wide >= narrow, "agents={agents}: {wide} < {narrow}");
    }
}

#[test]
fn service_level_stays_in_percent_range() {
    for agents in 1..200 {
        let sl = service_level(agents, 1_200.0, 240.0, 15.0);
        assert!((0.0..=100.0).contains(&sl), "agents={agents}: {sl}");
    }
    assert_eq!(service_level(1, 0.0, 300.0, 20.0), 100.0, "no calls, nobody waits");
}
