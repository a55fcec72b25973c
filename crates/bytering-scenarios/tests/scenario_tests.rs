//! Runs each scenario end to end and vets the drained output, the stats
//! counters, and ring conservation afterwards.

use bytering_scenarios::{
    verify_conservation, verify_framed, verify_overwrite, verify_stream, ArcStatsSink,
    RingScenarioEngine, ScenarioConfig, ScenarioError, ScenarioStats,
};

fn run(config: ScenarioConfig) -> (RingScenarioEngine<ArcStatsSink>, ScenarioStats) {
    let sink = ArcStatsSink::default();
    let mut engine = RingScenarioEngine::new(config, sink.clone()).expect("valid scenario");
    engine.run().expect("scenario completes");
    let stats = *sink.0.lock();
    (engine, stats)
}

#[test]
fn stream_scenario_moves_every_byte() {
    let (engine, stats) = run(ScenarioConfig::stream(64, 10_000, 24));
    verify_stream(&engine.drain_report(), &stats, 10_000).unwrap();
    verify_conservation(&engine.status()).unwrap();
    assert!(
        stats.stalls > 0,
        "a 64-byte ring cannot absorb 10k bytes without stalling"
    );
}

#[test]
fn framed_scenario_round_trips_every_item() {
    let (engine, stats) = run(ScenarioConfig::framed(96, 300, 40));
    verify_framed(&engine.drain_report(), &stats, 300, 40).unwrap();
    verify_conservation(&engine.status()).unwrap();
    assert!(stats.stalls > 0, "300 items must overflow a 96-byte ring");
}

#[test]
fn overwrite_scenario_retains_newest_records() {
    let (engine, stats) = run(ScenarioConfig::overwrite(64, 16, 23));
    verify_overwrite(&engine.drain_report(), &stats, 16, 23, 64).unwrap();
    verify_conservation(&engine.status()).unwrap();
    assert_eq!(stats.evictions, 19);
}

#[test]
fn short_overwrite_run_keeps_everything() {
    let (engine, stats) = run(ScenarioConfig::overwrite(64, 16, 3));
    verify_overwrite(&engine.drain_report(), &stats, 16, 3, 64).unwrap();
    assert_eq!(stats.evictions, 0);
}

#[test]
fn zero_length_stream_completes() {
    let (engine, stats) = run(ScenarioConfig::stream(32, 0, 8));
    verify_stream(&engine.drain_report(), &stats, 0).unwrap();
    verify_conservation(&engine.status()).unwrap();
}

#[test]
fn misconfigured_scenarios_are_rejected() {
    for config in [
        ScenarioConfig::stream(0, 100, 8),
        ScenarioConfig::stream(32, 100, 64),
        ScenarioConfig::framed(16, 10, 32),
        ScenarioConfig::overwrite(20, 8, 5),
    ] {
        let result = RingScenarioEngine::new(config, ArcStatsSink::default());
        assert!(matches!(result, Err(ScenarioError::InvalidConfig(_))));
    }
}
