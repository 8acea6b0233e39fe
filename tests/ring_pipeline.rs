//! End-to-end runs through the public API

use ring_attractor::snn::neuron_angle;
use ring_attractor::{
    Connectivity, Decoder, Parallelism, PotentialTrace, RingAttractor, RingConfig, RingError,
    StimulusConfig, SynapseKind,
};

fn scenario() -> RingConfig {
    RingConfig {
        n: 64,
        noise: 2.0e-3,
        weights: vec![0.050, 0.088, 0.050, 0.15],
        fixed_point_count: 2,
        total_ticks: 100,
        decode_window: 30,
        stimulus: StimulusConfig {
            spike_count: 5,
            weight: Some(0.050),
            begin_time: 0,
        },
        ..Default::default()
    }
}

#[test]
fn test_scenario_produces_valid_trace_and_error() {
    let mut ring = RingAttractor::new(scenario()).unwrap();
    assert_eq!(ring.midpoint(), 17);

    let outcome = ring.simulate().unwrap();
    assert_eq!(outcome.trace.shape(), (64, 100));
    assert!(outcome.trace.is_finite());
    assert!(outcome.decoded.error.is_finite());
    assert!((0.0..360.0).contains(&outcome.decoded.error));
    assert_eq!(outcome.decoded.true_angle, neuron_angle(17, 64));
    assert!(outcome.decoded.ticks_used > 0);
}

#[test]
fn test_bump_stays_near_midpoint_without_noise() {
    let config = RingConfig { noise: 0.0, ..scenario() };
    let mut ring = RingAttractor::new(config).unwrap();
    let outcome = ring.simulate().unwrap();

    let spikes = |id: usize| {
        outcome.trace.row(id).unwrap().iter().filter(|&&v| v == 0.0).count()
    };
    assert!(spikes(17) > 0);
    assert_eq!(spikes(49), 0);
    assert!(outcome.decoded.error < 10.0);
}

#[test]
fn test_same_seed_same_trace() {
    let a = RingAttractor::new(scenario()).unwrap().simulate().unwrap();
    let b = RingAttractor::new(scenario()).unwrap().simulate().unwrap();
    assert_eq!(a.trace, b.trace);
    assert_eq!(a.decoded, b.decoded);
}

#[test]
fn test_parallelism_does_not_change_output() {
    let seq = RingConfig { parallelism: Parallelism::Sequential, ..scenario() };
    let par = RingConfig { parallelism: Parallelism::Parallel, ..scenario() };
    let a = RingAttractor::new(seq).unwrap().simulate().unwrap();
    let b = RingAttractor::new(par).unwrap().simulate().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_zero_fixed_points_uses_half_ring() {
    let config = RingConfig { fixed_point_count: 0, ..scenario() };
    let mut ring = RingAttractor::new(config).unwrap();
    assert_eq!(ring.midpoint(), 32);
    assert!(ring.network().fixed_points().is_empty());

    // Every neuron is base tier
    let net = ring.network();
    assert_eq!(net.weight(10, 11, SynapseKind::Excitatory), Some(0.050));
    assert_eq!(net.weight(10, 15, SynapseKind::Inhibitory), Some(0.088));

    let outcome = ring.simulate().unwrap();
    assert_eq!(outcome.trace.shape(), (64, 100));
}

#[test]
fn test_singleton_connectivity_runs() {
    let config = RingConfig {
        connectivity: Connectivity::Singleton,
        fixed_point_count: 4,
        ..scenario()
    };
    let mut ring = RingAttractor::new(config).unwrap();
    assert_eq!(ring.network().fixed_points().ids(), &[0, 16, 32, 48]);
    assert_eq!(ring.midpoint(), 24);
    // distance 8 carries no synapse in the singleton template
    assert_eq!(ring.network().weight(20, 28, SynapseKind::Inhibitory), None);
    assert!(ring.simulate().is_ok());
}

#[test]
fn test_quiet_ring_has_undefined_decode() {
    let config = RingConfig {
        noise: 0.0,
        stimulus: StimulusConfig { spike_count: 0, ..StimulusConfig::default() },
        ..scenario()
    };
    let mut ring = RingAttractor::new(config).unwrap();
    assert!(matches!(
        ring.simulate(),
        Err(RingError::UndefinedDecode { window: 30 })
    ));
}

#[test]
fn test_decoder_on_handmade_trace() {
    // Bump alternating between neurons 7 and 9 of 32: mean at neuron 8 (90°)
    let mut rows = vec![vec![-0.07; 40]; 32];
    for t in 10..40 {
        rows[if t % 2 == 0 { 7 } else { 9 }][t] = 0.0;
    }
    let trace = PotentialTrace::from_rows(rows).unwrap();
    let decoded = Decoder::new(30).decode(&trace, 8).unwrap();
    assert!((decoded.decoded_angle - 90.0).abs() < 1e-9);
    assert!(decoded.error < 1e-9);
}

#[test]
fn test_report_json_roundtrip() {
    let mut ring = RingAttractor::new(scenario()).unwrap();
    let report = ring.report(false).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let restored: ring_attractor::SimulationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, report);
    assert_eq!(restored.config, scenario());
}
