//! Ring Attractor - End-to-End Pipeline
//!
//! ```text
//! config → fixed points → midpoint → wired network
//!        → simulation loop (+ stimulus) → potential trace → decoder → error
//! ```
//!
//! The topology and midpoint are fixed at construction. `simulate()` resets
//! neuron state first, so repeated calls replay the same run.

use super::{
    resolve_midpoint, ConnectivityBuilder, ConnectivityPolicy, Decoded, Decoder, PotentialTrace,
    RingNetwork, SimulationLoop, SimulationReport, StimulusScheduler, TopologySnapshot,
};
use crate::config::RingConfig;
use crate::error::Result;

/// Output of one run
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOutcome {
    /// `n × total_ticks` membrane potentials
    pub trace: PotentialTrace,
    /// Decoded bump position and error
    pub decoded: Decoded,
    /// Stimulation center / decoding reference
    pub midpoint: usize,
}

/// Ring attractor with fixed-point wells
///
/// Models a ring of LIF neurons with Mexican-hat connectivity:
/// nearby neurons excite, neurons 5-11 steps away inhibit.
#[derive(Clone, Debug)]
pub struct RingAttractor {
    config: RingConfig,
    network: RingNetwork,
    midpoint: usize,
}

impl RingAttractor {
    /// Validate `config` and build the wired ring
    pub fn new(config: RingConfig) -> Result<Self> {
        config.validate()?;
        let weights = config.weights()?;

        let fixed_points = config
            .connectivity
            .select_fixed_points(config.n, config.fixed_point_count);
        log::debug!("fixed points: {:?}", fixed_points.ids());
        let midpoint = resolve_midpoint(config.n, &fixed_points)?;

        let mut network = RingNetwork::new(
            config.n,
            config.profile,
            config.noise_mean,
            config.noise,
            config.seed,
        );
        ConnectivityBuilder::new(config.connectivity, weights).wire(&mut network, fixed_points);

        Ok(Self {
            config,
            network,
            midpoint,
        })
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    pub fn network(&self) -> &RingNetwork {
        &self.network
    }

    pub fn midpoint(&self) -> usize {
        self.midpoint
    }

    /// Sparse export of the wiring
    pub fn topology(&self) -> TopologySnapshot {
        TopologySnapshot::capture(&self.network)
    }

    /// Stimulus around the midpoint as configured
    pub fn stimulus(&self) -> Result<StimulusScheduler> {
        Ok(StimulusScheduler::from_config(
            self.midpoint,
            &self.config.stimulus,
            self.config.stimulus_weight()?,
            self.config.dt,
        ))
    }

    /// Restore resting state with the configured seed
    pub fn reset(&mut self) {
        self.network.reseed(self.config.seed);
    }

    /// Run the configured ticks and decode the trailing window
    pub fn simulate(&mut self) -> Result<SimulationOutcome> {
        self.reset();
        let stimulus = self.stimulus()?;

        let mut sim = SimulationLoop::new(self.config.total_ticks as u64, self.config.dt)
            .with_synaptic_delay(self.config.synaptic_delay)
            .with_parallelism(self.config.parallelism);
        let trace = sim.run(&mut self.network, &stimulus);

        let decoded = Decoder::new(self.config.decode_window).decode(&trace, self.midpoint)?;
        log::info!(
            "decoded {:.3}° vs {:.3}° at midpoint {}: error {:.3}°",
            decoded.decoded_angle,
            decoded.true_angle,
            self.midpoint,
            decoded.error
        );

        Ok(SimulationOutcome {
            trace,
            decoded,
            midpoint: self.midpoint,
        })
    }

    /// Simulate and package the result for export
    pub fn report(&mut self, include_trace: bool) -> Result<SimulationReport> {
        let outcome = self.simulate()?;
        Ok(SimulationReport {
            config: self.config.clone(),
            fixed_points: self.network.fixed_points().ids().to_vec(),
            midpoint: outcome.midpoint,
            decoded: outcome.decoded,
            spike_count: outcome.trace.spike_count(),
            trace: include_trace.then_some(outcome.trace),
        })
    }
}
