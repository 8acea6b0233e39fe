//! Simulation Loop - Tick-Driven Network Execution
//!
//! Per tick `t`:
//!
//! 1. Stimulus injection for every neuron (completes before any step)
//! 2. `step()` every neuron (sequential or rayon, no cross-neuron reads)
//! 3. Record every membrane potential into the trace
//! 4. Deliver this tick's spikes into target queues (ascending source id)
//!
//! Steps 2 and 3 only touch neuron-local state, so parallel and sequential
//! execution produce identical traces for the same seed.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{PotentialTrace, RingNetwork, SpikingNeuron, StimulusScheduler};

/// Ring size from which `Parallelism::Auto` switches to rayon
pub const PARALLEL_THRESHOLD: usize = 512;

/// How neurons within one tick are stepped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
    /// Parallel from `PARALLEL_THRESHOLD` neurons up
    #[default]
    Auto,
    /// Always one neuron after another
    Sequential,
    /// Always rayon
    Parallel,
}

impl Parallelism {
    fn is_parallel(&self, n: usize) -> bool {
        match self {
            Self::Auto => n >= PARALLEL_THRESHOLD,
            Self::Sequential => false,
            Self::Parallel => true,
        }
    }
}

/// Loop state between runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, never run
    Idle,
    /// Last run reached `total_ticks`
    Finished { ticks: u64 },
}

/// Drives a wired network for a fixed number of ticks
#[derive(Clone, Debug)]
pub struct SimulationLoop {
    total_ticks: u64,
    /// Tick length (seconds)
    dt: f64,
    /// Delay of recurrent spike events (seconds)
    synaptic_delay: f64,
    parallelism: Parallelism,
    state: LoopState,
}

impl SimulationLoop {
    pub fn new(total_ticks: u64, dt: f64) -> Self {
        Self {
            total_ticks,
            dt,
            synaptic_delay: 0.0,
            parallelism: Parallelism::Auto,
            state: LoopState::Idle,
        }
    }

    pub fn with_synaptic_delay(mut self, delay: f64) -> Self {
        self.synaptic_delay = delay;
        self
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Run all ticks and return the `n × total_ticks` potential trace
    ///
    /// The network is not reset first; reset it to replay a run.
    pub fn run<N: SpikingNeuron>(
        &mut self,
        network: &mut RingNetwork<N>,
        stimulus: &StimulusScheduler,
    ) -> PotentialTrace {
        let n = network.len();
        let parallel = self.parallelism.is_parallel(n);
        let mut trace = PotentialTrace::with_capacity(n, self.total_ticks as usize);
        let mut injected = 0usize;
        let mut spikes_total = 0usize;

        for t in 0..self.total_ticks {
            for neuron in network.neurons_mut() {
                injected += stimulus.inject(neuron, t);
            }

            let dt = self.dt;
            let spiked: Vec<bool> = if parallel {
                network
                    .neurons_mut()
                    .par_iter_mut()
                    .map(|neuron| neuron.model_mut().step(dt))
                    .collect()
            } else {
                network
                    .neurons_mut()
                    .iter_mut()
                    .map(|neuron| neuron.model_mut().step(dt))
                    .collect()
            };

            for neuron in network.neurons() {
                trace.push(neuron.id(), neuron.potential());
            }

            let sources: Vec<usize> = spiked
                .iter()
                .enumerate()
                .filter_map(|(id, &s)| s.then_some(id))
                .collect();
            spikes_total += sources.len();
            network.deliver_spikes(&sources, self.synaptic_delay);
        }

        self.state = LoopState::Finished {
            ticks: self.total_ticks,
        };
        log::debug!(
            "ran {} ticks over {} neurons ({}): {} stimulus events, {} spikes",
            self.total_ticks,
            n,
            if parallel { "parallel" } else { "sequential" },
            injected,
            spikes_total
        );
        trace
    }
}
