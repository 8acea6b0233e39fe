//! Stimulus Scheduler - External Drive Around the Midpoint
//!
//! For every tick `t > begin_time`, each neuron with id in
//! `[midpoint − 2, midpoint + 2]` receives `spike_count` identical
//! excitatory events `((t − begin_time)·dt, weight)`.
//!
//! The target range is NOT wrapped around the ring: ids below 0 or at/after
//! `n` simply match no neuron.

use serde::{Deserialize, Serialize};

use super::{PendingEvent, RingNeuron, SpikingNeuron, SynapseKind};

/// Half-width of the stimulated window (5 neurons total)
pub const STIMULUS_HALF_WIDTH: usize = 2;

/// Stimulus parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StimulusConfig {
    /// Copies of the event appended per target and tick
    pub spike_count: usize,
    /// Event weight; `None` uses the base excitatory weight
    pub weight: Option<f64>,
    /// Ticks at or before this receive no drive
    pub begin_time: u64,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            spike_count: 5,
            weight: None,
            begin_time: 0,
        }
    }
}

/// Injects the external drive each tick
#[derive(Clone, Debug, PartialEq)]
pub struct StimulusScheduler {
    midpoint: usize,
    spike_count: usize,
    weight: f64,
    begin_time: u64,
    dt: f64,
}

impl StimulusScheduler {
    pub fn new(midpoint: usize, spike_count: usize, weight: f64, begin_time: u64, dt: f64) -> Self {
        Self {
            midpoint,
            spike_count,
            weight,
            begin_time,
            dt,
        }
    }

    /// Build from config, falling back to `default_weight`
    pub fn from_config(
        midpoint: usize,
        config: &StimulusConfig,
        default_weight: f64,
        dt: f64,
    ) -> Self {
        Self::new(
            midpoint,
            config.spike_count,
            config.weight.unwrap_or(default_weight),
            config.begin_time,
            dt,
        )
    }

    pub fn midpoint(&self) -> usize {
        self.midpoint
    }

    /// Whether `id` is in the unwrapped window around the midpoint
    pub fn targets(&self, id: usize) -> bool {
        let low = self.midpoint.saturating_sub(STIMULUS_HALF_WIDTH);
        let high = self.midpoint + STIMULUS_HALF_WIDTH;
        id >= low && id <= high
    }

    /// Target ids present on a ring of `n`
    pub fn target_ids(&self, n: usize) -> Vec<usize> {
        (0..n).filter(|&id| self.targets(id)).collect()
    }

    /// Apply the drive for tick `t` to one neuron
    ///
    /// Returns the number of events appended.
    pub fn inject<N: SpikingNeuron>(&self, neuron: &mut RingNeuron<N>, t: u64) -> usize {
        if t <= self.begin_time || !self.targets(neuron.id()) {
            return 0;
        }

        let event = PendingEvent::new((t - self.begin_time) as f64 * self.dt, self.weight);
        let model = neuron.model_mut();
        for _ in 0..self.spike_count {
            model.schedule(SynapseKind::Excitatory, event);
        }
        self.spike_count
    }
}
