//! Core Traits - Neuron Dynamics Contract
//!
//! ## SpikingNeuron Trait
//!
//! The ONLY interface the simulation loop uses to drive a neuron.
//! A neuron owns its membrane state and its two pending-event queues;
//! nothing outside reads another neuron's potential mid-tick.
//!
//! ## Spike Marker
//!
//! On the tick a neuron fires, `membrane()` reads exactly `0.0`.
//! The decoder relies on that convention.

use serde::{Deserialize, Serialize};

/// Synapse polarity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynapseKind {
    /// Near ring distance, depolarizing
    Excitatory,
    /// Far ring distance, hyperpolarizing
    Inhibitory,
}

/// Scheduled post-synaptic contribution not yet applied
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingEvent {
    /// Time remaining until the event is due (seconds)
    pub delay: f64,
    /// Conductance added when the event is consumed
    pub weight: f64,
}

impl PendingEvent {
    pub fn new(delay: f64, weight: f64) -> Self {
        Self { delay, weight }
    }
}

/// Neuron dynamics collaborator
pub trait SpikingNeuron: Send + Sync {
    /// Advance one tick of `dt` seconds
    ///
    /// Consumes due pending events, applies leak and noise, and fires if
    /// the threshold is crossed. Returns true on the spike tick.
    /// Must be called exactly once per tick.
    fn step(&mut self, dt: f64) -> bool;

    /// Membrane potential (V); exactly 0.0 on a spike tick
    fn membrane(&self) -> f64;

    /// Append an event to the excitatory or inhibitory queue
    fn schedule(&mut self, kind: SynapseKind, event: PendingEvent);

    /// Number of events waiting in one queue
    fn pending(&self, kind: SynapseKind) -> usize;

    /// Restore resting state, clear queues and reseed the noise source
    fn reset(&mut self, seed: u64);

    /// Whether the last step produced a spike
    fn is_spiking(&self) -> bool {
        self.membrane() == 0.0
    }
}
