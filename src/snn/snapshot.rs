//! Snapshot Types for Export
//!
//! Serializable views of a wired ring and of a finished run. Rendering
//! (heatmaps, images) is left to whatever consumes the JSON.

use serde::{Deserialize, Serialize};

use super::{Decoded, PotentialTrace, RingNetwork, SpikingNeuron, SynapseKind};
use crate::config::RingConfig;

/// One directed synapse
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SynapseRecord {
    pub from: usize,
    pub to: usize,
    pub kind: SynapseKind,
    pub weight: f64,
}

/// Sparse topology: synapses + fixed points
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    /// Ring size
    pub neuron_count: usize,
    /// Fixed-point ids, ascending
    pub fixed_points: Vec<usize>,
    /// All synapses, ordered by source, kind, target
    pub synapses: Vec<SynapseRecord>,
}

impl TopologySnapshot {
    /// Capture the topology of `network`
    pub fn capture<N: SpikingNeuron>(network: &RingNetwork<N>) -> Self {
        let mut synapses = Vec::with_capacity(network.synapse_count());
        for neuron in network.neurons() {
            for kind in [SynapseKind::Excitatory, SynapseKind::Inhibitory] {
                for (&to, &weight) in neuron.synapses().of(kind) {
                    synapses.push(SynapseRecord {
                        from: neuron.id(),
                        to,
                        kind,
                        weight,
                    });
                }
            }
        }

        Self {
            neuron_count: network.len(),
            fixed_points: network.fixed_points().ids().to_vec(),
            synapses,
        }
    }

    /// Outgoing synapses of `source`
    pub fn outgoing(&self, source: usize) -> impl Iterator<Item = &SynapseRecord> {
        self.synapses.iter().filter(move |s| s.from == source)
    }
}

/// Result of one simulate-and-decode run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Configuration the run used
    pub config: RingConfig,
    /// Fixed-point ids
    pub fixed_points: Vec<usize>,
    /// Stimulation center / decoding reference
    pub midpoint: usize,
    /// Decoder output
    pub decoded: Decoded,
    /// Spike markers across the whole trace
    pub spike_count: usize,
    /// Full potential trace (omitted unless requested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<PotentialTrace>,
}

impl SimulationReport {
    /// Rough size of the JSON payload in bytes
    pub fn size_bytes(&self) -> usize {
        let (n, ticks) = self.trace.as_ref().map_or((0, 0), PotentialTrace::shape);
        // ~24 chars per serialized f64
        n * ticks * 24 + self.fixed_points.len() * 4 + 512
    }
}
