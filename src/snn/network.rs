//! Ring Network - Neuron Arena with Synaptic Maps
//!
//! Neurons live in a `Vec` indexed `0..n`; synapses are keyed by target id,
//! never by reference. The topology is written once by
//! `ConnectivityBuilder` and is read-only while the simulation runs.

use std::collections::BTreeMap;

use super::geometry::neuron_angle;
use super::{FixedPointSet, LifNeuron, LifProfile, PendingEvent, SpikingNeuron, SynapseKind};

/// Outgoing synapse maps of one neuron (target id → weight)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Synapses {
    exc: BTreeMap<usize, f64>,
    inh: BTreeMap<usize, f64>,
}

impl Synapses {
    /// Excitatory targets
    pub fn excitatory(&self) -> &BTreeMap<usize, f64> {
        &self.exc
    }

    /// Inhibitory targets
    pub fn inhibitory(&self) -> &BTreeMap<usize, f64> {
        &self.inh
    }

    /// Map for one kind
    pub fn of(&self, kind: SynapseKind) -> &BTreeMap<usize, f64> {
        match kind {
            SynapseKind::Excitatory => &self.exc,
            SynapseKind::Inhibitory => &self.inh,
        }
    }

    pub(crate) fn set(&mut self, kind: SynapseKind, target: usize, weight: f64) {
        match kind {
            SynapseKind::Excitatory => self.exc.insert(target, weight),
            SynapseKind::Inhibitory => self.inh.insert(target, weight),
        };
    }

    pub(crate) fn clear(&mut self) {
        self.exc.clear();
        self.inh.clear();
    }

    pub fn len(&self) -> usize {
        self.exc.len() + self.inh.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exc.is_empty() && self.inh.is_empty()
    }
}

/// One neuron of the ring, driven by model `N`
#[derive(Clone, Debug)]
pub struct RingNeuron<N: SpikingNeuron = LifNeuron> {
    id: usize,
    /// Fixed at creation (degrees)
    angle: f64,
    synapses: Synapses,
    model: N,
}

impl<N: SpikingNeuron> RingNeuron<N> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn synapses(&self) -> &Synapses {
        &self.synapses
    }

    pub(crate) fn synapses_mut(&mut self) -> &mut Synapses {
        &mut self.synapses
    }

    /// Dynamics state (membrane, queues)
    pub fn model(&self) -> &N {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut N {
        &mut self.model
    }

    /// Membrane potential (V)
    pub fn potential(&self) -> f64 {
        self.model.membrane()
    }
}

/// Ring of spiking neurons plus its fixed-point set
#[derive(Clone, Debug)]
pub struct RingNetwork<N: SpikingNeuron = LifNeuron> {
    neurons: Vec<RingNeuron<N>>,
    fixed_points: FixedPointSet,
    /// Noise seed the neurons were created (or last reset) with
    seed: u64,
}

impl RingNetwork<LifNeuron> {
    /// Create `n` resting, unwired LIF neurons
    pub fn new(n: usize, profile: LifProfile, noise_mean: f64, noise_std: f64, seed: u64) -> Self {
        Self::from_models(
            (0..n)
                .map(|id| LifNeuron::new(id, profile, noise_mean, noise_std, seed))
                .collect(),
            seed,
        )
    }
}

impl<N: SpikingNeuron> RingNetwork<N> {
    /// Place `models` on the ring in order, model `i` becoming neuron `i`
    ///
    /// The models are reset with `seed` so every ring starts at rest.
    pub fn from_models(models: Vec<N>, seed: u64) -> Self {
        let n = models.len();
        let neurons = models
            .into_iter()
            .enumerate()
            .map(|(id, mut model)| {
                model.reset(seed);
                RingNeuron {
                    id,
                    angle: neuron_angle(id, n),
                    synapses: Synapses::default(),
                    model,
                }
            })
            .collect();

        Self {
            neurons,
            fixed_points: FixedPointSet::empty(),
            seed,
        }
    }

    /// Ring size `n`
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[RingNeuron<N>] {
        &self.neurons
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [RingNeuron<N>] {
        &mut self.neurons
    }

    pub fn neuron(&self, id: usize) -> Option<&RingNeuron<N>> {
        self.neurons.get(id)
    }

    pub fn neuron_mut(&mut self, id: usize) -> Option<&mut RingNeuron<N>> {
        self.neurons.get_mut(id)
    }

    pub fn fixed_points(&self) -> &FixedPointSet {
        &self.fixed_points
    }

    pub(crate) fn set_fixed_points(&mut self, fixed_points: FixedPointSet) {
        self.fixed_points = fixed_points;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Angles of all neurons, indexed by id
    pub fn angles(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.angle).collect()
    }

    /// Weight of `source → target`, if such a synapse exists
    pub fn weight(&self, source: usize, target: usize, kind: SynapseKind) -> Option<f64> {
        self.neurons
            .get(source)
            .and_then(|n| n.synapses.of(kind).get(&target).copied())
    }

    /// Total number of synapses
    pub fn synapse_count(&self) -> usize {
        self.neurons.iter().map(|n| n.synapses.len()).sum()
    }

    /// Dense `n × n` signed matrix, row = source
    ///
    /// Excitatory weights are positive, inhibitory negative; where a pair
    /// carries both (small rings), the inhibitory entry wins.
    pub fn dense_matrix(&self) -> Vec<Vec<f64>> {
        let n = self.neurons.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for neuron in &self.neurons {
            let row = &mut matrix[neuron.id];
            for (&target, &w) in &neuron.synapses.exc {
                row[target] = w;
            }
            for (&target, &w) in &neuron.synapses.inh {
                row[target] = -w;
            }
        }
        matrix
    }

    /// Deliver spikes of `sources` (ascending) to their targets' queues
    pub(crate) fn deliver_spikes(&mut self, sources: &[usize], delay: f64) {
        for &source in sources {
            // Clone the maps so targets can be borrowed mutably
            let synapses = self.neurons[source].synapses.clone();
            for (kind, map) in [
                (SynapseKind::Excitatory, &synapses.exc),
                (SynapseKind::Inhibitory, &synapses.inh),
            ] {
                for (&target, &weight) in map {
                    self.neurons[target]
                        .model
                        .schedule(kind, PendingEvent::new(delay, weight));
                }
            }
        }
    }

    /// Restore every neuron to rest with the creation seed
    pub fn reset(&mut self) {
        let seed = self.seed;
        self.reseed(seed);
    }

    /// Restore every neuron to rest with a new noise seed
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        for neuron in &mut self.neurons {
            neuron.model.reset(seed);
        }
    }
}
