//! Connectivity - Ring Wiring Policies
//!
//! Every neuron `s` projects to `(s ± i) mod n` for a fixed set of ring
//! offsets. Which offsets are excitatory or inhibitory, and how strong they
//! are, is decided by a `ConnectivityPolicy`. The tier (base or fixed-point)
//! is picked from the SOURCE neuron only, so the graph is directed.
//!
//! | Policy    | Fixed points             | 1..=4       | 5..=7 | 8    | 9..=11 |
//! |-----------|--------------------------|-------------|-------|------|--------|
//! | Clustered | `id mod (n div k) < 3`   | exc, flat   | inh   | inh  | inh    |
//! | Singleton | `id mod (n / k) == 0`    | exc, ln     | inh, ln | none | inh, exp |
//!
//! Distances >= 12 never carry a synapse.

use serde::{Deserialize, Serialize};

use super::fixed_points::{select_clustered, select_singleton};
use super::geometry::{backward, forward};
use super::{FixedPointSet, RingNetwork, SpikingNeuron, SynapseKind};
use crate::error::{Result, RingError};

/// Weight tier of a source neuron
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// Ordinary ring neuron
    Base,
    /// Fixed-point neuron (amplified local connectivity)
    FixedPoint,
}

/// Base weight 4-tuple `(wExcBase, wInhBase, wExcFP, wInhFP)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub exc_base: f64,
    pub inh_base: f64,
    pub exc_fixed: f64,
    pub inh_fixed: f64,
}

impl Weights {
    pub const fn new(exc_base: f64, inh_base: f64, exc_fixed: f64, inh_fixed: f64) -> Self {
        Self {
            exc_base,
            inh_base,
            exc_fixed,
            inh_fixed,
        }
    }

    /// (excitatory, inhibitory) weight for a tier
    pub fn for_tier(&self, tier: Tier) -> (f64, f64) {
        match tier {
            Tier::Base => (self.exc_base, self.inh_base),
            Tier::FixedPoint => (self.exc_fixed, self.inh_fixed),
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.exc_base, self.inh_base, self.exc_fixed, self.inh_fixed]
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(0.050, 0.088, 0.050, 0.15)
    }
}

impl TryFrom<&[f64]> for Weights {
    type Error = RingError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match values {
            [exc_base, inh_base, exc_fixed, inh_fixed] => {
                let weights = Self::new(*exc_base, *inh_base, *exc_fixed, *inh_fixed);
                if weights.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(RingError::config(format!(
                        "weights must be finite and non-negative, got {:?}",
                        values
                    )));
                }
                Ok(weights)
            }
            _ => Err(RingError::config(format!(
                "weight tuple needs exactly 4 entries, got {}",
                values.len()
            ))),
        }
    }
}

/// Wiring policy: fixed-point selection + distance-to-synapse template
pub trait ConnectivityPolicy: Send + Sync {
    /// Choose the fixed-point ids for a ring of `n` and requested count `k`
    fn select_fixed_points(&self, n: usize, k: usize) -> FixedPointSet;

    /// Synapse for ring distance `distance` from a source of `tier`
    fn synapse(
        &self,
        weights: &Weights,
        tier: Tier,
        distance: usize,
    ) -> Option<(SynapseKind, f64)>;

    /// Offsets in the order they are written (later writes win on small rings)
    fn offsets(&self) -> Vec<usize>;

    /// Policy name for logs and reports
    fn name(&self) -> &'static str;
}

/// Clustered fixed points with flat per-tier weights
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClusteredFixedPoints;

impl ConnectivityPolicy for ClusteredFixedPoints {
    fn select_fixed_points(&self, n: usize, k: usize) -> FixedPointSet {
        select_clustered(n, k)
    }

    fn synapse(
        &self,
        weights: &Weights,
        tier: Tier,
        distance: usize,
    ) -> Option<(SynapseKind, f64)> {
        let (exc, inh) = weights.for_tier(tier);
        match distance {
            1..=4 => Some((SynapseKind::Excitatory, exc)),
            5..=11 => Some((SynapseKind::Inhibitory, inh)),
            _ => None,
        }
    }

    fn offsets(&self) -> Vec<usize> {
        (5..=11).chain(1..=4).collect()
    }

    fn name(&self) -> &'static str {
        "clustered"
    }
}

/// Singleton fixed points with log/exp distance-decayed weights
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SingletonFixedPoints;

impl SingletonFixedPoints {
    const GAIN: f64 = 1.5;
}

impl ConnectivityPolicy for SingletonFixedPoints {
    fn select_fixed_points(&self, n: usize, k: usize) -> FixedPointSet {
        select_singleton(n, k)
    }

    fn synapse(
        &self,
        weights: &Weights,
        tier: Tier,
        distance: usize,
    ) -> Option<(SynapseKind, f64)> {
        let (exc, inh) = weights.for_tier(tier);
        let i = distance as f64;
        match distance {
            1..=4 => Some((SynapseKind::Excitatory, exc * (2.0 - i / 5.0).ln() * Self::GAIN)),
            5..=7 => Some((
                SynapseKind::Inhibitory,
                inh * (2.0 + (i - 5.0) / 3.0).ln() * Self::GAIN,
            )),
            9..=11 => Some((
                SynapseKind::Inhibitory,
                inh * (-0.5 - (i - 9.0) / 4.0).exp() * Self::GAIN,
            )),
            _ => None,
        }
    }

    fn offsets(&self) -> Vec<usize> {
        (9..=11).chain(5..=7).chain(1..=4).collect()
    }

    fn name(&self) -> &'static str {
        "singleton"
    }
}

/// Connectivity facade - the serializable policy selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Runs of 3 fixed points per segment, flat weights
    #[default]
    Clustered,
    /// One fixed point per segment, distance-decayed weights
    Singleton,
}

impl Connectivity {
    fn policy(&self) -> &dyn ConnectivityPolicy {
        match self {
            Self::Clustered => &ClusteredFixedPoints,
            Self::Singleton => &SingletonFixedPoints,
        }
    }
}

impl ConnectivityPolicy for Connectivity {
    fn select_fixed_points(&self, n: usize, k: usize) -> FixedPointSet {
        self.policy().select_fixed_points(n, k)
    }

    fn synapse(
        &self,
        weights: &Weights,
        tier: Tier,
        distance: usize,
    ) -> Option<(SynapseKind, f64)> {
        self.policy().synapse(weights, tier, distance)
    }

    fn offsets(&self) -> Vec<usize> {
        self.policy().offsets()
    }

    fn name(&self) -> &'static str {
        self.policy().name()
    }
}

/// Writes the synapse maps of every neuron in a network
#[derive(Clone, Debug)]
pub struct ConnectivityBuilder<P: ConnectivityPolicy = Connectivity> {
    policy: P,
    weights: Weights,
}

impl<P: ConnectivityPolicy> ConnectivityBuilder<P> {
    pub fn new(policy: P, weights: Weights) -> Self {
        Self { policy, weights }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Wire `network` around `fixed_points`
    ///
    /// Forward targets wrap as `(s + i) mod n`, backward as `(s − i) mod n`.
    pub fn wire<N: SpikingNeuron>(
        &self,
        network: &mut RingNetwork<N>,
        fixed_points: FixedPointSet,
    ) {
        let n = network.len();
        if n > 0 && n < 23 {
            log::warn!(
                "ring of {} neurons: forward and backward offsets up to 11 overlap",
                n
            );
        }

        let offsets = self.policy.offsets();
        for neuron in network.neurons_mut() {
            let s = neuron.id();
            let tier = if fixed_points.contains(s) {
                Tier::FixedPoint
            } else {
                Tier::Base
            };

            let synapses = neuron.synapses_mut();
            synapses.clear();
            for &i in &offsets {
                if let Some((kind, weight)) = self.policy.synapse(&self.weights, tier, i) {
                    synapses.set(kind, forward(s, i, n), weight);
                    synapses.set(kind, backward(s, i, n), weight);
                }
            }
        }

        network.set_fixed_points(fixed_points);
        log::debug!(
            "wired {} neurons with {} policy: {} synapses, {} fixed points",
            n,
            self.policy.name(),
            network.synapse_count(),
            network.fixed_points().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snn::LifProfile;

    fn network(n: usize) -> RingNetwork {
        RingNetwork::new(n, LifProfile::Cortical, 0.0, 0.0, 1)
    }

    fn wired(n: usize, k: usize, connectivity: Connectivity) -> RingNetwork {
        let mut net = network(n);
        let fps = connectivity.select_fixed_points(n, k);
        ConnectivityBuilder::new(connectivity, Weights::default()).wire(&mut net, fps);
        net
    }

    #[test]
    fn test_weight_tuple_arity() {
        assert!(Weights::try_from(&[0.05, 0.088, 0.05][..]).is_err());
        assert!(Weights::try_from(&[0.05, 0.088, 0.05, 0.15, 0.1][..]).is_err());
        let w = Weights::try_from(&[0.05, 0.088, 0.05, 0.15][..]).unwrap();
        assert_eq!(w, Weights::default());
        assert!(Weights::try_from(&[0.05, -0.1, 0.05, 0.15][..]).is_err());
    }

    #[test]
    fn test_wraparound_symmetry() {
        for n in [23, 64, 100] {
            let net = wired(n, 4, Connectivity::Clustered);
            for s in 0..n {
                for i in 1..=11 {
                    let kind = if i <= 4 {
                        SynapseKind::Excitatory
                    } else {
                        SynapseKind::Inhibitory
                    };
                    let fwd = net.weight(s, forward(s, i, n), kind);
                    let bwd = net.weight(s, backward(s, i, n), kind);
                    assert!(fwd.is_some(), "n={} s={} i={}", n, s, i);
                    assert_eq!(fwd, bwd, "n={} s={} i={}", n, s, i);
                }
            }
        }
    }

    #[test]
    fn test_tier_invariant() {
        let n = 64;
        let net = wired(n, 4, Connectivity::Clustered);
        let w = Weights::default();
        for neuron in net.neurons() {
            let (exc, inh) = if net.fixed_points().contains(neuron.id()) {
                (w.exc_fixed, w.inh_fixed)
            } else {
                (w.exc_base, w.inh_base)
            };
            assert_eq!(neuron.synapses().excitatory().len(), 8);
            assert_eq!(neuron.synapses().inhibitory().len(), 14);
            assert!(neuron.synapses().excitatory().values().all(|&v| v == exc));
            assert!(neuron.synapses().inhibitory().values().all(|&v| v == inh));
        }
    }

    #[test]
    fn test_far_neurons_unconnected() {
        let net = wired(64, 0, Connectivity::Clustered);
        assert_eq!(net.weight(10, 22, SynapseKind::Inhibitory), None);
        assert_eq!(net.weight(10, 22, SynapseKind::Excitatory), None);
        assert_eq!(net.weight(10, 21, SynapseKind::Inhibitory), Some(0.088));
        assert_eq!(net.weight(10, 15, SynapseKind::Inhibitory), Some(0.088));
        assert_eq!(net.weight(10, 14, SynapseKind::Excitatory), Some(0.050));
        assert_eq!(net.weight(0, 60, SynapseKind::Excitatory), Some(0.050));
        assert_eq!(net.weight(0, 53, SynapseKind::Inhibitory), Some(0.088));
        assert_eq!(net.synapse_count(), 64 * 22);
    }

    #[test]
    fn test_directed_by_source_tier() {
        // 1 is a fixed point, 4 is not; the two directions differ
        let net = wired(64, 4, Connectivity::Clustered);
        assert_eq!(net.weight(1, 4, SynapseKind::Excitatory), Some(0.050));
        assert_eq!(net.weight(1, 10, SynapseKind::Inhibitory), Some(0.15));
        assert_eq!(net.weight(10, 1, SynapseKind::Inhibitory), Some(0.088));
    }

    #[test]
    fn test_singleton_profile() {
        let net = wired(100, 20, Connectivity::Singleton);
        let w = Weights::default();
        // Neuron 1 is base tier
        let near = net.weight(1, 2, SynapseKind::Excitatory).unwrap();
        assert!((near - w.exc_base * (1.8f64).ln() * 1.5).abs() < 1e-12);
        let far = net.weight(1, 12, SynapseKind::Inhibitory).unwrap();
        assert!((far - w.inh_base * (-1.0f64).exp() * 1.5).abs() < 1e-12);
        // Distance 8 carries nothing
        assert_eq!(net.weight(1, 9, SynapseKind::Inhibitory), None);
        assert_eq!(net.weight(1, 9, SynapseKind::Excitatory), None);
        // Neuron 0 is a fixed point
        let fp = net.weight(0, 5, SynapseKind::Inhibitory).unwrap();
        assert!((fp - w.inh_fixed * (2.0f64).ln() * 1.5).abs() < 1e-12);
        // Excitation decays with distance
        let d4 = net.weight(1, 5, SynapseKind::Excitatory).unwrap();
        assert!(d4 < near);
    }

    #[test]
    fn test_facade_names() {
        assert_eq!(Connectivity::Clustered.name(), "clustered");
        assert_eq!(Connectivity::Singleton.name(), "singleton");
        let json = serde_json::to_string(&Connectivity::Singleton).unwrap();
        assert_eq!(json, "\"singleton\"");
    }
}
