//! Leaky Integrate-and-Fire Neuron
//!
//! Conductance-based point neuron driven by pending synaptic events.
//!
//! ## Equations
//!
//! ```text
//! dV = ((E_L − V) + g_e(E_e − V) + g_i(E_i − V)) · dt/τ_m + N(μ, σ)
//! g  ← g · exp(−dt/τ_syn)
//! if V >= V_th: V = 0 (spike marker), then V_reset for the refractory ticks
//! ```
//!
//! Each neuron carries its own RNG, seeded from the run seed and its id,
//! so stepping order (sequential or parallel) never changes the result.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::{LifParams, LifProfile, PendingEvent, SpikingNeuron, SynapseKind};

/// Leaky integrate-and-fire neuron
#[derive(Clone, Debug)]
pub struct LifNeuron {
    /// Neuron id on the ring (mixed into the noise seed)
    id: usize,
    /// Model parameters
    params: LifParams,
    /// Noise mean per tick (V)
    noise_mean: f64,
    /// Noise standard deviation per tick (V)
    noise_std: f64,
    /// Membrane potential (V)
    v: f64,
    /// Excitatory conductance (dimensionless, relative to leak)
    g_exc: f64,
    /// Inhibitory conductance
    g_inh: f64,
    /// Ticks left in the refractory period
    refractory: u32,
    /// Whether the last step fired
    spiking: bool,
    /// Pending excitatory events
    exc_queue: Vec<PendingEvent>,
    /// Pending inhibitory events
    inh_queue: Vec<PendingEvent>,
    /// Noise source
    rng: StdRng,
}

impl LifNeuron {
    /// Create a neuron at rest with empty queues
    pub fn new(id: usize, profile: LifProfile, noise_mean: f64, noise_std: f64, seed: u64) -> Self {
        let params = profile.params();
        Self {
            id,
            params,
            noise_mean,
            noise_std,
            v: params.e_leak,
            g_exc: 0.0,
            g_inh: 0.0,
            refractory: 0,
            spiking: false,
            exc_queue: Vec::new(),
            inh_queue: Vec::new(),
            rng: StdRng::seed_from_u64(neuron_seed(seed, id)),
        }
    }

    /// Model parameters
    pub fn params(&self) -> &LifParams {
        &self.params
    }

    /// Current excitatory conductance
    pub fn g_exc(&self) -> f64 {
        self.g_exc
    }

    /// Current inhibitory conductance
    pub fn g_inh(&self) -> f64 {
        self.g_inh
    }

    /// Events waiting in one queue, oldest first
    pub fn queue(&self, kind: SynapseKind) -> &[PendingEvent] {
        match kind {
            SynapseKind::Excitatory => &self.exc_queue,
            SynapseKind::Inhibitory => &self.inh_queue,
        }
    }

    /// Remove due events from `queue`, age the rest, return the summed weight
    fn consume_due(queue: &mut Vec<PendingEvent>, dt: f64) -> f64 {
        let mut total = 0.0;
        queue.retain_mut(|event| {
            if event.delay < dt * 0.5 {
                total += event.weight;
                false
            } else {
                event.delay -= dt;
                true
            }
        });
        total
    }
}

/// SplitMix64 over (seed, id) so neighbouring neurons get unrelated streams
fn neuron_seed(seed: u64, id: usize) -> u64 {
    let mut z = seed ^ (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl SpikingNeuron for LifNeuron {
    fn step(&mut self, dt: f64) -> bool {
        let p = self.params;

        self.g_exc += Self::consume_due(&mut self.exc_queue, dt);
        self.g_inh += Self::consume_due(&mut self.inh_queue, dt);

        self.spiking = false;
        if self.refractory > 0 {
            self.refractory -= 1;
            self.v = p.v_reset;
        } else {
            let drive = (p.e_leak - self.v)
                + self.g_exc * (p.e_exc - self.v)
                + self.g_inh * (p.e_inh - self.v);
            let z: f64 = self.rng.sample(StandardNormal);
            self.v += drive * dt / p.tau_membrane + self.noise_mean + self.noise_std * z;

            if self.v >= p.v_threshold {
                self.v = 0.0;
                self.refractory = p.refractory_ticks;
                self.spiking = true;
            }
        }

        let decay = (-dt / p.tau_synapse).exp();
        self.g_exc *= decay;
        self.g_inh *= decay;

        self.spiking
    }

    fn membrane(&self) -> f64 {
        self.v
    }

    fn schedule(&mut self, kind: SynapseKind, event: PendingEvent) {
        match kind {
            SynapseKind::Excitatory => self.exc_queue.push(event),
            SynapseKind::Inhibitory => self.inh_queue.push(event),
        }
    }

    fn pending(&self, kind: SynapseKind) -> usize {
        match kind {
            SynapseKind::Excitatory => self.exc_queue.len(),
            SynapseKind::Inhibitory => self.inh_queue.len(),
        }
    }

    fn reset(&mut self, seed: u64) {
        self.v = self.params.e_leak;
        self.g_exc = 0.0;
        self.g_inh = 0.0;
        self.refractory = 0;
        self.spiking = false;
        self.exc_queue.clear();
        self.inh_queue.clear();
        self.rng = StdRng::seed_from_u64(neuron_seed(seed, self.id));
    }

    fn is_spiking(&self) -> bool {
        self.spiking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1e-3;

    fn quiet_neuron() -> LifNeuron {
        LifNeuron::new(0, LifProfile::Cortical, 0.0, 0.0, 7)
    }

    #[test]
    fn test_rests_without_input() {
        let mut neuron = quiet_neuron();
        for _ in 0..100 {
            assert!(!neuron.step(DT));
        }
        assert!((neuron.membrane() - (-0.070)).abs() < 1e-12);
    }

    #[test]
    fn test_event_waits_for_its_delay() {
        let mut neuron = quiet_neuron();
        neuron.schedule(SynapseKind::Excitatory, PendingEvent::new(3.0 * DT, 0.1));

        for _ in 0..3 {
            neuron.step(DT);
            assert_eq!(neuron.pending(SynapseKind::Excitatory), 1);
            assert_eq!(neuron.g_exc(), 0.0);
        }
        neuron.step(DT);
        assert_eq!(neuron.pending(SynapseKind::Excitatory), 0);
        assert!(neuron.g_exc() > 0.0);
    }

    #[test]
    fn test_strong_drive_fires_with_zero_marker() {
        let mut neuron = quiet_neuron();
        let mut fired_at = None;
        for t in 0..50 {
            neuron.schedule(SynapseKind::Excitatory, PendingEvent::new(0.0, 0.5));
            if neuron.step(DT) {
                fired_at = Some(t);
                break;
            }
        }
        assert!(fired_at.is_some());
        assert_eq!(neuron.membrane(), 0.0);
        assert!(neuron.is_spiking());

        // Refractory: held at reset
        neuron.step(DT);
        assert_eq!(neuron.membrane(), neuron.params().v_reset);
        assert!(!neuron.is_spiking());
    }

    #[test]
    fn test_inhibition_hyperpolarizes() {
        let mut neuron = quiet_neuron();
        neuron.schedule(SynapseKind::Inhibitory, PendingEvent::new(0.0, 1.0));
        neuron.step(DT);
        assert!(neuron.membrane() < -0.070);
        assert!(neuron.g_inh() > 0.0);
    }

    #[test]
    fn test_reset_reproduces_noise() {
        let mut a = LifNeuron::new(3, LifProfile::Cortical, 0.0, 2e-3, 42);
        let first: Vec<f64> = (0..20).map(|_| { a.step(DT); a.membrane() }).collect();
        a.reset(42);
        let second: Vec<f64> = (0..20).map(|_| { a.step(DT); a.membrane() }).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_neighbours_get_distinct_noise() {
        let mut a = LifNeuron::new(0, LifProfile::Cortical, 0.0, 2e-3, 42);
        let mut b = LifNeuron::new(1, LifProfile::Cortical, 0.0, 2e-3, 42);
        a.step(DT);
        b.step(DT);
        assert_ne!(a.membrane(), b.membrane());
    }
}
