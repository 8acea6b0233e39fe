//! Named LIF Profiles - First-Class Config
//!
//! Profiles are SERIALIZABLE IDENTIFIERS, not raw parameter sets.
//! Config files name a profile:
//!
//! ```json
//! { "profile": "cortical" }
//! ```

use serde::{Deserialize, Serialize};

/// Raw LIF parameters (SI units: volts, seconds)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifParams {
    /// Leak reversal / resting potential
    pub e_leak: f64,
    /// Spike threshold
    pub v_threshold: f64,
    /// Post-spike reset potential
    pub v_reset: f64,
    /// Excitatory reversal potential
    pub e_exc: f64,
    /// Inhibitory reversal potential
    pub e_inh: f64,
    /// Membrane time constant
    pub tau_membrane: f64,
    /// Synaptic conductance decay time constant
    pub tau_synapse: f64,
    /// Ticks the potential is clamped to reset after a spike
    pub refractory_ticks: u32,
}

/// LIF neuron profiles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifProfile {
    /// τm = 10 ms, τsyn = 5 ms, 2-tick refractory
    #[default]
    Cortical,

    /// τm = 5 ms, τsyn = 3 ms
    /// Forgets input quickly, bump needs sustained drive
    FastLeak,

    /// τm = 20 ms, τsyn = 10 ms, 3-tick refractory
    /// Integrates over longer windows, smoother bump
    SlowIntegrating,
}

impl LifProfile {
    /// Get LIF parameters for this profile
    pub fn params(&self) -> LifParams {
        let base = LifParams {
            e_leak: -0.070,
            v_threshold: -0.050,
            v_reset: -0.075,
            e_exc: 0.0,
            e_inh: -0.080,
            tau_membrane: 0.010,
            tau_synapse: 0.005,
            refractory_ticks: 2,
        };
        match self {
            Self::Cortical => base,
            Self::FastLeak => LifParams {
                tau_membrane: 0.005,
                tau_synapse: 0.003,
                ..base
            },
            Self::SlowIntegrating => LifParams {
                tau_membrane: 0.020,
                tau_synapse: 0.010,
                refractory_ticks: 3,
                ..base
            },
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cortical => "Cortical - balanced leak and synaptic decay",
            Self::FastLeak => "Fast leak - short memory, needs sustained drive",
            Self::SlowIntegrating => "Slow integrating - long memory, smooth bump",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_are_ordered_potentials() {
        for profile in [LifProfile::Cortical, LifProfile::FastLeak, LifProfile::SlowIntegrating] {
            let p = profile.params();
            assert!(p.v_reset < p.e_leak);
            assert!(p.e_leak < p.v_threshold);
            assert!(p.v_threshold < p.e_exc);
            assert!(p.e_inh < p.e_leak);
            assert!(p.tau_membrane > 0.0 && p.tau_synapse > 0.0);
        }
    }

    #[test]
    fn test_profile_serialization() {
        let json = serde_json::to_string(&LifProfile::SlowIntegrating).unwrap();
        assert_eq!(json, "\"slow_integrating\"");
        let restored: LifProfile = serde_json::from_str("\"fast_leak\"").unwrap();
        assert_eq!(restored, LifProfile::FastLeak);
    }
}
