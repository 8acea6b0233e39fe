//! Ring Configuration - Serializable Simulation Parameters
//!
//! Every numeric knob of a run lives in `RingConfig`. Config files are JSON;
//! absent keys take their defaults.
//!
//! ```json
//! {
//!   "n": 64,
//!   "noise": 3e-3,
//!   "weights": [0.050, 0.100, 0.050, 0.250],
//!   "fixed_point_count": 2,
//!   "total_ticks": 100
//! }
//! ```
//!
//! `validate()` runs before any network is built; nothing is retried.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RingError};
use crate::snn::{Connectivity, LifProfile, Parallelism, StimulusConfig, Weights};

/// Ring attractor configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Ring size
    pub n: usize,
    /// Gaussian noise standard deviation per tick (V)
    pub noise: f64,
    /// Gaussian noise mean per tick (V)
    pub noise_mean: f64,
    /// `(wExcBase, wInhBase, wExcFP, wInhFP)`, exactly 4 entries
    pub weights: Vec<f64>,
    /// Requested fixed-point count `k`
    pub fixed_point_count: usize,
    /// Simulated ticks
    pub total_ticks: usize,
    /// Trailing decode window (ticks)
    pub decode_window: usize,
    /// External drive around the midpoint
    pub stimulus: StimulusConfig,
    /// Fixed-point selection and weight template
    pub connectivity: Connectivity,
    /// Neuron parameter profile
    pub profile: LifProfile,
    /// Tick length (seconds)
    pub dt: f64,
    /// Delay of recurrent spike events (seconds)
    pub synaptic_delay: f64,
    /// Noise seed
    pub seed: u64,
    /// Neuron stepping strategy
    pub parallelism: Parallelism,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            n: 128,
            noise: 2.0e-3,
            noise_mean: 0.0,
            weights: Weights::default().as_array().to_vec(),
            fixed_point_count: 0,
            total_ticks: 300,
            decode_window: 30,
            stimulus: StimulusConfig::default(),
            connectivity: Connectivity::default(),
            profile: LifProfile::default(),
            dt: 1.0e-3,
            synaptic_delay: 0.0,
            seed: 42,
            parallelism: Parallelism::default(),
        }
    }
}

impl RingConfig {
    /// Parse from a JSON string (does not validate)
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file and validate
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Typed weight tuple (fails on wrong arity)
    pub fn weights(&self) -> Result<Weights> {
        Weights::try_from(self.weights.as_slice())
    }

    /// Stimulus weight after the `weights[0]` fallback
    pub fn stimulus_weight(&self) -> Result<f64> {
        Ok(self.stimulus.weight.unwrap_or(self.weights()?.exc_base))
    }

    /// Fail fast on any inconsistent parameter
    pub fn validate(&self) -> Result<()> {
        self.weights()?;

        if self.n == 0 {
            return Err(RingError::config("ring size n must be positive"));
        }
        if self.fixed_point_count > self.n {
            return Err(RingError::config(format!(
                "fixed point count {} exceeds ring size {}",
                self.fixed_point_count, self.n
            )));
        }
        if self.total_ticks == 0 {
            return Err(RingError::config("total_ticks must be positive"));
        }
        if self.decode_window == 0 || self.decode_window > self.total_ticks {
            return Err(RingError::config(format!(
                "decode window {} must be within 1..={} ticks",
                self.decode_window, self.total_ticks
            )));
        }
        if !(self.noise.is_finite() && self.noise >= 0.0) {
            return Err(RingError::config(format!(
                "noise must be finite and non-negative, got {}",
                self.noise
            )));
        }
        if !self.noise_mean.is_finite() {
            return Err(RingError::config("noise_mean must be finite"));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(RingError::config(format!("dt must be positive, got {}", self.dt)));
        }
        if !(self.synaptic_delay.is_finite() && self.synaptic_delay >= 0.0) {
            return Err(RingError::config(format!(
                "synaptic_delay must be non-negative, got {}",
                self.synaptic_delay
            )));
        }
        if let Some(w) = self.stimulus.weight {
            if !(w.is_finite() && w >= 0.0) {
                return Err(RingError::config(format!(
                    "stimulus weight must be finite and non-negative, got {}",
                    w
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = RingConfig::default();
        config.validate().unwrap();
        assert_eq!(config.weights().unwrap(), Weights::new(0.050, 0.088, 0.050, 0.15));
        assert_eq!(config.stimulus_weight().unwrap(), 0.050);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RingConfig::from_json_str(
            r#"{ "n": 64, "fixed_point_count": 2, "connectivity": "singleton" }"#,
        )
        .unwrap();
        assert_eq!(config.n, 64);
        assert_eq!(config.fixed_point_count, 2);
        assert_eq!(config.connectivity, Connectivity::Singleton);
        assert_eq!(config.total_ticks, 300);
        assert_eq!(config.stimulus.spike_count, 5);
    }

    #[test]
    fn test_rejects_bad_weight_arity() {
        let config = RingConfig {
            weights: vec![0.05, 0.088, 0.05],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RingError::Configuration(_))));
    }

    #[test]
    fn test_rejects_structural_errors() {
        let cases = [
            RingConfig { n: 0, ..Default::default() },
            RingConfig { fixed_point_count: 129, ..Default::default() },
            RingConfig { decode_window: 301, ..Default::default() },
            RingConfig { decode_window: 0, ..Default::default() },
            RingConfig { noise: -1.0, ..Default::default() },
            RingConfig { dt: 0.0, ..Default::default() },
            RingConfig { synaptic_delay: f64::NAN, ..Default::default() },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(RingError::Configuration(_))),
                "accepted {:?}",
                config
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "n": 32, "total_ticks": 50, "seed": 7 }}"#).unwrap();

        let config = RingConfig::load(file.path()).unwrap();
        assert_eq!(config.n, 32);
        assert_eq!(config.total_ticks, 50);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "n": 32, "total_ticks": 10, "decode_window": 30 }}"#).unwrap();
        assert!(matches!(
            RingConfig::load(file.path()),
            Err(RingError::Configuration(_))
        ));

        let mut garbage = tempfile::NamedTempFile::new().unwrap();
        write!(garbage, "not json").unwrap();
        assert!(matches!(RingConfig::load(garbage.path()), Err(RingError::Json(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = RingConfig { n: 64, fixed_point_count: 2, ..Default::default() };
        let json = config.to_json().unwrap();
        assert_eq!(RingConfig::from_json_str(&json).unwrap(), config);
    }
}
