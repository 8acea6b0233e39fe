//! Decoder - Population Activity to Angle
//!
//! 1. Keep the last `window` ticks of every trace
//! 2. A sample is a spike iff `V == 0.0`; other samples are missing, not zero
//! 3. Per tick: circular mean of the angles of neurons that spiked
//! 4. Circular mean of the per-tick means → decoded angle
//! 5. `error = |angle(midpoint) − decoded|`, NOT wrapped into [0, 180]
//!
//! Ticks without spikes are dropped. A window with no spikes at all is
//! `RingError::UndefinedDecode`.

use serde::{Deserialize, Serialize};

use super::geometry::{circular_mean, neuron_angle};
use super::PotentialTrace;
use crate::error::{Result, RingError};

/// Default trailing window (ticks)
pub const DEFAULT_WINDOW: usize = 30;

/// Decoder output
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decoded {
    /// Circular mean of the per-tick bump positions (degrees)
    pub decoded_angle: f64,
    /// Angle of the midpoint neuron (degrees)
    pub true_angle: f64,
    /// `|true_angle − decoded_angle|` (degrees)
    pub error: f64,
    /// Mean resultant length of the per-tick means (bump stability)
    pub resultant: f64,
    /// Ticks in the window that contained at least one spike
    pub ticks_used: usize,
}

/// Trailing-window circular decoder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoder {
    window: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Decoder {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Per-tick bump positions over the window (`None` = no spike that tick)
    pub fn tick_means(&self, trace: &PotentialTrace) -> Result<Vec<Option<f64>>> {
        let (n, ticks) = trace.shape();
        if self.window == 0 || self.window > ticks {
            return Err(RingError::config(format!(
                "decode window {} does not fit a trace of {} ticks",
                self.window, ticks
            )));
        }

        let means = trace
            .spike_raster(self.window)
            .iter()
            .map(|spikes| {
                let angles: Vec<f64> = spikes
                    .iter()
                    .enumerate()
                    .filter_map(|(id, &spiked)| spiked.then(|| neuron_angle(id, n)))
                    .collect();
                circular_mean(&angles, None).map(|m| m.angle)
            })
            .collect();
        Ok(means)
    }

    /// Decode the bump position and its error against `midpoint`
    pub fn decode(&self, trace: &PotentialTrace, midpoint: usize) -> Result<Decoded> {
        let n = trace.neuron_count();
        if midpoint >= n {
            return Err(RingError::config(format!(
                "midpoint {} outside a ring of {}",
                midpoint, n
            )));
        }

        let per_tick: Vec<f64> = self.tick_means(trace)?.into_iter().flatten().collect();
        let empty = self.window - per_tick.len();
        if empty > 0 {
            log::debug!("{} of {} window ticks had no spikes", empty, self.window);
        }

        let total = circular_mean(&per_tick, None)
            .ok_or(RingError::UndefinedDecode { window: self.window })?;
        if total.is_degenerate() {
            log::warn!("per-tick bump positions cancel out, decoded angle is arbitrary");
        }

        let true_angle = neuron_angle(midpoint, n);
        Ok(Decoded {
            decoded_angle: total.angle,
            true_angle,
            error: (true_angle - total.angle).abs(),
            resultant: total.resultant,
            ticks_used: per_tick.len(),
        })
    }
}
