//! Potential Trace - Per-Neuron Membrane History
//!
//! `n` rows, one sample per simulated tick. Spike ticks hold exactly 0.0.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RingError};

/// Membrane potential samples, row = neuron id, column = tick
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PotentialTrace {
    rows: Vec<Vec<f64>>,
}

impl PotentialTrace {
    /// Empty trace for `n` neurons, pre-sized for `ticks` samples
    pub fn with_capacity(n: usize, ticks: usize) -> Self {
        Self {
            rows: (0..n).map(|_| Vec::with_capacity(ticks)).collect(),
        }
    }

    /// Wrap existing rows; every row must hold the same number of ticks
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let ticks = rows.first().map_or(0, Vec::len);
        if let Some((id, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ticks) {
            return Err(RingError::config(format!(
                "trace row {} has {} ticks, expected {}",
                id,
                row.len(),
                ticks
            )));
        }
        Ok(Self { rows })
    }

    /// Append one sample to neuron `id`
    pub(crate) fn push(&mut self, id: usize, v: f64) {
        self.rows[id].push(v);
    }

    pub fn neuron_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of recorded ticks
    pub fn ticks(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// (neurons, ticks)
    pub fn shape(&self) -> (usize, usize) {
        (self.neuron_count(), self.ticks())
    }

    pub fn row(&self, id: usize) -> Option<&[f64]> {
        self.rows.get(id).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Sample of neuron `id` at tick `t`
    pub fn get(&self, id: usize, t: usize) -> Option<f64> {
        self.rows.get(id).and_then(|row| row.get(t)).copied()
    }

    /// True when every sample is a finite number
    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }

    /// Spike markers (`V == 0`) over the last `window` ticks
    ///
    /// Result is `[tick][neuron]`, oldest tick first.
    pub fn spike_raster(&self, window: usize) -> Vec<Vec<bool>> {
        let ticks = self.ticks();
        let start = ticks.saturating_sub(window);
        (start..ticks)
            .map(|t| {
                self.rows
                    .iter()
                    .map(|row| row.get(t) == Some(&0.0))
                    .collect()
            })
            .collect()
    }

    /// Total number of spike markers
    pub fn spike_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&v| v == 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_raster() {
        let trace = PotentialTrace::from_rows(vec![
            vec![-0.07, 0.0, -0.075, -0.07],
            vec![-0.07, -0.06, 0.0, 0.0],
        ])
        .unwrap();
        assert_eq!(trace.shape(), (2, 4));
        assert_eq!(trace.spike_count(), 3);

        let raster = trace.spike_raster(2);
        assert_eq!(raster, vec![vec![false, true], vec![false, true]]);

        // Window longer than the trace is clipped
        assert_eq!(trace.spike_raster(10).len(), 4);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let ragged = PotentialTrace::from_rows(vec![vec![-0.07, 0.0], vec![-0.07]]);
        assert!(matches!(ragged, Err(RingError::Configuration(_))));
        assert_eq!(PotentialTrace::from_rows(vec![]).unwrap().shape(), (0, 0));
    }

    #[test]
    fn test_push_and_get() {
        let mut trace = PotentialTrace::with_capacity(3, 2);
        assert_eq!(trace.shape(), (3, 0));
        for id in 0..3 {
            trace.push(id, id as f64);
        }
        assert_eq!(trace.get(2, 0), Some(2.0));
        assert_eq!(trace.get(2, 1), None);
        assert!(trace.is_finite());
    }

    #[test]
    fn test_serialization() {
        let trace = PotentialTrace::from_rows(vec![vec![0.0, -0.05]]).unwrap();
        let json = serde_json::to_string(&trace).unwrap();
        let restored: PotentialTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, trace);
    }
}
