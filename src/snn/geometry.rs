//! Angle Geometry - Ring Offsets and Circular Statistics
//!
//! Neuron `id` on a ring of `n` sits at `360·id/n` degrees.
//!
//! Offsets are always wrapped explicitly:
//!
//! ```text
//! forward(id, i)  = (id + i) mod n
//! backward(id, i) = (id − i) mod n    // never a raw negative index
//! ```

/// Angle of neuron `id` on a ring of `n` neurons (degrees, [0, 360))
#[inline]
pub fn neuron_angle(id: usize, n: usize) -> f64 {
    360.0 * id as f64 / n as f64
}

/// Target `i` steps ahead of `id`, wrapped into [0, n)
#[inline]
pub fn forward(id: usize, i: usize, n: usize) -> usize {
    (id + i % n) % n
}

/// Target `i` steps behind `id`, wrapped into [0, n)
#[inline]
pub fn backward(id: usize, i: usize, n: usize) -> usize {
    (id + n - i % n) % n
}

/// Minimal number of ring steps between `a` and `b`
pub fn circular_distance(a: usize, b: usize, n: usize) -> usize {
    let diff = a.abs_diff(b) % n;
    diff.min(n - diff)
}

/// Normalize degrees into [0, 360)
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negatives
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Result of a circular mean
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularMean {
    /// Mean direction (degrees, [0, 360))
    pub angle: f64,
    /// Mean resultant length (0 = full cancellation, 1 = all aligned)
    pub resultant: f64,
}

impl CircularMean {
    /// True when the vectors cancel and `angle` carries no information
    pub fn is_degenerate(&self) -> bool {
        self.resultant < 1e-9
    }
}

/// Circular mean of `angles` (degrees), optionally weighted
///
/// Computed as `atan2(Σ w·sin θ, Σ w·cos θ)`. Returns `None` for an empty
/// sequence (or zero total weight): "no detectable bump", not an error.
/// A `weights` slice shorter than `angles` is an implicit weight of 1.
pub fn circular_mean(angles: &[f64], weights: Option<&[f64]>) -> Option<CircularMean> {
    if angles.is_empty() {
        return None;
    }

    let mut sum_sin = 0.0f64;
    let mut sum_cos = 0.0f64;
    let mut total = 0.0f64;

    for (i, &theta) in angles.iter().enumerate() {
        let w = weights.and_then(|ws| ws.get(i).copied()).unwrap_or(1.0);
        let rad = theta.to_radians();
        sum_sin += w * rad.sin();
        sum_cos += w * rad.cos();
        total += w;
    }

    if total <= 0.0 {
        return None;
    }

    let angle = normalize_degrees(sum_sin.atan2(sum_cos).to_degrees());
    let resultant = (sum_sin * sum_sin + sum_cos * sum_cos).sqrt() / total;

    Some(CircularMean { angle, resultant })
}
