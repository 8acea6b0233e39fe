//! Midpoint Resolver
//!
//! Picks the non-fixed neuron used both as the stimulation center and as
//! the ground truth for decoding.
//!
//! ```text
//! k <= 1 or |FP| <= 1   → n div 2
//! otherwise             → r    = free[⌊|free| / 4⌋]
//!                         mid  = (next FP above r + next FP below r) div 2
//! ```
//!
//! The heuristic fails when `r` is not flanked on both sides. That is a
//! `RingError::Bounds`, never a silent default.

use super::FixedPointSet;
use crate::error::{Flank, Result, RingError};

/// Resolve the canonical midpoint for a ring of `n` neurons
pub fn resolve_midpoint(n: usize, fixed_points: &FixedPointSet) -> Result<usize> {
    if fixed_points.requested() <= 1 || fixed_points.len() <= 1 {
        return Ok(n / 2);
    }

    let free = fixed_points.free_ids(n);
    let reference = match free.get(free.len() / 4) {
        Some(&r) => r,
        // Every neuron is a fixed point
        None => {
            return Err(RingError::config(format!(
                "no free neuron left on a ring of {} with {} fixed points",
                n,
                fixed_points.len()
            )))
        }
    };

    let high = fixed_points.next_above(reference).ok_or(RingError::Bounds {
        reference,
        side: Flank::Above,
    })?;
    let low = fixed_points.next_below(reference).ok_or(RingError::Bounds {
        reference,
        side: Flank::Below,
    })?;

    let midpoint = (high + low) / 2;
    log::debug!(
        "midpoint {} (reference {}, flanked by {} and {})",
        midpoint,
        reference,
        low,
        high
    );
    Ok(midpoint)
}
