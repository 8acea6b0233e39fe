//! Fixed Points - Attractor Wells on the Ring
//!
//! Fixed-point neurons get amplified local connectivity. Two selection
//! rules exist (see `Connectivity`):
//!
//! - **Clustered**: `id mod (n div k) < 3` - runs of up to 3 ids per segment
//! - **Singleton**: `id mod (n / k) == 0` in floating point - single ids
//!
//! Clustered runs merge when `n div k < 3`. That is kept as-is.

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free set of fixed-point neuron ids
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPointSet {
    /// Selected ids, ascending
    ids: Vec<usize>,
    /// Fixed-point count the set was selected for
    requested: usize,
}

impl FixedPointSet {
    /// Empty set (k = 0)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from ids already in ascending scan order
    pub(crate) fn from_scan(ids: Vec<usize>, requested: usize) -> Self {
        debug_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        Self { ids, requested }
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Requested fixed-point count `k`
    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Membership test (binary search, ids are sorted)
    pub fn contains(&self, id: usize) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Smallest fixed point strictly greater than `id`
    pub fn next_above(&self, id: usize) -> Option<usize> {
        let idx = self.ids.partition_point(|&fp| fp <= id);
        self.ids.get(idx).copied()
    }

    /// Largest fixed point strictly less than `id`
    pub fn next_below(&self, id: usize) -> Option<usize> {
        let idx = self.ids.partition_point(|&fp| fp < id);
        idx.checked_sub(1).map(|i| self.ids[i])
    }

    /// Non-fixed ids of a ring of `n`, ascending
    pub fn free_ids(&self, n: usize) -> Vec<usize> {
        (0..n).filter(|&id| !self.contains(id)).collect()
    }
}

/// Clustered selection: `id mod (n div k) < 3`
pub fn select_clustered(n: usize, k: usize) -> FixedPointSet {
    if k == 0 || n == 0 {
        return FixedPointSet::empty();
    }
    // k <= n is enforced by config validation; max(1) keeps the modulo defined
    let interval = (n / k).max(1);
    let ids = (0..n).filter(|id| id % interval < 3).collect();
    FixedPointSet::from_scan(ids, k)
}

/// Singleton selection: `id mod (n / k) == 0` with a fractional interval
pub fn select_singleton(n: usize, k: usize) -> FixedPointSet {
    if k == 0 || n == 0 {
        return FixedPointSet::empty();
    }
    let interval = n as f64 / k as f64;
    let ids = (0..n).filter(|&id| id as f64 % interval == 0.0).collect();
    FixedPointSet::from_scan(ids, k)
}
