// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cumulative offset table and offset-to-index lookup.
//!
//! Offsets are keyed by id and point at the *start* of each item's slot. The
//! table is only refreshed by [`OffsetTable::rebuild`]; between rebuilds, ids
//! without an entry fall back to `index * average`.
//!
//! The binary search in [`OffsetTable::index_at_offset`] assumes offsets are
//! non-decreasing in index. A fresh rebuild guarantees this since every height
//! is non-negative. Between a sequence change and the next rebuild, stale
//! entries may disagree with the fallback estimate; lookups stay in bounds but
//! may pick a nearby index until the table is rebuilt.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::Scalar;

#[derive(Clone, Debug)]
pub(crate) struct OffsetTable<K, S> {
    offsets: HashMap<K, S>,
    /// Highest index whose offset has been looked up, clamped to the last index.
    high_water: usize,
}

impl<K, S> OffsetTable<K, S>
where
    K: Clone + Eq + Hash,
    S: Scalar,
{
    pub(crate) fn new() -> Self {
        Self {
            offsets: HashMap::new(),
            high_water: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.offsets.len()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.offsets.retain(|id, _| keep(id));
    }

    /// Recomputes every offset from `height_of`, in sequence order.
    pub(crate) fn rebuild(&mut self, ids: &[K], mut height_of: impl FnMut(&K) -> S) {
        self.offsets.clear();
        self.offsets.reserve(ids.len());
        let mut acc = S::zero();
        for id in ids {
            self.offsets.insert(id.clone(), acc);
            acc = acc + height_of(id);
        }
    }

    /// Returns the offset of `index` without touching the high-water mark.
    pub(crate) fn peek(&self, ids: &[K], index: usize, average: S) -> S {
        ids.get(index)
            .and_then(|id| self.offsets.get(id).copied())
            .unwrap_or_else(|| S::from_usize(index) * average)
    }

    /// Returns the offset of `index` and records it in the high-water mark.
    pub(crate) fn offset_at(&mut self, ids: &[K], index: usize, average: S) -> S {
        if let Some(last) = ids.len().checked_sub(1) {
            self.high_water = self.high_water.max(index).min(last);
        }
        self.peek(ids, index, average)
    }

    /// Returns `true` once lookups have reached `last`.
    pub(crate) fn reaches(&self, last: usize) -> bool {
        self.high_water >= last
    }

    /// Finds the greatest index whose offset does not exceed `target`.
    ///
    /// Returns `0` for an empty sequence or a non-positive target.
    pub(crate) fn index_at_offset(&mut self, ids: &[K], target: S, average: S) -> usize {
        if ids.is_empty() || target <= S::zero() {
            return 0;
        }
        let mut low = 0;
        let mut high = ids.len();
        while low < high {
            let mid = low + (high - low) / 2;
            if self.offset_at(ids, mid, average) <= target {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        low.saturating_sub(1)
    }
}
