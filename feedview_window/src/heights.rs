// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measured heights and the average used for unmeasured items.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::Scalar;

/// Per-id measured heights plus a running estimate for everything else.
///
/// The average is recomputed from all known heights on every record, but only
/// while fewer than `threshold` heights are known. Once that count is reached
/// the average is frozen for the lifetime of the record, even if entries are
/// later pruned.
#[derive(Clone, Debug)]
pub(crate) struct HeightRecord<K, S> {
    heights: HashMap<K, S>,
    average: Option<S>,
    frozen: bool,
}

impl<K, S> HeightRecord<K, S>
where
    K: Eq + Hash,
    S: Scalar,
{
    pub(crate) fn new() -> Self {
        Self {
            heights: HashMap::new(),
            average: None,
            frozen: false,
        }
    }

    pub(crate) fn get(&self, id: &K) -> Option<S> {
        self.heights.get(id).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.heights.len()
    }

    pub(crate) fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// The rounded mean of known heights, if one has been computed and is non-zero.
    pub(crate) fn average(&self) -> Option<S> {
        self.average.filter(|avg| *avg > S::zero())
    }

    /// Drops every entry whose id fails `keep`.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.heights.retain(|id, _| keep(id));
    }

    /// Stores `height` for `id`, returning `true` if `id` had no height before.
    pub(crate) fn record(&mut self, id: K, height: S, threshold: usize) -> bool {
        let first = self.heights.insert(id, height).is_none();
        if !self.frozen {
            if self.heights.len() < threshold {
                let total = self
                    .heights
                    .values()
                    .fold(S::zero(), |acc, height| acc + *height);
                self.average = Some((total / S::from_usize(self.heights.len())).round());
            } else {
                self.frozen = true;
            }
        }
        first
    }
}
