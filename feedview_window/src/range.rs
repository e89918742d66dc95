// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window value emitted by the engine, and scroll direction.

/// The contiguous slice of the id sequence that should be mounted.
///
/// `start` and `end` are *inclusive* indices. `pad_front` stands in for every
/// item before `start` and `pad_behind` for every item after `end`, so a host
/// that wraps the mounted items in a container padded by these two values keeps
/// the scrollable extent close to that of the full list.
///
/// For an empty sequence the range is all zeros and mounts nothing; use
/// [`WindowRange::indices`] to obtain the half-open slice to render.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange<S> {
    /// First mounted index.
    pub start: usize,
    /// Last mounted index (inclusive).
    pub end: usize,
    /// Pixel height standing in for items `0..start`.
    pub pad_front: S,
    /// Pixel height standing in for items after `end`.
    pub pad_behind: S,
}

impl<S> WindowRange<S> {
    /// Returns the half-open index range to render out of `total` items.
    ///
    /// This is `start..end + 1`, clamped to `total`, and empty when there are
    /// no items.
    #[must_use]
    pub fn indices(&self, total: usize) -> core::ops::Range<usize> {
        if total == 0 {
            return 0..0;
        }
        let end = (self.end + 1).min(total);
        self.start.min(end)..end
    }

    /// Returns `true` if `index` falls inside the mounted window.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// Direction of the most recent scroll movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScrollDirection {
    /// Toward the top of the list (smaller offsets).
    Up,
    /// Toward the bottom of the list; also used when the offset is unchanged.
    #[default]
    Down,
}
