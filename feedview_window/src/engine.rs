// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The windowing engine: ids + measured heights + scroll offset → window.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::heights::HeightRecord;
use crate::offsets::OffsetTable;
use crate::{ConfigError, Scalar, ScrollDirection, WindowConfig, WindowRange};

/// Receives every window the engine emits, in emission order.
///
/// Closures taking `&WindowRange<S>` implement this trait directly.
pub trait RangeObserver<S> {
    /// Called with the new window after each notification-worthy change.
    fn range_changed(&mut self, range: &WindowRange<S>);
}

impl<S, F> RangeObserver<S> for F
where
    F: FnMut(&WindowRange<S>),
{
    fn range_changed(&mut self, range: &WindowRange<S>) {
        self(range);
    }
}

/// An observer that keeps every emitted window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeLog<S> {
    ranges: Vec<WindowRange<S>>,
}

impl<S> RangeLog<S> {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// All windows received so far, oldest first.
    #[must_use]
    pub fn ranges(&self) -> &[WindowRange<S>] {
        &self.ranges
    }

    /// The most recently received window.
    #[must_use]
    pub fn last(&self) -> Option<&WindowRange<S>> {
        self.ranges.last()
    }

    /// Removes and returns everything received so far.
    pub fn take(&mut self) -> Vec<WindowRange<S>> {
        core::mem::take(&mut self.ranges)
    }
}

impl<S: Copy> RangeObserver<S> for RangeLog<S> {
    fn range_changed(&mut self, range: &WindowRange<S>) {
        self.ranges.push(*range);
    }
}

/// Outcome of [`WindowEngine::record_height`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Measurement {
    /// The id is not in the current sequence, or the height was unusable.
    Ignored,
    /// First height ever stored for this id; later offsets may have shifted.
    First,
    /// An already-known height was overwritten.
    Updated,
}

/// Maps an id sequence, measured heights, and a scroll offset to a window.
///
/// The engine owns its height record and offset table outright; callers only
/// see copies through the accessors. All operations are synchronous: scroll
/// handling is `O(log n)`, [`set_ids`](Self::set_ids) and
/// [`rebuild_offsets`](Self::rebuild_offsets) are `O(n)`.
///
/// # Example
///
/// ```
/// use feedview_window::{RangeLog, WindowConfig, WindowEngine, WindowRange};
///
/// let config = WindowConfig::new(20, 130.0_f64, 10);
/// let mut engine = WindowEngine::new(config, RangeLog::new()).unwrap();
///
/// engine.set_ids(0..200_u32);
/// for id in 0..200 {
///     engine.record_height(&id, 120.0);
/// }
/// engine.rebuild_offsets();
/// engine.recompute_range();
///
/// engine.on_scroll(2000.0);
/// assert_eq!(
///     engine.range(),
///     WindowRange { start: 16, end: 35, pad_front: 1920.0, pad_behind: 19680.0 }
/// );
/// // Construction, recompute, and the scroll each notified once.
/// assert_eq!(engine.observer().ranges().len(), 3);
/// ```
pub struct WindowEngine<K, S, O> {
    config: WindowConfig<S>,
    observer: O,
    ids: Vec<K>,
    index_of: HashMap<K, usize>,
    heights: HeightRecord<K, S>,
    offsets: OffsetTable<K, S>,
    range: WindowRange<S>,
    scroll_offset: S,
    direction: ScrollDirection,
}

impl<K, S, O> fmt::Debug for WindowEngine<K, S, O>
where
    K: fmt::Debug + Eq + Hash,
    S: Scalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowEngine")
            .field("config", &self.config)
            .field("len", &self.ids.len())
            .field("known_heights", &self.heights.len())
            .field("range", &self.range)
            .field("scroll_offset", &self.scroll_offset)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl<K, S, O> WindowEngine<K, S, O>
where
    K: Clone + Eq + Hash,
    S: Scalar,
    O: RangeObserver<S>,
{
    /// Creates an engine with no ids and notifies `observer` exactly once.
    ///
    /// The initial window is `{ start: 0, end: 0, pad_front: 0, pad_behind: 0 }`.
    pub fn new(config: WindowConfig<S>, observer: O) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self {
            config,
            observer,
            ids: Vec::new(),
            index_of: HashMap::new(),
            heights: HeightRecord::new(),
            offsets: OffsetTable::new(),
            range: WindowRange {
                start: 0,
                end: 0,
                pad_front: S::zero(),
                pad_behind: S::zero(),
            },
            scroll_offset: S::zero(),
            direction: ScrollDirection::default(),
        };
        let (start, end) = engine.window_from(0);
        engine.update_range(start, end);
        Ok(engine)
    }

    /// Replaces the id order and forgets heights and offsets of departed ids.
    ///
    /// Ids are expected to be unique. This does not recompute the window;
    /// follow with [`recompute_range`](Self::recompute_range).
    pub fn set_ids(&mut self, ids: impl IntoIterator<Item = K>) {
        self.ids = ids.into_iter().collect();
        self.index_of.clear();
        self.index_of.reserve(self.ids.len());
        for (index, id) in self.ids.iter().enumerate() {
            self.index_of.insert(id.clone(), index);
        }
        debug_assert_eq!(
            self.index_of.len(),
            self.ids.len(),
            "id sequence must not contain duplicates"
        );

        let index_of = &self.index_of;
        self.heights.retain(|id| index_of.contains_key(id));
        self.offsets.retain(|id| index_of.contains_key(id));

        tracing::debug!(
            len = self.ids.len(),
            known_heights = self.heights.len(),
            "id sequence replaced"
        );
    }

    /// Stores the measured height of `id`.
    ///
    /// Heights for ids outside the current sequence, and heights that are
    /// negative or not finite, are ignored. While fewer than
    /// `min(keep_count, len)` heights are known the average is recomputed;
    /// after that it stays frozen.
    pub fn record_height(&mut self, id: &K, height: S) -> Measurement {
        if !height.is_valid_extent() || !self.index_of.contains_key(id) {
            return Measurement::Ignored;
        }
        let threshold = self.config.keep_count.min(self.ids.len());
        if self.heights.record(id.clone(), height, threshold) {
            Measurement::First
        } else {
            Measurement::Updated
        }
    }

    /// Recomputes the offset of every id from known heights and the average.
    ///
    /// This is `O(n)` and is never triggered implicitly.
    pub fn rebuild_offsets(&mut self) {
        let average = self.average_height();
        let heights = &self.heights;
        self.offsets
            .rebuild(&self.ids, |id| heights.get(id).unwrap_or(average));
        tracing::debug!(len = self.ids.len(), average = ?average, "offsets rebuilt");
    }

    /// Re-derives the window from the current start and always notifies.
    ///
    /// Used after the id sequence changed shape; the window keeps its start
    /// index where possible and is shifted back only when it would run past
    /// the end of the list.
    pub fn recompute_range(&mut self) {
        let (start, end) = self.window_from(self.range.start);
        self.update_range(start, end);
    }

    /// Handles a new scroll offset, moving the window once it leaves the buffer.
    ///
    /// Negative and non-finite offsets are treated as `0`. The observer is
    /// only notified when the window start actually changes.
    pub fn on_scroll(&mut self, offset: S) {
        let offset = offset.sanitize();
        self.direction = if offset < self.scroll_offset {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        self.scroll_offset = offset;

        let overscan = self.index_at_offset(offset);
        match self.direction {
            ScrollDirection::Up => {
                if overscan >= self.range.start {
                    return;
                }
                self.check_range(overscan.saturating_sub(self.config.buffer_count));
            }
            ScrollDirection::Down => {
                if overscan < self.range.start + self.config.buffer_count {
                    return;
                }
                self.check_range(overscan);
            }
        }
    }

    /// Returns the greatest index whose offset does not exceed `offset`.
    ///
    /// Ids missing from the offset table are placed at `index * average`.
    /// Runs in `O(log n)` and advances the high-water mark that decides when
    /// [`WindowRange::pad_behind`] becomes exact.
    pub fn index_at_offset(&mut self, offset: S) -> usize {
        let average = self.average_height();
        self.offsets.index_at_offset(&self.ids, offset, average)
    }
}

impl<K, S, O> WindowEngine<K, S, O>
where
    K: Clone + Eq + Hash,
    S: Scalar,
{
    /// The current window.
    #[must_use]
    pub fn range(&self) -> WindowRange<S> {
        self.range
    }

    /// The half-open index range to render.
    #[must_use]
    pub fn visible_indices(&self) -> core::ops::Range<usize> {
        self.range.indices(self.ids.len())
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &WindowConfig<S> {
        &self.config
    }

    /// Number of ids in the current sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The current id sequence.
    #[must_use]
    pub fn ids(&self) -> &[K] {
        &self.ids
    }

    /// Position of `id` in the current sequence.
    #[must_use]
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.index_of.get(id).copied()
    }

    /// The measured height of `id`, if any.
    #[must_use]
    pub fn height_of(&self, id: &K) -> Option<S> {
        self.heights.get(id)
    }

    /// Number of ids with a measured height.
    #[must_use]
    pub fn known_height_count(&self) -> usize {
        self.heights.len()
    }

    /// Returns `true` once the average has stopped following new measurements.
    #[must_use]
    pub fn is_average_frozen(&self) -> bool {
        self.heights.is_frozen()
    }

    /// Number of entries in the offset table.
    #[must_use]
    pub fn offset_entry_count(&self) -> usize {
        self.offsets.len()
    }

    /// Height assumed for unmeasured items.
    ///
    /// This is the rounded mean of known heights, or the configured estimate
    /// while no non-zero mean exists.
    #[must_use]
    pub fn average_height(&self) -> S {
        self.heights
            .average()
            .unwrap_or(self.config.estimated_item_height)
    }

    /// Offset of the slot at `index`, from the table or the average estimate.
    #[must_use]
    pub fn offset_of_index(&self, index: usize) -> S {
        self.offsets.peek(&self.ids, index, self.average_height())
    }

    /// The most recent scroll offset handed to [`on_scroll`](Self::on_scroll).
    #[must_use]
    pub fn scroll_offset(&self) -> S {
        self.scroll_offset
    }

    /// Direction of the most recent scroll movement.
    #[must_use]
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Total height of `ids`, using measured heights or the average.
    pub fn block_extent<'a>(&self, ids: impl IntoIterator<Item = &'a K>) -> S
    where
        K: 'a,
    {
        let average = self.average_height();
        ids.into_iter().fold(S::zero(), |acc, id| {
            acc + self.heights.get(id).unwrap_or(average)
        })
    }

    /// Estimated height of the whole list.
    #[must_use]
    pub fn estimated_total_extent(&self) -> S {
        match self.ids.last() {
            Some(last) => {
                let tail = self.heights.get(last).unwrap_or(self.average_height());
                self.offset_of_index(self.ids.len() - 1) + tail
            }
            None => S::zero(),
        }
    }

    /// Shared access to the observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Normalizes a proposed start into a full window `(start, end)`.
    fn window_from(&self, start: usize) -> (usize, usize) {
        let keep = self.config.keep_count;
        let Some(last) = self.ids.len().checked_sub(1) else {
            return (0, 0);
        };
        if self.ids.len() <= keep {
            return (0, last);
        }
        let start = start.min(last);
        let end = (start + keep - 1).min(last);
        // Near the tail the window is shifted back so it stays `keep` long.
        let start = if end - start + 1 < keep {
            end + 1 - keep
        } else {
            start
        };
        (start, end)
    }
}

impl<K, S, O> WindowEngine<K, S, O>
where
    K: Clone + Eq + Hash,
    S: Scalar,
    O: RangeObserver<S>,
{
    fn check_range(&mut self, start: usize) {
        let (start, end) = self.window_from(start);
        if start != self.range.start {
            self.update_range(start, end);
        }
    }

    fn update_range(&mut self, start: usize, end: usize) {
        self.range.start = start;
        self.range.end = end;
        self.range.pad_front = self.pad_front();
        self.range.pad_behind = self.pad_behind();
        tracing::trace!(
            start,
            end,
            pad_front = ?self.range.pad_front,
            pad_behind = ?self.range.pad_behind,
            "window changed"
        );
        self.observer.range_changed(&self.range);
    }

    fn pad_front(&mut self) -> S {
        let average = self.average_height();
        self.offsets.offset_at(&self.ids, self.range.start, average)
    }

    fn pad_behind(&mut self) -> S {
        let Some(last) = self.ids.len().checked_sub(1) else {
            return S::zero();
        };
        let end = self.range.end;
        let average = self.average_height();
        if self.offsets.reaches(last) {
            let tail = self.offsets.offset_at(&self.ids, last, average);
            let at_end = self.offsets.offset_at(&self.ids, end, average);
            (tail - at_end).sanitize()
        } else {
            S::from_usize(last - end) * average
        }
    }
}
