// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridges scroll, resize, and data events to a [`WindowEngine`].

use core::fmt;
use core::hash::Hash;

use feedview_window::{
    ConfigError, Measurement, RangeObserver, Scalar, WindowConfig, WindowEngine, WindowRange,
};

use crate::anchor::{AnchorStep, TailAnchor};
use crate::timer::{Debounce, Throttle};
use crate::{OlderPages, ScrollHost};

/// Minimum spacing between scroll passes used by [`ScrollConfig::default`].
pub const DEFAULT_SCROLL_THROTTLE_MS: u64 = 100;

/// Quiet period before an offset rebuild, used by [`ScrollConfig::default`].
pub const DEFAULT_OFFSET_REBUILD_DEBOUNCE_MS: u64 = 50;

/// Tail re-anchoring budget, in frames, used by [`ScrollConfig::default`].
pub const DEFAULT_MAX_ANCHOR_FRAMES: u32 = 10;

/// Timing and anchoring parameters of a [`FeedCoordinator`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollConfig<S> {
    /// At most one scroll pass runs per this many milliseconds.
    pub scroll_throttle_ms: u64,
    /// First measurements arriving within this window share one offset rebuild.
    pub offset_rebuild_debounce_ms: u64,
    /// Frames spent re-anchoring to the bottom after the first load.
    pub max_anchor_frames: u32,
    /// Distance from the bottom that still counts as "at the bottom".
    pub tail_epsilon: S,
}

impl<S: Scalar> ScrollConfig<S> {
    /// Sets the scroll throttle interval.
    #[must_use]
    pub fn with_scroll_throttle_ms(mut self, ms: u64) -> Self {
        self.scroll_throttle_ms = ms;
        self
    }

    /// Sets the offset rebuild debounce.
    #[must_use]
    pub fn with_offset_rebuild_debounce_ms(mut self, ms: u64) -> Self {
        self.offset_rebuild_debounce_ms = ms;
        self
    }

    /// Sets the tail re-anchoring budget.
    #[must_use]
    pub fn with_max_anchor_frames(mut self, frames: u32) -> Self {
        self.max_anchor_frames = frames;
        self
    }

    /// Sets the tail tolerance.
    #[must_use]
    pub fn with_tail_epsilon(mut self, epsilon: S) -> Self {
        self.tail_epsilon = epsilon;
        self
    }

    /// Checks that the configuration can drive a coordinator.
    pub fn validate(&self) -> Result<(), CoordinatorError> {
        if self.scroll_throttle_ms == 0 {
            return Err(CoordinatorError::ZeroThrottleInterval);
        }
        if !self.tail_epsilon.is_valid_extent() {
            return Err(CoordinatorError::InvalidTailEpsilon);
        }
        Ok(())
    }
}

impl<S: Scalar> Default for ScrollConfig<S> {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            offset_rebuild_debounce_ms: DEFAULT_OFFSET_REBUILD_DEBOUNCE_MS,
            max_anchor_frames: DEFAULT_MAX_ANCHOR_FRAMES,
            tail_epsilon: S::from_usize(1),
        }
    }
}

/// Error returned when a coordinator cannot be constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoordinatorError {
    /// The window configuration was rejected.
    Window(ConfigError),
    /// `scroll_throttle_ms` was zero.
    ZeroThrottleInterval,
    /// `tail_epsilon` was negative, NaN, or infinite.
    InvalidTailEpsilon,
}

impl From<ConfigError> for CoordinatorError {
    fn from(err: ConfigError) -> Self {
        Self::Window(err)
    }
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(err) => write!(f, "invalid window configuration: {err}"),
            Self::ZeroThrottleInterval => f.write_str("scroll throttle interval must be non-zero"),
            Self::InvalidTailEpsilon => {
                f.write_str("tail epsilon must be finite and non-negative")
            }
        }
    }
}

impl core::error::Error for CoordinatorError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Window(err) => Some(err),
            _ => None,
        }
    }
}

/// Drives a [`WindowEngine`] from host events without flooding it.
///
/// - Scroll events are throttled; each pass may request an older page when
///   the container sits at its top edge, then forwards the offset.
/// - First measurements schedule a debounced offset rebuild.
/// - Id-sequence changes recompute the window, correct the scroll position
///   for items prepended above the viewport, and anchor to the bottom on the
///   first load.
///
/// Time is passed in as monotonic milliseconds; call [`tick`](Self::tick)
/// from the host's timer or animation-frame callback, at least by
/// [`next_deadline`](Self::next_deadline) and every frame while
/// [`is_anchoring`](Self::is_anchoring).
pub struct FeedCoordinator<K, S, O> {
    engine: WindowEngine<K, S, O>,
    config: ScrollConfig<S>,
    scroll_throttle: Throttle,
    rebuild_debounce: Debounce,
    anchor: TailAnchor<S>,
    loading: bool,
    top_armed: bool,
}

impl<K, S, O> fmt::Debug for FeedCoordinator<K, S, O>
where
    K: fmt::Debug + Eq + Hash,
    S: Scalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedCoordinator")
            .field("engine", &self.engine)
            .field("config", &self.config)
            .field("scroll_throttle", &self.scroll_throttle)
            .field("rebuild_debounce", &self.rebuild_debounce)
            .field("anchor", &self.anchor)
            .field("loading", &self.loading)
            .field("top_armed", &self.top_armed)
            .finish()
    }
}

impl<K, S, O> FeedCoordinator<K, S, O>
where
    K: Clone + Eq + Hash,
    S: Scalar,
    O: RangeObserver<S>,
{
    /// Builds the engine (notifying `observer` once) and an idle coordinator.
    pub fn new(
        window: WindowConfig<S>,
        config: ScrollConfig<S>,
        observer: O,
    ) -> Result<Self, CoordinatorError> {
        config.validate()?;
        let engine = WindowEngine::new(window, observer)?;
        Ok(Self {
            engine,
            config,
            scroll_throttle: Throttle::new(config.scroll_throttle_ms),
            rebuild_debounce: Debounce::new(config.offset_rebuild_debounce_ms),
            anchor: TailAnchor::new(config.tail_epsilon),
            loading: false,
            top_armed: true,
        })
    }

    /// Applies a new authoritative id sequence, synchronously.
    ///
    /// Ids that now precede the previous first id are treated as a prepended
    /// page: the scroll position is shifted down by their height before the
    /// host paints, so the visible messages do not jump. When the previous
    /// sequence was empty, the host is scrolled to the bottom and kept there
    /// for up to [`ScrollConfig::max_anchor_frames`] frames.
    ///
    /// Any in-flight older-page request is considered resolved.
    pub fn notify_id_sequence_changed<H>(&mut self, ids: impl IntoIterator<Item = K>, host: &mut H)
    where
        H: ScrollHost<S> + ?Sized,
    {
        let previous_len = self.engine.len();
        let previous_first = self.engine.ids().first().cloned();

        self.engine.set_ids(ids);
        self.engine.recompute_range();
        self.loading = false;

        if !host.is_mounted() {
            return;
        }

        if previous_len == 0 {
            if !self.engine.is_empty() {
                tracing::debug!(len = self.engine.len(), "first load, anchoring to bottom");
                self.anchor.begin(self.config.max_anchor_frames);
                self.step_anchor(host);
            }
            return;
        }

        let prepended = previous_first
            .and_then(|first| self.engine.index_of(&first))
            .unwrap_or(0);
        if prepended == 0 {
            return;
        }

        self.engine.rebuild_offsets();
        let shift = self.engine.block_extent(&self.engine.ids()[..prepended]);
        let target = host.scroll_offset().sanitize() + shift;
        host.set_scroll_offset(target);
        tracing::debug!(prepended, shift = ?shift, "scroll corrected for prepended page");

        self.top_armed = true;
        self.engine.on_scroll(host.scroll_offset());
    }

    /// Records that the host scrolled; the next due pass reads the host's
    /// offset at that time, so corrections made in between win.
    pub fn notify_scroll(&mut self, now_ms: u64) {
        self.scroll_throttle.hit(now_ms);
    }

    /// Records a measured height.
    ///
    /// A first measurement can shift every later offset, so it schedules a
    /// debounced offset rebuild. Measurements for ids that have left the
    /// sequence are ignored.
    pub fn notify_measured(&mut self, id: &K, height: S, now_ms: u64) -> Measurement {
        let measurement = self.engine.record_height(id, height);
        if measurement == Measurement::First {
            self.rebuild_debounce.schedule(now_ms);
        }
        measurement
    }

    /// Runs whatever is due at `now_ms`: offset rebuild, scroll pass, and one
    /// tail re-anchor attempt.
    pub fn tick<H, P>(&mut self, now_ms: u64, host: &mut H, pages: &mut P)
    where
        H: ScrollHost<S> + ?Sized,
        P: OlderPages + ?Sized,
    {
        if self.rebuild_debounce.fire(now_ms) {
            self.engine.rebuild_offsets();
        }
        if self.scroll_throttle.fire(now_ms) {
            self.scroll_pass(host, pages);
        }
        if self.anchor.is_active() && host.is_mounted() {
            self.step_anchor(host);
        }
    }

    fn scroll_pass<H, P>(&mut self, host: &mut H, pages: &mut P)
    where
        H: ScrollHost<S> + ?Sized,
        P: OlderPages + ?Sized,
    {
        if !host.is_mounted() {
            return;
        }
        let offset = host.scroll_offset().sanitize();
        tracing::trace!(offset = ?offset, "scroll pass");

        if offset <= S::zero() {
            if self.top_armed && !self.loading {
                tracing::debug!(len = self.engine.len(), "requesting older page");
                self.loading = true;
                self.top_armed = false;
                pages.request_older_page();
            }
        } else {
            self.top_armed = true;
        }
        self.engine.on_scroll(offset);
    }

    fn step_anchor<H>(&mut self, host: &mut H)
    where
        H: ScrollHost<S> + ?Sized,
    {
        match self.anchor.step(host) {
            AnchorStep::Moved => self.engine.on_scroll(host.scroll_offset()),
            AnchorStep::Settled => tracing::debug!("bottom anchor settled"),
            AnchorStep::Exhausted => {
                tracing::debug!("bottom anchor gave up after its frame budget");
            }
            AnchorStep::Idle => {}
        }
    }
}

impl<K, S, O> FeedCoordinator<K, S, O>
where
    K: Clone + Eq + Hash,
    S: Scalar,
{
    /// Read-only access to the engine.
    #[must_use]
    pub fn engine(&self) -> &WindowEngine<K, S, O> {
        &self.engine
    }

    /// The current window.
    #[must_use]
    pub fn range(&self) -> WindowRange<S> {
        self.engine.range()
    }

    /// The coordinator configuration.
    #[must_use]
    pub fn config(&self) -> &ScrollConfig<S> {
        &self.config
    }

    /// Returns `true` while an older-page request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns `true` while bottom anchoring still wants frames.
    #[must_use]
    pub fn is_anchoring(&self) -> bool {
        self.anchor.is_active()
    }

    /// Stops bottom anchoring, for example when the user grabs the scrollbar.
    pub fn cancel_anchoring(&mut self) {
        self.anchor.cancel();
    }

    /// The earliest pending timer deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match (
            self.scroll_throttle.deadline(),
            self.rebuild_debounce.deadline(),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Shared access to the range observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        self.engine.observer()
    }
}
