// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tail anchoring for chat-style feeds.
//!
//! A feed opens on its newest message, at the bottom. Late layout changes (an
//! image finishing loading, a font swap) can push the bottom back out of view
//! in the frames after the first scroll, so [`TailAnchor`] re-applies the
//! tail-aligned offset once per frame until the bottom is stable or its frame
//! budget runs out.
//!
//! The `epsilon` controls how "sticky" the tail is: a scroll offset within
//! `epsilon` *above* the tail-aligned offset counts as being at the tail.
//!
//! ## Minimal example
//!
//! ```
//! use feedview_scroll::anchor::{AnchorStep, TailAnchor, is_at_tail, tail_scroll_offset};
//! use feedview_scroll::ScrollHost;
//!
//! struct Pane {
//!     offset: f64,
//!     content: f64,
//! }
//!
//! impl ScrollHost<f64> for Pane {
//!     fn scroll_offset(&self) -> f64 { self.offset }
//!     fn set_scroll_offset(&mut self, offset: f64) { self.offset = offset; }
//!     fn viewport_extent(&self) -> f64 { 30.0 }
//!     fn content_extent(&self) -> f64 { self.content }
//! }
//!
//! assert_eq!(tail_scroll_offset(100.0, 30.0), 70.0);
//! assert!(is_at_tail(69.5, 100.0, 30.0, 1.0));
//!
//! let mut pane = Pane { offset: 0.0, content: 100.0 };
//! let mut anchor = TailAnchor::new(1.0_f64);
//! anchor.begin(4);
//! assert_eq!(anchor.step(&mut pane), AnchorStep::Moved);
//! assert_eq!(pane.offset, 70.0);
//! assert_eq!(anchor.step(&mut pane), AnchorStep::Settled);
//! assert!(!anchor.is_active());
//! ```

use feedview_window::Scalar;

use crate::ScrollHost;

/// The scroll offset that keeps the tail of the content visible.
///
/// Clamped to `>= 0`, and `0` when the content fits inside the viewport.
#[must_use]
pub fn tail_scroll_offset<S: Scalar>(content_extent: S, viewport_extent: S) -> S {
    let total = content_extent.sanitize();
    let viewport = viewport_extent.sanitize();
    if total <= viewport {
        S::zero()
    } else {
        total - viewport
    }
}

/// Returns `true` if `scroll_offset` is within `epsilon` of the tail.
///
/// The check is asymmetric: offsets past the tail always count as anchored.
#[must_use]
pub fn is_at_tail<S: Scalar>(
    scroll_offset: S,
    content_extent: S,
    viewport_extent: S,
    epsilon: S,
) -> bool {
    let tail = tail_scroll_offset(content_extent, viewport_extent);
    scroll_offset.sanitize() + epsilon.sanitize() >= tail
}

/// Result of one [`TailAnchor::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnchorStep {
    /// No anchoring in progress.
    Idle,
    /// The host was scrolled to the tail; check again next frame.
    Moved,
    /// The host is at the tail; anchoring finished.
    Settled,
    /// The frame budget ran out before the tail stayed put.
    Exhausted,
}

/// Bounded, per-frame re-anchoring to the bottom of the content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TailAnchor<S> {
    epsilon: S,
    remaining_frames: u32,
    active: bool,
}

impl<S: Scalar> TailAnchor<S> {
    /// Creates an idle anchor with the given tail tolerance.
    #[must_use]
    pub fn new(epsilon: S) -> Self {
        Self {
            epsilon,
            remaining_frames: 0,
            active: false,
        }
    }

    /// The tail tolerance.
    #[must_use]
    pub fn epsilon(&self) -> S {
        self.epsilon
    }

    /// Starts anchoring, allowing at most `frames` scroll adjustments.
    pub fn begin(&mut self, frames: u32) {
        self.remaining_frames = frames;
        self.active = true;
    }

    /// Stops anchoring without touching the host.
    pub fn cancel(&mut self) {
        self.active = false;
        self.remaining_frames = 0;
    }

    /// Returns `true` while anchoring still wants frames.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Adjustments left before anchoring gives up.
    #[must_use]
    pub fn remaining_frames(&self) -> u32 {
        self.remaining_frames
    }

    /// Checks the host once, scrolling it to the tail if it drifted away.
    pub fn step<H: ScrollHost<S> + ?Sized>(&mut self, host: &mut H) -> AnchorStep {
        if !self.active {
            return AnchorStep::Idle;
        }
        let content = host.content_extent();
        let viewport = host.viewport_extent();
        if is_at_tail(host.scroll_offset(), content, viewport, self.epsilon) {
            self.active = false;
            return AnchorStep::Settled;
        }
        if self.remaining_frames == 0 {
            self.active = false;
            return AnchorStep::Exhausted;
        }
        self.remaining_frames -= 1;
        host.set_scroll_offset(tail_scroll_offset(content, viewport));
        AnchorStep::Moved
    }
}
