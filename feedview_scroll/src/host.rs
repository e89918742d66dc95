// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interfaces the coordinator consumes from the host UI.

/// The scrollable container, as seen by the coordinator.
///
/// All extents use the same scalar and unit as the window engine.
pub trait ScrollHost<S> {
    /// Returns `false` once the container has been torn down; every
    /// coordinator callback becomes a no-op then.
    fn is_mounted(&self) -> bool {
        true
    }

    /// Current scroll offset from the top of the content.
    fn scroll_offset(&self) -> S;

    /// Moves the scroll position. Hosts may clamp to their scrollable range.
    fn set_scroll_offset(&mut self, offset: S);

    /// Height of the visible part of the container.
    fn viewport_extent(&self) -> S;

    /// Height of everything inside the container, padding included.
    fn content_extent(&self) -> S;
}

/// Source of older feed pages.
///
/// The coordinator never calls this again while a request is in flight; the
/// request is considered resolved at the next id-sequence change.
pub trait OlderPages {
    /// Starts fetching the page of items older than the current top.
    fn request_older_page(&mut self);
}

impl<F: FnMut()> OlderPages for F {
    fn request_older_page(&mut self) {
        self();
    }
}
