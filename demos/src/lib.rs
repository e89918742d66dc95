// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles for running a feed without a UI: a paginated message source
//! and a scroll container that lays messages out at fixed heights.

use feedview_scroll::{ScrollConfig, ScrollHost};
use feedview_window::WindowConfig;
use hashbrown::HashMap;
use serde::Deserialize;

/// Message ids. Larger ids are newer.
pub type MessageId = u64;

/// One page of a [`PageSource`], newest message first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Ids in descending recency.
    pub ids: Vec<MessageId>,
    /// Cursor for the next (older) page; `None` once history is exhausted.
    pub next: Option<MessageId>,
}

/// Serves ids `1..=newest` newest first, `page_size` at a time.
///
/// The cursor is the last (oldest) id of the previous page; a page holds the
/// ids strictly older than it.
#[derive(Clone, Debug)]
pub struct PageSource {
    newest: MessageId,
    page_size: usize,
}

impl PageSource {
    /// Creates a source whose newest message is `newest`.
    pub fn new(newest: MessageId, page_size: usize) -> Self {
        Self {
            newest,
            page_size: page_size.max(1),
        }
    }

    /// Fetches the page after `cursor`, or the newest page for `None`.
    pub fn page(&self, cursor: Option<MessageId>) -> Page {
        let top = match cursor {
            Some(cursor) => cursor.saturating_sub(1).min(self.newest),
            None => self.newest,
        };
        let ids: Vec<MessageId> = (1..=top).rev().take(self.page_size).collect();
        let next = ids.last().copied().filter(|&oldest| oldest > 1);
        Page { ids, next }
    }
}

/// Rendered height of a message; a stand-in for real text layout.
pub fn message_height(id: MessageId) -> f64 {
    // Short one-liners, the occasional multi-line message or image.
    let lines = match id % 7 {
        0 => 6,
        3 => 3,
        _ => 1 + id % 2,
    };
    24.0 + 20.0 * lines as f64
}

/// A scroll container holding every message laid out in order, oldest first.
#[derive(Clone, Debug)]
pub struct SimulatedHost {
    items: Vec<MessageId>,
    heights: HashMap<MessageId, f64>,
    viewport: f64,
    offset: f64,
    mounted: bool,
}

impl SimulatedHost {
    /// Creates an empty, mounted container.
    pub fn new(viewport: f64) -> Self {
        Self {
            items: Vec::new(),
            heights: HashMap::new(),
            viewport,
            offset: 0.0,
            mounted: true,
        }
    }

    /// Lays out `items`, oldest first, keeping the current scroll offset.
    pub fn set_items(&mut self, items: &[MessageId]) {
        self.items = items.to_vec();
        self.heights = items
            .iter()
            .map(|&id| (id, message_height(id)))
            .collect();
        self.clamp();
    }

    /// The laid-out height of `id`, if it is in the container.
    pub fn height_of(&self, id: MessageId) -> Option<f64> {
        self.heights.get(&id).copied()
    }

    /// Tears the container down.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Scrolls by `delta`, as a wheel or touch gesture would.
    pub fn scroll_by(&mut self, delta: f64) {
        self.offset += delta;
        self.clamp();
    }

    fn clamp(&mut self) {
        let max = (self.content_extent() - self.viewport).max(0.0);
        self.offset = self.offset.clamp(0.0, max);
    }
}

impl ScrollHost<f64> for SimulatedHost {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.clamp();
    }

    fn viewport_extent(&self) -> f64 {
        self.viewport
    }

    fn content_extent(&self) -> f64 {
        self.heights.values().sum()
    }
}

/// Settings for a simulated session, loadable from JSON.
#[derive(Clone, Debug, Deserialize)]
pub struct SessionConfig {
    /// Windowing parameters.
    pub window: WindowConfig<f64>,
    /// Scroll coordination parameters.
    #[serde(default)]
    pub scroll: ScrollConfig<f64>,
    /// Height of the visible area.
    pub viewport: f64,
    /// Newest message id; the history holds ids `1..=newest`.
    pub newest: MessageId,
    /// Messages per page.
    pub page_size: usize,
}

impl SessionConfig {
    /// Parses a session from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
