// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feedview Scroll: event coordination for the feedview windowing engine.
//!
//! [`feedview_window::WindowEngine`] is a pure state machine. This crate sits
//! between it and a host UI, turning raw scroll, measurement, and data events
//! into engine calls at a sustainable rate:
//!
//! - [`FeedCoordinator`]: throttles scroll passes, debounces offset rebuilds,
//!   requests older pages at the top edge, corrects the scroll position when a
//!   page is prepended, and anchors to the bottom on first load.
//! - [`ScrollHost`]: the scrollable container as seen by the coordinator.
//! - [`OlderPages`]: where requests for older items go. Closures implement it.
//! - [`timer`]: clock-free [`Throttle`](timer::Throttle) and
//!   [`Debounce`](timer::Debounce) primitives.
//! - [`anchor`]: bounded per-frame re-anchoring to the bottom of the content.
//!
//! Nothing here reads a clock or spawns tasks. Hosts pass monotonic
//! milliseconds into every time-sensitive call and drive
//! [`FeedCoordinator::tick`] from their own timer or animation-frame callback.
//!
//! ## Minimal example
//!
//! ```rust
//! use feedview_scroll::{FeedCoordinator, ScrollConfig, ScrollHost};
//! use feedview_window::{RangeLog, WindowConfig};
//!
//! struct Pane {
//!     offset: f64,
//!     content: f64,
//! }
//!
//! impl ScrollHost<f64> for Pane {
//!     fn scroll_offset(&self) -> f64 { self.offset }
//!     fn set_scroll_offset(&mut self, offset: f64) {
//!         self.offset = offset.clamp(0.0, self.content - 600.0);
//!     }
//!     fn viewport_extent(&self) -> f64 { 600.0 }
//!     fn content_extent(&self) -> f64 { self.content }
//! }
//!
//! let mut feed = FeedCoordinator::new(
//!     WindowConfig::new(20, 120.0_f64, 10),
//!     ScrollConfig::default(),
//!     RangeLog::new(),
//! )
//! .unwrap();
//!
//! let mut pane = Pane { offset: 0.0, content: 6000.0 };
//! feed.notify_id_sequence_changed(0..50_u32, &mut pane);
//!
//! // First load lands on the newest message.
//! assert_eq!(pane.offset, 5400.0);
//! assert_eq!((feed.range().start, feed.range().end), (30, 49));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod anchor;
mod coordinator;
mod host;
pub mod timer;

pub use coordinator::{
    CoordinatorError, DEFAULT_MAX_ANCHOR_FRAMES, DEFAULT_OFFSET_REBUILD_DEBOUNCE_MS,
    DEFAULT_SCROLL_THROTTLE_MS, FeedCoordinator, ScrollConfig,
};
pub use host::{OlderPages, ScrollHost};
