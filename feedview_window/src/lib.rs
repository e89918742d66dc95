// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feedview Window: the windowing engine behind a virtualized message feed.
//!
//! A feed may hold thousands of messages whose heights are irregular and only
//! known once each message has been rendered. This crate decides which
//! contiguous slice of the feed should be mounted, and how much blank padding
//! must surround it so that the scrollable extent and scroll offset stay
//! visually correct.
//!
//! The core concepts are:
//!
//! - [`WindowEngine`]: a state machine mapping an id sequence, per-id measured
//!   heights, and a scroll offset to a [`WindowRange`].
//! - [`WindowRange`]: inclusive `start..=end` indices plus `pad_front` and
//!   `pad_behind` spacer heights.
//! - [`WindowConfig`]: keep count, estimated item height, and scroll buffer,
//!   fixed at construction and validated up front ([`ConfigError`]).
//! - [`RangeObserver`]: receives every emitted window, in order. Closures and
//!   [`RangeLog`] implement it.
//! - [`Scalar`]: a small abstraction over `f32`/`f64` used for all pixel values.
//!
//! This crate deliberately does **not** know about widgets, DOM nodes, timers,
//! or fetching. Host frameworks are responsible for:
//!
//! - Owning the actual data and rendering `ids[range.start..=range.end]`.
//! - Feeding measured heights back through [`WindowEngine::record_height`].
//! - Deciding when to pay for [`WindowEngine::rebuild_offsets`], which is
//!   linear in the list length and never runs implicitly.
//!
//! The `feedview_scroll` crate wires these calls to scroll and resize events.
//!
//! ## Minimal example
//!
//! ```rust
//! use feedview_window::{RangeLog, WindowConfig, WindowEngine};
//!
//! let config = WindowConfig::new(20, 130.0_f64, 10);
//! let mut engine = WindowEngine::new(config, RangeLog::new()).unwrap();
//!
//! // 10 messages fit inside the window: no padding needed.
//! engine.set_ids(["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
//! for id in engine.ids().to_vec() {
//!     engine.record_height(&id, 120.0);
//! }
//! engine.rebuild_offsets();
//! engine.recompute_range();
//!
//! let range = engine.range();
//! assert_eq!((range.start, range.end), (0, 9));
//! assert_eq!((range.pad_front, range.pad_behind), (0.0, 0.0));
//! ```
//!
//! ## Estimates and exactness
//!
//! Unmeasured items are assumed to be [`WindowEngine::average_height`] tall.
//! The average follows measurements only until `min(keep_count, len)` heights
//! are known, then stays frozen. `pad_behind` is estimated from the average
//! until offset lookups have reached the last index, after which it is
//! computed exactly from the offset table.
//!
//! All heights and offsets are expected to be finite and non-negative; invalid
//! inputs are clamped or ignored rather than reported.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod heights;
mod offsets;
mod range;
mod scalar;

pub use config::{
    ConfigError, DEFAULT_BUFFER_COUNT, DEFAULT_ESTIMATED_ITEM_HEIGHT, DEFAULT_KEEP_COUNT,
    WindowConfig,
};
pub use engine::{Measurement, RangeLog, RangeObserver, WindowEngine};
pub use range::{ScrollDirection, WindowRange};
pub use scalar::Scalar;
