// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration and its validation.

use core::fmt;

use crate::Scalar;

/// Number of items kept mounted by [`WindowConfig::default`].
pub const DEFAULT_KEEP_COUNT: usize = 45;

/// Scroll slack, in items, used by [`WindowConfig::default`].
pub const DEFAULT_BUFFER_COUNT: usize = 25;

/// Estimated item height, in pixels, used by [`WindowConfig::default`].
pub const DEFAULT_ESTIMATED_ITEM_HEIGHT: usize = 150;

/// Fixed parameters of a [`WindowEngine`](crate::WindowEngine).
///
/// - `keep_count` is the number of indices mounted at once.
/// - `estimated_item_height` seeds the average height until measurements exist.
/// - `buffer_count` is how far, in indices, the scroll position may drift past
///   the window start before the window is moved.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowConfig<S> {
    /// Number of items kept mounted regardless of scroll position.
    pub keep_count: usize,
    /// Height used for any item that has not been measured yet.
    pub estimated_item_height: S,
    /// Scroll distance, in items, tolerated before the window moves.
    pub buffer_count: usize,
}

impl<S: Scalar> WindowConfig<S> {
    /// Creates a configuration from its three parameters.
    #[must_use]
    pub fn new(keep_count: usize, estimated_item_height: S, buffer_count: usize) -> Self {
        Self {
            keep_count,
            estimated_item_height,
            buffer_count,
        }
    }

    /// Sets the number of items kept mounted.
    #[must_use]
    pub fn with_keep_count(mut self, keep_count: usize) -> Self {
        self.keep_count = keep_count;
        self
    }

    /// Sets the estimated height of unmeasured items.
    #[must_use]
    pub fn with_estimated_item_height(mut self, height: S) -> Self {
        self.estimated_item_height = height;
        self
    }

    /// Sets the scroll buffer, in items.
    #[must_use]
    pub fn with_buffer_count(mut self, buffer_count: usize) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    /// Checks that the configuration describes a usable window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keep_count == 0 {
            return Err(ConfigError::ZeroKeepCount);
        }
        if !self.estimated_item_height.is_valid_extent() {
            return Err(ConfigError::InvalidEstimatedHeight);
        }
        Ok(())
    }
}

impl<S: Scalar> Default for WindowConfig<S> {
    fn default() -> Self {
        Self::new(
            DEFAULT_KEEP_COUNT,
            S::from_usize(DEFAULT_ESTIMATED_ITEM_HEIGHT),
            DEFAULT_BUFFER_COUNT,
        )
    }
}

/// Error returned when a [`WindowConfig`] cannot drive an engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `keep_count` was zero, so no item could ever be mounted.
    ZeroKeepCount,
    /// `estimated_item_height` was negative, NaN, or infinite.
    InvalidEstimatedHeight,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroKeepCount => f.write_str("keep count must be at least 1"),
            Self::InvalidEstimatedHeight => {
                f.write_str("estimated item height must be finite and non-negative")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
