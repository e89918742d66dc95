// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel quantities: heights, offsets, paddings, and scroll positions.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// A floating-point pixel quantity, implemented for `f32` and `f64`.
///
/// Every value the engine stores is expected to be finite and non-negative;
/// [`sanitize`](Self::sanitize) is how inputs get there.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// `0.0`.
    fn zero() -> Self;

    /// Converts a count, rounding to the nearest representable value.
    fn from_usize(value: usize) -> Self;

    /// Rounds half away from zero to the nearest whole pixel.
    fn round(self) -> Self;

    /// Returns `true` unless the value is NaN or infinite.
    fn is_finite(self) -> bool;

    /// Returns `true` for negative values, `-0.0` included.
    fn is_sign_negative(self) -> bool;

    /// Returns `true` for a usable pixel quantity: finite and not negative.
    fn is_valid_extent(self) -> bool {
        self.is_finite() && !self.is_sign_negative()
    }

    /// Maps negative and non-finite values to zero.
    fn sanitize(self) -> Self {
        if self.is_valid_extent() {
            self
        } else {
            Self::zero()
        }
    }
}

macro_rules! impl_scalar {
    ($ty:ty, $round:path) => {
        impl Scalar for $ty {
            fn zero() -> Self {
                0.0
            }

            fn from_usize(value: usize) -> Self {
                value as Self
            }

            fn round(self) -> Self {
                $round(self)
            }

            fn is_finite(self) -> bool {
                <$ty>::is_finite(self)
            }

            fn is_sign_negative(self) -> bool {
                <$ty>::is_sign_negative(self)
            }
        }
    };
}

impl_scalar!(f32, libm::roundf);
impl_scalar!(f64, libm::round);
