// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized deformation intensity.

use core::ops::Neg;

/// Intensities with a magnitude below this produce no deformation.
pub const DEAD_ZONE: f64 = 0.01;

/// A velocity normalized into `[-1, 1]`.
///
/// The sign follows the drag direction. Construction never fails: NaN maps to
/// zero and out-of-range values saturate.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Intensity(f64);

impl Intensity {
    /// No deformation.
    pub const ZERO: Self = Self(0.0);

    /// Clamps `value` into `[-1, 1]`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(-1.0, 1.0))
        }
    }

    /// Normalizes `velocity` against the velocity that saturates the effect.
    ///
    /// A non-positive or NaN `max_velocity` yields [`Intensity::ZERO`].
    #[must_use]
    pub fn from_velocity(velocity: f64, max_velocity: f64) -> Self {
        if max_velocity.is_nan() || max_velocity <= 0.0 {
            return Self::ZERO;
        }
        Self::new(velocity / max_velocity)
    }

    /// The signed value in `[-1, 1]`.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The magnitude in `[0, 1]`.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.0.abs()
    }

    /// Returns `true` when the intensity is too small to deform anything.
    #[must_use]
    pub fn is_dead_zone(self) -> bool {
        self.magnitude() < DEAD_ZONE
    }

    /// Signed displacement for a surface whose full-intensity bend is
    /// `max_bend`.
    #[must_use]
    pub fn bend(self, max_bend: f64) -> f64 {
        self.0 * max_bend
    }
}

impl Neg for Intensity {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
