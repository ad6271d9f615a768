// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::intensity::Intensity;

/// Curve family used for bent edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveStyle {
    /// One quadratic segment per bent edge, control point at the edge
    /// midpoint displaced by the bend.
    #[default]
    Quadratic,
    /// One cubic segment per bent edge, control points at one and two thirds
    /// of the edge, both displaced by the bend.
    Cubic,
}

/// How strongly one surface reacts to velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceTuning {
    /// Velocity, in units per second, at which the surface is fully bent.
    pub max_velocity: f64,
    /// Control point displacement at full intensity.
    pub max_bend: f64,
    /// Curve family for the bent edges.
    pub curve: CurveStyle,
}

impl SurfaceTuning {
    /// Defaults for the container silhouette.
    pub const CONTAINER: Self = Self {
        max_velocity: 3000.0,
        max_bend: 80.0,
        curve: CurveStyle::Quadratic,
    };

    /// Defaults for tile bulges.
    pub const TILE: Self = Self {
        max_velocity: 2500.0,
        max_bend: 120.0,
        curve: CurveStyle::Quadratic,
    };

    /// Returns a copy with a different saturation velocity.
    #[must_use]
    pub const fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Returns a copy with a different full-intensity bend.
    #[must_use]
    pub const fn with_max_bend(mut self, max_bend: f64) -> Self {
        self.max_bend = max_bend;
        self
    }

    /// Returns a copy with a different curve family.
    #[must_use]
    pub const fn with_curve(mut self, curve: CurveStyle) -> Self {
        self.curve = curve;
        self
    }

    /// Intensity of this surface at `velocity`.
    #[must_use]
    pub fn intensity(&self, velocity: f64) -> Intensity {
        Intensity::from_velocity(velocity, self.max_velocity)
    }
}

/// Trailing-edge shadow and highlight overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadingTuning {
    /// Shadow opacity ceiling.
    pub max_opacity: f64,
    /// Speed that maps to an opacity of `1.0` before the ceiling applies.
    pub velocity_scale: f64,
    /// Width of the shadow band as a fraction of the tile width.
    pub extent: f64,
    /// Constant opacity of the highlight overlay.
    pub highlight_opacity: f64,
}

impl Default for ShadingTuning {
    fn default() -> Self {
        Self {
            max_opacity: 0.4,
            velocity_scale: 5000.0,
            extent: 0.2,
            highlight_opacity: 0.15,
        }
    }
}

/// Full deformation tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeformConfig {
    /// Container silhouette.
    pub container: SurfaceTuning,
    /// Tile bulge.
    pub tile: SurfaceTuning,
    /// Strip skew at full tile intensity, in degrees.
    pub max_skew_deg: f64,
    /// Trailing-edge shading.
    pub shading: ShadingTuning,
}

impl Default for DeformConfig {
    fn default() -> Self {
        Self {
            container: SurfaceTuning::CONTAINER,
            tile: SurfaceTuning::TILE,
            max_skew_deg: 10.0,
            shading: ShadingTuning::default(),
        }
    }
}

impl DeformConfig {
    /// Returns a copy using `curve` for both surfaces.
    #[must_use]
    pub fn with_curve(mut self, curve: CurveStyle) -> Self {
        self.container.curve = curve;
        self.tile.curve = curve;
        self
    }
}
