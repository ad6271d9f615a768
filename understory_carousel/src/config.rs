// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration and its validation.

use understory_deform::{DeformConfig, ShadingTuning, SurfaceTuning};
use understory_motion::elastic::{DEFAULT_ELASTIC_FACTOR, ReleaseConfig};
use understory_motion::spring::SpringConfig;
use understory_motion::velocity::VelocityConfig;

use crate::error::{ConfigError, in_range, non_negative, positive};
use crate::layout::LayoutConfig;

/// Largest accepted strip skew, in degrees.
pub const MAX_SKEW_DEG: f64 = 45.0;

/// Everything a [`Carousel`](crate::Carousel) is tuned by.
///
/// Build one from [`Default`] and the `with_*` setters, then hand it to
/// [`Carousel::new`](crate::Carousel::new), which validates it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselConfig {
    /// Strip and viewport dimensions.
    pub layout: LayoutConfig,
    /// Velocity to geometry mapping.
    pub deform: DeformConfig,
    /// Spring that smooths the raw velocity.
    pub smoother: SpringConfig,
    /// Velocity estimation and idle decay.
    pub velocity: VelocityConfig,
    /// Fraction of the drag past a bound that is still shown.
    pub elastic_factor: f64,
    /// Glide and return after a drag ends.
    pub release: ReleaseConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            deform: DeformConfig::default(),
            smoother: SpringConfig::SMOOTHER,
            velocity: VelocityConfig::default(),
            elastic_factor: DEFAULT_ELASTIC_FACTOR,
            release: ReleaseConfig::default(),
        }
    }
}

impl CarouselConfig {
    /// Returns a copy with a different layout.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Returns a copy with a different viewport width.
    #[must_use]
    pub fn with_viewport_width(mut self, viewport_width: f64) -> Self {
        self.layout.viewport_width = viewport_width;
        self
    }

    /// Returns a copy with a different tile count.
    #[must_use]
    pub fn with_tile_count(mut self, tile_count: usize) -> Self {
        self.layout.tile_count = tile_count;
        self
    }

    /// Returns a copy with different deformation tuning.
    #[must_use]
    pub fn with_deform(mut self, deform: DeformConfig) -> Self {
        self.deform = deform;
        self
    }

    /// Returns a copy with a different smoothing spring.
    #[must_use]
    pub fn with_smoother(mut self, smoother: SpringConfig) -> Self {
        self.smoother = smoother;
        self
    }

    /// Returns a copy with different velocity estimation.
    #[must_use]
    pub fn with_velocity(mut self, velocity: VelocityConfig) -> Self {
        self.velocity = velocity;
        self
    }

    /// Returns a copy with a different elastic factor.
    #[must_use]
    pub fn with_elastic_factor(mut self, elastic_factor: f64) -> Self {
        self.elastic_factor = elastic_factor;
        self
    }

    /// Returns a copy with a different release animation.
    #[must_use]
    pub fn with_release(mut self, release: ReleaseConfig) -> Self {
        self.release = release;
        self
    }

    /// Checks every option and reports the first one out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        validate_deform(&self.deform)?;
        validate_spring(SMOOTHER_FIELDS, &self.smoother)?;
        non_negative("velocity.idle_timeout_ms", self.velocity.idle_timeout_ms)?;
        non_negative("velocity.idle_decay_ms", self.velocity.idle_decay_ms)?;
        in_range("elastic_factor", self.elastic_factor, 0.0, 1.0)?;
        validate_release(&self.release)
    }
}

fn validate_surface(
    [max_velocity, max_bend]: [&'static str; 2],
    tuning: &SurfaceTuning,
) -> Result<(), ConfigError> {
    positive(max_velocity, tuning.max_velocity)?;
    non_negative(max_bend, tuning.max_bend)
}

fn validate_shading(shading: &ShadingTuning) -> Result<(), ConfigError> {
    in_range("deform.shading.max_opacity", shading.max_opacity, 0.0, 1.0)?;
    positive("deform.shading.velocity_scale", shading.velocity_scale)?;
    in_range("deform.shading.extent", shading.extent, 0.0, 1.0)?;
    in_range(
        "deform.shading.highlight_opacity",
        shading.highlight_opacity,
        0.0,
        1.0,
    )
}

fn validate_deform(deform: &DeformConfig) -> Result<(), ConfigError> {
    validate_surface(
        [
            "deform.container.max_velocity",
            "deform.container.max_bend",
        ],
        &deform.container,
    )?;
    validate_surface(
        ["deform.tile.max_velocity", "deform.tile.max_bend"],
        &deform.tile,
    )?;
    in_range("deform.max_skew_deg", deform.max_skew_deg, 0.0, MAX_SKEW_DEG)?;
    validate_shading(&deform.shading)
}

const SMOOTHER_FIELDS: [&str; 4] = [
    "smoother.stiffness",
    "smoother.damping",
    "smoother.mass",
    "smoother.max_step",
];

const RETURN_SPRING_FIELDS: [&str; 4] = [
    "release.return_spring.stiffness",
    "release.return_spring.damping",
    "release.return_spring.mass",
    "release.return_spring.max_step",
];

fn validate_spring(
    [stiffness, damping, mass, max_step]: [&'static str; 4],
    spring: &SpringConfig,
) -> Result<(), ConfigError> {
    positive(stiffness, spring.stiffness)?;
    non_negative(damping, spring.damping)?;
    positive(mass, spring.mass)?;
    positive(max_step, spring.max_step)
}

fn validate_release(release: &ReleaseConfig) -> Result<(), ConfigError> {
    non_negative("release.power", release.power)?;
    non_negative("release.time_constant_ms", release.time_constant_ms)?;
    positive("release.rest_delta", release.rest_delta)?;
    non_negative("release.rest_speed", release.rest_speed)?;
    validate_spring(RETURN_SPRING_FIELDS, &release.return_spring)
}
