// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static strip geometry: tile placement and drag bounds.

use kurbo::Rect;
use understory_motion::elastic::ConstraintBounds;

use crate::error::{ConfigError, non_negative, positive};

/// Dimensions of a tile strip and the viewport it scrolls in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Width of one tile.
    pub tile_width: f64,
    /// Height of one tile, and of the container.
    pub tile_height: f64,
    /// Horizontal space between consecutive tiles.
    pub gap: f64,
    /// Number of tiles in the strip.
    pub tile_count: usize,
    /// Width of the viewport the strip is dragged within.
    pub viewport_width: f64,
    /// Extra width given to each tile's image so bulging edges stay filled.
    pub overscan: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tile_width: 400.0,
            tile_height: 400.0,
            gap: 24.0,
            tile_count: 9,
            viewport_width: 1200.0,
            overscan: 100.0,
        }
    }
}

impl LayoutConfig {
    /// Checks every dimension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_count == 0 {
            return Err(ConfigError::EmptyStrip);
        }
        positive("layout.tile_width", self.tile_width)?;
        positive("layout.tile_height", self.tile_height)?;
        non_negative("layout.gap", self.gap)?;
        non_negative("layout.viewport_width", self.viewport_width)?;
        non_negative("layout.overscan", self.overscan)?;
        Ok(())
    }

    /// Horizontal distance from one tile's left edge to the next.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.tile_width + self.gap
    }

    /// Drag bounds for this layout.
    ///
    /// `max` is zero (first tile flush with the viewport start) and `min`
    /// scrolls the strip until its trailing edge meets the viewport end. A
    /// strip narrower than the viewport cannot scroll: both bounds are zero.
    #[must_use]
    pub fn constraint_bounds(&self) -> ConstraintBounds {
        let min = -(self.tile_count as f64 * self.pitch()) + self.viewport_width;
        ConstraintBounds::new(min, 0.0)
    }
}

/// Validated layout with drag bounds kept in sync with the viewport width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselLayout {
    config: LayoutConfig,
    bounds: ConstraintBounds,
}

impl CarouselLayout {
    /// Validates `config` and derives its bounds.
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            bounds: config.constraint_bounds(),
        })
    }

    /// Returns the layout configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Current drag bounds.
    #[must_use]
    pub fn bounds(&self) -> ConstraintBounds {
        self.bounds
    }

    /// Number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.config.tile_count
    }

    /// Updates the viewport width and recomputes the bounds.
    ///
    /// Returns `Ok(true)` when the width changed. An invalid width is
    /// rejected and leaves the layout untouched.
    pub fn set_viewport_width(&mut self, viewport_width: f64) -> Result<bool, ConfigError> {
        non_negative("layout.viewport_width", viewport_width)?;
        if self.config.viewport_width == viewport_width {
            return Ok(false);
        }
        self.config.viewport_width = viewport_width;
        self.bounds = self.config.constraint_bounds();
        Ok(true)
    }

    /// Left edge of tile `index` in strip coordinates.
    #[must_use]
    pub fn tile_x(&self, index: usize) -> f64 {
        index as f64 * self.config.pitch()
    }

    /// Rectangle of tile `index` in strip coordinates.
    #[must_use]
    pub fn tile_rect(&self, index: usize) -> Rect {
        let x = self.tile_x(index);
        Rect::new(x, 0.0, x + self.config.tile_width, self.config.tile_height)
    }

    /// Rectangles of all tiles, in order.
    pub fn tile_rects(&self) -> impl ExactSizeIterator<Item = Rect> + '_ {
        (0..self.config.tile_count).map(|i| self.tile_rect(i))
    }

    /// Image rectangle of tile `index`: the tile widened by the overscan and
    /// centred on it.
    #[must_use]
    pub fn image_rect(&self, index: usize) -> Rect {
        self.tile_rect(index).inflate(self.config.overscan * 0.5, 0.0)
    }

    /// Height of the container, equal to the tile height.
    #[must_use]
    pub fn container_height(&self) -> f64 {
        self.config.tile_height
    }

    /// The container outline before deformation, in viewport coordinates.
    #[must_use]
    pub fn container_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.config.viewport_width, self.container_height())
    }

    /// Total width of the strip including gaps.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.config.tile_count as f64 * self.config.pitch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_bounds() {
        let layout = CarouselLayout::new(LayoutConfig::default()).unwrap();
        assert_eq!(layout.bounds(), ConstraintBounds::new(-2616.0, 0.0));
        assert_eq!(layout.bounds().min, -((400.0 + 24.0) * 9.0) + 1200.0);
        assert_eq!(layout.bounds().max, 0.0);
        assert_eq!(layout.content_width(), 3816.0);
    }

    #[test]
    fn resize_recomputes_bounds() {
        let mut layout = CarouselLayout::new(LayoutConfig::default()).unwrap();
        assert_eq!(layout.set_viewport_width(1600.0), Ok(true));
        assert_eq!(layout.bounds().min, -2216.0);
        assert_eq!(layout.container_rect().width(), 1600.0);

        assert_eq!(layout.set_viewport_width(1600.0), Ok(false));
    }

    #[test]
    fn invalid_resize_keeps_previous_bounds() {
        let mut layout = CarouselLayout::new(LayoutConfig::default()).unwrap();
        assert!(layout.set_viewport_width(-1.0).is_err());
        assert!(layout.set_viewport_width(f64::NAN).is_err());
        assert_eq!(layout.bounds().min, -2616.0);
        assert_eq!(layout.config().viewport_width, 1200.0);
    }

    #[test]
    fn narrow_strip_cannot_scroll() {
        let layout = CarouselLayout::new(LayoutConfig {
            tile_count: 2,
            ..LayoutConfig::default()
        })
        .unwrap();
        assert_eq!(layout.bounds(), ConstraintBounds::new(0.0, 0.0));
    }

    #[test]
    fn tiles_are_spaced_by_pitch() {
        let layout = CarouselLayout::new(LayoutConfig::default()).unwrap();
        assert_eq!(layout.tile_x(0), 0.0);
        assert_eq!(layout.tile_x(3), 1272.0);
        assert_eq!(layout.tile_rect(1), Rect::new(424.0, 0.0, 824.0, 400.0));
        assert_eq!(layout.tile_rects().len(), 9);
        assert_eq!(layout.tile_rects().last(), Some(layout.tile_rect(8)));
        assert_eq!(layout.container_height(), 400.0);
    }

    #[test]
    fn image_rect_is_overscanned_and_centred() {
        let layout = CarouselLayout::new(LayoutConfig::default()).unwrap();
        let image = layout.image_rect(1);
        assert_eq!(image, Rect::new(374.0, 0.0, 874.0, 400.0));
        assert_eq!(image.center(), layout.tile_rect(1).center());
    }

    #[test]
    fn validation_rejects_bad_dimensions() {
        let bad = |f: fn(&mut LayoutConfig)| {
            let mut cfg = LayoutConfig::default();
            f(&mut cfg);
            cfg.validate().unwrap_err()
        };
        assert_eq!(bad(|c| c.tile_count = 0), ConfigError::EmptyStrip);
        assert_eq!(bad(|c| c.tile_width = -400.0).field(), "layout.tile_width");
        assert_eq!(bad(|c| c.tile_height = 0.0).field(), "layout.tile_height");
        assert_eq!(bad(|c| c.gap = -1.0).field(), "layout.gap");
        assert_eq!(bad(|c| c.viewport_width = f64::INFINITY).field(), "layout.viewport_width");
        assert_eq!(bad(|c| c.overscan = -10.0).field(), "layout.overscan");
    }
}
