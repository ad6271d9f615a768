// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, BezPath, Point, Rect};

use crate::intensity::Intensity;
use crate::style::{CurveStyle, DeformConfig};

/// Left or right vertical edge of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalEdge {
    /// The edge at the smaller x coordinate.
    Left,
    /// The edge at the larger x coordinate.
    Right,
}

/// Shading applied to every tile for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileShading {
    /// Edge the shadow is drawn on: the one trailing the motion.
    pub trailing_edge: HorizontalEdge,
    /// Shadow opacity in `[0, max_opacity]`.
    pub shadow_opacity: f64,
    /// Shadow band width as a fraction of the tile width.
    pub shadow_extent: f64,
    /// Highlight overlay opacity.
    pub highlight_opacity: f64,
}

impl TileShading {
    /// The rectangle covered by the shadow band of `tile`.
    #[must_use]
    pub fn shadow_band(&self, tile: Rect) -> Rect {
        let w = tile.width() * self.shadow_extent.clamp(0.0, 1.0);
        match self.trailing_edge {
            HorizontalEdge::Left => Rect::new(tile.x0, tile.y0, tile.x0 + w, tile.y1),
            HorizontalEdge::Right => Rect::new(tile.x1 - w, tile.y0, tile.x1, tile.y1),
        }
    }
}

/// Everything a renderer needs to draw one deformed frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DeformationGeometry {
    /// Clip outline of the container.
    pub container_path: BezPath,
    /// One clip outline per tile, in the same order and coordinate space as
    /// the tile rectangles they were built from.
    pub tile_paths: Vec<BezPath>,
    /// Skew applied to the whole strip, in degrees.
    pub skew_deg: f64,
    /// Trailing-edge shading shared by all tiles.
    pub shading: TileShading,
    /// Intensity that bent the container.
    pub container_intensity: Intensity,
    /// Intensity that bent the tiles.
    pub tile_intensity: Intensity,
}

impl DeformationGeometry {
    /// Shadow opacity shared by all tiles.
    #[must_use]
    pub fn shadow_opacity(&self) -> f64 {
        self.shading.shadow_opacity
    }
}

/// Maps a smoothed velocity onto container and tile geometry.
///
/// All methods are pure; the mapper only holds tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeformationMapper {
    config: DeformConfig,
}

impl DeformationMapper {
    /// Creates a mapper with the given tuning.
    #[must_use]
    pub fn new(config: DeformConfig) -> Self {
        Self { config }
    }

    /// Returns the tuning.
    #[must_use]
    pub fn config(&self) -> &DeformConfig {
        &self.config
    }

    /// Replaces the tuning.
    pub fn set_config(&mut self, config: DeformConfig) {
        self.config = config;
    }

    /// Hourglass outline of `rect`: top and bottom edges pinch toward each
    /// other at the horizontal midpoint.
    ///
    /// The pinch depends on the magnitude of the velocity only, so both drag
    /// directions produce the same, left-right symmetric outline.
    #[must_use]
    pub fn container_path(&self, velocity: f64, rect: Rect) -> BezPath {
        let tuning = self.config.container;
        let intensity = tuning.intensity(velocity);
        if intensity.is_dead_zone() {
            return flat_path(rect);
        }
        pinch_path(rect, intensity.magnitude() * tuning.max_bend, tuning.curve)
    }

    /// Bulge outline of a tile occupying `rect`.
    ///
    /// Positive velocity (motion toward +x) pushes both vertical edges toward
    /// +x: the right (leading) edge bows outward and the left (trailing) edge
    /// bows inward.
    #[must_use]
    pub fn tile_path(&self, velocity: f64, rect: Rect) -> BezPath {
        let tuning = self.config.tile;
        let intensity = tuning.intensity(velocity);
        if intensity.is_dead_zone() {
            return flat_path(rect);
        }
        bulge_path(rect, intensity.bend(tuning.max_bend), tuning.curve)
    }

    /// Strip skew in degrees, linear in tile intensity.
    #[must_use]
    pub fn skew_deg(&self, velocity: f64) -> f64 {
        let intensity = self.config.tile.intensity(velocity);
        if intensity.is_dead_zone() {
            return 0.0;
        }
        intensity.value() * self.config.max_skew_deg
    }

    /// Horizontal skew transform for the strip.
    #[must_use]
    pub fn skew_transform(&self, velocity: f64) -> Affine {
        let skew_deg = self.skew_deg(velocity);
        if skew_deg == 0.0 {
            return Affine::IDENTITY;
        }
        Affine::skew(skew_deg.to_radians().tan(), 0.0)
    }

    /// Trailing-edge shading at `velocity`.
    ///
    /// Opacity is `min(max_opacity, |velocity| / velocity_scale)`. Moving
    /// toward +x trails on the left; anything else trails on the right.
    #[must_use]
    pub fn shading(&self, velocity: f64) -> TileShading {
        let tuning = self.config.shading;
        let speed = if velocity.is_nan() { 0.0 } else { velocity.abs() };
        let shadow_opacity = if tuning.velocity_scale > 0.0 {
            (speed / tuning.velocity_scale).min(tuning.max_opacity)
        } else {
            0.0
        };
        TileShading {
            trailing_edge: if velocity > 0.0 {
                HorizontalEdge::Left
            } else {
                HorizontalEdge::Right
            },
            shadow_opacity,
            shadow_extent: tuning.extent,
            highlight_opacity: tuning.highlight_opacity,
        }
    }

    /// Full geometry for one frame.
    ///
    /// `tiles` are the tile rectangles in whatever space the caller draws
    /// them in; the returned paths keep their order.
    #[must_use]
    pub fn map(
        &self,
        velocity: f64,
        container: Rect,
        tiles: impl IntoIterator<Item = Rect>,
    ) -> DeformationGeometry {
        DeformationGeometry {
            container_path: self.container_path(velocity, container),
            tile_paths: tiles
                .into_iter()
                .map(|rect| self.tile_path(velocity, rect))
                .collect(),
            skew_deg: self.skew_deg(velocity),
            shading: self.shading(velocity),
            container_intensity: self.config.container.intensity(velocity),
            tile_intensity: self.config.tile.intensity(velocity),
        }
    }
}

/// The undeformed outline of `rect`: four lines, clockwise from the top-left
/// corner in a y-down space.
#[must_use]
pub fn flat_path(rect: Rect) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((rect.x0, rect.y0));
    path.line_to((rect.x1, rect.y0));
    path.line_to((rect.x1, rect.y1));
    path.line_to((rect.x0, rect.y1));
    path.close_path();
    path
}

/// Top and bottom edges pulled toward each other by `pinch`.
fn pinch_path(rect: Rect, pinch: f64, curve: CurveStyle) -> BezPath {
    let Rect { x0, y0, x1, y1 } = rect;
    let w = x1 - x0;
    let mut path = BezPath::new();
    path.move_to((x0, y0));
    match curve {
        CurveStyle::Quadratic => {
            let mid = x0 + w * 0.5;
            path.quad_to((mid, y0 + pinch), (x1, y0));
            path.line_to((x1, y1));
            path.quad_to((mid, y1 - pinch), (x0, y1));
        }
        CurveStyle::Cubic => {
            let third = x0 + w / 3.0;
            let two_thirds = x0 + w * 2.0 / 3.0;
            path.curve_to((third, y0 + pinch), (two_thirds, y0 + pinch), (x1, y0));
            path.line_to((x1, y1));
            path.curve_to((two_thirds, y1 - pinch), (third, y1 - pinch), (x0, y1));
        }
    }
    path.close_path();
    path
}

/// Left and right edges both shifted by `bend` at their middle.
fn bulge_path(rect: Rect, bend: f64, curve: CurveStyle) -> BezPath {
    let Rect { x0, y0, x1, y1 } = rect;
    let h = y1 - y0;
    let mut path = BezPath::new();
    path.move_to((x0, y0));
    path.line_to((x1, y0));
    match curve {
        CurveStyle::Quadratic => {
            let mid = y0 + h * 0.5;
            path.quad_to((x1 + bend, mid), (x1, y1));
            path.line_to((x0, y1));
            path.quad_to((x0 + bend, mid), (x0, y0));
        }
        CurveStyle::Cubic => {
            let third = y0 + h / 3.0;
            let two_thirds = y0 + h * 2.0 / 3.0;
            path.curve_to(
                Point::new(x1 + bend, third),
                Point::new(x1 + bend, two_thirds),
                Point::new(x1, y1),
            );
            path.line_to((x0, y1));
            path.curve_to(
                Point::new(x0 + bend, two_thirds),
                Point::new(x0 + bend, third),
                Point::new(x0, y0),
            );
        }
    }
    path.close_path();
    path
}
