// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_deform --heading-base-level=0

//! Understory Deform: velocity-driven "jelly" geometry.
//!
//! Given a smoothed drag velocity, this crate derives the outlines a renderer
//! needs to make a horizontally dragged strip look like it bends:
//!
//! - An hourglass silhouette for the containing viewport, whose top and bottom
//!   edges pinch toward each other as the drag speeds up.
//! - A bulge outline per tile, whose vertical edges bow in the direction of
//!   travel: the leading edge outward, the trailing edge inward.
//! - A skew angle for the whole strip and a shadow band on each tile's
//!   trailing edge.
//!
//! Everything is a pure function of the velocity and the input rectangles.
//! There is no per-frame state, so geometry can be recomputed every frame and
//! shared read-only between any number of tiles.
//!
//! The velocity is first normalized into an [`Intensity`] in `[-1, 1]`. Below
//! [`DEAD_ZONE`] every surface collapses to its exact flat rectangle, which
//! keeps a resting strip free of sub-pixel jitter.
//!
//! Curves come in two families selected by [`CurveStyle`]: a single quadratic
//! per bent edge with its control point at the edge midpoint, or a cubic with
//! both control points displaced at one and two thirds of the edge.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Shape};
//! use understory_deform::{DeformConfig, DeformationMapper, HorizontalEdge, flat_path};
//!
//! let mapper = DeformationMapper::new(DeformConfig::default());
//! let tile = Rect::new(0.0, 0.0, 400.0, 400.0);
//!
//! // At rest the tile is its flat rectangle.
//! assert_eq!(mapper.tile_path(0.0, tile), flat_path(tile));
//!
//! // Dragging right bows the right edge out past the tile.
//! let bent = mapper.tile_path(2500.0, tile);
//! assert!(bent.bounding_box().x1 > tile.x1);
//!
//! // The shadow sits on the trailing (left) edge.
//! assert_eq!(mapper.shading(2500.0).trailing_edge, HorizontalEdge::Left);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod intensity;
mod mapper;
mod style;

pub use intensity::{DEAD_ZONE, Intensity};
pub use mapper::{
    DeformationGeometry, DeformationMapper, HorizontalEdge, TileShading, flat_path,
};
pub use style::{CurveStyle, DeformConfig, ShadingTuning, SurfaceTuning};
