// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a headless engine for a velocity-reactive tile strip.
//!
//! A horizontal strip of equally sized tiles is dragged inside a viewport.
//! The engine turns timestamped drag input into per-frame output:
//!
//! - the strip translation, tracking the pointer 1:1 inside the drag bounds
//!   and resisting elastically past them,
//! - a strip transform that adds a skew proportional to the smoothed velocity,
//! - an hourglass container outline and one bulging outline per tile, from
//!   [`understory_deform`],
//! - trailing-edge shading for the tiles,
//! - a hint telling the host whether another frame is needed.
//!
//! Once the pointer is released the strip glides on its momentum and, if it
//! ends up past a bound, springs back to it. Starting a new drag during that
//! animation picks the strip up where it is.
//!
//! There is no clock, timer or renderer here. Hosts deliver [`InputEvent`]s
//! as they arrive and call [`Carousel::tick`] once per animation frame. Each
//! tick runs sampling, smoothing, constraint resolution and geometry
//! derivation in that fixed order, so the output is a pure function of the
//! event trace and the tick times. [`Carousel::replay`] runs a recorded trace
//! in one call. Dropping the engine is all it takes to stop it.
//!
//! Viewport width is configuration, not ambient state: call
//! [`Carousel::resize`] (or send [`InputEvent::Resize`]) and the drag bounds
//! are recomputed before the next frame.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_carousel::{Carousel, CarouselConfig, InputEvent, StripPhase};
//!
//! let mut carousel = Carousel::new(CarouselConfig::default()).unwrap();
//! assert_eq!(carousel.layout().bounds().min, -2616.0);
//!
//! carousel.handle(InputEvent::DragStart { timestamp_ms: 0.0 }).unwrap();
//! carousel
//!     .handle(InputEvent::DragMove { delta: -120.0, timestamp_ms: 16.0 })
//!     .unwrap();
//! let frame = carousel.tick(16.0);
//! assert_eq!(frame.translation, -120.0);
//! assert_eq!(frame.phase, StripPhase::Dragging);
//! assert_eq!(frame.geometry.tile_paths.len(), 9);
//!
//! carousel.handle(InputEvent::DragEnd { timestamp_ms: 20.0 }).unwrap();
//! let mut t = 20.0;
//! while carousel.tick(t).needs_next_frame {
//!     t += 1000.0 / 60.0;
//! }
//! assert_eq!(carousel.phase(), StripPhase::Idle);
//! ```
//!
//! Diagnostics go through the [`log`] facade; install any logger to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod error;
mod layout;

pub use config::{CarouselConfig, MAX_SKEW_DEG};
pub use engine::{Carousel, Frame, InputEvent, SETTLE_VELOCITY, StripPhase, TraceStep};
pub use error::ConfigError;
pub use layout::{CarouselLayout, LayoutConfig};

pub use understory_deform;
pub use understory_motion;
