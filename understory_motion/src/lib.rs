// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_motion --heading-base-level=0

//! Understory Motion: headless 1D motion primitives for drag-driven UI.
//!
//! This crate models exactly one degree of freedom (a horizontal drag offset)
//! and the signals derived from it. It provides:
//!
//! - [`sample`]: drag tracking that turns pointer deltas into timestamped
//!   position samples.
//! - [`velocity`]: a finite-difference velocity estimator with an idle decay,
//!   so a gesture that stops without a release event does not hold a stale
//!   velocity.
//! - [`spring`]: a damped spring filter integrated with capped, subdivided
//!   steps.
//! - [`elastic`]: soft bounds with rubber-band resistance, plus the release
//!   animation (momentum glide and spring return) that runs after a drag ends.
//!
//! Nothing here owns a clock or a frame loop. Callers feed timestamps and step
//! sizes explicitly, which keeps every type deterministic for a given input
//! trace.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_motion::sample::DragState;
//! use understory_motion::spring::{Spring, SpringConfig};
//! use understory_motion::velocity::VelocityEstimator;
//!
//! let mut drag = DragState::default();
//! let mut velocity = VelocityEstimator::default();
//! let mut smoother = Spring::new(SpringConfig::default());
//!
//! velocity.push(drag.start(0.0, 0.0));
//! if let Some(sample) = drag.update(12.0, 16.0) {
//!     velocity.push(sample);
//! }
//!
//! // 12 units in 16 ms.
//! let raw = velocity.velocity_at(16.0);
//! assert!((raw - 750.0).abs() < 1e-9);
//!
//! smoother.set_target(raw);
//! smoother.step(0.016);
//! assert!(smoother.value() > 0.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod elastic;
pub mod sample;
pub mod spring;
pub mod velocity;
