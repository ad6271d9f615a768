// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame engine: input events in, frames out.

use alloc::vec::Vec;

use kurbo::{Affine, Vec2};
use log::{debug, trace, warn};
use understory_deform::{DeformationGeometry, DeformationMapper};
use understory_motion::elastic::{ElasticConstraint, ReleaseAnimation};
use understory_motion::sample::DragState;
use understory_motion::spring::Spring;
use understory_motion::velocity::VelocityEstimator;

use crate::config::CarouselConfig;
use crate::error::ConfigError;
use crate::layout::CarouselLayout;

/// Speed, in units per second, below which the smoothed signal counts as
/// settled.
pub const SETTLE_VELOCITY: f64 = 0.5;

/// A timestamped input delivered between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    /// The pointer went down on the strip.
    DragStart {
        /// Event time in milliseconds.
        timestamp_ms: f64,
    },
    /// The pointer moved horizontally by `delta` since the previous event.
    DragMove {
        /// Horizontal movement.
        delta: f64,
        /// Event time in milliseconds.
        timestamp_ms: f64,
    },
    /// The pointer was released.
    DragEnd {
        /// Event time in milliseconds.
        timestamp_ms: f64,
    },
    /// The viewport changed width.
    Resize {
        /// New viewport width.
        viewport_width: f64,
    },
}

/// One step of a recorded trace.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraceStep {
    /// Deliver an input event.
    Input(InputEvent),
    /// Produce a frame at the given time in milliseconds.
    Tick(f64),
}

/// What is currently moving the strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StripPhase {
    /// Nothing; the strip is where the last gesture left it.
    Idle,
    /// A drag gesture is in progress.
    Dragging,
    /// The strip is gliding or returning after a drag ended.
    Releasing,
}

/// Output of one [`Carousel::tick`].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Time the frame was produced for, in milliseconds.
    pub timestamp_ms: f64,
    /// Horizontal translation of the strip, elastic overshoot included.
    pub translation: f64,
    /// Maps strip coordinates to viewport coordinates: the skew about the
    /// strip's vertical centre followed by the translation.
    pub strip_transform: Affine,
    /// Velocity estimate that fed the smoother this frame.
    pub raw_velocity: f64,
    /// Smoothed velocity the geometry was derived from.
    pub smoothed_velocity: f64,
    /// Container outline in viewport coordinates and tile outlines in strip
    /// coordinates.
    pub geometry: DeformationGeometry,
    /// Phase after this frame.
    pub phase: StripPhase,
    /// Whether the host should schedule another frame.
    pub needs_next_frame: bool,
}

/// A draggable, velocity-reactive tile strip.
///
/// Input arrives through [`handle`](Self::handle) (or the individual
/// `drag_*` methods) and frames are pulled with [`tick`](Self::tick). Each
/// tick runs velocity sampling, smoothing, constraint resolution and geometry
/// derivation in that order, so a given sequence of events and tick times
/// always yields the same frames.
#[derive(Clone, Debug)]
pub struct Carousel {
    config: CarouselConfig,
    layout: CarouselLayout,
    constraint: ElasticConstraint,
    mapper: DeformationMapper,
    drag: DragState,
    estimator: VelocityEstimator,
    smoother: Spring,
    release: Option<ReleaseAnimation>,
    offset: f64,
    last_tick_ms: Option<f64>,
}

impl Carousel {
    /// Validates `config` and creates an engine at rest with the first tile
    /// at the viewport start.
    pub fn new(config: CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = CarouselLayout::new(config.layout)?;
        Ok(Self {
            config,
            layout,
            constraint: ElasticConstraint::new(layout.bounds(), config.elastic_factor),
            mapper: DeformationMapper::new(config.deform),
            drag: DragState::default(),
            estimator: VelocityEstimator::new(config.velocity),
            smoother: Spring::new(config.smoother),
            release: None,
            offset: 0.0,
            last_tick_ms: None,
        })
    }

    /// Returns the configuration, with the current viewport width.
    #[must_use]
    pub fn config(&self) -> CarouselConfig {
        CarouselConfig {
            layout: *self.layout.config(),
            ..self.config
        }
    }

    /// Returns the layout.
    #[must_use]
    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    /// Displayed strip translation as of the last tick.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> StripPhase {
        if self.drag.is_active() {
            StripPhase::Dragging
        } else if self.release.is_some() {
            StripPhase::Releasing
        } else {
            StripPhase::Idle
        }
    }

    /// Current smoothed velocity.
    #[must_use]
    pub fn smoothed_velocity(&self) -> f64 {
        self.smoother.value()
    }

    /// Delivers one input event.
    ///
    /// Only [`InputEvent::Resize`] can fail.
    pub fn handle(&mut self, event: InputEvent) -> Result<(), ConfigError> {
        match event {
            InputEvent::DragStart { timestamp_ms } => self.drag_start(timestamp_ms),
            InputEvent::DragMove {
                delta,
                timestamp_ms,
            } => self.drag_move(delta, timestamp_ms),
            InputEvent::DragEnd { timestamp_ms } => self.drag_end(timestamp_ms),
            InputEvent::Resize { viewport_width } => {
                self.resize(viewport_width)?;
            }
        }
        Ok(())
    }

    /// Starts a drag gesture.
    ///
    /// A running release is cancelled. The raw drag origin is recovered from
    /// the displayed offset so the strip stays under the pointer.
    pub fn drag_start(&mut self, timestamp_ms: f64) {
        if let Some(release) = self.release.take() {
            debug!("release cancelled at {:.2} by a new drag", release.position());
        }
        let origin = self.constraint.invert(self.offset);
        let sample = self.drag.start(origin, timestamp_ms);
        self.estimator.reset();
        self.estimator.push(sample);
        debug!("drag start at raw position {origin:.2}");
    }

    /// Moves the active drag by `delta`.
    pub fn drag_move(&mut self, delta: f64, timestamp_ms: f64) {
        match self.drag.update(delta, timestamp_ms) {
            Some(sample) => {
                self.estimator.push(sample);
            }
            None => trace!("ignored drag sample {delta} at {timestamp_ms}ms"),
        }
    }

    /// Ends the active drag and switches to release mode.
    ///
    /// The release starts from the displayed offset with the estimated
    /// velocity scaled by the elastic slope, so a release past a bound does
    /// not fling harder than the strip was visibly moving.
    pub fn drag_end(&mut self, timestamp_ms: f64) {
        let Some(raw) = self.drag.end() else {
            trace!("drag end without an active drag");
            return;
        };
        let velocity = self.estimator.velocity_at(timestamp_ms) * self.constraint.derivative(raw);
        self.estimator.reset();
        self.offset = self.constraint.apply(raw);
        let release = ReleaseAnimation::new(
            self.offset,
            velocity,
            self.constraint.bounds(),
            self.config.release,
        );
        debug!(
            "drag end at {:.2}, release velocity {velocity:.1}, phase {:?}",
            self.offset,
            release.phase()
        );
        self.release = (!release.is_finished()).then_some(release);
    }

    /// Updates the viewport width.
    ///
    /// The drag bounds are recomputed immediately. A strip left outside the
    /// new bounds starts returning to the nearest bound. Returns `Ok(true)`
    /// when the width changed; an invalid width is rejected and nothing
    /// changes.
    pub fn resize(&mut self, viewport_width: f64) -> Result<bool, ConfigError> {
        let changed = self
            .layout
            .set_viewport_width(viewport_width)
            .inspect_err(|err| warn!("resize rejected: {err}"))?;
        if !changed {
            return Ok(false);
        }
        let bounds = self.layout.bounds();
        self.constraint.set_bounds(bounds);
        if let Some(release) = &mut self.release {
            release.set_bounds(bounds);
        } else if !self.drag.is_active() && !bounds.contains(self.offset) {
            self.release = Some(ReleaseAnimation::new(
                self.offset,
                0.0,
                bounds,
                self.config.release,
            ));
        }
        debug!(
            "resize to {viewport_width}, bounds [{}, {}]",
            bounds.min, bounds.max
        );
        Ok(true)
    }

    /// Produces the frame for time `now_ms`.
    ///
    /// Times earlier than the previous tick, and non-finite times, are treated
    /// as no elapsed time and are not remembered.
    pub fn tick(&mut self, now_ms: f64) -> Frame {
        let dt = if now_ms.is_finite() {
            let dt = match self.last_tick_ms {
                Some(last) if now_ms > last => (now_ms - last) / 1000.0,
                _ => 0.0,
            };
            if self.last_tick_ms.is_none_or(|last| now_ms > last) {
                self.last_tick_ms = Some(now_ms);
            }
            dt
        } else {
            warn!("ignoring non-finite tick time {now_ms}");
            0.0
        };

        // Sampling.
        let raw_velocity = match &self.release {
            Some(release) if !self.drag.is_active() => release.velocity(),
            _ => self.estimator.velocity_at(now_ms),
        };

        // Smoothing.
        self.smoother.set_target(raw_velocity);
        let smoothed_velocity = self.smoother.step(dt);

        // Constraint resolution.
        if self.drag.is_active() {
            if let Some(raw) = self.drag.position() {
                self.offset = self.constraint.apply(raw);
            }
        } else if let Some(release) = &mut self.release {
            self.offset = release.advance(dt);
            if release.is_finished() {
                trace!("release settled at {:.2}", self.offset);
                self.release = None;
            }
        }

        // Geometry.
        let geometry = self.mapper.map(
            smoothed_velocity,
            self.layout.container_rect(),
            self.layout.tile_rects(),
        );
        let strip_transform = self.strip_transform(smoothed_velocity);

        let phase = self.phase();
        let needs_next_frame = phase != StripPhase::Idle || !self.settle_smoother(raw_velocity);

        Frame {
            timestamp_ms: now_ms,
            translation: self.offset,
            strip_transform,
            raw_velocity,
            smoothed_velocity,
            geometry,
            phase,
            needs_next_frame,
        }
    }

    /// Feeds a recorded trace through the engine and collects one frame per
    /// [`TraceStep::Tick`].
    ///
    /// Stops at the first rejected event.
    pub fn replay(
        &mut self,
        trace: impl IntoIterator<Item = TraceStep>,
    ) -> Result<Vec<Frame>, ConfigError> {
        let mut frames = Vec::new();
        for step in trace {
            match step {
                TraceStep::Input(event) => self.handle(event)?,
                TraceStep::Tick(now_ms) => frames.push(self.tick(now_ms)),
            }
        }
        Ok(frames)
    }

    /// Returns to the initial state, keeping the current viewport width.
    pub fn reset(&mut self) {
        self.drag.reset();
        self.estimator.reset();
        self.smoother = Spring::new(self.config.smoother);
        self.release = None;
        self.offset = 0.0;
        self.last_tick_ms = None;
        debug!("reset");
    }

    fn strip_transform(&self, smoothed_velocity: f64) -> Affine {
        let center = Vec2::new(0.0, self.layout.container_height() * 0.5);
        Affine::translate((self.offset, 0.0))
            * Affine::translate(center)
            * self.mapper.skew_transform(smoothed_velocity)
            * Affine::translate(-center)
    }

    /// Snaps the smoother to zero once it and its input are quiet. Returns
    /// whether it is settled.
    fn settle_smoother(&mut self, raw_velocity: f64) -> bool {
        let quiet = raw_velocity.abs() <= SETTLE_VELOCITY
            && self.smoother.value().abs() <= SETTLE_VELOCITY
            && self.smoother.is_at_rest(SETTLE_VELOCITY, SETTLE_VELOCITY);
        if quiet && self.smoother.value() != 0.0 {
            self.smoother.snap_to(0.0);
        }
        quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn carousel() -> Carousel {
        Carousel::new(CarouselConfig::default()).unwrap()
    }

    #[test]
    fn starts_idle_and_flat() {
        let mut c = carousel();
        let frame = c.tick(0.0);
        assert_eq!(frame.phase, StripPhase::Idle);
        assert_eq!(frame.translation, 0.0);
        assert_eq!(frame.smoothed_velocity, 0.0);
        assert_eq!(frame.strip_transform, Affine::IDENTITY);
        assert_eq!(frame.geometry.tile_paths.len(), 9);
        assert!(!frame.needs_next_frame);
    }

    #[test]
    fn drag_tracks_pointer_inside_bounds() {
        let mut c = carousel();
        c.drag_start(0.0);
        c.drag_move(-100.0, 16.0);
        let frame = c.tick(16.0);
        assert_eq!(frame.phase, StripPhase::Dragging);
        assert_eq!(frame.translation, -100.0);
        assert!(frame.raw_velocity < 0.0);
        assert!(frame.needs_next_frame);
    }

    #[test]
    fn drag_past_bound_is_damped() {
        let mut c = carousel();
        c.drag_start(0.0);
        c.drag_move(100.0, 16.0);
        assert_eq!(c.tick(16.0).translation, 20.0);
    }

    #[test]
    fn ignored_moves_do_not_move_the_strip() {
        let mut c = carousel();
        c.drag_move(-50.0, 0.0);
        assert_eq!(c.tick(0.0).translation, 0.0);

        c.drag_start(10.0);
        c.drag_move(-50.0, 20.0);
        c.drag_move(-50.0, 15.0);
        c.drag_move(f64::NAN, 30.0);
        assert_eq!(c.tick(30.0).translation, -50.0);
    }

    #[test]
    fn skew_is_applied_about_the_vertical_centre() {
        let mut c = carousel();
        c.drag_start(0.0);
        let mut t = 0.0;
        for _ in 0..10 {
            t += FRAME_MS;
            c.drag_move(-30.0, t);
            c.tick(t);
        }
        let frame = c.tick(t);
        assert!(frame.geometry.skew_deg < 0.0);
        let center = frame.strip_transform * kurbo::Point::new(0.0, 200.0);
        assert!((center.x - frame.translation).abs() < 1e-9);
        assert!((center.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn reset_returns_to_rest() {
        let mut c = carousel();
        c.drag_start(0.0);
        c.drag_move(-300.0, 16.0);
        c.tick(16.0);
        c.reset();
        let frame = c.tick(100.0);
        assert_eq!(frame.phase, StripPhase::Idle);
        assert_eq!(frame.translation, 0.0);
        assert_eq!(frame.smoothed_velocity, 0.0);
    }

    #[test]
    fn non_finite_tick_times_do_not_stall_the_release() {
        let mut c = carousel();
        c.drag_start(0.0);
        c.drag_move(100.0, 16.0);
        c.tick(16.0);
        let mut t = 16.0;
        while t < 1000.0 {
            t += FRAME_MS;
            c.tick(t);
        }
        c.drag_end(t);
        assert_eq!(c.phase(), StripPhase::Releasing);

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let frame = c.tick(bad);
            assert_eq!(frame.translation, 20.0);
            assert!(frame.needs_next_frame);
        }

        let mut frame = c.tick(t + FRAME_MS);
        for _ in 0..2000 {
            if !frame.needs_next_frame {
                break;
            }
            t += FRAME_MS;
            frame = c.tick(t);
        }
        assert!(!frame.needs_next_frame);
        assert_eq!(frame.translation, 0.0);
        assert_eq!(frame.phase, StripPhase::Idle);
    }

    #[test]
    fn invalid_resize_is_reported() {
        let mut c = carousel();
        assert!(c.handle(InputEvent::Resize {
            viewport_width: -5.0
        })
        .is_err());
        assert_eq!(c.layout().bounds().min, -2616.0);
        assert_eq!(c.config().layout.viewport_width, 1200.0);
    }
}
