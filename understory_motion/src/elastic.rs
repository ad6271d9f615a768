// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Soft bounds for a dragged offset, and what happens after release.
//!
//! While a drag is active, [`ElasticConstraint::apply`] maps the raw offset
//! to a displayed offset: inside [`ConstraintBounds`] the mapping is the
//! identity, outside it the overshoot is scaled by the elastic factor so the
//! strip resists being pulled further.
//!
//! When the drag ends, a [`ReleaseAnimation`] takes over:
//!
//! - Released inside the bounds, the strip glides on with an exponentially
//!   decaying momentum (`power` and `time_constant_ms` of [`ReleaseConfig`]).
//! - Released outside, or once a glide reaches a bound, a heavily damped
//!   [`Spring`] returns it to the nearest bound. The return never passes the
//!   bound; crossing it settles exactly on it.
//!
//! ## Minimal example
//!
//! ```
//! use understory_motion::elastic::{ConstraintBounds, ElasticConstraint, ReleaseAnimation, ReleaseConfig};
//!
//! let bounds = ConstraintBounds::new(-2616.0, 0.0);
//! let constraint = ElasticConstraint::new(bounds, 0.2);
//! assert_eq!(constraint.apply(-1000.0), -1000.0);
//! assert_eq!(constraint.apply(100.0), 20.0);
//!
//! let mut release = ReleaseAnimation::new(20.0, 0.0, bounds, ReleaseConfig::default());
//! while !release.is_finished() {
//!     release.advance(1.0 / 60.0);
//! }
//! assert_eq!(release.position(), 0.0);
//! ```

use crate::spring::{Spring, SpringConfig, SpringState};

/// Default share of out-of-bounds displacement that is let through.
pub const DEFAULT_ELASTIC_FACTOR: f64 = 0.2;

/// Allowed range of the displayed offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintBounds {
    /// Smallest resting offset (the strip scrolled fully toward negative).
    pub min: f64,
    /// Largest resting offset.
    pub max: f64,
}

impl ConstraintBounds {
    /// Creates bounds. A `min` above `max` collapses onto `max`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: min.min(max),
            max,
        }
    }

    /// Returns `true` if `x` lies within the bounds, inclusive.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps `x` into the bounds.
    #[must_use]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// The bound closest to `x`.
    #[must_use]
    pub fn nearest_bound(&self, x: f64) -> f64 {
        if (x - self.min).abs() < (x - self.max).abs() {
            self.min
        } else {
            self.max
        }
    }

    /// Signed distance past the bounds; zero inside.
    #[must_use]
    pub fn overshoot(&self, x: f64) -> f64 {
        x - self.clamp(x)
    }

    /// Length of the allowed range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Rubber-band mapping from a raw drag offset to a displayed offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElasticConstraint {
    bounds: ConstraintBounds,
    elastic_factor: f64,
}

impl ElasticConstraint {
    /// Creates a constraint over `bounds` with the given elastic factor.
    ///
    /// A factor of `0.0` makes the bounds hard; `1.0` disables resistance.
    #[must_use]
    pub fn new(bounds: ConstraintBounds, elastic_factor: f64) -> Self {
        Self {
            bounds,
            elastic_factor,
        }
    }

    /// Returns the bounds.
    #[must_use]
    pub fn bounds(&self) -> ConstraintBounds {
        self.bounds
    }

    /// Replaces the bounds.
    pub fn set_bounds(&mut self, bounds: ConstraintBounds) {
        self.bounds = bounds;
    }

    /// Returns the elastic factor.
    #[must_use]
    pub fn elastic_factor(&self) -> f64 {
        self.elastic_factor
    }

    /// Maps a raw offset to the displayed offset.
    ///
    /// Inside the bounds this is the identity, bit for bit.
    #[must_use]
    pub fn apply(&self, raw: f64) -> f64 {
        let ConstraintBounds { min, max } = self.bounds;
        if raw > max {
            max + (raw - max) * self.elastic_factor
        } else if raw < min {
            min + (raw - min) * self.elastic_factor
        } else {
            raw
        }
    }

    /// Recovers the raw offset that displays as `displayed`.
    ///
    /// With a zero factor there is no unique inverse and the displayed
    /// offset is clamped instead.
    #[must_use]
    pub fn invert(&self, displayed: f64) -> f64 {
        let ConstraintBounds { min, max } = self.bounds;
        if self.elastic_factor <= 0.0 {
            return self.bounds.clamp(displayed);
        }
        if displayed > max {
            max + (displayed - max) / self.elastic_factor
        } else if displayed < min {
            min + (displayed - min) / self.elastic_factor
        } else {
            displayed
        }
    }

    /// Rate of change of the displayed offset with respect to the raw one.
    #[must_use]
    pub fn derivative(&self, raw: f64) -> f64 {
        if self.bounds.contains(raw) {
            1.0
        } else {
            self.elastic_factor
        }
    }
}

/// Tuning of the post-release animation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseConfig {
    /// Share of the release velocity (in units per second) turned into glide
    /// distance.
    pub power: f64,
    /// Time constant of the glide's exponential decay, in milliseconds.
    pub time_constant_ms: f64,
    /// Distance from the resting point under which the animation settles.
    pub rest_delta: f64,
    /// Speed under which a returning strip may settle, in units per second.
    pub rest_speed: f64,
    /// Spring used to return to a bound.
    pub return_spring: SpringConfig,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            power: 0.3,
            time_constant_ms: 300.0,
            rest_delta: 0.5,
            rest_speed: 10.0,
            return_spring: SpringConfig::RELEASE,
        }
    }
}

/// Which part of the release animation is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleasePhase {
    /// Momentum glide inside the bounds.
    Glide,
    /// Spring return toward a bound.
    Return,
    /// At rest.
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Glide {
        target: f64,
        amplitude: f64,
        elapsed: f64,
    },
    Return {
        spring: Spring,
        side: f64,
    },
    Settled,
}

/// Animation that runs from drag release until the strip comes to rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseAnimation {
    config: ReleaseConfig,
    bounds: ConstraintBounds,
    motion: Motion,
    position: f64,
    velocity: f64,
}

impl ReleaseAnimation {
    /// Starts a release at a displayed `position` moving at `velocity`
    /// (units per second).
    #[must_use]
    pub fn new(
        position: f64,
        velocity: f64,
        bounds: ConstraintBounds,
        config: ReleaseConfig,
    ) -> Self {
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let mut this = Self {
            config,
            bounds,
            motion: Motion::Settled,
            position,
            velocity,
        };
        if bounds.contains(position) {
            let amplitude = config.power * velocity;
            if amplitude.abs() >= config.rest_delta {
                this.motion = Motion::Glide {
                    target: position + amplitude,
                    amplitude,
                    elapsed: 0.0,
                };
            } else {
                this.velocity = 0.0;
            }
        } else {
            this.begin_return();
        }
        this
    }

    /// Current displayed position.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity, in units per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Returns the bounds the animation resolves against.
    #[must_use]
    pub fn bounds(&self) -> ConstraintBounds {
        self.bounds
    }

    /// Which part of the animation is running.
    #[must_use]
    pub fn phase(&self) -> ReleasePhase {
        match self.motion {
            Motion::Glide { .. } => ReleasePhase::Glide,
            Motion::Return { .. } => ReleasePhase::Return,
            Motion::Settled => ReleasePhase::Settled,
        }
    }

    /// Returns `true` once the animation has come to rest.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.motion, Motion::Settled)
    }

    /// Where the animation will come to rest if nothing changes.
    #[must_use]
    pub fn resting_position(&self) -> f64 {
        match self.motion {
            Motion::Glide { target, .. } => self.bounds.clamp(target),
            Motion::Return { spring, .. } => spring.target(),
            Motion::Settled => self.position,
        }
    }

    /// Replaces the bounds, for example after a viewport resize.
    ///
    /// A running return is retargeted and a settled animation outside the new
    /// bounds starts returning.
    pub fn set_bounds(&mut self, bounds: ConstraintBounds) {
        self.bounds = bounds;
        match self.motion {
            Motion::Return { .. } | Motion::Settled if !bounds.contains(self.position) => {
                self.begin_return();
            }
            Motion::Return { .. } => {
                // Back inside: nothing left to return from.
                self.settle(self.position);
            }
            _ => {}
        }
    }

    /// Advances by `dt` seconds and returns the new position.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return self.position;
        }
        match self.motion {
            Motion::Glide {
                target,
                amplitude,
                elapsed,
            } => self.advance_glide(target, amplitude, elapsed + dt),
            Motion::Return { mut spring, side } => {
                spring.step(dt);
                let target = spring.target();
                self.position = spring.value();
                self.velocity = spring.velocity();
                let crossed = (self.position - target) * side <= 0.0;
                let resting = spring.is_at_rest(self.config.rest_delta, self.config.rest_speed);
                if crossed || resting {
                    self.settle(target);
                } else {
                    self.motion = Motion::Return { spring, side };
                }
            }
            Motion::Settled => {}
        }
        self.position
    }

    fn advance_glide(&mut self, target: f64, amplitude: f64, elapsed: f64) {
        let tau = self.config.time_constant_ms / 1000.0;
        let decay = if tau > 0.0 {
            libm::exp(-elapsed / tau)
        } else {
            0.0
        };
        self.position = target - amplitude * decay;
        self.velocity = if tau > 0.0 {
            amplitude / tau * decay
        } else {
            0.0
        };

        if !self.bounds.contains(self.position) {
            self.begin_return();
        } else if (target - self.position).abs() < self.config.rest_delta {
            self.settle(self.bounds.clamp(target));
        } else {
            self.motion = Motion::Glide {
                target,
                amplitude,
                elapsed,
            };
        }
    }

    fn begin_return(&mut self) {
        let target = self.bounds.nearest_bound(self.position);
        let side = (self.position - target).signum();
        if self.position == target {
            self.settle(target);
            return;
        }
        let spring = Spring::with_state(
            self.config.return_spring,
            SpringState {
                value: self.position,
                velocity: self.velocity,
            },
            target,
        );
        self.motion = Motion::Return { spring, side };
    }

    fn settle(&mut self, position: f64) {
        self.position = position;
        self.velocity = 0.0;
        self.motion = Motion::Settled;
    }
}
