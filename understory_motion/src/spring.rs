// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damped spring filter for a single scalar.
//!
//! [`Spring`] tracks a target with a mass-spring-damper model:
//!
//! ```text
//! acceleration = (stiffness * (target - value) - damping * velocity) / mass
//! velocity    += acceleration * dt
//! value       += velocity * dt
//! ```
//!
//! Integration is semi-implicit Euler. A call to [`Spring::step`] with a long
//! interval is split into sub-steps no longer than
//! [`SpringConfig::max_step`], so a dropped frame does not destabilize the
//! filter. The whole interval is always simulated. Every
//! [`SUBSTEPS_PER_REST_CHECK`] sub-steps the spring checks whether it has
//! settled onto its target and, if so, snaps there and skips the rest.
//!
//! The same type drives two things in a carousel: the velocity smoother whose
//! output feeds deformation, and the heavily damped return animation that
//! brings an out-of-bounds strip back to its bound.

/// Number of sub-steps between two settle checks inside [`Spring::step`].
pub const SUBSTEPS_PER_REST_CHECK: u32 = 240;

/// Relative tolerance under which a spring counts as settled on its target.
const SETTLED_EPSILON: f64 = 1e-9;

/// Physical parameters of a [`Spring`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    /// Spring constant. Higher values pull toward the target harder.
    pub stiffness: f64,
    /// Velocity damping coefficient.
    pub damping: f64,
    /// Mass of the simulated body.
    pub mass: f64,
    /// Longest integration sub-step, in seconds.
    pub max_step: f64,
}

impl SpringConfig {
    /// Tuning for the velocity smoother: a quick follow with a short settle.
    pub const SMOOTHER: Self = Self {
        stiffness: 400.0,
        damping: 40.0,
        mass: 1.0,
        max_step: 1.0 / 60.0,
    };

    /// Tuning for returning to a bound after release.
    ///
    /// Damping is well above critical so the return decelerates into the
    /// bound without ringing.
    pub const RELEASE: Self = Self {
        stiffness: 200.0,
        damping: 40.0,
        mass: 1.0,
        max_step: 1.0 / 120.0,
    };

    /// Creates a configuration with the default sub-step length.
    #[must_use]
    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            max_step: Self::SMOOTHER.max_step,
        }
    }

    /// Returns a copy with a different sub-step length, in seconds.
    #[must_use]
    pub const fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    /// Damping ratio: `1.0` is critical, below rings, above creeps.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * libm::sqrt(self.stiffness * self.mass))
    }

    /// Returns `true` when every parameter is finite, stiffness, mass and
    /// step are positive, and damping is non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.mass.is_finite()
            && self.max_step.is_finite()
            && self.stiffness > 0.0
            && self.damping >= 0.0
            && self.mass > 0.0
            && self.max_step > 0.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::SMOOTHER
    }
}

/// The simulated value and its rate of change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState {
    /// Current output of the spring.
    pub value: f64,
    /// Rate of change of `value`, per second.
    pub velocity: f64,
}

/// A damped spring tracking a scalar target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    state: SpringState,
    target: f64,
}

impl Spring {
    /// Creates a spring at rest at zero.
    #[must_use]
    pub fn new(config: SpringConfig) -> Self {
        Self::with_state(config, SpringState::default(), 0.0)
    }

    /// Creates a spring from an explicit state and target.
    #[must_use]
    pub fn with_state(config: SpringConfig, state: SpringState, target: f64) -> Self {
        Self {
            config,
            state,
            target,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Replaces the configuration. The state is kept.
    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SpringState {
        self.state
    }

    /// Current output value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.state.value
    }

    /// Current rate of change of the output.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Current target.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Sets the target. Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Advances the simulation by `dt` seconds and returns the new value.
    ///
    /// Zero, negative and non-finite intervals leave the state untouched.
    pub fn step(&mut self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 || !self.config.is_valid() {
            return self.state.value;
        }
        let max_step = self.config.max_step;
        let mut remaining = dt;
        let mut substeps = 0_u32;
        while remaining > f64::EPSILON {
            let h = remaining.min(max_step);
            self.integrate(h);
            remaining -= h;
            substeps += 1;
            if substeps == SUBSTEPS_PER_REST_CHECK {
                substeps = 0;
                if !self.state.value.is_finite() || self.snap_if_settled() {
                    break;
                }
            }
        }
        if !self.state.value.is_finite() || !self.state.velocity.is_finite() {
            self.snap_to(self.target);
        }
        self.state.value
    }

    fn integrate(&mut self, h: f64) {
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        let displacement = self.target - self.state.value;
        let acceleration = (stiffness * displacement - damping * self.state.velocity) / mass;
        self.state.velocity += acceleration * h;
        self.state.value += self.state.velocity * h;
    }

    /// Settled to within rounding of the target; snaps onto it when so.
    fn snap_if_settled(&mut self) -> bool {
        let tolerance = SETTLED_EPSILON * (1.0 + self.target.abs());
        let settled = (self.target - self.state.value).abs() <= tolerance
            && self.state.velocity.abs() <= tolerance;
        if settled {
            self.snap_to(self.target);
        }
        settled
    }

    /// Jumps to `value` at rest and makes it the target.
    pub fn snap_to(&mut self, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        self.state = SpringState {
            value,
            velocity: 0.0,
        };
        self.target = value;
    }

    /// Returns `true` when both the distance to the target and the velocity
    /// are within the given tolerances.
    #[must_use]
    pub fn is_at_rest(&self, value_tolerance: f64, velocity_tolerance: f64) -> bool {
        (self.target - self.state.value).abs() <= value_tolerance
            && self.state.velocity.abs() <= velocity_tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn run(spring: &mut Spring, seconds: f64) {
        let mut t = 0.0;
        while t < seconds {
            spring.step(FRAME);
            t += FRAME;
        }
    }

    #[test]
    fn defaults_match_smoother_tuning() {
        let cfg = SpringConfig::default();
        assert_eq!(cfg.stiffness, 400.0);
        assert_eq!(cfg.damping, 40.0);
        assert_eq!(cfg.mass, 1.0);
        assert!(cfg.is_valid());
    }

    #[test]
    fn constant_target_converges() {
        let mut spring = Spring::new(SpringConfig::default());
        spring.set_target(2_800.0);
        run(&mut spring, 5.0);

        assert!((spring.value() - 2_800.0).abs() < 1e-3);
        assert!(spring.velocity().abs() < 1e-3);
        assert!(spring.is_at_rest(1e-3, 1e-3));
    }

    #[test]
    fn negative_target_converges() {
        let mut spring = Spring::new(SpringConfig::default());
        spring.set_target(-900.0);
        run(&mut spring, 5.0);
        assert!((spring.value() + 900.0).abs() < 1e-3);
    }

    #[test]
    fn long_interval_is_subdivided() {
        let mut one_call = Spring::new(SpringConfig::default());
        one_call.set_target(1_000.0);
        one_call.step(0.5);

        let mut frames = Spring::new(SpringConfig::default());
        frames.set_target(1_000.0);
        for _ in 0..30 {
            frames.step(FRAME);
        }

        assert!(one_call.value().is_finite());
        assert!((one_call.value() - frames.value()).abs() < 1e-6);
    }

    #[test]
    fn long_interval_keeps_all_simulated_time() {
        // Still moving after ten seconds, so nothing snaps early.
        let cfg = SpringConfig::new(1.0, 2.0, 1.0);
        let mut one_call = Spring::new(cfg);
        one_call.set_target(100.0);
        one_call.step(10.0);

        let mut frames = Spring::new(cfg);
        frames.set_target(100.0);
        for _ in 0..600 {
            frames.step(FRAME);
        }

        assert!(frames.value() > 99.0);
        assert!((one_call.value() - frames.value()).abs() < 1e-6);
        assert!((one_call.velocity() - frames.velocity()).abs() < 1e-6);
    }

    #[test]
    fn huge_interval_settles_on_target() {
        let mut spring = Spring::new(SpringConfig::default());
        spring.set_target(3_000.0);
        spring.step(3_600.0);
        assert_eq!(spring.value(), 3_000.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn degenerate_steps_do_nothing() {
        let mut spring = Spring::new(SpringConfig::default());
        spring.set_target(10.0);
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(spring.step(dt), 0.0);
        }
        assert_eq!(spring.state(), SpringState::default());
    }

    #[test]
    fn non_finite_target_is_ignored() {
        let mut spring = Spring::new(SpringConfig::default());
        spring.set_target(5.0);
        spring.set_target(f64::NAN);
        assert_eq!(spring.target(), 5.0);
    }

    #[test]
    fn release_tuning_is_overdamped_and_monotonic() {
        let cfg = SpringConfig::RELEASE;
        assert!(cfg.damping_ratio() > 1.0);

        let mut spring = Spring::with_state(
            cfg,
            SpringState {
                value: 120.0,
                velocity: 0.0,
            },
            0.0,
        );
        let mut prev = spring.value();
        for _ in 0..240 {
            let v = spring.step(FRAME);
            assert!(v <= prev);
            assert!(v >= 0.0);
            prev = v;
        }
    }

    #[test]
    fn invalid_config_freezes_state() {
        let mut spring = Spring::new(SpringConfig::new(400.0, 40.0, 0.0));
        spring.set_target(10.0);
        assert_eq!(spring.step(FRAME), 0.0);
    }

    #[test]
    fn snap_to_resets_velocity_and_target() {
        let mut spring = Spring::new(SpringConfig::default());
        spring.set_target(100.0);
        spring.step(FRAME);
        spring.snap_to(42.0);

        assert_eq!(
            spring.state(),
            SpringState {
                value: 42.0,
                velocity: 0.0
            }
        );
        assert_eq!(spring.target(), 42.0);
    }
}
