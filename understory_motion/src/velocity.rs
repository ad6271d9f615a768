// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finite-difference velocity estimation over drag samples.
//!
//! [`VelocityEstimator`] differentiates consecutive [`DragSample`]s into a
//! velocity in position units per second. The first sample has no reference
//! and reports zero. Time deltas are floored at [`MIN_SAMPLE_INTERVAL_MS`] so
//! two samples with (nearly) equal timestamps cannot produce an unbounded
//! spike.
//!
//! A gesture can stall without ever producing a release event. Once no sample
//! has arrived for [`VelocityConfig::idle_timeout_ms`], the reported velocity
//! decays exponentially toward zero with time constant
//! [`VelocityConfig::idle_decay_ms`].

use crate::sample::DragSample;

/// Lower bound applied to the interval between two samples.
pub const MIN_SAMPLE_INTERVAL_MS: f64 = 1.0;

/// A velocity value produced from a position sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    /// Velocity in position units per second.
    pub value: f64,
    /// Timestamp of the position sample that produced it, in milliseconds.
    pub timestamp_ms: f64,
}

/// Idle behavior of a [`VelocityEstimator`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocityConfig {
    /// How long the last velocity is held after the newest sample.
    pub idle_timeout_ms: f64,
    /// Time constant of the decay toward zero once the timeout elapsed.
    ///
    /// Zero or negative values drop the velocity to zero immediately.
    pub idle_decay_ms: f64,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: 50.0,
            idle_decay_ms: 40.0,
        }
    }
}

/// Estimates instantaneous velocity from consecutive drag samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct VelocityEstimator {
    config: VelocityConfig,
    previous: Option<DragSample>,
    latest: Option<VelocitySample>,
}

impl VelocityEstimator {
    /// Creates an estimator with the given idle behavior.
    #[must_use]
    pub fn new(config: VelocityConfig) -> Self {
        Self {
            config,
            previous: None,
            latest: None,
        }
    }

    /// Returns the idle configuration.
    #[must_use]
    pub fn config(&self) -> VelocityConfig {
        self.config
    }

    /// Replaces the idle configuration.
    pub fn set_config(&mut self, config: VelocityConfig) {
        self.config = config;
    }

    /// Feeds a position sample and returns the velocity it implies.
    ///
    /// Samples older than the previous one are ignored and the last velocity
    /// is returned unchanged.
    pub fn push(&mut self, sample: DragSample) -> VelocitySample {
        let value = match self.previous {
            None => 0.0,
            Some(prev) if sample.timestamp_ms < prev.timestamp_ms => {
                return self.latest.unwrap_or(VelocitySample {
                    value: 0.0,
                    timestamp_ms: prev.timestamp_ms,
                });
            }
            Some(prev) => {
                let dt_ms = (sample.timestamp_ms - prev.timestamp_ms).max(MIN_SAMPLE_INTERVAL_MS);
                (sample.position - prev.position) / (dt_ms / 1000.0)
            }
        };
        let value = if value.is_finite() { value } else { 0.0 };
        let out = VelocitySample {
            value,
            timestamp_ms: sample.timestamp_ms,
        };
        self.previous = Some(sample);
        self.latest = Some(out);
        out
    }

    /// The most recent velocity sample, without idle decay.
    #[must_use]
    pub fn latest(&self) -> Option<VelocitySample> {
        self.latest
    }

    /// Velocity as seen at `now_ms`, with idle decay applied.
    #[must_use]
    pub fn velocity_at(&self, now_ms: f64) -> f64 {
        let Some(latest) = self.latest else {
            return 0.0;
        };
        let idle_ms = now_ms - latest.timestamp_ms - self.config.idle_timeout_ms;
        if idle_ms.is_nan() || idle_ms <= 0.0 {
            return latest.value;
        }
        if self.config.idle_decay_ms <= 0.0 {
            return 0.0;
        }
        latest.value * libm::exp(-idle_ms / self.config.idle_decay_ms)
    }

    /// Forget all samples. The next sample reports zero velocity.
    pub fn reset(&mut self) {
        self.previous = None;
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(position: f64, timestamp_ms: f64) -> DragSample {
        DragSample {
            position,
            timestamp_ms,
        }
    }

    #[test]
    fn first_sample_reports_zero() {
        let mut est = VelocityEstimator::default();
        assert_eq!(est.push(sample(120.0, 10.0)).value, 0.0);
        assert_eq!(est.velocity_at(10.0), 0.0);
    }

    #[test]
    fn velocity_is_units_per_second() {
        let mut est = VelocityEstimator::default();
        est.push(sample(0.0, 0.0));
        let v = est.push(sample(-20.0, 10.0));
        assert!((v.value + 2000.0).abs() < 1e-9);
        assert_eq!(v.timestamp_ms, 10.0);
    }

    #[test]
    fn near_zero_interval_is_floored() {
        let mut est = VelocityEstimator::default();
        est.push(sample(0.0, 100.0));
        let v = est.push(sample(3.0, 100.0));
        // 3 units over the 1 ms floor.
        assert!((v.value - 3000.0).abs() < 1e-9);
        assert!(v.value.is_finite());
    }

    #[test]
    fn older_samples_are_ignored() {
        let mut est = VelocityEstimator::default();
        est.push(sample(0.0, 0.0));
        let v = est.push(sample(10.0, 10.0));
        let stale = est.push(sample(-500.0, 5.0));
        assert_eq!(stale, v);
    }

    #[test]
    fn velocity_holds_until_idle_timeout() {
        let mut est = VelocityEstimator::new(VelocityConfig {
            idle_timeout_ms: 50.0,
            idle_decay_ms: 40.0,
        });
        est.push(sample(0.0, 0.0));
        est.push(sample(10.0, 10.0));

        assert_eq!(est.velocity_at(10.0), 1000.0);
        assert_eq!(est.velocity_at(60.0), 1000.0);
        let decayed = est.velocity_at(100.0);
        assert!(decayed > 0.0 && decayed < 1000.0);
        assert!(est.velocity_at(1_000.0).abs() < 1e-6);
    }

    #[test]
    fn decay_is_monotonic_after_timeout() {
        let mut est = VelocityEstimator::default();
        est.push(sample(0.0, 0.0));
        est.push(sample(-30.0, 16.0));

        let mut prev = est.velocity_at(16.0).abs();
        for step in 1..40 {
            let now = 16.0 + f64::from(step) * 8.0;
            let cur = est.velocity_at(now).abs();
            assert!(cur <= prev);
            prev = cur;
        }
    }

    #[test]
    fn zero_decay_drops_immediately() {
        let mut est = VelocityEstimator::new(VelocityConfig {
            idle_timeout_ms: 10.0,
            idle_decay_ms: 0.0,
        });
        est.push(sample(0.0, 0.0));
        est.push(sample(5.0, 5.0));
        assert_eq!(est.velocity_at(30.0), 0.0);
    }

    #[test]
    fn reset_restarts_from_zero() {
        let mut est = VelocityEstimator::default();
        est.push(sample(0.0, 0.0));
        est.push(sample(50.0, 10.0));
        est.reset();

        assert_eq!(est.latest(), None);
        assert_eq!(est.push(sample(500.0, 20.0)).value, 0.0);
    }
}
