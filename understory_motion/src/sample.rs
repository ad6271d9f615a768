// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag sampling: turn horizontal pointer deltas into timestamped positions.
//!
//! ## Usage
//!
//! 1) Start a gesture with [`DragState::start`], passing the raw position the
//!    drag begins from (usually the strip's current offset).
//! 2) On each move event, call [`DragState::update`] with the pointer delta.
//!    The returned [`DragSample`] carries the accumulated raw position.
//! 3) End the gesture with [`DragState::end`]. The last raw position stays
//!    readable so release behavior can pick up from it.
//!
//! ## Minimal example
//!
//! ```
//! use understory_motion::sample::DragState;
//!
//! let mut drag = DragState::default();
//! assert_eq!(drag.position(), None);
//!
//! drag.start(-100.0, 0.0);
//! let sample = drag.update(-25.0, 16.0).unwrap();
//! assert_eq!(sample.position, -125.0);
//! assert_eq!(drag.total_offset(), Some(-25.0));
//!
//! drag.end();
//! assert!(!drag.is_active());
//! assert_eq!(drag.position(), Some(-125.0));
//! ```

/// A raw drag position observed at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSample {
    /// Accumulated raw (unconstrained) position.
    pub position: f64,
    /// Timestamp in milliseconds on the caller's timeline.
    pub timestamp_ms: f64,
}

/// Tracks the raw position of a single horizontal drag gesture.
///
/// The position is the unconstrained sum of the start position and every
/// delta received since. Soft bounds are applied downstream.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    position: Option<f64>,
    start_position: Option<f64>,
    last_timestamp_ms: Option<f64>,
    is_active: bool,
}

impl DragState {
    /// Start a new gesture at the given raw position.
    ///
    /// Any gesture in progress is replaced. Non-finite positions start from
    /// zero so the tracked position stays finite.
    pub fn start(&mut self, position: f64, timestamp_ms: f64) -> DragSample {
        let position = if position.is_finite() { position } else { 0.0 };
        self.position = Some(position);
        self.start_position = Some(position);
        self.last_timestamp_ms = Some(timestamp_ms);
        self.is_active = true;
        DragSample {
            position,
            timestamp_ms,
        }
    }

    /// Apply a pointer delta, returning the new raw sample.
    ///
    /// Returns `None` when no gesture is active, when the delta is not finite,
    /// or when the timestamp is earlier than the previous sample.
    pub fn update(&mut self, delta: f64, timestamp_ms: f64) -> Option<DragSample> {
        if !self.is_active || !delta.is_finite() {
            return None;
        }
        if self.last_timestamp_ms.is_some_and(|last| timestamp_ms < last) {
            return None;
        }
        let position = self.position.unwrap_or(0.0) + delta;
        self.position = Some(position);
        self.last_timestamp_ms = Some(timestamp_ms);
        Some(DragSample {
            position,
            timestamp_ms,
        })
    }

    /// End the current gesture, returning the final raw position.
    ///
    /// The position is retained; only the active flag and start anchor reset.
    pub fn end(&mut self) -> Option<f64> {
        if !self.is_active {
            return None;
        }
        self.is_active = false;
        self.start_position = None;
        self.position
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Current raw position, or `None` before the first sample.
    #[must_use]
    pub fn position(&self) -> Option<f64> {
        self.position
    }

    /// Offset from the start of the active gesture.
    #[must_use]
    pub fn total_offset(&self) -> Option<f64> {
        match (self.start_position, self.position) {
            (Some(start), Some(pos)) if self.is_active => Some(pos - start),
            _ => None,
        }
    }

    /// Timestamp of the most recent accepted sample.
    #[must_use]
    pub fn last_timestamp_ms(&self) -> Option<f64> {
        self.last_timestamp_ms
    }

    /// Forget everything, including the retained position.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drag_state_has_no_position() {
        let drag = DragState::default();
        assert!(!drag.is_active());
        assert_eq!(drag.position(), None);
        assert_eq!(drag.total_offset(), None);
    }

    #[test]
    fn start_returns_origin_sample() {
        let mut drag = DragState::default();
        let sample = drag.start(40.0, 5.0);

        assert_eq!(
            sample,
            DragSample {
                position: 40.0,
                timestamp_ms: 5.0
            }
        );
        assert!(drag.is_active());
        assert_eq!(drag.total_offset(), Some(0.0));
    }

    #[test]
    fn update_accumulates_deltas() {
        let mut drag = DragState::default();
        drag.start(0.0, 0.0);

        assert_eq!(drag.update(5.0, 10.0).map(|s| s.position), Some(5.0));
        assert_eq!(drag.update(-2.0, 20.0).map(|s| s.position), Some(3.0));
        assert_eq!(drag.update(10.0, 30.0).map(|s| s.position), Some(13.0));
        assert_eq!(drag.total_offset(), Some(13.0));
    }

    #[test]
    fn update_without_gesture_is_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(5.0, 10.0), None);
        assert_eq!(drag.position(), None);
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let mut drag = DragState::default();
        drag.start(1.0, 0.0);

        assert_eq!(drag.update(f64::NAN, 10.0), None);
        assert_eq!(drag.update(f64::INFINITY, 10.0), None);
        assert_eq!(drag.position(), Some(1.0));
    }

    #[test]
    fn out_of_order_timestamp_is_ignored() {
        let mut drag = DragState::default();
        drag.start(0.0, 100.0);
        drag.update(4.0, 120.0);

        assert_eq!(drag.update(4.0, 110.0), None);
        assert_eq!(drag.position(), Some(4.0));
        assert_eq!(drag.last_timestamp_ms(), Some(120.0));
    }

    #[test]
    fn non_finite_start_falls_back_to_zero() {
        let mut drag = DragState::default();
        let sample = drag.start(f64::NAN, 0.0);
        assert_eq!(sample.position, 0.0);
    }

    #[test]
    fn end_keeps_position_and_clears_anchor() {
        let mut drag = DragState::default();
        drag.start(10.0, 0.0);
        drag.update(5.0, 16.0);

        assert_eq!(drag.end(), Some(15.0));
        assert!(!drag.is_active());
        assert_eq!(drag.position(), Some(15.0));
        assert_eq!(drag.total_offset(), None);

        // Ending twice is a no-op.
        assert_eq!(drag.end(), None);
    }

    #[test]
    fn start_overwrites_previous_gesture() {
        let mut drag = DragState::default();
        drag.start(0.0, 0.0);
        drag.update(10.0, 10.0);

        drag.start(-50.0, 20.0);
        drag.update(5.0, 30.0);
        assert_eq!(drag.total_offset(), Some(5.0));
        assert_eq!(drag.position(), Some(-45.0));
    }

    #[test]
    fn reset_forgets_position() {
        let mut drag = DragState::default();
        drag.start(3.0, 0.0);
        drag.reset();
        assert_eq!(drag, DragState::default());
    }
}
