// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory carousel demos.

use understory_carousel::{InputEvent, TraceStep};

/// One frame at 60 Hz, in milliseconds.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// A synthetic gesture: an accelerating drag to the left that ends in a
/// fling, ninety frames of release, then a resize to `resize_to` followed by
/// a hundred and twenty more frames.
pub fn fling_trace(resize_to: f64) -> Vec<TraceStep> {
    let mut trace = vec![TraceStep::Input(InputEvent::DragStart { timestamp_ms: 0.0 })];
    let mut t = 0.0;
    for i in 0..40 {
        t += FRAME_MS;
        trace.push(TraceStep::Input(InputEvent::DragMove {
            delta: -20.0 - 2.0 * f64::from(i),
            timestamp_ms: t,
        }));
        trace.push(TraceStep::Tick(t));
    }
    trace.push(TraceStep::Input(InputEvent::DragEnd { timestamp_ms: t }));
    for _ in 0..90 {
        t += FRAME_MS;
        trace.push(TraceStep::Tick(t));
    }
    trace.push(TraceStep::Input(InputEvent::Resize {
        viewport_width: resize_to,
    }));
    for _ in 0..120 {
        t += FRAME_MS;
        trace.push(TraceStep::Tick(t));
    }
    trace
}
