// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless carousel trace.
//!
//! Replays a synthetic gesture through the engine and prints, per frame, the
//! strip translation, smoothed velocity, skew and shadow opacity, followed by
//! SVG path data for the container and the first tile.
//!
//! The gesture drags left, flings past the trailing bound, lets the strip
//! spring back, then resizes the viewport.
//!
//! Run with `RUST_LOG=debug` to see the engine's phase transitions:
//!
//! ```text
//! RUST_LOG=debug cargo run -p understory_demos --example carousel_trace
//! ```

use understory_carousel::{Carousel, CarouselConfig, Frame};
use understory_demos::fling_trace;

fn print_frame(index: usize, frame: &Frame) {
    println!(
        "#{index:03} t={:8.1}ms  x={:9.2}  v={:9.1}  skew={:6.2}deg  shadow={:.3}  {:?}{}",
        frame.timestamp_ms,
        frame.translation,
        frame.smoothed_velocity,
        frame.geometry.skew_deg,
        frame.geometry.shadow_opacity(),
        frame.phase,
        if frame.needs_next_frame { "" } else { "  (idle)" },
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut carousel = Carousel::new(CarouselConfig::default())?;
    let frames = carousel.replay(fling_trace(1600.0))?;

    for (i, frame) in frames.iter().enumerate() {
        print_frame(i, frame);
    }

    // Dump the most deformed frame as SVG path data.
    if let Some(frame) = frames
        .iter()
        .max_by(|a, b| a.smoothed_velocity.abs().total_cmp(&b.smoothed_velocity.abs()))
    {
        println!();
        println!("peak frame at {:.1}ms", frame.timestamp_ms);
        println!("container: {}", frame.geometry.container_path.to_svg());
        if let Some(tile) = frame.geometry.tile_paths.first() {
            println!("tile 0:    {}", tile.to_svg());
        }
        let shading = frame.geometry.shading;
        let band = shading.shadow_band(carousel.layout().tile_rect(0));
        println!(
            "shadow band on {:?} edge: {band:?}, highlight {:.2}",
            shading.trailing_edge, shading.highlight_opacity
        );
        println!("strip transform: {:?}", frame.strip_transform.as_coeffs());
    }

    Ok(())
}
