// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prints a small SVG document showing the tile and container outlines at a
//! range of velocities, for both curve styles.
//!
//! ```text
//! cargo run -p understory_demos --example deform_gallery > gallery.svg
//! ```

use kurbo::{Affine, Rect, Shape};
use understory_deform::{CurveStyle, DeformConfig, DeformationMapper};

const VELOCITIES: [f64; 5] = [-3000.0, -1200.0, 0.0, 1200.0, 3000.0];

fn main() {
    let tile = Rect::new(0.0, 0.0, 160.0, 160.0);
    let container = Rect::new(0.0, 0.0, 160.0, 80.0);
    let cell = 240.0;

    println!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        cell * VELOCITIES.len() as f64,
        cell * 2.0 + 240.0
    );
    for (row, curve) in [CurveStyle::Quadratic, CurveStyle::Cubic].into_iter().enumerate() {
        let mapper = DeformationMapper::new(DeformConfig::default().with_curve(curve));
        for (col, velocity) in VELOCITIES.into_iter().enumerate() {
            let origin = Affine::translate((40.0 + cell * col as f64, 40.0 + cell * row as f64));
            let path = origin * mapper.tile_path(velocity, tile);
            let bbox = path.bounding_box();
            println!(
                r##"  <path d="{}" fill="#8ab" stroke="#234"><title>{curve:?} v={velocity} bbox={:.1}x{:.1}</title></path>"##,
                path.to_svg(),
                bbox.width(),
                bbox.height()
            );
        }
    }
    let mapper = DeformationMapper::default();
    for (col, velocity) in VELOCITIES.into_iter().enumerate() {
        let origin = Affine::translate((40.0 + cell * col as f64, 40.0 + cell * 2.0));
        let path = origin * mapper.container_path(velocity, container);
        println!(
            r##"  <path d="{}" fill="none" stroke="#a42"/>"##,
            path.to_svg()
        );
    }
    println!("</svg>");
}
