// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, Size};

use crate::types::{Flow, FlowLayout};

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box.
pub(crate) fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.y1);
    let p3 = affine * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Positions (relative to the container's content origin) for children of the given sizes.
pub(crate) fn flow_positions(layout: &FlowLayout, container_width: f64, sizes: &[Size]) -> Vec<Point> {
    let left = layout.padding;
    let right = container_width - layout.padding;
    let mut x = left;
    let mut y = layout.padding;
    let mut line_height = 0.0_f64;
    let mut out = Vec::with_capacity(sizes.len());
    for size in sizes {
        match layout.flow {
            Flow::Column => {
                out.push(Point::new(left, y));
                y += size.height + layout.gap;
            }
            Flow::Row => {
                out.push(Point::new(x, layout.padding));
                x += size.width + layout.gap;
            }
            Flow::Wrap => {
                if x > left && x + size.width > right {
                    x = left;
                    y += line_height + layout.gap;
                    line_height = 0.0;
                }
                out.push(Point::new(x, y));
                x += size.width + layout.gap;
                line_height = line_height.max(size.height);
            }
        }
    }
    out
}
