// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle and point math in document space.
//!
//! Document space is the client space shifted by the document scroll, so values stay put while
//! the document scrolls. [`absolute_rect`] additionally strips the element's own transform, so a
//! sibling caught mid-animation reports its resting geometry.

use kurbo::{Point, Rect, Size};

use crate::host::Geometry;
use crate::types::{ElementTransform, TransformMatrix};

/// Distances from a point to the four sides of a rect that contains it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InnerDistances {
    /// Distance to the top side.
    pub top: f64,
    /// Distance to the bottom side.
    pub bottom: f64,
    /// Distance to the left side.
    pub left: f64,
    /// Distance to the right side.
    pub right: f64,
}

/// Center of a rect.
pub fn center(rect: Rect) -> Point {
    rect.center()
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Returns true if `p` lies inside `rect`, edges included.
pub fn point_in_rect(p: Point, rect: Rect) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Distances from `p` to each side of `rect`, or `None` if `p` is outside it.
pub fn inner_distances(p: Point, rect: Rect) -> Option<InnerDistances> {
    if !point_in_rect(p, rect) {
        return None;
    }
    Some(InnerDistances {
        top: p.y - rect.y0,
        bottom: rect.y1 - p.y,
        left: p.x - rect.x0,
        right: rect.x1 - p.x,
    })
}

/// Undo a scale+translate transform on a measured rect.
///
/// The matrix is decomposed into its scale and translation parts; rotation and skew are ignored.
/// A zero scale keeps the measured size on that axis.
pub fn strip_transform(rect: Rect, transform: &ElementTransform) -> Rect {
    let (sx, sy, dx, dy) = match transform.matrix {
        TransformMatrix::Matrix(m) => (m[0], m[3], m[4], m[5]),
        TransformMatrix::Matrix3d(m) => (m[0], m[5], m[12], m[13]),
    };
    let origin = transform.origin;
    let x = rect.x0 - dx - (1.0 - sx) * origin.x;
    let y = rect.y0 - dy - (1.0 - sy) * origin.y;
    let w = if sx == 0.0 {
        rect.width()
    } else {
        rect.width() / sx
    };
    let h = if sy == 0.0 {
        rect.height()
    } else {
        rect.height() / sy
    };
    Rect::new(x, y, x + w, y + h)
}

/// Document-space rect of `node` with its own transform stripped.
///
/// `None` if the node is detached.
pub fn absolute_rect<H: Geometry + ?Sized>(host: &H, node: H::Node) -> Option<Rect> {
    let client = host.client_rect(node)?;
    let resting = match host.transform(node) {
        Some(t) => strip_transform(client, &t),
        None => client,
    };
    Some(resting + host.document_scroll())
}

/// Document-space rect of `node` as rendered, transform included.
///
/// Used for the dragged visual, which follows the pointer by transform.
pub fn rendered_rect<H: Geometry + ?Sized>(host: &H, node: H::Node) -> Option<Rect> {
    Some(host.client_rect(node)? + host.document_scroll())
}

/// Returns true if a document-space rect lies entirely outside the document.
pub fn is_off_document(rect: Rect, document: Size) -> bool {
    rect.x1 < 0.0 || rect.x0 > document.width || rect.y1 < 0.0 || rect.y0 > document.height
}

/// Number of ancestors of `node`.
pub fn depth<H: Geometry + ?Sized>(host: &H, node: H::Node) -> usize {
    let mut depth = 0;
    let mut cur = host.parent(node);
    while let Some(p) = cur {
        depth += 1;
        cur = host.parent(p);
    }
    depth
}
