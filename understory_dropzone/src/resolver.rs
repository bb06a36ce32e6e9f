// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Would-be index resolution.
//!
//! ## Algorithm
//!
//! Given a point (usually the dragged visual's center) and a zone:
//!
//! 1. A point outside the zone's rect is not a candidate: `None`.
//! 2. An empty zone resolves to `{ index: 0, is_proximity_based: true }`.
//! 3. Direct hit: the first child (in document order) whose rect contains the point wins.
//!    If the placeholder previously sat at that index and the point is outside the rect it had
//!    there, the placeholder's current index wins instead. This keeps the index from flipping
//!    back and forth while the placeholder animates into its new slot.
//! 4. Otherwise the child with the nearest center wins.
//! 5. Phantom slot: the host measures where one more child would land; if that slot is nearer
//!    than every real child, the index is one past the last child.
//!
//! Steps 4 and 5 are proximity based.
//!
//! All rects are document-space and transform-stripped (see [`absolute_rect`]).

use alloc::collections::BTreeMap;

use kurbo::{Point, Rect};
use log::trace;

use crate::geometry::{absolute_rect, distance, point_in_rect, rendered_rect};
use crate::host::Geometry;
use crate::types::IndexResult;

/// Resolves would-be indexes and remembers where the placeholder has been.
#[derive(Clone, Debug)]
pub struct IndexResolver<N> {
    shadow_rects: BTreeMap<N, BTreeMap<usize, Rect>>,
}

impl<N> Default for IndexResolver<N> {
    fn default() -> Self {
        Self {
            shadow_rects: BTreeMap::new(),
        }
    }
}

impl<N: Copy + Ord + core::fmt::Debug> IndexResolver<N> {
    /// Create a resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every cached placeholder rect.
    ///
    /// Call once per drag session and after every scroll, which invalidates the cached rects.
    pub fn reset_indexes_cache(&mut self) {
        trace!("resetting indexes cache");
        self.shadow_rects.clear();
    }

    /// Where `dragged` would land in `zone`, judged by its rendered center.
    pub fn resolve_index<H>(&mut self, host: &mut H, dragged: N, zone: N) -> Option<IndexResult>
    where
        H: Geometry<Node = N> + ?Sized,
    {
        let center = rendered_rect(&*host, dragged)?.center();
        self.resolve_index_at(host, center, zone)
    }

    /// Where a document-space point would land in `zone`.
    pub fn resolve_index_at<H>(&mut self, host: &mut H, point: Point, zone: N) -> Option<IndexResult>
    where
        H: Geometry<Node = N> + ?Sized,
    {
        let zone_rect = absolute_rect(&*host, zone)?;
        if !point_in_rect(point, zone_rect) {
            return None;
        }
        let children = host.children(zone);
        if children.is_empty() {
            return Some(IndexResult {
                index: 0,
                is_proximity_based: true,
            });
        }
        let shadow_index = self.cache_shadow_rect(&*host, zone, &children);

        for (i, child) in children.iter().enumerate() {
            let Some(rect) = absolute_rect(&*host, *child) else {
                continue;
            };
            if !point_in_rect(point, rect) {
                continue;
            }
            if let (Some(shadow_index), Some(cached)) = (shadow_index, self.cached(zone, i))
                && !point_in_rect(point, cached)
            {
                return Some(IndexResult {
                    index: shadow_index,
                    is_proximity_based: false,
                });
            }
            return Some(IndexResult {
                index: i,
                is_proximity_based: false,
            });
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, child) in children.iter().enumerate() {
            let Some(rect) = absolute_rect(&*host, *child) else {
                continue;
            };
            let d = distance(point, rect.center());
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((i, d));
            }
        }

        let scroll = host.document_scroll();
        if let Some(slot) = host.probe_phantom_slot(zone) {
            let d = distance(point, (slot + scroll).center());
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((children.len(), d));
            }
        }

        Some(IndexResult {
            index: best.map_or(children.len(), |(i, _)| i),
            is_proximity_based: true,
        })
    }

    fn cache_shadow_rect<H>(&mut self, host: &H, zone: N, children: &[N]) -> Option<usize>
    where
        H: Geometry<Node = N> + ?Sized,
    {
        let index = children.iter().position(|c| host.is_shadow(*c))?;
        let rect = absolute_rect(host, children[index])?;
        self.shadow_rects.entry(zone).or_default().insert(index, rect);
        Some(index)
    }

    fn cached(&self, zone: N, index: usize) -> Option<Rect> {
        self.shadow_rects.get(&zone)?.get(&index).copied()
    }
}
