// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_dropzone::adapters::scene::SceneHost;
use understory_dropzone::resolver::IndexResolver;
use understory_scene::{FlowLayout, LocalNode, NodeFlags, NodeId, Scene};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A zone of `n` 40×40 cells laid out by `layout` in a box `width` wide.
fn build_zone(n: usize, width: f64, layout: FlowLayout) -> (SceneHost, NodeId, Rect) {
    let rows = n.div_ceil((width / 40.0).max(1.0) as usize).max(1);
    let height = rows as f64 * 40.0 + 40.0;
    let mut scene = Scene::new(Size::new(width, height));
    let bounds = Rect::new(0.0, 0.0, width, height);
    let zone = scene.insert(
        scene.root(),
        LocalNode {
            bounds,
            ..Default::default()
        },
    );
    scene.set_layout(zone, Some(layout));
    for _ in 0..n {
        scene.insert(
            zone,
            LocalNode {
                bounds: Rect::new(0.0, 0.0, 40.0, 40.0),
                ..Default::default()
            },
        );
    }
    (SceneHost::new(scene), zone, bounds)
}

fn points(bounds: Rect, count: usize, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            Point::new(
                bounds.x0 + rng.next_f64() * bounds.width(),
                bounds.y0 + rng.next_f64() * bounds.height(),
            )
        })
        .collect()
}

fn bench_column(c: &mut Criterion) {
    let mut group = c.benchmark_group("column");
    for &n in &[10usize, 100, 1000] {
        let (mut host, zone, bounds) = build_zone(n, 40.0, FlowLayout::column());
        let pts = points(bounds, 256, 0xCAFE_F00D_DEAD_BEEF);
        let mut resolver = IndexResolver::new();
        group.throughput(Throughput::Elements(pts.len() as u64));
        group.bench_function(format!("resolve_n{n}"), |b| {
            b.iter(|| {
                for p in &pts {
                    black_box(resolver.resolve_index_at(&mut host, *p, zone));
                }
            });
        });
    }
    group.finish();
}

fn bench_wrap_with_shadow(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap");
    for &n in &[100usize, 1000] {
        let (mut host, zone, bounds) = build_zone(n, 400.0, FlowLayout::wrap());
        let middle = host.scene.children(zone)[n / 2];
        let flags = host.scene.flags(middle).unwrap_or_default();
        host.scene.set_flags(middle, flags | NodeFlags::SHADOW);
        let pts = points(bounds, 256, 0xBADC_F00D_1234_5678);
        let mut resolver = IndexResolver::new();
        group.throughput(Throughput::Elements(pts.len() as u64));
        group.bench_function(format!("resolve_n{n}"), |b| {
            b.iter(|| {
                resolver.reset_indexes_cache();
                for p in &pts {
                    black_box(resolver.resolve_index_at(&mut host, *p, zone));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_column, bench_wrap_with_shadow);
criterion_main!(benches);
