// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_placement::{
    LayoutInput, Orientation, PointerGeometry, Preference, compute_layout, compute_layout_with,
};

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

/// Targets scattered over a 1280x800 viewport with popups of varied size.
fn gen_scenes(count: usize, max_popup: Size, seed: u64) -> Vec<LayoutInput> {
    let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
    let pointers = PointerGeometry::caret(16.0, 8.0);
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let x0 = (rng.next_f64() * 1240.0).round();
        let y0 = (rng.next_f64() * 780.0).round();
        let target = Rect::new(x0, y0, x0 + 40.0, y0 + 20.0);
        let popup = Size::new(
            (40.0 + rng.next_f64() * max_popup.width).round(),
            (20.0 + rng.next_f64() * max_popup.height).round(),
        );
        out.push(LayoutInput::new(target, viewport, popup).with_pointers(pointers));
    }
    out
}

fn bench_auto(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto");
    for &(name, max_popup) in &[
        ("small", Size::new(200.0, 100.0)),
        ("large", Size::new(1400.0, 900.0)),
    ] {
        let scenes = gen_scenes(1024, max_popup, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(scenes.len() as u64));
        group.bench_function(format!("compute_layout_{name}"), |b| {
            b.iter(|| {
                for input in &scenes {
                    let _ = black_box(compute_layout(black_box(input)));
                }
            });
        });
    }
    group.finish();
}

fn bench_preference(c: &mut Criterion) {
    let mut group = c.benchmark_group("preference");
    let scenes: Vec<_> = gen_scenes(1024, Size::new(600.0, 400.0), 0xBADC_F00D_1234_5678)
        .into_iter()
        .map(|input| {
            input.with_preference(Preference::Ordered(vec![
                Orientation::Left,
                Orientation::Right,
                Orientation::Top,
            ]))
        })
        .collect();
    group.throughput(Throughput::Elements(scenes.len() as u64));
    group.bench_function("ordered_left_right_top", |b| {
        b.iter(|| {
            for input in &scenes {
                let _ = black_box(compute_layout(black_box(input)));
            }
        });
    });
    group.finish();
}

fn bench_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("reflow");
    let scenes = gen_scenes(1024, Size::new(2400.0, 300.0), 0xFACE_FEED_CAFE_BABE);
    group.throughput(Throughput::Elements(scenes.len() as u64));
    group.bench_function("area_preserving", |b| {
        b.iter_batched(
            || scenes.clone(),
            |scenes| {
                for input in &scenes {
                    let area = input.popup.area();
                    let mut reflow = |width: f64| area / width.max(1.0);
                    let _ = black_box(compute_layout_with(input, &mut reflow));
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_auto, bench_preference, bench_reflow);
criterion_main!(benches);
