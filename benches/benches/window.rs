// Copyright 2025 the Feedview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use feedview_window::{WindowConfig, WindowEngine, WindowRange};

type Engine = WindowEngine<u32, f64, fn(&WindowRange<f64>)>;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    /// A message height between 40 and 440 pixels.
    fn height(&mut self) -> f64 {
        f64::from(40 + self.next_u32() % 400)
    }
}

fn ignore(_: &WindowRange<f64>) {}

/// An engine holding `ids`, every one measured, offsets built.
fn measured_engine(ids: core::ops::Range<u32>, seed: u64) -> Engine {
    let mut engine = Engine::new(WindowConfig::default(), ignore as fn(&WindowRange<f64>))
        .expect("default config is valid");
    engine.set_ids(ids.clone());
    let mut rng = Lcg::new(seed);
    for id in ids {
        engine.record_height(&id, rng.height());
    }
    engine.rebuild_offsets();
    engine.recompute_range();
    engine
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("feedview_window");
    group.sample_size(50);

    for &n in &[1_000_u32, 10_000, 100_000] {
        group.bench_function(format!("rebuild_offsets(n={n})"), |b| {
            b.iter_batched(
                || measured_engine(0..n, 0xFEED_0000_0000_0001),
                |mut engine| {
                    engine.rebuild_offsets();
                    black_box(engine);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("set_ids_prepend_page(n={n})"), |b| {
            b.iter_batched(
                || measured_engine(50..n + 50, 0xFEED_0000_0000_0002),
                |mut engine| {
                    engine.set_ids(0..n + 50);
                    engine.rebuild_offsets();
                    black_box(engine);
                },
                BatchSize::LargeInput,
            );
        });

        let total = measured_engine(0..n, 0xFEED_0000_0000_0003).estimated_total_extent();
        group.bench_function(format!("scroll_sweep_down_up(n={n})"), |b| {
            b.iter_batched(
                || measured_engine(0..n, 0xFEED_0000_0000_0003),
                |mut engine| {
                    let steps = 200;
                    for step in 0..=steps {
                        engine.on_scroll(total * f64::from(step) / f64::from(steps));
                    }
                    for step in (0..=steps).rev() {
                        engine.on_scroll(total * f64::from(step) / f64::from(steps));
                    }
                    black_box(engine.range());
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("index_at_offset(n={n})"), |b| {
            let mut engine = measured_engine(0..n, 0xFEED_0000_0000_0004);
            let mut rng = Lcg::new(0xFEED_0000_0000_0005);
            b.iter(|| {
                let target = total * f64::from(rng.next_u32()) / f64::from(u32::MAX);
                black_box(engine.index_at_offset(target));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_window);
criterion_main!(benches);
