// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the flow-field simulation tick and frame rendering.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use kurbo::Vec2;

use driftfield_flow::{FlowField, FlowFieldConfig};

fn stirred_field() -> FlowField {
    let mut field = FlowField::new(FlowFieldConfig::default());
    for i in 0..8 {
        field.inject(5 * i, 3 * i % 25, Vec2::new(4.0, -2.0));
    }
    field
}

fn bench_tick(c: &mut Criterion) {
    let mut field = stirred_field();
    c.bench_function("flow_field_tick_40x25", |b| {
        b.iter(|| field.tick(black_box(0.016)));
    });
}

fn bench_render(c: &mut Criterion) {
    let field = stirred_field();
    c.bench_function("flow_field_render_40x25", |b| {
        b.iter(|| black_box(field.render()));
    });
}

fn bench_inject(c: &mut Criterion) {
    let mut field = stirred_field();
    c.bench_function("flow_field_inject_radius_3", |b| {
        b.iter(|| field.inject(black_box(20), black_box(12), Vec2::new(4.0, -2.0)));
    });
}

criterion_group!(benches, bench_tick, bench_render, bench_inject);
criterion_main!(benches);
