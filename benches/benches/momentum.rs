// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for velocity tracking: sample churn and the windowed
//! regression.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use kurbo::Point;

use driftfield_momentum::VelocityTracker;

/// A gesture's worth of irregular move samples.
fn gesture_samples() -> Vec<(Point, f64)> {
    let mut samples = Vec::new();
    let mut t = 0.0;
    for i in 0..240 {
        // Irregular inter-event gaps between 4 and 18 ms.
        t += 4.0 + f64::from(i % 8) * 2.0;
        let f = f64::from(i);
        samples.push((Point::new(3.0 * f, 60.0 * (0.05 * f).sin()), t));
    }
    samples
}

fn bench_track_churn(c: &mut Criterion) {
    let samples = gesture_samples();
    c.bench_function("tracker_track_240_samples", |b| {
        b.iter(|| {
            let mut tracker = VelocityTracker::new();
            tracker.start(Point::ORIGIN, 0.0);
            let mut last = kurbo::Vec2::ZERO;
            for &(pos, t) in &samples {
                last = tracker.track(black_box(pos), black_box(t));
            }
            last
        });
    });
}

fn bench_velocity_regression(c: &mut Criterion) {
    let samples = gesture_samples();
    let mut tracker = VelocityTracker::new();
    tracker.start(Point::ORIGIN, 0.0);
    let mut now = 0.0;
    for &(pos, t) in &samples {
        tracker.track(pos, t);
        now = t;
    }
    c.bench_function("tracker_velocity_full_window", |b| {
        b.iter(|| tracker.velocity(black_box(now)));
    });
}

criterion_group!(benches, bench_track_churn, bench_velocity_regression);
criterion_main!(benches);
