//! # Nearest-Ahead Scan Benchmark
//!
//! The locator is a full linear scan of the base path, run once per cycle. This bench gives the
//! scan cost for a representative path length so the cycle budget can be checked when paths
//! grow.

use criterion::{criterion_group, criterion_main, Criterion};

use nalgebra::{UnitQuaternion, Vector3};
use wpt_lib::{
    loc::Pose,
    path::{Path, PathPoint},
    wpt_ctrl::find_nearest_ahead,
};

fn nearest_ahead_benchmark(c: &mut Criterion) {
    // ---- Build a representative base path ----

    // 10 km route with 1 m waypoint separation, winding gently in y
    let path = Path {
        points: (0..10_000)
            .map(|i| PathPoint {
                position_m: Vector3::new(i as f64, (i as f64 * 0.01).sin() * 50.0, 0.0),
                speed_ms: 15.0,
            })
            .collect(),
    };

    // Vehicle mid-route, heading +X
    let pose = Pose {
        position_m: Vector3::new(5_000.3, 12.0, 0.0),
        attitude_q: UnitQuaternion::from_euler_angles(0.0, 0.0, 0.1),
    };

    c.bench_function("find_nearest_ahead", |b| {
        b.iter(|| find_nearest_ahead(&pose, &path).unwrap())
    });
}

criterion_group!(benches, nearest_ahead_benchmark);
criterion_main!(benches);
