use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec2;
use quintic_paths::{Constraints, MotionProfile, Path, PathBuilder, ProfileOptions};
use std::time::Duration;

fn demo_path() -> Path {
    PathBuilder::new(DVec2::new(36., -63.), -10.)
        .point_linear_heading(DVec2::new(30., -23.), 120., 120.)
        .point_constant_heading(DVec2::new(27., 0.5), 45.)
        .point_linear_heading(DVec2::new(45., -10.5), 0., 0.)
        .point_constant_heading(DVec2::new(58.6, -9.5), 15.)
        .build()
        .unwrap()
}

fn bench_build_path(c: &mut Criterion) {
    let waypoints = [DVec2::new(0., 0.), DVec2::new(20., 20.), DVec2::new(40., 0.)];
    let tangents = [90., 0., -90.];

    c.bench_function("build_path", |b| {
        b.iter(|| Path::new(black_box(&waypoints), black_box(&tangents), None).unwrap())
    });
}

fn bench_point_at(c: &mut Criterion) {
    let path = demo_path();
    let s = path.length() * 0.37;

    c.bench_function("point_at", |b| b.iter(|| path.point_at(black_box(s)).unwrap()));
}

fn bench_many_sample(c: &mut Criterion) {
    const STEP_DISTANCE: f64 = 1.;
    let path = demo_path();

    c.bench_function("many_sample", |b| b.iter(|| path.sample_many(black_box(STEP_DISTANCE))));
}

fn bench_make_profile(c: &mut Criterion) {
    let path = demo_path();
    let constraints = Constraints::new(30., 40., 6., 12.);

    c.bench_function("make_profile", |b| {
        b.iter(|| {
            MotionProfile::make_profile(
                black_box(&path),
                black_box(constraints),
                black_box(ProfileOptions::default()),
            )
            .unwrap()
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = bench_build_path, bench_point_at, bench_many_sample, bench_make_profile
}
criterion_main!(benches);
