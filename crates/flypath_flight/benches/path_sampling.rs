//! Benchmarks for curve fitting, sampling and flight playback.
//!
//! Run with: `cargo bench -p flypath_flight`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flypath_core::{CameraPose, Vec3};
use flypath_flight::{
    CurveConfig, CurveFitter, FlightConfig, FlightPlanner, FlightRunner, PathSampler, TickOutcome,
};

/// Points on a ring, as a user might click them around the scene
fn ring(count: usize, radius: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            Vec3::new(angle.cos() * radius, angle.sin() * radius, 3.0)
        })
        .collect()
}

fn bench_fit_and_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_and_sample");
    let sampler = PathSampler::default();

    for count in [4, 16, 64] {
        let points = ring(count, 50.0);

        group.bench_with_input(BenchmarkId::new("catmull_rom_closed", count), &points, |b, points| {
            let fitter = CurveFitter::new(CurveConfig::catmull_rom_closed());
            b.iter(|| {
                let curve = fitter.fit(black_box(points)).unwrap();
                black_box(sampler.sample(&curve).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("linear", count), &points, |b, points| {
            let fitter = CurveFitter::new(CurveConfig::linear());
            b.iter(|| {
                let curve = fitter.fit(black_box(points)).unwrap();
                black_box(sampler.sample(&curve).unwrap())
            })
        });
    }

    // Barycentric evaluation is O(N) per sample
    for count in [4, 12] {
        let points = ring(count, 50.0);
        group.bench_with_input(BenchmarkId::new("polynomial", count), &points, |b, points| {
            let fitter = CurveFitter::new(CurveConfig::polynomial());
            b.iter(|| {
                let curve = fitter.fit(black_box(points)).unwrap();
                black_box(sampler.sample(&curve).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_flight(c: &mut Criterion) {
    let points = ring(16, 50.0);
    let curve = CurveFitter::new(CurveConfig::catmull_rom_closed())
        .fit(&points)
        .unwrap();
    let waypoints = PathSampler::default().sample(&curve).unwrap();
    let camera = CameraPose::looking_at(Vec3::new(0.0, 0.0, 240.0), Vec3::ZERO, Vec3::Y);
    let planner = FlightPlanner::new(FlightConfig::default());

    c.bench_function("plan", |b| {
        b.iter(|| black_box(planner.plan(black_box(&waypoints), &camera)))
    });

    c.bench_function("full_flight_60fps", |b| {
        b.iter(|| {
            let mut runner = FlightRunner::new();
            let mut pose = camera;
            runner.start(planner.plan(&waypoints, &camera).unwrap());
            while runner.tick(16.6, &mut pose) != TickOutcome::Finished {}
            black_box(pose)
        })
    });
}

criterion_group!(benches, bench_fit_and_sample, bench_flight);
criterion_main!(benches);
