use contact_throttle::{GuardState, SubmissionGuard};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Benchmark guard evaluation across the three decision paths.
fn bench_guard_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("guard_evaluation");
    let guard = SubmissionGuard::default();

    let fresh = GuardState::new();
    group.bench_function("allowed_fresh_state", |b| {
        b.iter(|| guard.evaluate(black_box(&fresh), black_box(1_000)))
    });

    let mut after_success = GuardState::new();
    after_success.record_success(1_000);
    group.bench_function("blocked_success_cooldown", |b| {
        b.iter(|| guard.evaluate(black_box(&after_success), black_box(2_000)))
    });

    let mut locked_out = GuardState::new();
    for _ in 0..3 {
        locked_out.record_validation_failure(1_000);
    }
    group.bench_function("blocked_validation_cooldown", |b| {
        b.iter(|| guard.evaluate(black_box(&locked_out), black_box(2_000)))
    });

    group.finish();
}

criterion_group!(benches, bench_guard_evaluation);
criterion_main!(benches);
