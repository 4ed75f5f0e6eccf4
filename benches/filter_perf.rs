//! Benchmark: filtering, sorting and statistics over a large issue list.

use std::hint::black_box;

use chrono::Duration;
use civic_core::filter::{filter_issues, sort_issues};
use civic_core::seed::sample_issues;
use civic_core::{
    Category, Issue, IssueFilter, IssueStore, Priority, SortOrder, Statistics, Status,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// `n` issues cycling through every status, category and priority.
fn synthetic_issues(n: usize) -> Vec<Issue> {
    let base = sample_issues();
    (0..n)
        .map(|i| {
            let mut issue = base[i % base.len()].clone();
            issue.id = format!("bench-{i}");
            issue.status = Status::ALL[i % Status::ALL.len()];
            issue.category = Category::ALL[(i / 3) % Category::ALL.len()];
            issue.priority = Priority::ALL[(i / 7) % Priority::ALL.len()];
            let offset = Duration::minutes(i64::try_from(i).unwrap_or(i64::MAX));
            issue.created_at += offset;
            issue.updated_at += offset;
            issue
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for size in [1_000, 10_000] {
        let issues = synthetic_issues(size);
        let by_status = IssueFilter::default().with_status(Status::Open);
        let combined = IssueFilter::default()
            .with_category(Category::Safety)
            .with_priority(Priority::High)
            .with_search("street");

        group.bench_with_input(BenchmarkId::new("status", size), &issues, |b, issues| {
            b.iter(|| filter_issues(black_box(issues), black_box(&by_status)));
        });
        group.bench_with_input(BenchmarkId::new("combined", size), &issues, |b, issues| {
            b.iter(|| filter_issues(black_box(issues), black_box(&combined)));
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let issues = synthetic_issues(10_000);
    c.bench_function("sort_priority_10k", |b| {
        b.iter(|| {
            let mut refs: Vec<&Issue> = issues.iter().collect();
            sort_issues(&mut refs, SortOrder::Priority);
            black_box(refs.len())
        });
    });
}

fn bench_stats(c: &mut Criterion) {
    let issues = synthetic_issues(10_000);
    c.bench_function("stats_10k", |b| {
        b.iter(|| Statistics::compute(black_box(&issues)));
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let store = IssueStore::with_issues(synthetic_issues(10_000));
    c.bench_function("snapshot_10k", |b| {
        b.iter(|| black_box(store.snapshot()));
    });
}

criterion_group!(benches, bench_filter, bench_sort, bench_stats, bench_snapshot);
criterion_main!(benches);
