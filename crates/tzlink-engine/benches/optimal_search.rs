use chrono::{TimeZone, Utc};
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tzlink_engine::config::{default_regions, BusinessHoursWindow, SearchOptions};
use tzlink_engine::optimal::find_optimal;
use tzlink_engine::parser::parse;

fn bench_find_optimal(c: &mut Criterion) {
    let base = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
    let regions = default_regions();
    let window = BusinessHoursWindow::default();
    let options = SearchOptions::default();

    c.bench_function("find_optimal_default_regions", |b| {
        b.iter(|| find_optimal(black_box(base), black_box(&regions), &window, &options))
    });
}

fn bench_parse(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
    let mut group = c.benchmark_group("parse");
    for text in ["tomorrow 2 pm", "next friday at 10:30am", "2:30 PM PST", "no time here"] {
        group.bench_function(text, |b| {
            b.iter(|| parse(black_box(text), now, chrono_tz::UTC))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_optimal, bench_parse);
criterion_main!(benches);
