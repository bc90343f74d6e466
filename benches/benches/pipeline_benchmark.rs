//! Benchmarks for response decoding, table normalization and unit reports.
//!
//! Run with: `cargo bench --package harmonize-bench`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use harmonize_bench::{auction_records, envelope_response, record_count};
use harmonize_lib::{
    DayReport, DeliveryDay, OutputFormat, StreamRegistry, Table, UNIT_STREAM, build_date_filter,
    decode, validate_and_extract,
};
use std::hint::black_box;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

/// Delivery-day counts to benchmark.
const DAYS: [u64; 3] = [1, 7, 30];

fn decode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for days in DAYS {
        let response = envelope_response(&auction_records(start_date(), days));
        group.throughput(Throughput::Elements(record_count(days)));
        group.bench_with_input(BenchmarkId::from_parameter(days), &response, |b, response| {
            b.iter(|| {
                let table = decode(black_box(response)).and_then(validate_and_extract);
                black_box(table)
            });
        });
    }

    group.finish();
}

fn table_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_records");

    for days in DAYS {
        let records = auction_records(start_date(), days);
        group.throughput(Throughput::Elements(record_count(days)));
        group.bench_with_input(BenchmarkId::from_parameter(days), &records, |b, records| {
            b.iter(|| Table::from_records(black_box(records.clone())));
        });
    }

    group.finish();
}

fn report_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("day_report");

    for days in DAYS {
        let table = Table::from_records(auction_records(start_date(), days));
        group.throughput(Throughput::Elements(record_count(days)));
        group.bench_with_input(BenchmarkId::from_parameter(days), &table, |b, table| {
            b.iter(|| DayReport::build(DeliveryDay::Current, start_date(), black_box(table)));
        });
    }

    group.finish();
}

fn format_benchmark(c: &mut Criterion) {
    let table = Table::from_records(auction_records(start_date(), 7));
    let mut group = c.benchmark_group("format");
    group.throughput(Throughput::Elements(record_count(7)));

    for format in OutputFormat::all() {
        group.bench_function(BenchmarkId::from_parameter(format), |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(1 << 20);
                format
                    .write_table(black_box(&table), &mut out)
                    .expect("write to memory");
                black_box(out)
            });
        });
    }

    group.finish();
}

fn filter_benchmark(c: &mut Criterion) {
    let resource_id = StreamRegistry::global()
        .resolve(UNIT_STREAM)
        .expect("unit stream registered");
    c.bench_function("build_date_filter", |b| {
        b.iter(|| {
            build_date_filter(
                black_box(resource_id),
                black_box("EFA Date"),
                Some("2024-01-01"),
                Some("2024-01-31"),
            )
        });
    });
}

criterion_group!(
    benches,
    decode_benchmark,
    table_benchmark,
    report_benchmark,
    format_benchmark,
    filter_benchmark
);
criterion_main!(benches);
