// Dweve PerfScore - Benchmark Score Aggregation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Table parsing and aggregation benchmarks.
//!
//! Measures HTML table extraction and score aggregation over synthetic module
//! tables of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use perfscore_core::{aggregate, AggregationMode, BenchmarkTable, GroupRule, ReportTable};
use perfscore_test::TableBuilder;

const ROW_COUNTS: &[usize] = &[10, 100, 1_000, 10_000];
const DEVICES: &[&str] = &["RVV", "NEON", "AVX2"];

fn synthetic_table(rows: usize) -> String {
    let mut builder = TableBuilder::new("scalar");
    for device in DEVICES {
        builder = builder.device(*device);
    }
    for i in 0..rows {
        let ratios: Vec<Option<f64>> = (0..DEVICES.len())
            .map(|d| {
                if (i + d) % 17 == 0 {
                    None
                } else {
                    Some(0.5 + ((i * 7 + d * 3) % 100) as f64 / 50.0)
                }
            })
            .collect();
        builder = builder.row(format!("Group{}_Case::op{}::(640x480)", i % 12, i), &ratios);
    }
    builder.to_html()
}

// ============================================================================
// Parsing Benchmarks
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_table");

    for &rows in ROW_COUNTS {
        let html = synthetic_table(rows);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &html, |b, html| {
            b.iter(|| BenchmarkTable::from_html("core", black_box(html)))
        });
    }

    group.finish();
}

// ============================================================================
// Aggregation Benchmarks
// ============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for &rows in ROW_COUNTS {
        let table = match BenchmarkTable::from_html("core", &synthetic_table(rows)) {
            Ok(table) => table,
            Err(e) => panic!("synthetic table failed to parse: {}", e),
        };
        group.throughput(Throughput::Elements(rows as u64));

        for mode in [AggregationMode::Arithmetic, AggregationMode::Geometric] {
            group.bench_with_input(BenchmarkId::new(mode.as_str(), rows), &table, |b, table| {
                b.iter(|| aggregate([black_box(table)], mode, GroupRule::default()))
            });
        }
    }

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let html = synthetic_table(1_000);
    c.bench_function("parse_aggregate_render", |b| {
        b.iter(|| {
            let table = BenchmarkTable::from_html("core", black_box(&html)).ok()?;
            let matrix =
                aggregate([&table], AggregationMode::Geometric, GroupRule::default()).ok()?;
            Some(ReportTable::from_matrix(&matrix).to_markdown())
        })
    });
}

criterion_group!(benches, bench_parse, bench_aggregate, bench_end_to_end);
criterion_main!(benches);
