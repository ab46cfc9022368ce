// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for layout checks and dimension resolution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tensor_meta::{compute_contiguous, contiguous_strides, maybe_wrap_dim};

fn bench_compute_contiguous(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_contiguous");
    for rank in [1usize, 4, 8] {
        let sizes = vec![3usize; rank];
        let row_major = contiguous_strides(&sizes);
        let mut transposed = row_major.clone();
        transposed.reverse();

        group.bench_with_input(BenchmarkId::new("row_major", rank), &rank, |b, _| {
            b.iter(|| compute_contiguous(black_box(&sizes), black_box(&row_major)))
        });
        group.bench_with_input(BenchmarkId::new("transposed", rank), &rank, |b, _| {
            b.iter(|| compute_contiguous(black_box(&sizes), black_box(&transposed)))
        });
    }
    group.finish();
}

fn bench_maybe_wrap_dim(c: &mut Criterion) {
    c.bench_function("maybe_wrap_dim/negative", |b| {
        b.iter(|| maybe_wrap_dim(black_box(-1), black_box(4), false))
    });
}

criterion_group!(benches, bench_compute_contiguous, bench_maybe_wrap_dim);
criterion_main!(benches);
