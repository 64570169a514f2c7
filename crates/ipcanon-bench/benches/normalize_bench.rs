//! Parse and format benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ipcanon_bench::{SAMPLE_ADDRESSES, SAMPLE_GROUPS};
use ipcanon_core::{AddressGroups, longest_zero_run, normalize, to_binary, to_text};

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for &(label, addr) in SAMPLE_ADDRESSES {
        group.throughput(Throughput::Bytes(addr.len() as u64));
        group.bench_with_input(BenchmarkId::new("ipcanon", label), addr, |b, addr| {
            b.iter(|| black_box(normalize(black_box(addr))));
        });
        group.bench_with_input(BenchmarkId::new("std_ipv6", label), addr, |b, addr| {
            b.iter(|| {
                black_box(
                    black_box(addr)
                        .parse::<std::net::Ipv6Addr>()
                        .map(|a| a.to_string()),
                )
            });
        });
    }
    group.finish();
}

fn bench_binary(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary");

    for &(label, addr) in SAMPLE_ADDRESSES {
        let Ok(bytes) = to_binary(addr) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("to_binary", label), addr, |b, addr| {
            b.iter(|| black_box(to_binary(black_box(addr))));
        });
        group.bench_with_input(BenchmarkId::new("to_text", label), &bytes, |b, bytes| {
            b.iter(|| black_box(to_text(black_box(bytes))));
        });
    }
    group.finish();
}

fn bench_zero_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("zero_run");

    for &(label, groups) in SAMPLE_GROUPS {
        group.bench_with_input(BenchmarkId::new("longest", label), &groups, |b, g| {
            b.iter(|| black_box(longest_zero_run(black_box(g))));
        });
        group.bench_with_input(BenchmarkId::new("display", label), &groups, |b, g| {
            b.iter(|| black_box(AddressGroups(*g).to_string()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_binary, bench_zero_run);
criterion_main!(benches);
