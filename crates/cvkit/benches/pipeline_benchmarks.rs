//! Pipeline performance benchmarks.
//!
//! Measures table loading and in-memory enrichment across experiment sizes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use cvkit::{Cell, EnrichmentPipeline, ExperimentTable, TableLoader};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate a segment table with the given number of readings.
fn generate_segment(rows: usize) -> String {
    let mut data = String::from("Potential,Current\n");
    for row in 0..rows {
        let potential = -0.2 + row as f64 * 0.0005;
        data.push_str(&format!("{:.4},{:.8}\n", potential, potential * 1e-3));
    }
    data
}

fn segment_table(rows: usize) -> ExperimentTable {
    ExperimentTable::from_rows(
        vec!["Potential".into(), "Current".into()],
        (0..rows)
            .map(|row| {
                let potential = -0.2 + row as f64 * 0.0005;
                vec![Cell::Float(potential), Cell::Float(potential * 1e-3)]
            })
            .collect(),
    )
    .unwrap()
}

/// Benchmark loading segment tables of various sizes.
fn bench_load_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_segment");

    for rows in [100, 2_400, 24_000].iter() {
        let data = generate_segment(*rows);
        let bytes = data.len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| black_box(TableLoader::new().load(temp.path()).unwrap()),
            )
        });
    }

    group.finish();
}

/// Benchmark the four stages on an in-memory table.
fn bench_enrich_in_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich_in_memory");
    let pipeline = EnrichmentPipeline::default();

    for rows in [100, 2_400, 24_000].iter() {
        let table = segment_table(*rows);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter_with_setup(
                || table.clone(),
                |mut table| {
                    black_box(pipeline.apply(&mut table));
                    table
                },
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load_segment, bench_enrich_in_memory);
criterion_main!(benches);
