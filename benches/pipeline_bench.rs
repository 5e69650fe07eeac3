//! Benchmark for running filter pipelines over generated record sets
//!
//! Covers the backfill stage, which rewrites every record, and a typical
//! select chain that narrows the set stage by stage.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pclfilter::pipeline::stages::{
    ChangePclOutputByScore, LowEntropyChange, PclOutputChangedFromOkToNotOk, PclOutputIsNotOk,
    TransformationHadEffect,
};
use pclfilter::warnings::SilentWarningSink;
use pclfilter::{AnalysisRecord, FilterPipeline, PipelineBuilder, TransformRule};
use std::hint::black_box;

const CHECKS: [&str; 3] = ["zxcvbn", "cracklib", "passwdqc"];

fn create_records(count: usize) -> Vec<AnalysisRecord> {
    (0..count)
        .map(|i| {
            let base = CHECKS.iter().fold(
                AnalysisRecord::new(format!("password{}", i)).with_entropy(20.0),
                |record, check| record.with_output(*check, "OK"),
            );
            let record = CHECKS.iter().enumerate().fold(
                AnalysisRecord::new(format!("p4ssw0rd{}", i)).with_entropy(20.0 + (i % 5) as f64),
                |record, (n, check)| record.with_score(*check, Some(((i + n) % 100) as f64)),
            );
            if i % 4 == 0 {
                base
            } else {
                record.transformed_from(
                    base,
                    vec![TransformRule::new().with_effect("Leet", (i % 3) as i64)],
                )
            }
        })
        .collect()
}

fn create_pipeline() -> FilterPipeline {
    PipelineBuilder::new()
        .stage(ChangePclOutputByScore::new(
            CHECKS.iter().map(|check| (*check, 50.0)).collect(),
        ))
        .stage(TransformationHadEffect::new(["Leet"]))
        .stage(LowEntropyChange::new(3.0))
        .stage(PclOutputChangedFromOkToNotOk::default())
        .stage(PclOutputIsNotOk::default())
        .build()
}

fn bench_backfill(c: &mut Criterion) {
    let records = create_records(1000);

    c.bench_function("change_pcl_output_by_score_1000", |b| {
        b.iter(|| {
            let mut pipeline = PipelineBuilder::new()
                .stage(ChangePclOutputByScore::new(
                    CHECKS.iter().map(|check| (*check, 50.0)).collect(),
                ))
                .build();
            black_box(pipeline.run(black_box(records.clone()), &SilentWarningSink));
        })
    });
}

fn bench_pipeline_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_pipeline");

    for size in [100usize, 1_000, 10_000].iter() {
        let records = create_records(*size);

        group.bench_with_input(BenchmarkId::new("five_stages", size), size, |b, _| {
            b.iter(|| {
                let mut pipeline = create_pipeline();
                black_box(pipeline.run(black_box(records.clone()), &SilentWarningSink));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_backfill, bench_pipeline_various_sizes);
criterion_main!(benches);
