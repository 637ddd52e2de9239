use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tally_core::model::{Run, Spec, SpecStatus, Suite, Tag};
use tally_core::summarize;

const STATUSES: [&str; 5] = ["passed", "failed", "skipped", "pending", "errored"];

fn synthetic_runs(runs: usize, suites: usize, specs: usize) -> Vec<Run> {
    (0..runs)
        .map(|r| Run {
            branch: "main".into(),
            commit_sha: "0123abcd".into(),
            start_time: None,
            end_time: None,
            suites: (0..suites)
                .map(|s| Suite {
                    name: format!("suite-{s}"),
                    tags: vec![Tag::new("owner", format!("team-{}", s % 4))],
                    specs: (0..specs)
                        .map(|i| Spec {
                            name: format!("spec-{r}-{s}-{i}"),
                            status: SpecStatus::parse(STATUSES[i % STATUSES.len()]),
                            tags: vec![
                                Tag::new("component", format!("c{}", i % 17)),
                                Tag::new("priority", format!("p{}", i % 3)),
                                Tag::new("browser", format!("b{}", (i + s) % 5)),
                            ],
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

fn bench_summarize(c: &mut Criterion) {
    let runs = synthetic_runs(4, 50, 100);
    let mut group = c.benchmark_group("summarize");
    for cats in [
        vec![],
        vec!["component".to_string()],
        vec![
            "component".to_string(),
            "priority".to_string(),
            "browser".to_string(),
        ],
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(cats.len()), &cats, |b, cats| {
            b.iter(|| summarize(black_box(&runs), "bench", "seed", black_box(cats)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_summarize);
criterion_main!(benches);
