use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dataprof_core::DataProfiler;

/// Synthetic mixed-type dataset: numeric, categorical, boolean, and date
/// columns with a sprinkling of nulls and duplicate rows.
fn synthetic_csv(rows: usize) -> Vec<u8> {
    let mut csv = String::from("id,amount,region,active,signup\n");
    for i in 0..rows {
        let amount = if i % 17 == 0 {
            String::new()
        } else {
            format!("{:.2}", (i % 997) as f64 * 1.37)
        };
        let region = ["north", "south", "east", "west"][i % 4];
        let active = if i % 2 == 0 { "true" } else { "false" };
        let day = (i % 28) + 1;
        csv.push_str(&format!(
            "{},{},{},{},2023-06-{:02}\n",
            i % (rows / 2 + 1),
            amount,
            region,
            active,
            day
        ));
    }
    csv.into_bytes()
}

fn bench_profile(c: &mut Criterion) {
    let profiler = DataProfiler::default();
    let small = synthetic_csv(1_000);
    let large = synthetic_csv(10_000);

    c.bench_function("profile_1k_rows", |b| {
        b.iter(|| profiler.profile("bench.csv", black_box(&small)))
    });

    c.bench_function("profile_10k_rows", |b| {
        b.iter(|| profiler.profile("bench.csv", black_box(&large)))
    });
}

criterion_group!(benches, bench_profile);
criterion_main!(benches);
