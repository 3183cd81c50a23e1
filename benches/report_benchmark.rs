use criterion::{black_box, criterion_group, criterion_main, Criterion};
use transaction_fraud_reporter::{FraudDetectionSystem, InputFormat};

const LOCATIONS: [&str; 6] = ["New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Miami"];

fn json_batch(size: usize) -> String {
    let records: Vec<String> = (0..size)
        .map(|i| {
            format!(
                r#"{{"transaction_id": "TX{i:05}", "transaction_amount": {}, "transaction_currency": "USD", "transaction_location": "{}"}}"#,
                (i * 137) % 20_000 + 1,
                LOCATIONS[i % LOCATIONS.len()]
            )
        })
        .collect();
    format!(r#"{{"transactions": [{}]}}"#, records.join(","))
}

fn csv_batch(size: usize) -> String {
    let mut data =
        String::from("transaction_id,transaction_amount,transaction_currency,transaction_location\n");
    for i in 0..size {
        data.push_str(&format!(
            "TX{i:05},{},USD,{}\n",
            (i * 137) % 20_000 + 1,
            LOCATIONS[i % LOCATIONS.len()]
        ));
    }
    data
}

fn benchmark_reports(c: &mut Criterion) {
    let system = FraudDetectionSystem::new();
    let json = json_batch(1_000);
    let csv = csv_batch(1_000);

    c.bench_function("json_report_1000", |b| {
        b.iter(|| system.try_generate_report(black_box(&json), InputFormat::Json))
    });

    c.bench_function("csv_report_1000", |b| {
        b.iter(|| system.try_generate_report(black_box(&csv), InputFormat::Csv))
    });

    c.bench_function("analyze_only_1000", |b| {
        b.iter(|| system.analyze(black_box(&json), InputFormat::Json))
    });
}

criterion_group!(benches, benchmark_reports);
criterion_main!(benches);
