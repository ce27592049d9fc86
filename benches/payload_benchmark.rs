use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mushroom_form::web::render_page;
use mushroom_form::{build_payload, FieldRegistry, FieldValue, SpecimenRecord};

fn setup_benchmark_record() -> SpecimenRecord<'static> {
    SpecimenRecord::new(FieldRegistry::global())
        .with("has_ring", FieldValue::Flag(true))
        .unwrap()
        .with("ring_type", FieldValue::Code(1))
        .unwrap()
        .with("cap_diameter", FieldValue::Number(12.5))
        .unwrap()
}

fn bench_payload(c: &mut Criterion) {
    let record = setup_benchmark_record();
    let mut group = c.benchmark_group("Payload");

    group.bench_function("build", |b| b.iter(|| build_payload(black_box(&record))));

    group.bench_function("build_and_serialize", |b| {
        b.iter(|| serde_json::to_vec(&build_payload(black_box(&record))).unwrap())
    });

    group.finish();
}

fn bench_form(c: &mut Criterion) {
    let record = setup_benchmark_record();
    let mut group = c.benchmark_group("Form");

    group.bench_function("render_page", |b| {
        b.iter(|| render_page(black_box(&record), Some("This mushroom is : edible, Confidence: 87.3%")))
    });

    group.bench_function("from_form", |b| {
        let fields = [
            ("cap_diameter", "12.5"),
            ("has_ring", "true"),
            ("ring_type", "1"),
            ("cap_color", "white"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        b.iter(|| SpecimenRecord::from_form(FieldRegistry::global(), black_box(&fields)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_payload, bench_form);
criterion_main!(benches);
