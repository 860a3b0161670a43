use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgfrag::{NameTranslation, UpdateFields, sql_for_filtering_companies};
use serde_json::json;

/// `n` fields named `field0..fieldN`, every other one translated to snake_case.
fn build_fields(n: usize) -> (UpdateFields, NameTranslation) {
    let mut fields = UpdateFields::new();
    let mut translation = NameTranslation::new();
    for i in 0..n {
        fields.insert(format!("field{i}"), i as i64);
        if i % 2 == 0 {
            translation = translation.map(format!("field{i}"), format!("field_{i}"));
        }
    }
    (fields, translation)
}

fn bench_partial_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragments/partial_update");

    for n in [1, 5, 10, 50] {
        let input = build_fields(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, (fields, t)| {
            b.iter(|| black_box(fields.build(t)));
        });
    }

    group.finish();
}

fn bench_company_filter(c: &mut Criterion) {
    let query = json!({"nameLike": "net", "minEmployees": "10", "maxEmployees": 500});
    c.bench_function("fragments/company_filter", |b| {
        b.iter(|| black_box(sql_for_filtering_companies(&query)));
    });
}

criterion_group!(benches, bench_partial_update, bench_company_filter);
criterion_main!(benches);
