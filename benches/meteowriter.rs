use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meteowriter::{
    assemble_answer, summarize_grouped, summarize_point_series, ExecuteResult, GroupKey, Plan,
    PlanItem, PointSeries, DEFAULT_SPARSE_THRESHOLD,
};

fn year_of_hourly_rain() -> PointSeries {
    let n = 24 * 365;
    PointSeries {
        variable: "precipitation".into(),
        unit: "mm".into(),
        times: (0..n)
            .map(|i| {
                let day = i / 24;
                format!(
                    "2023-{:02}-{:02}T{:02}:00",
                    1 + (day / 31).min(11),
                    1 + day % 28,
                    i % 24
                )
            })
            .collect(),
        values: (0..n)
            .map(|i| Some(if i % 37 == 0 { 2.5 } else { 0.0 }))
            .collect(),
    }
}

fn bench_meteowriter(c: &mut Criterion) {
    let series = year_of_hourly_rain();
    let plan = Plan {
        items: vec![PlanItem {
            requested: Some("rain".into()),
            canonical: Some("precipitation".into()),
        }],
        ..Plan::default()
    };
    let result = ExecuteResult {
        series: vec![series.clone()],
        ..ExecuteResult::default()
    };

    c.bench_function("summarize_point_series_hourly_year", |b| {
        b.iter(|| {
            summarize_point_series(
                black_box(&series),
                "Bergen",
                "rain",
                DEFAULT_SPARSE_THRESHOLD,
            )
        })
    });
    c.bench_function("summarize_grouped_by_hour", |b| {
        b.iter(|| summarize_grouped(black_box(&series), GroupKey::Hour))
    });
    c.bench_function("assemble_answer", |b| {
        b.iter(|| assemble_answer("Bergen", black_box(&plan), black_box(&result), None))
    });
}

criterion_group!(benches, bench_meteowriter);
criterion_main!(benches);
