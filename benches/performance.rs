use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use portal_analytics::{
    domain::{Record, RecordStatus},
    filter_records, format_currency, sort_by_date_descending, Period, RecordFilter,
    SummaryService,
};

const SUBJECTS: [&str; 5] = ["Mathematics", "Physics", "Chemistry", "Biology", "History"];

fn build_sample_records(count: usize) -> Vec<Record> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let date = start + Duration::days((idx % 365) as i64);
            let status = match idx % 10 {
                0 => RecordStatus::Absent,
                1 => RecordStatus::Late,
                2 => RecordStatus::Excused,
                _ => RecordStatus::Present,
            };
            let raw_date = if idx % 97 == 0 {
                "invalid".to_string()
            } else {
                date.to_string()
            };
            Record::attendance(raw_date, status).with_label(SUBJECTS[idx % SUBJECTS.len()])
        })
        .collect()
}

fn bench_bucketing(c: &mut Criterion) {
    let records = build_sample_records(black_box(10_000));
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let service = SummaryService::attendance();

    c.bench_function("bucket_yearly_10k", |b| {
        b.iter(|| {
            let summary = service
                .bucket_by_period(&records, &Period::Yearly, now)
                .expect("summary");
            black_box(summary);
        })
    });

    c.bench_function("breakdown_monthly_10k", |b| {
        b.iter(|| {
            let breakdown = service
                .breakdown_by_label(&records, &Period::Monthly, now)
                .expect("breakdown");
            black_box(breakdown);
        })
    });
}

fn bench_filter_and_sort(c: &mut Criterion) {
    let records = build_sample_records(black_box(10_000));
    let filter = RecordFilter::new()
        .status(RecordStatus::Present)
        .search("math");

    c.bench_function("filter_10k", |b| {
        b.iter(|| black_box(filter_records(&records, &filter)))
    });

    c.bench_function("sort_desc_10k", |b| {
        b.iter(|| black_box(sort_by_date_descending(&records)))
    });
}

fn bench_currency(c: &mut Criterion) {
    c.bench_function("format_currency_en_in", |b| {
        b.iter(|| black_box(format_currency(black_box(1_234_567.89), "en-IN")))
    });
}

criterion_group!(benches, bench_bucketing, bench_filter_and_sort, bench_currency);
criterion_main!(benches);
