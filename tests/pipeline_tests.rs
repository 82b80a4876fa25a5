mod common;

use common::{reference_now, setup_test_env};
use portal_analytics::{
    api::{fetch_records, RawResponse},
    domain::{RecordKind, StatusBucket},
    format_currency, AnalyticsError, Period, RecordFilter, SummaryService,
};

const ATTENDANCE_BODY: &str = r#"{
  "success": true,
  "data": [
    {"id": 1, "date": "2025-03-10", "status": "Present", "subject": "Mathematics"},
    {"id": 2, "date": "2025-03-11", "status": "absent", "subject": "Physics", "remarks": "Fever"},
    {"id": 3, "date": "2025-03-12T09:15:00+05:30", "category": "LATE", "subject": "Chemistry"},
    {"id": 4, "date": "yesterday", "status": "Present", "subject": "History"},
    {"id": 5, "date": "2025-03-12", "status": "On Duty", "subject": "Sports", "faculty": "Rao"}
  ]
}"#;

const FEES_BODY: &str = r#"[
  {"transactionId": "TX-100", "date": "2025-01-15", "status": "Paid", "method": "UPI", "amount": 15000},
  {"transactionId": "TX-101", "date": "2025-03-02", "status": "Paid", "method": "Card", "amount": 7500.5},
  {"transactionId": "TX-102", "date": "2025-04-10", "status": "Pending", "amount": "12,000"},
  {"transactionId": "TX-103", "date": "2025-03-05", "status": "Overdue", "amount": 2500}
]"#;

#[test]
fn attendance_response_to_weekly_summary() {
    let records = fetch_records(&RawResponse::json(200, ATTENDANCE_BODY)).expect("records");
    assert_eq!(records.len(), 5);

    let config = setup_test_env().config.load().expect("config");
    let service = SummaryService::new(config.attendance_policy());
    let summary = service
        .bucket_by_period(&records, &Period::Weekly, reference_now())
        .expect("summary");

    assert_eq!(summary.total, 4);
    assert_eq!(summary.excluded, 1);
    assert_eq!(summary.count(StatusBucket::Other), 1);
    assert_eq!(summary.percentage, 50);
}

#[test]
fn remarks_are_searchable_after_decoding() {
    let records = fetch_records(&RawResponse::json(200, ATTENDANCE_BODY)).unwrap();
    let filtered = portal_analytics::filter_records(&records, &RecordFilter::new().search("FEVER"));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id.as_deref(), Some("2"));
}

#[test]
fn fee_response_to_yearly_summary_and_display() {
    let records = fetch_records(&RawResponse::json(200, FEES_BODY)).expect("records");
    assert!(records.iter().all(|record| record.kind == RecordKind::Fee));

    let summary = SummaryService::fees()
        .bucket_by_period(&records, &Period::Yearly, reference_now())
        .expect("summary");
    assert_eq!(summary.total, 4);
    assert_eq!(summary.percentage, 50);
    assert_eq!(summary.amount(StatusBucket::Pending), 12000.0);

    let config = setup_test_env().config.load().unwrap();
    assert_eq!(format_currency(summary.amount(StatusBucket::Paid), &config.locale), "₹22,501");
    assert_eq!(format_currency(summary.total_amount(), &config.locale), "₹37,001");
}

#[test]
fn fee_breakdown_by_payment_method() {
    let records = fetch_records(&RawResponse::json(200, FEES_BODY)).unwrap();
    let breakdown = SummaryService::fees()
        .breakdown_by_label(&records, &Period::Yearly, reference_now())
        .unwrap();
    assert_eq!(breakdown["UPI"].percentage, 100);
    assert_eq!(breakdown["Card"].amount(StatusBucket::Paid), 7500.5);
    assert_eq!(breakdown["Unassigned"].percentage, 0);
}

#[test]
fn failed_fetch_is_reported_before_aggregation() {
    let err = fetch_records(&RawResponse::json(401, r#"{"error":"Token expired"}"#)).unwrap_err();
    match err {
        AnalyticsError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Token expired");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_array_yields_empty_summary() {
    let records = fetch_records(&RawResponse::json(200, r#"{"data": []}"#)).unwrap();
    let summary = SummaryService::attendance()
        .bucket_by_period(&records, &Period::Monthly, reference_now())
        .unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.percentage, 0);
}
