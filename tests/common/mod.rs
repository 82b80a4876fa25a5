#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use portal_analytics::{
    config::ConfigManager,
    domain::{Record, RecordStatus},
    session::{FixedClock, SessionContext},
    storage::JsonSessionStore,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub struct TestEnv {
    pub session: SessionContext,
    pub config: ConfigManager,
    pub clock: Arc<FixedClock>,
    pub base: std::path::PathBuf,
}

/// Creates an isolated session context and config manager backed by a unique directory.
pub fn setup_test_env() -> TestEnv {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let clock = Arc::new(FixedClock::new(reference_now()));
    let store = JsonSessionStore::new(Some(base.clone())).expect("create session store");
    let session =
        SessionContext::load(Box::new(store), clock.clone()).expect("load session context");
    let config = ConfigManager::with_base_dir(base.clone()).expect("create config manager");

    TestEnv {
        session,
        config,
        clock,
        base,
    }
}

/// Thursday 13 March 2025, mid-morning UTC.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 13, 10, 30, 0).unwrap()
}

pub fn attendance(date: &str, status: RecordStatus, subject: &str) -> Record {
    Record::attendance(date, status).with_label(subject)
}

/// A term's worth of mixed records: this week, earlier this month, last year
/// and a couple of malformed dates.
pub fn mixed_records() -> Vec<Record> {
    vec![
        attendance("2025-03-10", RecordStatus::Present, "Mathematics"),
        attendance("2025-03-11", RecordStatus::Absent, "Physics"),
        attendance("2025-03-12", RecordStatus::Late, "Chemistry"),
        attendance("2025-03-03", RecordStatus::Excused, "mathematics"),
        attendance("2025-02-27", RecordStatus::Present, "Biology"),
        attendance("2024-12-20", RecordStatus::Absent, "MATHEMATICS"),
        attendance("not-a-date", RecordStatus::Present, "History"),
        attendance("2025-13-01", RecordStatus::Absent, "Physics"),
        attendance("2025-03-13", RecordStatus::parse("Half Day"), "Sports"),
    ]
}
