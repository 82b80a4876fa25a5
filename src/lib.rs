#![doc(test(attr(deny(warnings))))]

//! Portal Analytics turns flat lists of dated attendance and fee records into
//! period-bucketed summaries, and carries the boundary pieces that feed it:
//! the response envelope, the session context and configuration.

pub mod api;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod period;
pub mod session;
pub mod storage;
pub mod utils;

pub use crate::core::services::{
    filter_records, sort_by_date_descending, RecordFilter, SummaryService,
};
pub use crate::currency::format_currency;
pub use crate::domain::{CountingPolicy, Record, RecordStatus, StatusBucket, Summary};
pub use crate::errors::{AnalyticsError, Result};
pub use crate::period::{DateRange, Period};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Portal Analytics tracing initialized.");
    });
}
