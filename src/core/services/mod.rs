pub mod filter_service;
pub mod summary_service;

pub use filter_service::{
    available_statuses, filter_records, sort_by_date_descending, RecordFilter,
};
pub use summary_service::{percentage, SummaryService};
