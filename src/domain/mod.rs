pub mod common;
pub mod record;
pub mod summary;

pub use common::{parse_calendar_date, Dated, Displayable, Searchable};
pub use record::{Record, RecordKind, RecordStatus, StatusBucket, UNASSIGNED_LABEL};
pub use summary::{CountingPolicy, Summary};
