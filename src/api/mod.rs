//! Boundary with the REST record sources: one canonical response envelope,
//! tolerant record decoding and request preparation.

pub mod envelope;
pub mod records;
pub mod request;

pub use envelope::{
    normalize, ApiResponse, RawResponse, NETWORK_ERROR_MESSAGE, REQUEST_FAILED_MESSAGE,
};
pub use records::{decode_record, decode_records, fetch_records};
pub use request::{Method, PreparedRequest, REQUEST_ID_HEADER};
