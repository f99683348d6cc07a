//! Listing record types
//!
//! A page yields candidate records, and the filter turns the ones that
//! survive into laptop records.

mod records;

pub use records::{CandidateRecord, LaptopRecord, CSV_HEADER};
