//! Submission Log - append-only history of every priced quote.
//!
//! One CSV file, fixed 13-column header, one row per submission in
//! submission order. The file itself is the spreadsheet view; prior rows
//! are never rewritten.

pub mod record;
pub mod writer;


pub use record::SubmissionRecord;
pub use writer::{LogStats, StorageError, SubmissionLog};
