//! Bounded, file-backed history of scored submissions.

pub mod error;
pub mod store;

pub use error::HistoryError;
pub use store::{HistoryEntry, HistoryStore, NewHistoryEntry, MAX_ENTRIES};
