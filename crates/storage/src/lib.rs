//! `JobCardStorage` trait, record types, and error types for job-card
//! persistence backends, plus an in-memory reference backend and a
//! backend-agnostic conformance suite.

pub mod conformance;
pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::StorageError;
pub use memory::MemoryStorage;
pub use record::{ChecklistRecord, ChecklistUpdate, JobCardRecord, JobStatus};
pub use traits::JobCardStorage;
