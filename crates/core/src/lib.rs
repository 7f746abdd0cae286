//! Job-card intake workflow core.
//!
//! The session-side engine for vehicle-service job cards: a fixed service
//! catalog, the mutable draft a session edits, deterministic step
//! sequencing over the selected services, per-step validation, and the
//! navigation state machine tying them together.
//!
//! Everything here is synchronous and I/O-free. Persistence and the
//! completion gate live in the `jobcard-storage` and `jobcard-engine`
//! crates.

pub mod catalog;
pub mod draft;
pub mod navigation;
pub mod payload;
pub mod sequence;
pub mod validate;

pub use catalog::{
    entries, entry_for, entry_for_step, verify_catalog, CatalogEntry, CatalogError, ServiceCode,
    StepId,
};
pub use draft::{CustomerFields, Draft, VehicleFields};
pub use navigation::Navigation;
pub use payload::{ServicePayload, ServicePayloadPatch};
pub use sequence::compute_steps;
pub use validate::{validate_step, ErrorMap};
