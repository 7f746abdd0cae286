//! The in-progress job card held by one interactive session.
//!
//! The draft is a mutable projection of user intent: it records what was
//! typed and what was toggled, and performs no validation of its own.
//! Validation happens per step in [`crate::validate`]; the draft only has to
//! preserve everything the user entered.
//!
//! Sticky payload invariant: toggling a service off never deletes its
//! payload. Re-selecting the service restores every previously entered
//! field, including toggle-set sub-fields, verbatim.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

use crate::catalog::{self, ServiceCode};
use crate::payload::{ServicePayload, ServicePayloadPatch};

/// Customer contact fields. Email is optional throughout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Vehicle identification fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFields {
    pub registration: String,
    pub make: String,
    pub model: String,
    pub odometer_km: Option<u32>,
}

/// A not-yet-submitted job card under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub customer: CustomerFields,
    pub vehicle: VehicleFields,
    pub service_date: Option<Date>,
    pub selected: BTreeSet<ServiceCode>,
    /// One slot per service ever visited. Entries outlive deselection.
    pub payloads: BTreeMap<ServiceCode, ServicePayload>,
    pub complaint_notes: String,
}

impl Draft {
    pub fn new() -> Self {
        Draft::default()
    }

    /// Replace the selected-service set wholesale. Payloads are untouched.
    pub fn set_selected_services<I>(&mut self, codes: I)
    where
        I: IntoIterator<Item = ServiceCode>,
    {
        self.selected = codes.into_iter().collect();
    }

    /// Add or remove one service from the selection. Removal keeps the
    /// service's payload so a later re-add restores prior entries.
    pub fn toggle_service(&mut self, code: ServiceCode) {
        if !self.selected.remove(&code) {
            self.selected.insert(code);
        }
    }

    pub fn is_selected(&self, code: ServiceCode) -> bool {
        self.selected.contains(&code)
    }

    /// Merge a partial payload update for the service the patch targets,
    /// creating the catalog default payload first if none exists yet.
    pub fn update_payload(&mut self, patch: &ServicePayloadPatch) {
        let code = patch.code();
        // entry_for is total over ServiceCode; verified at startup.
        let Some(entry) = catalog::entry_for(code) else {
            return;
        };
        let payload = self
            .payloads
            .entry(code)
            .or_insert_with(|| (entry.default_payload)());
        payload.apply(patch);
    }

    /// The payload entered for a service, if the step was ever visited.
    pub fn payload(&self, code: ServiceCode) -> Option<&ServicePayload> {
        self.payloads.get(&code)
    }

    /// Discard everything and start a fresh card.
    pub fn reset(&mut self) {
        *self = Draft::default();
    }
}
