//! Service catalog: the fixed, ordered registry of offered services.
//!
//! Each catalog entry binds a service code to its data-entry step, its
//! checklist requirements, its step validator, and its default payload.
//! Registering all per-service dispatch here keeps the sequencer, the
//! validator, and the completion gate free of per-service conditionals.
//!
//! Catalog order is canonical: it defines step ordering in the intake flow
//! and checklist enumeration order in gate output. The catalog is defined at
//! build time and never mutated; `verify_catalog` runs at startup and treats
//! any registration gap as a fatal misconfiguration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::draft::Draft;
use crate::payload::{
    BatteryCheckPayload, CarWashPayload, OilChangePayload, PucCheckPayload, ServicePayload,
    TyreInspectionPayload, TyreRotationPayload, WheelAlignmentPayload, WheelBalancingPayload,
};
use crate::validate::{service, ErrorMap};

// ──────────────────────────────────────────────
// Identifiers
// ──────────────────────────────────────────────

/// Stable identifier for one offered service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCode {
    TyreInspection,
    WheelAlignment,
    WheelBalancing,
    PucCheck,
    CarWash,
    BatteryCheck,
    OilChange,
    TyreRotation,
}

impl ServiceCode {
    pub const ALL: [ServiceCode; 8] = [
        ServiceCode::TyreInspection,
        ServiceCode::WheelAlignment,
        ServiceCode::WheelBalancing,
        ServiceCode::PucCheck,
        ServiceCode::CarWash,
        ServiceCode::BatteryCheck,
        ServiceCode::OilChange,
        ServiceCode::TyreRotation,
    ];

    /// Stable wire string, used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCode::TyreInspection => "tyre_inspection",
            ServiceCode::WheelAlignment => "wheel_alignment",
            ServiceCode::WheelBalancing => "wheel_balancing",
            ServiceCode::PucCheck => "puc_check",
            ServiceCode::CarWash => "car_wash",
            ServiceCode::BatteryCheck => "battery_check",
            ServiceCode::OilChange => "oil_change",
            ServiceCode::TyreRotation => "tyre_rotation",
        }
    }

    /// Human-readable label, used in gate output and step headings.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceCode::TyreInspection => "Tyre Inspection",
            ServiceCode::WheelAlignment => "Wheel Alignment",
            ServiceCode::WheelBalancing => "Wheel Balancing",
            ServiceCode::PucCheck => "PUC",
            ServiceCode::CarWash => "Car Wash",
            ServiceCode::BatteryCheck => "Battery Check",
            ServiceCode::OilChange => "Oil Change",
            ServiceCode::TyreRotation => "Tyre Rotation",
        }
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One screen of data entry in the intake flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Customer,
    ServiceSelection,
    TyreInspection,
    WheelAlignment,
    WheelBalancing,
    PucCheck,
    CarWash,
    BatteryCheck,
    OilChange,
    TyreRotation,
    Summary,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Customer => "customer",
            StepId::ServiceSelection => "service_selection",
            StepId::TyreInspection => "tyre_inspection",
            StepId::WheelAlignment => "wheel_alignment",
            StepId::WheelBalancing => "wheel_balancing",
            StepId::PucCheck => "puc_check",
            StepId::CarWash => "car_wash",
            StepId::BatteryCheck => "battery_check",
            StepId::OilChange => "oil_change",
            StepId::TyreRotation => "tyre_rotation",
            StepId::Summary => "summary",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ──────────────────────────────────────────────
// Catalog entries
// ──────────────────────────────────────────────

/// Registration record for one service: its step, checklist contract, step
/// validator, and default payload.
///
/// `validate` being `None` means the step passes silently. That is
/// intentional for steps whose fields are all optional, not a gap.
pub struct CatalogEntry {
    pub code: ServiceCode,
    pub step: StepId,
    pub requires_checklist: bool,
    /// Required boolean attestation fields, in declaration order. Empty
    /// exactly when `requires_checklist` is false.
    pub checklist_fields: &'static [&'static str],
    pub validate: Option<fn(&Draft) -> ErrorMap>,
    pub default_payload: fn() -> ServicePayload,
}

/// The catalog, in canonical step order.
pub static CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        code: ServiceCode::TyreInspection,
        step: StepId::TyreInspection,
        requires_checklist: true,
        checklist_fields: &[
            "tread_depth_checked",
            "pressure_adjusted",
            "sidewalls_inspected",
            "valve_caps_fitted",
        ],
        validate: Some(service::tyre_inspection),
        default_payload: || ServicePayload::TyreInspection(TyreInspectionPayload::default()),
    },
    CatalogEntry {
        code: ServiceCode::WheelAlignment,
        step: StepId::WheelAlignment,
        requires_checklist: true,
        checklist_fields: &["camber_set", "toe_set", "steering_centered"],
        validate: Some(service::wheel_alignment),
        default_payload: || ServicePayload::WheelAlignment(WheelAlignmentPayload::default()),
    },
    CatalogEntry {
        code: ServiceCode::WheelBalancing,
        step: StepId::WheelBalancing,
        requires_checklist: true,
        checklist_fields: &["weights_applied", "wheels_torqued", "road_tested"],
        validate: Some(service::wheel_balancing),
        default_payload: || ServicePayload::WheelBalancing(WheelBalancingPayload::default()),
    },
    CatalogEntry {
        code: ServiceCode::PucCheck,
        step: StepId::PucCheck,
        requires_checklist: true,
        checklist_fields: &["emission_measured", "certificate_issued"],
        validate: Some(service::puc_check),
        default_payload: || ServicePayload::PucCheck(PucCheckPayload::default()),
    },
    CatalogEntry {
        code: ServiceCode::CarWash,
        step: StepId::CarWash,
        requires_checklist: false,
        checklist_fields: &[],
        // All car wash fields are optional; the step passes silently.
        validate: None,
        default_payload: || ServicePayload::CarWash(CarWashPayload::default()),
    },
    CatalogEntry {
        code: ServiceCode::BatteryCheck,
        step: StepId::BatteryCheck,
        requires_checklist: true,
        checklist_fields: &["voltage_measured", "terminals_cleaned"],
        validate: Some(service::battery_check),
        default_payload: || ServicePayload::BatteryCheck(BatteryCheckPayload::default()),
    },
    CatalogEntry {
        code: ServiceCode::OilChange,
        step: StepId::OilChange,
        requires_checklist: true,
        checklist_fields: &["oil_drained", "filter_replaced", "level_verified"],
        validate: Some(service::oil_change),
        default_payload: || ServicePayload::OilChange(OilChangePayload::default()),
    },
    CatalogEntry {
        code: ServiceCode::TyreRotation,
        step: StepId::TyreRotation,
        requires_checklist: true,
        checklist_fields: &["rotation_done", "wheels_torqued"],
        validate: Some(service::tyre_rotation),
        default_payload: || ServicePayload::TyreRotation(TyreRotationPayload::default()),
    },
];

/// All catalog entries in canonical order.
pub fn entries() -> &'static [CatalogEntry] {
    CATALOG
}

/// Look up the entry for a service code.
pub fn entry_for(code: ServiceCode) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.code == code)
}

/// Look up the entry owning a service step. `None` for the fixed
/// prefix/suffix steps, which are not service-bound.
pub fn entry_for_step(step: StepId) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.step == step)
}

// ──────────────────────────────────────────────
// Startup verification
// ──────────────────────────────────────────────

/// A catalog misconfiguration. Fatal at startup: the flow cannot sequence
/// steps or enumerate checklists from a broken registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A service code is registered more than once.
    DuplicateService { code: ServiceCode },
    /// Two services claim the same step.
    DuplicateStep { step: StepId },
    /// A known service code has no catalog entry.
    UnregisteredService { code: ServiceCode },
    /// Checklist declaration inconsistent with `requires_checklist`.
    ChecklistMismatch { code: ServiceCode },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateService { code } => {
                write!(f, "service '{}' registered more than once", code)
            }
            CatalogError::DuplicateStep { step } => {
                write!(f, "step '{}' claimed by more than one service", step)
            }
            CatalogError::UnregisteredService { code } => {
                write!(f, "service '{}' has no catalog entry", code)
            }
            CatalogError::ChecklistMismatch { code } => {
                write!(
                    f,
                    "service '{}': checklist field list inconsistent with requires_checklist",
                    code
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Verify the catalog is total and duplicate-free. Call once at startup;
/// a failure is a configuration bug, not a runtime condition.
pub fn verify_catalog() -> Result<(), CatalogError> {
    for (i, entry) in CATALOG.iter().enumerate() {
        if CATALOG[..i].iter().any(|e| e.code == entry.code) {
            return Err(CatalogError::DuplicateService { code: entry.code });
        }
        if CATALOG[..i].iter().any(|e| e.step == entry.step) {
            return Err(CatalogError::DuplicateStep { step: entry.step });
        }
        if entry.requires_checklist == entry.checklist_fields.is_empty() {
            return Err(CatalogError::ChecklistMismatch { code: entry.code });
        }
    }
    for code in ServiceCode::ALL {
        if entry_for(code).is_none() {
            return Err(CatalogError::UnregisteredService { code });
        }
    }
    Ok(())
}
