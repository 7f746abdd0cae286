//! Validators for the per-service inspection steps.
//!
//! Each validator reads the service's payload slot from the draft. A draft
//! that never visited the step has no payload yet; that is validated as if
//! every field were empty, so the step reports its full requirement list.
//!
//! Complaint fields are free text and never required.

use crate::catalog::ServiceCode;
use crate::draft::Draft;
use crate::payload::{ServicePayload, TyrePosition};
use crate::validate::ErrorMap;

/// All four wheel positions must have a recorded condition.
pub fn tyre_inspection(draft: &Draft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let recorded = match draft.payload(ServiceCode::TyreInspection) {
        Some(ServicePayload::TyreInspection(p)) => Some(&p.condition),
        _ => None,
    };
    for position in TyrePosition::ALL {
        let present = recorded.is_some_and(|c| c.contains_key(&position));
        if !present {
            errors.insert(
                format!("tyre.condition.{}", position.as_str()),
                format!("{} condition is required", position.label()),
            );
        }
    }
    errors
}

/// An alignment geometry must be selected.
pub fn wheel_alignment(draft: &Draft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let selected = matches!(
        draft.payload(ServiceCode::WheelAlignment),
        Some(ServicePayload::WheelAlignment(p)) if p.kind.is_some()
    );
    if !selected {
        errors.insert(
            "alignment.kind".to_string(),
            "Alignment type is required".to_string(),
        );
    }
    errors
}

/// All four balancing weights must be present. Each missing weight is its
/// own error, keyed to the wheel position.
pub fn wheel_balancing(draft: &Draft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let weights = match draft.payload(ServiceCode::WheelBalancing) {
        Some(ServicePayload::WheelBalancing(p)) => Some(&p.weights),
        _ => None,
    };
    for position in TyrePosition::ALL {
        let present = weights.is_some_and(|w| w.get(position).is_some());
        if !present {
            errors.insert(
                format!("balancing.weights.{}", position.as_str()),
                format!("{} weight is required", position.label()),
            );
        }
    }
    errors
}

/// The emissions test needs the vehicle's fuel type.
pub fn puc_check(draft: &Draft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let selected = matches!(
        draft.payload(ServiceCode::PucCheck),
        Some(ServicePayload::PucCheck(p)) if p.fuel.is_some()
    );
    if !selected {
        errors.insert(
            "puc.fuel_type".to_string(),
            "Fuel type is required".to_string(),
        );
    }
    errors
}

/// A battery condition grade must be selected.
pub fn battery_check(draft: &Draft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let selected = matches!(
        draft.payload(ServiceCode::BatteryCheck),
        Some(ServicePayload::BatteryCheck(p)) if p.condition.is_some()
    );
    if !selected {
        errors.insert(
            "battery.condition".to_string(),
            "Battery condition is required".to_string(),
        );
    }
    errors
}

/// An oil grade must be selected.
pub fn oil_change(draft: &Draft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let selected = matches!(
        draft.payload(ServiceCode::OilChange),
        Some(ServicePayload::OilChange(p)) if p.grade.is_some()
    );
    if !selected {
        errors.insert(
            "oil.grade".to_string(),
            "Oil grade is required".to_string(),
        );
    }
    errors
}

/// A rotation pattern must be selected.
pub fn tyre_rotation(draft: &Draft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let selected = matches!(
        draft.payload(ServiceCode::TyreRotation),
        Some(ServicePayload::TyreRotation(p)) if p.pattern.is_some()
    );
    if !selected {
        errors.insert(
            "rotation.pattern".to_string(),
            "Rotation pattern is required".to_string(),
        );
    }
    errors
}
