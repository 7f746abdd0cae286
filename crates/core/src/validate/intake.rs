//! Validators for the fixed prefix steps: customer/vehicle intake and
//! service selection.

use time::Date;

use crate::draft::Draft;
use crate::validate::ErrorMap;

fn require(errors: &mut ErrorMap, path: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(path.to_string(), message.to_string());
    }
}

/// Customer/vehicle intake: every identification scalar is required, and
/// the service date must be today or later.
pub fn customer(draft: &Draft, today: Date) -> ErrorMap {
    let mut errors = ErrorMap::new();
    require(
        &mut errors,
        "customer.name",
        &draft.customer.name,
        "Customer name is required",
    );
    require(
        &mut errors,
        "customer.phone",
        &draft.customer.phone,
        "Phone number is required",
    );
    require(
        &mut errors,
        "vehicle.registration",
        &draft.vehicle.registration,
        "Vehicle registration is required",
    );
    require(
        &mut errors,
        "vehicle.make",
        &draft.vehicle.make,
        "Vehicle make is required",
    );
    require(
        &mut errors,
        "vehicle.model",
        &draft.vehicle.model,
        "Vehicle model is required",
    );
    match draft.service_date {
        None => {
            errors.insert(
                "customer.service_date".to_string(),
                "Service date is required".to_string(),
            );
        }
        Some(date) if date < today => {
            errors.insert(
                "customer.service_date".to_string(),
                "Service date cannot be in the past".to_string(),
            );
        }
        Some(_) => {}
    }
    errors
}

/// Service selection: at least one service must be chosen. A single
/// aggregate error, keyed to the selection itself.
pub fn service_selection(draft: &Draft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    if draft.selected.is_empty() {
        errors.insert(
            "services".to_string(),
            "Select at least one service".to_string(),
        );
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceCode;
    use time::macros::date;

    fn filled_draft() -> Draft {
        let mut draft = Draft::new();
        draft.customer.name = "Asha Verma".to_string();
        draft.customer.phone = "9876500011".to_string();
        draft.vehicle.registration = "MH12AB1234".to_string();
        draft.vehicle.make = "Maruti".to_string();
        draft.vehicle.model = "Swift".to_string();
        draft.service_date = Some(date!(2026 - 09 - 01));
        draft
    }

    #[test]
    fn complete_intake_passes() {
        assert!(customer(&filled_draft(), date!(2026 - 08 - 24)).is_empty());
    }

    #[test]
    fn each_missing_scalar_gets_its_own_path() {
        let errors = customer(&Draft::new(), date!(2026 - 08 - 24));
        assert_eq!(errors.len(), 6);
        assert!(errors.contains_key("customer.name"));
        assert!(errors.contains_key("customer.phone"));
        assert!(errors.contains_key("vehicle.registration"));
        assert!(errors.contains_key("vehicle.make"));
        assert!(errors.contains_key("vehicle.model"));
        assert!(errors.contains_key("customer.service_date"));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut draft = filled_draft();
        draft.customer.name = "   ".to_string();
        let errors = customer(&draft, date!(2026 - 08 - 24));
        assert_eq!(
            errors.get("customer.name").map(String::as_str),
            Some("Customer name is required")
        );
    }

    #[test]
    fn past_service_date_is_rejected_today_is_accepted() {
        let mut draft = filled_draft();
        draft.service_date = Some(date!(2026 - 08 - 23));
        let errors = customer(&draft, date!(2026 - 08 - 24));
        assert_eq!(
            errors.get("customer.service_date").map(String::as_str),
            Some("Service date cannot be in the past")
        );

        draft.service_date = Some(date!(2026 - 08 - 24));
        assert!(customer(&draft, date!(2026 - 08 - 24)).is_empty());
    }

    #[test]
    fn empty_selection_is_one_aggregate_error() {
        let errors = service_selection(&Draft::new());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("services").map(String::as_str),
            Some("Select at least one service")
        );
    }

    #[test]
    fn any_selection_passes() {
        let mut draft = Draft::new();
        draft.toggle_service(ServiceCode::CarWash);
        assert!(service_selection(&draft).is_empty());
    }
}
