//! Per-service inspection payloads and their partial-update patches.
//!
//! Every service step edits exactly one `ServicePayload` variant inside the
//! draft. Edits arrive as `ServicePayloadPatch` values: every patch field is
//! `Option`-wrapped, and `apply` merges only the fields that are present.
//! Absent fields are never touched, so overlapping partial updates from the
//! presentation layer compose instead of clobbering each other.
//!
//! All measured quantities use `rust_decimal::Decimal` -- never `f64`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::ServiceCode;

// ──────────────────────────────────────────────
// Enumerators
// ──────────────────────────────────────────────

/// Wheel position on the vehicle. Order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TyrePosition {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl TyrePosition {
    pub const ALL: [TyrePosition; 4] = [
        TyrePosition::FrontLeft,
        TyrePosition::FrontRight,
        TyrePosition::RearLeft,
        TyrePosition::RearRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TyrePosition::FrontLeft => "front_left",
            TyrePosition::FrontRight => "front_right",
            TyrePosition::RearLeft => "rear_left",
            TyrePosition::RearRight => "rear_right",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TyrePosition::FrontLeft => "Front Left",
            TyrePosition::FrontRight => "Front Right",
            TyrePosition::RearLeft => "Rear Left",
            TyrePosition::RearRight => "Rear Right",
        }
    }
}

/// Observed condition grade for tyres and batteries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionGrade {
    Good,
    Fair,
    Worn,
}

/// Fuel type, required for the emissions (PUC) test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Petrol,
    Diesel,
    Cng,
}

/// Alignment geometry requested by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentKind {
    TwoWheel,
    FourWheel,
}

/// Tyre rotation pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPattern {
    Forward,
    Cross,
    SideToSide,
}

/// Car wash package tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WashPackage {
    Basic,
    Premium,
    Interior,
}

/// Engine oil grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OilGrade {
    Mineral,
    SemiSynthetic,
    FullSynthetic,
}

// ──────────────────────────────────────────────
// Payload variants
// ──────────────────────────────────────────────

/// Tyre inspection: one condition entry per wheel position, plus a toggle
/// set of positions flagged for attention. The flagged set is optional data;
/// validation only requires the four condition entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TyreInspectionPayload {
    pub condition: BTreeMap<TyrePosition, ConditionGrade>,
    pub flagged: BTreeSet<TyrePosition>,
    pub complaint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelAlignmentPayload {
    pub kind: Option<AlignmentKind>,
    pub complaint: String,
}

/// Balancing weights in grams, one per wheel position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelWeights {
    pub front_left: Option<Decimal>,
    pub front_right: Option<Decimal>,
    pub rear_left: Option<Decimal>,
    pub rear_right: Option<Decimal>,
}

impl WheelWeights {
    /// Weight recorded for a position, if any.
    pub fn get(&self, position: TyrePosition) -> Option<Decimal> {
        match position {
            TyrePosition::FrontLeft => self.front_left,
            TyrePosition::FrontRight => self.front_right,
            TyrePosition::RearLeft => self.rear_left,
            TyrePosition::RearRight => self.rear_right,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelBalancingPayload {
    pub weights: WheelWeights,
    pub complaint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PucCheckPayload {
    pub fuel: Option<FuelType>,
    pub complaint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarWashPayload {
    pub package: Option<WashPackage>,
    pub complaint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryCheckPayload {
    pub condition: Option<ConditionGrade>,
    pub complaint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OilChangePayload {
    pub grade: Option<OilGrade>,
    pub complaint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TyreRotationPayload {
    pub pattern: Option<RotationPattern>,
    pub complaint: String,
}

/// Inspection data for one service on one draft, tagged by service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum ServicePayload {
    TyreInspection(TyreInspectionPayload),
    WheelAlignment(WheelAlignmentPayload),
    WheelBalancing(WheelBalancingPayload),
    PucCheck(PucCheckPayload),
    CarWash(CarWashPayload),
    BatteryCheck(BatteryCheckPayload),
    OilChange(OilChangePayload),
    TyreRotation(TyreRotationPayload),
}

impl ServicePayload {
    /// The service this payload belongs to.
    pub fn code(&self) -> ServiceCode {
        match self {
            ServicePayload::TyreInspection(_) => ServiceCode::TyreInspection,
            ServicePayload::WheelAlignment(_) => ServiceCode::WheelAlignment,
            ServicePayload::WheelBalancing(_) => ServiceCode::WheelBalancing,
            ServicePayload::PucCheck(_) => ServiceCode::PucCheck,
            ServicePayload::CarWash(_) => ServiceCode::CarWash,
            ServicePayload::BatteryCheck(_) => ServiceCode::BatteryCheck,
            ServicePayload::OilChange(_) => ServiceCode::OilChange,
            ServicePayload::TyreRotation(_) => ServiceCode::TyreRotation,
        }
    }

    /// Merge a partial update into this payload. Only fields present in the
    /// patch are written; everything else keeps its current value. A patch
    /// for a different service is a no-op (payloads are keyed by service in
    /// the draft, so the variants always line up in practice).
    pub fn apply(&mut self, patch: &ServicePayloadPatch) {
        match (self, patch) {
            (ServicePayload::TyreInspection(p), ServicePayloadPatch::TyreInspection(t)) => {
                p.condition.extend(t.condition.iter().map(|(k, v)| (*k, *v)));
                if let Some(flagged) = &t.flagged {
                    p.flagged = flagged.clone();
                }
                if let Some(complaint) = &t.complaint {
                    p.complaint = complaint.clone();
                }
            }
            (ServicePayload::WheelAlignment(p), ServicePayloadPatch::WheelAlignment(t)) => {
                if let Some(kind) = t.kind {
                    p.kind = Some(kind);
                }
                if let Some(complaint) = &t.complaint {
                    p.complaint = complaint.clone();
                }
            }
            (ServicePayload::WheelBalancing(p), ServicePayloadPatch::WheelBalancing(t)) => {
                if let Some(w) = t.front_left {
                    p.weights.front_left = Some(w);
                }
                if let Some(w) = t.front_right {
                    p.weights.front_right = Some(w);
                }
                if let Some(w) = t.rear_left {
                    p.weights.rear_left = Some(w);
                }
                if let Some(w) = t.rear_right {
                    p.weights.rear_right = Some(w);
                }
                if let Some(complaint) = &t.complaint {
                    p.complaint = complaint.clone();
                }
            }
            (ServicePayload::PucCheck(p), ServicePayloadPatch::PucCheck(t)) => {
                if let Some(fuel) = t.fuel {
                    p.fuel = Some(fuel);
                }
                if let Some(complaint) = &t.complaint {
                    p.complaint = complaint.clone();
                }
            }
            (ServicePayload::CarWash(p), ServicePayloadPatch::CarWash(t)) => {
                if let Some(package) = t.package {
                    p.package = Some(package);
                }
                if let Some(complaint) = &t.complaint {
                    p.complaint = complaint.clone();
                }
            }
            (ServicePayload::BatteryCheck(p), ServicePayloadPatch::BatteryCheck(t)) => {
                if let Some(condition) = t.condition {
                    p.condition = Some(condition);
                }
                if let Some(complaint) = &t.complaint {
                    p.complaint = complaint.clone();
                }
            }
            (ServicePayload::OilChange(p), ServicePayloadPatch::OilChange(t)) => {
                if let Some(grade) = t.grade {
                    p.grade = Some(grade);
                }
                if let Some(complaint) = &t.complaint {
                    p.complaint = complaint.clone();
                }
            }
            (ServicePayload::TyreRotation(p), ServicePayloadPatch::TyreRotation(t)) => {
                if let Some(pattern) = t.pattern {
                    p.pattern = Some(pattern);
                }
                if let Some(complaint) = &t.complaint {
                    p.complaint = complaint.clone();
                }
            }
            _ => {}
        }
    }
}

// ──────────────────────────────────────────────
// Patches
// ──────────────────────────────────────────────

/// Partial update for a tyre inspection payload. `condition` entries are
/// merged per position; `flagged` replaces the whole toggle set when present
/// (the presentation layer submits the current set state, not deltas).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TyreInspectionPatch {
    pub condition: BTreeMap<TyrePosition, ConditionGrade>,
    pub flagged: Option<BTreeSet<TyrePosition>>,
    pub complaint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelAlignmentPatch {
    pub kind: Option<AlignmentKind>,
    pub complaint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelBalancingPatch {
    pub front_left: Option<Decimal>,
    pub front_right: Option<Decimal>,
    pub rear_left: Option<Decimal>,
    pub rear_right: Option<Decimal>,
    pub complaint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PucCheckPatch {
    pub fuel: Option<FuelType>,
    pub complaint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarWashPatch {
    pub package: Option<WashPackage>,
    pub complaint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryCheckPatch {
    pub condition: Option<ConditionGrade>,
    pub complaint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OilChangePatch {
    pub grade: Option<OilGrade>,
    pub complaint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TyreRotationPatch {
    pub pattern: Option<RotationPattern>,
    pub complaint: Option<String>,
}

/// A partial update for one service's payload, tagged by service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum ServicePayloadPatch {
    TyreInspection(TyreInspectionPatch),
    WheelAlignment(WheelAlignmentPatch),
    WheelBalancing(WheelBalancingPatch),
    PucCheck(PucCheckPatch),
    CarWash(CarWashPatch),
    BatteryCheck(BatteryCheckPatch),
    OilChange(OilChangePatch),
    TyreRotation(TyreRotationPatch),
}

impl ServicePayloadPatch {
    /// The service this patch targets.
    pub fn code(&self) -> ServiceCode {
        match self {
            ServicePayloadPatch::TyreInspection(_) => ServiceCode::TyreInspection,
            ServicePayloadPatch::WheelAlignment(_) => ServiceCode::WheelAlignment,
            ServicePayloadPatch::WheelBalancing(_) => ServiceCode::WheelBalancing,
            ServicePayloadPatch::PucCheck(_) => ServiceCode::PucCheck,
            ServicePayloadPatch::CarWash(_) => ServiceCode::CarWash,
            ServicePayloadPatch::BatteryCheck(_) => ServiceCode::BatteryCheck,
            ServicePayloadPatch::OilChange(_) => ServiceCode::OilChange,
            ServicePayloadPatch::TyreRotation(_) => ServiceCode::TyreRotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn apply_merges_only_present_fields() {
        let mut payload = ServicePayload::WheelBalancing(WheelBalancingPayload {
            weights: WheelWeights {
                front_left: Some(Decimal::new(120, 0)),
                ..WheelWeights::default()
            },
            complaint: "vibration at speed".to_string(),
        });

        payload.apply(&ServicePayloadPatch::WheelBalancing(WheelBalancingPatch {
            rear_left: Some(Decimal::new(80, 0)),
            ..WheelBalancingPatch::default()
        }));

        let ServicePayload::WheelBalancing(p) = &payload else {
            panic!("variant changed");
        };
        assert_eq!(p.weights.front_left, Some(Decimal::new(120, 0)));
        assert_eq!(p.weights.rear_left, Some(Decimal::new(80, 0)));
        assert_eq!(p.weights.front_right, None);
        assert_eq!(p.complaint, "vibration at speed");
    }

    #[test]
    fn tyre_condition_entries_merge_per_position() {
        let mut payload = ServicePayload::TyreInspection(TyreInspectionPayload::default());

        payload.apply(&ServicePayloadPatch::TyreInspection(TyreInspectionPatch {
            condition: BTreeMap::from([(TyrePosition::FrontLeft, ConditionGrade::Good)]),
            ..TyreInspectionPatch::default()
        }));
        payload.apply(&ServicePayloadPatch::TyreInspection(TyreInspectionPatch {
            condition: BTreeMap::from([(TyrePosition::RearRight, ConditionGrade::Worn)]),
            flagged: Some(BTreeSet::from([TyrePosition::RearRight])),
            ..TyreInspectionPatch::default()
        }));

        let ServicePayload::TyreInspection(p) = &payload else {
            panic!("variant changed");
        };
        assert_eq!(
            p.condition.get(&TyrePosition::FrontLeft),
            Some(&ConditionGrade::Good)
        );
        assert_eq!(
            p.condition.get(&TyrePosition::RearRight),
            Some(&ConditionGrade::Worn)
        );
        assert!(p.flagged.contains(&TyrePosition::RearRight));
    }

    #[test]
    fn mismatched_patch_is_a_no_op() {
        let mut payload = ServicePayload::CarWash(CarWashPayload::default());
        payload.apply(&ServicePayloadPatch::PucCheck(PucCheckPatch {
            fuel: Some(FuelType::Petrol),
            complaint: None,
        }));
        assert_eq!(payload, ServicePayload::CarWash(CarWashPayload::default()));
    }
}
