//! Hit-Point Prescription Engine
//!
//! Deterministic decision/physics model mapping three signed tuning
//! errors to a complete strike prescription. All math here is pure —
//! no I/O, no shared state, no failure modes for finite input.
//!
//! Pipeline per call:
//! - `select_target()` — weighted-score primary + coupled auxiliary
//! - intent and default placement from the primary's sign
//! - `strike_coordinate()` — aim vector, angular mask, ellipse boundary
//! - `plan_force()` — efficiency, energy, repeat-count split, safety blend
//! - `technique_for()` — snap/pull/press table

pub mod strike_models;
pub mod target;

pub use strike_models::{
    angular_mask, axis_efficiency, plan_force, smoothstep, strike_coordinate, technique_for,
    ForcePlan,
};
pub use target::select_target;

use crate::types::{Intent, Placement, Side, StrikePrescription, TuningErrors};

/// Produce the complete strike prescription for one set of readings
///
/// `None` means the instrument reads in tune (all errors zero) — a
/// defined terminal state, not an error. `side` is the one free degree
/// of freedom (left vs right fifth lobe); callers that want the
/// documented coin flip inject a seeded choice, callers replaying a
/// stored record inject the recorded one.
pub fn prescribe(
    errors: &TuningErrors,
    placement_override: Option<Placement>,
    side: Side,
) -> Option<StrikePrescription> {
    let target = select_target(errors)?;

    let primary_error = errors.error_of(target.primary);
    let intent = if primary_error > 0.0 {
        Intent::Lower
    } else {
        Intent::Raise
    };
    let placement = placement_override.unwrap_or_else(|| Placement::default_for(intent));

    let coordinate = strike_coordinate(&target, errors, side);
    let efficiency = axis_efficiency(target.primary, &coordinate);
    let plan = plan_force(target.primary, primary_error.abs(), efficiency);
    let technique = technique_for(primary_error.abs(), placement);

    Some(StrikePrescription {
        target,
        intent,
        placement,
        coordinate,
        strength: plan.strength,
        repeat_count: plan.repeat_count,
        technique,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Partial, Technique};

    fn init_config() {
        crate::config::init(crate::config::InstrumentConfig::default());
    }

    #[test]
    fn test_all_zero_is_empty() {
        init_config();
        let result = prescribe(&TuningErrors::default(), None, Side::Right);
        assert!(result.is_none(), "in-tune readings prescribe nothing");
    }

    #[test]
    fn test_sharp_primary_lowers_on_the_rim() {
        init_config();
        let errors = TuningErrors::new(3.0, 0.0, 0.0);
        let p = prescribe(&errors, None, Side::Right).unwrap();
        assert_eq!(p.intent, Intent::Lower);
        assert_eq!(p.placement, Placement::External);
    }

    #[test]
    fn test_flat_primary_raises_inside() {
        init_config();
        let errors = TuningErrors::new(-3.0, 0.0, 0.0);
        let p = prescribe(&errors, None, Side::Right).unwrap();
        assert_eq!(p.intent, Intent::Raise);
        assert_eq!(p.placement, Placement::Internal);
    }

    #[test]
    fn test_placement_override_wins() {
        init_config();
        let errors = TuningErrors::new(3.0, 0.0, 0.0);
        let p = prescribe(&errors, Some(Placement::Internal), Side::Right).unwrap();
        assert_eq!(p.intent, Intent::Lower, "override changes placement, not intent");
        assert_eq!(p.placement, Placement::Internal);
    }

    #[test]
    fn test_pure_fifth_example() {
        init_config();
        // errors = {tonic: 0, octave: 0, fifth: 10}, Internal placement
        let errors = TuningErrors::new(0.0, 0.0, 10.0);
        let p = prescribe(&errors, Some(Placement::Internal), Side::Right).unwrap();
        assert_eq!(p.target.primary, Partial::Fifth);
        assert!(p.coordinate.x().abs() < 3.0, "masked aim stays well under 0.3 * 10");
        assert!(p.coordinate.x().abs() <= 0.3 + 1e-9);
        assert_eq!(p.technique, Technique::Press, "10 Hz internal is a press");
    }

    #[test]
    fn test_extreme_tonic_respects_force_limit() {
        init_config();
        let errors = TuningErrors::new(1000.0, 0.0, 0.0);
        let p = prescribe(&errors, None, Side::Right).unwrap();
        assert!(p.strength <= 42.0 + 1e-9);
        assert!(p.repeat_count >= 1);
    }

    #[test]
    fn test_prescription_is_deterministic_for_fixed_side() {
        init_config();
        let errors = TuningErrors::new(1.5, -0.4, 2.5);
        let a = prescribe(&errors, None, Side::Left).unwrap();
        let b = prescribe(&errors, None, Side::Left).unwrap();
        assert_eq!(a, b);
    }
}
