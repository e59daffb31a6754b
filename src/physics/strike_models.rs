//! Strike physics models: aim geometry, energy, force splitting, technique
//!
//! Key calculations for turning a selected target into a concrete strike:
//! - Aim vector and angular mask (where on the rim to hit)
//! - Coordinate-projection efficiency
//! - Energy -> force conversion with repeat-count splitting
//! - Continuous safety blend near the force ceiling
//! - Technique table

use crate::geometry::{StrikeCoordinate, SEMI_AXIS_X, SEMI_AXIS_Y};
use crate::types::{Partial, Placement, Side, TargetSelection, Technique, TuningErrors};

// Technique magnitude boundaries, in Hz of primary error
const SNAP_LIMIT_INTERNAL: f64 = 1.0;
const PULL_LIMIT_INTERNAL: f64 = 10.0;
const SNAP_LIMIT_EXTERNAL: f64 = 5.0;

// ============================================================================
// Aim Geometry
// ============================================================================

/// Hermite smoothstep between two edges
///
/// Returns 0 below `edge0`, 1 above `edge1`, and `3t^2 - 2t^3` between.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Damping applied to the aim vector's X component
///
/// `1 - sin(|theta|)`: full strength on the horizontal axis, zero at the
/// poles. Keeps fifth-axis energy from leaking into strikes aimed near
/// the vertical partials.
pub fn angular_mask(theta: f64) -> f64 {
    1.0 - theta.abs().sin()
}

/// Compute the strike coordinate for a selected target
///
/// The axis aligned with the primary gets magnitude |primary error|
/// (fifth on X, tonic toward the bottom pole, octave toward the top); the
/// perpendicular axis gets the auxiliary's magnitude, or zero without
/// one. The X sign is the injected side choice — the fifth's two lobes
/// are physically equivalent. After masking the X component, the final
/// angle lands the strike on the ellipse boundary.
pub fn strike_coordinate(
    target: &TargetSelection,
    errors: &TuningErrors,
    side: Side,
) -> StrikeCoordinate {
    let mut vx = 0.0;
    let mut vy = 0.0;

    for partial in [Some(target.primary), target.auxiliary].into_iter().flatten() {
        let magnitude = errors.error_of(partial).abs();
        if partial.is_horizontal() {
            vx = magnitude * side.x_sign();
        } else {
            vy = magnitude * partial.axis_sign();
        }
    }

    let raw_theta = vy.atan2(vx);
    let masked_vx = vx * angular_mask(raw_theta);
    let theta = vy.atan2(masked_vx);

    StrikeCoordinate::from_parametric(theta)
}

/// Efficiency of a coordinate for correcting a primary partial
///
/// The projection of the strike onto the primary's axis, normalized by
/// that axis's radius and floored so an off-axis strike still transfers
/// a bounded multiple of the nominal energy.
pub fn axis_efficiency(primary: Partial, coordinate: &StrikeCoordinate) -> f64 {
    let projection = if primary.is_horizontal() {
        coordinate.x().abs() / SEMI_AXIS_X
    } else {
        coordinate.y().abs() / SEMI_AXIS_Y
    };
    projection.max(crate::config::get().physics.min_efficiency)
}

// ============================================================================
// Force Planning
// ============================================================================

/// Force and repeat count for one prescription
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForcePlan {
    pub strength: f64,
    pub repeat_count: u32,
}

/// Convert a frequency error into strike force and repeat count
///
/// `effective_hz = |error| / efficiency` feeds a square-root energy model
/// scaled by the partial's stiffness. When a single strike would exceed
/// the force limit, the energy is split across the smallest repeat count
/// whose per-strike force fits; if even the configured maximum count does
/// not suffice, the force is clamped at the limit (safety-limit
/// exhaustion is a domain result, not a fault).
///
/// A continuous smoothstep blend pulls forces in the top 20% band toward
/// the limit so the step function of the count search never shows as a
/// visible jump in prescribed force.
pub fn plan_force(primary: Partial, abs_hz: f64, efficiency: f64) -> ForcePlan {
    let physics = &crate::config::get().physics;

    let effective_hz = abs_hz / efficiency;
    let pure_energy = (effective_hz * physics.energy_scale * physics.stiffness(primary)).sqrt();

    let mut strength = physics.base_force + pure_energy;
    let mut repeat_count = 1u32;

    if strength > physics.force_limit {
        let mut split_found = false;
        for count in 2..=physics.max_strike_count {
            let split_force = physics.base_force + pure_energy / (count as f64).sqrt();
            if split_force <= physics.force_limit {
                strength = split_force;
                repeat_count = count;
                split_found = true;
                break;
            }
        }
        if !split_found {
            repeat_count = physics.max_strike_count;
            let capped = physics.base_force + pure_energy / (physics.max_strike_count as f64).sqrt();
            strength = capped.min(physics.force_limit);
        }
    }

    let t = smoothstep(0.8 * physics.force_limit, physics.force_limit, strength);
    strength = strength * (1.0 - t) + physics.force_limit * t;

    ForcePlan { strength, repeat_count }
}

// ============================================================================
// Technique
// ============================================================================

/// Technique for a primary error magnitude and placement
///
/// Internal strikes escalate snap -> pull -> press. External strikes skip
/// pull entirely: a drawn stroke on the rim side cannot be controlled.
pub fn technique_for(abs_hz: f64, placement: Placement) -> Technique {
    match placement {
        Placement::Internal => {
            if abs_hz <= SNAP_LIMIT_INTERNAL {
                Technique::Snap
            } else if abs_hz < PULL_LIMIT_INTERNAL {
                Technique::Pull
            } else {
                Technique::Press
            }
        }
        Placement::External => {
            if abs_hz <= SNAP_LIMIT_EXTERNAL {
                Technique::Snap
            } else {
                Technique::Press
            }
        }
    }
}
