//! Tension Color-Field Renderer
//!
//! Maps each sampled surface point to an RGB tension color. Stateless
//! across calls — every point is a pure function of (point, errors,
//! strike coordinate) — so the full field is a rayon parallel map with
//! no behavioral difference from the sequential loop.
//!
//! Per point:
//! 1. Dimple check: inside the dimple the surface is inert — neutral
//!    dark gray driven only by resting height.
//! 2. Lobe weights for the three partials, error-driven spread/sharpen.
//! 3. Anti-bleed damping of the fifth near a dominant pole.
//! 4. Normalize, or fall back to the nearest axis in angular gaps.
//! 5. Mix the raw signed errors by weight, colorize once — opposing
//!    errors cancel to green instead of muddying.
//! 6. Spotlight brightness boost around the active strike coordinate.

pub mod lobes;
pub mod palette;

pub use lobes::{partial_weights, LobeWeights, WEIGHT_EPSILON};
pub use palette::colorize;

use rayon::prelude::*;

use crate::geometry::{aspect_angle, StrikeCoordinate, SurfacePoint};
use crate::types::{Rgb, TuningErrors};

// Dimple shading: flat base plus a gentle height-following modulation,
// clamped so the dimple never reads as hot or fully black.
const DIMPLE_BASE_SHADE: f64 = 0.20;
const DIMPLE_HEIGHT_GAIN: f64 = 1.2;
const DIMPLE_SHADE_MIN: f64 = 0.08;
const DIMPLE_SHADE_MAX: f64 = 0.35;

/// Tension color of a single sampled point
pub fn color_at(
    point: &SurfacePoint,
    errors: &TuningErrors,
    strike: Option<&StrikeCoordinate>,
) -> Rgb {
    let rendering = &crate::config::get().rendering;

    // The dimple is inert: no tension reading, no spotlight.
    if point.radius < rendering.dimple_radius {
        return dimple_shade(point.height);
    }

    let phi = aspect_angle(point.x, point.y);
    let mut weights = partial_weights(phi, errors);
    weights.apply_anti_bleed(rendering.anti_bleed_threshold);

    let sum = weights.sum();
    let base = if sum > WEIGHT_EPSILON {
        // Mix raw signed values, then colorize once.
        let mixed = (weights.tonic * errors.tonic
            + weights.octave * errors.octave
            + weights.fifth * errors.fifth)
            / sum;
        colorize(mixed)
    } else {
        // Angular gap between lobes: take the nearest axis's color so no
        // point is ever left uncolored.
        colorize(errors.error_of(lobes::nearest_partial(phi)))
    };

    match strike {
        Some(coordinate) => base.scaled(spotlight_boost(point, coordinate)),
        None => base,
    }
}

/// Compute the full color field, one color per point, order preserved
pub fn compute_color_field(
    points: &[SurfacePoint],
    errors: &TuningErrors,
    strike: Option<&StrikeCoordinate>,
) -> Vec<Rgb> {
    points
        .par_iter()
        .map(|point| color_at(point, errors, strike))
        .collect()
}

/// Neutral dimple gray, driven only by resting height
fn dimple_shade(height: f64) -> Rgb {
    let shade =
        (DIMPLE_BASE_SHADE + DIMPLE_HEIGHT_GAIN * height).clamp(DIMPLE_SHADE_MIN, DIMPLE_SHADE_MAX);
    Rgb::gray(shade)
}

/// Brightness multiplier for the strike spotlight
///
/// Quadratic falloff: peak 1 + gain at the coordinate, exactly 1.0 at
/// the spotlight radius, no effect beyond.
fn spotlight_boost(point: &SurfacePoint, coordinate: &StrikeCoordinate) -> f64 {
    let rendering = &crate::config::get().rendering;
    let distance = coordinate.distance_to(point.x, point.y);
    if distance >= rendering.spotlight_radius {
        return 1.0;
    }
    let falloff = distance / rendering.spotlight_radius;
    1.0 + rendering.spotlight_gain * (1.0 - falloff * falloff)
}
