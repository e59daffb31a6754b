//! Directional lobes of color influence
//!
//! Four fixed axis angles carve the field into regions of influence:
//! octave at +90 deg, tonic at -90 deg, and the fifth's two lobes at 0
//! and 180 deg. A partial's weight at a point falls off as a raised
//! cosine of angular distance, with reach (spread) and falloff exponent
//! (sharpen) driven by that partial's signed error: tight material
//! pinpoints, slack material spreads.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::types::{Partial, TuningErrors};

/// Base angular reach of a lobe before the spread factor
pub const MAX_ANGLE_BASE: f64 = PI / 4.5;

/// Error magnitude at which spread/sharpen responses saturate
const RESPONSE_SATURATION_HZ: f64 = 30.0;

/// Below this weight sum the point falls back to its nearest axis
pub const WEIGHT_EPSILON: f64 = 1e-6;

const LOBE_OCTAVE: f64 = FRAC_PI_2;
const LOBE_TONIC: f64 = -FRAC_PI_2;
const LOBE_FIFTH_RIGHT: f64 = 0.0;
const LOBE_FIFTH_LEFT: f64 = PI;

/// Absolute angular distance on the circle, in [0, pi]
fn angular_distance(a: f64, b: f64) -> f64 {
    let mut d = (a - b).rem_euclid(2.0 * PI);
    if d > PI {
        d = 2.0 * PI - d;
    }
    d
}

/// Spread factor for a signed error
///
/// Over-tension (positive) narrows the lobe toward the 0.6 floor;
/// under-tension (negative) widens it toward 1.5.
pub fn spread_for(error: f64) -> f64 {
    let response = (error.abs() / RESPONSE_SATURATION_HZ).min(1.0);
    if error > 0.0 {
        1.0 - 0.4 * response
    } else if error < 0.0 {
        1.0 + 0.5 * response
    } else {
        1.0
    }
}

/// Falloff exponent for a signed error
///
/// Over-tension sharpens the hot spot (up to 3.0); under-tension softens
/// it (down to 0.5).
pub fn sharpen_for(error: f64) -> f64 {
    let response = (error.abs() / RESPONSE_SATURATION_HZ).min(1.0);
    if error > 0.0 {
        1.0 + 2.0 * response
    } else if error < 0.0 {
        1.0 - 0.5 * response
    } else {
        1.0
    }
}

/// Weight of one lobe at an angular distance, for a partial's error
pub fn lobe_weight(delta: f64, error: f64) -> f64 {
    let max_angle = MAX_ANGLE_BASE * spread_for(error);
    if delta >= max_angle {
        return 0.0;
    }
    (delta / max_angle * FRAC_PI_2).cos().powf(sharpen_for(error))
}

/// Per-partial lobe weights at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LobeWeights {
    pub tonic: f64,
    pub octave: f64,
    pub fifth: f64,
}

impl LobeWeights {
    pub fn sum(&self) -> f64 {
        self.tonic + self.octave + self.fifth
    }

    /// Damp the fifth near a dominant pole lobe
    ///
    /// Past the dominance threshold the fifth's residual reach shows up
    /// as radial striping at the poles; its weight collapses linearly to
    /// zero as the pole lobe approaches full dominance.
    pub fn apply_anti_bleed(&mut self, threshold: f64) {
        let dominance = self.tonic.max(self.octave);
        if dominance > threshold {
            self.fifth *= ((1.0 - dominance) * 3.0).max(0.0);
        }
    }
}

/// Compute all three partial weights at an aspect-normalized angle
///
/// The fifth owns two opposite lobes; its weight is the larger of the
/// two so either side of the field reads as fifth territory.
pub fn partial_weights(phi: f64, errors: &TuningErrors) -> LobeWeights {
    LobeWeights {
        tonic: lobe_weight(angular_distance(phi, LOBE_TONIC), errors.tonic),
        octave: lobe_weight(angular_distance(phi, LOBE_OCTAVE), errors.octave),
        fifth: lobe_weight(angular_distance(phi, LOBE_FIFTH_RIGHT), errors.fifth)
            .max(lobe_weight(angular_distance(phi, LOBE_FIFTH_LEFT), errors.fifth)),
    }
}

/// The axis nearest to an angle, for the angular-gap fallback
pub fn nearest_partial(phi: f64) -> Partial {
    let candidates = [
        (Partial::Tonic, angular_distance(phi, LOBE_TONIC)),
        (Partial::Octave, angular_distance(phi, LOBE_OCTAVE)),
        (
            Partial::Fifth,
            angular_distance(phi, LOBE_FIFTH_RIGHT).min(angular_distance(phi, LOBE_FIFTH_LEFT)),
        ),
    ];

    let mut nearest = Partial::Tonic;
    let mut best = f64::INFINITY;
    for (partial, distance) in candidates {
        if distance < best {
            best = distance;
            nearest = partial;
        }
    }
    nearest
}
