//! Error-to-color mapping for the tension field
//!
//! One canonical curve. Zones on |error|:
//! - <= 1.0 Hz: pure green at full brightness (in tune)
//! - 1.0 - 5.0 Hz: blend green toward red (sharp) or blue (flat)
//! - 5.0 - 30.0 Hz: pure red/blue with the brightness ramp continuing;
//!   clamped above 30.
//!
//! Hue and brightness are continuous across every zone boundary — that
//! continuity is the contract the heat-map's seam-free look rests on.

use crate::types::Rgb;

/// Errors up to this magnitude read as in tune
pub const IN_TUNE_LIMIT: f64 = 1.0;
/// Upper edge of the green-to-hot blend zone
pub const BLEND_LIMIT: f64 = 5.0;
/// Magnitude at which the color saturates; larger errors clamp here
pub const SATURATION_LIMIT: f64 = 30.0;

/// Brightness lost between the blend edge and full saturation
const DEEP_ZONE_FADE: f64 = 0.45;

const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);

/// Map a signed error value to its tension color
pub fn colorize(value: f64) -> Rgb {
    let magnitude = value.abs().min(SATURATION_LIMIT);
    let hot = if value >= 0.0 { RED } else { BLUE };

    if magnitude <= IN_TUNE_LIMIT {
        return GREEN;
    }

    if magnitude <= BLEND_LIMIT {
        let t = (magnitude - IN_TUNE_LIMIT) / (BLEND_LIMIT - IN_TUNE_LIMIT);
        return Rgb::lerp(GREEN, hot, t);
    }

    // Deep zone: hue is fixed, brightness keeps ramping down toward the
    // saturation clamp. Starts at exactly 1.0 so the blend-zone exit is
    // seamless.
    let depth = (magnitude - BLEND_LIMIT) / (SATURATION_LIMIT - BLEND_LIMIT);
    hot.scaled(1.0 - DEEP_ZONE_FADE * depth)
}
