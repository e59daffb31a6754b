//! Tonefield geometry
//!
//! The struck surface is modeled as an ellipse with semi-axes 0.3 (X) and
//! 0.425 (Y) and a central dimple. This module owns the surface constants,
//! the validated `StrikeCoordinate` (the only way a strike point enters
//! the core), and the cacheable sampled grid used by the color-field
//! renderer.

mod grid;

pub use grid::{ReliefProfile, SurfacePoint, TonefieldGrid};

use serde::{Deserialize, Serialize};

/// Horizontal semi-axis of the tonefield ellipse
pub const SEMI_AXIS_X: f64 = 0.3;

/// Vertical semi-axis of the tonefield ellipse
pub const SEMI_AXIS_Y: f64 = 0.425;

/// Geometry domain errors
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("point ({x:.4}, {y:.4}) lies outside the tonefield ellipse")]
    OutsideSurface { x: f64, y: f64 },
}

/// Aspect-normalized radius: 1.0 on the ellipse boundary, < 1.0 inside
pub fn normalized_radius(x: f64, y: f64) -> f64 {
    let nx = x / SEMI_AXIS_X;
    let ny = y / SEMI_AXIS_Y;
    (nx * nx + ny * ny).sqrt()
}

/// Angle of a point with ellipse distortion removed
///
/// Computed from aspect-normalized coordinates so the four lobe regions
/// keep their nominal angular extents instead of being squeezed by the
/// ellipse aspect ratio.
pub fn aspect_angle(x: f64, y: f64) -> f64 {
    (y / SEMI_AXIS_Y).atan2(x / SEMI_AXIS_X)
}

// ============================================================================
// Strike Coordinate
// ============================================================================

/// A point on the tonefield accepted as a strike location
///
/// The constructor is the coordinate picker's validation gate: a point
/// outside `(x/0.3)^2 + (y/0.425)^2 <= 1` is rejected and never reaches
/// the prescription engine or the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawCoordinate")]
pub struct StrikeCoordinate {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    x: f64,
    y: f64,
}

impl TryFrom<RawCoordinate> for StrikeCoordinate {
    type Error = GeometryError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        StrikeCoordinate::new(raw.x, raw.y)
    }
}

impl StrikeCoordinate {
    /// Validate and construct; rejects points outside the ellipse
    pub fn new(x: f64, y: f64) -> Result<Self, GeometryError> {
        // Small tolerance so boundary points produced by cos/sin round-trips
        // are not rejected on floating-point dust.
        if normalized_radius(x, y) > 1.0 + 1e-9 {
            return Err(GeometryError::OutsideSurface { x, y });
        }
        Ok(Self { x, y })
    }

    /// Construct from a parametric boundary angle; always in-domain
    pub(crate) fn from_parametric(theta: f64) -> Self {
        Self {
            x: SEMI_AXIS_X * theta.cos(),
            y: SEMI_AXIS_Y * theta.sin(),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Aspect-normalized radius of this coordinate
    pub fn normalized_radius(&self) -> f64 {
        normalized_radius(self.x, self.y)
    }

    /// Euclidean distance to an arbitrary point
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}
