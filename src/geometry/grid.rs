//! Sampled tonefield grid with precomputed resting relief

use serde::{Deserialize, Serialize};

use crate::types::Placement;

use super::{SEMI_AXIS_X, SEMI_AXIS_Y};

// ============================================================================
// Relief Profile
// ============================================================================

/// Resting-surface relief of the tonefield
///
/// Radial cosine wave: `z(r) = scale * amplitude * cos(frequency * r * pi)`
/// with `amplitude = 1 - 0.9 * tension`. High tension flattens the shell,
/// low tension leaves it wavy; `scale` maps the unit wave into surface
/// units so the relief stays small next to the 0.3/0.425 semi-axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReliefProfile {
    /// Overall membrane tension, 0.0 (slack) to 1.0 (tight)
    pub tension: f64,
    /// Radial wave frequency
    pub frequency: f64,
    /// Height scale in surface units
    pub scale: f64,
}

impl ReliefProfile {
    pub fn new(tension: f64, frequency: f64, scale: f64) -> Self {
        Self { tension, frequency, scale }
    }

    /// Build from the global instrument configuration
    pub fn from_config() -> Self {
        let surface = &crate::config::get().surface;
        Self::new(surface.tension, surface.frequency, surface.height_scale)
    }

    /// Wave amplitude after tension flattening
    pub fn amplitude(&self) -> f64 {
        1.0 - 0.9 * self.tension.clamp(0.0, 1.0)
    }

    /// Resting height at an aspect-normalized radius
    pub fn height_at(&self, radius: f64) -> f64 {
        self.scale * self.amplitude() * (self.frequency * radius * std::f64::consts::PI).cos()
    }
}

impl Default for ReliefProfile {
    fn default() -> Self {
        Self { tension: 0.5, frequency: 1.0, scale: 0.08 }
    }
}

// ============================================================================
// Surface Points
// ============================================================================

/// One sampled point of the tonefield surface
///
/// `radius` is aspect-normalized (1.0 on the ellipse boundary) and
/// `height` is the undisplaced resting height from the relief profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub height: f64,
}

/// Fixed, cacheable discretization of the tonefield ellipse
///
/// Built once and shared; the color-field renderer maps over `points()`
/// and has no other state. The stored heights are the one-time cached
/// undisplaced copy that lets `displaced_heights` flip the dimple's
/// visual direction reversibly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TonefieldGrid {
    points: Vec<SurfacePoint>,
    angular: usize,
    radial: usize,
}

impl TonefieldGrid {
    /// Sample the ellipse on an angular x radial lattice
    ///
    /// Radial stations sit at ring centers `(j + 0.5) / radial` so the
    /// degenerate center point is never duplicated `angular` times.
    pub fn sample(profile: ReliefProfile, angular: usize, radial: usize) -> Self {
        let mut points = Vec::with_capacity(angular * radial);

        for j in 0..radial {
            let r = (j as f64 + 0.5) / radial as f64;
            let height = profile.height_at(r);
            for i in 0..angular {
                let a = i as f64 / angular as f64 * std::f64::consts::TAU;
                points.push(SurfacePoint {
                    x: SEMI_AXIS_X * r * a.cos(),
                    y: SEMI_AXIS_Y * r * a.sin(),
                    radius: r,
                    height,
                });
            }
        }

        Self { points, angular, radial }
    }

    /// Sample using the global instrument configuration
    pub fn from_config() -> Self {
        let cfg = crate::config::get();
        Self::sample(
            ReliefProfile::from_config(),
            cfg.surface.angular_samples,
            cfg.surface.radial_samples,
        )
    }

    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    pub fn angular_samples(&self) -> usize {
        self.angular
    }

    pub fn radial_samples(&self) -> usize {
        self.radial
    }

    /// Heights as displayed for the given placement
    ///
    /// External placement views the dimple from the far side, so the
    /// dimple region's relief is mirrored; everything outside keeps its
    /// resting height. Derived from the cached undisplaced heights, so
    /// the flip is reversible and never accumulates.
    pub fn displaced_heights(&self, placement: Placement) -> Vec<f64> {
        let dimple_radius = crate::config::get().rendering.dimple_radius;
        self.points
            .iter()
            .map(|p| {
                if placement == Placement::External && p.radius < dimple_radius {
                    -p.height
                } else {
                    p.height
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::normalized_radius;

    fn init_config() {
        crate::config::init(crate::config::InstrumentConfig::default());
    }

    #[test]
    fn test_sample_count_and_domain() {
        let grid = TonefieldGrid::sample(ReliefProfile::default(), 64, 32);
        assert_eq!(grid.points().len(), 64 * 32);
        for p in grid.points() {
            let r = normalized_radius(p.x, p.y);
            assert!(r <= 1.0 + 1e-9, "sampled point outside ellipse: r = {}", r);
            assert!((r - p.radius).abs() < 1e-9, "stored radius disagrees with position");
        }
    }

    #[test]
    fn test_heights_follow_relief_profile() {
        let profile = ReliefProfile::default();
        let grid = TonefieldGrid::sample(profile, 16, 8);
        for p in grid.points() {
            assert!((p.height - profile.height_at(p.radius)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tension_flattens_relief() {
        let slack = ReliefProfile::new(0.0, 1.0, 0.08);
        let tight = ReliefProfile::new(1.0, 1.0, 0.08);
        assert!(slack.height_at(0.0).abs() > tight.height_at(0.0).abs());
        assert!((tight.amplitude() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_external_placement_flips_only_dimple() {
        init_config();
        let grid = TonefieldGrid::sample(ReliefProfile::default(), 32, 16);
        let internal = grid.displaced_heights(Placement::Internal);
        let external = grid.displaced_heights(Placement::External);
        let dimple_radius = crate::config::get().rendering.dimple_radius;

        for (p, (hi, he)) in grid.points().iter().zip(internal.iter().zip(external.iter())) {
            if p.radius < dimple_radius {
                assert_eq!(*he, -*hi, "dimple height must mirror under external placement");
            } else {
                assert_eq!(*he, *hi, "outer field must not move with placement");
            }
        }

        // Reversible: flipping twice restores the resting heights.
        assert_eq!(internal, grid.points().iter().map(|p| p.height).collect::<Vec<_>>());
    }
}
