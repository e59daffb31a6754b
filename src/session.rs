//! Tuning Session Adapter
//!
//! Thin coordinator between measurement input, the two pure cores, and
//! persistence. Holds the single source of truth (errors, placement
//! override, active strike) and treats every derived value as a cached,
//! invalidate-on-change projection: the prescription and the color field
//! are recomputed wholesale on their own triggers and never mutated in
//! place. Neither core calls the other.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::geometry::{StrikeCoordinate, TonefieldGrid};
use crate::physics;
use crate::rendering;
use crate::types::{Placement, Rgb, Side, StrikePrescription, TuningErrors, TuningRecord};

/// Coordinating adapter owning inputs and cached projections
pub struct TuningSession {
    errors: TuningErrors,
    placement_override: Option<Placement>,
    strike: Option<StrikeCoordinate>,
    side: Side,
    side_rng: StdRng,
    grid: TonefieldGrid,
    // Cached projections; `None` = invalidated, recomputed on next read.
    prescription: Option<Option<StrikePrescription>>,
    color_field: Option<Vec<Rgb>>,
}

impl TuningSession {
    /// Create a session from the global instrument configuration
    pub fn new() -> Self {
        let cfg = crate::config::get();
        let mut side_rng = StdRng::seed_from_u64(cfg.session.side_seed);
        let side = coin_flip(&mut side_rng);
        Self {
            errors: TuningErrors::default(),
            placement_override: None,
            strike: None,
            side,
            side_rng,
            grid: TonefieldGrid::from_config(),
            prescription: None,
            color_field: None,
        }
    }

    /// Create a session around an externally built grid (tests, callers
    /// with their own sampling density)
    pub fn with_grid(grid: TonefieldGrid) -> Self {
        let cfg = crate::config::get();
        let mut side_rng = StdRng::seed_from_u64(cfg.session.side_seed);
        let side = coin_flip(&mut side_rng);
        Self {
            errors: TuningErrors::default(),
            placement_override: None,
            strike: None,
            side,
            side_rng,
            grid,
            prescription: None,
            color_field: None,
        }
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    /// Feed a fresh set of measurements
    ///
    /// Invalidates both projections and re-flips the fifth-lobe side:
    /// each measurement is a new strike decision, but the side then stays
    /// fixed across override/strike tweaks so one reading yields one
    /// stable prescription.
    pub fn set_errors(&mut self, errors: TuningErrors) {
        if errors == self.errors {
            return;
        }
        self.errors = errors;
        self.side = coin_flip(&mut self.side_rng);
        self.prescription = None;
        self.color_field = None;
        debug!(
            tonic = errors.tonic,
            octave = errors.octave,
            fifth = errors.fifth,
            "measurements updated"
        );
    }

    /// Override the derived placement (None restores the default)
    pub fn set_placement_override(&mut self, placement: Option<Placement>) {
        if placement == self.placement_override {
            return;
        }
        self.placement_override = placement;
        self.prescription = None;
    }

    /// Mark the operator's accepted strike coordinate
    pub fn set_strike(&mut self, strike: Option<StrikeCoordinate>) {
        if strike == self.strike {
            return;
        }
        self.strike = strike;
        self.color_field = None;
    }

    pub fn errors(&self) -> TuningErrors {
        self.errors
    }

    pub fn placement_override(&self) -> Option<Placement> {
        self.placement_override
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn grid(&self) -> &TonefieldGrid {
        &self.grid
    }

    // ========================================================================
    // Projections
    // ========================================================================

    /// Current prescription; `None` means the instrument reads in tune
    pub fn prescription(&mut self) -> Option<&StrikePrescription> {
        if self.prescription.is_none() {
            let computed = physics::prescribe(&self.errors, self.placement_override, self.side);
            if let Some(p) = &computed {
                debug!(prescription = %p.summary(), "prescription recomputed");
            }
            self.prescription = Some(computed);
        }
        self.prescription.as_ref().and_then(|p| p.as_ref())
    }

    /// Operator-facing target label; empty when in tune
    pub fn target_label(&mut self) -> String {
        self.prescription()
            .map(|p| p.target.display_label())
            .unwrap_or_default()
    }

    /// Current color field, one entry per grid point
    pub fn color_field(&mut self) -> &[Rgb] {
        if self.color_field.is_none() {
            let field =
                rendering::compute_color_field(self.grid.points(), &self.errors, self.strike.as_ref());
            debug!(points = field.len(), "color field recomputed");
            self.color_field = Some(field);
        }
        self.color_field.as_deref().unwrap_or_default()
    }

    /// Displayed surface heights for the current placement
    pub fn displaced_heights(&mut self) -> Vec<f64> {
        let placement = self
            .prescription()
            .map(|p| p.placement)
            .unwrap_or(Placement::Internal);
        self.grid.displaced_heights(placement)
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Snapshot the current prescription as an unsaved record
    ///
    /// Returns `None` while the instrument reads in tune — there is
    /// nothing to replay.
    pub fn record(&mut self) -> Option<TuningRecord> {
        let errors = self.errors;
        let placement_override = self.placement_override;
        let side = self.side;
        let prescription = *self.prescription()?;
        Some(TuningRecord::new(
            errors,
            placement_override,
            side,
            prescription,
        ))
    }

    /// Restore a stored record's inputs
    ///
    /// Recomputing after a restore reproduces the stored coordinate,
    /// strength, repeat count and technique exactly: the record carries
    /// the side choice, the one random degree of freedom.
    pub fn restore(&mut self, record: &TuningRecord) {
        self.errors = record.errors;
        self.placement_override = record.placement_override;
        self.side = record.side;
        self.prescription = None;
        self.color_field = None;
        info!(id = record.id, "session restored from record");
    }
}

impl Default for TuningSession {
    fn default() -> Self {
        Self::new()
    }
}

/// One coin flip on the session's seeded RNG
fn coin_flip(rng: &mut StdRng) -> Side {
    if rng.gen::<bool>() {
        Side::Left
    } else {
        Side::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ReliefProfile;

    fn init_config() {
        crate::config::init(crate::config::InstrumentConfig::default());
    }

    fn session() -> TuningSession {
        init_config();
        TuningSession::with_grid(TonefieldGrid::sample(ReliefProfile::default(), 16, 8))
    }

    #[test]
    fn test_in_tune_session_has_empty_label() {
        let mut s = session();
        assert!(s.prescription().is_none());
        assert_eq!(s.target_label(), "");
    }

    #[test]
    fn test_prescription_cache_invalidates_on_errors() {
        let mut s = session();
        s.set_errors(TuningErrors::new(2.0, 0.0, 0.0));
        let first = s.prescription().copied().unwrap();

        s.set_errors(TuningErrors::new(-2.0, 0.0, 0.0));
        let second = s.prescription().copied().unwrap();
        assert_ne!(first.intent, second.intent);
    }

    #[test]
    fn test_color_field_survives_placement_change() {
        let mut s = session();
        s.set_errors(TuningErrors::new(2.0, 0.0, 0.0));
        let before = s.color_field().to_vec();

        // Placement feeds only the prescription projection.
        s.set_placement_override(Some(Placement::Internal));
        assert_eq!(s.color_field(), &before[..]);
    }

    #[test]
    fn test_strike_change_recolors_field() {
        let mut s = session();
        s.set_errors(TuningErrors::new(0.0, 0.0, 6.0));
        let unlit = s.color_field().to_vec();

        let strike = StrikeCoordinate::new(0.25, 0.0).unwrap();
        s.set_strike(Some(strike));
        let lit = s.color_field().to_vec();
        assert_ne!(unlit, lit, "spotlight must change the field");
    }

    #[test]
    fn test_record_restore_round_trip() {
        let mut s = session();
        s.set_errors(TuningErrors::new(0.0, -7.0, 3.0));
        s.set_placement_override(Some(Placement::External));
        let record = s.record().unwrap();

        // Scramble the session, then restore.
        s.set_errors(TuningErrors::new(9.0, 9.0, 9.0));
        s.set_placement_override(None);
        s.restore(&record);

        let replayed = s.prescription().copied().unwrap();
        assert_eq!(replayed, record.prescription);
    }

    #[test]
    fn test_side_is_reproducible_across_sessions() {
        init_config();
        let mut a = TuningSession::with_grid(TonefieldGrid::sample(ReliefProfile::default(), 8, 4));
        let mut b = TuningSession::with_grid(TonefieldGrid::sample(ReliefProfile::default(), 8, 4));
        for _ in 0..16 {
            a.set_errors(TuningErrors::new(0.0, 0.0, 1.0));
            a.set_errors(TuningErrors::new(0.0, 0.0, 2.0));
            b.set_errors(TuningErrors::new(0.0, 0.0, 1.0));
            b.set_errors(TuningErrors::new(0.0, 0.0, 2.0));
            assert_eq!(a.side(), b.side(), "same seed must flip the same way");
        }
    }
}
