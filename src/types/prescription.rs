//! Prescription types: TargetSelection, StrikePrescription

use serde::{Deserialize, Serialize};

use crate::geometry::StrikeCoordinate;

use super::{Intent, Partial, Placement, Technique};

// ============================================================================
// Target Selection
// ============================================================================

/// The partial chosen for correction, plus an optional coupled auxiliary
///
/// Invariants (enforced by the prescription engine, relied on everywhere):
/// - auxiliary is `Fifth` only when primary is `Tonic` or `Octave`
/// - auxiliary is `Tonic`/`Octave` only when primary is `Fifth`
/// - auxiliary's error is nonzero and shares primary's sign
/// - tonic and octave are never mutually auxiliary (shared axis)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetSelection {
    pub primary: Partial,
    pub auxiliary: Option<Partial>,
}

impl TargetSelection {
    pub fn solo(primary: Partial) -> Self {
        Self { primary, auxiliary: None }
    }

    pub fn coupled(primary: Partial, auxiliary: Partial) -> Self {
        Self { primary, auxiliary: Some(auxiliary) }
    }

    /// Operator-facing label, e.g. "Tonic" or "Fifth + Octave"
    pub fn display_label(&self) -> String {
        match self.auxiliary {
            Some(aux) => format!("{} + {}", self.primary, aux),
            None => self.primary.to_string(),
        }
    }
}

impl std::fmt::Display for TargetSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

// ============================================================================
// Strike Prescription
// ============================================================================

/// Complete instruction for the next corrective strike
///
/// Produced wholesale by the prescription engine from one set of tuning
/// errors; never incrementally mutated. `strength` never exceeds the
/// configured force limit, and `repeat_count` is at least 1 — when a
/// single strike would exceed the limit, the energy is split across
/// repeats instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StrikePrescription {
    pub target: TargetSelection,
    pub intent: Intent,
    pub placement: Placement,
    pub coordinate: StrikeCoordinate,
    pub strength: f64,
    pub repeat_count: u32,
    pub technique: Technique,
}

impl StrikePrescription {
    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{} {} [{}] at ({:.3}, {:.3}) force {:.1} x{} ({})",
            self.intent,
            self.target.display_label(),
            self.placement,
            self.coordinate.x(),
            self.coordinate.y(),
            self.strength,
            self.repeat_count,
            self.technique,
        )
    }
}
