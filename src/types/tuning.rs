//! Core tuning types: Partial, TuningErrors, Intent, Placement, Technique, Side

use serde::{Deserialize, Serialize};

// ============================================================================
// Partials
// ============================================================================

/// One of the three tunable partials of a tonefield
///
/// Each partial carries an independent signed frequency error. Tonic and
/// octave share the vertical structural axis of the field (with opposite
/// sign conventions); the fifth lives on the horizontal axis with a lobe
/// on either side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Partial {
    Tonic,
    Octave,
    Fifth,
}

impl Partial {
    /// All partials in canonical order (also the tie-break order)
    pub const ALL: [Partial; 3] = [Partial::Tonic, Partial::Octave, Partial::Fifth];

    /// Selection weight approximating the 1:2:3 harmonic ratios
    pub fn score_weight(&self) -> f64 {
        match self {
            Partial::Tonic => 6.0,
            Partial::Octave => 3.0,
            Partial::Fifth => 2.0,
        }
    }

    /// Whether this partial is aimed along the horizontal (X) axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Partial::Fifth)
    }

    /// Sign of this partial's direction along its own axis
    ///
    /// Tonic points to the bottom pole, octave to the top. The fifth has
    /// no inherent sign (left/right is the injected side choice).
    pub fn axis_sign(&self) -> f64 {
        match self {
            Partial::Tonic => -1.0,
            Partial::Octave => 1.0,
            Partial::Fifth => 1.0,
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Partial::Tonic => "Tonic",
            Partial::Octave => "Octave",
            Partial::Fifth => "Fifth",
        }
    }

    /// Get short code for logging
    pub fn short_code(&self) -> &'static str {
        match self {
            Partial::Tonic => "TON",
            Partial::Octave => "OCT",
            Partial::Fifth => "5TH",
        }
    }
}

impl std::fmt::Display for Partial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Tuning Errors
// ============================================================================

/// Signed frequency errors for the three partials, in Hz
///
/// Positive = over-tensioned (sharp), negative = under-tensioned (flat),
/// zero = in tune. Ephemeral — supplied per computation; every derived
/// value in the crate is a pure projection of one of these.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TuningErrors {
    pub tonic: f64,
    pub octave: f64,
    pub fifth: f64,
}

impl TuningErrors {
    pub fn new(tonic: f64, octave: f64, fifth: f64) -> Self {
        Self { tonic, octave, fifth }
    }

    /// Signed error of a single partial
    pub fn error_of(&self, partial: Partial) -> f64 {
        match partial {
            Partial::Tonic => self.tonic,
            Partial::Octave => self.octave,
            Partial::Fifth => self.fifth,
        }
    }

    /// Selection score of a single partial: |error| x weight
    pub fn score_of(&self, partial: Partial) -> f64 {
        self.error_of(partial).abs() * partial.score_weight()
    }

    /// True when every partial reads exactly in tune
    pub fn all_zero(&self) -> bool {
        self.tonic == 0.0 && self.octave == 0.0 && self.fifth == 0.0
    }
}

// ============================================================================
// Strike Qualifiers
// ============================================================================

/// Whether a strike should raise or lower the target partial's frequency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Intent {
    Raise,
    Lower,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Raise => write!(f, "Raise"),
            Intent::Lower => write!(f, "Lower"),
        }
    }
}

/// Which side of the dimple boundary a strike lands on
///
/// Raising tension strikes the inner region, lowering strikes the rim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Placement {
    Internal,
    External,
}

impl Placement {
    /// Default placement for an intent (override may replace it)
    pub fn default_for(intent: Intent) -> Self {
        match intent {
            Intent::Raise => Placement::Internal,
            Intent::Lower => Placement::External,
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Placement::Internal => write!(f, "Internal"),
            Placement::External => write!(f, "External"),
        }
    }
}

/// Manner of striking, derived from error magnitude and placement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Technique {
    /// Light fingertip tap for fine corrections
    Snap,
    /// Drawn stroke for mid-range corrections (internal only)
    Pull,
    /// Full sustained press for coarse corrections
    Press,
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Technique::Snap => write!(f, "Snap"),
            Technique::Pull => write!(f, "Pull"),
            Technique::Press => write!(f, "Press"),
        }
    }
}

/// Left/right choice for the fifth's horizontal lobe
///
/// Both lobes tune the fifth equally well, so when nothing disambiguates
/// the aim vector's X sign, the choice is a coin flip. It is an explicit,
/// injectable input (the session draws it from a seeded RNG) so that
/// stored prescriptions can be reproduced exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Right,
    Left,
}

impl Side {
    /// Sign applied to the aim vector's X component
    pub fn x_sign(&self) -> f64 {
        match self {
            Side::Right => 1.0,
            Side::Left => -1.0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Right => write!(f, "Right"),
            Side::Left => write!(f, "Left"),
        }
    }
}
