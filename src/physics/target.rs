//! Target selection: which partial to correct, and its coupled auxiliary

use crate::types::{Partial, TargetSelection, TuningErrors};

/// Select the correction target from the three error readings
///
/// Scores each partial as |error| x weight (weights 6/3/2 approximate the
/// 1:2:3 harmonic ratios) and takes the highest nonzero score. All-zero
/// readings produce `None` — the instrument is in tune, a defined
/// terminal state rather than an error.
///
/// Exact score ties resolve in the fixed order tonic, octave, fifth, so
/// selection never depends on iteration order.
pub fn select_target(errors: &TuningErrors) -> Option<TargetSelection> {
    let mut primary: Option<Partial> = None;
    let mut best_score = 0.0;

    for partial in Partial::ALL {
        let score = errors.score_of(partial);
        if score > best_score {
            best_score = score;
            primary = Some(partial);
        }
    }

    let primary = primary?;
    Some(TargetSelection {
        primary,
        auxiliary: auxiliary_for(primary, errors),
    })
}

/// Pick the auxiliary partial coupled to a primary, if any qualifies
///
/// Tonic and octave share the vertical structural axis with opposite sign
/// conventions, so they can never assist each other: a vertical primary
/// can only couple with the fifth, and the fifth can couple with either
/// vertical partial. A candidate qualifies only when its error is nonzero
/// and shares the primary's sign; when both verticals qualify, the higher
/// score wins (first-in-order on an exact tie).
fn auxiliary_for(primary: Partial, errors: &TuningErrors) -> Option<Partial> {
    let primary_positive = errors.error_of(primary) > 0.0;

    let candidates: &[Partial] = match primary {
        Partial::Fifth => &[Partial::Tonic, Partial::Octave],
        Partial::Tonic | Partial::Octave => &[Partial::Fifth],
    };

    let mut auxiliary: Option<Partial> = None;
    let mut best_score = 0.0;

    for &candidate in candidates {
        let error = errors.error_of(candidate);
        if error == 0.0 || (error > 0.0) != primary_positive {
            continue;
        }
        let score = errors.score_of(candidate);
        if score > best_score {
            best_score = score;
            auxiliary = Some(candidate);
        }
    }

    auxiliary
}
