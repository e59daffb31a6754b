//! Historical tuning records persisted by the history store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Placement, Side, StrikePrescription, TuningErrors};

/// A past prescription together with everything needed to reproduce it
///
/// Owned by the history store; the core only formats and consumes field
/// values. Recomputing a prescription from `errors`, `placement_override`
/// and `side` yields the stored `prescription` again — the side choice is
/// captured so the one random degree of freedom replays deterministically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TuningRecord {
    /// Opaque storage id, assigned on insert (0 until then)
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub errors: TuningErrors,
    pub placement_override: Option<Placement>,
    pub side: Side,
    pub prescription: StrikePrescription,
}

impl TuningRecord {
    /// Build an unsaved record for the given inputs and outcome
    pub fn new(
        errors: TuningErrors,
        placement_override: Option<Placement>,
        side: Side,
        prescription: StrikePrescription,
    ) -> Self {
        Self {
            id: 0,
            timestamp: Utc::now(),
            errors,
            placement_override,
            side,
            prescription,
        }
    }
}
