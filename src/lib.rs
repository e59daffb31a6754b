//! Tonesmith: Tonefield Tuning Intelligence
//!
//! Deterministic decision/physics core for tuning a handpan-style
//! tonefield with three independent partials (tonic, octave, fifth).
//!
//! ## Architecture
//!
//! - **Prescription Engine**: maps three signed Hz errors to a complete
//!   strike prescription (target, intent, placement, coordinate, force,
//!   repeat count, technique)
//! - **Color-Field Renderer**: maps the same errors to a continuous
//!   tension heat-map over the sampled elliptical surface
//! - **Session Adapter**: single source of truth routing measurements in
//!   and cached projections out
//! - **History Storage**: sled-backed record log for exact replay
//!
//! Both cores are pure and synchronous; the color field is a rayon
//! parallel map with no inter-point dependency.

pub mod config;
pub mod types;
pub mod geometry;
pub mod physics;
pub mod rendering;
pub mod session;
pub mod storage;

// Re-export instrument configuration
pub use config::InstrumentConfig;

// Re-export commonly used types
pub use types::{
    Intent, Partial, Placement, Rgb, Side, StrikePrescription, TargetSelection, Technique,
    TuningErrors, TuningRecord,
};

// Re-export geometry
pub use geometry::{ReliefProfile, StrikeCoordinate, SurfacePoint, TonefieldGrid};

// Re-export the two core entry points
pub use physics::prescribe;
pub use rendering::{color_at, compute_color_field};

// Re-export the adapter and storage
pub use session::TuningSession;
pub use storage::{HistoryStats, InMemoryLog, StorageError, TuningHistory, TuningLog};
