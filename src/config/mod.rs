//! Instrument Configuration Module
//!
//! Provides per-instrument configuration loaded from TOML files, replacing
//! hardcoded tuning-physics constants with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `TONESMITH_CONFIG` environment variable (path to TOML file)
//! 2. `tonesmith.toml` in the current working directory
//! 3. Built-in defaults (the canonical constants)
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // At startup:
//! config::init(InstrumentConfig::load());
//!
//! // Anywhere in the codebase:
//! let limit = config::get().physics.force_limit;
//! ```

mod instrument;

pub use instrument::*;

use std::sync::OnceLock;

/// Global instrument configuration, initialized once at startup.
static INSTRUMENT_CONFIG: OnceLock<InstrumentConfig> = OnceLock::new();

/// Initialize the global instrument configuration.
///
/// Call exactly once before any computation. A second call is ignored
/// with a warning so test binaries that share a process stay sound.
pub fn init(config: InstrumentConfig) {
    if INSTRUMENT_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once — ignoring");
    }
}

/// Get a reference to the global instrument configuration.
///
/// Falls back to the built-in defaults when `init()` was never called,
/// so pure computations stay usable as a library without a startup step.
pub fn get() -> &'static InstrumentConfig {
    INSTRUMENT_CONFIG.get_or_init(InstrumentConfig::default)
}

/// Check whether the config has been initialized.
///
/// Useful for tests and optional config paths.
pub fn is_initialized() -> bool {
    INSTRUMENT_CONFIG.get().is_some()
}
