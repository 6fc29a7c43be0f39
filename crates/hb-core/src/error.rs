//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `HaulError` as one
//! variant via `#[from]`, so configuration failures keep their identity all
//! the way up to the batch report.

use thiserror::Error;

/// Configuration errors shared by every `hb-*` crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HaulError {
    /// A cap-like quantity (`cap_time_h`, `speed_kmh`, `range_km`, …) is
    /// zero, negative, or not finite.  Surfaced immediately, never defaulted.
    #[error("invalid {name}: {value} (must be finite and greater than zero)")]
    InvalidCap { name: &'static str, value: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `hb-*` crates.
pub type HaulResult<T> = Result<T, HaulError>;
