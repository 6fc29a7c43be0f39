//! `hb-core` — foundational types for the `haulbreak` route segmentation
//! crates.
//!
//! This crate is a dependency of every other `hb-*` crate.  It has no `hb-*`
//! dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`ids`]     | `PathId`, `NodeId`, `TechnologyId`, `Generation`             |
//! | [`config`]  | `BreakConfig`, `RegulationConfig`, `RangeTable`, `HaulConfig`|
//! | [`error`]   | `HaulError`, `HaulResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and configuration.   |

pub mod config;
pub mod error;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    BreakConfig, DEFAULT_TOLERANCE_FRACTION, HaulConfig, RangeCap, RangeTable, RegulationConfig,
    check_cap,
};
pub use error::{HaulError, HaulResult};
pub use ids::{Generation, NodeId, PathId, TechnologyId};
