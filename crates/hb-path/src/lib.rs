//! `hb-path` — the validated route model and waypoint densification.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`path`]    | `Path`, `RawPath`, `Waypoint`, `Segment`                    |
//! | [`densify`] | `densify`, `densify_if_needed`                              |
//! | [`error`]   | `PathError`, `PathResult<T>`                                |
//!
//! A `Path` can only be obtained through validation (`Path::new` or
//! `Path::try_from(RawPath)`), so every downstream engine may assume the
//! invariants documented on [`Path`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `RawPath` and views.    |

pub mod densify;
pub mod error;
pub mod path;

#[cfg(test)]
mod tests;

pub use densify::{densify, densify_if_needed};
pub use error::{PathError, PathResult};
pub use path::{LENGTH_TOLERANCE, Path, RawPath, Segment, Waypoint};
