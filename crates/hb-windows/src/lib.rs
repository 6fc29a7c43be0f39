//! `hb-windows` — maximal sub-route windows under a vehicle range cap.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`generator`] | `compute_maximal_windows`, `windows_for_table`        |
//! | [`window`]    | `Window`                                              |
//!
//! Errors are plain `hb_core::HaulError`: the only failure is an invalid
//! range cap.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                          |
//! |---------|-------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Window`.  |

pub mod generator;
pub mod window;

#[cfg(test)]
mod tests;

pub use generator::{compute_maximal_windows, windows_for_table};
pub use window::Window;
