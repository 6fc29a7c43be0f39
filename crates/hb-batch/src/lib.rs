//! `hb-batch` — runs the break and window engines over many routes with
//! per-path failure isolation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`pipeline`] | `Pipeline`, `BatchReport`, `Quarantined`, `PathPlan`       |
//! | [`error`]    | `BatchError`, `BatchResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Per-path work runs on Rayon's thread pool.                |
//! | `serde`    | Forwards `serde` to every `hb-*` crate; derives on `PathPlan`. |

pub mod error;
pub mod pipeline;


pub use error::{BatchError, BatchResult};
pub use pipeline::{BatchReport, PathPlan, Pipeline, Quarantined};
