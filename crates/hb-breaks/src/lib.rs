//! `hb-breaks` — mandatory break placement under a driving-time cap.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`engine`]     | `BreakPlanner`, `Placement`, `compute_mandatory_breaks`   |
//! | [`event`]      | `BreakEvent`, `StopKind`, `ChargingType`                  |
//! | [`regulation`] | `StopSchedule`, break vs. daily-rest classification      |
//! | [`error`]      | `BreakError`, `BreakResult<T>`                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hb_breaks::compute_mandatory_breaks;
//! use hb_core::{NodeId, PathId};
//! use hb_path::Path;
//!
//! let path = Path::single(PathId(0), NodeId(17), 838.6)?;
//! let events = compute_mandatory_breaks(&path, 4.5, 80.0, 1.0 / 3.0)?;
//! assert_eq!(events.len(), 2);
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on the event records.  |

pub mod engine;
pub mod error;
pub mod event;
pub mod regulation;


pub use engine::{BreakPlanner, Placement, break_count, compute_mandatory_breaks};
pub use error::{BreakError, BreakResult};
pub use event::{BreakEvent, ChargingType, StopKind};
pub use regulation::{ScheduledStop, StopSchedule};
