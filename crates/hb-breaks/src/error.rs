use hb_core::{HaulError, PathId};
use hb_path::PathError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreakError {
    #[error(transparent)]
    Config(#[from] HaulError),

    #[error(transparent)]
    Path(#[from] PathError),

    /// No waypoint lies at or before the target distance.  Path validation
    /// guarantees waypoint 0 sits at distance 0, so this is a bug in
    /// validation, never a condition to tolerate.
    #[error("break {break_number} of path {path}: no waypoint at or before the target distance")]
    UnreachableFallback { path: PathId, break_number: u32 },
}

pub type BreakResult<T> = Result<T, BreakError>;
