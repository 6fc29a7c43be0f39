use hb_breaks::BreakError;
use hb_core::{HaulError, PathId};
use hb_path::PathError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    /// Invalid configuration.  The only error that aborts a batch; it is
    /// returned by [`Pipeline::new`](crate::Pipeline::new) before any path runs.
    #[error(transparent)]
    Config(#[from] HaulError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Breaks(#[from] BreakError),

    #[error("window generation failed: {0}")]
    Windows(HaulError),

    /// A later record reused an id already seen in this batch.  The
    /// earlier record is processed (or quarantined) on its own merits.
    #[error("duplicate path id {path}: an earlier record used this id")]
    DuplicatePath { path: PathId },
}

impl BatchError {
    /// `true` if the path itself is at fault (malformed or duplicated),
    /// as opposed to an engine failure.
    pub fn is_bad_input(&self) -> bool {
        match self {
            BatchError::Path(e) => e.is_malformed(),
            BatchError::Breaks(BreakError::Path(e)) => e.is_malformed(),
            BatchError::DuplicatePath { .. } => true,
            _ => false,
        }
    }
}

pub type BatchResult<T> = Result<T, BatchError>;
