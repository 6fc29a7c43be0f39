//! Path-model error type.

use thiserror::Error;

use hb_core::{HaulError, PathId};

/// Errors produced by `hb-path`.
///
/// Every variant except [`AlreadyDetailed`](PathError::AlreadyDetailed) and
/// [`Config`](PathError::Config) is a *malformed path*: the route violates
/// the model invariants and must be quarantined by the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("malformed path {path}: no waypoints")]
    Empty { path: PathId },

    #[error("malformed path {path}: {waypoints} waypoints but {distances} cumulative distances")]
    LengthMismatch { path: PathId, waypoints: usize, distances: usize },

    #[error("malformed path {path}: non-finite distance at index {index}")]
    NonFinite { path: PathId, index: usize },

    #[error("malformed path {path}: first cumulative distance is {first}, expected 0")]
    NonZeroOrigin { path: PathId, first: f64 },

    #[error("malformed path {path}: cumulative distance decreases at index {index} ({previous} -> {value})")]
    NonMonotonic { path: PathId, index: usize, previous: f64, value: f64 },

    #[error("malformed path {path}: negative total length {total}")]
    NegativeDistance { path: PathId, total: f64 },

    #[error("malformed path {path}: total length {total} disagrees with final cumulative distance {last}")]
    TotalMismatch { path: PathId, total: f64, last: f64 },

    #[error("path {path} already has {waypoints} waypoints; only single-waypoint paths are densified")]
    AlreadyDetailed { path: PathId, waypoints: usize },

    #[error(transparent)]
    Config(#[from] HaulError),
}

impl PathError {
    /// `true` if the error reports a route that violates the path invariants.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, PathError::AlreadyDetailed { .. } | PathError::Config(_))
    }
}

pub type PathResult<T> = Result<T, PathError>;
