//! The canonical route representation.
//!
//! # Data layout
//!
//! A [`Path`] stores two parallel arrays of equal length `N ≥ 1`:
//!
//! ```text
//! sequence[i]       NodeId of waypoint i
//! cumulative_km[i]  distance travelled from the origin up to waypoint i
//! ```
//!
//! plus the route's `total_length_km`.  `cumulative_km[0]` is always `0.0`
//! and the array never decreases, so "latest waypoint at or before distance
//! `d`" is a binary search.
//!
//! # Underspecified paths
//!
//! Upstream aggregation sometimes collapses a route to a single waypoint
//! while keeping its true length.  Such a path (`N == 1`) carries
//! `cumulative_km == [0.0]` and a positive `total_length_km`; it is the only
//! case where the total is allowed to differ from the last cumulative value.
//! See [`crate::densify`].

use hb_core::{NodeId, PathId};

use crate::{PathError, PathResult};

/// Relative tolerance when comparing `total_length_km` against the final
/// cumulative distance.
pub const LENGTH_TOLERANCE: f64 = 1e-6;

/// `true` if `a` and `b` agree within [`LENGTH_TOLERANCE`] (relative).
#[inline]
pub fn lengths_agree(a: f64, b: f64) -> bool {
    (a - b).abs() <= LENGTH_TOLERANCE * a.abs().max(b.abs())
}

// ── Upstream record ───────────────────────────────────────────────────────────

/// A route exactly as upstream network extraction delivers it.
///
/// Nothing about a `RawPath` is trusted; convert it with
/// `Path::try_from(raw)` to get a validated [`Path`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawPath {
    pub id:              PathId,
    pub sequence:        Vec<NodeId>,
    pub cumulative_km:   Vec<f64>,
    pub total_length_km: f64,
}

// ── Views ─────────────────────────────────────────────────────────────────────

/// One waypoint of a path, by position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub index:         usize,
    pub node:          NodeId,
    pub cumulative_km: f64,
}

/// The stretch between waypoints `index` and `index + 1`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub index:       usize,
    pub from:        NodeId,
    pub to:          NodeId,
    pub distance_km: f64,
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// A validated route.  Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    id:              PathId,
    sequence:        Vec<NodeId>,
    cumulative_km:   Vec<f64>,
    total_length_km: f64,
}

impl Path {
    /// Validate and build a path.
    ///
    /// Rejects empty input, mismatched array lengths, non-finite values, a
    /// non-zero origin, decreasing distances, and (for `N > 1`) a total that
    /// disagrees with the last cumulative distance.
    pub fn new(
        id:              PathId,
        sequence:        Vec<NodeId>,
        cumulative_km:   Vec<f64>,
        total_length_km: f64,
    ) -> PathResult<Self> {
        if sequence.is_empty() {
            return Err(PathError::Empty { path: id });
        }
        if sequence.len() != cumulative_km.len() {
            return Err(PathError::LengthMismatch {
                path:      id,
                waypoints: sequence.len(),
                distances: cumulative_km.len(),
            });
        }
        if let Some(index) = cumulative_km.iter().position(|d| !d.is_finite()) {
            return Err(PathError::NonFinite { path: id, index });
        }
        if !total_length_km.is_finite() {
            return Err(PathError::NonFinite { path: id, index: cumulative_km.len() });
        }
        if cumulative_km[0] != 0.0 {
            return Err(PathError::NonZeroOrigin { path: id, first: cumulative_km[0] });
        }
        for (index, pair) in cumulative_km.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(PathError::NonMonotonic {
                    path:     id,
                    index:    index + 1,
                    previous: pair[0],
                    value:    pair[1],
                });
            }
        }
        if total_length_km < 0.0 {
            return Err(PathError::NegativeDistance { path: id, total: total_length_km });
        }

        let last = cumulative_km[cumulative_km.len() - 1];
        if cumulative_km.len() > 1 && !lengths_agree(total_length_km, last) {
            return Err(PathError::TotalMismatch { path: id, total: total_length_km, last });
        }

        Ok(Self { id, sequence, cumulative_km, total_length_km })
    }

    /// A single-waypoint (underspecified) path of the given length.
    pub fn single(id: PathId, node: NodeId, total_length_km: f64) -> PathResult<Self> {
        Self::new(id, vec![node], vec![0.0], total_length_km)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> PathId { self.id }
    pub fn sequence(&self) -> &[NodeId] { &self.sequence }
    pub fn cumulative_km(&self) -> &[f64] { &self.cumulative_km }
    pub fn total_length_km(&self) -> f64 { self.total_length_km }

    /// Number of waypoints (always ≥ 1).
    pub fn len(&self) -> usize { self.sequence.len() }

    /// Always `false`; a `Path` has at least one waypoint.
    pub fn is_empty(&self) -> bool { self.sequence.is_empty() }

    /// `true` for a single-waypoint path that still has to be densified
    /// before break placement.
    pub fn is_underspecified(&self) -> bool {
        self.sequence.len() == 1
    }

    pub fn waypoint(&self, index: usize) -> Option<Waypoint> {
        Some(Waypoint {
            index,
            node:          *self.sequence.get(index)?,
            cumulative_km: self.cumulative_km[index],
        })
    }

    pub fn waypoints(&self) -> impl Iterator<Item = Waypoint> + '_ {
        self.sequence
            .iter()
            .zip(&self.cumulative_km)
            .enumerate()
            .map(|(index, (&node, &cumulative_km))| Waypoint { index, node, cumulative_km })
    }

    /// Number of segments (`N − 1`).
    pub fn segment_count(&self) -> usize {
        self.sequence.len() - 1
    }

    /// Consecutive-waypoint segments in route order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.sequence
            .windows(2)
            .zip(self.cumulative_km.windows(2))
            .enumerate()
            .map(|(index, (nodes, dist))| Segment {
                index,
                from:        nodes[0],
                to:          nodes[1],
                distance_km: dist[1] - dist[0],
            })
    }

    /// Longest single segment, or `0.0` for a single-waypoint path.
    pub fn max_gap_km(&self) -> f64 {
        self.segments().map(|s| s.distance_km).fold(0.0, f64::max)
    }

    /// Number of waypoints whose cumulative distance is `≤ distance_km`.
    ///
    /// The latest such waypoint is at index `count − 1`.
    #[inline]
    pub fn waypoints_within(&self, distance_km: f64) -> usize {
        self.cumulative_km.partition_point(|&d| d <= distance_km)
    }
}

impl TryFrom<RawPath> for Path {
    type Error = PathError;

    fn try_from(raw: RawPath) -> PathResult<Path> {
        Path::new(raw.id, raw.sequence, raw.cumulative_km, raw.total_length_km)
    }
}

impl From<Path> for RawPath {
    fn from(path: Path) -> RawPath {
        RawPath {
            id:              path.id,
            sequence:        path.sequence,
            cumulative_km:   path.cumulative_km,
            total_length_km: path.total_length_km,
        }
    }
}
