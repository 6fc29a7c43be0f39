//! Break-event records handed to the downstream optimisation model.

use hb_core::{NodeId, PathId};

/// Whether a mandatory stop is a short break or a daily rest.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StopKind {
    /// Short break after one driving-time cap.
    #[default]
    Break,
    /// Daily rest after the crew's daily driving limit.
    Rest,
}

impl StopKind {
    /// One-letter code used in the optimisation model's input tables.
    pub fn code(self) -> char {
        match self {
            StopKind::Break => 'B',
            StopKind::Rest  => 'R',
        }
    }

    /// Charging opportunity the stop gives a battery-electric truck.
    pub fn charging(self) -> ChargingType {
        match self {
            StopKind::Break => ChargingType::Fast,
            StopKind::Rest  => ChargingType::Slow,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StopKind::Break => "break",
            StopKind::Rest  => "rest",
        }
    }
}

impl std::fmt::Display for StopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Charging mode available during a stop.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChargingType {
    /// High-power charging within a short break.
    Fast,
    /// Overnight depot-style charging during a daily rest.
    Slow,
}

impl ChargingType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChargingType::Fast => "fast",
            ChargingType::Slow => "slow",
        }
    }
}

impl std::fmt::Display for ChargingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mandatory stop on one path.
///
/// Distances and times are those of the chosen waypoint, not the idealised
/// `k × cap` target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakEvent {
    pub path_id:              PathId,
    /// 1-based, strictly increasing per path.
    pub break_number:         u32,
    /// Index into the (possibly densified) waypoint sequence.
    pub waypoint_index:       usize,
    pub node_id:              NodeId,
    /// The stop sits on a synthetic marker, not on an upstream waypoint.
    pub synthetic:            bool,
    pub cumulative_km:        f64,
    pub cumulative_driving_h: f64,
    pub path_length_km:       f64,
    pub total_driving_h:      f64,
    pub kind:                 StopKind,
    pub stop_duration_h:      f64,
    /// Driving time plus this stop's duration only.
    pub time_with_stop_h:     f64,
    /// Driving time plus every stop up to and including this one.
    pub elapsed_h:            f64,
    pub drivers:              u8,
}

impl BreakEvent {
    /// Merge key for batch output.
    #[inline]
    pub fn sort_key(&self) -> (PathId, u32) {
        (self.path_id, self.break_number)
    }
}
