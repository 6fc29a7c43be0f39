//! The break placement engine.
//!
//! # Algorithm
//!
//! For a path with total driving time `T` and cap `C` there are exactly
//! `⌊T / C⌋` stops.  Stop `k` targets `k × C` hours, i.e. `k × C × v` km:
//!
//! 1. **Strict candidate**: the latest waypoint whose cumulative distance is
//!    `≤` the target distance (binary search; the array never decreases).
//! 2. **Tolerance**: `gap = k × C − time(strict)`, `tolerance = τ × gap`.
//!    If the next waypoint's time is `≤ k × C + tolerance`, the stop moves
//!    there.  A candidate right at the cap gets no slack; one far short of
//!    the cap may overshoot proportionally.
//! 3. The event records the chosen waypoint's true distance and time.
//!
//! Single-waypoint paths are densified first (see [`hb_path::densify`]),
//! otherwise every stop would resolve to waypoint 0.
//!
//! # Sparse paths
//!
//! A multi-waypoint path may still have segments longer than one interval.
//! Placement then runs on a *track*: the real waypoints plus synthetic
//! markers at every `k × interval` strictly inside each over-long segment.
//! The path itself is not rewritten.  A stop placed on a marker reports the
//! marker's distance, and the waypoint that ends its segment as
//! `waypoint_index` / `node_id`, with `synthetic = true`.

use hb_core::{BreakConfig, NodeId, PathId};
use hb_path::{Path, densify};

use crate::regulation::StopSchedule;
use crate::{BreakError, BreakEvent, BreakResult};

/// Number of stops on a route with `total_driving_h` of driving.
///
/// An exact multiple of the cap includes its final stop.
#[inline]
pub fn break_count(total_driving_h: f64, cap_time_h: f64) -> u32 {
    (total_driving_h / cap_time_h).floor() as u32
}

// ── Placement ─────────────────────────────────────────────────────────────────

/// How one stop was located.  Returned by [`BreakPlanner::placement`] for
/// diagnostics; [`BreakPlanner::plan`] uses it internally.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    pub break_number:   u32,
    pub target_h:       f64,
    pub target_km:      f64,
    /// Latest waypoint at or before the target distance.
    pub strict_index:   usize,
    /// Waypoint actually chosen (`strict_index` or `strict_index + 1`).
    pub waypoint_index: usize,
    /// Hours between the strict candidate and the target.
    pub gap_h:          f64,
    pub tolerance_h:    f64,
}

impl Placement {
    /// `true` if the tolerance rule moved the stop past the cap.
    #[inline]
    pub fn shifted(&self) -> bool {
        self.waypoint_index != self.strict_index
    }
}

// ── BreakPlanner ──────────────────────────────────────────────────────────────

/// Places mandatory stops on paths.  Holds only a validated configuration,
/// so one planner can be shared across threads.
#[derive(Clone, Debug)]
pub struct BreakPlanner {
    config: BreakConfig,
}

impl BreakPlanner {
    /// Validate `config` and build a planner.
    pub fn new(config: BreakConfig) -> BreakResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BreakConfig {
        &self.config
    }

    /// All mandatory stops on `path`, ordered by `break_number`.
    ///
    /// `waypoint_index` refers to the densified sequence when `path` is
    /// underspecified, and to `path` itself otherwise; stops inside an
    /// over-long segment name the segment's end waypoint (see the module
    /// docs).  `path` is left untouched.
    pub fn plan(&self, path: &Path) -> BreakResult<Vec<BreakEvent>> {
        let cfg = &self.config;
        let track = Track::build(path, cfg.interval_km())?;

        let total_driving_h = cfg.driving_time_h(path.total_length_km());
        let count = break_count(total_driving_h, cfg.cap_time_h);
        let drivers = cfg.regulation.drivers_for(total_driving_h);
        let schedule = StopSchedule::new(&cfg.regulation, cfg.cap_time_h, drivers);

        (1..=count)
            .zip(schedule)
            .map(|(break_number, stop)| -> BreakResult<BreakEvent> {
                let placement = self.locate(path.id(), &track.cumulative_km, break_number)?;
                let point = track.points[placement.waypoint_index];
                let cumulative_km = track.cumulative_km[placement.waypoint_index];
                let cumulative_driving_h = cfg.driving_time_h(cumulative_km);

                tracing::debug!(
                    path = %path.id(),
                    break_number,
                    waypoint = point.waypoint_index,
                    synthetic = point.synthetic,
                    shifted = placement.shifted(),
                    cumulative_driving_h,
                    kind = %stop.kind,
                    "placed stop"
                );

                Ok(BreakEvent {
                    path_id: path.id(),
                    break_number,
                    waypoint_index: point.waypoint_index,
                    node_id: point.node,
                    synthetic: point.synthetic,
                    cumulative_km,
                    cumulative_driving_h,
                    path_length_km: path.total_length_km(),
                    total_driving_h,
                    kind: stop.kind,
                    stop_duration_h: stop.duration_h,
                    time_with_stop_h: cumulative_driving_h + stop.duration_h,
                    elapsed_h: cumulative_driving_h + stop.stops_total_h,
                    drivers,
                })
            })
            .collect()
    }

    /// Locate stop `break_number` on `path` as given (no densification,
    /// no synthetic markers).
    pub fn placement(&self, path: &Path, break_number: u32) -> BreakResult<Placement> {
        self.locate(path.id(), path.cumulative_km(), break_number)
    }

    fn locate(&self, path: PathId, cumulative: &[f64], break_number: u32) -> BreakResult<Placement> {
        let cfg = &self.config;
        let target_h = f64::from(break_number) * cfg.cap_time_h;
        let target_km = f64::from(break_number) * cfg.interval_km();

        let within = cumulative.partition_point(|&d| d <= target_km);
        let Some(strict_index) = within.checked_sub(1) else {
            tracing::error!(%path, break_number, target_km, "no waypoint before target");
            return Err(BreakError::UnreachableFallback { path, break_number });
        };

        let gap_h = (target_h - cfg.driving_time_h(cumulative[strict_index])).max(0.0);
        let tolerance_h = cfg.tolerance_fraction * gap_h;

        let waypoint_index = match cumulative.get(strict_index + 1) {
            Some(&next_km) if cfg.driving_time_h(next_km) <= target_h + tolerance_h => {
                strict_index + 1
            }
            _ => strict_index,
        };

        Ok(Placement {
            break_number,
            target_h,
            target_km,
            strict_index,
            waypoint_index,
            gap_h,
            tolerance_h,
        })
    }
}

// ── Placement track ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct TrackPoint {
    /// Index into the path that `plan` reports (densified for `N == 1`).
    waypoint_index: usize,
    node:           NodeId,
    synthetic:      bool,
}

/// Cumulative distances placement searches, with what each one maps to.
#[derive(Debug)]
struct Track {
    cumulative_km: Vec<f64>,
    points:        Vec<TrackPoint>,
}

impl Track {
    fn build(path: &Path, interval_km: f64) -> BreakResult<Track> {
        if path.is_underspecified() {
            if path.total_length_km() == 0.0 {
                return Ok(Track::of(path, |_| false));
            }
            let dense = densify(path, interval_km)?;
            let last = dense.len() - 1;
            return Ok(Track::of(&dense, |i| i > 0 && i < last));
        }
        if path.max_gap_km() <= interval_km {
            return Ok(Track::of(path, |_| false));
        }

        let cumulative = path.cumulative_km();
        let sequence = path.sequence();
        let mut track = Track { cumulative_km: Vec::new(), points: Vec::new() };
        let mut markers = 0usize;

        track.push(cumulative[0], 0, sequence[0], false);
        for i in 1..cumulative.len() {
            let (from, to) = (cumulative[i - 1], cumulative[i]);
            if to - from > interval_km {
                let mut k = (from / interval_km).floor() + 1.0;
                while k * interval_km < to {
                    track.push(k * interval_km, i, sequence[i], true);
                    markers += 1;
                    k += 1.0;
                }
            }
            track.push(to, i, sequence[i], false);
        }

        tracing::debug!(
            path = %path.id(),
            max_gap_km = path.max_gap_km(),
            interval_km,
            markers,
            "segment longer than one driving interval; placing on synthetic markers"
        );
        Ok(track)
    }

    /// One track point per waypoint of `path`.
    fn of(path: &Path, synthetic: impl Fn(usize) -> bool) -> Track {
        Track {
            cumulative_km: path.cumulative_km().to_vec(),
            points: path
                .waypoints()
                .map(|w| TrackPoint { waypoint_index: w.index, node: w.node, synthetic: synthetic(w.index) })
                .collect(),
        }
    }

    fn push(&mut self, cumulative_km: f64, waypoint_index: usize, node: NodeId, synthetic: bool) {
        self.cumulative_km.push(cumulative_km);
        self.points.push(TrackPoint { waypoint_index, node, synthetic });
    }
}

// ── Free-function entry point ─────────────────────────────────────────────────

/// Place every mandatory stop on `path` for a driving-time cap of
/// `cap_time_h` hours at `speed_kmh`, with proportional tolerance
/// `tolerance_fraction`.  Regulation values take their defaults.
///
/// # Errors
///
/// [`BreakError::Config`] with `InvalidCap` if the cap or speed is not
/// positive; [`BreakError::UnreachableFallback`] only on a validation bug.
pub fn compute_mandatory_breaks(
    path:               &Path,
    cap_time_h:         f64,
    speed_kmh:          f64,
    tolerance_fraction: f64,
) -> BreakResult<Vec<BreakEvent>> {
    let config = BreakConfig::new(cap_time_h, speed_kmh, tolerance_fraction)?;
    BreakPlanner::new(config)?.plan(path)
}
