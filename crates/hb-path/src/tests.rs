//! Unit tests for hb-path.
//!
//! Paths are hand-built; distances are in kilometres.

#[cfg(test)]
mod helpers {
    use hb_core::{NodeId, PathId};

    use crate::Path;

    /// Path `id` through nodes `10, 11, 12, …` at the given cumulative
    /// distances.
    pub fn path(id: u32, cumulative_km: &[f64]) -> Path {
        let nodes = (0..cumulative_km.len()).map(|i| NodeId(10 + i as u32)).collect();
        let total = *cumulative_km.last().unwrap();
        Path::new(PathId(id), nodes, cumulative_km.to_vec(), total).unwrap()
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use hb_core::{NodeId, PathId};

    use crate::{Path, PathError, RawPath};

    fn raw(sequence: Vec<u32>, cumulative_km: Vec<f64>, total: f64) -> RawPath {
        RawPath {
            id: PathId(1),
            sequence: sequence.into_iter().map(NodeId).collect(),
            cumulative_km,
            total_length_km: total,
        }
    }

    #[test]
    fn accepts_well_formed() {
        let p = Path::try_from(raw(vec![1, 2, 3], vec![0.0, 100.0, 250.0], 250.0)).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.total_length_km(), 250.0);
        assert!(!p.is_underspecified());
        assert!(!p.is_empty());
    }

    #[test]
    fn rejects_empty() {
        let err = Path::try_from(raw(vec![], vec![], 0.0)).unwrap_err();
        assert_eq!(err, PathError::Empty { path: PathId(1) });
        assert!(err.is_malformed());
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Path::try_from(raw(vec![1, 2], vec![0.0], 10.0)).unwrap_err();
        assert!(matches!(err, PathError::LengthMismatch { waypoints: 2, distances: 1, .. }));
    }

    #[test]
    fn rejects_decreasing_distance() {
        let err = Path::try_from(raw(vec![1, 2, 3], vec![0.0, 50.0, 40.0], 40.0)).unwrap_err();
        assert!(matches!(err, PathError::NonMonotonic { index: 2, .. }));
    }

    #[test]
    fn rejects_nonzero_origin() {
        let err = Path::try_from(raw(vec![1, 2], vec![5.0, 50.0], 50.0)).unwrap_err();
        assert!(matches!(err, PathError::NonZeroOrigin { .. }));
    }

    #[test]
    fn rejects_nan() {
        let err = Path::try_from(raw(vec![1, 2], vec![0.0, f64::NAN], 50.0)).unwrap_err();
        assert!(matches!(err, PathError::NonFinite { index: 1, .. }));
        let err = Path::try_from(raw(vec![1, 2], vec![0.0, 50.0], f64::INFINITY)).unwrap_err();
        assert!(matches!(err, PathError::NonFinite { index: 2, .. }));
    }

    #[test]
    fn rejects_total_mismatch() {
        let err = Path::try_from(raw(vec![1, 2], vec![0.0, 100.0], 101.0)).unwrap_err();
        assert!(matches!(err, PathError::TotalMismatch { .. }));
    }

    #[test]
    fn tolerates_tiny_relative_total_difference() {
        // 1e-8 relative is well inside the 1e-6 tolerance.
        assert!(Path::try_from(raw(vec![1, 2], vec![0.0, 100.0], 100.000_001)).is_ok());
    }

    #[test]
    fn rejects_negative_total() {
        let err = Path::single(PathId(1), NodeId(1), -3.0).unwrap_err();
        assert!(matches!(err, PathError::NegativeDistance { .. }));
    }

    #[test]
    fn single_waypoint_keeps_total() {
        let p = Path::single(PathId(9), NodeId(4), 562.8).unwrap();
        assert!(p.is_underspecified());
        assert_eq!(p.cumulative_km(), &[0.0]);
        assert_eq!(p.total_length_km(), 562.8);
        assert_eq!(p.segment_count(), 0);
    }

    #[test]
    fn raw_round_trip_preserves_fields() {
        let input = raw(vec![1, 2], vec![0.0, 12.5], 12.5);
        let back = RawPath::from(Path::try_from(input.clone()).unwrap());
        assert_eq!(back, input);
    }
}

// ── Views ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod views {
    use hb_core::NodeId;

    use super::helpers::path;

    #[test]
    fn segments_follow_waypoints() {
        let p = path(1, &[0.0, 100.0, 250.0, 250.0]);
        let segs: Vec<_> = p.segments().collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].from, NodeId(10));
        assert_eq!(segs[0].to, NodeId(11));
        assert_eq!(segs[1].distance_km, 150.0);
        assert_eq!(segs[2].distance_km, 0.0);
        assert_eq!(p.max_gap_km(), 150.0);
    }

    #[test]
    fn waypoint_lookup() {
        let p = path(1, &[0.0, 100.0, 250.0]);
        let w = p.waypoint(2).unwrap();
        assert_eq!(w.node, NodeId(12));
        assert_eq!(w.cumulative_km, 250.0);
        assert!(p.waypoint(3).is_none());
        assert_eq!(p.waypoints().count(), 3);
    }

    #[test]
    fn waypoints_within_is_inclusive() {
        let p = path(1, &[0.0, 100.0, 250.0, 250.0, 400.0]);
        assert_eq!(p.waypoints_within(99.9), 1);
        assert_eq!(p.waypoints_within(100.0), 2);
        // Equal distances: the later duplicate is included.
        assert_eq!(p.waypoints_within(250.0), 4);
        assert_eq!(p.waypoints_within(1_000.0), 5);
    }
}

// ── Densifier ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod densifier {
    use std::borrow::Cow;

    use approx::assert_abs_diff_eq;
    use hb_core::{HaulError, NodeId, PathId};

    use super::helpers::path;
    use crate::{Path, PathError, densify, densify_if_needed};

    #[test]
    fn one_interval() {
        let p = Path::single(PathId(1), NodeId(7), 562.8).unwrap();
        let d = densify(&p, 4.5 * 80.0).unwrap();
        assert_eq!(d.cumulative_km(), &[0.0, 360.0, 562.8]);
        assert_eq!(d.sequence(), &[NodeId(7); 3]);
        assert_eq!(d.id(), PathId(1));
        // Original untouched.
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn two_intervals() {
        let p = Path::single(PathId(1), NodeId(7), 838.6).unwrap();
        let d = densify(&p, 360.0).unwrap();
        assert_eq!(d.cumulative_km(), &[0.0, 360.0, 720.0, 838.6]);
        assert_eq!(d.len(), (838.6_f64 / 360.0).floor() as usize + 2);
    }

    #[test]
    fn exact_multiple_has_no_duplicate_destination() {
        let p = Path::single(PathId(1), NodeId(7), 720.0).unwrap();
        let d = densify(&p, 360.0).unwrap();
        assert_eq!(d.cumulative_km(), &[0.0, 360.0, 720.0]);
    }

    #[test]
    fn near_multiple_snaps_to_total() {
        let total = 720.0 + 1e-9;
        let p = Path::single(PathId(1), NodeId(7), total).unwrap();
        let d = densify(&p, 360.0).unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(d.cumulative_km()[2], total);
    }

    #[test]
    fn shorter_than_interval() {
        let p = Path::single(PathId(1), NodeId(7), 120.0).unwrap();
        let d = densify(&p, 360.0).unwrap();
        assert_eq!(d.cumulative_km(), &[0.0, 120.0]);
    }

    #[test]
    fn zero_length_unchanged() {
        let p = Path::single(PathId(1), NodeId(7), 0.0).unwrap();
        assert_eq!(densify(&p, 360.0).unwrap(), p);
    }

    #[test]
    fn refuses_detailed_path() {
        let p = path(1, &[0.0, 100.0]);
        let err = densify(&p, 360.0).unwrap_err();
        assert_eq!(err, PathError::AlreadyDetailed { path: PathId(1), waypoints: 2 });
        assert!(!err.is_malformed());
    }

    #[test]
    fn rejects_bad_interval() {
        let p = Path::single(PathId(1), NodeId(7), 500.0).unwrap();
        assert!(matches!(
            densify(&p, 0.0),
            Err(PathError::Config(HaulError::InvalidCap { name: "interval_km", .. }))
        ));
    }

    #[test]
    fn if_needed_borrows_detailed_paths() {
        let p = path(1, &[0.0, 100.0, 900.0]);
        assert!(matches!(densify_if_needed(&p, 360.0).unwrap(), Cow::Borrowed(_)));

        let single = Path::single(PathId(2), NodeId(3), 900.0).unwrap();
        let d = densify_if_needed(&single, 360.0).unwrap();
        assert!(matches!(d, Cow::Owned(_)));
        assert_eq!(d.len(), 4);
        assert_abs_diff_eq!(d.cumulative_km()[2], 720.0);
    }
}

#[cfg(test)]
mod densifier_props {
    use hb_core::{NodeId, PathId};
    use proptest::prelude::*;

    use crate::{Path, densify};

    proptest! {
        #[test]
        fn markers_are_evenly_spaced(total in 0.1..50_000.0f64, interval in 10.0..1_000.0f64) {
            let p = Path::single(PathId(0), NodeId(0), total).unwrap();
            let d = densify(&p, interval).unwrap();
            let cum = d.cumulative_km();

            prop_assert!(cum.len() >= 2);
            prop_assert_eq!(cum[0], 0.0);
            prop_assert_eq!(*cum.last().unwrap(), total);
            prop_assert!(cum.windows(2).all(|w| w[1] > w[0]));
            // Every gap is at most one interval, plus the snap slack on the last one.
            let slack = crate::LENGTH_TOLERANCE * total + 1e-9;
            prop_assert!(cum.windows(2).all(|w| w[1] - w[0] <= interval + slack));
            // Every synthetic marker is a multiple of the interval.
            for (k, &marker) in cum[1..cum.len() - 1].iter().enumerate() {
                prop_assert_eq!(marker, (k + 1) as f64 * interval);
            }
            prop_assert!(d.sequence().iter().all(|&n| n == NodeId(0)));
        }
    }
}
