//! Unit tests for hb-windows.

#[cfg(test)]
mod helpers {
    use hb_core::{NodeId, PathId};
    use hb_path::Path;

    /// Path through nodes `0, 1, 2, …` at the given cumulative distances.
    pub fn path(cumulative_km: &[f64]) -> Path {
        let nodes = (0..cumulative_km.len()).map(|i| NodeId(i as u32)).collect();
        let total = *cumulative_km.last().unwrap();
        Path::new(PathId(7), nodes, cumulative_km.to_vec(), total).unwrap()
    }

    pub fn ids(range: std::ops::RangeInclusive<u32>) -> Vec<NodeId> {
        range.map(NodeId).collect()
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generator {
    use approx::assert_abs_diff_eq;
    use hb_core::{Generation, HaulError, NodeId, PathId, TechnologyId};
    use hb_path::Path;

    use super::helpers::{ids, path};
    use crate::compute_maximal_windows;

    const GEN: Generation = Generation(2030);
    const TECH: TechnologyId = TechnologyId(2);

    #[test]
    fn sliding_starts_produce_overlapping_windows() {
        // Segments 100, 150, 50, 150 under a 200 km range.
        let p = path(&[0.0, 100.0, 250.0, 300.0, 450.0]);
        let windows = compute_maximal_windows(&p, 200.0, GEN, TECH).unwrap();

        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0].sequence, ids(0..=1));
        assert_eq!(windows[1].sequence, ids(1..=3));
        assert_eq!(windows[2].sequence, ids(2..=4));
        assert_eq!(windows[3].sequence, ids(3..=4));
        assert_abs_diff_eq!(windows[1].length_km, 200.0);
        assert_eq!(windows[1].segment_count, 2);

        let subsets: Vec<u32> = windows.iter().map(|w| w.subset_id).collect();
        assert_eq!(subsets, vec![0, 1, 2, 3]);
        assert!(windows.iter().all(|w| {
            w.path_id == PathId(7) && w.generation == GEN && w.technology_id == TECH
        }));
    }

    #[test]
    fn whole_path_within_range_collapses_to_one_window() {
        let p = path(&[0.0, 100.0, 250.0, 300.0, 450.0]);
        let windows = compute_maximal_windows(&p, 450.0, GEN, TECH).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].subset_id, 0);
        assert_eq!(windows[0].sequence, ids(0..=4));
        assert_eq!(windows[0].segment_count, 4);
        assert_abs_diff_eq!(windows[0].length_km, 450.0);
    }

    #[test]
    fn oversized_segment_yields_no_window_and_no_subset_id() {
        // Segments 50, 300, 50 under a 100 km range.
        let p = path(&[0.0, 50.0, 350.0, 400.0]);
        let windows = compute_maximal_windows(&p, 100.0, GEN, TECH).unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].subset_id, 0);
        assert_eq!(windows[0].sequence, ids(0..=1));
        assert_eq!(windows[1].subset_id, 1);
        assert_eq!(windows[1].sequence, ids(2..=3));
    }

    #[test]
    fn windows_sharing_an_end_are_kept() {
        // Segments 10, 10, 180 under a 100 km range: starts 0 and 1 both stop at node 2.
        let p = path(&[0.0, 10.0, 20.0, 200.0]);
        let windows = compute_maximal_windows(&p, 100.0, GEN, TECH).unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].last_node(), Some(NodeId(2)));
        assert_eq!(windows[1].last_node(), Some(NodeId(2)));
        assert_eq!(windows[0].first_node(), Some(NodeId(0)));
        assert_eq!(windows[1].first_node(), Some(NodeId(1)));
    }

    #[test]
    fn zero_length_segments_are_absorbed() {
        let p = path(&[0.0, 0.0, 80.0, 80.0, 200.0]);
        let windows = compute_maximal_windows(&p, 100.0, GEN, TECH).unwrap();
        assert_eq!(windows[0].sequence, ids(0..=3));
        assert_abs_diff_eq!(windows[0].length_km, 80.0);
    }

    #[test]
    fn single_waypoint_path_has_no_windows() {
        let p = Path::single(PathId(1), NodeId(9), 500.0).unwrap();
        assert!(compute_maximal_windows(&p, 1_000.0, GEN, TECH).unwrap().is_empty());
    }

    #[test]
    fn non_positive_range_rejected() {
        let p = path(&[0.0, 100.0]);
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = compute_maximal_windows(&p, bad, GEN, TECH).unwrap_err();
            assert!(matches!(err, HaulError::InvalidCap { name: "range_km", .. }));
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let p = path(&[0.0, 100.0, 250.0, 300.0, 450.0]);
        let a = compute_maximal_windows(&p, 200.0, GEN, TECH).unwrap();
        let b = compute_maximal_windows(&p, 200.0, GEN, TECH).unwrap();
        assert_eq!(a, b);
    }
}

// ── Range tables ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use hb_core::{Generation, RangeCap, RangeTable, TechnologyId};

    use super::helpers::path;
    use crate::windows_for_table;

    fn cap(technology: u32, generation: u16, range_km: f64) -> RangeCap {
        RangeCap {
            technology: TechnologyId(technology),
            generation: Generation(generation),
            range_km,
        }
    }

    #[test]
    fn ordered_by_generation_then_technology() {
        let p = path(&[0.0, 100.0, 250.0, 300.0, 450.0]);
        let table = RangeTable::new(vec![
            cap(2, 2040, 500.0),
            cap(1, 2030, 200.0),
            cap(2, 2030, 300.0),
        ])
        .unwrap();
        let windows = windows_for_table(&p, &table).unwrap();

        let keys: Vec<(u16, u32, u32)> = windows
            .iter()
            .map(|w| (w.generation.0, w.technology_id.0, w.subset_id))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        // Four overlapping windows at 200 km and at 300 km, one full window at 500 km.
        assert_eq!(keys.iter().filter(|k| (k.0, k.1) == (2030, 1)).count(), 4);
        assert_eq!(keys.iter().filter(|k| (k.0, k.1) == (2030, 2)).count(), 4);
        assert_eq!(keys.iter().filter(|k| (k.0, k.1) == (2040, 2)).count(), 1);
    }

    #[test]
    fn empty_table_gives_no_windows() {
        let p = path(&[0.0, 100.0]);
        assert!(windows_for_table(&p, &RangeTable::default()).unwrap().is_empty());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use hb_core::{Generation, NodeId, PathId, TechnologyId};
    use hb_path::Path;
    use proptest::prelude::*;

    use crate::compute_maximal_windows;

    fn any_path() -> impl Strategy<Value = Path> {
        prop::collection::vec(0.0..300.0f64, 1..40).prop_map(|steps| {
            let mut cumulative = vec![0.0];
            for step in steps {
                let next = cumulative[cumulative.len() - 1] + step;
                cumulative.push(next);
            }
            let nodes = (0..cumulative.len()).map(|i| NodeId(i as u32)).collect();
            let total = cumulative[cumulative.len() - 1];
            Path::new(PathId(0), nodes, cumulative, total).unwrap()
        })
    }

    fn distances(p: &Path) -> Vec<f64> {
        p.segments().map(|s| s.distance_km).collect()
    }

    proptest! {
        #[test]
        fn windows_fit_the_range(p in any_path(), cap in 1.0..1_000.0f64) {
            let windows = compute_maximal_windows(&p, cap, Generation(2030), TechnologyId(0)).unwrap();
            for w in &windows {
                prop_assert!(w.length_km <= cap);
                prop_assert_eq!(w.sequence.len(), w.segment_count + 1);
            }
        }

        #[test]
        fn windows_cannot_absorb_the_next_segment(p in any_path(), cap in 1.0..1_000.0f64) {
            let d = distances(&p);
            let windows = compute_maximal_windows(&p, cap, Generation(2030), TechnologyId(0)).unwrap();
            for w in &windows {
                let end = w.sequence[w.sequence.len() - 1].index();
                if let Some(&next) = d.get(end) {
                    prop_assert!(w.length_km + next > cap);
                }
            }
        }

        #[test]
        fn subset_ids_are_dense(p in any_path(), cap in 1.0..1_000.0f64) {
            let windows = compute_maximal_windows(&p, cap, Generation(2030), TechnologyId(0)).unwrap();
            for (i, w) in windows.iter().enumerate() {
                prop_assert_eq!(w.subset_id as usize, i);
            }
            prop_assert!(windows.len() <= p.segment_count());
        }

        #[test]
        fn fitting_path_collapses(p in any_path()) {
            let total: f64 = distances(&p).iter().sum();
            let cap = total + 1.0;
            let windows = compute_maximal_windows(&p, cap, Generation(2030), TechnologyId(0)).unwrap();
            prop_assert_eq!(windows.len(), 1);
            prop_assert_eq!(&windows[0].sequence, p.sequence());
        }
    }
}
