//! The maximal window generator.
//!
//! # Algorithm
//!
//! A path with segments `d[0..m]` and range cap `R`:
//!
//! 1. `m == 0` → no windows.
//! 2. `Σ d ≤ R` → one window covering the whole path.
//! 3. Otherwise, for every start `s` extend a running sum rightward while it
//!    stays `≤ R`.  The run `d[s..e]` becomes a window over nodes
//!    `sequence[s..=e]`.  Starts whose first segment alone exceeds `R`
//!    produce nothing.
//!
//! Step 3 stops at the first segment that does not fit, so every window is
//! maximal on the right by construction.  Windows from neighbouring starts
//! may end at the same node; they are kept as separate subsets.

use hb_core::{Generation, HaulResult, RangeTable, TechnologyId, check_cap};
use hb_path::Path;

use crate::Window;

/// Every maximal window of `path` for one `(generation, technology)` range.
///
/// Subset ids are assigned `0, 1, 2, …` in start order.
///
/// # Errors
///
/// `HaulError::InvalidCap` if `range_cap_km` is not finite and positive.
pub fn compute_maximal_windows(
    path:          &Path,
    range_cap_km:  f64,
    generation:    Generation,
    technology_id: TechnologyId,
) -> HaulResult<Vec<Window>> {
    let cap = check_cap("range_km", range_cap_km)?;

    let distances: Vec<f64> = path.segments().map(|s| s.distance_km).collect();
    if distances.is_empty() {
        return Ok(Vec::new());
    }

    let sequence = path.sequence();
    let make = |subset_id: u32, start: usize, end: usize, length_km: f64| Window {
        path_id: path.id(),
        generation,
        technology_id,
        subset_id,
        sequence: sequence[start..=end].to_vec(),
        length_km,
        segment_count: end - start,
    };

    let total: f64 = distances.iter().sum();
    if total <= cap {
        tracing::debug!(
            path = %path.id(),
            %generation,
            %technology_id,
            total_km = total,
            "whole path fits range"
        );
        return Ok(vec![make(0, 0, distances.len(), total)]);
    }

    let mut windows = Vec::new();
    for start in 0..distances.len() {
        let mut end = start;
        let mut length_km = 0.0;
        while let Some(&d) = distances.get(end) {
            if length_km + d > cap {
                break;
            }
            length_km += d;
            end += 1;
        }
        if end > start {
            windows.push(make(windows.len() as u32, start, end, length_km));
        }
    }

    tracing::debug!(
        path = %path.id(),
        %generation,
        %technology_id,
        segments = distances.len(),
        windows = windows.len(),
        "generated windows"
    );
    Ok(windows)
}

/// Windows for every cap in `ranges`, ordered by
/// `(generation, technology_id, subset_id)`.
pub fn windows_for_table(path: &Path, ranges: &RangeTable) -> HaulResult<Vec<Window>> {
    let mut windows = Vec::new();
    for cap in ranges.iter() {
        windows.extend(compute_maximal_windows(path, cap.range_km, cap.generation, cap.technology)?);
    }
    windows.sort_by_key(|w| (w.generation, w.technology_id, w.subset_id));
    Ok(windows)
}
