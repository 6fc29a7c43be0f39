//! Synthetic waypoints for underspecified paths.
//!
//! A single-waypoint path knows its length but not where along it anything
//! happens, so every break target would resolve to waypoint 0.  Densifying
//! inserts markers at each multiple of the break interval:
//!
//! ```text
//! total = 838.6 km, interval = 360 km
//! cumulative_km = [0.0, 360.0, 720.0, 838.6]
//! ```
//!
//! All synthetic waypoints reuse the path's only node id; there is no
//! geographic information to tell them apart.  The input path is never
//! modified.

use std::borrow::Cow;

use hb_core::check_cap;

use crate::path::lengths_agree;
use crate::{Path, PathError, PathResult};

/// Return a densified copy of the single-waypoint `path`.
///
/// Markers are placed at `k × interval_km` for every `k ≥ 1` strictly below
/// the total, followed by the total itself.  A marker that lands on the total
/// within tolerance is replaced by the exact total rather than duplicated.
/// A zero-length path is returned unchanged.
///
/// # Errors
///
/// - [`PathError::Config`] if `interval_km` is not a valid cap.
/// - [`PathError::AlreadyDetailed`] if `path` has more than one waypoint.
pub fn densify(path: &Path, interval_km: f64) -> PathResult<Path> {
    check_cap("interval_km", interval_km)?;
    if !path.is_underspecified() {
        return Err(PathError::AlreadyDetailed { path: path.id(), waypoints: path.len() });
    }

    let total = path.total_length_km();
    if total == 0.0 {
        return Ok(path.clone());
    }

    let mut cumulative = vec![0.0];
    let mut k: u64 = 1;
    loop {
        let marker = k as f64 * interval_km;
        if marker >= total {
            break;
        }
        cumulative.push(marker);
        k += 1;
    }

    let n = cumulative.len();
    if n > 1 && lengths_agree(cumulative[n - 1], total) {
        cumulative[n - 1] = total;
    } else {
        cumulative.push(total);
    }

    let node = path.sequence()[0];
    let densified = Path::new(path.id(), vec![node; cumulative.len()], cumulative, total)?;
    tracing::debug!(
        path = %path.id(),
        waypoints = densified.len(),
        interval_km,
        "densified underspecified path"
    );
    Ok(densified)
}

/// Borrow `path` unchanged unless it is underspecified with a positive
/// length, in which case return its densified copy.
pub fn densify_if_needed(path: &Path, interval_km: f64) -> PathResult<Cow<'_, Path>> {
    check_cap("interval_km", interval_km)?;
    if path.is_underspecified() && path.total_length_km() > 0.0 {
        densify(path, interval_km).map(Cow::Owned)
    } else {
        Ok(Cow::Borrowed(path))
    }
}
