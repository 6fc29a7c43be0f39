//! Route CSV loader.
//!
//! # CSV format
//!
//! One row per waypoint, in route order.  Rows of one path need not be
//! contiguous; paths come out in order of first appearance.
//!
//! ```csv
//! path_id,node_id,cumulative_km,total_km
//! 1,101,0.0,779.6
//! 1,102,154.2,779.6
//! 2,201,0.0,838.6
//! ```
//!
//! `total_km` is read from the first row of each path.  No validation
//! happens here; the pipeline quarantines malformed paths.

use std::collections::HashMap;
use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

use hb_core::{NodeId, PathId};
use hb_path::RawPath;

#[derive(Deserialize)]
struct RouteRecord {
    path_id:       u32,
    node_id:       u32,
    cumulative_km: f64,
    total_km:      f64,
}

/// Group waypoint rows into one [`RawPath`] per `path_id`.
pub fn load_routes_reader<R: Read>(reader: R) -> Result<Vec<RawPath>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut paths: Vec<RawPath> = Vec::new();
    let mut slot: HashMap<u32, usize> = HashMap::new();

    for (line, result) in csv_reader.deserialize::<RouteRecord>().enumerate() {
        let row = result.with_context(|| format!("route row {}", line + 1))?;
        let index = *slot.entry(row.path_id).or_insert_with(|| {
            paths.push(RawPath {
                id:              PathId(row.path_id),
                sequence:        Vec::new(),
                cumulative_km:   Vec::new(),
                total_length_km: row.total_km,
            });
            paths.len() - 1
        });
        let path = &mut paths[index];
        path.sequence.push(NodeId(row.node_id));
        path.cumulative_km.push(row.cumulative_km);
    }

    Ok(paths)
}
