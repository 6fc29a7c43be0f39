//! corridor — example preprocessing run for the haulbreak crates.
//!
//! Places mandatory stops and range windows on five long-haul truck routes
//! along a synthetic north–south freight corridor, then writes the records
//! the downstream charging-infrastructure model consumes.
//!
//! ```text
//! cargo run -p corridor                 # embedded corridor.toml
//! cargo run -p corridor -- my.toml      # custom configuration
//! RUST_LOG=debug cargo run -p corridor  # per-stop placement logs
//! ```

mod routes;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hb_batch::{PathPlan, Pipeline};
use hb_core::HaulConfig;

use routes::load_routes_reader;

// ── Embedded inputs ───────────────────────────────────────────────────────────

const DEFAULT_CONFIG: &str = include_str!("../corridor.toml");

const OUTPUT_DIR: &str = "output/corridor";

// Route 1: fully detailed.  Routes 2 and 3: aggregated to one waypoint.
// Route 4: detailed, long enough for a daily rest.  Route 5: broken upstream
// extraction (distance goes backwards), quarantined by the pipeline.
pub(crate) const ROUTES_CSV: &str = "\
path_id,node_id,cumulative_km,total_km\n\
1,101,0.0,779.6\n\
1,102,154.2,779.6\n\
1,103,290.0,779.6\n\
1,104,352.8,779.6\n\
1,105,489.5,779.6\n\
1,106,611.0,779.6\n\
1,107,779.6,779.6\n\
2,201,0.0,562.8\n\
3,301,0.0,838.6\n\
4,401,0.0,1104.7\n\
4,402,212.4,1104.7\n\
4,403,367.1,1104.7\n\
4,404,371.9,1104.7\n\
4,405,598.0,1104.7\n\
4,406,802.3,1104.7\n\
4,407,955.0,1104.7\n\
4,408,1104.7,1104.7\n\
5,501,0.0,300.0\n\
5,502,120.0,300.0\n\
5,503,95.0,300.0\n\
5,504,300.0,300.0\n\
";

// ── Output rows ───────────────────────────────────────────────────────────────

/// Flat CSV shape of a window; the node sequence is `;`-joined.
#[derive(Serialize)]
struct WindowRow<'a> {
    path_id:       u32,
    generation:    u16,
    technology_id: u32,
    subset_id:     u32,
    length_km:     f64,
    segment_count: usize,
    sequence:      &'a str,
}

fn write_outputs(dir: &Path, plans: &[PathPlan]) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut breaks = csv::Writer::from_path(dir.join("break_events.csv"))?;
    for event in plans.iter().flat_map(|p| &p.breaks) {
        breaks.serialize(event)?;
    }
    breaks.flush()?;

    let mut windows = csv::Writer::from_path(dir.join("windows.csv"))?;
    for w in plans.iter().flat_map(|p| &p.windows) {
        let sequence = w
            .sequence
            .iter()
            .map(|n| n.0.to_string())
            .collect::<Vec<_>>()
            .join(";");
        windows.serialize(WindowRow {
            path_id:       w.path_id.0,
            generation:    w.generation.0,
            technology_id: w.technology_id.0,
            subset_id:     w.subset_id,
            length_km:     w.length_km,
            segment_count: w.segment_count,
            sequence:      &sequence,
        })?;
    }
    windows.flush()?;
    Ok(())
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<HaulConfig> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {p}"))?,
        None => DEFAULT_CONFIG.to_owned(),
    };
    toml::from_str(&text).context("parsing configuration")
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== corridor — haulbreak route segmentation ===");

    // 1. Configuration.
    let arg = std::env::args().nth(1);
    let config = load_config(arg.as_deref())?;
    tracing::info!(source = arg.as_deref().unwrap_or("embedded corridor.toml"), "configuration loaded");
    println!(
        "Cap: {} h at {} km/h (interval {} km)  |  tolerance {:.3}  |  ranges: {}",
        config.breaks.cap_time_h,
        config.breaks.speed_kmh,
        config.breaks.interval_km(),
        config.breaks.tolerance_fraction,
        config.ranges.len(),
    );
    let pipeline = Pipeline::new(config)?;

    // 2. Routes.
    let routes = load_routes_reader(Cursor::new(ROUTES_CSV))?;
    println!("Loaded {} routes", routes.len());
    println!();

    // 3. Run both engines.
    let t0 = Instant::now();
    let report = pipeline.run(routes);
    let elapsed = t0.elapsed();
    println!("Segmentation complete in {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!();

    // 4. Stops table.
    println!(
        "{:<6} {:<4} {:<5} {:<9} {:<6} {:>9} {:>8} {:>9}",
        "Path", "#", "Kind", "Waypoint", "Node", "km", "drive h", "elapsed h"
    );
    println!("{}", "-".repeat(64));
    // `*` marks a stop placed on a synthetic marker between waypoints.
    for event in report.records.iter().flat_map(|p| &p.breaks) {
        println!(
            "{:<6} {:<4} {:<5} {:<9} {:<6} {:>9.1} {:>8.2} {:>9.2}",
            event.path_id.0,
            event.break_number,
            event.kind.code(),
            format!("{}{}", event.waypoint_index, if event.synthetic { "*" } else { "" }),
            event.node_id.0,
            event.cumulative_km,
            event.cumulative_driving_h,
            event.elapsed_h,
        );
    }
    println!();

    // 5. Window counts.
    for plan in &report.records {
        println!("Path {:<4} {:>3} windows", plan.path_id.0, plan.windows.len());
    }

    // 6. Quarantine.
    if !report.is_clean() {
        println!();
        println!("Quarantined:");
        for q in &report.quarantined {
            println!("  {}: {}", q.path, q.error);
        }
    }

    // 7. Records for the downstream model.
    write_outputs(Path::new(OUTPUT_DIR), &report.records)?;
    println!();
    println!("Wrote {OUTPUT_DIR}/break_events.csv and {OUTPUT_DIR}/windows.csv");

    Ok(())
}
