//! The batch runner.
//!
//! # Phases
//!
//! 1. **Admit** (sequential): drop repeated path ids, validate every
//!    `RawPath` into a `Path`.  Failures go to quarantine.
//! 2. **Compute** (optionally parallel with the `parallel` feature): run the
//!    engines on each admitted path.  Paths share no state, so each result
//!    depends only on its own input.
//! 3. **Merge** (sequential): concatenate per-path results, quarantine
//!    failures, sort records by their output key and quarantine entries by
//!    path id.  Output is identical with and without `parallel`.

use std::collections::BTreeSet;

use hb_breaks::{BreakEvent, BreakPlanner};
use hb_core::{HaulConfig, PathId};
use hb_path::{Path, RawPath};
use hb_windows::{Window, windows_for_table};

use crate::{BatchError, BatchResult};

// ── Report types ──────────────────────────────────────────────────────────────

/// A path that was set aside, and why.
#[derive(Clone, Debug, PartialEq)]
pub struct Quarantined {
    pub path:  PathId,
    pub error: BatchError,
}

/// Result of one batch: every record from the paths that succeeded plus the
/// paths that did not.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchReport<T> {
    pub records:     Vec<T>,
    pub quarantined: Vec<Quarantined>,
}

impl<T> BatchReport<T> {
    /// `true` if no path was quarantined.
    pub fn is_clean(&self) -> bool {
        self.quarantined.is_empty()
    }

    pub fn quarantined_ids(&self) -> impl Iterator<Item = PathId> + '_ {
        self.quarantined.iter().map(|q| q.path)
    }
}

/// Both engines' output for one path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPlan {
    pub path_id: PathId,
    pub breaks:  Vec<BreakEvent>,
    pub windows: Vec<Window>,
}

/// Output records with a total merge order.
trait Keyed {
    type Key: Ord;
    fn key(&self) -> Self::Key;
}

impl Keyed for BreakEvent {
    type Key = (PathId, u32);
    fn key(&self) -> Self::Key { self.sort_key() }
}

impl Keyed for Window {
    type Key = (PathId, hb_core::Generation, hb_core::TechnologyId, u32);
    fn key(&self) -> Self::Key { self.sort_key() }
}

impl Keyed for PathPlan {
    type Key = PathId;
    fn key(&self) -> Self::Key { self.path_id }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Runs the break and window engines over a batch of upstream routes.
///
/// Configuration is validated once in [`Pipeline::new`]; afterwards a
/// failing path is quarantined and never aborts the rest of the batch.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config:  HaulConfig,
    planner: BreakPlanner,
}

impl Pipeline {
    pub fn new(config: HaulConfig) -> BatchResult<Self> {
        config.validate()?;
        let planner = BreakPlanner::new(config.breaks.clone())?;
        Ok(Self { config, planner })
    }

    pub fn config(&self) -> &HaulConfig {
        &self.config
    }

    /// Mandatory stops for every path, sorted by `(path_id, break_number)`.
    pub fn breaks(&self, raw: impl IntoIterator<Item = RawPath>) -> BatchReport<BreakEvent> {
        self.execute("breaks", raw, |path| Ok(self.planner.plan(path)?))
    }

    /// Maximal windows for every path and every configured range, sorted by
    /// `(path_id, generation, technology_id, subset_id)`.
    pub fn windows(&self, raw: impl IntoIterator<Item = RawPath>) -> BatchReport<Window> {
        self.execute("windows", raw, |path| self.path_windows(path))
    }

    /// Both engines per path.  A path failing either engine is quarantined
    /// as a whole.
    pub fn run(&self, raw: impl IntoIterator<Item = RawPath>) -> BatchReport<PathPlan> {
        self.execute("run", raw, |path| {
            Ok(vec![PathPlan {
                path_id: path.id(),
                breaks:  self.planner.plan(path)?,
                windows: self.path_windows(path)?,
            }])
        })
    }

    fn path_windows(&self, path: &Path) -> BatchResult<Vec<Window>> {
        windows_for_table(path, &self.config.ranges).map_err(BatchError::Windows)
    }

    fn execute<T, F>(
        &self,
        stage: &'static str,
        raw:   impl IntoIterator<Item = RawPath>,
        work:  F,
    ) -> BatchReport<T>
    where
        T: Keyed + Send,
        F: Fn(&Path) -> BatchResult<Vec<T>> + Sync,
    {
        let (paths, mut quarantined) = admit(raw);
        let received = paths.len() + quarantined.len();
        let results = compute(&paths, work);

        let mut records = Vec::new();
        for (path, result) in results {
            match result {
                Ok(mut out) => records.append(&mut out),
                Err(error) => quarantined.push(Quarantined { path, error }),
            }
        }

        records.sort_by(|a, b| a.key().cmp(&b.key()));
        quarantined.sort_by_key(|q| q.path);

        for q in &quarantined {
            tracing::warn!(stage, path = %q.path, error = %q.error, "path quarantined");
        }
        tracing::info!(
            stage,
            paths = received,
            records = records.len(),
            quarantined = quarantined.len(),
            "batch complete"
        );

        BatchReport { records, quarantined }
    }
}

// ── Phases ────────────────────────────────────────────────────────────────────

/// Validate raw records.  Only the first record with a given id is
/// considered, valid or not; later ones are quarantined as duplicates.
fn admit(raw: impl IntoIterator<Item = RawPath>) -> (Vec<Path>, Vec<Quarantined>) {
    let mut seen = BTreeSet::new();
    let mut paths = Vec::new();
    let mut quarantined = Vec::new();

    for record in raw {
        let id = record.id;
        if !seen.insert(id) {
            quarantined.push(Quarantined { path: id, error: BatchError::DuplicatePath { path: id } });
            continue;
        }
        match Path::try_from(record) {
            Ok(path) => paths.push(path),
            Err(e) => quarantined.push(Quarantined { path: id, error: e.into() }),
        }
    }
    (paths, quarantined)
}

/// Apply `work` to every path.  With the `parallel` Cargo feature the calls
/// run on Rayon's thread pool; results keep input order either way.
fn compute<T, F>(paths: &[Path], work: F) -> Vec<(PathId, BatchResult<Vec<T>>)>
where
    T: Send,
    F: Fn(&Path) -> BatchResult<Vec<T>> + Sync,
{
    #[cfg(not(feature = "parallel"))]
    {
        paths.iter().map(|p| (p.id(), work(p))).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        paths.par_iter().map(|p| (p.id(), work(p))).collect()
    }
}
