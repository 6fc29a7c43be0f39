//! Immutable engine configuration.
//!
//! # Design
//!
//! Every knob the engines read (driving-time cap, average speed, tolerance
//! fraction, regulation durations, per-vehicle range caps) lives in a plain
//! value type that is built once, validated once at the engine boundary, and
//! then passed by reference.  Nothing here is process-global.
//!
//! Units are fixed throughout the workspace: distances in kilometres, times
//! in hours, speeds in km/h.
//!
//! Typically loaded from a TOML file by the host application (see the
//! `corridor` demo) and handed to `hb_batch::Pipeline`.

use std::collections::BTreeSet;

use crate::{Generation, HaulError, HaulResult, TechnologyId};

/// Default proportional tolerance: a break may move to the next waypoint if
/// it overshoots the cap by at most one third of the strict candidate's gap.
pub const DEFAULT_TOLERANCE_FRACTION: f64 = 1.0 / 3.0;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Accept `value` only if it is finite and strictly positive.
pub fn check_cap(name: &'static str, value: f64) -> HaulResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(HaulError::InvalidCap { name, value })
    }
}

fn check_non_negative(name: &str, value: f64) -> HaulResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(HaulError::Config(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}

fn default_tolerance_fraction() -> f64 {
    DEFAULT_TOLERANCE_FRACTION
}

// ── RegulationConfig ──────────────────────────────────────────────────────────

/// Stop durations and limits used to classify break events as short breaks
/// or daily rests.  Defaults follow EU Regulation (EC) No 561/2006.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegulationConfig {
    /// Length of a short break.  Default: 0.75 h (45 min).
    pub break_duration_h: f64,
    /// Driving allowed per driver between daily rests.  Default: 9 h.
    pub daily_driving_limit_h: f64,
    /// Length of a daily rest.  Default: 9 h.
    pub daily_rest_h: f64,
    /// Routes with more total driving than this are assumed to be driven by
    /// a two-person crew, doubling the daily limit.  Default: 54 h.
    pub team_threshold_h: f64,
}

impl Default for RegulationConfig {
    fn default() -> Self {
        Self {
            break_duration_h:      0.75,
            daily_driving_limit_h: 9.0,
            daily_rest_h:          9.0,
            team_threshold_h:      54.0,
        }
    }
}

impl RegulationConfig {
    pub fn validate(&self) -> HaulResult<()> {
        check_non_negative("break_duration_h", self.break_duration_h)?;
        check_cap("daily_driving_limit_h", self.daily_driving_limit_h)?;
        check_non_negative("daily_rest_h", self.daily_rest_h)?;
        check_non_negative("team_threshold_h", self.team_threshold_h)?;
        Ok(())
    }

    /// Crew size for a route with `total_driving_h` hours of driving.
    #[inline]
    pub fn drivers_for(&self, total_driving_h: f64) -> u8 {
        if total_driving_h <= self.team_threshold_h { 1 } else { 2 }
    }
}

// ── BreakConfig ───────────────────────────────────────────────────────────────

/// Parameters of the break placement engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakConfig {
    /// Maximum driving time before a mandatory stop, in hours.
    pub cap_time_h: f64,

    /// Average travel speed used to convert distance to driving time.
    pub speed_kmh: f64,

    /// Fraction `τ` of the strict candidate's gap to the cap that a break may
    /// overshoot when moving to the next waypoint.
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance_fraction"))]
    pub tolerance_fraction: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub regulation: RegulationConfig,
}

impl BreakConfig {
    /// Build and validate a configuration with default regulation values.
    pub fn new(cap_time_h: f64, speed_kmh: f64, tolerance_fraction: f64) -> HaulResult<Self> {
        let config = Self {
            cap_time_h,
            speed_kmh,
            tolerance_fraction,
            regulation: RegulationConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// 4.5 h driving cap at 80 km/h with the default 1/3 tolerance.
    pub fn eu_561() -> Self {
        Self {
            cap_time_h:         4.5,
            speed_kmh:          80.0,
            tolerance_fraction: default_tolerance_fraction(),
            regulation:         RegulationConfig::default(),
        }
    }

    pub fn validate(&self) -> HaulResult<()> {
        check_cap("cap_time_h", self.cap_time_h)?;
        check_cap("speed_kmh", self.speed_kmh)?;
        check_non_negative("tolerance_fraction", self.tolerance_fraction)?;
        self.regulation.validate()
    }

    /// Distance covered in one cap interval (`cap_time_h × speed_kmh`).
    #[inline]
    pub fn interval_km(&self) -> f64 {
        self.cap_time_h * self.speed_kmh
    }

    #[inline]
    pub fn driving_time_h(&self, distance_km: f64) -> f64 {
        distance_km / self.speed_kmh
    }
}

// ── Range caps ────────────────────────────────────────────────────────────────

/// Driving range of one vehicle technology in one generation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeCap {
    pub technology: TechnologyId,
    pub generation: Generation,
    pub range_km:   f64,
}

/// All range caps the window generator runs for.
///
/// Order is preserved as given; consumers that need a canonical order sort
/// their own output.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RangeTable {
    caps: Vec<RangeCap>,
}

impl RangeTable {
    pub fn new(caps: Vec<RangeCap>) -> HaulResult<Self> {
        let table = Self { caps };
        table.validate()?;
        Ok(table)
    }

    /// Every `range_km` must be a valid cap and each `(technology,
    /// generation)` pair may appear only once.
    pub fn validate(&self) -> HaulResult<()> {
        let mut seen = BTreeSet::new();
        for cap in &self.caps {
            check_cap("range_km", cap.range_km)?;
            if !seen.insert((cap.technology, cap.generation)) {
                return Err(HaulError::Config(format!(
                    "duplicate range cap for {} {}",
                    cap.technology, cap.generation
                )));
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RangeCap> + '_ {
        self.caps.iter()
    }

    /// Range of `technology` in `generation`, if configured.
    pub fn get(&self, technology: TechnologyId, generation: Generation) -> Option<f64> {
        self.caps
            .iter()
            .find(|c| c.technology == technology && c.generation == generation)
            .map(|c| c.range_km)
    }

    pub fn len(&self) -> usize { self.caps.len() }
    pub fn is_empty(&self) -> bool { self.caps.is_empty() }
}

// ── HaulConfig ────────────────────────────────────────────────────────────────

/// Top-level configuration for a preprocessing run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HaulConfig {
    pub breaks: BreakConfig,

    #[cfg_attr(feature = "serde", serde(default))]
    pub ranges: RangeTable,
}

impl HaulConfig {
    pub fn validate(&self) -> HaulResult<()> {
        self.breaks.validate()?;
        self.ranges.validate()
    }
}
