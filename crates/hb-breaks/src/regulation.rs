//! Classification of consecutive stops into short breaks and daily rests.
//!
//! The engine emits one stop per driving-time cap.  This module decides what
//! each stop *is*, walking them in order with a daily driving counter:
//!
//! ```text
//! daily_limit = daily_driving_limit_h × drivers
//! if counter + cap > daily_limit → Rest,  counter = 0
//! else                           → Break, counter += cap
//! ```
//!
//! With the defaults (4.5 h cap, 9 h limit, one driver) the pattern is
//! `B, B, R, B, B, R, …`.  Classification never moves or adds a stop.

use hb_core::RegulationConfig;

use crate::StopKind;

/// The classification of one stop.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScheduledStop {
    pub kind:       StopKind,
    pub duration_h: f64,
    /// Sum of the durations of all stops so far, this one included.
    pub stops_total_h: f64,
}

/// Infinite iterator of stop classifications for one path.
#[derive(Clone, Debug)]
pub struct StopSchedule<'a> {
    regulation:    &'a RegulationConfig,
    cap_time_h:    f64,
    daily_limit_h: f64,
    counter_h:     f64,
    stops_total_h: f64,
}

impl<'a> StopSchedule<'a> {
    pub fn new(regulation: &'a RegulationConfig, cap_time_h: f64, drivers: u8) -> Self {
        Self {
            regulation,
            cap_time_h,
            daily_limit_h: regulation.daily_driving_limit_h * f64::from(drivers),
            counter_h:     0.0,
            stops_total_h: 0.0,
        }
    }
}

impl Iterator for StopSchedule<'_> {
    type Item = ScheduledStop;

    fn next(&mut self) -> Option<ScheduledStop> {
        let (kind, duration_h) = if self.counter_h + self.cap_time_h > self.daily_limit_h {
            self.counter_h = 0.0;
            (StopKind::Rest, self.regulation.daily_rest_h)
        } else {
            self.counter_h += self.cap_time_h;
            (StopKind::Break, self.regulation.break_duration_h)
        };
        self.stops_total_h += duration_h;
        Some(ScheduledStop { kind, duration_h, stops_total_h: self.stops_total_h })
    }
}
