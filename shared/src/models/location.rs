//! Location Schedule Model
//!
//! Per-weekday open/close hours plus the two ordering offsets. Immutable
//! reference data: the operating-hours gate reads it on every evaluation,
//! so replacing a schedule takes effect on the next call, never
//! retroactively.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Open/close hours for one weekday
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

/// Weekly schedule of a location (营业时间表)
///
/// `days[0]` is Monday. A `None` entry means the location is closed that
/// day and accepts no orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSchedule {
    pub days: [Option<DayHours>; 7],
    /// Ordering opens this many minutes before the venue itself
    pub order_open_lead_minutes: u32,
    /// Ordering closes this many minutes before the venue closes
    pub order_close_cutoff_minutes: u32,
}

impl LocationSchedule {
    /// Same hours every day (test and demo layouts)
    pub fn uniform(open: NaiveTime, close: NaiveTime, lead: u32, cutoff: u32) -> Self {
        Self {
            days: [Some(DayHours { open, close }); 7],
            order_open_lead_minutes: lead,
            order_close_cutoff_minutes: cutoff,
        }
    }

    pub fn hours_for(&self, weekday: Weekday) -> Option<DayHours> {
        self.days[weekday.num_days_from_monday() as usize]
    }
}
