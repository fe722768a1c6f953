//! Weather data model shared across the scheduler.
//!
//! A day's weather is an ordered sequence of [`HourSample`] values,
//! produced either by the live provider ([`wttr`]) or synthesized from
//! the historical week-of-year table ([`climate`]). The scheduler never
//! cares which -- [`DayWeather::live`] only tags the origin for display.

pub mod climate;
pub mod wttr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub use climate::{ClimateTable, WeekClimate};
pub use wttr::WttrClient;

/// One hourly weather sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourSample {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Temperature in degrees Celsius
    pub temp_c: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Chance of rain in percent
    pub rain_chance: f64,
    /// Precipitation depth in millimetres
    #[serde(default)]
    pub rain_mm: f64,
    /// Free-text description from the provider, if any
    #[serde(default)]
    pub desc: Option<String>,
}

/// Weather context for one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayWeather {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    /// True when the samples came from the live provider rather than
    /// the historical table.
    pub live: bool,
    /// Hourly samples, ordered by hour within the day.
    pub hourly: Vec<HourSample>,
}

/// Sunrise/sunset bounds for a day, as fractional hours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SunTimes {
    pub rise: f64,
    pub set: f64,
}

impl SunTimes {
    /// First whole hour of daylight (sunrise rounded up).
    pub fn first_hour(&self) -> u8 {
        self.rise.ceil() as u8
    }

    /// First whole hour after the working window (sunset rounded down);
    /// candidate hours are `first_hour()..last_hour()`.
    pub fn last_hour(&self) -> u8 {
        self.set.floor() as u8
    }
}

/// Approximate monthly sunrise/sunset for central Korea, index 0 = January.
const MONTHLY_SUN: [(f64, f64); 12] = [
    (7.5, 17.5),
    (7.0, 18.0),
    (6.5, 18.5),
    (6.0, 19.0),
    (5.5, 19.5),
    (5.2, 20.0),
    (5.3, 19.8),
    (5.7, 19.3),
    (6.2, 18.5),
    (6.5, 17.8),
    (7.0, 17.3),
    (7.4, 17.2),
];

/// Sunrise/sunset for a date, from the monthly approximation table.
pub fn sun_times(date: NaiveDate) -> SunTimes {
    let (rise, set) = MONTHLY_SUN[date.month0() as usize];
    SunTimes { rise, set }
}

/// The most recent Sunday on or before `date` -- the start of the
/// planning week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as i64;
    date - Duration::days(back)
}

/// English weekday names indexed 0=Sunday..6=Saturday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_start_is_most_recent_sunday() {
        // 2026-02-04 is a Wednesday
        let wed = NaiveDate::from_ymd_opt(2026, 2, 4).unwrap();
        let start = week_start(wed);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(start.weekday().num_days_from_sunday(), 0);

        // Already a Sunday: unchanged
        assert_eq!(week_start(start), start);
    }

    #[test]
    fn sun_times_round_to_working_window() {
        // June: rise 5.2, set 20.0
        let june = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();
        let sun = sun_times(june);
        assert_eq!(sun.first_hour(), 6);
        assert_eq!(sun.last_hour(), 20);

        // January: rise 7.5, set 17.5
        let jan = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let sun = sun_times(jan);
        assert_eq!(sun.first_hour(), 8);
        assert_eq!(sun.last_hour(), 17);
    }
}
