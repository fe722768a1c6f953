//! Historical week-of-year climate table.
//!
//! Hourly averages for a grape-growing region of central Korea, derived
//! from the most recent five-year normals. Weeks 1-28 (mid-January
//! through early August, the active season) carry measured hourly
//! values for the 13 working hours 06:00-18:00; weeks 29-52 are
//! synthesized from monthly baseline curves.
//!
//! The table is a constructed, frozen value: build it once with
//! [`ClimateTable::new`] and pass it into the engine. Every week 1-52
//! resolves; anything out of range falls back to week 1, so a caller
//! can always obtain usable weather context for a date.

use chrono::NaiveDate;
use serde::Serialize;

use super::{DayWeather, HourSample};

/// Hours covered by a climate-table day.
pub const CLIMATE_HOURS: [u8; 13] = [6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18];

/// Climate summary for one week of the year.
#[derive(Debug, Clone, Serialize)]
pub struct WeekClimate {
    pub week: u32,
    /// Hourly samples for hours 06:00-18:00. Rain chance is the weekly
    /// average applied to every hour; depth is unknown and left at zero.
    pub hourly: Vec<HourSample>,
    pub rain_chance: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub avg_temp: f64,
}

impl WeekClimate {
    /// Synthesize a day's weather context for `date` from this week's
    /// averages.
    pub fn day_weather(&self, date: NaiveDate) -> DayWeather {
        DayWeather {
            date,
            min_temp: self.min_temp,
            max_temp: self.max_temp,
            live: false,
            hourly: self.hourly.clone(),
        }
    }
}

/// Measured weekly normals: hourly temperatures and humidity for hours
/// 6..18, weekly rain chance, and min/avg/max temperature.
struct MeasuredWeek {
    temps: [i32; 13],
    humidity: [i32; 13],
    rain_chance: i32,
    avg: i32,
    min: i32,
    max: i32,
}

#[rustfmt::skip]
const MEASURED_WEEKS: [MeasuredWeek; 28] = [
    // Week 1 (Jan 19-25) -- heat trapping begins
    MeasuredWeek { temps: [-2, -1, 0, 2, 4, 5, 6, 6, 6, 5, 4, 2, 1],
                   humidity: [82, 80, 77, 72, 67, 62, 57, 55, 57, 62, 67, 72, 77],
                   rain_chance: 18, avg: 2, min: -2, max: 6 },
    // Week 2 (Jan 26 - Feb 1)
    MeasuredWeek { temps: [-1, 0, 1, 3, 5, 6, 7, 7, 7, 6, 5, 3, 2],
                   humidity: [80, 77, 74, 69, 64, 59, 54, 52, 54, 59, 64, 69, 74],
                   rain_chance: 17, avg: 3, min: -1, max: 7 },
    // Week 3 (Feb 2-8)
    MeasuredWeek { temps: [0, 1, 2, 4, 6, 8, 9, 9, 9, 8, 6, 4, 3],
                   humidity: [79, 76, 73, 68, 63, 58, 53, 51, 53, 58, 63, 68, 73],
                   rain_chance: 20, avg: 4, min: 0, max: 9 },
    // Week 4 (Feb 9-15)
    MeasuredWeek { temps: [1, 2, 3, 5, 7, 9, 10, 10, 10, 9, 7, 5, 4],
                   humidity: [77, 74, 71, 66, 61, 56, 51, 49, 51, 56, 61, 66, 71],
                   rain_chance: 22, avg: 5, min: 1, max: 10 },
    // Week 5 (Feb 16-23)
    MeasuredWeek { temps: [2, 4, 5, 7, 9, 11, 12, 12, 12, 11, 9, 7, 5],
                   humidity: [75, 72, 69, 64, 59, 54, 49, 47, 49, 54, 59, 64, 69],
                   rain_chance: 24, avg: 7, min: 2, max: 12 },
    // Week 6 (Feb 24 - Mar 2) -- bud break
    MeasuredWeek { temps: [3, 5, 6, 8, 10, 12, 13, 13, 13, 12, 10, 8, 6],
                   humidity: [73, 70, 67, 62, 57, 52, 47, 45, 47, 52, 57, 62, 67],
                   rain_chance: 27, avg: 8, min: 3, max: 13 },
    // Week 7 (Mar 3-9)
    MeasuredWeek { temps: [4, 6, 7, 9, 11, 13, 14, 14, 14, 13, 11, 9, 7],
                   humidity: [71, 68, 65, 60, 55, 50, 45, 43, 45, 50, 55, 60, 65],
                   rain_chance: 30, avg: 9, min: 4, max: 14 },
    // Week 8 (Mar 10-16)
    MeasuredWeek { temps: [5, 7, 9, 11, 13, 15, 16, 16, 16, 15, 13, 11, 9],
                   humidity: [69, 66, 63, 58, 53, 48, 43, 41, 43, 48, 53, 58, 63],
                   rain_chance: 32, avg: 10, min: 5, max: 16 },
    // Week 9 (Mar 17-23)
    MeasuredWeek { temps: [7, 9, 10, 12, 14, 16, 17, 17, 17, 16, 14, 12, 10],
                   humidity: [67, 64, 61, 56, 51, 46, 41, 39, 41, 46, 51, 56, 61],
                   rain_chance: 34, avg: 12, min: 7, max: 17 },
    // Week 10 (Mar 24-30)
    MeasuredWeek { temps: [8, 10, 12, 14, 16, 18, 19, 19, 19, 18, 16, 14, 12],
                   humidity: [65, 62, 59, 54, 49, 44, 39, 37, 39, 44, 49, 54, 59],
                   rain_chance: 37, avg: 13, min: 8, max: 19 },
    // Week 11 (Mar 31 - Apr 6) -- flowering
    MeasuredWeek { temps: [9, 11, 13, 15, 17, 19, 20, 20, 20, 19, 17, 15, 13],
                   humidity: [63, 60, 57, 52, 47, 42, 37, 35, 37, 42, 47, 52, 57],
                   rain_chance: 40, avg: 15, min: 9, max: 20 },
    // Week 12 (Apr 7-13)
    MeasuredWeek { temps: [11, 13, 15, 17, 19, 21, 22, 22, 22, 21, 19, 17, 15],
                   humidity: [62, 59, 55, 50, 45, 40, 35, 33, 35, 40, 45, 50, 55],
                   rain_chance: 42, avg: 16, min: 11, max: 22 },
    // Week 13 (Apr 14-20)
    MeasuredWeek { temps: [10, 12, 14, 16, 18, 20, 21, 21, 21, 20, 18, 16, 14],
                   humidity: [64, 61, 57, 52, 47, 42, 37, 35, 37, 42, 47, 52, 57],
                   rain_chance: 42, avg: 15, min: 10, max: 21 },
    // Week 14 (Apr 21-27)
    MeasuredWeek { temps: [11, 13, 15, 17, 19, 21, 22, 22, 22, 21, 19, 17, 15],
                   humidity: [63, 60, 56, 51, 46, 41, 36, 34, 36, 41, 46, 51, 56],
                   rain_chance: 45, avg: 17, min: 11, max: 22 },
    // Week 15 (Apr 28 - May 4)
    MeasuredWeek { temps: [13, 15, 17, 19, 21, 23, 24, 24, 24, 23, 21, 19, 17],
                   humidity: [62, 59, 55, 50, 45, 40, 35, 33, 35, 40, 45, 50, 55],
                   rain_chance: 48, avg: 18, min: 13, max: 24 },
    // Week 16 (May 5-11)
    MeasuredWeek { temps: [14, 16, 18, 20, 22, 24, 25, 25, 25, 24, 22, 20, 18],
                   humidity: [61, 58, 54, 49, 44, 39, 34, 32, 34, 39, 44, 49, 54],
                   rain_chance: 50, avg: 19, min: 14, max: 25 },
    // Week 17 (May 12-18)
    MeasuredWeek { temps: [15, 17, 19, 21, 23, 25, 26, 26, 26, 25, 23, 21, 19],
                   humidity: [60, 57, 53, 48, 43, 38, 33, 31, 33, 38, 43, 48, 53],
                   rain_chance: 52, avg: 20, min: 15, max: 26 },
    // Week 18 (May 19-25)
    MeasuredWeek { temps: [16, 18, 20, 22, 24, 26, 27, 27, 27, 26, 24, 22, 20],
                   humidity: [62, 59, 55, 50, 45, 40, 35, 33, 35, 40, 45, 50, 55],
                   rain_chance: 55, avg: 21, min: 16, max: 27 },
    // Week 19 (May 26 - Jun 1)
    MeasuredWeek { temps: [17, 19, 21, 23, 25, 27, 28, 28, 28, 27, 25, 23, 21],
                   humidity: [65, 62, 58, 53, 48, 43, 38, 36, 38, 43, 48, 53, 58],
                   rain_chance: 58, avg: 22, min: 17, max: 28 },
    // Week 20 (Jun 2-8)
    MeasuredWeek { temps: [18, 20, 22, 24, 26, 27, 28, 28, 28, 27, 26, 24, 22],
                   humidity: [68, 65, 61, 56, 51, 46, 41, 39, 41, 46, 51, 56, 61],
                   rain_chance: 60, avg: 23, min: 18, max: 28 },
    // Week 21 (Jun 9-15)
    MeasuredWeek { temps: [19, 21, 23, 25, 27, 28, 29, 29, 29, 28, 27, 25, 23],
                   humidity: [72, 69, 65, 60, 55, 50, 45, 43, 45, 50, 55, 60, 65],
                   rain_chance: 65, avg: 24, min: 19, max: 29 },
    // Week 22 (Jun 16-22)
    MeasuredWeek { temps: [20, 22, 24, 26, 28, 29, 30, 30, 30, 29, 28, 26, 24],
                   humidity: [75, 72, 68, 63, 58, 53, 48, 46, 48, 53, 58, 63, 68],
                   rain_chance: 70, avg: 25, min: 20, max: 30 },
    // Week 23 (Jun 23-29) -- monsoon onset
    MeasuredWeek { temps: [21, 23, 25, 26, 28, 29, 30, 30, 30, 29, 28, 26, 25],
                   humidity: [78, 75, 71, 66, 61, 56, 51, 49, 51, 56, 61, 66, 71],
                   rain_chance: 75, avg: 25, min: 21, max: 30 },
    // Week 24 (Jun 30 - Jul 6)
    MeasuredWeek { temps: [22, 24, 26, 27, 29, 30, 31, 31, 31, 30, 29, 27, 26],
                   humidity: [80, 77, 73, 68, 63, 58, 53, 51, 53, 58, 63, 68, 73],
                   rain_chance: 72, avg: 26, min: 22, max: 31 },
    // Week 25 (Jul 7-13)
    MeasuredWeek { temps: [23, 25, 27, 28, 30, 31, 32, 32, 32, 31, 30, 28, 27],
                   humidity: [82, 79, 75, 70, 65, 60, 55, 53, 55, 60, 65, 70, 75],
                   rain_chance: 68, avg: 27, min: 23, max: 32 },
    // Week 26 (Jul 14-20)
    MeasuredWeek { temps: [24, 26, 28, 29, 31, 32, 33, 33, 33, 32, 31, 29, 28],
                   humidity: [80, 77, 73, 68, 63, 58, 53, 51, 53, 58, 63, 68, 73],
                   rain_chance: 65, avg: 28, min: 24, max: 33 },
    // Week 27 (Jul 21-27)
    MeasuredWeek { temps: [25, 27, 28, 30, 31, 32, 33, 33, 33, 32, 31, 30, 28],
                   humidity: [78, 75, 71, 66, 61, 56, 51, 49, 51, 56, 61, 66, 71],
                   rain_chance: 55, avg: 29, min: 25, max: 33 },
    // Week 28 (Jul 28 - Aug 3) -- harvest
    MeasuredWeek { temps: [25, 27, 29, 30, 32, 33, 34, 34, 34, 33, 32, 30, 29],
                   humidity: [76, 73, 69, 64, 59, 54, 49, 47, 49, 54, 59, 64, 69],
                   rain_chance: 45, avg: 29, min: 25, max: 34 },
];

/// Per-hour temperature offsets from the daily baseline used when
/// synthesizing weeks 29-52, and the matching humidity offsets.
const SYNTH_TEMP_OFFSETS: [f64; 13] = [
    -6.0, -5.0, -3.0, -1.0, 1.0, 3.0, 4.0, 4.0, 4.0, 3.0, 1.0, -1.0, -3.0,
];
const SYNTH_HUMIDITY_OFFSETS: [f64; 13] = [
    10.0, 8.0, 5.0, 0.0, -5.0, -10.0, -15.0, -17.0, -15.0, -10.0, -5.0, 0.0, 5.0,
];

/// Monthly baseline (temperature, humidity, rain chance) for a late-year
/// week: August tapers from the week-28 highs, then each month steps down.
fn autumn_winter_baseline(week: u32) -> (f64, f64, f64) {
    if week <= 32 {
        (28.0 - (week as f64 - 28.0) * 0.5, 75.0, 50.0)
    } else if week <= 36 {
        (24.0 - (week as f64 - 32.0) * 1.5, 70.0, 45.0)
    } else if week <= 40 {
        (18.0 - (week as f64 - 36.0) * 2.0, 65.0, 35.0)
    } else if week <= 44 {
        (10.0 - (week as f64 - 40.0) * 2.0, 60.0, 30.0)
    } else if week <= 48 {
        (2.0 - (week as f64 - 44.0) * 1.5, 65.0, 25.0)
    } else {
        (-4.0, 70.0, 20.0)
    }
}

fn synthesize_week(week: u32) -> WeekClimate {
    let (base_temp, humidity, rain) = autumn_winter_baseline(week);
    let hourly = CLIMATE_HOURS
        .iter()
        .enumerate()
        .map(|(i, &hour)| HourSample {
            hour,
            temp_c: (base_temp + SYNTH_TEMP_OFFSETS[i]).round(),
            humidity: (humidity + SYNTH_HUMIDITY_OFFSETS[i]).round(),
            rain_chance: rain,
            rain_mm: 0.0,
            desc: Some("historical average".to_string()),
        })
        .collect();

    WeekClimate {
        week,
        hourly,
        rain_chance: rain,
        min_temp: (base_temp - 6.0).round(),
        max_temp: (base_temp + 4.0).round(),
        avg_temp: base_temp.round(),
    }
}

/// Frozen lookup table of weekly climate normals, weeks 1-52.
#[derive(Debug, Clone)]
pub struct ClimateTable {
    weeks: Vec<WeekClimate>,
}

impl ClimateTable {
    /// Build the full table: measured weeks 1-28, synthesized 29-52.
    pub fn new() -> Self {
        let mut weeks = Vec::with_capacity(52);
        for (i, m) in MEASURED_WEEKS.iter().enumerate() {
            let week = (i + 1) as u32;
            let hourly = CLIMATE_HOURS
                .iter()
                .enumerate()
                .map(|(j, &hour)| HourSample {
                    hour,
                    temp_c: m.temps[j] as f64,
                    humidity: m.humidity[j] as f64,
                    rain_chance: m.rain_chance as f64,
                    rain_mm: 0.0,
                    desc: Some("historical average".to_string()),
                })
                .collect();
            weeks.push(WeekClimate {
                week,
                hourly,
                rain_chance: m.rain_chance as f64,
                min_temp: m.min as f64,
                max_temp: m.max as f64,
                avg_temp: m.avg as f64,
            });
        }
        for week in 29..=52 {
            weeks.push(synthesize_week(week));
        }
        Self { weeks }
    }

    /// Look up a week of the year (1-52). Out-of-range weeks resolve to
    /// week 1, so every date always has usable weather context.
    pub fn lookup(&self, week: u32) -> &WeekClimate {
        if (1..=52).contains(&week) {
            &self.weeks[(week - 1) as usize]
        } else {
            &self.weeks[0]
        }
    }
}

impl Default for ClimateTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_week_resolves() {
        let table = ClimateTable::new();
        for week in 1..=52 {
            let w = table.lookup(week);
            assert_eq!(w.week, week);
            assert_eq!(w.hourly.len(), 13);
            assert_eq!(w.hourly[0].hour, 6);
            assert_eq!(w.hourly[12].hour, 18);
        }
    }

    #[test]
    fn out_of_range_falls_back_to_week_one() {
        let table = ClimateTable::new();
        assert_eq!(table.lookup(0).week, 1);
        assert_eq!(table.lookup(53).week, 1);
        assert_eq!(table.lookup(999).week, 1);
    }

    #[test]
    fn measured_week_values() {
        let table = ClimateTable::new();
        let w1 = table.lookup(1);
        assert_eq!(w1.min_temp, -2.0);
        assert_eq!(w1.max_temp, 6.0);
        assert_eq!(w1.rain_chance, 18.0);
        // 09:00 is index 3
        assert_eq!(w1.hourly[3].temp_c, 2.0);
        assert_eq!(w1.hourly[3].humidity, 72.0);

        let w28 = table.lookup(28);
        assert_eq!(w28.max_temp, 34.0);
        assert_eq!(w28.hourly[6].temp_c, 34.0); // noon peak
    }

    #[test]
    fn synthesized_week_follows_baseline() {
        let table = ClimateTable::new();
        // Week 30: base 28 - 2*0.5 = 27
        let w30 = table.lookup(30);
        assert_eq!(w30.avg_temp, 27.0);
        assert_eq!(w30.min_temp, 21.0);
        assert_eq!(w30.max_temp, 31.0);
        assert_eq!(w30.rain_chance, 50.0);
        // 06:00 = base - 6, humidity 75 + 10
        assert_eq!(w30.hourly[0].temp_c, 21.0);
        assert_eq!(w30.hourly[0].humidity, 85.0);

        // Week 50: flat January-like baseline
        let w50 = table.lookup(50);
        assert_eq!(w50.avg_temp, -4.0);
        assert_eq!(w50.rain_chance, 20.0);
    }

    #[test]
    fn day_weather_carries_week_values() {
        let table = ClimateTable::new();
        let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let day = table.lookup(8).day_weather(date);
        assert_eq!(day.date, date);
        assert!(!day.live);
        assert_eq!(day.hourly.len(), 13);
        assert!(day.hourly.iter().all(|h| h.rain_mm == 0.0));
        assert!(day.hourly.iter().all(|h| h.rain_chance == 32.0));
    }
}
