//! Hour-granular slot search within one day.
//!
//! Reservations are half-open hour intervals; two reservations may abut
//! but never overlap. A candidate start hour is only offered when the
//! task's whole interval `[h, h + duration)` is free, so committing the
//! returned hour can never collide with an existing reservation.
//!
//! Three entry points: [`find_best_slot`] for weather-sensitive work on
//! a calm day, [`find_safe_slot`] when the day carries alerts, and
//! [`find_free_hour`] for weather-insensitive work that only needs an
//! empty stretch of daylight.

use serde::{Deserialize, Serialize};

use crate::task::{Suitability, TaskSpec};
use crate::weather::{HourSample, SunTimes};

/// A reserved half-open interval of whole hours, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourInterval {
    pub start: u8,
    pub end: u8,
}

impl HourInterval {
    /// Interval starting at `start` and spanning `duration` hours.
    pub fn spanning(start: u8, duration: u8) -> Self {
        Self {
            start,
            end: start.saturating_add(duration),
        }
    }

    pub fn contains(&self, hour: u8) -> bool {
        hour >= self.start && hour < self.end
    }

    pub fn overlaps(&self, other: &HourInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// True when `[start, start + duration)` touches no reserved interval.
pub fn range_free(reserved: &[HourInterval], start: u8, duration: u8) -> bool {
    let candidate = HourInterval::spanning(start, duration);
    !reserved.iter().any(|r| r.overlaps(&candidate))
}

/// Does this hour's weather satisfy the task's ranges?
pub fn hour_matches(ranges: &Suitability, sample: &HourSample) -> bool {
    sample.temp_c >= ranges.temp_min
        && sample.temp_c <= ranges.temp_max
        && sample.humidity >= ranges.humidity_min
        && sample.humidity <= ranges.humidity_max
        && sample.rain_chance <= ranges.rain_max
}

/// The subsequence of `hourly` whose weather fits the task's ranges.
pub fn matching_hours<'a>(ranges: &Suitability, hourly: &'a [HourSample]) -> Vec<&'a HourSample> {
    hourly.iter().filter(|h| hour_matches(ranges, h)).collect()
}

/// Plain search for weather-sensitive work: daylight candidate hours
/// with a free interval, filtered by suitability, earliest first. A
/// morning-preferring task takes the earliest candidate before 12:00
/// when one exists.
pub fn find_best_slot<'a>(
    spec: &TaskSpec,
    hourly: &'a [HourSample],
    sun: SunTimes,
    reserved: &[HourInterval],
    duration: u8,
) -> Option<&'a HourSample> {
    search(spec, hourly, sun, reserved, duration, false)
}

/// Anomaly-aware search: as [`find_best_slot`], but under an extreme-heat
/// or heat-wave alert the midday hours 10..=16 are excluded and morning
/// preference is forced, with "morning" tightened to before 10:00.
pub fn find_safe_slot<'a>(
    spec: &TaskSpec,
    hourly: &'a [HourSample],
    sun: SunTimes,
    reserved: &[HourInterval],
    duration: u8,
    heat_alert: bool,
) -> Option<&'a HourSample> {
    search(spec, hourly, sun, reserved, duration, heat_alert)
}

fn search<'a>(
    spec: &TaskSpec,
    hourly: &'a [HourSample],
    sun: SunTimes,
    reserved: &[HourInterval],
    duration: u8,
    heat_alert: bool,
) -> Option<&'a HourSample> {
    let first = sun.first_hour();
    let last = sun.last_hour();

    let available: Vec<&HourSample> = hourly
        .iter()
        .filter(|h| h.hour >= first && h.hour < last)
        .filter(|h| range_free(reserved, h.hour, duration))
        .filter(|h| !(heat_alert && (10..=16).contains(&h.hour)))
        .collect();

    let ranges = spec.suitability_or_general();
    let suitable: Vec<&HourSample> = available
        .into_iter()
        .filter(|h| hour_matches(&ranges, h))
        .collect();

    if suitable.is_empty() {
        return None;
    }

    let morning_cutoff = if heat_alert { 10 } else { 12 };
    if spec.prefer_morning || heat_alert {
        if let Some(morning) = suitable.iter().find(|h| h.hour < morning_cutoff).copied() {
            return Some(morning);
        }
    }

    suitable.first().copied()
}

/// Free-hour search for weather-insensitive work. An explicit preferred
/// start hour whose interval is free wins without scanning; otherwise
/// the earliest daylight hour with a free interval is returned.
pub fn find_free_hour(
    sun: SunTimes,
    reserved: &[HourInterval],
    duration: u8,
    preferred_start: Option<u8>,
) -> Option<u8> {
    if let Some(start) = preferred_start {
        if range_free(reserved, start, duration) {
            return Some(start);
        }
    }

    (sun.first_hour()..sun.last_hour()).find(|&h| range_free(reserved, h, duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;

    fn sample(hour: u8, temp: f64, humidity: f64, rain: f64) -> HourSample {
        HourSample {
            hour,
            temp_c: temp,
            humidity,
            rain_chance: rain,
            rain_mm: 0.0,
            desc: None,
        }
    }

    fn sun() -> SunTimes {
        SunTimes { rise: 6.0, set: 19.0 }
    }

    #[test]
    fn intervals_abut_without_overlapping() {
        let a = HourInterval { start: 8, end: 10 };
        let b = HourInterval { start: 10, end: 12 };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&HourInterval { start: 9, end: 11 }));
        assert!(range_free(&[a], 10, 2));
        assert!(!range_free(&[a], 9, 2));
    }

    #[test]
    fn morning_preference_beats_an_earlier_afternoon_fit() {
        // GA ranges: 20-28C, 50-70%, rain 0. 09:00 and 14:00 both fit;
        // the morning hour must win.
        let hourly = vec![
            sample(9, 21.0, 60.0, 0.0),
            sample(14, 27.0, 55.0, 0.0),
        ];
        let spec = TaskKind::Gibberellin.spec();
        let slot = find_best_slot(spec, &hourly, sun(), &[], 3).unwrap();
        assert_eq!(slot.hour, 9);
    }

    #[test]
    fn duration_must_fit_between_reservations() {
        let hourly: Vec<HourSample> = (6..19).map(|h| sample(h, 22.0, 60.0, 0.0)).collect();
        let reserved = [HourInterval { start: 8, end: 12 }];
        let spec = TaskKind::Gibberellin.spec();

        // A 3-hour task cannot start at 6 or 7 (would run into the
        // reservation); the first legal start is 12.
        let slot = find_best_slot(spec, &hourly, sun(), &reserved, 3).unwrap();
        assert_eq!(slot.hour, 12);
    }

    #[test]
    fn heat_alert_excludes_midday_and_tightens_morning() {
        let hourly: Vec<HourSample> = (6..19).map(|h| sample(h, 25.0, 60.0, 0.0)).collect();
        let spec = TaskKind::Pruning.spec();

        // Pruning does not prefer mornings, but the heat alert forces
        // it and rules out 10..=16.
        let reserved = [HourInterval { start: 6, end: 9 }];
        let slot = find_safe_slot(spec, &hourly, sun(), &reserved, 4, true).unwrap();
        assert_eq!(slot.hour, 9);

        let all_morning_taken = [HourInterval { start: 6, end: 10 }];
        let slot = find_safe_slot(spec, &hourly, sun(), &all_morning_taken, 1, true).unwrap();
        assert_eq!(slot.hour, 17);
    }

    #[test]
    fn unsuitable_weather_yields_no_slot() {
        let hourly: Vec<HourSample> = (6..19).map(|h| sample(h, 33.0, 60.0, 0.0)).collect();
        let spec = TaskKind::Gibberellin.spec();
        assert!(find_best_slot(spec, &hourly, sun(), &[], 3).is_none());
    }

    #[test]
    fn free_hour_prefers_an_explicit_free_start() {
        let reserved = [HourInterval { start: 6, end: 8 }];
        assert_eq!(find_free_hour(sun(), &reserved, 2, Some(14)), Some(14));
        // Preferred hour taken: fall back to the scan.
        assert_eq!(find_free_hour(sun(), &reserved, 2, Some(7)), Some(8));
        assert_eq!(find_free_hour(sun(), &reserved, 2, None), Some(8));
    }

    #[test]
    fn fully_reserved_day_has_no_free_hour() {
        let reserved = [HourInterval { start: 6, end: 19 }];
        assert_eq!(find_free_hour(sun(), &reserved, 1, None), None);
    }
}
