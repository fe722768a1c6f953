//! Anomalous-weather alert detection.
//!
//! Each alert is a named predicate over one day's hourly samples (plus
//! the week-of-year for the spring cold-snap window). Rules are
//! evaluated independently, so a day can carry several alerts at once.
//! A rule that cannot be evaluated on the data it was given (empty day,
//! non-finite sample) is skipped rather than failing the whole pass.

use serde::{Deserialize, Serialize};

use crate::task::TaskKind;
use crate::weather::HourSample;

/// One active weather alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    ExtremeHeat,
    HeatWave,
    TropicalNight,
    HeavyRain,
    Monsoon,
    LocalizedStorm,
    ColdSnap,
    Frost,
}

impl AlertKind {
    pub const ALL: [AlertKind; 8] = [
        AlertKind::ExtremeHeat,
        AlertKind::HeatWave,
        AlertKind::TropicalNight,
        AlertKind::HeavyRain,
        AlertKind::Monsoon,
        AlertKind::LocalizedStorm,
        AlertKind::ColdSnap,
        AlertKind::Frost,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AlertKind::ExtremeHeat => "Extreme heat",
            AlertKind::HeatWave => "Heat wave",
            AlertKind::TropicalNight => "Tropical night",
            AlertKind::HeavyRain => "Heavy rain",
            AlertKind::Monsoon => "Monsoon",
            AlertKind::LocalizedStorm => "Localized storm",
            AlertKind::ColdSnap => "Cold snap",
            AlertKind::Frost => "Frost",
        }
    }

    /// Why the alert matters for the work it blocks.
    pub fn advisory(self) -> &'static str {
        match self {
            AlertKind::ExtremeHeat => {
                "High heat causes chemical burn, poor hormone uptake and sunscald risk"
            }
            AlertKind::HeatWave => "Hormone and chemical treatments lose effect in a heat wave",
            AlertKind::TropicalNight => "Warm nights raise respiration and slow sugar accumulation",
            AlertKind::HeavyRain => "All outdoor and spraying work is off during heavy rain",
            AlertKind::Monsoon => "Sustained humidity raises disease pressure",
            AlertKind::LocalizedStorm => "All work stops during a localized storm",
            AlertKind::ColdSnap => "Low temperature impairs hormone uptake",
            AlertKind::Frost => "Frost damage risk",
        }
    }

    /// What to do about it.
    pub fn recommendation(self) -> &'static str {
        match self {
            AlertKind::ExtremeHeat => "Work 06:00-09:00 or in the evening; shading is essential",
            AlertKind::HeatWave => "Work early morning or evening; raise irrigation volume 20%",
            AlertKind::TropicalNight => "Increase night ventilation; watch sugar development",
            AlertKind::HeavyRain => "Check drainage, seal the house, postpone outdoor work",
            AlertKind::Monsoon => "Step up botrytis and downy mildew prevention; ventilate",
            AlertKind::LocalizedStorm => "Inspect facilities and drainage; safety first",
            AlertKind::ColdSnap => "Reinforce insulation; postpone hormone treatments",
            AlertKind::Frost => "Use covers, sprinkling or fogging against frost",
        }
    }

    /// Task kinds this alert forbids for the day.
    pub fn blocks(self) -> &'static [TaskKind] {
        use TaskKind::*;
        match self {
            AlertKind::ExtremeHeat => &[Gibberellin, Merit, Spray, FoliarFeed, Harvest],
            AlertKind::HeatWave => &[Gibberellin, Merit, Spray],
            AlertKind::TropicalNight => &[],
            AlertKind::HeavyRain => &[Gibberellin, Merit, Spray, FoliarFeed, Harvest, Bagging],
            AlertKind::Monsoon => &[Spray, FoliarFeed],
            AlertKind::LocalizedStorm => {
                &[Gibberellin, Merit, Spray, FoliarFeed, Harvest, Bagging, Pruning]
            }
            AlertKind::ColdSnap => &[Gibberellin, Merit],
            AlertKind::Frost => &[Gibberellin, Merit, Spray, FoliarFeed],
        }
    }

    /// Evaluate this rule against one day. `None` means the rule could
    /// not be evaluated on this data and is skipped.
    fn triggered(self, hourly: &[HourSample], week: u32) -> Option<bool> {
        match self {
            AlertKind::ExtremeHeat => any_finite(hourly, |h| h.temp_c, |t| t >= 35.0),
            AlertKind::HeatWave => {
                let hot = hourly
                    .iter()
                    .filter(|h| h.temp_c.is_finite() && h.temp_c >= 33.0)
                    .count();
                Some(hot >= 3)
            }
            AlertKind::TropicalNight => {
                let night: Vec<&HourSample> = hourly
                    .iter()
                    .filter(|h| h.hour >= 21 || h.hour <= 6)
                    .collect();
                if night.is_empty() {
                    return Some(false);
                }
                if night.iter().any(|h| !h.temp_c.is_finite()) {
                    return None;
                }
                Some(night.iter().all(|h| h.temp_c >= 25.0))
            }
            AlertKind::HeavyRain => Some(hourly.iter().any(|h| {
                (h.rain_chance.is_finite() && h.rain_chance >= 80.0)
                    || (h.rain_mm.is_finite() && h.rain_mm >= 30.0)
            })),
            AlertKind::Monsoon => {
                if hourly.is_empty() {
                    return None;
                }
                let n = hourly.len() as f64;
                let avg_rain: f64 = hourly.iter().map(|h| finite_or_zero(h.rain_chance)).sum::<f64>() / n;
                let avg_humid: f64 = hourly.iter().map(|h| finite_or_zero(h.humidity)).sum::<f64>() / n;
                Some(avg_rain >= 60.0 && avg_humid >= 80.0)
            }
            AlertKind::LocalizedStorm => Some(hourly.iter().any(|h| {
                (h.rain_mm.is_finite() && h.rain_mm >= 50.0)
                    || (h.rain_chance.is_finite()
                        && h.rain_mm.is_finite()
                        && h.rain_chance >= 90.0
                        && h.rain_mm >= 20.0)
            })),
            AlertKind::ColdSnap => {
                // Abnormal cold only matters in the spring window.
                if !(6..=18).contains(&week) {
                    return Some(false);
                }
                any_finite(hourly, |h| h.temp_c, |t| t <= 5.0)
            }
            AlertKind::Frost => Some(hourly.iter().any(|h| {
                (5..=7).contains(&h.hour) && h.temp_c.is_finite() && h.temp_c <= 0.0
            })),
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn any_finite(
    hourly: &[HourSample],
    field: impl Fn(&HourSample) -> f64,
    pred: impl Fn(f64) -> bool,
) -> Option<bool> {
    Some(hourly.iter().map(&field).filter(|v| v.is_finite()).any(pred))
}

/// Evaluate every alert rule against one day's samples.
pub fn detect(hourly: &[HourSample], week: u32) -> Vec<AlertKind> {
    AlertKind::ALL
        .iter()
        .copied()
        .filter(|kind| kind.triggered(hourly, week).unwrap_or(false))
        .collect()
}

/// The subset of `alerts` that forbid `kind` today. Empty means the
/// task may run; weather-insensitive tasks never consult this.
pub fn blocking_alerts(kind: TaskKind, alerts: &[AlertKind]) -> Vec<AlertKind> {
    alerts
        .iter()
        .copied()
        .filter(|alert| alert.blocks().contains(&kind))
        .collect()
}

/// True when the day carries an alert that reshapes the working window
/// (midday exclusion, forced morning preference).
pub fn has_heat_alert(alerts: &[AlertKind]) -> bool {
    alerts
        .iter()
        .any(|a| matches!(a, AlertKind::ExtremeHeat | AlertKind::HeatWave))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hour: u8, temp: f64, humidity: f64, rain_chance: f64, rain_mm: f64) -> HourSample {
        HourSample {
            hour,
            temp_c: temp,
            humidity,
            rain_chance,
            rain_mm,
            desc: None,
        }
    }

    fn mild_day() -> Vec<HourSample> {
        (6..=18).map(|h| sample(h, 22.0, 60.0, 10.0, 0.0)).collect()
    }

    #[test]
    fn mild_day_raises_nothing() {
        assert!(detect(&mild_day(), 20).is_empty());
    }

    #[test]
    fn extreme_heat_on_a_single_hot_hour() {
        let mut day = mild_day();
        day[8].temp_c = 35.0;
        let alerts = detect(&day, 25);
        assert!(alerts.contains(&AlertKind::ExtremeHeat));
        assert!(!alerts.contains(&AlertKind::HeatWave));
    }

    #[test]
    fn heat_wave_needs_three_hot_hours() {
        let mut day = mild_day();
        day[7].temp_c = 33.0;
        day[8].temp_c = 33.5;
        assert!(!detect(&day, 25).contains(&AlertKind::HeatWave));
        day[9].temp_c = 34.0;
        assert!(detect(&day, 25).contains(&AlertKind::HeatWave));
    }

    #[test]
    fn tropical_night_requires_every_night_hour_warm() {
        let mut day: Vec<HourSample> = (0..24).map(|h| sample(h, 26.0, 70.0, 0.0, 0.0)).collect();
        assert!(detect(&day, 28).contains(&AlertKind::TropicalNight));
        day[3].temp_c = 24.0;
        assert!(!detect(&day, 28).contains(&AlertKind::TropicalNight));
    }

    #[test]
    fn heavy_rain_by_chance_or_depth() {
        let mut day = mild_day();
        day[5].rain_chance = 80.0;
        assert!(detect(&day, 27).contains(&AlertKind::HeavyRain));

        let mut day = mild_day();
        day[5].rain_mm = 30.0;
        assert!(detect(&day, 27).contains(&AlertKind::HeavyRain));
    }

    #[test]
    fn monsoon_needs_both_means() {
        let humid: Vec<HourSample> = (6..=18).map(|h| sample(h, 26.0, 85.0, 65.0, 2.0)).collect();
        assert!(detect(&humid, 27).contains(&AlertKind::Monsoon));

        let dry_air: Vec<HourSample> = (6..=18).map(|h| sample(h, 26.0, 70.0, 65.0, 2.0)).collect();
        assert!(!detect(&dry_air, 27).contains(&AlertKind::Monsoon));
    }

    #[test]
    fn storm_by_depth_or_combined_thresholds() {
        let mut day = mild_day();
        day[6].rain_mm = 50.0;
        assert!(detect(&day, 27).contains(&AlertKind::LocalizedStorm));

        let mut day = mild_day();
        day[6].rain_chance = 90.0;
        day[6].rain_mm = 20.0;
        assert!(detect(&day, 27).contains(&AlertKind::LocalizedStorm));

        let mut day = mild_day();
        day[6].rain_chance = 90.0;
        day[6].rain_mm = 10.0;
        assert!(!detect(&day, 27).contains(&AlertKind::LocalizedStorm));
    }

    #[test]
    fn cold_snap_only_in_spring_window() {
        let mut day = mild_day();
        day[2].temp_c = 4.0;
        assert!(detect(&day, 10).contains(&AlertKind::ColdSnap));
        assert!(!detect(&day, 25).contains(&AlertKind::ColdSnap));
        assert!(!detect(&day, 5).contains(&AlertKind::ColdSnap));
    }

    #[test]
    fn frost_only_counts_the_dawn_window() {
        let mut day: Vec<HourSample> = (0..24).map(|h| sample(h, 5.0, 60.0, 0.0, 0.0)).collect();
        day[3].temp_c = -2.0;
        assert!(!detect(&day, 8).contains(&AlertKind::Frost));
        day[6].temp_c = -1.0;
        assert!(detect(&day, 8).contains(&AlertKind::Frost));
    }

    #[test]
    fn bad_samples_do_not_poison_the_pass() {
        let mut day = mild_day();
        day[4].temp_c = f64::NAN;
        day[9].temp_c = 36.0;
        // NaN hour is skipped; the finite hot hour still triggers.
        let alerts = detect(&day, 25);
        assert!(alerts.contains(&AlertKind::ExtremeHeat));
    }

    #[test]
    fn blocking_filters_by_task_kind() {
        let alerts = vec![AlertKind::ExtremeHeat, AlertKind::TropicalNight];
        assert_eq!(
            blocking_alerts(TaskKind::Spray, &alerts),
            vec![AlertKind::ExtremeHeat]
        );
        assert!(blocking_alerts(TaskKind::Irrigation, &alerts).is_empty());
        assert!(blocking_alerts(TaskKind::Ventilation, &alerts).is_empty());
    }
}
