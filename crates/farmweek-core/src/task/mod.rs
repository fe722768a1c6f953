//! Task taxonomy: the fixed catalog of farm-work types and the weekly
//! task requests built from them.
//!
//! Each [`TaskKind`] resolves to a frozen [`TaskSpec`] carrying the
//! suitability ranges, duration, priority and morning preference the
//! scheduler works from. A [`TaskRequest`] is one unit of work for the
//! planning week; it may override the sensitivity, duration, preferred
//! weekdays and preferred start hour of its kind, and is immutable once
//! built.

pub mod classify;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use classify::classify;

/// Tag classifying a unit of farm work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    // Weather-sensitive work
    Gibberellin,
    Merit,
    Spray,
    FoliarFeed,
    Irrigation,
    Pruning,
    ClusterShaping,
    Bagging,
    Harvest,
    Ventilation,
    SoilCheck,
    Mulching,
    Microbial,
    // Weather-insensitive work
    Purchase,
    Equipment,
    Planning,
    Heating,
    Cleaning,
    Observation,
    Sensor,
    /// Fallback for anything the classifier cannot place.
    General,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

/// Weather ranges an hour must satisfy for a task to run in it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Suitability {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub rain_max: f64,
}

/// Static definition of a task type.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSpec {
    pub name: &'static str,
    pub weather_sensitive: bool,
    /// Absent for types that never consult the weather.
    pub suitability: Option<Suitability>,
    pub prefer_morning: bool,
    pub duration_hours: u8,
    /// Lower number = scheduled first.
    pub priority: u8,
}

impl TaskSpec {
    /// Suitability ranges for slot matching, defaulting to the GENERAL
    /// ranges when this type does not define its own.
    pub fn suitability_or_general(&self) -> Suitability {
        self.suitability
            .unwrap_or_else(|| TaskKind::General.spec().suitability.unwrap_or(GENERAL_RANGES))
    }
}

const GENERAL_RANGES: Suitability = Suitability {
    temp_min: 5.0,
    temp_max: 35.0,
    humidity_min: 30.0,
    humidity_max: 90.0,
    rain_max: 30.0,
};

macro_rules! sensitive_spec {
    ($name:expr, $tmin:expr, $tmax:expr, $hmin:expr, $hmax:expr, $rain:expr,
     $morning:expr, $dur:expr, $pri:expr) => {
        TaskSpec {
            name: $name,
            weather_sensitive: true,
            suitability: Some(Suitability {
                temp_min: $tmin,
                temp_max: $tmax,
                humidity_min: $hmin,
                humidity_max: $hmax,
                rain_max: $rain,
            }),
            prefer_morning: $morning,
            duration_hours: $dur,
            priority: $pri,
        }
    };
}

macro_rules! insensitive_spec {
    ($name:expr, $dur:expr, $pri:expr) => {
        TaskSpec {
            name: $name,
            weather_sensitive: false,
            suitability: None,
            prefer_morning: false,
            duration_hours: $dur,
            priority: $pri,
        }
    };
}

static GIBBERELLIN: TaskSpec =
    sensitive_spec!("Gibberellin (GA) treatment", 20.0, 28.0, 50.0, 70.0, 0.0, true, 3, 1);
static MERIT: TaskSpec =
    sensitive_spec!("Merit solution treatment", 18.0, 28.0, 50.0, 75.0, 0.0, true, 2, 1);
static SPRAY: TaskSpec =
    sensitive_spec!("Pesticide spraying", 15.0, 30.0, 40.0, 80.0, 0.0, true, 2, 2);
static FOLIAR_FEED: TaskSpec =
    sensitive_spec!("Foliar feeding", 18.0, 28.0, 50.0, 80.0, 0.0, true, 2, 2);
static IRRIGATION: TaskSpec =
    sensitive_spec!("Irrigation", 10.0, 35.0, 0.0, 100.0, 50.0, true, 1, 3);
static PRUNING: TaskSpec =
    sensitive_spec!("Pruning / training / thinning", 10.0, 30.0, 40.0, 85.0, 20.0, false, 4, 2);
static CLUSTER_SHAPING: TaskSpec =
    sensitive_spec!("Flower cluster shaping", 15.0, 28.0, 50.0, 80.0, 0.0, true, 4, 1);
static BAGGING: TaskSpec =
    sensitive_spec!("Cluster bagging", 15.0, 32.0, 40.0, 85.0, 30.0, false, 6, 2);
static HARVEST: TaskSpec =
    sensitive_spec!("Harvest", 15.0, 28.0, 40.0, 75.0, 0.0, true, 6, 1);
static VENTILATION: TaskSpec =
    sensitive_spec!("Ventilation management", 0.0, 40.0, 0.0, 100.0, 100.0, false, 1, 4);
static SOIL_CHECK: TaskSpec =
    sensitive_spec!("Soil inspection", 10.0, 30.0, 40.0, 90.0, 50.0, false, 1, 3);
static MULCHING: TaskSpec =
    sensitive_spec!("Mulching", 5.0, 30.0, 40.0, 85.0, 10.0, false, 4, 2);
static MICROBIAL: TaskSpec =
    sensitive_spec!("Microbial inoculant application", 15.0, 30.0, 50.0, 85.0, 30.0, true, 1, 3);

static PURCHASE: TaskSpec = insensitive_spec!("Supply purchasing", 2, 5);
static EQUIPMENT: TaskSpec = insensitive_spec!("Facility / equipment check", 2, 4);
static PLANNING: TaskSpec = insensitive_spec!("Planning / record keeping", 1, 5);
static HEATING: TaskSpec = insensitive_spec!("Heating / insulation", 2, 4);
static CLEANING: TaskSpec = insensitive_spec!("Cleanup / disposal", 2, 5);
static OBSERVATION: TaskSpec = insensitive_spec!("Observation / monitoring", 1, 4);
static SENSOR: TaskSpec = insensitive_spec!("Sensor / measurement", 1, 4);

/// GENERAL carries suitability ranges despite being weather-insensitive:
/// sensitive tasks of unrecognized type fall back to these ranges.
static GENERAL: TaskSpec = TaskSpec {
    name: "General work",
    weather_sensitive: false,
    suitability: Some(GENERAL_RANGES),
    prefer_morning: false,
    duration_hours: 2,
    priority: 4,
};

impl TaskKind {
    /// The frozen spec for this kind.
    pub fn spec(self) -> &'static TaskSpec {
        match self {
            TaskKind::Gibberellin => &GIBBERELLIN,
            TaskKind::Merit => &MERIT,
            TaskKind::Spray => &SPRAY,
            TaskKind::FoliarFeed => &FOLIAR_FEED,
            TaskKind::Irrigation => &IRRIGATION,
            TaskKind::Pruning => &PRUNING,
            TaskKind::ClusterShaping => &CLUSTER_SHAPING,
            TaskKind::Bagging => &BAGGING,
            TaskKind::Harvest => &HARVEST,
            TaskKind::Ventilation => &VENTILATION,
            TaskKind::SoilCheck => &SOIL_CHECK,
            TaskKind::Mulching => &MULCHING,
            TaskKind::Microbial => &MICROBIAL,
            TaskKind::Purchase => &PURCHASE,
            TaskKind::Equipment => &EQUIPMENT,
            TaskKind::Planning => &PLANNING,
            TaskKind::Heating => &HEATING,
            TaskKind::Cleaning => &CLEANING,
            TaskKind::Observation => &OBSERVATION,
            TaskKind::Sensor => &SENSOR,
            TaskKind::General => &GENERAL,
        }
    }
}

/// One unit of work requested for the planning week.
///
/// Built once per week from recurring rules and free-text items, then
/// handed to the engine unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    /// The task as the user wrote or the planner generated it.
    pub text: String,
    pub kind: TaskKind,
    /// Overrides the kind's weather sensitivity when set.
    #[serde(default)]
    pub weather_sensitive: Option<bool>,
    /// Overrides the kind's duration when set.
    #[serde(default)]
    pub duration_hours: Option<u8>,
    /// Weekday indices (0=Sunday..6=Saturday) to try first, in order.
    #[serde(default)]
    pub preferred_days: Option<Vec<u8>>,
    /// Explicit start hour; bypasses suitability for that hour but is
    /// still checked against existing reservations.
    #[serde(default)]
    pub preferred_start_hour: Option<u8>,
    /// Extra detail carried through to the schedule entry.
    #[serde(default)]
    pub detail: Option<String>,
}

impl TaskRequest {
    /// Build a request from free text, classifying it into a kind.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self::with_kind(text, kind)
    }

    /// Build a request with an explicit kind.
    pub fn with_kind(text: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            text: text.into(),
            kind,
            weather_sensitive: None,
            duration_hours: None,
            preferred_days: None,
            preferred_start_hour: None,
            detail: None,
        }
    }

    pub fn weather_sensitive(mut self, sensitive: bool) -> Self {
        self.weather_sensitive = Some(sensitive);
        self
    }

    pub fn duration(mut self, hours: u8) -> Self {
        self.duration_hours = Some(hours);
        self
    }

    pub fn preferred_days(mut self, days: Vec<u8>) -> Self {
        self.preferred_days = Some(days);
        self
    }

    pub fn preferred_start(mut self, hour: u8) -> Self {
        self.preferred_start_hour = Some(hour);
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Effective weather sensitivity: explicit override wins over the
    /// kind's default.
    pub fn is_weather_sensitive(&self) -> bool {
        self.weather_sensitive
            .unwrap_or(self.kind.spec().weather_sensitive)
    }

    /// Effective duration in hours.
    pub fn effective_duration(&self) -> u8 {
        self.duration_hours.unwrap_or(self.kind.spec().duration_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_spec() {
        let kinds = [
            TaskKind::Gibberellin,
            TaskKind::Merit,
            TaskKind::Spray,
            TaskKind::FoliarFeed,
            TaskKind::Irrigation,
            TaskKind::Pruning,
            TaskKind::ClusterShaping,
            TaskKind::Bagging,
            TaskKind::Harvest,
            TaskKind::Ventilation,
            TaskKind::SoilCheck,
            TaskKind::Mulching,
            TaskKind::Microbial,
            TaskKind::Purchase,
            TaskKind::Equipment,
            TaskKind::Planning,
            TaskKind::Heating,
            TaskKind::Cleaning,
            TaskKind::Observation,
            TaskKind::Sensor,
            TaskKind::General,
        ];
        for kind in kinds {
            let spec = kind.spec();
            assert!(!spec.name.is_empty());
            assert!(spec.duration_hours >= 1);
            if spec.weather_sensitive {
                assert!(spec.suitability.is_some(), "{} lacks ranges", spec.name);
            }
        }
    }

    #[test]
    fn general_ranges_back_unrecognized_sensitive_tasks() {
        // Heating has no ranges of its own; a sensitive task of that
        // kind would match against the GENERAL ranges.
        let ranges = TaskKind::Heating.spec().suitability_or_general();
        assert_eq!(ranges.temp_min, 5.0);
        assert_eq!(ranges.temp_max, 35.0);
        assert_eq!(ranges.rain_max, 30.0);
    }

    #[test]
    fn overrides_win_over_kind_defaults() {
        let req = TaskRequest::with_kind("irrigation run", TaskKind::Irrigation)
            .weather_sensitive(false)
            .duration(2);
        assert!(!req.is_weather_sensitive());
        assert_eq!(req.effective_duration(), 2);

        let plain = TaskRequest::with_kind("irrigation run", TaskKind::Irrigation);
        assert!(plain.is_weather_sensitive());
        assert_eq!(plain.effective_duration(), 1);
    }

    #[test]
    fn kind_tags_serialize_like_the_catalog() {
        let json = serde_json::to_string(&TaskKind::FoliarFeed).unwrap();
        assert_eq!(json, "\"FOLIAR_FEED\"");
        let kind: TaskKind = serde_json::from_str("\"SOIL_CHECK\"").unwrap();
        assert_eq!(kind, TaskKind::SoilCheck);
    }
}
