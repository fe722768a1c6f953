//! External events: fixed appointments that reserve hours before any
//! task is placed.
//!
//! Events live in a JSON file next to the config. A one-off event names
//! a calendar date; a recurring event names weekdays instead and fires
//! on every matching day of the planning week.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::slot::HourInterval;

/// A fixed appointment outside the planner's control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalEvent {
    pub id: Uuid,
    pub name: String,
    /// Calendar date for a one-off event; ignored when recurring.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub start_hour: u8,
    pub end_hour: u8,
    #[serde(default)]
    pub recurring: bool,
    /// Weekday indices (0=Sunday..6=Saturday) for recurring events.
    #[serde(default)]
    pub recurring_days: Vec<u8>,
}

impl ExternalEvent {
    /// One-off event on a specific date.
    pub fn once(name: impl Into<String>, date: NaiveDate, start_hour: u8, end_hour: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date: Some(date),
            start_hour,
            end_hour,
            recurring: false,
            recurring_days: Vec::new(),
        }
    }

    /// Event repeating on the given weekdays every week.
    pub fn weekly(
        name: impl Into<String>,
        days: Vec<u8>,
        start_hour: u8,
        end_hour: u8,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date: None,
            start_hour,
            end_hour,
            recurring: true,
            recurring_days: days,
        }
    }

    /// Does this event reserve time on `date`?
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        if self.recurring {
            let weekday = date.weekday().num_days_from_sunday() as u8;
            self.recurring_days.contains(&weekday)
        } else {
            self.date == Some(date)
        }
    }

    /// The hours this event reserves.
    pub fn interval(&self) -> HourInterval {
        HourInterval {
            start: self.start_hour,
            end: self.end_hour,
        }
    }
}

/// JSON file store for external events.
pub struct EventStore {
    path: PathBuf,
    events: Vec<ExternalEvent>,
}

impl EventStore {
    /// Load the store at `path`; a missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                events: Vec::new(),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|e| StoreError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let events = serde_json::from_str(&raw).map_err(|e| StoreError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(Self { path, events })
    }

    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        }
        let raw = serde_json::to_string_pretty(&self.events).map_err(|e| StoreError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&self.path, raw).map_err(|e| StoreError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn events(&self) -> &[ExternalEvent] {
        &self.events
    }

    pub fn add(&mut self, event: ExternalEvent) {
        self.events.push(event);
    }

    pub fn remove(&mut self, id: Uuid) -> Result<ExternalEvent, StoreError> {
        let pos = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.events.remove(pos))
    }

    /// Events that reserve time on `date`, as (interval, name) pairs.
    pub fn reservations_for(&self, date: NaiveDate) -> Vec<(HourInterval, &str)> {
        self.events
            .iter()
            .filter(|e| e.occurs_on(date))
            .map(|e| (e.interval(), e.name.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn one_off_event_matches_only_its_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 21).unwrap();
        let event = ExternalEvent::once("co-op meeting", date, 10, 12);
        assert!(event.occurs_on(date));
        assert!(!event.occurs_on(date.succ_opt().unwrap()));
    }

    #[test]
    fn recurring_event_expands_by_weekday() {
        // Tuesdays and Fridays
        let event = ExternalEvent::weekly("market run", vec![2, 5], 8, 10);
        let tue = NaiveDate::from_ymd_opt(2026, 7, 21).unwrap();
        let wed = NaiveDate::from_ymd_opt(2026, 7, 22).unwrap();
        let fri = NaiveDate::from_ymd_opt(2026, 7, 24).unwrap();
        assert!(event.occurs_on(tue));
        assert!(!event.occurs_on(wed));
        assert!(event.occurs_on(fri));
    }

    #[test]
    fn store_round_trips_through_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.json");

        let date = NaiveDate::from_ymd_opt(2026, 7, 21).unwrap();
        let mut store = EventStore::load(&path).unwrap();
        assert!(store.events().is_empty());

        store.add(ExternalEvent::once("delivery", date, 14, 16));
        store.add(ExternalEvent::weekly("market run", vec![5], 8, 10));
        store.save().unwrap();

        let reloaded = EventStore::load(&path).unwrap();
        assert_eq!(reloaded.events().len(), 2);
        assert_eq!(reloaded.events()[0].name, "delivery");
        assert!(reloaded.events()[1].recurring);
    }

    #[test]
    fn remove_unknown_id_is_not_found() {
        let dir = tempdir().unwrap();
        let mut store = EventStore::load(dir.path().join("events.json")).unwrap();
        let missing = Uuid::new_v4();
        assert!(matches!(
            store.remove(missing),
            Err(StoreError::NotFound(id)) if id == missing
        ));
    }

    #[test]
    fn reservations_collect_everything_on_a_date() {
        let fri = NaiveDate::from_ymd_opt(2026, 7, 24).unwrap();
        let dir = tempdir().unwrap();
        let mut store = EventStore::load(dir.path().join("events.json")).unwrap();
        store.add(ExternalEvent::once("delivery", fri, 14, 16));
        store.add(ExternalEvent::weekly("market run", vec![5], 8, 10));

        let reserved = store.reservations_for(fri);
        assert_eq!(reserved.len(), 2);
        assert_eq!(reserved[0].0, HourInterval { start: 14, end: 16 });
        assert_eq!(reserved[1].1, "market run");
    }
}
