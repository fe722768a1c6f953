//! Priority-ordered weekly assignment engine.
//!
//! One call to [`WeekScheduler::schedule`] owns the whole run: it builds
//! the 7-day context (live weather per date, climate fallback), detects
//! alerts once per day, seeds reservations from external events, then
//! places tasks in stable priority order. Placement failure is a
//! first-class outcome carried in the entry, never an error; the run
//! always returns a complete entry list.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::alerts::{self, AlertKind};
use crate::events::ExternalEvent;
use crate::slot::{self, HourInterval};
use crate::task::{TaskKind, TaskRequest};
use crate::weather::{self, ClimateTable, DayWeather, HourSample, SunTimes, WEEKDAY_NAMES};

/// Weekdays on which no work is scheduled: Sunday and Wednesday.
pub const CLOSED_WEEKDAYS: [u8; 2] = [0, 3];

/// A committed hour range with the reason it is taken.
#[derive(Debug, Clone, Serialize)]
pub struct Reservation {
    pub interval: HourInterval,
    pub label: String,
}

/// Everything the engine knows about one day of the planning week.
#[derive(Debug, Clone, Serialize)]
pub struct DayContext {
    pub date: NaiveDate,
    /// 0=Sunday..6=Saturday
    pub weekday: u8,
    pub weather: DayWeather,
    pub sun: SunTimes,
    pub alerts: Vec<AlertKind>,
    pub reserved: Vec<Reservation>,
}

impl DayContext {
    fn intervals(&self) -> Vec<HourInterval> {
        self.reserved.iter().map(|r| r.interval).collect()
    }

    fn commit(&mut self, interval: HourInterval, label: &str) {
        self.reserved.push(Reservation {
            interval,
            label: label.to_string(),
        });
    }
}

/// Where one task ended up.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Placed {
        date: NaiveDate,
        /// 0=Sunday..6=Saturday
        weekday: u8,
        day_name: &'static str,
        start_hour: u8,
        end_hour: u8,
        /// Weather at the committed hour; absent for insensitive work.
        weather: Option<HourSample>,
        /// Alerts active on the chosen day.
        alerts: Vec<AlertKind>,
    },
    Unplaced {
        reason: String,
        /// Alerts that blocked the task on at least one day.
        blocked_by: Vec<AlertKind>,
    },
}

/// One task's result in the weekly plan.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub task: String,
    pub kind: TaskKind,
    pub weather_sensitive: bool,
    pub detail: Option<String>,
    pub outcome: Outcome,
}

impl ScheduleEntry {
    pub fn is_placed(&self) -> bool {
        matches!(self.outcome, Outcome::Placed { .. })
    }
}

/// The complete result of one scheduling run.
#[derive(Debug, Clone, Serialize)]
pub struct WeekPlan {
    pub week: u32,
    pub week_start: NaiveDate,
    /// Entries in priority order, ties in request order.
    pub entries: Vec<ScheduleEntry>,
    pub days: Vec<DayContext>,
}

/// The assignment engine. Holds the frozen climate table; everything
/// per-run is owned by the `schedule` call.
pub struct WeekScheduler<'a> {
    climate: &'a ClimateTable,
}

impl<'a> WeekScheduler<'a> {
    pub fn new(climate: &'a ClimateTable) -> Self {
        Self { climate }
    }

    /// Place `tasks` into the week starting at `week_start` (a Sunday).
    ///
    /// `live` carries provider weather keyed by date; dates absent from
    /// it fall back to the historical table for `week`.
    pub fn schedule(
        &self,
        tasks: &[TaskRequest],
        week_start: NaiveDate,
        week: u32,
        live: &HashMap<NaiveDate, DayWeather>,
        events: &[ExternalEvent],
    ) -> WeekPlan {
        let mut days = self.build_week(week_start, week, live, events);

        let mut ordered: Vec<&TaskRequest> = tasks.iter().collect();
        ordered.sort_by_key(|t| t.kind.spec().priority);

        let entries = ordered
            .into_iter()
            .map(|task| self.place(task, &mut days))
            .collect();

        WeekPlan {
            week,
            week_start,
            entries,
            days,
        }
    }

    fn build_week(
        &self,
        week_start: NaiveDate,
        week: u32,
        live: &HashMap<NaiveDate, DayWeather>,
        events: &[ExternalEvent],
    ) -> Vec<DayContext> {
        (0..7)
            .map(|offset| {
                let date = week_start + Duration::days(offset);
                let weather = match live.get(&date) {
                    Some(day) => day.clone(),
                    None => {
                        tracing::debug!(%date, week, "no live weather, using climate table");
                        self.climate.lookup(week).day_weather(date)
                    }
                };
                let alerts = alerts::detect(&weather.hourly, week);
                let reserved = events
                    .iter()
                    .filter(|e| e.occurs_on(date))
                    .map(|e| Reservation {
                        interval: e.interval(),
                        label: e.name.clone(),
                    })
                    .collect();

                DayContext {
                    date,
                    weekday: date.weekday().num_days_from_sunday() as u8,
                    sun: weather::sun_times(date),
                    weather,
                    alerts,
                    reserved,
                }
            })
            .collect()
    }

    fn place(&self, task: &TaskRequest, days: &mut [DayContext]) -> ScheduleEntry {
        let sensitive = task.is_weather_sensitive();
        let duration = task.effective_duration();
        let order = day_order(task.preferred_days.as_deref());
        let mut blocked_records: Vec<AlertKind> = Vec::new();

        for weekday in order {
            // week_start is a Sunday, so the weekday index is also the
            // day offset into the week.
            let day = &mut days[weekday as usize];
            debug_assert_eq!(day.weekday, weekday);

            let committed = if sensitive {
                self.try_sensitive(task, day, duration, &mut blocked_records)
            } else {
                self.try_insensitive(task, day, duration)
            };

            if let Some(outcome) = committed {
                tracing::debug!(task = %task.text, date = %day.date, "task placed");
                return ScheduleEntry {
                    task: task.text.clone(),
                    kind: task.kind,
                    weather_sensitive: sensitive,
                    detail: task.detail.clone(),
                    outcome,
                };
            }
        }

        let reason = if blocked_records.is_empty() {
            if sensitive {
                "No suitable weather window this week".to_string()
            } else {
                "No free hours this week".to_string()
            }
        } else {
            let mut parts: Vec<String> = Vec::new();
            for alert in &blocked_records {
                let line = format!("{}: {}", alert.name(), alert.advisory());
                if !parts.contains(&line) {
                    parts.push(line);
                }
            }
            parts.join(" | ")
        };

        ScheduleEntry {
            task: task.text.clone(),
            kind: task.kind,
            weather_sensitive: sensitive,
            detail: task.detail.clone(),
            outcome: Outcome::Unplaced {
                reason,
                blocked_by: blocked_records,
            },
        }
    }

    fn try_sensitive(
        &self,
        task: &TaskRequest,
        day: &mut DayContext,
        duration: u8,
        blocked_records: &mut Vec<AlertKind>,
    ) -> Option<Outcome> {
        let blocking = alerts::blocking_alerts(task.kind, &day.alerts);
        if !blocking.is_empty() {
            for alert in blocking {
                if !blocked_records.contains(&alert) {
                    blocked_records.push(alert);
                }
            }
            return None;
        }

        let spec = task.kind.spec();
        let intervals = day.intervals();
        let found = if day.alerts.is_empty() {
            slot::find_best_slot(spec, &day.weather.hourly, day.sun, &intervals, duration)
        } else {
            slot::find_safe_slot(
                spec,
                &day.weather.hourly,
                day.sun,
                &intervals,
                duration,
                alerts::has_heat_alert(&day.alerts),
            )
        }?;

        // An explicit preferred start wins only when its own interval
        // is free; the committed interval is always the reserved one.
        let start = match task.preferred_start_hour {
            Some(pref) if slot::range_free(&intervals, pref, duration) => pref,
            _ => found.hour,
        };

        let weather_at_start = day
            .weather
            .hourly
            .iter()
            .find(|h| h.hour == start)
            .cloned()
            .or_else(|| Some(found.clone()));

        day.commit(HourInterval::spanning(start, duration), &task.text);

        Some(Outcome::Placed {
            date: day.date,
            weekday: day.weekday,
            day_name: WEEKDAY_NAMES[day.weekday as usize],
            start_hour: start,
            end_hour: start.saturating_add(duration),
            weather: weather_at_start,
            alerts: day.alerts.clone(),
        })
    }

    fn try_insensitive(
        &self,
        task: &TaskRequest,
        day: &mut DayContext,
        duration: u8,
    ) -> Option<Outcome> {
        let intervals = day.intervals();
        let start = slot::find_free_hour(day.sun, &intervals, duration, task.preferred_start_hour)?;

        day.commit(HourInterval::spanning(start, duration), &task.text);

        Some(Outcome::Placed {
            date: day.date,
            weekday: day.weekday,
            day_name: WEEKDAY_NAMES[day.weekday as usize],
            start_hour: start,
            end_hour: start.saturating_add(duration),
            weather: None,
            alerts: day.alerts.clone(),
        })
    }
}

/// Weekday search order for one task: preferred days first (listed
/// order), then the rest ascending; closed weekdays never appear.
fn day_order(preferred: Option<&[u8]>) -> Vec<u8> {
    let open = |d: &u8| !CLOSED_WEEKDAYS.contains(d);
    match preferred {
        Some(pref) => {
            let mut order: Vec<u8> = pref.iter().copied().filter(|d| open(d) && *d < 7).collect();
            order.extend((0..7).filter(|d| open(d) && !pref.contains(d)));
            order
        }
        None => (0..7).filter(open).collect(),
    }
}
