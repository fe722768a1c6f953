//! # Farmweek Core Library
//!
//! Core business logic for the farmweek weekly task planner. All
//! operations are available through the standalone CLI binary; this
//! crate owns the data and the algorithm, the CLI is a thin layer over
//! it.
//!
//! ## Architecture
//!
//! - **Task taxonomy**: a fixed catalog of farm-work types with
//!   suitability ranges, durations and priorities, plus a free-text
//!   classifier
//! - **Weather**: a live provider client (wttr.in) and a historical
//!   week-of-year climate table the scheduler falls back to
//! - **Alerts**: anomalous-weather detection with per-rule task
//!   blocking
//! - **Engine**: the priority-ordered greedy assignment pass over the
//!   7-day week context
//! - **Storage**: TOML configuration and a JSON external-event store
//!
//! ## Key Components
//!
//! - [`WeekScheduler`]: the weekly assignment engine
//! - [`ClimateTable`]: frozen historical weather lookup
//! - [`WttrClient`]: live forecast client
//! - [`Config`]: application configuration management

pub mod alerts;
pub mod engine;
pub mod error;
pub mod events;
pub mod plan;
pub mod slot;
pub mod storage;
pub mod task;
pub mod weather;

pub use alerts::AlertKind;
pub use engine::{DayContext, Outcome, ScheduleEntry, WeekPlan, WeekScheduler, CLOSED_WEEKDAYS};
pub use error::{ConfigError, CoreError, StoreError, WeatherError};
pub use events::{EventStore, ExternalEvent};
pub use plan::WeekInput;
pub use storage::Config;
pub use task::{classify, TaskKind, TaskRequest, TaskSpec};
pub use weather::{week_start, ClimateTable, DayWeather, HourSample, SunTimes, WttrClient};
