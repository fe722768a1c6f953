//! Weekly planning command.

use clap::Subcommand;
use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use farmweek_core::engine::Outcome;
use farmweek_core::weather::{self, DayWeather};
use farmweek_core::{ClimateTable, Config, EventStore, WeekInput, WeekPlan, WeekScheduler, WttrClient};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Build the plan for one week
    Week {
        /// Week of year (1-52); defaults to config, then the current week
        #[arg(long)]
        week: Option<u32>,
        /// Location for the live forecast; defaults to config
        #[arg(long)]
        location: Option<String>,
        /// Free-text task, repeatable
        #[arg(long = "task")]
        tasks: Vec<String>,
        /// Irrigation cadence in working days
        #[arg(long)]
        water_interval: Option<u8>,
        /// Irrigation amount note, e.g. "3-5t"
        #[arg(long, default_value = "3-5t")]
        water_amount: String,
        /// Fertilizer entry as "type:amount"
        #[arg(long)]
        fertilizer: Option<String>,
        /// Pest-control product (fires on even weeks only)
        #[arg(long)]
        spray: Option<String>,
        /// Skip the live forecast and plan from the climate table
        #[arg(long)]
        offline: bool,
        /// Emit the full plan as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Week {
            week,
            location,
            tasks,
            water_interval,
            water_amount,
            fertilizer,
            spray,
            offline,
            json,
        } => {
            let config = Config::load_or_default();
            let today = Local::now().date_naive();
            let week = week
                .or(config.default_week)
                .unwrap_or_else(|| today.iso_week().week())
                .clamp(1, 52);
            let week_start = weather::week_start(today);
            let location = location.unwrap_or(config.location);

            let live = if offline {
                HashMap::new()
            } else {
                fetch_live(&location)
            };

            let store = EventStore::load(Config::events_path()?)?;

            let mut input = WeekInput::new(week);
            for text in tasks {
                input = input.add_text(text);
            }
            if let Some(interval) = water_interval {
                input = input.with_irrigation(interval, &water_amount);
            }
            if let Some(fert) = fertilizer {
                let (kind, amount) = fert.split_once(':').unwrap_or((fert.as_str(), "-"));
                input = input.with_fertilizer(kind, amount);
            }
            if let Some(product) = spray {
                input = input.with_pest_control(&product);
            }
            let requests = input.build();

            let climate = ClimateTable::new();
            let scheduler = WeekScheduler::new(&climate);
            let plan = scheduler.schedule(&requests, week_start, week, &live, store.events());

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
            Ok(())
        }
    }
}

/// Fetch the live forecast, degrading to empty on any failure.
fn fetch_live(location: &str) -> HashMap<NaiveDate, DayWeather> {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::warn!(error = %e, "no async runtime, planning from climate table");
            return HashMap::new();
        }
    };

    match runtime.block_on(WttrClient::new().fetch_week(location)) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(error = %e, "live forecast unavailable, planning from climate table");
            HashMap::new()
        }
    }
}

fn print_plan(plan: &WeekPlan) {
    println!(
        "Week {} plan (starting {})",
        plan.week,
        plan.week_start.format("%Y-%m-%d")
    );
    println!();

    for entry in &plan.entries {
        match &entry.outcome {
            Outcome::Placed {
                date,
                day_name,
                start_hour,
                end_hour,
                weather,
                alerts,
                ..
            } => {
                let conditions = weather
                    .as_ref()
                    .map(|w| format!("  [{:.0}C, {:.0}%, rain {:.0}%]", w.temp_c, w.humidity, w.rain_chance))
                    .unwrap_or_default();
                println!(
                    "  {day_name} {date}  {start_hour:02}:00-{end_hour:02}:00  {}{conditions}",
                    entry.task
                );
                for alert in alerts {
                    println!("      alert: {} - {}", alert.name(), alert.recommendation());
                }
            }
            Outcome::Unplaced { reason, .. } => {
                println!("  UNPLACED            {}  ({reason})", entry.task);
            }
        }
    }

    println!();
    for day in &plan.days {
        if !day.alerts.is_empty() {
            let names: Vec<&str> = day.alerts.iter().map(|a| a.name()).collect();
            println!(
                "  {} {}: {}",
                weather::WEEKDAY_NAMES[day.weekday as usize],
                day.date,
                names.join(", ")
            );
        }
    }
}
