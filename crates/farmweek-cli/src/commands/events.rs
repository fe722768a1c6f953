//! External event management commands.

use clap::Subcommand;
use uuid::Uuid;

use chrono::NaiveDate;
use farmweek_core::{Config, EventStore, ExternalEvent};

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event
    Add {
        /// Event name
        name: String,
        /// Date (YYYY-MM-DD) for a one-off event
        #[arg(long, conflicts_with = "days")]
        date: Option<NaiveDate>,
        /// Recurring weekdays, comma-separated (0=Sunday..6=Saturday)
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
        /// Start hour (0-23)
        #[arg(long)]
        start: u8,
        /// End hour, exclusive (1-24)
        #[arg(long)]
        end: u8,
    },
    /// Remove an event by id
    Remove {
        /// Event id
        id: Uuid,
    },
    /// List stored events
    List,
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = EventStore::load(Config::events_path()?)?;

    match action {
        EventAction::Add {
            name,
            date,
            days,
            start,
            end,
        } => {
            if start >= end || end > 24 {
                return Err(format!("invalid hour range {start}-{end}").into());
            }

            let event = match date {
                Some(date) => ExternalEvent::once(name, date, start, end),
                None if !days.is_empty() => {
                    if let Some(bad) = days.iter().find(|d| **d > 6) {
                        return Err(format!("invalid weekday index {bad}").into());
                    }
                    ExternalEvent::weekly(name, days, start, end)
                }
                None => return Err("either --date or --days is required".into()),
            };

            println!("Event added: {}", event.id);
            store.add(event);
            store.save()?;
        }
        EventAction::Remove { id } => {
            let removed = store.remove(id)?;
            store.save()?;
            println!("Event removed: {}", removed.name);
        }
        EventAction::List => {
            println!("{}", serde_json::to_string_pretty(store.events())?);
        }
    }

    Ok(())
}
