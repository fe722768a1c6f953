//! Historical climate table inspection.

use clap::Subcommand;

use farmweek_core::ClimateTable;

#[derive(Subcommand)]
pub enum ClimateAction {
    /// Print the table entry for one week
    Show {
        /// Week of year (1-52)
        #[arg(long)]
        week: u32,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ClimateAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ClimateAction::Show { week, json } => {
            let table = ClimateTable::new();
            let entry = table.lookup(week);

            if json {
                println!("{}", serde_json::to_string_pretty(entry)?);
                return Ok(());
            }

            println!(
                "Week {}: {:.0}-{:.0}C (avg {:.1}C), rain chance {:.0}%",
                entry.week, entry.min_temp, entry.max_temp, entry.avg_temp, entry.rain_chance
            );
            for h in &entry.hourly {
                println!("  {:02}:00  {:>5.1}C  {:>3.0}%", h.hour, h.temp_c, h.humidity);
            }
            Ok(())
        }
    }
}
