//! Free-text classification command.

use farmweek_core::classify;

pub fn run(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let kind = classify(text);
    let spec = kind.spec();

    println!("{}", spec.name);
    println!("  weather sensitive: {}", spec.weather_sensitive);
    println!("  duration: {}h, priority: {}", spec.duration_hours, spec.priority);
    if let Some(s) = spec.suitability {
        println!(
            "  suitable: {:.0}-{:.0}C, {:.0}-{:.0}% humidity, rain <= {:.0}%",
            s.temp_min, s.temp_max, s.humidity_min, s.humidity_max, s.rain_max
        );
    }
    if spec.prefer_morning {
        println!("  prefers morning hours");
    }

    Ok(())
}
