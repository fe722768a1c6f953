//! Live weather provider client (wttr.in JSON interface).
//!
//! Fetches the multi-day forecast for a location and maps it into
//! [`DayWeather`] records keyed by date. Every failure mode -- network,
//! HTTP status, JSON shape, unparseable fields -- is surfaced as a
//! [`WeatherError`] that callers treat as "no live data"; the scheduler
//! then falls back to the historical climate table for those dates.

use std::collections::HashMap;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::error::WeatherError;

use super::{DayWeather, HourSample};

const DEFAULT_BASE_URL: &str = "https://wttr.in";

/// Client for the wttr.in `?format=j1` forecast endpoint.
pub struct WttrClient {
    client: Client,
    base_url: String,
}

impl WttrClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (test seam).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the forecast for `location` and return per-date weather,
    /// keyed by calendar date. Dates the provider does not cover are
    /// simply absent from the map.
    pub async fn fetch_week(
        &self,
        location: &str,
    ) -> Result<HashMap<NaiveDate, DayWeather>, WeatherError> {
        let url = format!("{}/{}?format=j1", self.base_url, location);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| WeatherError::FetchFailed {
                location: location.to_string(),
                source,
            })?;

        let body: WttrResponse =
            response
                .json()
                .await
                .map_err(|source| WeatherError::FetchFailed {
                    location: location.to_string(),
                    source,
                })?;

        Ok(parse_forecast(body))
    }
}

impl Default for WttrClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    weather: Vec<WttrDay>,
}

#[derive(Debug, Deserialize)]
struct WttrDay {
    date: String,
    #[serde(rename = "mintempC")]
    min_temp_c: String,
    #[serde(rename = "maxtempC")]
    max_temp_c: String,
    #[serde(default)]
    hourly: Vec<WttrHour>,
}

#[derive(Debug, Deserialize)]
struct WttrHour {
    /// Minutes-less 24h clock as "0", "300", ..., "2100"
    time: String,
    #[serde(rename = "tempC")]
    temp_c: String,
    humidity: String,
    chanceofrain: String,
    #[serde(rename = "precipMM")]
    precip_mm: String,
    #[serde(rename = "weatherDesc", default)]
    desc: Vec<WttrDesc>,
}

#[derive(Debug, Deserialize)]
struct WttrDesc {
    value: String,
}

/// Map the provider payload into per-date weather. Days with an
/// unparseable date and hours with unparseable fields are dropped
/// rather than failing the whole forecast.
fn parse_forecast(body: WttrResponse) -> HashMap<NaiveDate, DayWeather> {
    let mut by_date = HashMap::new();

    for day in body.weather {
        let Ok(date) = day.date.parse::<NaiveDate>() else {
            continue;
        };

        let hourly: Vec<HourSample> = day.hourly.iter().filter_map(parse_hour).collect();
        if hourly.is_empty() {
            continue;
        }

        by_date.insert(
            date,
            DayWeather {
                date,
                min_temp: day.min_temp_c.trim().parse().unwrap_or(0.0),
                max_temp: day.max_temp_c.trim().parse().unwrap_or(0.0),
                live: true,
                hourly,
            },
        );
    }

    by_date
}

fn parse_hour(hour: &WttrHour) -> Option<HourSample> {
    let raw_time: u32 = hour.time.trim().parse().ok()?;
    let h = raw_time / 100;
    if h > 23 {
        return None;
    }

    Some(HourSample {
        hour: h as u8,
        temp_c: hour.temp_c.trim().parse().ok()?,
        humidity: hour.humidity.trim().parse().ok()?,
        rain_chance: hour.chanceofrain.trim().parse().ok()?,
        rain_mm: hour.precip_mm.trim().parse().unwrap_or(0.0),
        desc: hour.desc.first().map(|d| d.value.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "weather": [
            {
                "date": "2026-07-20",
                "mintempC": "24",
                "maxtempC": "33",
                "hourly": [
                    {
                        "time": "0",
                        "tempC": "25",
                        "humidity": "80",
                        "chanceofrain": "10",
                        "precipMM": "0.0",
                        "weatherDesc": [{ "value": "Clear" }]
                    },
                    {
                        "time": "900",
                        "tempC": "29",
                        "humidity": "65",
                        "chanceofrain": "20",
                        "precipMM": "0.1",
                        "weatherDesc": [{ "value": "Partly cloudy" }]
                    },
                    {
                        "time": "1500",
                        "tempC": "oops",
                        "humidity": "60",
                        "chanceofrain": "0",
                        "precipMM": "0.0",
                        "weatherDesc": []
                    }
                ]
            },
            {
                "date": "not-a-date",
                "mintempC": "0",
                "maxtempC": "0",
                "hourly": []
            }
        ]
    }"#;

    #[test]
    fn parses_forecast_and_drops_bad_records() {
        let body: WttrResponse = serde_json::from_str(FIXTURE).unwrap();
        let map = parse_forecast(body);

        assert_eq!(map.len(), 1);
        let date = NaiveDate::from_ymd_opt(2026, 7, 20).unwrap();
        let day = &map[&date];
        assert!(day.live);
        assert_eq!(day.min_temp, 24.0);
        assert_eq!(day.max_temp, 33.0);

        // The unparseable 15:00 hour is dropped, the rest survive.
        assert_eq!(day.hourly.len(), 2);
        assert_eq!(day.hourly[0].hour, 0);
        assert_eq!(day.hourly[1].hour, 9);
        assert_eq!(day.hourly[1].temp_c, 29.0);
        assert_eq!(day.hourly[1].desc.as_deref(), Some("Partly cloudy"));
    }

    #[test]
    fn empty_payload_yields_empty_map() {
        let body: WttrResponse = serde_json::from_str(r#"{"weather": []}"#).unwrap();
        assert!(parse_forecast(body).is_empty());
    }
}
