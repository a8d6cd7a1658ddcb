// src/services/weather_client.rs
// DOCUMENTATION: OpenWeatherMap One Call client
// PURPOSE: Fetch current and forecast weather for place coordinates

use crate::errors::PlacesError;
use crate::models::{CurrentConditions, WeatherSnapshot, WeatherUnits};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Forecast bounds stored per place
const HOURLY_FORECAST_HOURS: usize = 24;
const DAILY_FORECAST_DAYS: usize = 7;

/// Sections of the one-call response we never use
const EXCLUDED_SECTIONS: &str = "alerts,minutely";

/// OpenWeatherMap client
/// DOCUMENTATION: One reqwest client with a bounded timeout, constructed
/// once at startup
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    /// Create a new weather client
    /// DOCUMENTATION: Fails with ConfigurationError when the key is absent
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, PlacesError> {
        if api_key.is_empty() {
            return Err(PlacesError::ConfigurationError(
                "OPEN_WEATHER_API_KEY is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlacesError::ConfigurationError(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://api.openweathermap.org/data/3.0/onecall".to_string(),
        })
    }

    /// Fetch weather for the given coordinates
    /// DOCUMENTATION: Metric units; the response is restructured into the
    /// bounded snapshot shape and stamped with the fetch time
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, PlacesError> {
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
            ("exclude", EXCLUDED_SECTIONS.to_string()),
        ];

        log::debug!("Weather fetch: lat={}, lon={}", latitude, longitude);

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Weather request failed for {},{}: {}", latitude, longitude, e);
                PlacesError::UpstreamUnavailable(format!("Weather request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            log::error!("Weather API error {} for {},{}", status, latitude, longitude);
            return Err(PlacesError::UpstreamUnavailable(format!(
                "Weather error {}",
                status
            )));
        }

        let data: Value = response.json().await.map_err(|e| {
            PlacesError::UpstreamUnavailable(format!("Weather parse error: {}", e))
        })?;

        Ok(Self::restructure(&data, Utc::now()))
    }

    /// Restructure the raw one-call body into the stored snapshot
    /// DOCUMENTATION: Pure so the shape is testable without the network.
    /// Hourly entries are capped at 24, daily at 7, and the unit
    /// annotations are always attached.
    pub fn restructure(data: &Value, fetched_at: DateTime<Utc>) -> WeatherSnapshot {
        let current = &data["current"];

        let conditions = CurrentConditions {
            temperature: current["temp"].as_f64(),
            feels_like: current["feels_like"].as_f64(),
            humidity: current["humidity"].as_f64(),
            pressure: current["pressure"].as_f64(),
            wind_speed: current["wind_speed"].as_f64(),
            weather: current["weather"]
                .as_array()
                .and_then(|arr| arr.first().cloned())
                .unwrap_or_else(|| json!({})),
        };

        let hourly = data["hourly"]
            .as_array()
            .map(|arr| arr.iter().take(HOURLY_FORECAST_HOURS).cloned().collect())
            .unwrap_or_default();

        let daily = data["daily"]
            .as_array()
            .map(|arr| arr.iter().take(DAILY_FORECAST_DAYS).cloned().collect())
            .unwrap_or_default();

        WeatherSnapshot {
            current: conditions,
            hourly,
            daily,
            units: WeatherUnits::default(),
            last_updated: fetched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_body(hourly_count: usize, daily_count: usize) -> Value {
        json!({
            "current": {
                "temp": 28.4,
                "feels_like": 31.2,
                "humidity": 78,
                "pressure": 1009,
                "wind_speed": 3.6,
                "weather": [{"id": 501, "main": "Rain", "description": "moderate rain"}]
            },
            "hourly": (0..hourly_count).map(|i| json!({"dt": i, "temp": 27.0})).collect::<Vec<_>>(),
            "daily": (0..daily_count).map(|i| json!({"dt": i, "temp": {"day": 29.0}})).collect::<Vec<_>>()
        })
    }

    #[test]
    fn test_restructure_caps_forecasts() {
        let snapshot = WeatherClient::restructure(&sample_body(48, 9), Utc::now());

        assert_eq!(snapshot.hourly.len(), 24);
        assert_eq!(snapshot.daily.len(), 7);
    }

    #[test]
    fn test_restructure_extracts_current_conditions() {
        let fetched_at = Utc::now();
        let snapshot = WeatherClient::restructure(&sample_body(2, 2), fetched_at);

        assert_eq!(snapshot.current.temperature, Some(28.4));
        assert_eq!(snapshot.current.humidity, Some(78.0));
        assert_eq!(snapshot.current.weather["main"], "Rain");
        assert_eq!(snapshot.last_updated, fetched_at);
    }

    #[test]
    fn test_restructure_attaches_units() {
        let snapshot = WeatherClient::restructure(&sample_body(1, 1), Utc::now());

        assert_eq!(snapshot.units.temperature, "Celsius");
        assert_eq!(snapshot.units.wind_speed, "meters per second");
        assert_eq!(snapshot.units.pressure, "hPa (hectopascal)");
        assert_eq!(snapshot.units.humidity, "percentage (%)");
    }

    #[test]
    fn test_restructure_tolerates_missing_sections() {
        let snapshot = WeatherClient::restructure(&json!({}), Utc::now());

        assert!(snapshot.hourly.is_empty());
        assert!(snapshot.daily.is_empty());
        assert_eq!(snapshot.current.temperature, None);
        assert_eq!(snapshot.current.weather, json!({}));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let result = WeatherClient::new(String::new(), Duration::from_secs(30));
        assert!(matches!(result, Err(PlacesError::ConfigurationError(_))));
    }
}
