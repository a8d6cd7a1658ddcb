// src/models/weather.rs
// DOCUMENTATION: Restructured weather payload models
// PURPOSE: The shape the weather enricher stores on place rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Weather snapshot attached to a place
/// DOCUMENTATION: current conditions plus bounded hourly/daily forecasts,
/// with explicit unit annotations so consumers never have to guess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    /// Next 24 hours, raw provider entries
    pub hourly: Vec<Value>,
    /// Next 7 days, raw provider entries
    pub daily: Vec<Value>,
    pub units: WeatherUnits,
    /// When this snapshot was fetched; drives the staleness check
    pub last_updated: DateTime<Utc>,
}

/// Current conditions extracted from the one-call response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    /// First entry of the provider's weather array (condition id/description/icon)
    pub weather: Value,
}

/// Unit annotations for the metric response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherUnits {
    pub temperature: String,
    pub wind_speed: String,
    pub pressure: String,
    pub humidity: String,
}

impl Default for WeatherUnits {
    fn default() -> Self {
        WeatherUnits {
            temperature: "Celsius".to_string(),
            wind_speed: "meters per second".to_string(),
            pressure: "hPa (hectopascal)".to_string(),
            humidity: "percentage (%)".to_string(),
        }
    }
}
