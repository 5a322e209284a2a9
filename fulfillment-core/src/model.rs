use serde::{Deserialize, Serialize};

/// Current conditions for one city, as returned by a [`crate::WeatherProvider`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city_name: String,
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

impl WeatherReport {
    pub fn temperature_f(&self) -> f64 {
        self.temperature_c * 9.0 / 5.0 + 32.0
    }

    pub fn temperature_celsius(&self) -> String {
        format!("{:.2}°C", self.temperature_c)
    }

    pub fn temperature_fahrenheit(&self) -> String {
        format!("{:.2}°F", self.temperature_f())
    }

    pub fn humidity(&self) -> String {
        format!("{}%", self.humidity_pct)
    }

    /// Wind speed as the float's shortest round-trip text, so `5.0` stays `5.0`.
    pub fn wind_speed(&self) -> String {
        format!("{:?} m/s", self.wind_speed_mps)
    }
}
