//! Weather readings and their display summary

use core::fmt::Write;

use heapless::String;

/// Shown when no weather reading has ever been fetched
pub const WEATHER_UNAVAILABLE: &str = "Weather unavailable";

/// Weather summary display string
pub type WeatherText = String<48>;

/// Current conditions as reported by a weather source
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherReading {
    /// Air temperature (°C)
    pub temperature_c: f32,
    /// Wind speed (km/h)
    pub wind_speed_kmh: f32,
    /// WMO weather interpretation code (0-99)
    pub condition_code: u8,
}

impl WeatherReading {
    pub const fn new(temperature_c: f32, wind_speed_kmh: f32, condition_code: u8) -> Self {
        Self {
            temperature_c,
            wind_speed_kmh,
            condition_code,
        }
    }

    /// Short description of the condition code
    pub fn condition(&self) -> &'static str {
        describe_condition(self.condition_code)
    }

    /// One-line summary, e.g. `12C 8km/h Overcast`
    pub fn summary(&self) -> WeatherText {
        let mut text = WeatherText::new();
        // Longest condition plus two rounded numbers fits in 48 bytes
        let _ = write!(
            text,
            "{:.0}C {:.0}km/h {}",
            self.temperature_c,
            self.wind_speed_kmh,
            self.condition()
        );
        text
    }
}

/// Placeholder summary for when nothing has been fetched
pub fn unavailable() -> WeatherText {
    let mut text = WeatherText::new();
    let _ = text.push_str(WEATHER_UNAVAILABLE);
    text
}

/// Map a WMO weather interpretation code to a short description
pub fn describe_condition(code: u8) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm + hail",
        _ => "Unknown",
    }
}
