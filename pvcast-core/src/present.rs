//! Display-side mapping of raw backend values.

use serde::{Deserialize, Serialize};

/// Returned by [`format_duration`] when there is nothing to show.
pub const NOT_AVAILABLE: &str = "N/A";

/// Display bucket for a WMO weather code.
///
/// Several codes share a bucket (61, 63 and 65 are all `Rain`); the
/// intensity is intentionally not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCategory {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    FreezingDrizzle,
    Rain,
    FreezingRain,
    Snow,
    SnowGrains,
    Thunderstorm,
    ThunderstormWithHail,
    Unknown,
}

impl WeatherCategory {
    /// Classify a WMO weather code.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 80 | 81 | 82 => Self::Drizzle,
            56 | 57 => Self::FreezingDrizzle,
            61 | 63 | 65 => Self::Rain,
            66 | 67 => Self::FreezingRain,
            71 | 73 | 75 | 85 | 86 => Self::Snow,
            77 => Self::SnowGrains,
            95 => Self::Thunderstorm,
            96 | 99 => Self::ThunderstormWithHail,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::FreezingDrizzle => "freezing-drizzle",
            Self::Rain => "rain",
            Self::FreezingRain => "freezing-rain",
            Self::Snow => "snow",
            Self::SnowGrains => "snow-grains",
            Self::Thunderstorm => "thunderstorm",
            Self::ThunderstormWithHail => "thunderstorm-with-hail",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing rain",
            Self::Snow => "Snow",
            Self::SnowGrains => "Snow grains",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormWithHail => "Thunderstorm with hail",
            Self::Unknown => "Unknown",
        }
    }

    /// Emoji shown next to the label in the forecast table.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "🌤️",
            Self::Cloudy => "☁️",
            Self::Fog => "🌫️",
            Self::Drizzle => "🌧️",
            Self::FreezingDrizzle => "🧊🌧️",
            Self::Rain => "☔",
            Self::FreezingRain => "🥶☔",
            Self::Snow => "🌨️",
            Self::SnowGrains => "❄️",
            Self::Thunderstorm => "⛈️",
            Self::ThunderstormWithHail => "🧊⛈️",
            Self::Unknown => "❓",
        }
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emoji for a raw weather code. Mostly the category glyph, except that
/// code 2 keeps its own partly-cloudy variant.
pub fn weather_glyph(code: i32) -> &'static str {
    match code {
        2 => "⛅",
        _ => WeatherCategory::from_code(code).glyph(),
    }
}

/// Render decimal hours as `"{H} h {M} min"`.
///
/// Minutes are rounded; a remainder that rounds up to 60 carries into the
/// hour, so 1.999 becomes `"2 h 0 min"`.
pub fn format_duration(decimal_hours: Option<f64>) -> String {
    let Some(value) = decimal_hours.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    let mut hours = value.floor();
    let mut minutes = ((value - hours) * 60.0).round();
    if minutes >= 60.0 {
        hours += 1.0;
        minutes = 0.0;
    }

    format!("{hours:.0} h {minutes:.0} min")
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_CODES: [i32; 28] = [
        0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82,
        85, 86, 95, 96, 99,
    ];

    #[test]
    fn every_known_code_has_a_category() {
        for code in KNOWN_CODES {
            let category = WeatherCategory::from_code(code);
            assert_ne!(category, WeatherCategory::Unknown, "code {code}");
            assert_eq!(category, WeatherCategory::from_code(code));
        }
    }

    #[test]
    fn codes_outside_the_table_are_unknown() {
        for code in (-5..=120).filter(|c| !KNOWN_CODES.contains(c)) {
            assert_eq!(WeatherCategory::from_code(code), WeatherCategory::Unknown, "code {code}");
        }
        assert_eq!(WeatherCategory::from_code(i32::MAX), WeatherCategory::Unknown);
    }

    #[test]
    fn intensities_share_a_bucket() {
        for code in [61, 63, 65] {
            assert_eq!(WeatherCategory::from_code(code), WeatherCategory::Rain);
        }
        assert_eq!(WeatherCategory::from_code(77), WeatherCategory::SnowGrains);
        assert_eq!(WeatherCategory::from_code(99), WeatherCategory::ThunderstormWithHail);
    }

    #[test]
    fn code_two_has_its_own_glyph() {
        assert_eq!(WeatherCategory::from_code(2), WeatherCategory::PartlyCloudy);
        assert_eq!(weather_glyph(1), "🌤️");
        assert_eq!(weather_glyph(2), "⛅");
        assert_eq!(weather_glyph(63), "☔");
        assert_eq!(weather_glyph(42), "❓");
    }

    #[test]
    fn category_names_are_kebab_case() {
        assert_eq!(WeatherCategory::ThunderstormWithHail.to_string(), "thunderstorm-with-hail");
        let json = serde_json::to_string(&WeatherCategory::PartlyCloudy).expect("serializes");
        assert_eq!(json, "\"partly-cloudy\"");
    }

    #[test]
    fn duration_not_available() {
        assert_eq!(format_duration(None), NOT_AVAILABLE);
        assert_eq!(format_duration(Some(f64::NAN)), NOT_AVAILABLE);
        assert_eq!(format_duration(Some(f64::INFINITY)), NOT_AVAILABLE);
    }

    #[test]
    fn duration_formats_hours_and_minutes() {
        assert_eq!(format_duration(Some(3.5)), "3 h 30 min");
        assert_eq!(format_duration(Some(0.0)), "0 h 0 min");
        assert_eq!(format_duration(Some(7.25)), "7 h 15 min");
    }

    #[test]
    fn duration_carries_rounded_minutes_into_hours() {
        assert_eq!(format_duration(Some(1.999)), "2 h 0 min");
        assert_eq!(format_duration(Some(0.9999)), "1 h 0 min");
    }
}
