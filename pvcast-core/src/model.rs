use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// No range check is applied; out-of-range values are forwarded to the
/// backend as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParsedCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl ParsedCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for ParsedCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// One day of the forecast series, as delivered by `/api/weather/forecast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: String,
    pub weathercode: i32,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub estimated_energy_kwh: f64,
}

/// Weekly summary, as delivered by `/api/weather/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub min_temperature_overall: f64,
    pub max_temperature_overall: f64,
    /// Missing or `null` in the payload is kept as `None` and rendered as "N/A".
    #[serde(default)]
    pub average_sunshine_exposure_hours: Option<f64>,
    pub weekly_weather_comment: String,
}

/// Error payload returned by the backend on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_uses_camel_case_fields() {
        let json = r#"{
            "minTemperatureOverall": -2.5,
            "maxTemperatureOverall": 14.0,
            "averageSunshineExposureHours": 5.25,
            "weeklyWeatherComment": "Mostly dry"
        }"#;

        let summary: Summary = serde_json::from_str(json).expect("summary should parse");
        assert_eq!(summary.min_temperature_overall, -2.5);
        assert_eq!(summary.average_sunshine_exposure_hours, Some(5.25));
        assert_eq!(summary.weekly_weather_comment, "Mostly dry");
    }

    #[test]
    fn summary_accepts_null_sunshine() {
        let json = r#"{
            "minTemperatureOverall": 1.0,
            "maxTemperatureOverall": 2.0,
            "averageSunshineExposureHours": null,
            "weeklyWeatherComment": ""
        }"#;

        let summary: Summary = serde_json::from_str(json).expect("summary should parse");
        assert_eq!(summary.average_sunshine_exposure_hours, None);
    }

    #[test]
    fn error_body_tolerates_missing_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"status": 500}"#).expect("object parses");
        assert!(body.error.is_none());
    }
}
