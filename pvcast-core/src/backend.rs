use async_trait::async_trait;
use std::fmt::Debug;

use crate::{BackendError, ForecastEntry, ParsedCoordinate, Summary};

pub mod http;

pub use http::HttpBackend;

/// The two endpoints of the weather service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Forecast,
    Summary,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Forecast => "forecast",
            Endpoint::Summary => "summary",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Forecast => "/api/weather/forecast",
            Endpoint::Summary => "/api/weather/summary",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote source of forecast and summary data.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    async fn forecast(&self, position: ParsedCoordinate) -> Result<Vec<ForecastEntry>, BackendError>;

    async fn summary(&self, position: ParsedCoordinate) -> Result<Summary, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Forecast.path(), "/api/weather/forecast");
        assert_eq!(Endpoint::Summary.path(), "/api/weather/summary");
        assert_eq!(Endpoint::Summary.to_string(), "summary");
    }
}
