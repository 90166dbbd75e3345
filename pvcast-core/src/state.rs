//! The single owner of everything the view displays.
//!
//! All mutation goes through [`AppState`]: coordinate edits keep the map in
//! sync, and fetch cycles move through [`RequestState`] stamped with a
//! generation so that a superseded cycle cannot write its late results.

use crate::{
    BackendError, ForecastEntry, ParsedCoordinate, Summary, coordinate::CoordinateStore,
    map::MapAdapter,
};

/// Shown when a fetch is triggered while either text field is not a number.
pub const INPUT_ERROR: &str = "latitude and longitude must be numbers";

/// Prefix of every failure message other than [`INPUT_ERROR`].
pub const ERROR_PREFIX: &str = "An error occurred: ";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed(String),
}

/// Handle for one fetch cycle, returned by [`AppState::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    position: ParsedCoordinate,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Full-precision coordinate the cycle fetches for.
    pub fn position(&self) -> ParsedCoordinate {
        self.position
    }
}

#[derive(Debug)]
pub struct AppState<M> {
    coordinate: CoordinateStore,
    map: M,
    request: RequestState,
    forecast: Option<Vec<ForecastEntry>>,
    summary: Option<Summary>,
    generation: u64,
}

impl<M: MapAdapter> AppState<M> {
    pub fn new(map: M) -> Self {
        Self {
            coordinate: CoordinateStore::default(),
            map,
            request: RequestState::Idle,
            forecast: None,
            summary: None,
            generation: 0,
        }
    }

    pub fn coordinate(&self) -> &CoordinateStore {
        &self.coordinate
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn request_state(&self) -> &RequestState {
        &self.request
    }

    pub fn forecast(&self) -> Option<&[ForecastEntry]> {
        self.forecast.as_deref()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.request {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.request == RequestState::Loading
    }

    /// Whether the fetch trigger should be enabled.
    pub fn can_fetch(&self) -> bool {
        !self.is_loading()
    }

    pub fn set_latitude_text(&mut self, text: impl Into<String>) {
        self.coordinate.set_latitude_text(text);
        self.sync_map();
    }

    pub fn set_longitude_text(&mut self, text: impl Into<String>) {
        self.coordinate.set_longitude_text(text);
        self.sync_map();
    }

    /// Map click: the text fields get the rounded position, the map gets the
    /// exact one.
    pub fn on_map_click(&mut self, lat: f64, lng: f64) {
        if !(lat.is_finite() && lng.is_finite()) {
            tracing::debug!(lat, lng, "ignoring map click with non-finite position");
            return;
        }
        self.coordinate.set_from_click(lat, lng);
        self.map.show(ParsedCoordinate::new(lat, lng));
    }

    // An unparseable coordinate leaves the map where it was.
    fn sync_map(&mut self) {
        if let Some(position) = self.coordinate.parsed() {
            self.map.show(position);
        }
    }

    /// Start a new fetch cycle, superseding any cycle still in flight.
    ///
    /// Clears previous results and error. Returns `None` when the coordinate
    /// is not numeric; the state is then `Failed(INPUT_ERROR)` and no
    /// request must be made.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        self.generation += 1;
        self.forecast = None;
        self.summary = None;

        let Some(position) = self.coordinate.parsed() else {
            tracing::debug!(
                latitude = self.coordinate.latitude_text(),
                longitude = self.coordinate.longitude_text(),
                "fetch rejected, coordinate is not numeric"
            );
            self.request = RequestState::Failed(INPUT_ERROR.to_string());
            return None;
        };

        tracing::info!(generation = self.generation, %position, "starting fetch cycle");
        self.request = RequestState::Loading;

        Some(FetchTicket {
            generation: self.generation,
            position,
        })
    }

    /// Record the forecast response. Returns `true` when the summary should
    /// be requested next.
    pub fn apply_forecast(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<ForecastEntry>, BackendError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        match result {
            Ok(series) => {
                tracing::debug!(days = series.len(), "forecast received");
                self.forecast = Some(series);
                true
            }
            Err(err) => {
                self.fail(&err);
                false
            }
        }
    }

    /// Record the summary response, ending the cycle. A failure here keeps
    /// the forecast already stored.
    pub fn apply_summary(&mut self, ticket: &FetchTicket, result: Result<Summary, BackendError>) {
        if !self.is_current(ticket) {
            return;
        }

        match result {
            Ok(summary) => {
                self.summary = Some(summary);
                self.request = RequestState::Success;
                tracing::info!(generation = ticket.generation, "fetch cycle finished");
            }
            Err(err) => self.fail(&err),
        }
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        let current = ticket.generation == self.generation && self.is_loading();
        if !current {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping response from superseded fetch cycle"
            );
        }
        current
    }

    fn fail(&mut self, err: &BackendError) {
        tracing::error!(error = ?err, endpoint = %err.endpoint(), "fetch cycle failed");
        self.request = RequestState::Failed(format!("{ERROR_PREFIX}{err}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{backend::Endpoint, map::HeadlessMap, map::DEFAULT_CENTER};
    use reqwest::StatusCode;

    fn entry(date: &str, code: i32) -> ForecastEntry {
        ForecastEntry {
            date: date.to_string(),
            weathercode: code,
            temperature_min: 1.0,
            temperature_max: 9.0,
            estimated_energy_kwh: 2.5,
        }
    }

    fn summary() -> Summary {
        Summary {
            min_temperature_overall: -1.0,
            max_temperature_overall: 12.0,
            average_sunshine_exposure_hours: Some(4.5),
            weekly_weather_comment: "Cool week".to_string(),
        }
    }

    fn status_error(endpoint: Endpoint, message: &str) -> BackendError {
        BackendError::Status {
            endpoint,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }

    fn state_at(lat: &str, lon: &str) -> AppState<HeadlessMap> {
        let mut state = AppState::new(HeadlessMap::default());
        state.set_latitude_text(lat);
        state.set_longitude_text(lon);
        state
    }

    #[test]
    fn typing_valid_coordinates_moves_map() {
        let state = state_at("50.0647", "19.945");

        let expected = ParsedCoordinate::new(50.0647, 19.945);
        assert_eq!(state.map().center(), expected);
        assert_eq!(state.map().marker(), Some(expected));
    }

    #[test]
    fn half_typed_coordinate_keeps_previous_map_state() {
        let mut state = state_at("50.0", "19.0");
        let before = state.map().clone();

        for text in ["", "-", "abc", "5o"] {
            state.set_latitude_text(text);
            assert_eq!(state.map(), &before, "latitude {text:?}");
        }
        state.set_latitude_text("50.0");
        state.set_longitude_text("");
        assert_eq!(state.map(), &before);
    }

    #[test]
    fn map_untouched_until_first_valid_coordinate() {
        let mut state = AppState::new(HeadlessMap::default());
        state.set_latitude_text("52.5");

        assert_eq!(state.map().center(), DEFAULT_CENTER);
        assert!(state.map().marker().is_none());
    }

    #[test]
    fn click_rounds_text_but_not_map() {
        let mut state = AppState::new(HeadlessMap::default());
        state.on_map_click(51.107_883_21, 17.038_537_9);

        assert_eq!(state.coordinate().latitude_text(), "51.1079");
        assert_eq!(state.coordinate().longitude_text(), "17.0385");
        let exact = ParsedCoordinate::new(51.107_883_21, 17.038_537_9);
        assert_eq!(state.map().center(), exact);
        assert_eq!(state.map().marker(), Some(exact));
    }

    #[test]
    fn invalid_coordinate_fails_without_ticket() {
        let mut state = state_at("abc", "21.0122");

        assert!(state.begin_fetch().is_none());
        assert_eq!(state.request_state(), &RequestState::Failed(INPUT_ERROR.to_string()));
        assert!(state.can_fetch());
    }

    #[test]
    fn successful_cycle() {
        let mut state = state_at("52.2297", "21.0122");

        let ticket = state.begin_fetch().expect("coordinate is valid");
        assert!(state.is_loading());
        assert!(!state.can_fetch());
        assert_eq!(ticket.position(), ParsedCoordinate::new(52.2297, 21.0122));

        let series = (1..=7).map(|d| entry(&format!("2026-10-{d:02}"), 3)).collect();
        assert!(state.apply_forecast(&ticket, Ok(series)));
        state.apply_summary(&ticket, Ok(summary()));

        assert_eq!(state.request_state(), &RequestState::Success);
        assert_eq!(state.forecast().map(<[_]>::len), Some(7));
        assert_eq!(state.summary(), Some(&summary()));
    }

    #[test]
    fn forecast_failure_short_circuits() {
        let mut state = state_at("1", "2");
        let ticket = state.begin_fetch().expect("valid");

        let proceed = state.apply_forecast(&ticket, Err(status_error(Endpoint::Forecast, "bad lat")));

        assert!(!proceed);
        assert_eq!(state.error_message(), Some("An error occurred: bad lat"));
        assert!(state.forecast().is_none());
    }

    #[test]
    fn summary_failure_keeps_forecast() {
        let mut state = state_at("1", "2");
        let ticket = state.begin_fetch().expect("valid");

        assert!(state.apply_forecast(&ticket, Ok(vec![entry("2026-10-17", 0)])));
        state.apply_summary(&ticket, Err(status_error(Endpoint::Summary, "db down")));

        assert_eq!(state.error_message(), Some("An error occurred: db down"));
        assert_eq!(state.forecast().map(<[_]>::len), Some(1));
        assert!(state.summary().is_none());
    }

    #[test]
    fn retrigger_clears_previous_results() {
        let mut state = state_at("1", "2");
        let first = state.begin_fetch().expect("valid");
        state.apply_forecast(&first, Ok(vec![entry("2026-10-17", 0)]));
        state.apply_summary(&first, Ok(summary()));

        let second = state.begin_fetch().expect("valid");
        assert!(second.generation() > first.generation());
        assert!(state.is_loading());
        assert!(state.forecast().is_none());
        assert!(state.summary().is_none());
        assert!(state.error_message().is_none());
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut state = state_at("1", "2");
        let old = state.begin_fetch().expect("valid");

        state.set_latitude_text("3");
        let new = state.begin_fetch().expect("valid");

        assert!(!state.apply_forecast(&old, Ok(vec![entry("old", 0)])));
        assert!(state.forecast().is_none());
        assert!(state.is_loading());

        assert!(state.apply_forecast(&new, Ok(vec![entry("new", 1)])));
        state.apply_summary(&old, Err(status_error(Endpoint::Summary, "late")));
        assert!(state.is_loading());

        state.apply_summary(&new, Ok(summary()));
        assert_eq!(state.request_state(), &RequestState::Success);
        assert_eq!(state.forecast().map(|f| f[0].date.as_str()), Some("new"));
    }

    #[test]
    fn input_error_supersedes_cycle_in_flight() {
        let mut state = state_at("1", "2");
        let ticket = state.begin_fetch().expect("valid");

        state.set_longitude_text("");
        assert!(state.begin_fetch().is_none());

        assert!(!state.apply_forecast(&ticket, Ok(vec![entry("late", 0)])));
        assert_eq!(state.error_message(), Some(INPUT_ERROR));
        assert!(state.forecast().is_none());
    }
}
