//! Core library for the `pvcast` weather client.
//!
//! This crate defines:
//! - Coordinate entry and its synchronization with a map widget
//! - The forecast/summary fetch cycle against the weather service
//! - Presentation helpers (weather categories, durations)
//! - Configuration handling
//!
//! It is used by `pvcast-cli`, but any front end that can implement
//! [`MapAdapter`] can drive it.

pub mod backend;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod map;
pub mod model;
pub mod orchestrator;
pub mod present;
pub mod state;

pub use backend::{Endpoint, HttpBackend, WeatherBackend};
pub use config::Config;
pub use coordinate::CoordinateStore;
pub use error::BackendError;
pub use map::{HeadlessMap, MapAdapter};
pub use model::{ForecastEntry, ParsedCoordinate, Summary};
pub use orchestrator::FetchOrchestrator;
pub use present::{WeatherCategory, format_duration, weather_glyph};
pub use state::{AppState, FetchTicket, RequestState};
