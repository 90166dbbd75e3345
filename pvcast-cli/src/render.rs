//! Text rendering of the view state.

use chrono::NaiveDate;
use pvcast_core::{
    AppState, ForecastEntry, HeadlessMap, Summary, WeatherCategory, format_duration,
    weather_glyph,
};

/// Inputs, map, status and whatever results are present.
pub fn view(state: &AppState<HeadlessMap>) -> String {
    let mut out = String::new();

    out.push_str(&inputs(state));
    out.push('\n');
    out.push_str(&map(state.map()));
    out.push('\n');

    if state.is_loading() {
        out.push_str("Loading...\n");
    }
    if let Some(msg) = state.error_message() {
        out.push_str(msg);
        out.push('\n');
    }

    out.push_str(&results(state));
    out
}

/// Forecast table and summary only.
pub fn results(state: &AppState<HeadlessMap>) -> String {
    let mut out = String::new();
    if let Some(series) = state.forecast() {
        out.push('\n');
        out.push_str(&forecast_table(series));
    }
    if let Some(summary) = state.summary() {
        out.push('\n');
        out.push_str(&summary_block(summary));
    }
    out
}

pub fn inputs(state: &AppState<HeadlessMap>) -> String {
    let coord = state.coordinate();
    format!(
        "Latitude: [{}]  Longitude: [{}]",
        coord.latitude_text(),
        coord.longitude_text()
    )
}

pub fn map(map: &HeadlessMap) -> String {
    let center = map.center();
    match map.marker() {
        Some(marker) => format!("Map center: {center} | marker: {marker}"),
        None => format!("Map center: {center} | marker: none"),
    }
}

pub fn forecast_table(series: &[ForecastEntry]) -> String {
    let mut out = String::from("7-day forecast:\n");
    out.push_str(&format!(
        "{:<16} {:>14} {:>14} {:>16}  {}\n",
        "Date", "Temp. Min (°C)", "Temp. Max (°C)", "PV energy (kWh)", "Weather"
    ));

    for day in series {
        let category = WeatherCategory::from_code(day.weathercode);
        out.push_str(&format!(
            "{:<16} {:>14} {:>14} {:>16}  {} {} ({})\n",
            date_label(&day.date),
            day.temperature_min,
            day.temperature_max,
            day.estimated_energy_kwh,
            weather_glyph(day.weathercode),
            category.label(),
            day.weathercode,
        ));
    }
    out
}

pub fn summary_block(summary: &Summary) -> String {
    format!(
        "Weekly summary:\n\
         Minimum temperature this week: {}°C\n\
         Maximum temperature this week: {}°C\n\
         Average sunshine exposure: {}\n\
         Comment: {}\n",
        summary.min_temperature_overall,
        summary.max_temperature_overall,
        format_duration(summary.average_sunshine_exposure_hours),
        summary.weekly_weather_comment,
    )
}

/// `2026-10-17` becomes `2026-10-17 Sat`; other formats pass through.
fn date_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => format!("{date} {}", parsed.format("%a")),
        Err(_) => date.to_string(),
    }
}
