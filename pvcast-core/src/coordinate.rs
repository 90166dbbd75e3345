//! Editable latitude/longitude text and its numeric interpretation.

use crate::model::ParsedCoordinate;

/// Decimal digits kept when a map click is written back into the text fields.
pub const CLICK_PRECISION: usize = 4;

/// The selected location as the user typed it.
///
/// Text is stored verbatim: blank or half-typed values such as `"-"` are
/// legal and simply yield no [`ParsedCoordinate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateStore {
    latitude_text: String,
    longitude_text: String,
}

impl CoordinateStore {
    pub fn new(latitude_text: impl Into<String>, longitude_text: impl Into<String>) -> Self {
        Self {
            latitude_text: latitude_text.into(),
            longitude_text: longitude_text.into(),
        }
    }

    pub fn latitude_text(&self) -> &str {
        &self.latitude_text
    }

    pub fn longitude_text(&self) -> &str {
        &self.longitude_text
    }

    pub fn set_latitude_text(&mut self, text: impl Into<String>) {
        self.latitude_text = text.into();
    }

    pub fn set_longitude_text(&mut self, text: impl Into<String>) {
        self.longitude_text = text.into();
    }

    /// Write a clicked map position into both fields, rounded for display.
    pub fn set_from_click(&mut self, lat: f64, lng: f64) {
        self.latitude_text = round_for_display(lat);
        self.longitude_text = round_for_display(lng);
    }

    /// Both fields as finite numbers, or `None` while either is not.
    pub fn parsed(&self) -> Option<ParsedCoordinate> {
        let latitude = parse_degrees(&self.latitude_text)?;
        let longitude = parse_degrees(&self.longitude_text)?;
        Some(ParsedCoordinate { latitude, longitude })
    }
}

/// Fixed-point text with [`CLICK_PRECISION`] digits. Exact ties round away
/// from zero (52.03125 -> "52.0313"); `{:.N}` alone would round them to even.
fn round_for_display(value: f64) -> String {
    let value = if is_exact_tie(value) {
        // A tie scaled by 10^N is k + 0.5, which f64 holds exactly.
        let scale = 10f64.powi(CLICK_PRECISION as i32);
        (value * scale).round() / scale
    } else {
        value
    };
    format!("{value:.prec$}", prec = CLICK_PRECISION)
}

fn is_exact_tie(value: f64) -> bool {
    const EXTRA: usize = 40;
    let expanded = format!("{value:.prec$}", prec = CLICK_PRECISION + EXTRA);
    let tail = &expanded[expanded.len() - EXTRA..];
    tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0')
}

fn parse_degrees(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
