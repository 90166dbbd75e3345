//! What the core needs from a map widget.
//!
//! Clicks flow in through [`crate::AppState::on_map_click`]; the core pushes
//! the selected position out through [`MapAdapter::show`]. Tiles, zoom and
//! attribution belong to the widget.

use crate::model::ParsedCoordinate;

/// Default map center before any valid coordinate is selected (Warsaw).
pub const DEFAULT_CENTER: ParsedCoordinate = ParsedCoordinate::new(52.2297, 21.0122);

pub trait MapAdapter: Send {
    /// Center the map on `position` and place the single marker there,
    /// replacing any previous one.
    fn show(&mut self, position: ParsedCoordinate);
}

/// A map without a screen: remembers where it is centered and where the
/// marker is.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMap {
    center: ParsedCoordinate,
    marker: Option<ParsedCoordinate>,
}

impl HeadlessMap {
    pub fn new(center: ParsedCoordinate) -> Self {
        Self { center, marker: None }
    }

    pub fn center(&self) -> ParsedCoordinate {
        self.center
    }

    pub fn marker(&self) -> Option<ParsedCoordinate> {
        self.marker
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER)
    }
}

impl MapAdapter for HeadlessMap {
    fn show(&mut self, position: ParsedCoordinate) {
        self.center = position;
        self.marker = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_marker() {
        let map = HeadlessMap::default();
        assert_eq!(map.center(), DEFAULT_CENTER);
        assert!(map.marker().is_none());
    }

    #[test]
    fn show_replaces_marker() {
        let mut map = HeadlessMap::default();
        map.show(ParsedCoordinate::new(1.0, 2.0));
        map.show(ParsedCoordinate::new(3.0, 4.0));

        assert_eq!(map.center(), ParsedCoordinate::new(3.0, 4.0));
        assert_eq!(map.marker(), Some(ParsedCoordinate::new(3.0, 4.0)));
    }
}
