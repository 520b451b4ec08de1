//! Event types as the events backend returns them.
//!
//! Search results and saved events share one shape; a saved event only adds
//! the identifier the backend assigned when it was saved.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `[longitude, latitude]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Coordinates { lon, lat }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Coordinates { lon, lat }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lon, c.lat]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lon, self.lat)
    }
}

/// When an event happens: a machine start date plus the human-readable range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    pub start_date: String,
    #[serde(default)]
    pub when: String,
}

/// One search-result occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub date: EventDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    // Pass-through fields, kept so a saved event round-trips intact
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Value>,
    /// Any other field the backend sent, echoed back on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn new(title: impl Into<String>, start_date: impl Into<String>) -> Self {
        Event {
            title: title.into(),
            date: EventDate {
                start_date: start_date.into(),
                when: String::new(),
            },
            thumbnail: None,
            coordinates: None,
            address: Vec::new(),
            link: None,
            description: None,
            venue: None,
            extra: Map::new(),
        }
    }

    pub fn with_coordinates(mut self, lon: f64, lat: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lon, lat));
        self
    }

    pub fn with_when(mut self, when: impl Into<String>) -> Self {
        self.date.when = when.into();
        self
    }

    pub fn start_date(&self) -> &str {
        &self.date.start_date
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// An event the backend has persisted for the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEvent {
    pub id: i64,
    #[serde(flatten)]
    pub event: Event,
}

impl SavedEvent {
    pub fn new(id: i64, event: Event) -> Self {
        SavedEvent { id, event }
    }
}

impl fmt::Display for SavedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.event)
    }
}
