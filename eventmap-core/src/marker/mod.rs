//! Markers and the map surface they are drawn on.
//!
//! The surface itself (drawing, popups, camera animation) belongs to the
//! host. The core only talks to it through [`MapSurface`], and only the
//! [`MarkerRegistry`] ever places or removes markers on it.

mod registry;

use std::fmt;

use crate::event::Coordinates;
use crate::key::EventKey;

pub use registry::{MarkerHandle, MarkerRegistry, MarkerView, Upsert};

/// Zoom level for the camera after a fresh search.
pub const SEARCH_ZOOM: f64 = 10.0;
/// Zoom level when focusing a single search result.
pub const RESULT_ZOOM: f64 = 15.0;
/// Zoom level when focusing a single saved event.
pub const SAVED_ZOOM: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerStyle {
    Default,
    Saved,
}

impl fmt::Display for MarkerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerStyle::Default => write!(f, "default"),
            MarkerStyle::Saved => write!(f, "saved"),
        }
    }
}

/// Everything the surface needs to draw one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: Coordinates,
    pub style: MarkerStyle,
    /// Popup text.
    pub label: String,
}

/// Where the camera should fly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub center: Coordinates,
    pub zoom: f64,
}

impl CameraTarget {
    pub fn new(center: Coordinates, zoom: f64) -> Self {
        CameraTarget { center, zoom }
    }
}

/// A map the host renders. `Marker` is the surface's own handle to a drawn
/// primitive; the registry keeps it alive until the marker is removed.
pub trait MapSurface {
    type Marker;

    fn add_marker(&mut self, key: &EventKey, spec: &MarkerSpec) -> Self::Marker;

    /// Change a marker's look without removing it from the map.
    fn restyle_marker(&mut self, marker: &mut Self::Marker, style: MarkerStyle);

    fn remove_marker(&mut self, marker: Self::Marker);

    fn fly_to(&mut self, target: CameraTarget);
}
