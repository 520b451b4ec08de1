//! Keyed cache of on-map markers.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::event::Coordinates;
use crate::key::EventKey;
use crate::marker::{MapSurface, MarkerSpec, MarkerStyle};

/// One marker on the map and the surface primitive that draws it.
#[derive(Debug)]
pub struct MarkerHandle<M> {
    pub key: EventKey,
    pub position: Coordinates,
    pub style: MarkerStyle,
    pub label: String,
    primitive: M,
}

impl<M> MarkerHandle<M> {
    pub fn primitive(&self) -> &M {
        &self.primitive
    }

    pub fn view(&self) -> MarkerView {
        MarkerView {
            key: self.key.clone(),
            position: self.position,
            style: self.style,
            label: self.label.clone(),
        }
    }
}

/// Read-only copy of a marker, for chrome that lists what is on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub key: EventKey,
    pub position: Coordinates,
    pub style: MarkerStyle,
    pub label: String,
}

/// What an [`MarkerRegistry::upsert`] did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Restyled,
    Unchanged,
}

/// Exactly one marker per [`EventKey`], on one surface.
///
/// The registry has no notion of search results or saved events; it only
/// places, restyles and removes what it is told to.
pub struct MarkerRegistry<S: MapSurface> {
    surface: S,
    markers: BTreeMap<EventKey, MarkerHandle<S::Marker>>,
}

impl<S: MapSurface> MarkerRegistry<S> {
    pub fn new(surface: S) -> Self {
        MarkerRegistry {
            surface,
            markers: BTreeMap::new(),
        }
    }

    /// Place a marker for `key`, or restyle the existing one in place.
    ///
    /// An existing marker keeps its primitive (and position); only its style
    /// may change.
    pub fn upsert(&mut self, key: &EventKey, spec: MarkerSpec) -> Upsert {
        if let Some(handle) = self.markers.get_mut(key) {
            if handle.style == spec.style {
                return Upsert::Unchanged;
            }
            debug!(key = %key, from = %handle.style, to = %spec.style, "restyling marker");
            self.surface.restyle_marker(&mut handle.primitive, spec.style);
            handle.style = spec.style;
            return Upsert::Restyled;
        }

        debug!(key = %key, position = %spec.position, style = %spec.style, "adding marker");
        let primitive = self.surface.add_marker(key, &spec);
        self.markers.insert(
            key.clone(),
            MarkerHandle {
                key: key.clone(),
                position: spec.position,
                style: spec.style,
                label: spec.label,
                primitive,
            },
        );
        Upsert::Created
    }

    /// Take the marker for `key` off the map. Returns whether one existed.
    pub fn remove(&mut self, key: &EventKey) -> bool {
        match self.markers.remove(key) {
            Some(handle) => {
                debug!(key = %key, "removing marker");
                self.surface.remove_marker(handle.primitive);
                true
            }
            None => false,
        }
    }

    pub fn current_keys(&self) -> BTreeSet<EventKey> {
        self.markers.keys().cloned().collect()
    }

    /// Current style of every marker, for diffing.
    pub fn styles(&self) -> BTreeMap<EventKey, MarkerStyle> {
        self.markers
            .iter()
            .map(|(k, h)| (k.clone(), h.style))
            .collect()
    }

    pub fn get(&self, key: &EventKey) -> Option<&MarkerHandle<S::Marker>> {
        self.markers.get(key)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn snapshot(&self) -> Vec<MarkerView> {
        self.markers.values().map(MarkerHandle::view).collect()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Remove every marker and hand the surface back.
    pub fn release(mut self) -> S {
        for (_, handle) in std::mem::take(&mut self.markers) {
            self.surface.remove_marker(handle.primitive);
        }
        self.surface
    }
}
