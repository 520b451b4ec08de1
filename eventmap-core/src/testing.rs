//! In-memory collaborators for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::backend::{EventSource, SavedEventStore};
use crate::error::{EventMapError, EventMapResult};
use crate::event::{Event, SavedEvent};
use crate::key::{EventKey, Keyed};
use crate::marker::{CameraTarget, MapSurface, MarkerSpec, MarkerStyle};
use crate::query::SearchQuery;

/// Surface that records every call, with primitives numbered in creation order.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub next_id: u32,
    pub added: Vec<EventKey>,
    pub restyled: Vec<(u32, MarkerStyle)>,
    pub removed: Vec<u32>,
    pub flights: Vec<CameraTarget>,
}

impl RecordingSurface {
    pub fn mutations(&self) -> usize {
        self.added.len() + self.restyled.len() + self.removed.len()
    }
}

impl MapSurface for RecordingSurface {
    type Marker = u32;

    fn add_marker(&mut self, key: &EventKey, _spec: &MarkerSpec) -> u32 {
        self.next_id += 1;
        self.added.push(key.clone());
        self.next_id
    }

    fn restyle_marker(&mut self, marker: &mut u32, style: MarkerStyle) {
        self.restyled.push((*marker, style));
    }

    fn remove_marker(&mut self, marker: u32) {
        self.removed.push(marker);
    }

    fn fly_to(&mut self, target: CameraTarget) {
        self.flights.push(target);
    }
}

/// Backend holding search results per city and a saved list, counting calls.
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    pub cities: Mutex<HashMap<String, Vec<Event>>>,
    pub saved: Mutex<Vec<SavedEvent>>,
    next_id: AtomicI64,

    pub search_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,

    pub fail_search: AtomicBool,
    pub fail_fetch: AtomicBool,
    pub fail_save: AtomicBool,

    save_gate: Mutex<Option<Arc<Notify>>>,
    fetch_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeBackend {
    pub fn with_city(self, city: &str, events: Vec<Event>) -> Self {
        self.cities.lock().unwrap().insert(city.to_string(), events);
        self
    }

    pub fn with_saved(self, events: Vec<Event>) -> Self {
        for event in events {
            self.insert_saved(event);
        }
        self
    }

    pub fn insert_saved(&self, event: Event) -> SavedEvent {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let saved = SavedEvent::new(id, event);
        self.saved.lock().unwrap().push(saved.clone());
        saved
    }

    /// Hold every save until the returned gate is notified once.
    pub fn hold_next_save(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.save_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Hold the next fetch (and only that one) until the gate is notified.
    /// The held fetch answers with the saved list as it was when it started.
    pub fn hold_next_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.fetch_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(&self, counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

impl EventSource for FakeBackend {
    async fn search(&self, query: &SearchQuery) -> EventMapResult<Vec<Event>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(EventMapError::Transport("connection refused".into()));
        }
        let events = self.cities.lock().unwrap().get(&query.city).cloned();
        Ok(events.unwrap_or_default())
    }
}

impl SavedEventStore for FakeBackend {
    async fn fetch_all(&self) -> EventMapResult<Vec<SavedEvent>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(EventMapError::Transport("connection refused".into()));
        }
        let snapshot = self.saved.lock().unwrap().clone();
        let gate = self.fetch_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(snapshot)
    }

    async fn save(&self, event: &Event) -> EventMapResult<Option<SavedEvent>> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.save_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(EventMapError::Transport("connection reset".into()));
        }
        let key = event.key();
        if self.saved.lock().unwrap().iter().any(|s| s.key() == key) {
            return Err(EventMapError::Conflict(format!("{key} already saved")));
        }
        Ok(Some(self.insert_saved(event.clone())))
    }

    async fn delete(&self, id: i64) -> EventMapResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut saved = self.saved.lock().unwrap();
        let before = saved.len();
        saved.retain(|s| s.id != id);
        if saved.len() == before {
            return Err(EventMapError::NotFound(format!("saved event {id}")));
        }
        Ok(())
    }
}
